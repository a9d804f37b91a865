use std::net::{IpAddr, SocketAddr};

/// Serve Jira and ADF tools to MCP clients
#[derive(Debug, clap::Parser)]
#[command(name = "mcp")]
pub struct App {
    #[command(subcommand)]
    pub transport: Transport,
}

#[derive(Debug, clap::Subcommand)]
pub enum Transport {
    /// Line-delimited JSON-RPC on stdin/stdout
    Stdio,

    /// JSON-RPC over HTTP, with an SSE endpoint announcing the message route
    Sse(HttpOptions),
}

#[derive(Debug, Clone, clap::Args)]
pub struct HttpOptions {
    /// Address to bind
    #[arg(long, env = "JIRATOOLS_MCP_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to bind
    #[arg(short, long, env = "JIRATOOLS_MCP_PORT", default_value_t = 3000)]
    pub port: u16,
}

impl HttpOptions {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

use crate::prelude::*;
use clap::Parser;

mod adf;
mod atlassian;
mod error;
mod mcp;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Jira tools for LLM coding agents: issues, comments and ADF conversion"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Jira base URL, overrides ATLASSIAN_BASE_URL
    #[clap(long, global = true)]
    base_url: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "JIRATOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Convert between Atlassian Document Format and Markdown / plain text
    Adf(crate::adf::App),

    /// Jira issue operations
    #[clap(subcommand)]
    Jira(crate::atlassian::jira::Commands),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Adf(sub_app) => crate::adf::run(sub_app, app.global),
        SubCommands::Jira(cmd) => crate::atlassian::jira::run(cmd, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}

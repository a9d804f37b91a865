//! Create Jira tickets

use clap::Args;
use colored::Colorize;
use jiratools_core::atlassian::jira::{build_create_payload, CreateRequest, TicketOutput};
use serde::Deserialize;

use crate::atlassian::{create_authenticated_client, send_json, AtlassianConfig};
use crate::prelude::*;

/// Create a new Jira ticket
#[derive(Args, Debug, Clone)]
pub struct CreateOptions {
    /// Summary/title of the ticket (required)
    pub summary: String,

    /// Description of the ticket. Blank lines separate paragraphs
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Project key
    #[arg(long, env = "JIRA_PROJECT")]
    pub project: String,

    /// Issue type
    #[arg(long, default_value = "Task")]
    pub issue_type: String,

    /// Priority (e.g., Highest, High, Medium, Low, Lowest)
    #[arg(long)]
    pub priority: Option<String>,

    /// Label to add (repeatable)
    #[arg(long = "label")]
    pub labels: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl From<&CreateOptions> for CreateRequest {
    fn from(options: &CreateOptions) -> Self {
        CreateRequest {
            project: options.project.clone(),
            summary: options.summary.clone(),
            issue_type: options.issue_type.clone(),
            description: options.description.clone(),
            priority: options.priority.clone(),
            labels: options.labels.clone(),
        }
    }
}

/// Create ticket data - handles all I/O and Jira API interactions
///
/// The payload (including the ADF description) is built by the core crate;
/// this function sends it and fetches the created ticket back.
pub async fn create_ticket_data(
    options: CreateOptions,
    global: &crate::Global,
) -> Result<TicketOutput> {
    let payload = build_create_payload(&CreateRequest::from(&options)).map_err(Error::from)?;

    let config = AtlassianConfig::resolve(global)?;
    let client = create_authenticated_client(&config)?;
    let url = format!("{}/rest/api/3/issue", config.api_root());

    #[derive(Deserialize)]
    struct CreateResponse {
        key: String,
    }

    let created: CreateResponse =
        send_json(client.post(&url).json(&payload), "Jira create").await?;
    log::info!("Created {}", created.key);

    super::get::get_ticket_data(created.key, global).await
}

/// CLI handler for create command
pub async fn handler(options: CreateOptions, global: &crate::Global) -> Result<()> {
    let json = options.json;
    let ticket = create_ticket_data(options, global).await?;

    if json {
        std::println!("{}", serde_json::to_string_pretty(&ticket)?);
    } else {
        std::println!(
            "\n{}",
            format!("Created ticket: {}", ticket.key).green().bold()
        );
        super::display_ticket(&ticket);
    }

    Ok(())
}

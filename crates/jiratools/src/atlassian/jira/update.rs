//! Update Jira ticket fields

use clap::Args;
use colored::Colorize;
use jiratools_core::atlassian::jira::{build_update_payload, UpdateOutput, UpdateRequest};

use crate::atlassian::{create_authenticated_client, send, AtlassianConfig};
use crate::prelude::*;

/// Update a Jira ticket's fields
#[derive(Args, Debug, Clone)]
pub struct UpdateOptions {
    /// Ticket key (e.g., PROJ-123)
    pub ticket_key: String,

    /// New summary
    #[arg(long)]
    pub summary: Option<String>,

    /// New description. An empty string clears the field
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New environment. An empty string clears the field
    #[arg(long)]
    pub environment: Option<String>,

    /// New priority
    #[arg(long)]
    pub priority: Option<String>,

    /// Replace labels (repeatable)
    #[arg(long = "label")]
    pub labels: Option<Vec<String>>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl From<&UpdateOptions> for UpdateRequest {
    fn from(options: &UpdateOptions) -> Self {
        UpdateRequest {
            summary: options.summary.clone(),
            description: options.description.clone(),
            environment: options.environment.clone(),
            priority: options.priority.clone(),
            labels: options.labels.clone(),
        }
    }
}

/// Update ticket data - handles all I/O and Jira API interactions
pub async fn update_ticket_data(
    options: UpdateOptions,
    global: &crate::Global,
) -> Result<UpdateOutput> {
    let request = UpdateRequest::from(&options);
    let payload = build_update_payload(&request).map_err(Error::from)?;

    let config = AtlassianConfig::resolve(global)?;
    let client = create_authenticated_client(&config)?;
    let url = format!(
        "{}/rest/api/3/issue/{}",
        config.api_root(),
        urlencoding::encode(&options.ticket_key)
    );

    // Jira answers 204 No Content on success
    send(client.put(&url).json(&payload)).await?;

    Ok(UpdateOutput {
        ticket_key: options.ticket_key,
        fields_updated: request.field_names(),
    })
}

/// CLI handler for update command
pub async fn handler(options: UpdateOptions, global: &crate::Global) -> Result<()> {
    let json = options.json;
    let output = update_ticket_data(options, global).await?;

    if json {
        std::println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    std::println!(
        "\n{}",
        format!("Updated ticket: {}", output.ticket_key).green().bold()
    );

    let mut table = new_table();
    for field in &output.fields_updated {
        table.add_row(prettytable::row![field.bold().cyan(), "updated".green().to_string()]);
    }
    table.printstd();
    std::println!();

    Ok(())
}

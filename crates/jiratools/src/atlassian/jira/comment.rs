//! Add comments to Jira tickets

use clap::Args;
use colored::Colorize;
use jiratools_core::atlassian::jira::{
    build_comment_payload, transform_comment, CommentOutput, JiraComment,
};

use crate::atlassian::{create_authenticated_client, send_json, AtlassianConfig};
use crate::prelude::*;

/// Add a comment to a Jira ticket
#[derive(Args, Debug, Clone)]
pub struct CommentOptions {
    /// Ticket key (e.g., PROJ-123)
    pub ticket_key: String,

    /// Comment text. Blank lines separate paragraphs
    pub body: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Post a comment and return it as Jira stored it
pub async fn add_comment_data(
    ticket_key: String,
    body: String,
    global: &crate::Global,
) -> Result<CommentOutput> {
    let payload = build_comment_payload(&body).map_err(Error::from)?;

    let config = AtlassianConfig::resolve(global)?;
    let client = create_authenticated_client(&config)?;
    let url = format!(
        "{}/rest/api/3/issue/{}/comment",
        config.api_root(),
        urlencoding::encode(&ticket_key)
    );

    let comment: JiraComment =
        send_json(client.post(&url).json(&payload), "Jira comment").await?;

    Ok(transform_comment(comment))
}

/// CLI handler for comment command
pub async fn handler(options: CommentOptions, global: &crate::Global) -> Result<()> {
    let comment = add_comment_data(options.ticket_key.clone(), options.body, global).await?;

    if options.json {
        std::println!("{}", serde_json::to_string_pretty(&comment)?);
    } else {
        std::println!(
            "\n{}",
            format!("Commented on {}", options.ticket_key).green().bold()
        );
        super::display_comment(1, &comment);
    }

    Ok(())
}

use jiratools_core::atlassian::jira::{
    transform_ticket_response, JiraComment, JiraExtendedIssueResponse, TicketOutput,
};
use serde::{Deserialize, Serialize};

use crate::atlassian::{create_authenticated_client, send, send_json, AtlassianConfig};
use crate::prelude::{println, *};

/// Options for getting a Jira ticket
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct GetOptions {
    /// Issue key (e.g., "PROJ-123")
    #[clap(env = "JIRA_ISSUE_KEY")]
    pub issue_key: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Deserialize)]
struct CommentsPage {
    #[serde(default)]
    comments: Vec<JiraComment>,
}

/// Get detailed ticket information from Jira
pub async fn get_ticket_data(issue_key: String, global: &crate::Global) -> Result<TicketOutput> {
    let config = AtlassianConfig::resolve(global)?;
    let client = create_authenticated_client(&config)?;
    let encoded_key = urlencoding::encode(&issue_key);

    let ticket_url = format!("{}/rest/api/3/issue/{}", config.api_root(), encoded_key);
    let issue: JiraExtendedIssueResponse = send_json(client.get(&ticket_url), "Jira issue").await?;

    let comments_url = format!(
        "{}/rest/api/3/issue/{}/comment",
        config.api_root(),
        encoded_key
    );

    // Comments are best-effort: a failure here still returns the ticket
    let comments = match send(client.get(&comments_url)).await {
        Ok(response) => response
            .json::<CommentsPage>()
            .await
            .map(|page| page.comments)
            .unwrap_or_else(|e| {
                log::warn!("Failed to parse comments for {issue_key}: {e}");
                Vec::new()
            }),
        Err(e) => {
            log::warn!("Failed to fetch comments for {issue_key}: {e}");
            Vec::new()
        }
    };

    Ok(transform_ticket_response(issue, comments))
}

/// Handle the get command
pub async fn handler(options: GetOptions, global: &crate::Global) -> Result<()> {
    let ticket = get_ticket_data(options.issue_key, global).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
    } else {
        super::display_ticket(&ticket);
    }

    Ok(())
}

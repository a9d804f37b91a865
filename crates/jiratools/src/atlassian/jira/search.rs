use colored::Colorize;
use jiratools_core::atlassian::jira::{transform_search_response, JiraSearchResponse, SearchOutput};
use serde::{Deserialize, Serialize};

use crate::atlassian::{create_authenticated_client, send_json, AtlassianConfig};
use crate::prelude::{println, *};

const SEARCH_FIELDS: &str = "summary,description,status,assignee";
const MAX_LIMIT: usize = 100;

/// Options for searching Jira issues
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct SearchOptions {
    /// JQL query (e.g., "project = PROJ AND status = Open")
    pub query: String,

    /// Maximum number of results to return (max 100)
    #[arg(long, default_value = "10")]
    pub limit: usize,

    /// Pagination token from a previous search
    #[arg(long)]
    pub next_page_token: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Search issues with JQL
pub async fn search_issues_data(
    query: String,
    limit: usize,
    next_page_token: Option<String>,
    global: &crate::Global,
) -> Result<SearchOutput> {
    let config = AtlassianConfig::resolve(global)?;
    let client = create_authenticated_client(&config)?;

    let mut url = format!(
        "{}/rest/api/3/search/jql?jql={}&maxResults={}&fields={}",
        config.api_root(),
        urlencoding::encode(&query),
        limit.clamp(1, MAX_LIMIT),
        SEARCH_FIELDS
    );
    if let Some(token) = &next_page_token {
        url.push_str(&format!("&nextPageToken={}", urlencoding::encode(token)));
    }

    let response: JiraSearchResponse = send_json(client.get(&url), "Jira search").await?;

    Ok(transform_search_response(response))
}

/// Handle the search command
pub async fn handler(options: SearchOptions, global: &crate::Global) -> Result<()> {
    let output = search_issues_data(
        options.query,
        options.limit,
        options.next_page_token,
        global,
    )
    .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if output.issues.is_empty() {
        println!("No issues found.");
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Key".bold().cyan(),
        "Summary".bold().cyan(),
        "Status".bold().cyan(),
        "Assignee".bold().cyan()
    ]);

    for issue in &output.issues {
        table.add_row(prettytable::row![
            issue.key.bright_white().to_string(),
            issue.summary,
            issue.status.green().to_string(),
            issue.assignee.as_deref().unwrap_or("Unassigned")
        ]);
    }

    table.printstd();
    println!("\n{} of {} issues", output.issues.len(), output.total);

    if let Some(token) = &output.next_page_token {
        println!("Next page: --next-page-token {token}");
    }

    Ok(())
}

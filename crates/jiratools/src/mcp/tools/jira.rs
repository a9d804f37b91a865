use crate::atlassian::jira::{
    add_comment_data, create::CreateOptions, create_ticket_data, get_ticket_data,
    search_issues_data, update::UpdateOptions, update_ticket_data,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{json_result, parse_arguments, tool_error, JsonRpcError, Tool};

const CREDENTIALS_NOTE: &str =
    "Requires ATLASSIAN_BASE_URL, ATLASSIAN_EMAIL, and ATLASSIAN_API_TOKEN environment variables.";

pub fn tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "jira_get".to_string(),
            description: format!("Get detailed information about a Jira ticket, including its description, environment and comments rendered as Markdown. {CREDENTIALS_NOTE}"),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "issueKey": {
                        "type": "string",
                        "description": "Issue key (e.g., 'PROJ-123')"
                    }
                },
                "required": ["issueKey"]
            }),
        },
        Tool {
            name: "jira_search".to_string(),
            description: format!("Search Jira issues using JQL (Jira Query Language). Returns key, summary, status, assignee and the Markdown description of each issue. Supports token-based pagination using nextPageToken. {CREDENTIALS_NOTE}"),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "JQL query to search issues (e.g., 'project = PROJ AND status = Open')"
                    },
                    "limit": {
                        "type": "number",
                        "description": "Maximum number of results to return (default: 10, max: 100)"
                    },
                    "nextPageToken": {
                        "type": "string",
                        "description": "Pagination token from the previous response"
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "jira_create".to_string(),
            description: format!("Create a Jira ticket. The description is plain text; blank lines separate paragraphs. Returns the created ticket. {CREDENTIALS_NOTE}"),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "project": {"type": "string", "description": "Project key"},
                    "summary": {"type": "string", "description": "Ticket summary"},
                    "description": {"type": "string", "description": "Plain-text description"},
                    "issueType": {"type": "string", "description": "Issue type (default: Task)"},
                    "priority": {"type": "string", "description": "Priority name"},
                    "labels": {"type": "array", "items": {"type": "string"}}
                },
                "required": ["project", "summary"]
            }),
        },
        Tool {
            name: "jira_update".to_string(),
            description: format!("Update fields of a Jira ticket. Only provided fields change; an empty description or environment clears it. {CREDENTIALS_NOTE}"),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "issueKey": {"type": "string", "description": "Issue key (e.g., 'PROJ-123')"},
                    "summary": {"type": "string"},
                    "description": {"type": "string"},
                    "environment": {"type": "string"},
                    "priority": {"type": "string"},
                    "labels": {"type": "array", "items": {"type": "string"}}
                },
                "required": ["issueKey"]
            }),
        },
        Tool {
            name: "jira_comment".to_string(),
            description: format!("Add a plain-text comment to a Jira ticket. Blank lines separate paragraphs. {CREDENTIALS_NOTE}"),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "issueKey": {"type": "string", "description": "Issue key (e.g., 'PROJ-123')"},
                    "body": {"type": "string", "description": "Comment text"}
                },
                "required": ["issueKey", "body"]
            }),
        },
    ]
}

/// Handle Jira get command via MCP
pub async fn handle_jira_get(
    arguments: Option<Value>,
    global: &crate::Global,
) -> Result<Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct JiraGetArgs {
        #[serde(rename = "issueKey")]
        issue_key: String,
    }

    let args: JiraGetArgs = parse_arguments(arguments)?;

    let ticket = get_ticket_data(args.issue_key, global)
        .await
        .map_err(tool_error)?;

    json_result(&ticket)
}

/// Handle Jira search command via MCP
pub async fn handle_jira_search(
    arguments: Option<Value>,
    global: &crate::Global,
) -> Result<Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct JiraSearchArgs {
        query: String,
        limit: Option<usize>,
        #[serde(rename = "nextPageToken")]
        next_page_token: Option<String>,
    }

    let args: JiraSearchArgs = parse_arguments(arguments)?;

    let search_data = search_issues_data(
        args.query,
        args.limit.unwrap_or(10),
        args.next_page_token,
        global,
    )
    .await
    .map_err(tool_error)?;

    json_result(&search_data)
}

/// Handle Jira create command via MCP
pub async fn handle_jira_create(
    arguments: Option<Value>,
    global: &crate::Global,
) -> Result<Value, JsonRpcError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct JiraCreateArgs {
        project: String,
        summary: String,
        description: Option<String>,
        issue_type: Option<String>,
        priority: Option<String>,
        #[serde(default)]
        labels: Vec<String>,
    }

    let args: JiraCreateArgs = parse_arguments(arguments)?;

    let options = CreateOptions {
        summary: args.summary,
        description: args.description,
        project: args.project,
        issue_type: args.issue_type.unwrap_or_else(|| "Task".to_string()),
        priority: args.priority,
        labels: args.labels,
        json: true,
    };

    let ticket = create_ticket_data(options, global)
        .await
        .map_err(tool_error)?;

    json_result(&ticket)
}

/// Handle Jira update command via MCP
pub async fn handle_jira_update(
    arguments: Option<Value>,
    global: &crate::Global,
) -> Result<Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct JiraUpdateArgs {
        #[serde(rename = "issueKey")]
        issue_key: String,
        summary: Option<String>,
        description: Option<String>,
        environment: Option<String>,
        priority: Option<String>,
        labels: Option<Vec<String>>,
    }

    let args: JiraUpdateArgs = parse_arguments(arguments)?;

    let options = UpdateOptions {
        ticket_key: args.issue_key,
        summary: args.summary,
        description: args.description,
        environment: args.environment,
        priority: args.priority,
        labels: args.labels,
        json: true,
    };

    let output = update_ticket_data(options, global)
        .await
        .map_err(tool_error)?;

    json_result(&output)
}

/// Handle Jira comment command via MCP
pub async fn handle_jira_comment(
    arguments: Option<Value>,
    global: &crate::Global,
) -> Result<Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct JiraCommentArgs {
        #[serde(rename = "issueKey")]
        issue_key: String,
        body: String,
    }

    let args: JiraCommentArgs = parse_arguments(arguments)?;

    let comment = add_comment_data(args.issue_key, args.body, global)
        .await
        .map_err(tool_error)?;

    json_result(&comment)
}

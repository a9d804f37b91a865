//! Transformation functions for Jira API responses and request payloads
//!
//! Rich-text fields are never handed to callers raw: descriptions,
//! environments and comment bodies pass through [`adf::normalize`] and are
//! rendered as Markdown, and text going back to Jira is turned into an ADF
//! document with [`adf::text_to_document`].

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adf;

/// Jira issue response from API
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JiraIssueResponse {
    pub key: String,
    pub fields: JiraIssueFields,
}

/// Fields from Jira issue
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JiraIssueFields {
    pub summary: String,
    #[serde(default)]
    pub description: Option<Value>,
    pub status: JiraStatus,
    #[serde(default)]
    pub assignee: Option<JiraUser>,
}

/// Jira status field
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JiraStatus {
    pub name: String,
}

/// Jira user (assignee, reporter, comment author)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct JiraUser {
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "emailAddress", default)]
    pub email_address: Option<String>,
    #[serde(rename = "accountId", default)]
    pub account_id: Option<String>,
}

impl JiraUser {
    /// Prefer displayName over emailAddress
    fn label(&self) -> Option<String> {
        self.display_name
            .clone()
            .or_else(|| self.email_address.clone())
    }
}

/// Search response from Jira API
/// The GET /rest/api/3/search/jql endpoint returns this structure
#[derive(Debug, Deserialize, Clone)]
pub struct JiraSearchResponse {
    pub issues: Vec<JiraIssueResponse>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default, rename = "isLast")]
    pub is_last: Option<bool>,
    #[serde(default, rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// Jira priority field
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JiraPriority {
    #[serde(default)]
    pub name: String,
}

/// Jira issue type field
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JiraIssueType {
    pub name: String,
}

/// Jira component field
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JiraComponent {
    pub name: String,
}

/// Extended fields for detailed ticket read
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JiraExtendedFields {
    pub summary: String,
    #[serde(default)]
    pub description: Option<Value>, // Can be a string or ADF
    #[serde(default)]
    pub environment: Option<Value>, // Can be a string or ADF
    pub status: JiraStatus,
    #[serde(default)]
    pub assignee: Option<JiraUser>,
    #[serde(default)]
    pub reporter: Option<JiraUser>,
    #[serde(default)]
    pub priority: Option<JiraPriority>,
    #[serde(default)]
    pub issuetype: Option<JiraIssueType>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub duedate: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub components: Vec<JiraComponent>,
}

/// Extended issue response for detailed read
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JiraExtendedIssueResponse {
    pub key: String,
    pub fields: JiraExtendedFields,
}

/// Comment on a Jira ticket as returned by the API
#[derive(Debug, Serialize, Clone, Deserialize, PartialEq)]
pub struct JiraComment {
    pub id: String,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub author: Option<JiraUser>,
}

/// Output structure for a single issue
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct IssueOutput {
    pub key: String,
    pub summary: String,
    pub description: Option<String>,
    pub status: String,
    pub assignee: Option<String>,
}

/// Output structure for search command
#[derive(Debug, Serialize, PartialEq)]
pub struct SearchOutput {
    pub issues: Vec<IssueOutput>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Comment with its body rendered as Markdown
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CommentOutput {
    pub id: String,
    pub author: Option<String>,
    pub created: Option<String>,
    pub body: String,
}

/// Output structure for detailed ticket information
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TicketOutput {
    pub key: String,
    pub summary: String,
    pub description: Option<String>,
    pub environment: Option<String>,
    pub status: String,
    pub priority: Option<String>,
    pub issue_type: Option<String>,
    pub assignee: Option<String>,
    pub reporter: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub due_date: Option<String>,
    pub labels: Vec<String>,
    pub components: Vec<String>,
    pub comments: Vec<CommentOutput>,
}

/// Result of an update request
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UpdateOutput {
    pub ticket_key: String,
    pub fields_updated: Vec<String>,
}

/// Fields for a new ticket
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateRequest {
    pub project: String,
    pub summary: String,
    pub issue_type: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub labels: Vec<String>,
}

/// Fields to change on an existing ticket. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRequest {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub environment: Option<String>,
    pub priority: Option<String>,
    pub labels: Option<Vec<String>>,
}

impl UpdateRequest {
    /// Names of the fields this request touches, in payload order
    pub fn field_names(&self) -> Vec<String> {
        [
            ("summary", self.summary.is_some()),
            ("description", self.description.is_some()),
            ("environment", self.environment.is_some()),
            ("priority", self.priority.is_some()),
            ("labels", self.labels.is_some()),
        ]
        .into_iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| name.to_string())
        .collect()
    }
}

/// Errors raised while building request payloads
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum JiraError {
    #[error("summary must not be empty")]
    EmptySummary,

    #[error("at least one field must be provided for update (summary, description, environment, priority or labels)")]
    NothingToUpdate,

    #[error("comment body must not be empty")]
    EmptyComment,
}

/// Render a rich-text field (string or ADF) as trimmed Markdown
///
/// # Arguments
/// * `value` - The raw field value from the Jira API
///
/// # Returns
/// * `Option<String>` - Markdown, or None if absent, unrecognized or empty
pub fn extract_description(value: Option<Value>) -> Option<String> {
    adf::normalize(value.as_ref())
        .map(|document| document.to_markdown().trim().to_string())
        .filter(|markdown| !markdown.is_empty())
}

/// Convert Jira search API response to domain model
pub fn transform_search_response(search_response: JiraSearchResponse) -> SearchOutput {
    let issues: Vec<IssueOutput> = search_response
        .issues
        .into_iter()
        .map(|issue| IssueOutput {
            key: issue.key,
            summary: issue.fields.summary,
            description: extract_description(issue.fields.description),
            status: issue.fields.status.name,
            assignee: issue.fields.assignee.as_ref().and_then(JiraUser::label),
        })
        .collect();

    let total = search_response
        .total
        .map(|t| t as usize)
        .unwrap_or(issues.len());

    SearchOutput {
        issues,
        total,
        next_page_token: search_response.next_page_token,
    }
}

/// Convert a single API comment into its rendered form
pub fn transform_comment(comment: JiraComment) -> CommentOutput {
    CommentOutput {
        id: comment.id,
        author: comment.author.as_ref().and_then(JiraUser::label),
        created: comment.created.as_deref().map(format_timestamp),
        body: extract_description(comment.body).unwrap_or_default(),
    }
}

/// Convert Jira extended issue response + comments to ticket output
///
/// # Arguments
/// * `issue` - The raw extended issue response from Jira API
/// * `comments` - The parsed comments array
///
/// # Returns
/// * `TicketOutput` - Ticket with rich-text fields rendered as Markdown
pub fn transform_ticket_response(
    issue: JiraExtendedIssueResponse,
    comments: Vec<JiraComment>,
) -> TicketOutput {
    let fields = issue.fields;

    TicketOutput {
        key: issue.key,
        summary: fields.summary,
        description: extract_description(fields.description),
        environment: extract_description(fields.environment),
        status: fields.status.name,
        priority: fields
            .priority
            .map(|p| p.name)
            .filter(|name| !name.is_empty()),
        issue_type: fields.issuetype.map(|it| it.name),
        assignee: fields.assignee.as_ref().and_then(JiraUser::label),
        reporter: fields.reporter.as_ref().and_then(JiraUser::label),
        created: fields.created.as_deref().map(format_timestamp),
        updated: fields.updated.as_deref().map(format_timestamp),
        due_date: fields.duedate,
        labels: fields.labels,
        components: fields.components.into_iter().map(|c| c.name).collect(),
        comments: comments.into_iter().map(transform_comment).collect(),
    }
}

/// Build the body of `POST /rest/api/3/issue`
pub fn build_create_payload(request: &CreateRequest) -> Result<Value, JiraError> {
    let summary = request.summary.trim();
    if summary.is_empty() {
        return Err(JiraError::EmptySummary);
    }

    let mut fields = serde_json::json!({
        "summary": summary,
        "project": { "key": request.project },
        "issuetype": { "name": request.issue_type },
    });

    if let Some(document) = request.description.as_deref().and_then(adf::text_to_document) {
        fields["description"] = document.to_value();
    }

    if let Some(priority) = &request.priority {
        fields["priority"] = serde_json::json!({ "name": priority });
    }

    if !request.labels.is_empty() {
        fields["labels"] = serde_json::json!(request.labels);
    }

    Ok(serde_json::json!({ "fields": fields }))
}

/// Build the body of `PUT /rest/api/3/issue/{key}`
///
/// A blank description or environment clears the field.
pub fn build_update_payload(request: &UpdateRequest) -> Result<Value, JiraError> {
    let mut fields = serde_json::Map::new();

    if let Some(summary) = &request.summary {
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(JiraError::EmptySummary);
        }
        fields.insert("summary".to_string(), Value::String(summary.to_string()));
    }

    if let Some(description) = &request.description {
        fields.insert("description".to_string(), rich_text_field(description));
    }

    if let Some(environment) = &request.environment {
        fields.insert("environment".to_string(), rich_text_field(environment));
    }

    if let Some(priority) = &request.priority {
        fields.insert(
            "priority".to_string(),
            serde_json::json!({ "name": priority }),
        );
    }

    if let Some(labels) = &request.labels {
        fields.insert("labels".to_string(), serde_json::json!(labels));
    }

    if fields.is_empty() {
        return Err(JiraError::NothingToUpdate);
    }

    Ok(serde_json::json!({ "fields": fields }))
}

/// Build the body of `POST /rest/api/3/issue/{key}/comment`
pub fn build_comment_payload(body: &str) -> Result<Value, JiraError> {
    adf::text_to_document(body)
        .map(|document| serde_json::json!({ "body": document.to_value() }))
        .ok_or(JiraError::EmptyComment)
}

fn rich_text_field(text: &str) -> Value {
    adf::text_to_document(text)
        .map(|document| document.to_value())
        .unwrap_or(Value::Null)
}

/// Collect the messages of a Jira error body
///
/// Jira reports failures as `{"errorMessages": [...], "errors": {field: msg}}`.
/// Falls back to the raw body when neither is present.
pub fn parse_error_body(body: &str) -> String {
    let Ok(error_json) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    let mut messages: Vec<String> = error_json
        .get("errorMessages")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if let Some(errors) = error_json.get("errors").and_then(Value::as_object) {
        for (field, error) in errors {
            if let Some(error_text) = error.as_str() {
                messages.push(format!("{field}: {error_text}"));
            }
        }
    }

    if messages.is_empty() {
        body.to_string()
    } else {
        messages.join("\n")
    }
}

/// Format a Jira timestamp (`2024-01-15T10:30:00.000+0000`) as `2024-01-15 10:30`
///
/// Anything unparseable is returned unchanged.
pub fn format_timestamp(timestamp: &str) -> String {
    DateTime::<FixedOffset>::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.3f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(timestamp))
        .map(|parsed| parsed.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Helper to create a basic issue response for testing
    fn create_issue_response(
        key: &str,
        summary: &str,
        status: &str,
        assignee: Option<JiraUser>,
    ) -> JiraIssueResponse {
        JiraIssueResponse {
            key: key.to_string(),
            fields: JiraIssueFields {
                summary: summary.to_string(),
                description: None,
                status: JiraStatus {
                    name: status.to_string(),
                },
                assignee,
            },
        }
    }

    fn create_extended_issue_response(description: Option<Value>) -> JiraExtendedIssueResponse {
        JiraExtendedIssueResponse {
            key: "PROJ-42".to_string(),
            fields: JiraExtendedFields {
                summary: "Login fails on Safari".to_string(),
                description,
                environment: Some(json!("Safari 17, macOS 14")),
                status: JiraStatus {
                    name: "In Progress".to_string(),
                },
                assignee: Some(JiraUser {
                    display_name: Some("Jane Doe".to_string()),
                    ..Default::default()
                }),
                reporter: Some(JiraUser {
                    email_address: Some("qa@example.com".to_string()),
                    ..Default::default()
                }),
                priority: Some(JiraPriority {
                    name: String::new(),
                }),
                issuetype: Some(JiraIssueType {
                    name: "Bug".to_string(),
                }),
                created: Some("2024-01-15T10:30:00.000+0000".to_string()),
                updated: None,
                duedate: Some("2024-02-01".to_string()),
                labels: vec!["frontend".to_string()],
                components: vec![JiraComponent {
                    name: "Auth".to_string(),
                }],
            },
        }
    }

    #[test]
    fn test_transform_search_response_basic() {
        // Arrange: Create a basic search response with one issue
        let response = JiraSearchResponse {
            issues: vec![create_issue_response(
                "PROJ-123",
                "Fix bug in authentication",
                "In Progress",
                Some(JiraUser {
                    display_name: Some("John Doe".to_string()),
                    email_address: Some("john@example.com".to_string()),
                    account_id: None,
                }),
            )],
            total: Some(1),
            is_last: Some(true),
            next_page_token: None,
        };

        // Act: Transform the response
        let output = transform_search_response(response);

        // Assert: Verify the transformation
        assert_eq!(output.total, 1);
        assert_eq!(output.issues.len(), 1);
        assert_eq!(output.next_page_token, None);

        let issue = &output.issues[0];
        assert_eq!(issue.key, "PROJ-123");
        assert_eq!(issue.status, "In Progress");
        assert_eq!(issue.assignee, Some("John Doe".to_string()));
        assert_eq!(issue.description, None);
    }

    #[test]
    fn test_transform_search_response_assignee_email_only() {
        // Arrange
        let response = JiraSearchResponse {
            issues: vec![create_issue_response(
                "PROJ-1",
                "Summary",
                "Open",
                Some(JiraUser {
                    email_address: Some("dev@example.com".to_string()),
                    ..Default::default()
                }),
            )],
            total: None,
            is_last: None,
            next_page_token: Some("token-2".to_string()),
        };

        // Act
        let output = transform_search_response(response);

        // Assert: Falls back to email, total falls back to issue count
        assert_eq!(output.issues[0].assignee, Some("dev@example.com".to_string()));
        assert_eq!(output.total, 1);
        assert_eq!(output.next_page_token, Some("token-2".to_string()));
    }

    #[test]
    fn test_transform_search_response_renders_adf_description() {
        // Arrange
        let mut issue = create_issue_response("PROJ-2", "Summary", "Done", None);
        issue.fields.description = Some(json!({
            "type": "doc",
            "version": 1,
            "content": [{"type": "paragraph", "content": [
                {"type": "text", "text": "needs "},
                {"type": "text", "text": "review", "marks": [{"type": "em"}]}
            ]}]
        }));
        let response = JiraSearchResponse {
            issues: vec![issue],
            total: Some(1),
            is_last: Some(true),
            next_page_token: None,
        };

        // Act
        let output = transform_search_response(response);

        // Assert
        assert_eq!(output.issues[0].description, Some("needs _review_".to_string()));
    }

    #[test]
    fn test_transform_ticket_response_full() {
        // Arrange
        let issue = create_extended_issue_response(Some(json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "heading", "attrs": {"level": 2}, "content": [
                    {"type": "text", "text": "Steps"}
                ]},
                {"type": "orderedList", "content": [
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "Open login"}]}
                    ]},
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "Submit"}]}
                    ]}
                ]}
            ]
        })));
        let comments = vec![JiraComment {
            id: "10001".to_string(),
            body: Some(json!({
                "type": "doc",
                "version": 1,
                "content": [{"type": "paragraph", "content": [
                    {"type": "mention", "attrs": {"id": "1", "text": "@Jane"}},
                    {"type": "text", "text": " can you look?"}
                ]}]
            })),
            created: Some("2024-01-16T08:05:00.000+0000".to_string()),
            author: Some(JiraUser {
                display_name: Some("Sam".to_string()),
                ..Default::default()
            }),
        }];

        // Act
        let output = transform_ticket_response(issue, comments);

        // Assert
        assert_eq!(output.key, "PROJ-42");
        assert_eq!(
            output.description,
            Some("## Steps\n\n1. Open login\n\n2. Submit".to_string())
        );
        assert_eq!(output.environment, Some("Safari 17, macOS 14".to_string()));
        assert_eq!(output.priority, None);
        assert_eq!(output.issue_type, Some("Bug".to_string()));
        assert_eq!(output.assignee, Some("Jane Doe".to_string()));
        assert_eq!(output.reporter, Some("qa@example.com".to_string()));
        assert_eq!(output.created, Some("2024-01-15 10:30".to_string()));
        assert_eq!(output.components, vec!["Auth".to_string()]);
        assert_eq!(
            output.comments,
            vec![CommentOutput {
                id: "10001".to_string(),
                author: Some("Sam".to_string()),
                created: Some("2024-01-16 08:05".to_string()),
                body: "@Jane can you look?".to_string(),
            }]
        );
    }

    #[test]
    fn test_extract_description_string() {
        // Arrange: A legacy plain string
        let value = Some(json!("This is a plain text description"));

        // Act
        let result = extract_description(value);

        // Assert
        assert_eq!(result, Some("This is a plain text description".to_string()));
    }

    #[test]
    fn test_extract_description_bare_node() {
        let value = Some(json!({
            "type": "codeBlock",
            "attrs": {"language": "sh"},
            "content": [{"type": "text", "text": "make test"}]
        }));

        assert_eq!(
            extract_description(value),
            Some("```sh\nmake test\n```".to_string())
        );
    }

    #[test]
    fn test_extract_description_none_and_non_adf() {
        assert_eq!(extract_description(None), None);
        assert_eq!(extract_description(Some(Value::Null)), None);
        assert_eq!(extract_description(Some(json!({"foo": "bar"}))), None);
        assert_eq!(
            extract_description(Some(json!({"type": "doc", "version": 1, "content": []}))),
            None
        );
    }

    #[test]
    fn test_build_create_payload() {
        // Arrange
        let request = CreateRequest {
            project: "PROJ".to_string(),
            summary: "  New feature ".to_string(),
            issue_type: "Task".to_string(),
            description: Some("First paragraph\n\nSecond".to_string()),
            priority: Some("High".to_string()),
            labels: vec!["backend".to_string()],
        };

        // Act
        let payload = build_create_payload(&request).unwrap();

        // Assert
        assert_eq!(
            payload,
            json!({
                "fields": {
                    "summary": "New feature",
                    "project": {"key": "PROJ"},
                    "issuetype": {"name": "Task"},
                    "description": {
                        "type": "doc",
                        "version": 1,
                        "content": [
                            {"type": "paragraph", "content": [{"type": "text", "text": "First paragraph"}]},
                            {"type": "paragraph", "content": [{"type": "text", "text": "Second"}]}
                        ]
                    },
                    "priority": {"name": "High"},
                    "labels": ["backend"]
                }
            })
        );
    }

    #[test]
    fn test_build_create_payload_omits_blank_description() {
        let request = CreateRequest {
            project: "PROJ".to_string(),
            summary: "Title".to_string(),
            issue_type: "Bug".to_string(),
            description: Some("  \n\n ".to_string()),
            ..Default::default()
        };

        let payload = build_create_payload(&request).unwrap();

        assert!(payload["fields"].get("description").is_none());
        assert!(payload["fields"].get("labels").is_none());
    }

    #[test]
    fn test_build_create_payload_requires_summary() {
        let request = CreateRequest {
            summary: "   ".to_string(),
            ..Default::default()
        };

        assert_eq!(build_create_payload(&request), Err(JiraError::EmptySummary));
    }

    #[test]
    fn test_build_update_payload() {
        // Arrange
        let request = UpdateRequest {
            description: Some("Updated text".to_string()),
            environment: Some("   ".to_string()),
            labels: Some(vec![]),
            ..Default::default()
        };

        // Act
        let payload = build_update_payload(&request).unwrap();

        // Assert: Blank environment clears the field
        assert_eq!(
            payload,
            json!({
                "fields": {
                    "description": {
                        "type": "doc",
                        "version": 1,
                        "content": [
                            {"type": "paragraph", "content": [{"type": "text", "text": "Updated text"}]}
                        ]
                    },
                    "environment": null,
                    "labels": []
                }
            })
        );
        assert_eq!(
            request.field_names(),
            vec!["description", "environment", "labels"]
        );
    }

    #[test]
    fn test_build_update_payload_requires_a_field() {
        assert_eq!(
            build_update_payload(&UpdateRequest::default()),
            Err(JiraError::NothingToUpdate)
        );
    }

    #[test]
    fn test_build_comment_payload() {
        assert_eq!(
            build_comment_payload("Looks good"),
            Ok(json!({
                "body": {
                    "type": "doc",
                    "version": 1,
                    "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "Looks good"}]}
                    ]
                }
            }))
        );
        assert_eq!(build_comment_payload("\n \n"), Err(JiraError::EmptyComment));
    }

    #[test]
    fn test_parse_error_body() {
        let body = r#"{"errorMessages":["Issue does not exist"],"errors":{"summary":"required"}}"#;

        assert_eq!(
            parse_error_body(body),
            "Issue does not exist\nsummary: required"
        );
        assert_eq!(parse_error_body("<html>502</html>"), "<html>502</html>");
        assert_eq!(parse_error_body("{}"), "{}");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp("2024-01-15T10:30:00.000+0000"),
            "2024-01-15 10:30"
        );
        assert_eq!(
            format_timestamp("2024-01-15T10:30:00+02:00"),
            "2024-01-15 10:30"
        );
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}

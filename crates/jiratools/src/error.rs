use jiratools_core::atlassian::jira::JiraError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0} environment variable not set")]
    MissingConfig(&'static str),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Jira API error [{status}]: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid request: {0}")]
    Payload(#[from] JiraError),
}

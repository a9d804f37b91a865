pub mod comment;
pub mod create;
pub mod get;
pub mod search;
pub mod update;

use colored::Colorize;
use jiratools_core::atlassian::jira::{CommentOutput, TicketOutput};

use crate::prelude::*;

/// Jira commands
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Create a new Jira ticket
    #[clap(name = "create")]
    Create(create::CreateOptions),

    /// Search Jira issues using JQL
    #[clap(name = "search")]
    Search(search::SearchOptions),

    /// Get detailed information about a Jira ticket
    #[clap(name = "get")]
    Get(get::GetOptions),

    /// Update Jira ticket fields
    #[clap(name = "update")]
    Update(update::UpdateOptions),

    /// Add a comment to a Jira ticket
    #[clap(name = "comment")]
    Comment(comment::CommentOptions),
}

/// Run Jira commands
pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    if global.verbose {
        log::info!("Running Jira command...");
    }

    match cmd {
        Commands::Create(options) => create::handler(options, &global).await,
        Commands::Search(options) => search::handler(options, &global).await,
        Commands::Get(options) => get::handler(options, &global).await,
        Commands::Update(options) => update::handler(options, &global).await,
        Commands::Comment(options) => comment::handler(options, &global).await,
    }
}

/// Display a ticket's details as a formatted CLI table.
///
/// Renders the standard ticket view used by the get and create handlers:
/// header line, metadata table, description, environment, labels, components
/// and comments. Rich-text fields arrive already rendered as Markdown.
fn display_ticket(ticket: &TicketOutput) {
    std::println!(
        "\n{} - {}\n",
        ticket.key.bold().cyan(),
        ticket.summary.bright_white()
    );

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Status".bold().cyan(),
        ticket.status.green().to_string()
    ]);

    if let Some(priority) = &ticket.priority {
        table.add_row(prettytable::row![
            "Priority".bold().cyan(),
            priority.bright_yellow().to_string()
        ]);
    }

    if let Some(issue_type) = &ticket.issue_type {
        table.add_row(prettytable::row![
            "Type".bold().cyan(),
            issue_type.bright_blue().to_string()
        ]);
    }

    let assignee = match &ticket.assignee {
        Some(assignee) => assignee.bright_magenta().to_string(),
        None => "Unassigned".bright_black().to_string(),
    };
    table.add_row(prettytable::row!["Assignee".bold().cyan(), assignee]);

    if let Some(reporter) = &ticket.reporter {
        table.add_row(prettytable::row![
            "Reporter".bold().cyan(),
            reporter.bright_magenta().to_string()
        ]);
    }

    for (label, value) in [
        ("Created", &ticket.created),
        ("Updated", &ticket.updated),
        ("Due Date", &ticket.due_date),
    ] {
        if let Some(value) = value {
            table.add_row(prettytable::row![
                label.bold().cyan(),
                value.bright_black().to_string()
            ]);
        }
    }

    table.printstd();

    if let Some(description) = &ticket.description {
        std::println!("\n{}:", "Description".bold().cyan());
        std::println!("{}\n", description);
    }

    if let Some(environment) = &ticket.environment {
        std::println!("{}:", "Environment".bold().cyan());
        std::println!("{}\n", environment);
    }

    if !ticket.labels.is_empty() {
        std::println!(
            "{}: {}",
            "Labels".bold().cyan(),
            ticket.labels.join(", ").bright_green()
        );
    }

    if !ticket.components.is_empty() {
        std::println!(
            "{}: {}",
            "Components".bold().cyan(),
            ticket.components.join(", ").bright_blue()
        );
    }

    if !ticket.comments.is_empty() {
        std::println!("\n{}", "Comments:".bold().cyan());
        for (index, comment) in ticket.comments.iter().enumerate() {
            display_comment(index + 1, comment);
        }
    }

    std::println!();
}

fn display_comment(position: usize, comment: &CommentOutput) {
    let index_str = format!("{position}.").green().to_string();
    let timestamp_str = format!("[{}]", comment.created.as_deref().unwrap_or("?"))
        .blue()
        .to_string();
    let author_str = comment
        .author
        .as_deref()
        .unwrap_or("Unknown")
        .magenta()
        .to_string();

    std::println!("{} {} {}", index_str, timestamp_str, author_str);

    let colored_body = comment
        .body
        .lines()
        .map(|line| {
            line.split(' ')
                .map(|word| {
                    if word.starts_with('@') {
                        word.yellow().to_string()
                    } else {
                        word.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n");
    std::println!("{}\n", colored_body);
}

// Re-export public data functions for external use (e.g., MCP)
pub use comment::add_comment_data;
pub use create::create_ticket_data;
pub use get::get_ticket_data;
pub use search::search_issues_data;
pub use update::update_ticket_data;

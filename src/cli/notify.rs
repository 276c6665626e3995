//! Notification CLI commands

use clap::Subcommand;

use super::parse_date_time;
use crate::display::format_notification_list;
use crate::error::FinanceResult;
use crate::notify::NotificationSink;
use crate::services::NotificationService;
use crate::storage::Storage;

/// Notification subcommands
#[derive(Subcommand)]
pub enum NotifyCommands {
    /// List the notification history
    List,
    /// Record a notification locally without sending it
    Add { content: String },
    /// Deliver a message, then record it
    Send {
        content: String,
        /// Destination chat; defaults to notifications.chat_id
        #[arg(long, allow_negative_numbers = true)]
        to: Option<i64>,
    },
    /// Notifications stamped within [start, end)
    Between { start: String, end: String },
    /// Delete the whole history
    Clear,
}

/// Handle a notification command
pub fn handle_notify_command(
    storage: &Storage,
    sink: Option<&dyn NotificationSink>,
    cmd: NotifyCommands,
) -> FinanceResult<()> {
    let service = match sink {
        Some(sink) => NotificationService::with_sink(storage, sink),
        None => NotificationService::new(storage),
    };

    match cmd {
        NotifyCommands::List => {
            print!("{}", format_notification_list(&service.list()?));
        }

        NotifyCommands::Add { content } => {
            let notification = service.record(&content)?;
            println!("Recorded: {}", notification.content);
        }

        NotifyCommands::Send { content, to } => {
            // Unset destination is 0, which the sink rejects as not found
            let destination = to
                .or(storage.settings().notifications.chat_id)
                .unwrap_or(0);
            let notification = service.send(destination, &content)?;
            println!("Sent: {}", notification.content);
        }

        NotifyCommands::Between { start, end } => {
            let found = service.filter_by_period(parse_date_time(&start)?, parse_date_time(&end)?)?;
            print!("{}", format_notification_list(&found));
        }

        NotifyCommands::Clear => {
            let removed = service.clear()?;
            println!("Removed {} notification(s).", removed);
        }
    }

    Ok(())
}

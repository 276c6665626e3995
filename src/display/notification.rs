//! Notification display formatting

use crate::models::Notification;

/// One notification per line, oldest first
pub fn format_notification_list(notifications: &[Notification]) -> String {
    if notifications.is_empty() {
        return "No notifications.\n".to_string();
    }

    let mut output = String::new();
    for notification in notifications {
        output.push_str(&format!(
            "{}  {}\n",
            notification.timestamp.format("%Y-%m-%d %H:%M:%S"),
            notification.content
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_list() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let n = Notification::at(ts, "Budget exceeded").unwrap();
        assert_eq!(
            format_notification_list(&[n]),
            "2025-01-02 03:04:05  Budget exceeded\n"
        );
        assert_eq!(format_notification_list(&[]), "No notifications.\n");
    }
}

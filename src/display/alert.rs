//! Alert and insight display formatting

use crate::models::{Alert, Priority};
use crate::reports::Insight;

use super::report::truncate;

fn priority_icon(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "!!",
        Priority::Medium => "! ",
        Priority::Low => "  ",
    }
}

/// Format alerts as a table, unread ones marked with `*`
pub fn format_alert_list(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "No alerts.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:2} {:1} {:<9} {:<8} {:<7} {:<16} {}\n",
        "", "", "ID", "Type", "Prio", "Raised", "Message"
    ));
    output.push_str(&"-".repeat(90));
    output.push('\n');

    for alert in alerts {
        output.push_str(&format!(
            "{:2} {:1} {:<9} {:<8} {:<7} {:<16} {}\n",
            priority_icon(alert.priority),
            if alert.read { " " } else { "*" },
            alert.id.to_string(),
            alert.alert_type,
            alert.priority,
            alert.timestamp.format("%Y-%m-%d %H:%M"),
            truncate(&alert.message, 44)
        ));
    }

    let unread = alerts.iter().filter(|a| !a.read).count();
    output.push_str(&"-".repeat(90));
    output.push('\n');
    output.push_str(&format!("{} alerts, {} unread (* = unread)\n", alerts.len(), unread));

    output
}

/// Format insights as titled paragraphs
pub fn format_insights(insights: &[Insight]) -> String {
    if insights.is_empty() {
        return "No insights available.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Insights\n");
    output.push_str(&"=".repeat(70));
    output.push('\n');

    for insight in insights {
        output.push('\n');
        output.push_str(&format!(
            "{} {} [{} priority{}]\n",
            priority_icon(insight.priority),
            insight.title,
            insight.priority,
            if insight.actionable { ", actionable" } else { "" }
        ));
        output.push_str(&format!("   {}\n", insight.description));
    }

    output
}

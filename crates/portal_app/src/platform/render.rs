//! Plain-text rendering of a list screen for the terminal.
use std::sync::Arc;

use portal_core::{
    pledge_totals, ActionItem, Category, Editable, ListItem, ListStatus, ListViewModel, NamedRef,
    Notification, NotificationLevel, ParseKeyError, Pledge, ScopeHeader, SortKey,
};

/// An entity the command line can filter, sort and print.
pub trait TerminalItem: Editable {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;

    fn parse_search_by(text: &str) -> Result<Self::SearchField, ParseKeyError>;
    fn parse_status(text: &str) -> Result<Self::Status, ParseKeyError>;
    fn parse_sort(text: &str) -> Result<SortKey<Self::SortField>, ParseKeyError>;

    /// Line printed under the table, computed over the whole collection and
    /// the scope's details when it has any.
    fn summary(_items: &[Self], _header: Option<&ScopeHeader>) -> Option<String> {
        None
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const MISSING: &str = "-";

impl TerminalItem for Category {
    const HEADERS: &'static [&'static str] = &["Name", "Description", "Status", "Created"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone().unwrap_or_else(|| MISSING.to_owned()),
            self.status().to_string(),
            self.created_at.format(DATE_FORMAT).to_string(),
        ]
    }

    fn parse_search_by(text: &str) -> Result<Self::SearchField, ParseKeyError> {
        text.parse()
    }

    fn parse_status(text: &str) -> Result<Self::Status, ParseKeyError> {
        text.parse()
    }

    fn parse_sort(text: &str) -> Result<SortKey<Self::SortField>, ParseKeyError> {
        text.parse()
    }
}

impl TerminalItem for ActionItem {
    const HEADERS: &'static [&'static str] = &["Assignee", "Category", "Assigned", "Status"];

    fn cells(&self) -> Vec<String> {
        let name_of = |reference: &Option<NamedRef>| {
            reference
                .as_ref()
                .and_then(|r| r.name.clone())
                .unwrap_or_else(|| MISSING.to_owned())
        };
        vec![
            name_of(&self.assignee),
            name_of(&self.category),
            self.assigned_at
                .map(|at| at.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| MISSING.to_owned()),
            self.status().to_string(),
        ]
    }

    fn parse_search_by(text: &str) -> Result<Self::SearchField, ParseKeyError> {
        text.parse()
    }

    fn parse_status(text: &str) -> Result<Self::Status, ParseKeyError> {
        text.parse()
    }

    fn parse_sort(text: &str) -> Result<SortKey<Self::SortField>, ParseKeyError> {
        text.parse()
    }
}

impl TerminalItem for Pledge {
    const HEADERS: &'static [&'static str] = &["Pledgers", "Amount", "End date"];

    fn cells(&self) -> Vec<String> {
        let pledgers: Vec<&str> = self
            .users
            .iter()
            .filter_map(|user| user.name.as_deref())
            .collect();
        vec![
            if pledgers.is_empty() {
                MISSING.to_owned()
            } else {
                pledgers.join(", ")
            },
            format!("{:.2} {}", self.amount, self.currency),
            self.end_date.format(DATE_FORMAT).to_string(),
        ]
    }

    fn parse_search_by(text: &str) -> Result<Self::SearchField, ParseKeyError> {
        text.parse()
    }

    fn parse_status(text: &str) -> Result<Self::Status, ParseKeyError> {
        Err(ParseKeyError {
            input: text.to_owned(),
        })
    }

    fn parse_sort(text: &str) -> Result<SortKey<Self::SortField>, ParseKeyError> {
        text.parse()
    }

    fn summary(items: &[Self], header: Option<&ScopeHeader>) -> Option<String> {
        let totals = pledge_totals(items);
        let currency = totals
            .currency
            .or_else(|| header.and_then(|header| header.currency.clone()));
        let money = |amount: f64| match &currency {
            Some(currency) => format!("{amount:.2} {currency}"),
            None => format!("{amount:.2}"),
        };
        let mut line = format!(
            "Pledges: {} | Total pledged: {}",
            totals.count,
            money(totals.pledged)
        );
        if let Some(goal) = header.and_then(|header| header.goal) {
            line.push_str(&format!(" | Goal: {}", money(goal)));
        }
        Some(line)
    }
}

/// Lines for the current view. `items` is the unfiltered collection used for
/// the summary line.
pub fn render_list<T: TerminalItem>(
    view: &ListViewModel<T>,
    items: Option<&Arc<[T]>>,
    header: Option<&ScopeHeader>,
) -> Vec<String> {
    let mut lines = Vec::new();
    match &view.status {
        ListStatus::Idle => lines.push("No organization selected".to_owned()),
        ListStatus::Loading => lines.push("Loading...".to_owned()),
        ListStatus::Failed { message } => lines.push(format!("Error: {message}")),
        ListStatus::Ready if view.rows.is_empty() => {
            if view.total_count == 0 {
                lines.push("No records".to_owned());
            } else {
                lines.push(format!(
                    "No records match the current search ({} total)",
                    view.total_count
                ));
            }
        }
        ListStatus::Ready => {
            lines.push(format_line("#", T::HEADERS.iter().map(|h| (*h).to_owned())));
            for row in view.rows.iter() {
                lines.push(format_line(&row.serial_number.to_string(), row.item.cells()));
            }
        }
    }
    if matches!(view.status, ListStatus::Ready) {
        if let Some(summary) = items.and_then(|items| T::summary(items, header)) {
            lines.push(summary);
        }
    }
    lines
}

fn format_line(serial: &str, cells: impl IntoIterator<Item = String>) -> String {
    let cells: Vec<String> = cells.into_iter().collect();
    format!("{:>3}  {}", serial, cells.join(" | "))
}

pub fn notification_line(notification: &Notification) -> String {
    let label = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Warning => "warning",
        NotificationLevel::Error => "error",
    };
    format!("[{label}] {}", notification.text)
}

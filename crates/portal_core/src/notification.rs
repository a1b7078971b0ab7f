use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// A translation key, or upstream text shown as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationText {
    Key(&'static str),
    Literal(String),
}

impl fmt::Display for NotificationText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationText::Key(key) => f.write_str(key),
            NotificationText::Literal(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: NotificationText,
}

impl Notification {
    pub fn success(key: &'static str) -> Self {
        Self {
            level: NotificationLevel::Success,
            text: NotificationText::Key(key),
        }
    }

    pub fn warning(key: &'static str) -> Self {
        Self {
            level: NotificationLevel::Warning,
            text: NotificationText::Key(key),
        }
    }

    /// Error carrying the upstream message verbatim.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            text: NotificationText::Literal(message.into()),
        }
    }
}

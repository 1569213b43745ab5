//! User-facing notices.
//!
//! Operations that the browser application surfaced as toasts return a
//! [`Notice`] instead. Callers decide how to show it; [`Notice::log`] writes
//! it to the tracing output as well.

use serde::{Deserialize, Serialize};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A short message for the user, optionally with a longer description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notice {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: None,
        }
    }

    /// Attach a description line.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Single-line rendering: `"title: description"` or just the title.
    pub fn text(&self) -> String {
        match &self.description {
            Some(d) => format!("{}: {}", self.title, d),
            None => self.title.clone(),
        }
    }

    /// Emit the notice through `tracing` at a level matching its severity.
    pub fn log(&self) {
        match self.level {
            NoticeLevel::Info | NoticeLevel::Success => {
                tracing::info!(notice = %self.text(), "user notice")
            }
            NoticeLevel::Error => tracing::warn!(notice = %self.text(), "user notice"),
        }
    }
}

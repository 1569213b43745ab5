use std::path::PathBuf;
use thiserror::Error;

/// Rejected budget input, produced when an edit runs under
/// [`EditPolicy::Strict`](crate::budget::EditPolicy::Strict).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The allocation index does not address a channel in the budget.
    #[error("Allocation index {index} out of range for {len} channels")]
    IndexOutOfRange { index: usize, len: usize },

    /// A channel share outside the slider bounds.
    #[error("Channel share {value}% outside {min}-{max}%")]
    PercentageOutOfRange { value: f64, min: f64, max: f64 },

    /// A channel amount below zero.
    #[error("Channel amount must not be negative: {0}")]
    NegativeAmount(f64),

    /// A total budget under the policy floor.
    #[error("Total budget {value} is below the minimum of {min}")]
    TotalBelowMinimum { value: f64, min: f64 },

    /// An edit that would leave nothing to distribute.
    #[error("Total budget must stay above zero (would become {0})")]
    NonPositiveTotal(f64),

    /// Not a finite number.
    #[error("Value is not a finite number")]
    NotFinite,
}

/// A single failed form field, e.g. `client_name` → `Client name is required`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All errors produced by the media planner crates.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A string did not name any known variant of an enumerated field.
    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    /// Budget input rejected under the strict policy.
    #[error("Invalid budget edit: {0}")]
    Validation(#[from] ValidationError),

    /// A wizard step is missing required fields.
    #[error("Step '{step}' is incomplete: {}", format_field_errors(.errors))]
    StepIncomplete {
        step: &'static str,
        errors: Vec<FieldError>,
    },

    /// A channel name was empty after trimming.
    #[error("Channel name cannot be empty")]
    EmptyChannelName,

    /// A channel with this name already exists in the catalog.
    #[error("This channel already exists: {0}")]
    DuplicateChannel(String),

    /// A catalog position that holds no channel.
    #[error("No channel at position {0}")]
    ChannelIndex(usize),

    /// No plan with the given id exists in the store.
    #[error("Media plan not found: {0}")]
    PlanNotFound(String),

    /// The plan has no budget to edit.
    #[error("Media plan {0} has no budget")]
    MissingBudget(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias used throughout the planner crates.
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = PlannerError::FileRead {
            path: PathBuf::from("/some/plans.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/plans.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_unknown_value() {
        let err = PlannerError::UnknownValue {
            kind: "industry",
            value: "mining".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown industry: mining");
    }

    #[test]
    fn test_error_display_validation() {
        let err: PlannerError = ValidationError::TotalBelowMinimum {
            value: 500.0,
            min: 1000.0,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid budget edit: Total budget 500 is below the minimum of 1000"
        );
    }

    #[test]
    fn test_error_display_index_out_of_range() {
        let err = ValidationError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Allocation index 4 out of range for 2 channels");
    }

    #[test]
    fn test_error_display_step_incomplete_joins_messages() {
        let err = PlannerError::StepIncomplete {
            step: "basic info",
            errors: vec![
                FieldError::new("client_name", "Client name is required"),
                FieldError::new("industry", "Industry is required"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Step 'basic info' is incomplete: Client name is required; Industry is required"
        );
    }

    #[test]
    fn test_error_display_duplicate_channel() {
        let err = PlannerError::DuplicateChannel("radio".to_string());
        assert_eq!(err.to_string(), "This channel already exists: radio");
    }

    #[test]
    fn test_error_display_plan_not_found() {
        let err = PlannerError::PlanNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Media plan not found: abc");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PlannerError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: PlannerError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }

    #[test]
    fn test_field_error_display() {
        let fe = FieldError::new("channels", "At least one channel is required");
        assert_eq!(fe.to_string(), "channels: At least one channel is required");
    }
}

//! # CLI Error Type
//!
//! Failures the front end reports before handing off to the core or the
//! exporter. Export errors pass through unchanged.

use std::path::PathBuf;

use thiserror::Error;
use vistara_core::FieldErrors;
use vistara_export::ExportError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration is unreadable or out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A form or logo file could not be read.
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The form file is not valid JSON for a bill form.
    #[error("Malformed form file: {0}")]
    MalformedForm(#[from] serde_json::Error),

    /// The logo could not be decoded.
    #[error("Cannot decode logo {path}: {reason}")]
    Logo { path: PathBuf, reason: String },

    /// Submission was blocked by field errors.
    #[error("Bill form has {} invalid field(s)", .0.len())]
    Rejected(FieldErrors),

    /// The screen state had no preview to show after opening it.
    #[error("No bill preview is open")]
    PreviewClosed,

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::InvalidConfig(err.to_string())
    }
}

impl From<FieldErrors> for CliError {
    fn from(errors: FieldErrors) -> Self {
        CliError::Rejected(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vistara_core::ValidationError;

    #[test]
    fn test_rejected_counts_fields() {
        let mut errors = FieldErrors::new();
        for field in ["name", "phone"] {
            errors.push(ValidationError::Required {
                field: field.to_string(),
            });
        }

        assert_eq!(
            CliError::from(errors).to_string(),
            "Bill form has 2 invalid field(s)"
        );
    }

    #[test]
    fn test_preview_closed_is_not_a_config_error() {
        let err = CliError::PreviewClosed;
        assert!(!matches!(err, CliError::InvalidConfig(_)));
        assert_eq!(err.to_string(), "No bill preview is open");
    }

    #[test]
    fn test_export_errors_pass_through() {
        let err = CliError::from(ExportError::ExportInFlight);
        assert_eq!(err.to_string(), "An export is already in progress");
    }
}

//! Typed error variants for the jotpad-settings crate.
//!
//! Reading a setting never fails: absent or malformed entries fall back to
//! their defaults. Errors only surface from opening a settings file and from
//! writing through a [`SettingsStore`](crate::SettingsStore).

use thiserror::Error;

/// Errors that can occur when opening or writing the persistent store.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred reading or writing the settings file.
    #[error("I/O error accessing settings: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file contained invalid JSON or was not a JSON object.
    #[error("JSON parse error in settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A store refused to persist a value.
    ///
    /// Used by stores that have no underlying I/O error to report.
    #[error("failed to persist setting '{key}': {reason}")]
    Persist {
        /// Key of the setting that could not be written.
        key: String,
        /// Human-readable failure description.
        reason: String,
    },

    /// A value that would not load back as itself was refused before writing.
    #[error("invalid value for setting '{key}': {reason}")]
    InvalidValue {
        /// Key of the rejected setting.
        key: String,
        /// Why the persisted form does not decode.
        reason: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_error_message_names_key() {
        let err = SettingsError::Persist {
            key: "editor_font_size".to_string(),
            reason: "read-only store".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to persist setting 'editor_font_size': read-only store"
        );
    }

    #[test]
    fn test_invalid_value_message_names_key() {
        let err = SettingsError::InvalidValue {
            key: "editor_default_tab_indents".to_string(),
            reason: "invalid tab indent width 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for setting 'editor_default_tab_indents': invalid tab indent width 0"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SettingsError = io.into();
        assert!(matches!(err, SettingsError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }
}

//! Error types for kvgrid.

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur while editing or configuring a grid.
///
/// The grid's primary API reports plain success flags; these errors explain
/// *why* an operation was rejected and are returned by the `try_*` variants.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The group name was empty after trimming whitespace.
    #[error("Group name must not be empty")]
    EmptyGroupName,

    /// No group with the given name exists.
    #[error("Group '{group}' not found")]
    GroupNotFound { group: String },

    /// The group exists but has no element with the given key.
    #[error("Key '{key}' not found in group '{group}'")]
    KeyNotFound { group: String, key: String },

    /// A layout metric has a value the layout engine cannot work with.
    #[error("Invalid value for metric '{field}': {message}")]
    InvalidMetrics {
        field: &'static str,
        message: String,
    },

    /// The metrics configuration could not be parsed.
    #[error("Failed to parse grid metrics: {0}")]
    Config(#[from] toml::de::Error),
}

impl GridError {
    /// Create a group-not-found error.
    pub fn group_not_found(group: impl Into<String>) -> Self {
        Self::GroupNotFound {
            group: group.into(),
        }
    }

    /// Create a key-not-found error.
    pub fn key_not_found(group: impl Into<String>, key: impl Into<String>) -> Self {
        Self::KeyNotFound {
            group: group.into(),
            key: key.into(),
        }
    }

    /// Create an invalid-metrics error.
    pub fn invalid_metrics(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidMetrics {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GridError::EmptyGroupName.to_string(),
            "Group name must not be empty"
        );
        assert_eq!(
            GridError::key_not_found("Network", "Proxy").to_string(),
            "Key 'Proxy' not found in group 'Network'"
        );
        assert_eq!(
            GridError::invalid_metrics("char_width", "must be positive").to_string(),
            "Invalid value for metric 'char_width': must be positive"
        );
    }

    #[test]
    fn test_config_error_source() {
        let err: GridError = toml::from_str::<toml::Table>("= nope")
            .unwrap_err()
            .into();
        assert!(matches!(err, GridError::Config(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}

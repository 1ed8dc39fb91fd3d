use thiserror::Error;

/// Errors surfaced by countdown activation and registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountdownError {
    /// The target instant was missing or could not be parsed.
    ///
    /// The controller stays out of the running state.
    #[error("{tag} requires a valid \"until\" attribute.")]
    Configuration {
        /// Tag name of the countdown that failed to activate.
        tag: String,
        /// The raw value that was rejected, if one was supplied.
        raw: Option<String>,
    },

    /// A widget tag was registered twice.
    #[error("a countdown is already defined under the tag `{tag}`")]
    AlreadyDefined {
        /// The tag that is already taken.
        tag: String,
    },
}

impl CountdownError {
    pub(crate) fn configuration(tag: &str, raw: Option<&str>) -> Self {
        CountdownError::Configuration {
            tag: tag.to_string(),
            raw: raw.map(str::to_string),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T, E = CountdownError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message_names_the_tag() {
        let err = CountdownError::configuration("countdown-timer", None);
        assert_eq!(
            err.to_string(),
            "countdown-timer requires a valid \"until\" attribute."
        );
    }

    #[test]
    fn test_configuration_keeps_rejected_value() {
        let err = CountdownError::configuration("launch-timer", Some("tomorrow-ish"));
        assert_eq!(
            err,
            CountdownError::Configuration {
                tag: "launch-timer".to_string(),
                raw: Some("tomorrow-ish".to_string()),
            }
        );
    }
}

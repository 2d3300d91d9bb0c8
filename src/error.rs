/// Result alias carrying [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by the frequency math and the panning engine.
///
/// Every variant is a caller-side contract violation. Nothing in the engine
/// performs I/O, so there is no transient failure to retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// A numeric input fell outside its documented domain.
    #[error("invalid {name} ({value}): {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// An operation was attempted in a state that forbids it.
    #[error("illegal state: {0}")]
    IllegalState(String),
    /// A preset identifier did not match any known healing frequency.
    #[error("unknown healing frequency preset: {0}")]
    UnknownPreset(String),
}

impl EngineError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            value,
            reason,
        }
    }

    pub(crate) fn illegal_state<T: Into<String>>(msg: T) -> Self {
        Self::IllegalState(msg.into())
    }
}

/// Fails unless `value` is finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::invalid(name, value, "must be finite and > 0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_positive_rejects_zero_negative_and_nan() {
        assert!(ensure_positive("hz", 0.0).is_err());
        assert!(ensure_positive("hz", -1.0).is_err());
        assert!(ensure_positive("hz", f64::NAN).is_err());
        assert!(ensure_positive("hz", f64::INFINITY).is_err());
        assert_eq!(ensure_positive("hz", 440.0), Ok(440.0));
    }

    #[test]
    fn invalid_argument_message_names_the_field() {
        let err = EngineError::invalid("depth", 1.5, "must be within [0, 1]");
        assert_eq!(err.to_string(), "invalid depth (1.5): must be within [0, 1]");
    }
}

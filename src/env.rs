//! Environment variables that seed [`ClientBuilder::from_env`](crate::ClientBuilder::from_env).

use crate::{Error, Result};
use std::time::Duration;

/// Base URL for the gateway REST API. Required by `from_env`.
pub(crate) const BASE_URL: &str = "GATEBIND_BASE_URL";

/// Path to the CA bundle used to verify the gateway's certificate, or a
/// false-y token (`n`, `no`, `f`, `false`, `off`, `0`) to disable
/// verification. Unset means disabled.
pub(crate) const CACERT: &str = "GATEBIND_CACERT";

/// Per-attempt timeout in seconds (fractions allowed).
pub(crate) const TIMEOUT: &str = "GATEBIND_TIMEOUT";

/// Number of additional attempts after the first on read timeouts.
pub(crate) const MAX_RETRIES: &str = "GATEBIND_MAX_RETRIES";

/// Reads an environment variable, treating unset and blank as absent.
pub(crate) fn lookup(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Returns `true` for the tokens conventionally meaning "off".
pub(crate) fn is_falsey(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "n" | "no" | "f" | "false" | "off" | "0"
    )
}

/// Parses a timeout expressed in seconds.
pub(crate) fn timeout_from(value: &str) -> Result<Duration> {
    let seconds: f64 = value.trim().parse().map_err(|_| {
        Error::Configuration(format!("{TIMEOUT} must be a number of seconds, got {value:?}"))
    })?;
    Duration::try_from_secs_f64(seconds).map_err(|_| {
        Error::Configuration(format!("{TIMEOUT} must be a non-negative finite number, got {value:?}"))
    })
}

/// Parses a retry budget.
pub(crate) fn retries_from(value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        Error::Configuration(format!(
            "{MAX_RETRIES} must be a non-negative integer, got {value:?}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsey_tokens() {
        for token in ["n", "no", "f", "false", "off", "0", "FALSE", " Off "] {
            assert!(is_falsey(token), "{token:?} should be false-y");
        }
        for token in ["y", "yes", "true", "1", "/etc/ssl/certs/gateway.pem"] {
            assert!(!is_falsey(token), "{token:?} should not be false-y");
        }
    }

    #[test]
    fn timeout_parses_seconds_and_fractions() {
        assert_eq!(timeout_from("10").unwrap(), Duration::from_secs(10));
        assert_eq!(timeout_from("0.5").unwrap(), Duration::from_millis(500));
    }

    #[test]
    fn timeout_rejects_garbage_and_negatives() {
        assert!(matches!(timeout_from("ten"), Err(Error::Configuration(_))));
        assert!(matches!(timeout_from("-1"), Err(Error::Configuration(_))));
        assert!(matches!(timeout_from("NaN"), Err(Error::Configuration(_))));
    }

    #[test]
    fn retries_parse_and_reject() {
        assert_eq!(retries_from("3").unwrap(), 3);
        assert_eq!(retries_from(" 0 ").unwrap(), 0);
        assert!(matches!(retries_from("-1"), Err(Error::Configuration(_))));
        assert!(matches!(
            retries_from("many"),
            Err(Error::Configuration(_))
        ));
    }
}

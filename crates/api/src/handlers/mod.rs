//! HTTP handlers for the two analytics endpoints.

pub mod analytics;
pub mod heatmap;

use fleetlens_core::error::CoreError;

/// Parse an optional numeric query parameter that arrives as a string.
///
/// Non-numeric input is rejected before any query executes; absent input
/// yields the provided default.
pub(crate) fn parse_numeric_param(
    raw: Option<&str>,
    name: &str,
    default: i64,
) -> Result<i64, CoreError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| CoreError::InvalidParameter(format!("{name} must be numeric: {value}"))),
    }
}

/// Normalize an optional plate filter: empty strings mean "no filter".
pub(crate) fn normalize_plate(raw: Option<String>) -> Option<String> {
    raw.filter(|plate| !plate.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use fleetlens_core::error::CoreError;

    use super::*;

    #[test]
    fn absent_numeric_param_takes_default() {
        assert_eq!(parse_numeric_param(None, "page", 1).unwrap(), 1);
        assert_eq!(parse_numeric_param(Some("3"), "page", 1).unwrap(), 3);
    }

    #[test]
    fn non_numeric_param_is_rejected() {
        assert_matches!(
            parse_numeric_param(Some("abc"), "page", 1),
            Err(CoreError::InvalidParameter(_))
        );
    }

    #[test]
    fn empty_plate_means_no_filter() {
        assert_eq!(normalize_plate(Some(String::new())), None);
        assert_eq!(normalize_plate(Some("  ".into())), None);
        assert_eq!(normalize_plate(Some("A-123".into())), Some("A-123".into()));
        assert_eq!(normalize_plate(None), None);
    }
}

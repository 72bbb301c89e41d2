//! JSON argument extraction shared by the tools.

use crate::error::{CarbonError, Result};

/// A required string argument.
pub(crate) fn required_str<'a>(args: &'a serde_json::Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| CarbonError::InvalidInput(format!("missing required argument: {key}")))
}

/// An optional string argument; `null` counts as absent.
pub(crate) fn optional_str<'a>(args: &'a serde_json::Value, key: &str) -> Result<Option<&'a str>> {
    match args.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => v
            .as_str()
            .map(Some)
            .ok_or_else(|| CarbonError::InvalidInput(format!("argument {key} must be a string"))),
    }
}

/// A required integer argument.
pub(crate) fn required_i64(args: &serde_json::Value, key: &str) -> Result<i64> {
    optional_i64(args, key)?
        .ok_or_else(|| CarbonError::InvalidInput(format!("missing required argument: {key}")))
}

/// An optional integer argument; `null` counts as absent.
pub(crate) fn optional_i64(args: &serde_json::Value, key: &str) -> Result<Option<i64>> {
    match args.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => v
            .as_i64()
            .map(Some)
            .ok_or_else(|| CarbonError::InvalidInput(format!("argument {key} must be an integer"))),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_present_values() {
        let args = json!({"region": "SG", "window_minutes": 30});
        assert_eq!(required_str(&args, "region").unwrap(), "SG");
        assert_eq!(required_i64(&args, "window_minutes").unwrap(), 30);
    }

    #[test]
    fn null_is_absent() {
        let args = json!({"regions_allowed": null, "allowed_shift_minutes": null});
        assert_eq!(optional_str(&args, "regions_allowed").unwrap(), None);
        assert_eq!(optional_i64(&args, "allowed_shift_minutes").unwrap(), None);
    }

    #[test]
    fn wrong_types_are_input_errors() {
        let args = json!({"region": 5, "window_minutes": "thirty"});
        assert!(required_str(&args, "region").unwrap_err().is_input_error());
        assert!(required_i64(&args, "window_minutes").unwrap_err().is_input_error());
        assert!(optional_str(&args, "region").is_err());
    }

    #[test]
    fn missing_required_names_the_key() {
        let err = required_str(&json!({}), "start_iso").unwrap_err();
        assert!(err.to_string().contains("start_iso"));
    }
}

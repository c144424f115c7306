//! Helpers for turning raw HTML form strings into typed values.
//!
//! Browsers submit every field as text, and empty inputs arrive as `""`
//! rather than being omitted. These helpers normalise that before the
//! per-entity validation runs.

/// Trim a value; empty becomes `None`.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Parse an optional id from a `<select>`. Empty and `none` mean "no selection".
pub fn optional_id(value: Option<&str>, field: &str) -> Result<Option<i64>, String> {
    match value.map(str::trim) {
        None | Some("") | Some("none") => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("{field} must be a valid selection")),
    }
}

/// Parse a comma-separated id list such as `"3, 7,12"`. Duplicates are dropped.
pub fn id_list(value: Option<&str>, field: &str) -> Result<Vec<i64>, String> {
    let mut ids = Vec::new();
    for part in value.unwrap_or("").split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id = part
            .parse::<i64>()
            .map_err(|_| format!("{field} must be a comma-separated list of ids"))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Render an id list back into the form's comma-separated representation.
pub fn join_ids(ids: &[i64]) -> String {
    ids.iter().map(i64::to_string).collect::<Vec<_>>().join(", ")
}

/// Parse an optional positive integer (minutes, bytes).
pub fn optional_positive(value: Option<&str>, field: &str) -> Result<Option<i64>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(format!("{field} must be a positive number")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_list_parses_and_dedups() {
        assert_eq!(id_list(Some(" 3, 7,3 ,12"), "People").unwrap(), vec![3, 7, 12]);
        assert_eq!(id_list(Some(""), "People").unwrap(), Vec::<i64>::new());
        assert!(id_list(Some("3, x"), "People").is_err());
    }

    #[test]
    fn optional_id_treats_none_as_empty() {
        assert_eq!(optional_id(Some("none"), "Vendor").unwrap(), None);
        assert_eq!(optional_id(Some(" 4 "), "Vendor").unwrap(), Some(4));
        assert!(optional_id(Some("abc"), "Vendor").is_err());
    }

    #[test]
    fn optional_positive_rejects_zero() {
        assert_eq!(optional_positive(Some("15"), "Duration").unwrap(), Some(15));
        assert!(optional_positive(Some("0"), "Duration").is_err());
        assert_eq!(optional_positive(None, "Duration").unwrap(), None);
    }
}

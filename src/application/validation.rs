//! Input validation shared by the catalog use cases

use crate::application::errors::CatalogUseCaseError;
use crate::domain::errors::DomainError;

/// Parse a textual limit.
///
/// Missing or blank text means "no limit". Values above `max` are capped.
/// Negative values are passed through so the query builder rejects them.
pub fn parse_limit(raw: Option<&str>, max: i64) -> Result<Option<i64>, CatalogUseCaseError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    let limit = raw
        .parse::<i64>()
        .map_err(|e| CatalogUseCaseError::InvalidRequest(format!("Invalid limit {:?}: {}", raw, e)))?;

    Ok(Some(limit.min(max)))
}

/// Trim free-text filters and sort text, dropping values that end up empty
pub fn normalize_filter(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Ids are positive database serials
pub fn validate_id(id: i64) -> Result<i64, CatalogUseCaseError> {
    if id < 1 {
        return Err(DomainError::InvalidId(id).into());
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit_absent() {
        assert_eq!(parse_limit(None, 100).unwrap(), None);
        assert_eq!(parse_limit(Some(""), 100).unwrap(), None);
        assert_eq!(parse_limit(Some("  "), 100).unwrap(), None);
    }

    #[test]
    fn test_parse_limit_numeric() {
        assert_eq!(parse_limit(Some("5"), 100).unwrap(), Some(5));
        assert_eq!(parse_limit(Some(" 7 "), 100).unwrap(), Some(7));
    }

    #[test]
    fn test_parse_limit_capped() {
        assert_eq!(parse_limit(Some("5000"), 100).unwrap(), Some(100));
    }

    #[test]
    fn test_parse_limit_negative_passes_through() {
        assert_eq!(parse_limit(Some("-1"), 100).unwrap(), Some(-1));
    }

    #[test]
    fn test_parse_limit_not_a_number() {
        let err = parse_limit(Some("ten"), 100).unwrap_err();
        assert!(matches!(err, CatalogUseCaseError::InvalidRequest(_)));
        assert!(err.to_string().contains("ten"));
    }

    #[test]
    fn test_normalize_filter() {
        assert_eq!(normalize_filter(Some(" shoe ".to_string())), Some("shoe".to_string()));
        assert_eq!(normalize_filter(Some("   ".to_string())), None);
        assert_eq!(normalize_filter(None), None);
    }

    #[test]
    fn test_validate_id() {
        assert_eq!(validate_id(3).unwrap(), 3);
        assert!(matches!(
            validate_id(0),
            Err(CatalogUseCaseError::Domain(DomainError::InvalidId(0)))
        ));
    }
}

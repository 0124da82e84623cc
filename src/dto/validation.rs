//! Validation helpers for DTOs.

use std::collections::HashSet;

use uuid::Uuid;
use validator::ValidationError;

/// Validates that a text field is not made only of whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a list of identifiers has no repeated entries.
pub fn validate_unique_ids(ids: &[Uuid]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(ids.len());
    if let Some(duplicate) = ids.iter().find(|id| !seen.insert(**id)) {
        let mut err = ValidationError::new("duplicate_id");
        err.message = Some(format!("Identifier {duplicate} is listed more than once").into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Campo Municipal").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_validate_unique_ids() {
        let id = Uuid::new_v4();
        assert!(validate_unique_ids(&[]).is_ok());
        assert!(validate_unique_ids(&[id, Uuid::new_v4()]).is_ok());
        assert!(validate_unique_ids(&[id, Uuid::new_v4(), id]).is_err());
    }
}

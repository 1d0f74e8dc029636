//! Checks shared by the config sections

pub use crate::error::ValidationError;

/// A `[section]` of `config.toml`
pub trait ConfigSection: Default {
    /// Every problem found in the section, or `Ok` when there is none
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Table name in the TOML file
    fn section_name(&self) -> &'static str;
}

/// Field checks; each returns the error for `field` when the value is bad
pub struct Validator;

impl Validator {
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if (min..=max).contains(&value) {
            return Ok(());
        }
        Err(ValidationError::with_value(
            field,
            format!("must be between {} and {}", min, max),
            value,
        ))
    }

    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        match value.trim() {
            "" => Err(ValidationError::new(field, "must not be empty")),
            _ => Ok(()),
        }
    }

    /// Notion ids are 32 hex digits once the dashes are gone
    pub fn hex_id(value: &str, len: usize, field: &str) -> Result<(), ValidationError> {
        let well_formed = value.len() == len && value.bytes().all(|b| b.is_ascii_hexdigit());
        if well_formed {
            return Ok(());
        }
        Err(ValidationError::with_value(
            field,
            format!("must be {} hexadecimal characters", len),
            value,
        ))
    }

    /// Two lowercase letters (ISO 639-1), or empty for "any language"
    pub fn language_code(value: &str, field: &str) -> Result<(), ValidationError> {
        let ok = value.is_empty()
            || (value.len() == 2 && value.bytes().all(|b| b.is_ascii_lowercase()));
        if ok {
            return Ok(());
        }
        Err(ValidationError::with_value(
            field,
            "must be a two-letter lowercase language code",
            value,
        ))
    }

    /// Keeps only the failures; `Ok` when every check passed
    pub fn all(
        checks: impl IntoIterator<Item = Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = checks.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_bounds_are_inclusive() {
        assert!(Validator::in_range(1, 1, 100, "notion.page_size").is_ok());
        assert!(Validator::in_range(100, 1, 100, "notion.page_size").is_ok());

        let err = Validator::in_range(101, 1, 100, "notion.page_size").unwrap_err();
        assert_eq!(err.field, "notion.page_size");
        assert_eq!(err.value.as_deref(), Some("101"));
    }

    #[test]
    fn test_not_empty_ignores_padding() {
        assert!(Validator::not_empty("  secret_abc ", "notion.token").is_ok());
        assert!(Validator::not_empty(" \t", "notion.token").is_err());
    }

    #[test]
    fn test_hex_id() {
        assert!(Validator::hex_id("0123456789abcdef0123456789ABCDEF", 32, "id").is_ok());
        assert!(Validator::hex_id("0123", 32, "id").is_err());
        assert!(Validator::hex_id("zz23456789abcdef0123456789abcdef", 32, "id").is_err());
    }

    #[test]
    fn test_language_code() {
        assert!(Validator::language_code("pl", "lang").is_ok());
        assert!(Validator::language_code("", "lang").is_ok());
        assert!(Validator::language_code("PL", "lang").is_err());
        assert!(Validator::language_code("pol", "lang").is_err());
    }

    #[test]
    fn test_all_keeps_failures_in_order() {
        let errors = Validator::all([
            Ok(()),
            Err(ValidationError::new("notion.page_size", "too big")),
            Validator::language_code("english", "catalog.books_language"),
        ])
        .unwrap_err();

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["notion.page_size", "catalog.books_language"]);
    }
}

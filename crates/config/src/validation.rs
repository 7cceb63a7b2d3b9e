//! Field-level validation shared by the config sections

use std::fmt;

/// One rejected config field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path such as `catalog.timeout_secs`
    pub field: String,
    pub message: String,
    /// Offending value as the user wrote it
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Same as [`ValidationError::new`], recording the value that was refused
    pub fn rejected(
        field: impl Into<String>,
        value: impl fmt::Display,
        message: impl Into<String>,
    ) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::new(field, message)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        match &self.value {
            Some(value) => write!(f, " (got {})", value),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A `[section]` of `config.toml`
pub trait ConfigSection: Default {
    /// Reports every bad field, not just the first
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Takes every value from `other`
    fn merge(&mut self, other: Self);
}

/// Checks used by the section `validate` impls
pub struct Validator;

impl Validator {
    pub fn range<T>(field: &str, value: T, min: T, max: T) -> Result<(), ValidationError>
    where
        T: PartialOrd + fmt::Display + Copy,
    {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::rejected(
                field,
                value,
                format!("must be between {} and {}", min, max),
            ))
        }
    }

    pub fn non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new(field, "must not be empty"));
        }
        Ok(())
    }

    /// `http://` or `https://` followed by a host
    pub fn http_url(field: &str, value: &str) -> Result<(), ValidationError> {
        Self::non_empty(field, value)?;

        let host_and_path = ["https://", "http://"]
            .iter()
            .find_map(|scheme| value.strip_prefix(scheme));

        match host_and_path {
            Some(rest) if !rest.is_empty() && !rest.starts_with('/') => Ok(()),
            _ => Err(ValidationError::rejected(
                field,
                value,
                "must be an http:// or https:// URL",
            )),
        }
    }

    /// Keeps only the failures; `Ok` when there are none
    pub fn gather<I>(checks: I) -> Result<(), Vec<ValidationError>>
    where
        I: IntoIterator<Item = Result<(), ValidationError>>,
    {
        let errors: Vec<_> = checks.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

use thiserror::Error;

/// Errors from the fallible parts of the crate (lookups, builders, numbering).
///
/// The calculation functions themselves never fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BillingError {
    /// No tax profile with the requested id.
    #[error("tax profile not found: {0}")]
    ProfileNotFound(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Document number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// One or more advisory validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),
}

/// A single validation finding with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the offending field (e.g. "lines[2].discount").
    pub field: String,
    /// Human-readable description.
    pub message: String,
    /// Short rule identifier (e.g. "LINE-NEG-BASE").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

/// Join findings into a single `BillingError::Validation`, or `Ok(())` if none.
pub fn into_result(errors: Vec<ValidationError>) -> Result<(), BillingError> {
    if errors.is_empty() {
        return Ok(());
    }
    let msg = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    Err(BillingError::Validation(msg))
}

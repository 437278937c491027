use thiserror::Error;

/// Errors that can occur while constructing or serializing a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EfacturaError {
    /// A business rule failed. The invoice must be corrected and resubmitted.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// A single business-rule failure.
///
/// `rule` is a stable identifier (see [`crate::core::validation::rules`])
/// suitable for programmatic matching; `field` is the dot-separated path to
/// the offending value; `message` is human-readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable rule identifier, e.g. "BR-RO-041".
    pub rule: &'static str,
    /// Dot-separated path to the invalid field (e.g. "supplier.address.county").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl ValidationError {
    pub fn new(
        rule: &'static str,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.rule, self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

//! The single construction-error kind raised by the AST builder.

/// Every builder constructor fails, if at all, with one of these variants.
/// Each carries enough context (the constructor name and the offending
/// argument) to explain the failure without re-running anything.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuilderError {
    #[error("`{constructor}`: invalid argument: {reason}")]
    InvalidArgument {
        constructor: &'static str,
        reason: String,
    },

    #[error("`{constructor}`: options `{a}` and `{b}` cannot both be set")]
    ConflictingOptions {
        constructor: &'static str,
        a: &'static str,
        b: &'static str,
    },

    #[error("`{constructor}`: value is not representable as JSON: {reason}")]
    NotJsonRepresentable {
        constructor: &'static str,
        reason: String,
    },

    #[error("duplicate artifact name `{0}`")]
    DuplicateArtifact(String),
}

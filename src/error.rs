//! Error types for pathway construction and configuration loading.
//!
//! Build-time validation failures are fatal and carry the identifier of the
//! offending element so callers can point at the broken config entry.
//! Runtime numeric anomalies are not errors; they are neutralized locally
//! (see the integrator and kinetics modules).

use thiserror::Error;

/// Result type alias for model-building operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Fatal errors raised while building a pathway model from declarations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Two metabolites or reactions declared the same id.
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId {
        /// Entity kind ("metabolite", "reaction", "enzyme").
        kind: &'static str,
        /// The offending identifier.
        id: String,
    },

    /// A reaction referenced a metabolite id that is not declared.
    #[error("reaction '{reaction}' references unknown metabolite '{id}'")]
    UnknownReference {
        /// Reaction whose participant list is broken.
        reaction: String,
        /// The undeclared metabolite id.
        id: String,
    },

    /// A reaction referenced an enzyme id missing from the enzyme table.
    #[error("reaction '{reaction}' references unknown enzyme '{enzyme_id}'")]
    MissingEnzyme {
        /// Reaction whose enzyme reference is broken.
        reaction: String,
        /// The unknown enzyme id.
        enzyme_id: String,
    },

    /// A configuration file named a kinetics kind that does not exist.
    #[error("reaction '{reaction}' declares invalid kinetics kind '{kind}'")]
    InvalidKinetics {
        /// Reaction with the bad kinetics declaration.
        reaction: String,
        /// The unrecognized kind string.
        kind: String,
    },

    /// JSON parsing failure in a fatal configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O failure while loading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Mapper error types

use crate::rdf::{PrefixError, RdfError};
use thiserror::Error;

/// Errors raised while encoding objects to a graph or decoding them back
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    /// No identity source exists and `require_ids` is set
    #[error("No identifier found for object of type {0}, and require_ids is set")]
    UnidentifiableObject(String),

    /// More than one candidate subject when decoding without an explicit node
    #[error("Cannot auto-detect the subject to decode: {0} candidate subjects")]
    AmbiguousSubject(usize),

    /// More values than the target property shape allows
    #[error("Cardinality violation: {property} has {count} values but only one was expected")]
    CardinalityViolation { property: String, count: usize },

    /// The target class cannot be instantiated
    #[error("Could not construct {class}: {reason}")]
    Construction { class: String, reason: String },

    /// Invalid IRI from a predicate, datatype or type hint
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// A literal whose lexical form does not fit its datatype or target type
    #[error("Invalid literal {lexical} for {expected}")]
    InvalidLiteral { lexical: String, expected: String },

    /// Unsupported or unknown literal datatype
    #[error("Unsupported or unknown literal datatype: {0}")]
    UnsupportedDatatype(String),

    /// A value the engine cannot turn into a graph term
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// A decoded value does not have the shape a setter expects
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// No schema or codec is registered for a class
    #[error("No schema or codec registered for {0}")]
    UnknownClass(String),

    /// An enum IRI hint matched but no enum member carries that name
    #[error("Expected enum value not found: {0}")]
    EnumMismatch(String),

    /// Error raised by a custom codec
    #[error("Codec error: {0}")]
    Codec(String),
}

impl From<RdfError> for MappingError {
    fn from(err: RdfError) -> Self {
        match err {
            RdfError::InvalidIri(iri) => MappingError::InvalidIri(iri),
            RdfError::InvalidBlankNode(id) => MappingError::InvalidIri(id),
            RdfError::InvalidLiteral(msg) => MappingError::InvalidLiteral {
                lexical: msg,
                expected: "a valid literal".to_string(),
            },
        }
    }
}

pub type MappingResult<T> = Result<T, MappingError>;

/// Errors raised while configuring a mapper
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid namespace or prefix registration
    #[error(transparent)]
    Prefix(#[from] PrefixError),

    /// Invalid type IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// The same type IRI was mapped to a second class
    #[error("{iri} is already mapped to {existing}, cannot map it to {requested}")]
    DuplicateMapping {
        iri: String,
        existing: String,
        requested: String,
    },

    /// A second schema was registered for a class
    #[error("A schema for {0} is already registered")]
    DuplicateSchema(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

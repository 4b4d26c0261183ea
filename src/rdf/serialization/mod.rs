//! RDF serialization formats
//!
//! Supports:
//! - Turtle (TTL)
//! - N-Triples (NT)

mod turtle;

use super::Graph;
use thiserror::Error;

pub use turtle::{TurtleParserWrapper, TurtleSerializerWrapper};

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string
    pub fn parse(input: &str, format: RdfFormat) -> ParseResult<Graph> {
        match format {
            // N-Triples is a subset of Turtle
            RdfFormat::Turtle | RdfFormat::NTriples => TurtleParserWrapper::parse(input),
        }
    }

    /// Parse RDF data from a file
    pub fn parse_file(path: &std::path::Path, format: RdfFormat) -> ParseResult<Graph> {
        let input = std::fs::read_to_string(path)?;
        Self::parse(&input, format)
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize a graph to a string
    pub fn serialize(graph: &Graph, format: RdfFormat) -> SerializeResult<String> {
        match format {
            RdfFormat::Turtle => TurtleSerializerWrapper::serialize(graph),
            RdfFormat::NTriples => Ok(graph
                .iter()
                .map(|triple| format!("{}\n", triple))
                .collect()),
        }
    }

    /// Serialize a graph to a file
    pub fn serialize_file(
        graph: &Graph,
        path: &std::path::Path,
        format: RdfFormat,
    ) -> SerializeResult<()> {
        let output = Self::serialize(graph, format)?;
        std::fs::write(path, output)?;
        Ok(())
    }
}

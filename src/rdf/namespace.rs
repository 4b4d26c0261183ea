//! RDF namespace and prefix management
//!
//! This module handles namespace prefixes for compact IRI notation.

use super::vocab::DEFAULT_NAMESPACE;
use indexmap::IndexMap;
use oxiri::Iri;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

const PREFIX_PATTERN: &str = r"^[A-Za-z_][\w.-]*$";

static PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(PREFIX_PATTERN).ok());

/// Prefix errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Namespace is not an absolute IRI
    #[error("Namespace must be a valid IRI: {0}")]
    InvalidNamespace(String),

    /// Prefix does not match `[A-Za-z_][\w.-]*`
    #[error("{0} is not a valid namespace prefix")]
    InvalidPrefix(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix
    pub prefix: String,
    /// IRI
    pub iri: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Namespace manager with common prefixes
///
/// The empty prefix names the default namespace, used for properties without an
/// explicit predicate and for generated identities.
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    /// Prefix → IRI mappings
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Create a new namespace manager with common prefixes
    pub fn new() -> Self {
        let mut prefixes = IndexMap::new();

        prefixes.insert(String::new(), DEFAULT_NAMESPACE.to_string());

        // Add common RDF/RDFS/OWL prefixes
        for (prefix, iri) in [
            ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
            ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
            ("xsd", "http://www.w3.org/2001/XMLSchema#"),
            ("owl", "http://www.w3.org/2002/07/owl#"),
            ("foaf", "http://xmlns.com/foaf/0.1/"),
            ("dc", "http://purl.org/dc/elements/1.1/"),
            ("dcterms", "http://purl.org/dc/terms/"),
            ("skos", "http://www.w3.org/2004/02/skos/core#"),
        ] {
            prefixes.insert(prefix.to_string(), iri.to_string());
        }

        Self { prefixes }
    }

    /// Add a prefix, validating both the prefix and the namespace IRI
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) -> PrefixResult<()> {
        let prefix = prefix.into();
        let iri = iri.into();

        if Iri::parse(iri.as_str()).is_err() {
            return Err(PrefixError::InvalidNamespace(iri));
        }

        if !prefix.is_empty() && !is_valid_prefix(&prefix) {
            return Err(PrefixError::InvalidPrefix(prefix));
        }

        self.prefixes.insert(prefix, iri);
        Ok(())
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// The namespace bound to the empty prefix
    pub fn default_namespace(&self) -> &str {
        self.get_iri("").unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Expand a compact IRI (prefix:local) to full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        if let Some(pos) = compact_iri.find(':') {
            let prefix = &compact_iri[..pos];
            let local = &compact_iri[pos + 1..];
            let iri = self.get_iri(prefix)?;
            Ok(format!("{}{}", iri, local))
        } else {
            Err(PrefixError::InvalidIri(compact_iri.to_string()))
        }
    }

    /// Expand a compact IRI when its prefix is registered, otherwise return it as is
    ///
    /// Full IRIs such as `urn:x` or `http://...` pass through untouched because
    /// `urn` and `http` are not registered prefixes.
    pub fn resolve(&self, iri_or_qname: &str) -> String {
        self.expand(iri_or_qname)
            .unwrap_or_else(|_| iri_or_qname.to_string())
    }

    /// Get all registered prefixes
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Append a local name to a namespace
///
/// A `/` is inserted only when the namespace does not already end in a
/// separator (`/`, `#` or `:`).
pub fn join(namespace: &str, local: &str) -> String {
    if namespace.ends_with(['/', '#', ':']) {
        format!("{}{}", namespace, local)
    } else {
        format!("{}/{}", namespace, local)
    }
}

fn is_valid_prefix(prefix: &str) -> bool {
    PREFIX.as_ref().map_or(false, |re| re.is_match(prefix))
}

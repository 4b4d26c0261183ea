//! Mapping options

use serde::{Deserialize, Serialize};

/// Flags that shape how a mapper encodes and decodes
///
/// Options are fixed when the mapper is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingOptions {
    /// Fail with `UnidentifiableObject` instead of falling back to a hash of the object
    pub require_ids: bool,

    /// Write every collection as an RDF list rather than one assertion per element
    pub serialize_collections_as_lists: bool,

    /// Drop properties whose predicate or datatype hint is not a valid IRI
    pub ignore_invalid_annotations: bool,

    /// Keep the first value of an over-full property instead of failing
    pub ignore_cardinality_violations: bool,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            require_ids: false,
            serialize_collections_as_lists: false,
            ignore_invalid_annotations: true,
            ignore_cardinality_violations: false,
        }
    }
}

impl MappingOptions {
    /// Load options from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Render options as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

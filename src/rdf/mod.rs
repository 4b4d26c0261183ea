//! RDF data model used by the object mapper
//!
//! This module provides the graph side of the mapping:
//! - RDF terms and triples (wrappers over `oxrdf`)
//! - An in-memory, indexed triple graph
//! - Namespace prefixes and well-known vocabulary
//! - Turtle and N-Triples text I/O
//!
//! # Example
//!
//! ```rust
//! use samyama_mapper::rdf::{Graph, NamedNode, Literal, RdfPredicate};
//!
//! let mut graph = Graph::new();
//!
//! let subject = NamedNode::new("http://example.org/alice").unwrap();
//! let predicate = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
//! graph.add(subject.clone(), predicate.clone(), Literal::new_simple_literal("Alice"));
//!
//! assert_eq!(graph.objects(&subject.into(), &predicate).len(), 1);
//! ```

mod graph;
mod namespace;
mod serialization;
mod types;
pub mod vocab;

pub use types::{
    BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    Triple, TriplePattern,
};

pub use graph::Graph;

pub use namespace::{join, Namespace, NamespaceManager, PrefixError, PrefixResult};

pub use serialization::{
    ParseError, ParseResult, RdfFormat, RdfParser, RdfSerializer, SerializeError,
    SerializeResult,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rdf_module_exports() {
        let _graph: Graph = Graph::new();
        let _ns_mgr = NamespaceManager::new();
        assert_eq!(vocab::rdf_type().as_str(), "http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
    }
}

//! Samyama RDF Mapper
//!
//! Bidirectional mapping between Rust objects and RDF graphs.
//!
//! # Modules
//!
//! - [`rdf`]: RDF terms, an indexed in-memory graph, namespaces and
//!   Turtle/N-Triples I/O
//! - [`mapper`]: the mapping engine (schemas, identities, encode and decode)
//!
//! # Example Usage
//!
//! ```rust
//! use samyama_mapper::mapper::{Property, RdfMapper, Schema, ValueType};
//! use samyama_mapper::rdf::{RdfFormat, RdfSerializer};
//!
//! #[derive(Debug, Clone, PartialEq, Default)]
//! struct Book {
//!     title: String,
//! }
//!
//! let mapper = RdfMapper::builder()
//!     .namespace("ex", "http://example.org/")
//!     .unwrap()
//!     .schema(
//!         Schema::builder::<Book>()
//!             .rdfs_class("ex:Book")
//!             .property(
//!                 Property::new("title", ValueType::String).predicate("dcterms:title"),
//!                 |b: &Book| b.title.clone().into(),
//!                 |b: &mut Book, v| {
//!                     b.title = v.try_into()?;
//!                     Ok(())
//!                 },
//!             )
//!             .build(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let mut book = Book { title: "Dune".to_string() };
//! let graph = mapper.encode(&mut book).unwrap();
//!
//! let turtle = RdfSerializer::serialize(&graph, RdfFormat::Turtle).unwrap();
//! assert!(turtle.contains("Dune"));
//!
//! let decoded: Book = mapper.decode(&graph).unwrap();
//! assert_eq!(decoded, book);
//! ```

pub mod mapper;
pub mod rdf;

pub use mapper::{MappingError, MappingOptions, RdfMapper, Schema};
pub use rdf::Graph;

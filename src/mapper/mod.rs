//! Object ↔ RDF graph mapping
//!
//! An [`RdfMapper`] turns objects into graphs and back. Classes are described
//! by [`Schema`]s registered on the [`RdfMapperBuilder`]; opaque types can
//! plug in an [`RdfCodec`] instead.
//!
//! # Example
//!
//! ```rust
//! use samyama_mapper::mapper::{Property, RdfMapper, Schema, ValueType};
//!
//! #[derive(Debug, Clone, PartialEq, Default)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! let mapper = RdfMapper::builder()
//!     .schema(
//!         Schema::builder::<Person>()
//!             .rdfs_class("foaf:Person")
//!             .property(
//!                 Property::new("name", ValueType::String),
//!                 |p: &Person| p.name.clone().into(),
//!                 |p: &mut Person, v| {
//!                     p.name = v.try_into()?;
//!                     Ok(())
//!                 },
//!             )
//!             .property(
//!                 Property::new("age", ValueType::Int),
//!                 |p: &Person| p.age.into(),
//!                 |p: &mut Person, v| {
//!                     p.age = v.try_into()?;
//!                     Ok(())
//!                 },
//!             )
//!             .build(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let mut ada = Person { name: "Ada".to_string(), age: 30 };
//! let graph = mapper.encode(&mut ada).unwrap();
//! assert_eq!(graph.len(), 3);
//!
//! let decoded: Person = mapper.decode(&graph).unwrap();
//! assert_eq!(decoded, ada);
//! ```

mod builder;
mod codec;
mod decoder;
mod encoder;
mod error;
mod factory;
mod identity;
mod literal;
mod options;
mod property;
mod registry;
mod schema;
mod value;

pub use builder::RdfMapperBuilder;
pub use codec::{CodecRegistry, RdfCodec, UuidCodec, UUID_PROPERTY, UUID_TYPE};
pub use error::{ConfigError, ConfigResult, MappingError, MappingResult};
pub use factory::{natural_order, CollectionFactory, DefaultCollectionFactory, DefaultMapFactory, MapFactory};
pub use identity::{IdFunction, IdentityResolver};
pub use literal::{from_literal, to_literal};
pub use options::MappingOptions;
pub use property::{PropertyMapper, ResolvedProperty};
pub use registry::TypeRegistry;
pub use schema::{Property, PropertyDescriptor, Schema, SchemaBuilder, SerializationHints};
pub use value::{ClassId, ContainerKind, Entity, EnumMember, RdfEnum, Value, ValueType};

use crate::rdf::{BlankNode, Graph, NamespaceManager, RdfSubject};
use decoder::Decoder;
use encoder::Encoder;
use std::sync::Arc;
use tracing::debug;

/// Bidirectional object ↔ graph mapper
///
/// Built once through [`RdfMapper::builder`] and immutable afterwards, so a
/// single mapper can be shared across threads.
pub struct RdfMapper {
    pub(crate) options: MappingOptions,
    pub(crate) properties: PropertyMapper,
    pub(crate) registry: TypeRegistry,
    pub(crate) identity: IdentityResolver,
    pub(crate) codecs: CodecRegistry,
    pub(crate) collections: Arc<dyn CollectionFactory>,
    pub(crate) maps: Arc<dyn MapFactory>,
}

impl RdfMapper {
    pub fn builder() -> RdfMapperBuilder {
        RdfMapperBuilder::new()
    }

    /// A mapper with default options and no registrations beyond `schemas`
    pub fn with_schemas(schemas: impl IntoIterator<Item = Schema>) -> ConfigResult<Self> {
        Self::builder().schemas(schemas).build()
    }

    pub fn options(&self) -> &MappingOptions {
        &self.options
    }

    pub fn namespaces(&self) -> &NamespaceManager {
        self.properties.namespaces()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Encode `value` into a new graph
    ///
    /// Objects that store their own identity and have none yet get the
    /// resolved identity written back, so later encodes reuse it. Nested
    /// objects are updated through their parent's property setters.
    pub fn encode<T: Entity>(&self, value: &mut T) -> MappingResult<Graph> {
        let mut graph = Graph::new();
        self.encode_into(value, &mut graph)?;
        Ok(graph)
    }

    /// Encode `value` into an existing graph and return its node
    ///
    /// Triples written before a failure stay in `graph`.
    pub fn encode_into<T: Entity>(&self, value: &mut T, graph: &mut Graph) -> MappingResult<RdfSubject> {
        let before = graph.len();
        let id = Encoder::new(self, graph).write_entity(value)?;

        debug!("Encoded {} as {} ({} new triples)", ClassId::of::<T>(), id, graph.len() - before);
        Ok(id)
    }

    /// Decode the single subject of `graph` as a `T`
    ///
    /// An empty graph yields a default instance (a codec is handed a fresh
    /// blank node). More than one subject is ambiguous; use
    /// [`RdfMapper::decode_node`] then.
    pub fn decode<T: Entity>(&self, graph: &Graph) -> MappingResult<T> {
        let subjects = graph.subjects();
        match subjects.as_slice() {
            [] => {
                let class = ClassId::of::<T>();
                if self.codecs.contains(class) {
                    return self.decode_node(graph, &BlankNode::new().into());
                }
                let schema = self
                    .registry
                    .schema(class)
                    .ok_or_else(|| MappingError::UnknownClass(class.name().to_string()))?;
                downcast(schema.instantiate()?)
            }
            [subject] => self.decode_node(graph, subject),
            many => Err(MappingError::AmbiguousSubject(many.len())),
        }
    }

    /// Decode the object rooted at `node` as a `T`
    pub fn decode_node<T: Entity>(&self, graph: &Graph, node: &RdfSubject) -> MappingResult<T> {
        let class = ClassId::of::<T>();
        debug!("Decoding {} as {}", node, class);

        let entity = Decoder::new(self, graph)
            .read_class(class, node)?
            .ok_or_else(|| MappingError::Codec(format!("no {} could be read from {}", class, node)))?;
        downcast(entity)
    }
}

fn downcast<T: Entity>(entity: Box<dyn Entity>) -> MappingResult<T> {
    Value::Object(entity).into_entity()
}

impl std::fmt::Debug for RdfMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RdfMapper")
            .field("options", &self.options)
            .field("namespaces", self.namespaces())
            .field("registry", &self.registry)
            .field("codecs", &self.codecs.len())
            .finish()
    }
}

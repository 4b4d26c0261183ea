//! Pluggable per-class codecs
//!
//! A codec replaces the structural mapping of a class entirely, in both
//! directions. It suits opaque value types that are not a set of named
//! properties.

use super::error::{MappingError, MappingResult};
use super::value::{ClassId, Entity};
use crate::rdf::{BlankNode, Graph, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject};
use crate::rdf::vocab;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

/// Type asserted for encoded UUIDs
pub const UUID_TYPE: &str = "urn:samyama:mapper:uuid:Uuid";

/// Predicate carrying an encoded UUID's text form
pub const UUID_PROPERTY: &str = "urn:samyama:mapper:uuid:uuid";

/// Custom encoding for values of type `T`
pub trait RdfCodec<T>: Send + Sync {
    /// Write `value` into `graph`, returning the node that represents it
    fn encode(&self, value: &T, graph: &mut Graph) -> MappingResult<RdfSubject>;

    /// Read the value represented by `node`; `None` when the data is incomplete
    fn decode(&self, graph: &Graph, node: &RdfSubject) -> MappingResult<Option<T>>;
}

/// Type-erased codec stored in the registry
pub(crate) trait ErasedCodec: Send + Sync {
    fn encode(&self, value: &dyn Entity, graph: &mut Graph) -> MappingResult<RdfSubject>;
    fn decode(&self, graph: &Graph, node: &RdfSubject) -> MappingResult<Option<Box<dyn Entity>>>;
}

struct CodecAdapter<T, C> {
    codec: C,
    _marker: PhantomData<fn() -> T>,
}

impl<T, C> ErasedCodec for CodecAdapter<T, C>
where
    T: Entity,
    C: RdfCodec<T>,
{
    fn encode(&self, value: &dyn Entity, graph: &mut Graph) -> MappingResult<RdfSubject> {
        let typed = value
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| MappingError::TypeMismatch {
                expected: std::any::type_name::<T>().to_string(),
                found: value.class_id().name().to_string(),
            })?;
        self.codec.encode(typed, graph)
    }

    fn decode(&self, graph: &Graph, node: &RdfSubject) -> MappingResult<Option<Box<dyn Entity>>> {
        Ok(self
            .codec
            .decode(graph, node)?
            .map(|value| Box::new(value) as Box<dyn Entity>))
    }
}

/// Codecs keyed by the class they handle
#[derive(Clone, Default)]
pub struct CodecRegistry {
    codecs: HashMap<ClassId, Arc<dyn ErasedCodec>>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `codec` for `T`, replacing any earlier codec for `T`
    pub fn register<T, C>(&mut self, codec: C)
    where
        T: Entity,
        C: RdfCodec<T> + 'static,
    {
        self.codecs.insert(
            ClassId::of::<T>(),
            Arc::new(CodecAdapter {
                codec,
                _marker: PhantomData,
            }),
        );
    }

    pub fn contains(&self, class: ClassId) -> bool {
        self.codecs.contains_key(&class)
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    pub(crate) fn get(&self, class: ClassId) -> Option<&dyn ErasedCodec> {
        self.codecs.get(&class).map(|codec| codec.as_ref())
    }
}

/// Codec writing a [`Uuid`] as a typed blank node carrying its text form
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidCodec;

impl UuidCodec {
    fn type_node() -> NamedNode {
        NamedNode::from(oxrdf::NamedNode::new_unchecked(UUID_TYPE))
    }

    fn property() -> RdfPredicate {
        NamedNode::from(oxrdf::NamedNode::new_unchecked(UUID_PROPERTY)).into()
    }
}

impl RdfCodec<Uuid> for UuidCodec {
    fn encode(&self, value: &Uuid, graph: &mut Graph) -> MappingResult<RdfSubject> {
        let node: RdfSubject = BlankNode::new().into();
        graph.add(node.clone(), vocab::rdf_type(), Self::type_node());
        graph.add(
            node.clone(),
            Self::property(),
            Literal::new_simple_literal(value.to_string()),
        );
        Ok(node)
    }

    fn decode(&self, graph: &Graph, node: &RdfSubject) -> MappingResult<Option<Uuid>> {
        let text = match graph.object(node, &Self::property()) {
            Some(RdfObject::Literal(lit)) => lit.value().to_string(),
            Some(other) => other.to_string(),
            None => return Ok(None),
        };

        Uuid::parse_str(&text)
            .map(Some)
            .map_err(|e| MappingError::Codec(format!("{} is not a UUID: {}", text, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_codec() {
        let id = Uuid::new_v4();
        let mut graph = Graph::new();

        let node = UuidCodec.encode(&id, &mut graph).unwrap();
        assert!(node.is_blank_node());
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.types_of(&node), vec![UuidCodec::type_node()]);

        assert_eq!(UuidCodec.decode(&graph, &node).unwrap(), Some(id));
        assert_eq!(UuidCodec.decode(&Graph::new(), &node).unwrap(), None);
    }

    #[test]
    fn test_invalid_uuid() {
        let mut graph = Graph::new();
        let node: RdfSubject = BlankNode::new().into();
        graph.add(node.clone(), UuidCodec::property(), Literal::new_simple_literal("nope"));

        assert!(matches!(
            UuidCodec.decode(&graph, &node),
            Err(MappingError::Codec(_))
        ));
    }

    #[test]
    fn test_registry_erasure() {
        let mut registry = CodecRegistry::new();
        registry.register::<Uuid, _>(UuidCodec);
        assert!(registry.contains(ClassId::of::<Uuid>()));
        assert!(!registry.contains(ClassId::of::<String>()));

        let codec = registry.get(ClassId::of::<Uuid>()).unwrap();
        let id = Uuid::new_v4();
        let mut graph = Graph::new();
        let node = codec.encode(&id, &mut graph).unwrap();

        let decoded = codec.decode(&graph, &node).unwrap().unwrap();
        assert_eq!(decoded.as_any().downcast_ref::<Uuid>(), Some(&id));

        assert!(codec.encode(&"not a uuid".to_string(), &mut graph).is_err());
    }
}

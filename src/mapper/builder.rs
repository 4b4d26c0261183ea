//! Mapper configuration

use super::codec::{CodecRegistry, RdfCodec};
use super::error::{ConfigError, ConfigResult};
use super::factory::{CollectionFactory, DefaultCollectionFactory, DefaultMapFactory, MapFactory};
use super::identity::{IdFunction, IdentityResolver};
use super::options::MappingOptions;
use super::property::PropertyMapper;
use super::registry::TypeRegistry;
use super::schema::Schema;
use super::value::{ClassId, Entity};
use super::RdfMapper;
use crate::rdf::{NamespaceManager, RdfSubject};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// Builder for [`RdfMapper`]
///
/// ```rust
/// use samyama_mapper::mapper::{RdfMapper, UuidCodec};
///
/// let mapper = RdfMapper::builder()
///     .namespace("ex", "http://example.org/")
///     .unwrap()
///     .require_ids(false)
///     .codec(UuidCodec)
///     .build()
///     .unwrap();
///
/// assert!(mapper.namespaces().get_iri("ex").is_ok());
/// ```
pub struct RdfMapperBuilder {
    namespaces: NamespaceManager,
    options: MappingOptions,
    mappings: Vec<(String, ClassId)>,
    schemas: Vec<Schema>,
    codecs: CodecRegistry,
    id_functions: IndexMap<ClassId, IdFunction>,
    collections: Arc<dyn CollectionFactory>,
    maps: Arc<dyn MapFactory>,
}

impl Default for RdfMapperBuilder {
    fn default() -> Self {
        Self {
            namespaces: NamespaceManager::new(),
            options: MappingOptions::default(),
            mappings: Vec::new(),
            schemas: Vec::new(),
            codecs: CodecRegistry::new(),
            id_functions: IndexMap::new(),
            collections: Arc::new(DefaultCollectionFactory),
            maps: Arc::new(DefaultMapFactory),
        }
    }
}

impl RdfMapperBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a namespace prefix; the empty prefix sets the default namespace
    pub fn namespace(mut self, prefix: &str, iri: &str) -> ConfigResult<Self> {
        self.namespaces.add_prefix(prefix, iri)?;
        Ok(self)
    }

    /// Map a type IRI (or prefixed name) to the class `T`
    ///
    /// Fails when the IRI or the class is already mapped.
    pub fn map<T: ?Sized + 'static>(self, iri: &str) -> ConfigResult<Self> {
        self.map_class(iri, ClassId::of::<T>())
    }

    pub fn map_class(mut self, iri: &str, class: ClassId) -> ConfigResult<Self> {
        let resolved = self.namespaces.resolve(iri);
        if let Some((_, existing)) = self
            .mappings
            .iter()
            .find(|(mapped, _)| self.namespaces.resolve(mapped) == resolved)
        {
            return Err(ConfigError::DuplicateMapping {
                iri: resolved,
                existing: existing.name().to_string(),
                requested: class.name().to_string(),
            });
        }
        self.mappings.push((iri.to_string(), class));
        Ok(self)
    }

    /// Replace all options at once
    pub fn options(mut self, options: MappingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn require_ids(mut self, value: bool) -> Self {
        self.options.require_ids = value;
        self
    }

    pub fn serialize_collections_as_lists(mut self, value: bool) -> Self {
        self.options.serialize_collections_as_lists = value;
        self
    }

    pub fn ignore_invalid_annotations(mut self, value: bool) -> Self {
        self.options.ignore_invalid_annotations = value;
        self
    }

    pub fn ignore_cardinality_violations(mut self, value: bool) -> Self {
        self.options.ignore_cardinality_violations = value;
        self
    }

    /// Register the schema of a class
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    pub fn schemas(self, schemas: impl IntoIterator<Item = Schema>) -> Self {
        schemas.into_iter().fold(self, Self::schema)
    }

    /// Encode and decode `T` with `codec` instead of its schema
    pub fn codec<T, C>(mut self, codec: C) -> Self
    where
        T: Entity,
        C: RdfCodec<T> + 'static,
    {
        self.codecs.register::<T, C>(codec);
        self
    }

    /// Identity source for instances of exactly `T`
    pub fn id_function<T, F>(self, function: F) -> Self
    where
        T: Entity,
        F: Fn(&T) -> Option<RdfSubject> + Send + Sync + 'static,
    {
        let erased: IdFunction = Arc::new(move |entity: &dyn Entity| {
            entity.as_any().downcast_ref::<T>().and_then(&function)
        });
        self.id_function_for::<T>(erased)
    }

    /// Identity source for instances of `T` and of every class declaring `T`
    /// as a supertype
    pub fn id_function_for<T: ?Sized + 'static>(mut self, function: IdFunction) -> Self {
        self.id_functions.insert(ClassId::of::<T>(), function);
        self
    }

    pub fn collection_factory(mut self, factory: impl CollectionFactory + 'static) -> Self {
        self.collections = Arc::new(factory);
        self
    }

    pub fn map_factory(mut self, factory: impl MapFactory + 'static) -> Self {
        self.maps = Arc::new(factory);
        self
    }

    /// Validate the configuration and build the mapper
    pub fn build(self) -> ConfigResult<RdfMapper> {
        let registry = TypeRegistry::new(
            self.mappings,
            self.schemas,
            self.namespaces.clone(),
            self.options,
        )?;

        let identity = IdentityResolver::new(
            self.namespaces.default_namespace(),
            self.options.require_ids,
            self.id_functions,
        );

        debug!(
            "Built mapper with {} codecs and options {:?}",
            self.codecs.len(),
            self.options
        );

        Ok(RdfMapper {
            options: self.options,
            properties: PropertyMapper::new(self.namespaces, self.options),
            registry,
            identity,
            codecs: self.codecs,
            collections: self.collections,
            maps: self.maps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::factory::natural_order;
    use crate::mapper::value::{ContainerKind, Value};
    use crate::rdf::PrefixError;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Tag;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Label;

    struct Reversed;

    impl CollectionFactory for Reversed {
        fn create(&self, _kind: ContainerKind, mut elements: Vec<Value>) -> Value {
            elements.sort_by(|a, b| natural_order(b, a));
            Value::Collection(elements)
        }
    }

    #[test]
    fn test_namespace_validation() {
        let err = RdfMapper::builder().namespace("1bad", "http://example.org/").err();
        assert_eq!(
            err,
            Some(ConfigError::Prefix(PrefixError::InvalidPrefix("1bad".to_string())))
        );

        let err = RdfMapper::builder().namespace("ex", "not an iri").err();
        assert!(matches!(err, Some(ConfigError::Prefix(_))));

        let mapper = RdfMapper::builder()
            .namespace("", "http://example.org/")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(mapper.namespaces().default_namespace(), "http://example.org/");
    }

    #[test]
    fn test_duplicate_type_mapping() {
        let builder = RdfMapper::builder()
            .namespace("ex", "http://example.org/")
            .unwrap()
            .map::<Tag>("ex:Tag")
            .unwrap();

        // the same IRI, spelled out in full
        let err = builder.map::<Label>("http://example.org/Tag").err();
        assert!(matches!(err, Some(ConfigError::DuplicateMapping { .. })));
    }

    #[test]
    fn test_invalid_mapping_iri() {
        let err = RdfMapper::builder().map::<Tag>("not an iri").unwrap().build().err();
        assert!(matches!(err, Some(ConfigError::InvalidIri(_))));
    }

    #[test]
    fn test_custom_factory() {
        let mapper = RdfMapper::builder()
            .collection_factory(Reversed)
            .build()
            .unwrap();
        let value = mapper
            .collections
            .create(ContainerKind::List, vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(value, Value::Collection(vec![Value::Int(2), Value::Int(1)]));
    }
}

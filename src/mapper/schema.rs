//! Per-class schemas
//!
//! A [`Schema`] stands in for runtime property discovery. It lists a class's
//! mapped properties with their accessors and serialization hints, plus the
//! optional class-level hooks (type hint, supertypes, constructor, stored
//! identity, source graph). Schemas are built once, at mapper build time.
//!
//! ```rust
//! use samyama_mapper::mapper::{Property, Schema, ValueType};
//!
//! #[derive(Debug, Clone, PartialEq, Default)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! let schema = Schema::builder::<Person>()
//!     .rdfs_class("foaf:Person")
//!     .property(
//!         Property::new("name", ValueType::String).predicate("foaf:name"),
//!         |p: &Person| p.name.clone().into(),
//!         |p: &mut Person, v| {
//!             p.name = v.try_into()?;
//!             Ok(())
//!         },
//!     )
//!     .property(
//!         Property::new("age", ValueType::Int),
//!         |p: &Person| p.age.into(),
//!         |p: &mut Person, v| {
//!             p.age = v.try_into()?;
//!             Ok(())
//!         },
//!     )
//!     .build();
//!
//! assert_eq!(schema.properties().len(), 2);
//! ```

use super::error::{MappingError, MappingResult};
use super::value::{ClassId, Entity, Value, ValueType};
use crate::rdf::{Graph, RdfSubject};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub(crate) type Getter = Arc<dyn Fn(&dyn Entity) -> MappingResult<Value> + Send + Sync>;
pub(crate) type Setter = Arc<dyn Fn(&mut dyn Entity, Value) -> MappingResult<()> + Send + Sync>;
type Constructor = Arc<dyn Fn() -> Box<dyn Entity> + Send + Sync>;
type IdentityGetter = Arc<dyn Fn(&dyn Entity) -> Option<RdfSubject> + Send + Sync>;
type IdentitySetter = Arc<dyn Fn(&mut dyn Entity, RdfSubject) + Send + Sync>;
type SourceGraphSetter = Arc<dyn Fn(&mut dyn Entity, &Graph) + Send + Sync>;

/// Serialization hints attached to a property
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializationHints {
    /// Predicate IRI or prefixed name; defaults to the default namespace + property name
    pub predicate: Option<String>,
    /// Write collections as an RDF list
    pub list: bool,
    /// Language tag for string literals
    pub language: Option<String>,
    /// Datatype IRI or prefixed name overriding the inferred datatype
    pub datatype: Option<String>,
}

/// Declaration of one mapped property
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: String,
    value_type: ValueType,
    hints: SerializationHints,
    identity: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            hints: SerializationHints::default(),
            identity: false,
        }
    }

    /// Map to this predicate instead of the default one
    pub fn predicate(mut self, iri: impl Into<String>) -> Self {
        self.hints.predicate = Some(iri.into());
        self
    }

    /// Write collection values as an RDF list
    pub fn list(mut self) -> Self {
        self.hints.list = true;
        self
    }

    /// Tag string values with a language
    pub fn language(mut self, tag: impl Into<String>) -> Self {
        self.hints.language = Some(tag.into());
        self
    }

    /// Write scalar values with this datatype
    pub fn datatype(mut self, iri: impl Into<String>) -> Self {
        self.hints.datatype = Some(iri.into());
        self
    }

    /// Use this property's value when deriving the object's identity
    pub fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn hints(&self) -> &SerializationHints {
        &self.hints
    }

    pub fn is_identity(&self) -> bool {
        self.identity
    }
}

/// A property together with its type-erased accessors
#[derive(Clone)]
pub struct PropertyDescriptor {
    property: Property,
    getter: Getter,
    setter: Option<Setter>,
}

impl PropertyDescriptor {
    pub fn property(&self) -> &Property {
        &self.property
    }

    pub fn name(&self) -> &str {
        self.property.name()
    }

    pub fn value_type(&self) -> &ValueType {
        self.property.value_type()
    }

    pub fn hints(&self) -> &SerializationHints {
        self.property.hints()
    }

    /// Whether decoding can assign this property
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Read the property from an instance
    pub fn get(&self, entity: &dyn Entity) -> MappingResult<Value> {
        (self.getter)(entity)
    }

    /// Assign the property on an instance; read-only properties ignore the call
    pub fn set(&self, entity: &mut dyn Entity, value: Value) -> MappingResult<()> {
        match &self.setter {
            Some(setter) => setter(entity, value),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("property", &self.property)
            .field("writable", &self.is_writable())
            .finish()
    }
}

/// Mapping schema of one class
#[derive(Clone)]
pub struct Schema {
    class: ClassId,
    rdfs_class: Option<String>,
    supertypes: Vec<ClassId>,
    properties: Vec<PropertyDescriptor>,
    constructor: Option<Constructor>,
    identity: Option<(IdentityGetter, IdentitySetter)>,
    source_graph: Option<SourceGraphSetter>,
}

impl Schema {
    /// Schema for a class decoded through `T::default()`
    pub fn builder<T: Entity + Default>() -> SchemaBuilder<T> {
        let mut builder = SchemaBuilder::new();
        builder.constructor = Some(Arc::new(|| Box::new(T::default())));
        builder
    }

    /// Schema for a class without a default constructor
    ///
    /// Decoding into such a class resolves a constructible subclass from the
    /// node's asserted types, and fails when there is none.
    pub fn builder_without_constructor<T: Entity>() -> SchemaBuilder<T> {
        SchemaBuilder::new()
    }

    /// Schema for an abstract class, typically a `dyn Trait`
    pub fn abstract_class<T: ?Sized + 'static>() -> SchemaBuilder<T> {
        SchemaBuilder::new()
    }

    pub fn class(&self) -> ClassId {
        self.class
    }

    /// Type IRI hint, possibly a prefixed name
    pub fn rdfs_class(&self) -> Option<&str> {
        self.rdfs_class.as_deref()
    }

    /// Declared direct supertypes
    pub fn supertypes(&self) -> &[ClassId] {
        &self.supertypes
    }

    /// Properties in declaration order
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Properties contributing to the derived identity, sorted by name
    pub fn identity_properties(&self) -> Vec<&PropertyDescriptor> {
        let mut props: Vec<&PropertyDescriptor> = self
            .properties
            .iter()
            .filter(|p| p.property.is_identity())
            .collect();
        props.sort_by(|a, b| a.name().cmp(b.name()));
        props
    }

    pub fn is_instantiable(&self) -> bool {
        self.constructor.is_some()
    }

    /// Create a default instance
    pub fn instantiate(&self) -> MappingResult<Box<dyn Entity>> {
        self.constructor
            .as_ref()
            .map(|construct| construct())
            .ok_or_else(|| MappingError::Construction {
                class: self.class.name().to_string(),
                reason: "it does not have a default constructor".to_string(),
            })
    }

    /// Whether instances carry their own identity
    pub fn stores_identity(&self) -> bool {
        self.identity.is_some()
    }

    /// Identity stored on an instance
    pub fn identity_of(&self, entity: &dyn Entity) -> Option<RdfSubject> {
        self.identity.as_ref().and_then(|(get, _)| get(entity))
    }

    /// Store an identity on an instance, when the class supports it
    pub fn set_identity(&self, entity: &mut dyn Entity, id: RdfSubject) {
        if let Some((_, set)) = &self.identity {
            set(entity, id);
        }
    }

    /// Hand the graph an instance was decoded from to the instance
    pub fn set_source_graph(&self, entity: &mut dyn Entity, graph: &Graph) {
        if let Some(set) = &self.source_graph {
            set(entity, graph);
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("class", &self.class)
            .field("rdfs_class", &self.rdfs_class)
            .field("supertypes", &self.supertypes)
            .field("properties", &self.properties)
            .field("instantiable", &self.is_instantiable())
            .field("stores_identity", &self.stores_identity())
            .finish()
    }
}

/// Builder for [`Schema`]
pub struct SchemaBuilder<T: ?Sized> {
    rdfs_class: Option<String>,
    supertypes: Vec<ClassId>,
    properties: Vec<PropertyDescriptor>,
    constructor: Option<Constructor>,
    identity: Option<(IdentityGetter, IdentitySetter)>,
    source_graph: Option<SourceGraphSetter>,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized + 'static> SchemaBuilder<T> {
    fn new() -> Self {
        Self {
            rdfs_class: None,
            supertypes: Vec::new(),
            properties: Vec::new(),
            constructor: None,
            identity: None,
            source_graph: None,
            _marker: PhantomData,
        }
    }

    /// Type IRI (or prefixed name) asserted for instances of this class
    pub fn rdfs_class(mut self, iri: impl Into<String>) -> Self {
        self.rdfs_class = Some(iri.into());
        self
    }

    /// Declare `S` as a supertype, used when resolving abstract property types
    pub fn extends<S: ?Sized + 'static>(mut self) -> Self {
        self.supertypes.push(ClassId::of::<S>());
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            class: ClassId::of::<T>(),
            rdfs_class: self.rdfs_class,
            supertypes: self.supertypes,
            properties: self.properties,
            constructor: self.constructor,
            identity: self.identity,
            source_graph: self.source_graph,
        }
    }
}

impl<T: Entity> SchemaBuilder<T> {
    /// Add a read/write property
    pub fn property<G, S>(mut self, property: Property, get: G, set: S) -> Self
    where
        G: Fn(&T) -> Value + Send + Sync + 'static,
        S: Fn(&mut T, Value) -> MappingResult<()> + Send + Sync + 'static,
    {
        let setter: Setter = Arc::new(move |entity: &mut dyn Entity, value: Value| {
            let found = entity.class_id();
            match entity.as_any_mut().downcast_mut::<T>() {
                Some(target) => set(target, value),
                None => Err(wrong_class::<T>(found)),
            }
        });

        self.properties.push(PropertyDescriptor {
            property,
            getter: erase_getter(get),
            setter: Some(setter),
        });
        self
    }

    /// Add a property that is written but never assigned on decode
    pub fn read_only_property<G>(mut self, property: Property, get: G) -> Self
    where
        G: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.properties.push(PropertyDescriptor {
            property,
            getter: erase_getter(get),
            setter: None,
        });
        self
    }

    /// Instances carry their own identity
    ///
    /// The stored identity wins over every other identity source. The mapper
    /// writes resolved identities back through `set`, on encode and on decode.
    pub fn identity<G, S>(mut self, get: G, set: S) -> Self
    where
        G: Fn(&T) -> Option<RdfSubject> + Send + Sync + 'static,
        S: Fn(&mut T, RdfSubject) + Send + Sync + 'static,
    {
        let getter: IdentityGetter = Arc::new(move |entity: &dyn Entity| {
            entity.as_any().downcast_ref::<T>().and_then(&get)
        });
        let setter: IdentitySetter = Arc::new(move |entity: &mut dyn Entity, id: RdfSubject| {
            if let Some(target) = entity.as_any_mut().downcast_mut::<T>() {
                set(target, id);
            }
        });
        self.identity = Some((getter, setter));
        self
    }

    /// Instances keep the graph they were decoded from
    pub fn source_graph<S>(mut self, set: S) -> Self
    where
        S: Fn(&mut T, &Graph) + Send + Sync + 'static,
    {
        self.source_graph = Some(Arc::new(move |entity: &mut dyn Entity, graph: &Graph| {
            if let Some(target) = entity.as_any_mut().downcast_mut::<T>() {
                set(target, graph);
            }
        }));
        self
    }
}

fn erase_getter<T, G>(get: G) -> Getter
where
    T: Entity,
    G: Fn(&T) -> Value + Send + Sync + 'static,
{
    Arc::new(move |entity: &dyn Entity| {
        entity
            .as_any()
            .downcast_ref::<T>()
            .map(&get)
            .ok_or_else(|| wrong_class::<T>(entity.class_id()))
    })
}

fn wrong_class<T: ?Sized + 'static>(found: ClassId) -> MappingError {
    MappingError::TypeMismatch {
        expected: std::any::type_name::<T>().to_string(),
        found: found.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::NamedNode;

    trait Shape {}

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Square {
        id: Option<RdfSubject>,
        side: i32,
        label: String,
    }

    fn square_schema() -> Schema {
        Schema::builder::<Square>()
            .rdfs_class("urn:Square")
            .extends::<dyn Shape>()
            .property(
                Property::new("side", ValueType::Int).identity(),
                |s: &Square| s.side.into(),
                |s: &mut Square, v| {
                    s.side = v.try_into()?;
                    Ok(())
                },
            )
            .read_only_property(Property::new("label", ValueType::String).identity(), |s: &Square| {
                s.label.clone().into()
            })
            .identity(|s: &Square| s.id.clone(), |s: &mut Square, id| s.id = Some(id))
            .build()
    }

    #[test]
    fn test_schema_shape() {
        let schema = square_schema();
        assert_eq!(schema.class(), ClassId::of::<Square>());
        assert_eq!(schema.rdfs_class(), Some("urn:Square"));
        assert_eq!(schema.supertypes(), &[ClassId::of::<dyn Shape>()]);
        assert!(schema.is_instantiable());
        assert!(schema.stores_identity());

        let names: Vec<&str> = schema.identity_properties().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["label", "side"]);
    }

    #[test]
    fn test_accessors() {
        let schema = square_schema();
        let mut entity = schema.instantiate().unwrap();

        let side = schema.property("side").unwrap();
        side.set(entity.as_mut(), Value::Int(4)).unwrap();
        assert_eq!(side.get(entity.as_ref()).unwrap(), Value::Int(4));

        // read-only properties ignore assignment
        let label = schema.property("label").unwrap();
        assert!(!label.is_writable());
        label.set(entity.as_mut(), Value::from("x")).unwrap();
        assert_eq!(label.get(entity.as_ref()).unwrap(), Value::from(""));

        let id: RdfSubject = NamedNode::new("urn:sq").unwrap().into();
        schema.set_identity(entity.as_mut(), id.clone());
        assert_eq!(schema.identity_of(entity.as_ref()), Some(id));

        // accessors refuse instances of other classes
        let mut other: Box<dyn Entity> = Box::new(String::new());
        assert!(side.get(other.as_ref()).is_err());
        assert!(side.set(other.as_mut(), Value::Int(1)).is_err());
    }

    #[test]
    fn test_abstract_class() {
        let schema = Schema::abstract_class::<dyn Shape>().rdfs_class("urn:Shape").build();
        assert!(!schema.is_instantiable());
        assert!(matches!(schema.instantiate(), Err(MappingError::Construction { .. })));
        assert!(schema.properties().is_empty());
    }
}

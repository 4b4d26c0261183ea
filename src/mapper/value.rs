//! Dynamic values exchanged between objects and the mapper
//!
//! Schemas expose each property through a getter returning a [`Value`] and a
//! setter accepting one. The mapper only ever sees values, never the concrete
//! Rust types behind them.
//!
//! Supports:
//! - Scalars (bool, integers, floats, char, string, URI, date-time)
//! - Enum members
//! - Collections and maps
//! - Nested objects ([`Entity`])

use super::error::{MappingError, MappingResult};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use indexmap::{IndexMap, IndexSet};
use std::any::{Any, TypeId};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies a mapped class
///
/// Works for `dyn Trait` types too, which stand in for abstract classes.
#[derive(Debug, Clone, Copy)]
pub struct ClassId {
    id: TypeId,
    name: &'static str,
}

impl ClassId {
    /// The class id of `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Full Rust type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl PartialEq for ClassId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClassId {}

impl Hash for ClassId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A mappable object held inside a [`Value`]
///
/// Implemented for every `'static` type that is `Debug + Clone + PartialEq`.
pub trait Entity: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn clone_entity(&self) -> Box<dyn Entity>;
    fn eq_entity(&self, other: &dyn Entity) -> bool;
    fn class_id(&self) -> ClassId;
}

impl<T> Entity for T
where
    T: Any + fmt::Debug + Clone + PartialEq,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_entity(&self) -> Box<dyn Entity> {
        Box::new(self.clone())
    }

    fn eq_entity(&self, other: &dyn Entity) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }

    fn class_id(&self) -> ClassId {
        ClassId::of::<T>()
    }
}

impl Clone for Box<dyn Entity> {
    fn clone(&self) -> Self {
        (**self).clone_entity()
    }
}

/// One member of a mapped enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumMember {
    /// Member name, matched against the local name of an IRI on decode
    pub name: &'static str,
    /// Explicit IRI for this member
    pub iri: Option<&'static str>,
}

impl EnumMember {
    pub const fn new(name: &'static str) -> Self {
        Self { name, iri: None }
    }

    pub const fn with_iri(name: &'static str, iri: &'static str) -> Self {
        Self {
            name,
            iri: Some(iri),
        }
    }
}

/// Enums that map to IRIs
///
/// ```rust
/// use samyama_mapper::mapper::{EnumMember, RdfEnum};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Colour { Red, Green }
///
/// impl RdfEnum for Colour {
///     const MEMBERS: &'static [EnumMember] = &[
///         EnumMember::new("Red"),
///         EnumMember::with_iri("Green", "http://example.org/green"),
///     ];
///
///     fn ordinal(&self) -> usize {
///         *self as usize
///     }
///
///     fn from_ordinal(ordinal: usize) -> Option<Self> {
///         [Colour::Red, Colour::Green].get(ordinal).copied()
///     }
/// }
///
/// assert_eq!(Colour::Green.member().unwrap().iri, Some("http://example.org/green"));
/// ```
pub trait RdfEnum: Sized + 'static {
    /// Members in declaration order
    const MEMBERS: &'static [EnumMember];

    /// Position of `self` in [`RdfEnum::MEMBERS`]
    fn ordinal(&self) -> usize;

    /// Inverse of [`RdfEnum::ordinal`]
    fn from_ordinal(ordinal: usize) -> Option<Self>;

    fn member(&self) -> Option<EnumMember> {
        Self::MEMBERS.get(self.ordinal()).copied()
    }

    fn from_member(member: &EnumMember) -> Option<Self> {
        Self::MEMBERS
            .iter()
            .position(|m| m.name == member.name)
            .and_then(Self::from_ordinal)
    }

    fn to_value(&self) -> Value {
        self.member().map(Value::Enum).unwrap_or(Value::Null)
    }
}

/// Kind of container a collection property is decoded into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Insertion-ordered sequence
    List,
    /// Insertion-ordered, without duplicates
    Set,
    /// Without duplicates, in natural order
    SortedSet,
}

/// Declared type of a property
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    Uri,
    DateTime,
    Enum(&'static [EnumMember]),
    Object(ClassId),
    /// Any object; the class is resolved from the node's asserted types
    Any,
    Collection(ContainerKind, Box<ValueType>),
    Map(Box<ValueType>, Box<ValueType>),
}

impl ValueType {
    pub fn object<T: ?Sized + 'static>() -> Self {
        ValueType::Object(ClassId::of::<T>())
    }

    pub fn enumeration<E: RdfEnum>() -> Self {
        ValueType::Enum(E::MEMBERS)
    }

    pub fn list_of(element: ValueType) -> Self {
        ValueType::Collection(ContainerKind::List, Box::new(element))
    }

    pub fn set_of(element: ValueType) -> Self {
        ValueType::Collection(ContainerKind::Set, Box::new(element))
    }

    pub fn sorted_set_of(element: ValueType) -> Self {
        ValueType::Collection(ContainerKind::SortedSet, Box::new(element))
    }

    pub fn map_of(key: ValueType, value: ValueType) -> Self {
        ValueType::Map(Box::new(key), Box::new(value))
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, ValueType::Collection(..))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, ValueType::Map(..))
    }
}

/// A property value
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    Uri(String),
    DateTime(DateTime<FixedOffset>),
    Enum(EnumMember),
    Collection(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Object(Box<dyn Entity>),
}

impl Value {
    /// Wrap an object
    pub fn object<T: Entity>(entity: T) -> Self {
        Value::Object(Box::new(entity))
    }

    /// Wrap an optional object
    pub fn optional_object<T: Entity>(entity: Option<T>) -> Self {
        entity.map(Value::object).unwrap_or(Value::Null)
    }

    /// Wrap a URI given as text
    pub fn uri(uri: impl Into<String>) -> Self {
        Value::Uri(uri.into())
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Null, or a collection or map without elements
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Collection(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            _ => false,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Byte(_) => "Byte",
            Value::Short(_) => "Short",
            Value::Int(_) => "Int",
            Value::Long(_) => "Long",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::Char(_) => "Char",
            Value::String(_) => "String",
            Value::Uri(_) => "Uri",
            Value::DateTime(_) => "DateTime",
            Value::Enum(_) => "Enum",
            Value::Collection(_) => "Collection",
            Value::Map(_) => "Map",
            Value::Object(_) => "Object",
        }
    }

    /// Lexical form of a scalar, as written into a literal
    pub fn lexical(&self) -> Option<String> {
        match self {
            Value::Bool(b) => Some(b.to_string()),
            Value::Byte(i) => Some(i.to_string()),
            Value::Short(i) => Some(i.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Long(i) => Some(i.to_string()),
            Value::Float(f) => Some(
                special_float(f64::from(*f))
                    .map(str::to_string)
                    .unwrap_or_else(|| f.to_string()),
            ),
            Value::Double(f) => Some(
                special_float(*f)
                    .map(str::to_string)
                    .unwrap_or_else(|| f.to_string()),
            ),
            Value::Char(c) => Some(c.to_string()),
            Value::String(s) | Value::Uri(s) => Some(s.clone()),
            Value::DateTime(dt) => Some(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Enum(member) => Some(member.name.to_string()),
            Value::Null | Value::Collection(_) | Value::Map(_) | Value::Object(_) => None,
        }
    }

    /// Borrow the object inside, if it is a `T`
    pub fn as_entity<T: Entity>(&self) -> Option<&T> {
        match self {
            Value::Object(entity) => (**entity).as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Class of the object inside, if any
    pub fn class_id(&self) -> Option<ClassId> {
        match self {
            Value::Object(entity) => Some((**entity).class_id()),
            _ => None,
        }
    }

    /// Take the object inside as a `T`
    pub fn into_entity<T: Entity>(self) -> MappingResult<T> {
        match self {
            Value::Object(entity) => {
                let found = entity.class_id().name();
                entity
                    .into_any()
                    .downcast::<T>()
                    .map(|boxed| *boxed)
                    .map_err(|_| MappingError::TypeMismatch {
                        expected: std::any::type_name::<T>().to_string(),
                        found: found.to_string(),
                    })
            }
            other => Err(other.mismatch(std::any::type_name::<T>())),
        }
    }

    /// `None` for null, otherwise the object inside as a `T`
    pub fn into_option_entity<T: Entity>(self) -> MappingResult<Option<T>> {
        match self {
            Value::Null => Ok(None),
            other => other.into_entity().map(Some),
        }
    }

    /// Take the enum member inside as an `E`
    pub fn into_enum<E: RdfEnum>(self) -> MappingResult<E> {
        match self {
            Value::Enum(member) => {
                E::from_member(&member).ok_or_else(|| MappingError::EnumMismatch(member.name.to_string()))
            }
            other => Err(other.mismatch(std::any::type_name::<E>())),
        }
    }

    /// `None` for null, otherwise the converted value
    pub fn into_option<T>(self) -> MappingResult<Option<T>>
    where
        T: TryFrom<Value, Error = MappingError>,
    {
        match self {
            Value::Null => Ok(None),
            other => T::try_from(other).map(Some),
        }
    }

    /// Elements of a collection, converted; a lone scalar becomes a single element
    pub fn into_vec<T>(self) -> MappingResult<Vec<T>>
    where
        T: TryFrom<Value, Error = MappingError>,
    {
        self.into_elements().into_iter().map(T::try_from).collect()
    }

    /// Objects of a collection, converted
    pub fn into_entities<T: Entity>(self) -> MappingResult<Vec<T>> {
        self.into_elements()
            .into_iter()
            .map(Value::into_entity)
            .collect()
    }

    /// Enum members of a collection, converted
    pub fn into_enums<E: RdfEnum>(self) -> MappingResult<Vec<E>> {
        self.into_elements()
            .into_iter()
            .map(Value::into_enum)
            .collect()
    }

    /// Entries of a map, converted
    pub fn into_pairs<K, V>(self) -> MappingResult<Vec<(K, V)>>
    where
        K: TryFrom<Value, Error = MappingError>,
        V: TryFrom<Value, Error = MappingError>,
    {
        match self {
            Value::Null => Ok(Vec::new()),
            Value::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok((K::try_from(k)?, V::try_from(v)?)))
                .collect(),
            other => Err(other.mismatch("Map")),
        }
    }

    fn into_elements(self) -> Vec<Value> {
        match self {
            Value::Null => Vec::new(),
            Value::Collection(items) => items,
            other => vec![other],
        }
    }

    pub(crate) fn mismatch(&self, expected: &str) -> MappingError {
        MappingError::TypeMismatch {
            expected: expected.to_string(),
            found: self.type_name().to_string(),
        }
    }
}

fn special_float(v: f64) -> Option<&'static str> {
    if v.is_nan() {
        Some("NaN")
    } else if v == f64::INFINITY {
        Some("INF")
    } else if v == f64::NEG_INFINITY {
        Some("-INF")
    } else {
        None
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Uri(a), Value::Uri(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Collection(a), Value::Collection(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => (**a).eq_entity(&**b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Collection(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, val)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", key, val)?;
                }
                write!(f, "}}")
            }
            Value::Object(entity) => write!(f, "{:?}", entity),
            scalar => write!(f, "{}", scalar.lexical().unwrap_or_default()),
        }
    }
}

// Convenience conversions
macro_rules! value_from {
    ($source:ty, $variant:ident) => {
        impl From<$source> for Value {
            fn from(v: $source) -> Self {
                Value::$variant(v)
            }
        }
    };
}

value_from!(bool, Bool);
value_from!(i8, Byte);
value_from!(i16, Short);
value_from!(i32, Int);
value_from!(i64, Long);
value_from!(f32, Float);
value_from!(f64, Double);
value_from!(char, Char);
value_from!(String, String);
value_from!(DateTime<FixedOffset>, DateTime);
value_from!(EnumMember, Enum);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt.fixed_offset())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Collection(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeSet<T>> for Value {
    fn from(items: BTreeSet<T>) -> Self {
        Value::Collection(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<HashSet<T>> for Value {
    fn from(items: HashSet<T>) -> Self {
        Value::Collection(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<IndexSet<T>> for Value {
    fn from(items: IndexSet<T>) -> Self {
        Value::Collection(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(map: HashMap<K, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>> From<IndexMap<K, V>> for Value {
    fn from(map: IndexMap<K, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// Conversions back, widening integers and floats where lossless
macro_rules! value_try_into {
    ($target:ty, $name:literal, $($variant:ident),+) => {
        impl TryFrom<Value> for $target {
            type Error = MappingError;

            fn try_from(value: Value) -> MappingResult<Self> {
                match value {
                    $(Value::$variant(v) => Ok(v.into()),)+
                    other => Err(other.mismatch($name)),
                }
            }
        }
    };
}

value_try_into!(bool, "bool", Bool);
value_try_into!(i8, "i8", Byte);
value_try_into!(i16, "i16", Byte, Short);
value_try_into!(i32, "i32", Byte, Short, Int);
value_try_into!(i64, "i64", Byte, Short, Int, Long);
value_try_into!(f32, "f32", Float);
value_try_into!(f64, "f64", Float, Double);
value_try_into!(char, "char", Char);
value_try_into!(String, "String", String, Uri);
value_try_into!(DateTime<FixedOffset>, "DateTime", DateTime);

impl TryFrom<Value> for DateTime<Utc> {
    type Error = MappingError;

    fn try_from(value: Value) -> MappingResult<Self> {
        match value {
            Value::DateTime(dt) => Ok(dt.with_timezone(&Utc)),
            other => Err(other.mismatch("DateTime")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Point {
        x: i32,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Size {
        Small,
        Large,
    }

    impl RdfEnum for Size {
        const MEMBERS: &'static [EnumMember] = &[
            EnumMember::new("Small"),
            EnumMember::with_iri("Large", "http://example.org/large"),
        ];

        fn ordinal(&self) -> usize {
            *self as usize
        }

        fn from_ordinal(ordinal: usize) -> Option<Self> {
            [Size::Small, Size::Large].get(ordinal).copied()
        }
    }

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Value::from(30), Value::Int(30));
        assert_eq!(Value::from("Ada"), Value::String("Ada".to_string()));
        assert_eq!(Value::from(None::<i32>), Value::Null);

        let wide: i64 = Value::Int(30).try_into().unwrap();
        assert_eq!(wide, 30);
        let wide: f64 = Value::Float(1.5).try_into().unwrap();
        assert_eq!(wide, 1.5);

        let narrow: MappingResult<i32> = Value::Long(30).try_into();
        assert!(narrow.is_err());

        let nick: Option<String> = Value::Null.into_option().unwrap();
        assert_eq!(nick, None);
    }

    #[test]
    fn test_lexical_forms() {
        assert_eq!(Value::Double(f64::INFINITY).lexical().unwrap(), "INF");
        assert_eq!(Value::Float(f32::NEG_INFINITY).lexical().unwrap(), "-INF");
        assert_eq!(Value::Double(f64::NAN).lexical().unwrap(), "NaN");
        assert_eq!(Value::Float(1.5).lexical().unwrap(), "1.5");

        let dt = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z").unwrap();
        assert_eq!(Value::DateTime(dt).lexical().unwrap(), "2024-01-02T03:04:05Z");

        let dt = DateTime::parse_from_rfc3339("2024-01-02T03:04:05.123456789+02:00").unwrap();
        assert_eq!(
            Value::DateTime(dt).lexical().unwrap(),
            "2024-01-02T03:04:05.123456789+02:00"
        );

        assert_eq!(Value::Null.lexical(), None);
    }

    #[test]
    fn test_entities() {
        let value = Value::object(Point { x: 1 });
        assert_eq!(value.clone(), Value::object(Point { x: 1 }));
        assert_ne!(value, Value::object(Point { x: 2 }));
        assert_eq!(value.class_id(), Some(ClassId::of::<Point>()));
        assert_eq!(value.as_entity::<Point>(), Some(&Point { x: 1 }));

        let point: Point = value.into_entity().unwrap();
        assert_eq!(point, Point { x: 1 });

        assert!(Value::object(Point { x: 1 }).into_entity::<String>().is_err());
    }

    #[test]
    fn test_enums() {
        let value = Size::Large.to_value();
        assert_eq!(value, Value::Enum(Size::MEMBERS[1]));
        assert_eq!(value.into_enum::<Size>().unwrap(), Size::Large);

        let unknown = Value::Enum(EnumMember::new("Medium"));
        assert!(matches!(
            unknown.into_enum::<Size>(),
            Err(MappingError::EnumMismatch(_))
        ));
    }

    #[test]
    fn test_collections() {
        let value = Value::from(vec!["a", "b"]);
        let items: Vec<String> = value.into_vec().unwrap();
        assert_eq!(items, vec!["a".to_string(), "b".to_string()]);

        let single: Vec<i32> = Value::Int(7).into_vec().unwrap();
        assert_eq!(single, vec![7]);

        let mut map = IndexMap::new();
        map.insert("bob", "tester");
        let pairs: Vec<(String, String)> = Value::from(map).into_pairs().unwrap();
        assert_eq!(pairs, vec![("bob".to_string(), "tester".to_string())]);

        let points = Value::Collection(vec![
            Value::object(Point { x: 1 }),
            Value::object(Point { x: 2 }),
        ]);
        let points: Vec<Point> = points.into_entities().unwrap();
        assert_eq!(points, vec![Point { x: 1 }, Point { x: 2 }]);

        let sizes = Value::Collection(vec![Size::Large.to_value(), Size::Small.to_value()]);
        assert_eq!(sizes.into_enums::<Size>().unwrap(), vec![Size::Large, Size::Small]);
        assert!(Value::Null.into_enums::<Size>().unwrap().is_empty());
    }

    #[test]
    fn test_container_types() {
        let list = ValueType::list_of(ValueType::Int);
        assert!(list.is_collection());
        assert!(!list.is_map());

        let map = ValueType::map_of(ValueType::String, ValueType::object::<Point>());
        assert!(map.is_map());
        assert!(!map.is_collection());
        assert!(!ValueType::String.is_collection());
    }

    #[test]
    fn test_class_id_names() {
        let id = ClassId::of::<Point>();
        assert_eq!(id.short_name(), "Point");
        assert_eq!(ClassId::of::<dyn std::fmt::Debug>(), ClassId::of::<dyn std::fmt::Debug>());
        assert_ne!(id, ClassId::of::<String>());
    }
}

//! Containers built while decoding collection and map properties

use super::value::{ContainerKind, Value};
use std::cmp::Ordering;

/// Builds the value of a decoded collection property
pub trait CollectionFactory: Send + Sync {
    fn create(&self, kind: ContainerKind, elements: Vec<Value>) -> Value;
}

/// Builds the value of a decoded map property
pub trait MapFactory: Send + Sync {
    fn create(&self, entries: Vec<(Value, Value)>) -> Value;
}

/// Applies [`ContainerKind`] semantics
///
/// - `List` keeps every element in order
/// - `Set` drops repeats, keeping first occurrences in order
/// - `SortedSet` drops repeats and sorts by [`natural_order`]
///
/// Repeats are found by pairwise comparison, quadratic in the number of
/// elements. `Value` has no hash, and decoded containers are small.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCollectionFactory;

impl CollectionFactory for DefaultCollectionFactory {
    fn create(&self, kind: ContainerKind, elements: Vec<Value>) -> Value {
        match kind {
            ContainerKind::List => Value::Collection(elements),
            ContainerKind::Set => Value::Collection(dedupe(elements)),
            ContainerKind::SortedSet => {
                let mut unique = dedupe(elements);
                unique.sort_by(natural_order);
                Value::Collection(unique)
            }
        }
    }
}

/// Insertion-ordered map; a repeated key overwrites the earlier value in place
///
/// Keys are looked up by scanning the entries so far, like the repeats of
/// [`DefaultCollectionFactory`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMapFactory;

impl MapFactory for DefaultMapFactory {
    fn create(&self, entries: Vec<(Value, Value)>) -> Value {
        let mut map: Vec<(Value, Value)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match map.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => map.push((key, value)),
            }
        }
        Value::Map(map)
    }
}

fn dedupe(elements: Vec<Value>) -> Vec<Value> {
    let mut unique: Vec<Value> = Vec::with_capacity(elements.len());
    for element in elements {
        if !unique.contains(&element) {
            unique.push(element);
        }
    }
    unique
}

/// Natural order of values
///
/// Numbers compare numerically, text lexically, date-times chronologically.
/// Values of unrelated kinds fall back to comparing their rendered form.
pub fn natural_order(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::Char(x), Value::Char(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) | (Value::Uri(x), Value::Uri(y)) => x.cmp(y),
        _ => match (as_integer(a), as_integer(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => match (as_number(a), as_number(b)) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => a.to_string().cmp(&b.to_string()),
            },
        },
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Byte(i) => Some(i64::from(*i)),
        Value::Short(i) => Some(i64::from(*i)),
        Value::Int(i) => Some(i64::from(*i)),
        Value::Long(i) => Some(*i),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(f64::from(*f)),
        Value::Double(f) => Some(*f),
        other => as_integer(other).map(|i| i as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| Value::from(*s)).collect()
    }

    #[test]
    fn test_container_kinds() {
        let factory = DefaultCollectionFactory;
        let input = strings(&["b", "a", "b"]);

        assert_eq!(
            factory.create(ContainerKind::List, input.clone()),
            Value::Collection(strings(&["b", "a", "b"]))
        );
        assert_eq!(
            factory.create(ContainerKind::Set, input.clone()),
            Value::Collection(strings(&["b", "a"]))
        );
        assert_eq!(
            factory.create(ContainerKind::SortedSet, input),
            Value::Collection(strings(&["a", "b"]))
        );
    }

    #[test]
    fn test_numeric_order() {
        let factory = DefaultCollectionFactory;
        let sorted = factory.create(
            ContainerKind::SortedSet,
            vec![Value::Int(10), Value::Long(2), Value::Double(3.5)],
        );
        assert_eq!(
            sorted,
            Value::Collection(vec![Value::Long(2), Value::Double(3.5), Value::Int(10)])
        );
    }

    #[test]
    fn test_map_overwrites_in_place() {
        let map = DefaultMapFactory.create(vec![
            (Value::from("a"), Value::Int(1)),
            (Value::from("b"), Value::Int(2)),
            (Value::from("a"), Value::Int(3)),
        ]);
        assert_eq!(
            map,
            Value::Map(vec![
                (Value::from("a"), Value::Int(3)),
                (Value::from("b"), Value::Int(2)),
            ])
        );
    }
}

//! Well-known vocabulary terms used by the graph and the mapper

use super::types::{NamedNode, RdfPredicate};
use oxrdf::vocab::rdf;

/// Default namespace for predicates, identities and enum values
pub const DEFAULT_NAMESPACE: &str = "urn:samyama:mapper:";

/// Predicate linking a map node to each of its entries
pub const MAP_ENTRY: &str = "urn:samyama:mapper:_entry";

/// Predicate carrying a map entry's key
pub const MAP_KEY: &str = "urn:samyama:mapper:_key";

/// Predicate carrying a map entry's value
pub const MAP_VALUE: &str = "urn:samyama:mapper:_value";

pub fn rdf_type() -> RdfPredicate {
    rdf::TYPE.into()
}

pub fn rdf_first() -> RdfPredicate {
    rdf::FIRST.into()
}

pub fn rdf_rest() -> RdfPredicate {
    rdf::REST.into()
}

pub fn rdf_nil() -> NamedNode {
    rdf::NIL.into()
}

pub(crate) fn map_entry() -> RdfPredicate {
    fixed_predicate(MAP_ENTRY)
}

pub(crate) fn map_key() -> RdfPredicate {
    fixed_predicate(MAP_KEY)
}

pub(crate) fn map_value() -> RdfPredicate {
    fixed_predicate(MAP_VALUE)
}

fn fixed_predicate(iri: &str) -> RdfPredicate {
    RdfPredicate::from(NamedNode::from(oxrdf::NamedNode::new_unchecked(iri)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_predicates_are_valid_iris() {
        for iri in [MAP_ENTRY, MAP_KEY, MAP_VALUE, DEFAULT_NAMESPACE] {
            assert!(NamedNode::new(iri).is_ok(), "{} should be a valid IRI", iri);
        }
        assert_eq!(map_key().as_str(), MAP_KEY);
    }
}

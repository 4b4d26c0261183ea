//! Object → graph
//!
//! One [`Encoder`] lives for a single top-level encode call. It walks the
//! object depth first and unions every subgraph into the caller's graph.
//! Objects whose identity was already emitted during the call are referenced
//! but not written again, which also stops reference cycles.
//!
//! Every object whose schema stores its identity and has none yet gets the
//! resolved one written back, nested objects included. A nested object is
//! reached through a cloned property value, so the updated value is handed
//! back to the parent through the property setter.

use super::error::{MappingError, MappingResult};
use super::literal::to_literal;
use super::property::ResolvedProperty;
use super::schema::Schema;
use super::value::{EnumMember, Entity, Value};
use super::RdfMapper;
use crate::rdf::{join, vocab, BlankNode, Graph, NamedNode, RdfObject, RdfSubject};
use std::collections::HashSet;
use tracing::{debug, info};

pub(crate) struct Encoder<'m, 'g> {
    mapper: &'m RdfMapper,
    graph: &'g mut Graph,
    visited: HashSet<RdfSubject>,
    /// Identities written back so far
    assigned: usize,
}

impl<'m, 'g> Encoder<'m, 'g> {
    pub(crate) fn new(mapper: &'m RdfMapper, graph: &'g mut Graph) -> Self {
        Self {
            mapper,
            graph,
            visited: HashSet::new(),
            assigned: 0,
        }
    }

    /// Write an object and return the node standing for it
    pub(crate) fn write_entity(&mut self, entity: &mut dyn Entity) -> MappingResult<RdfSubject> {
        let mapper = self.mapper;
        let class = entity.class_id();

        if let Some(codec) = mapper.codecs.get(class) {
            debug!("Encoding {} with its codec", class);
            return codec.encode(&*entity, self.graph);
        }

        let schema = mapper
            .registry
            .schema(class)
            .ok_or_else(|| MappingError::UnknownClass(class.name().to_string()))?;

        let id = mapper.identity.resolve(&*entity, Some(schema), &mapper.registry)?;
        self.store_identity(schema, entity, &id);

        if !self.visited.insert(id.clone()) {
            debug!("{} was already written, referencing it", id);
            return Ok(id);
        }

        if let Some(rdf_type) = mapper.registry.type_for(class)? {
            self.graph.add(id.clone(), vocab::rdf_type(), rdf_type);
        }

        for descriptor in schema.properties() {
            let Some(property) = mapper.properties.resolve(descriptor)? else {
                continue;
            };

            let mut value = descriptor.get(&*entity)?;
            if value.is_null() {
                continue;
            }

            let assigned = self.assigned;
            self.write_property(&id, &property, &mut value)?;
            if self.assigned > assigned {
                descriptor.set(entity, value)?;
            }
        }

        Ok(id)
    }

    fn store_identity(&mut self, schema: &Schema, entity: &mut dyn Entity, id: &RdfSubject) {
        if schema.stores_identity() && schema.identity_of(&*entity).is_none() {
            schema.set_identity(entity, id.clone());
            self.assigned += 1;
        }
    }

    fn write_property(
        &mut self,
        subject: &RdfSubject,
        property: &ResolvedProperty,
        value: &mut Value,
    ) -> MappingResult<()> {
        match value {
            Value::Collection(items) => {
                if items.iter().any(|item| matches!(item, Value::Map(_))) {
                    return Err(MappingError::UnsupportedValue(format!(
                        "a map nested in a collection in property {}",
                        property.predicate
                    )));
                }

                let mut nodes = Vec::with_capacity(items.len());
                for item in items.iter_mut() {
                    if let Some(node) = self.term_for(item, property)? {
                        nodes.push(node);
                    }
                }

                if !property.as_list {
                    for node in nodes {
                        self.graph.add(subject.clone(), property.predicate.clone(), node);
                    }
                } else if !nodes.is_empty() {
                    let head = self.graph.add_list(nodes);
                    self.graph.add(subject.clone(), property.predicate.clone(), head);
                }
            }
            other => {
                if let Some(node) = self.term_for(other, property)? {
                    self.graph.add(subject.clone(), property.predicate.clone(), node);
                }
            }
        }
        Ok(())
    }

    /// The graph term for a single value; `None` when nothing is written
    fn term_for(&mut self, value: &mut Value, property: &ResolvedProperty) -> MappingResult<Option<RdfObject>> {
        match value {
            Value::Null => Ok(None),
            Value::Enum(member) => Ok(self.enum_iri(member)?.map(RdfObject::from)),
            Value::Object(entity) => Ok(Some(self.write_entity(&mut **entity)?.into())),
            Value::Map(entries) => Ok(self.write_map(entries)?.map(RdfObject::from)),
            Value::Collection(_) => Err(MappingError::UnsupportedValue(format!(
                "a collection nested in property {}",
                property.predicate
            ))),
            scalar => {
                let literal = to_literal(
                    scalar,
                    property.datatype.as_ref(),
                    property.language.as_deref(),
                )?;
                Ok(Some(literal.into()))
            }
        }
    }

    /// One blank map node, one blank entry node per key/value pair
    fn write_map(&mut self, entries: &mut [(Value, Value)]) -> MappingResult<Option<RdfSubject>> {
        if entries.is_empty() {
            return Ok(None);
        }

        let as_list = self.mapper.options.serialize_collections_as_lists;
        let key = ResolvedProperty {
            predicate: vocab::map_key(),
            datatype: None,
            language: None,
            as_list,
        };
        let val = ResolvedProperty {
            predicate: vocab::map_value(),
            ..key.clone()
        };

        let map_node: RdfSubject = BlankNode::new().into();
        for (k, v) in entries.iter_mut() {
            if matches!(k, Value::Map(_)) || matches!(v, Value::Map(_)) {
                return Err(MappingError::UnsupportedValue(
                    "a map nested in a map".to_string(),
                ));
            }

            let entry: RdfSubject = BlankNode::new().into();
            self.write_property(&entry, &key, k)?;
            self.write_property(&entry, &val, v)?;
            self.graph.add(map_node.clone(), vocab::map_entry(), entry);
        }

        Ok(Some(map_node))
    }

    fn enum_iri(&self, member: &EnumMember) -> MappingResult<Option<NamedNode>> {
        match member.iri {
            Some(hint) => self.mapper.properties.iri(hint, member.name),
            None => {
                let iri = join(self.mapper.properties.namespaces().default_namespace(), member.name);
                match NamedNode::new(&iri) {
                    Ok(node) => Ok(Some(node)),
                    Err(_) if self.mapper.options.ignore_invalid_annotations => {
                        info!("Enum value {} does not form a valid uri, ignoring it", member.name);
                        Ok(None)
                    }
                    Err(_) => Err(MappingError::InvalidIri(iri)),
                }
            }
        }
    }
}

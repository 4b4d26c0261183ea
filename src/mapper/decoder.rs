//! Graph → object
//!
//! One [`Decoder`] lives for a single top-level decode call. For every
//! writable property of the target schema it gathers the objects asserted
//! for the property's predicate and converts them according to the declared
//! [`ValueType`]. Nodes already being decoded further up the call stack are
//! refused, so cyclic data fails instead of recursing forever.

use super::error::{MappingError, MappingResult};
use super::literal::from_literal;
use super::schema::PropertyDescriptor;
use super::value::{ClassId, Entity, EnumMember, Value, ValueType};
use super::RdfMapper;
use crate::rdf::{vocab, Graph, NamedNode, RdfObject, RdfSubject};
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub(crate) struct Decoder<'m, 'g> {
    mapper: &'m RdfMapper,
    graph: &'g Graph,
    in_progress: HashSet<RdfSubject>,
}

impl<'m, 'g> Decoder<'m, 'g> {
    pub(crate) fn new(mapper: &'m RdfMapper, graph: &'g Graph) -> Self {
        Self {
            mapper,
            graph,
            in_progress: HashSet::new(),
        }
    }

    /// Decode `node` as an instance of `class`, through its codec if it has one
    ///
    /// `Ok(None)` only comes from a codec that found incomplete data.
    pub(crate) fn read_class(
        &mut self,
        class: ClassId,
        node: &RdfSubject,
    ) -> MappingResult<Option<Box<dyn Entity>>> {
        if let Some(codec) = self.mapper.codecs.get(class) {
            debug!("Decoding {} as {} with its codec", node, class);
            return codec.decode(self.graph, node);
        }
        self.read_entity(class, node).map(Some)
    }

    /// Structural decode of `node` into a fresh instance of `class`
    pub(crate) fn read_entity(
        &mut self,
        class: ClassId,
        node: &RdfSubject,
    ) -> MappingResult<Box<dyn Entity>> {
        let mapper = self.mapper;
        let schema = mapper
            .registry
            .schema(class)
            .ok_or_else(|| MappingError::UnknownClass(class.name().to_string()))?;

        if !self.in_progress.insert(node.clone()) {
            return Err(MappingError::Construction {
                class: class.name().to_string(),
                reason: format!("{} refers back to itself", node),
            });
        }

        let mut instance = schema.instantiate()?;

        for descriptor in schema.properties() {
            if !descriptor.is_writable() {
                continue;
            }

            let Some(predicate) = mapper.properties.predicate(descriptor)? else {
                continue;
            };

            let values: Vec<RdfObject> = self
                .graph
                .objects(node, &predicate)
                .into_iter()
                .cloned()
                .collect();

            if values.is_empty() {
                continue;
            }

            if let Some(value) = self.read_property(descriptor, values)? {
                descriptor.set(instance.as_mut(), value)?;
            }
        }

        schema.set_identity(instance.as_mut(), node.clone());
        schema.set_source_graph(instance.as_mut(), self.graph);

        self.in_progress.remove(node);
        Ok(instance)
    }

    fn read_property(
        &mut self,
        descriptor: &PropertyDescriptor,
        values: Vec<RdfObject>,
    ) -> MappingResult<Option<Value>> {
        match descriptor.value_type() {
            ValueType::Collection(kind, element) => {
                // list heads and plain multi-valued assertions may be mixed
                let mut flattened = Vec::with_capacity(values.len());
                for value in values {
                    match value.as_subject() {
                        Some(head) if self.graph.is_list(&head) => {
                            flattened.extend(self.graph.list_items(&head))
                        }
                        _ => flattened.push(value),
                    }
                }

                let mut elements = Vec::with_capacity(flattened.len());
                for value in &flattened {
                    if let Some(element) = self.read_value(value, element)? {
                        elements.push(element);
                    }
                }

                Ok(Some(self.mapper.collections.create(*kind, elements)))
            }
            ValueType::Map(key, value) => {
                let first = self.single(descriptor, values)?;
                self.read_map(&first, key, value).map(Some)
            }
            target => {
                let first = self.single(descriptor, values)?;
                self.read_value(&first, target)
            }
        }
    }

    /// The one value of a single-valued property
    ///
    /// With `ignore_cardinality_violations`, the first asserted value is kept.
    /// The graph promises no order, so which value that is is best effort.
    fn single(&self, descriptor: &PropertyDescriptor, mut values: Vec<RdfObject>) -> MappingResult<RdfObject> {
        if values.len() > 1 {
            if !self.mapper.options.ignore_cardinality_violations {
                return Err(MappingError::CardinalityViolation {
                    property: descriptor.name().to_string(),
                    count: values.len(),
                });
            }
            warn!(
                "{} values found for {}, only one was expected, keeping the first",
                values.len(),
                descriptor.name()
            );
        }
        Ok(values.swap_remove(0))
    }

    fn read_map(
        &mut self,
        map: &RdfObject,
        key_type: &ValueType,
        value_type: &ValueType,
    ) -> MappingResult<Value> {
        let Some(map_node) = map.as_subject() else {
            return Err(MappingError::TypeMismatch {
                expected: "a map node".to_string(),
                found: map.to_string(),
            });
        };

        let entries: Vec<RdfObject> = self
            .graph
            .objects(&map_node, &vocab::map_entry())
            .into_iter()
            .cloned()
            .collect();

        let mut pairs = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(entry) = entry.as_subject() else {
                warn!("Skipping map entry {}, it is not a node", entry);
                continue;
            };

            let key = self.graph.object(&entry, &vocab::map_key()).cloned();
            let value = self.graph.object(&entry, &vocab::map_value()).cloned();

            let key = match key {
                Some(key) => self.read_value(&key, key_type)?,
                None => None,
            };
            let value = match value {
                Some(value) => self.read_value(&value, value_type)?,
                None => None,
            };

            match (key, value) {
                (Some(key), Some(value)) => pairs.push((key, value)),
                _ => warn!("Skipping map entry {}, key or value could not be created", entry),
            }
        }

        Ok(self.mapper.maps.create(pairs))
    }

    /// Convert one graph term to a value of the declared type
    ///
    /// `Ok(None)` drops the value: an unmatched enum IRI, an invalid URI
    /// literal, a node of unknown class or a codec without data.
    fn read_value(&mut self, value: &RdfObject, target: &ValueType) -> MappingResult<Option<Value>> {
        let node = match value {
            RdfObject::Literal(literal) => return from_literal(literal, target),
            RdfObject::NamedNode(n) => RdfSubject::NamedNode(n.clone()),
            RdfObject::BlankNode(b) => RdfSubject::BlankNode(b.clone()),
        };

        let declared = match target {
            ValueType::Enum(members) => return Ok(self.read_enum(&node, members)),
            ValueType::Uri => {
                return Ok(node.as_named_node().map(|n| Value::Uri(n.as_str().to_string())))
            }
            ValueType::Object(class) => *class,
            ValueType::Any => match self.mapper.registry.class_from_types(self.graph, &node) {
                Some(class) => class,
                None => {
                    warn!("No mapped class found among the types of {}, skipping it", node);
                    return Ok(None);
                }
            },
            other => {
                return Err(MappingError::TypeMismatch {
                    expected: format!("{:?}", other),
                    found: node.to_string(),
                })
            }
        };

        let class = self.mapper.registry.pinpoint(self.graph, &node, declared);
        Ok(self.read_class(class, &node)?.map(Value::Object))
    }

    fn read_enum(&self, node: &RdfSubject, members: &[EnumMember]) -> Option<Value> {
        let Some(iri) = node.as_named_node() else {
            info!("{} is not an IRI and cannot map to an enum value", node);
            return None;
        };

        if let Some(member) = members.iter().find(|m| m.name == iri.local_name()) {
            return Some(Value::Enum(*member));
        }

        let hinted = members.iter().find(|m| {
            m.iri
                .map(|hint| self.mapper.properties.namespaces().resolve(hint))
                .and_then(|hint| NamedNode::new(&hint).ok())
                .map_or(false, |hint| &hint == iri)
        });

        match hinted {
            Some(member) => Some(Value::Enum(*member)),
            None => {
                info!(
                    "{} maps to an enum, but does not correspond to any of its values",
                    iri
                );
                None
            }
        }
    }
}

//! Type IRI ↔ class registry

use super::error::{ConfigError, ConfigResult, MappingError, MappingResult};
use super::options::MappingOptions;
use super::schema::Schema;
use super::value::ClassId;
use crate::rdf::{Graph, NamedNode, NamespaceManager, RdfSubject};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Bidirectional map between type IRIs and classes, plus the registered schemas
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    schemas: HashMap<ClassId, Schema>,
    class_to_type: HashMap<ClassId, NamedNode>,
    type_to_class: IndexMap<NamedNode, ClassId>,
    options: MappingOptions,
    namespaces: NamespaceManager,
}

impl TypeRegistry {
    /// Build the registry from explicit mappings and schemas
    ///
    /// Explicit mappings are unique per IRI and per class. A schema's type hint
    /// becomes a reverse mapping too, unless its IRI is explicitly mapped or is
    /// not a valid IRI.
    pub fn new(
        mappings: Vec<(String, ClassId)>,
        schemas: Vec<Schema>,
        namespaces: NamespaceManager,
        options: MappingOptions,
    ) -> ConfigResult<Self> {
        let mut registry = Self {
            schemas: HashMap::new(),
            class_to_type: HashMap::new(),
            type_to_class: IndexMap::new(),
            options,
            namespaces,
        };

        for schema in schemas {
            if registry.schemas.contains_key(&schema.class()) {
                return Err(ConfigError::DuplicateSchema(schema.class().name().to_string()));
            }
            registry.schemas.insert(schema.class(), schema);
        }

        for (iri, class) in mappings {
            let resolved = registry.namespaces.resolve(&iri);
            let node = NamedNode::new(&resolved).map_err(|_| ConfigError::InvalidIri(resolved.clone()))?;
            registry.map(node, class)?;
        }

        let mut hinted: Vec<(&ClassId, &Schema)> = registry.schemas.iter().collect();
        hinted.sort_by_key(|(class, _)| class.name());
        let hints: Vec<(NamedNode, ClassId)> = hinted
            .into_iter()
            .filter_map(|(class, schema)| {
                let iri = registry.namespaces.resolve(schema.rdfs_class()?);
                NamedNode::new(&iri).ok().map(|node| (node, *class))
            })
            .collect();

        for (node, class) in hints {
            if !registry.type_to_class.contains_key(&node) {
                registry.type_to_class.insert(node, class);
            }
        }

        Ok(registry)
    }

    fn map(&mut self, node: NamedNode, class: ClassId) -> ConfigResult<()> {
        if let Some(existing) = self.type_to_class.get(&node) {
            return Err(ConfigError::DuplicateMapping {
                iri: node.as_str().to_string(),
                existing: existing.name().to_string(),
                requested: class.name().to_string(),
            });
        }
        if let Some(existing) = self.class_to_type.get(&class) {
            return Err(ConfigError::DuplicateMapping {
                iri: existing.as_str().to_string(),
                existing: class.name().to_string(),
                requested: node.as_str().to_string(),
            });
        }

        self.class_to_type.insert(class, node.clone());
        self.type_to_class.insert(node, class);
        Ok(())
    }

    pub fn schema(&self, class: ClassId) -> Option<&Schema> {
        self.schemas.get(&class)
    }

    /// Type IRI asserted for instances of `class`
    ///
    /// Explicit mappings come first, then the schema's type hint. An invalid
    /// hint yields `None` when invalid annotations are ignored.
    pub fn type_for(&self, class: ClassId) -> MappingResult<Option<NamedNode>> {
        if let Some(node) = self.class_to_type.get(&class) {
            return Ok(Some(node.clone()));
        }

        let Some(hint) = self.schema(class).and_then(Schema::rdfs_class) else {
            return Ok(None);
        };

        let iri = self.namespaces.resolve(hint);
        match NamedNode::new(&iri) {
            Ok(node) => Ok(Some(node)),
            Err(_) if self.options.ignore_invalid_annotations => {
                info!("An invalid uri \"{}\" was used as the type of {}, ignoring it", iri, class);
                Ok(None)
            }
            Err(_) => Err(MappingError::InvalidIri(iri)),
        }
    }

    /// Class mapped to a type IRI
    pub fn class_for(&self, node: &NamedNode) -> Option<ClassId> {
        self.type_to_class.get(node).copied()
    }

    /// First mapped class among the node's asserted types
    pub fn class_from_types(&self, graph: &Graph, node: &RdfSubject) -> Option<ClassId> {
        graph.types_of(node).iter().find_map(|t| self.class_for(t))
    }

    /// Whether `class` is `target` or declares it as a (transitive) supertype
    pub fn is_assignable(&self, class: ClassId, target: ClassId) -> bool {
        let mut pending = vec![class];
        let mut seen = HashSet::new();

        while let Some(current) = pending.pop() {
            if current == target {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(schema) = self.schema(current) {
                pending.extend(schema.supertypes().iter().copied());
            }
        }

        false
    }

    /// Whether decoding can construct `class` directly
    pub fn is_instantiable(&self, class: ClassId) -> bool {
        self.schema(class).map_or(false, Schema::is_instantiable)
    }

    /// Class to decode `node` into when the declared type is `declared`
    ///
    /// A constructible declared class is used as is. Otherwise the node's
    /// asserted types are scanned for mapped classes, keeping the most specific
    /// one seen; without any, the declared class is returned and construction
    /// may fail later.
    pub fn pinpoint(&self, graph: &Graph, node: &RdfSubject, declared: ClassId) -> ClassId {
        if self.is_instantiable(declared) {
            return declared;
        }

        let mut current: Option<ClassId> = None;
        for node_type in graph.types_of(node) {
            let Some(mapped) = self.class_for(&node_type) else {
                continue;
            };
            current = match current {
                None => Some(mapped),
                Some(existing) if self.is_assignable(mapped, existing) => Some(mapped),
                keep => keep,
            };
        }

        match current {
            Some(class) => {
                debug!("Resolved {} to {} for {}", declared, class, node);
                class
            }
            None => declared,
        }
    }
}

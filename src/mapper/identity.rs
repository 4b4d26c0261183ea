//! Identity resolution
//!
//! Resolution order, first match wins:
//! 1. the identity stored on the instance
//! 2. a hash of the identity properties, sorted by name
//! 3. an id function registered for the instance's class or a supertype
//! 4. `UnidentifiableObject` when `require_ids` is set
//! 5. a hash of the instance's `Debug` rendering

use super::error::{MappingError, MappingResult};
use super::registry::TypeRegistry;
use super::schema::Schema;
use super::value::{ClassId, Entity};
use crate::rdf::{NamedNode, RdfSubject};
use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Externally supplied identity; `None` defers to the next source
pub type IdFunction = Arc<dyn Fn(&dyn Entity) -> Option<RdfSubject> + Send + Sync>;

/// Computes graph identities for instances
#[derive(Clone)]
pub struct IdentityResolver {
    default_namespace: String,
    require_ids: bool,
    id_functions: IndexMap<ClassId, IdFunction>,
}

impl IdentityResolver {
    pub fn new(
        default_namespace: impl Into<String>,
        require_ids: bool,
        id_functions: IndexMap<ClassId, IdFunction>,
    ) -> Self {
        Self {
            default_namespace: default_namespace.into(),
            require_ids,
            id_functions,
        }
    }

    /// Resolve the identity of `entity`
    pub fn resolve(
        &self,
        entity: &dyn Entity,
        schema: Option<&Schema>,
        registry: &TypeRegistry,
    ) -> MappingResult<RdfSubject> {
        if let Some(id) = schema.and_then(|s| s.identity_of(entity)) {
            return Ok(id);
        }

        if let Some(schema) = schema {
            let props = schema.identity_properties();
            if !props.is_empty() {
                let mut hasher = Sha256::new();
                for prop in props {
                    let value = prop.get(entity)?;
                    if value.is_null() {
                        continue;
                    }
                    hasher.update(value.to_string().as_bytes());
                }
                return self.hashed(hasher);
            }
        }

        let class = entity.class_id();
        for (target, function) in &self.id_functions {
            if registry.is_assignable(class, *target) {
                if let Some(id) = function(entity) {
                    return Ok(id);
                }
            }
        }

        if self.require_ids {
            return Err(MappingError::UnidentifiableObject(format!(
                "{}. The class should store its identity, declare identity properties, \
                 or have an id function provided to the mapper",
                class
            )));
        }

        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", entity).as_bytes());
        self.hashed(hasher)
    }

    fn hashed(&self, hasher: Sha256) -> MappingResult<RdfSubject> {
        let iri = format!("{}{:x}", self.default_namespace, hasher.finalize());
        Ok(NamedNode::new(&iri)?.into())
    }
}

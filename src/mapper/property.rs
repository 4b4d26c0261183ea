//! Property to predicate correspondence

use super::error::{MappingError, MappingResult};
use super::options::MappingOptions;
use super::schema::PropertyDescriptor;
use crate::rdf::{Literal, NamedNode, NamespaceManager, RdfPredicate};
use tracing::info;

/// A property's hints, resolved against the mapper's namespaces
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProperty {
    pub predicate: RdfPredicate,
    pub datatype: Option<NamedNode>,
    pub language: Option<String>,
    pub as_list: bool,
}

/// Resolves property descriptors to predicates and serialization hints
#[derive(Debug, Clone)]
pub struct PropertyMapper {
    namespaces: NamespaceManager,
    options: MappingOptions,
}

impl PropertyMapper {
    pub fn new(namespaces: NamespaceManager, options: MappingOptions) -> Self {
        Self {
            namespaces,
            options,
        }
    }

    pub fn namespaces(&self) -> &NamespaceManager {
        &self.namespaces
    }

    /// Predicate for a property: its hint, or the default namespace + name
    ///
    /// `Ok(None)` means the property is dropped because its predicate is not
    /// a valid IRI and invalid annotations are ignored.
    pub fn predicate(&self, descriptor: &PropertyDescriptor) -> MappingResult<Option<RdfPredicate>> {
        let iri = match &descriptor.hints().predicate {
            Some(hint) if !hint.is_empty() => self.namespaces.resolve(hint),
            _ => format!("{}{}", self.namespaces.default_namespace(), descriptor.name()),
        };
        Ok(self.checked(&iri, descriptor.name())?.map(RdfPredicate::from))
    }

    /// Predicate plus datatype, language and list hints
    pub fn resolve(&self, descriptor: &PropertyDescriptor) -> MappingResult<Option<ResolvedProperty>> {
        let Some(predicate) = self.predicate(descriptor)? else {
            return Ok(None);
        };

        let hints = descriptor.hints();

        let datatype = match hints.datatype.as_deref().filter(|d| !d.is_empty()) {
            Some(hint) => match self.checked(&self.namespaces.resolve(hint), descriptor.name())? {
                Some(datatype) => Some(datatype),
                None => return Ok(None),
            },
            None => None,
        };

        let language = match hints.language.as_deref().filter(|l| !l.is_empty()) {
            Some(tag) => {
                if Literal::new_language_tagged_literal("", tag).is_err() {
                    let msg = format!(
                        "An invalid language tag \"{}\" was used, ignoring property {}",
                        tag,
                        descriptor.name()
                    );
                    if self.options.ignore_invalid_annotations {
                        info!("{}", msg);
                        return Ok(None);
                    }
                    return Err(MappingError::InvalidLiteral {
                        lexical: tag.to_string(),
                        expected: "a language tag".to_string(),
                    });
                }
                Some(tag.to_string())
            }
            None => None,
        };

        Ok(Some(ResolvedProperty {
            predicate,
            datatype,
            language,
            as_list: self.options.serialize_collections_as_lists || hints.list,
        }))
    }

    /// Resolve an IRI or prefixed name, honouring `ignore_invalid_annotations`
    pub fn iri(&self, iri_or_qname: &str, context: &str) -> MappingResult<Option<NamedNode>> {
        self.checked(&self.namespaces.resolve(iri_or_qname), context)
    }

    fn checked(&self, iri: &str, context: &str) -> MappingResult<Option<NamedNode>> {
        match NamedNode::new(iri) {
            Ok(node) => Ok(Some(node)),
            Err(_) if self.options.ignore_invalid_annotations => {
                info!(
                    "An invalid uri \"{}\" was used, ignoring property with annotation ({})",
                    iri, context
                );
                Ok(None)
            }
            Err(_) => Err(MappingError::InvalidIri(iri.to_string())),
        }
    }
}

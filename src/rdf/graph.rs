//! In-memory RDF graph
//!
//! The mapper reads from and writes into a [`Graph`]: an insertion-ordered set of
//! triples with a subject → predicate → objects index for the lookups the encoder
//! and decoder perform.

use super::types::{BlankNode, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple, TriplePattern};
use super::vocab;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};

/// RDF graph with a subject index
///
/// Iteration follows insertion order. Code that takes "the first" of several
/// values relies on that order, but the graph contract itself makes no ordering
/// promise, so such choices are best effort.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// All triples (primary storage)
    triples: IndexSet<Triple>,

    /// SPO index: Subject -> Predicate -> Set of Objects
    spo_index: IndexMap<RdfSubject, IndexMap<RdfPredicate, IndexSet<RdfObject>>>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple, returning false when it was already present
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.triples.contains(&triple) {
            return false;
        }

        self.spo_index
            .entry(triple.subject.clone())
            .or_default()
            .entry(triple.predicate.clone())
            .or_default()
            .insert(triple.object.clone());

        self.triples.insert(triple)
    }

    /// Insert a triple from its parts
    pub fn add(
        &mut self,
        subject: impl Into<RdfSubject>,
        predicate: impl Into<RdfPredicate>,
        object: impl Into<RdfObject>,
    ) -> bool {
        self.insert(Triple::new(subject.into(), predicate.into(), object.into()))
    }

    /// Union another graph into this one
    pub fn extend(&mut self, other: Graph) {
        for triple in other.triples {
            self.insert(triple);
        }
    }

    /// Check if a triple exists in the graph
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Get an iterator over all triples
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Query triples matching a pattern
    pub fn query(&self, pattern: &TriplePattern) -> Vec<Triple> {
        self.triples
            .iter()
            .filter(|triple| pattern.matches(triple))
            .cloned()
            .collect()
    }

    /// Get triples with a specific subject
    pub fn triples_with_subject(&self, subject: &RdfSubject) -> Vec<Triple> {
        self.query(&TriplePattern::new(Some(subject.clone()), None, None))
    }

    /// All objects asserted for `(subject, predicate)`
    pub fn objects(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> Vec<&RdfObject> {
        self.spo_index
            .get(subject)
            .and_then(|preds| preds.get(predicate))
            .map(|objs| objs.iter().collect())
            .unwrap_or_default()
    }

    /// The first object asserted for `(subject, predicate)`
    pub fn object(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> Option<&RdfObject> {
        self.spo_index
            .get(subject)
            .and_then(|preds| preds.get(predicate))
            .and_then(|objs| objs.first())
    }

    /// Distinct subjects, in the order they were first asserted
    pub fn subjects(&self) -> Vec<RdfSubject> {
        self.spo_index.keys().cloned().collect()
    }

    /// The `rdf:type` values asserted for a node
    pub fn types_of(&self, node: &RdfSubject) -> Vec<NamedNode> {
        self.objects(node, &vocab::rdf_type())
            .into_iter()
            .filter_map(|o| match o {
                RdfObject::NamedNode(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether the node is `rdf:nil` or the head of an RDF list
    pub fn is_list(&self, node: &RdfSubject) -> bool {
        let nil: RdfSubject = vocab::rdf_nil().into();
        *node == nil || self.object(node, &vocab::rdf_first()).is_some()
    }

    /// Expand the RDF list starting at `head`
    ///
    /// The walk stops at `rdf:nil`, at a node without `rdf:rest`, or at a node it
    /// has already visited, so malformed lists cannot loop forever.
    pub fn list_items(&self, head: &RdfSubject) -> Vec<RdfObject> {
        let nil: RdfSubject = vocab::rdf_nil().into();
        let first = vocab::rdf_first();
        let rest = vocab::rdf_rest();

        let mut items = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(head.clone());

        while let Some(node) = current.take() {
            if node == nil || !visited.insert(node.clone()) {
                break;
            }
            if let Some(item) = self.object(&node, &first) {
                items.push(item.clone());
            }
            current = self.object(&node, &rest).and_then(RdfObject::as_subject);
        }

        items
    }

    /// Build an RDF list of `items` and return its head (`rdf:nil` when empty)
    pub fn add_list(&mut self, items: Vec<RdfObject>) -> RdfSubject {
        let nil: RdfSubject = vocab::rdf_nil().into();
        if items.is_empty() {
            return nil;
        }

        let head: RdfSubject = BlankNode::new().into();
        let mut current = head.clone();
        let count = items.len();

        for (i, item) in items.into_iter().enumerate() {
            self.add(current.clone(), vocab::rdf_first(), item);
            let next: RdfSubject = if i + 1 < count {
                BlankNode::new().into()
            } else {
                nil.clone()
            };
            self.add(current, vocab::rdf_rest(), next.clone());
            current = next;
        }

        head
    }

    /// Graph isomorphism, treating blank nodes as existentially scoped
    ///
    /// Ground triples must match exactly; blank nodes are matched by a
    /// backtracking search over candidates with the same signature. The
    /// search is exponential in the worst case, when many blank nodes share
    /// a signature; the graphs compared here are single mapped objects.
    pub fn is_isomorphic(&self, other: &Graph) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let mut ours_with_blanks = Vec::new();
        for triple in self.iter() {
            if triple.is_ground() {
                if !other.contains(triple) {
                    return false;
                }
            } else {
                ours_with_blanks.push(triple);
            }
        }

        let theirs_with_blanks: Vec<&Triple> = other.iter().filter(|t| !t.is_ground()).collect();
        if ours_with_blanks.len() != theirs_with_blanks.len() {
            return false;
        }

        let our_blanks = blank_nodes(&ours_with_blanks);
        let their_blanks = blank_nodes(&theirs_with_blanks);
        if our_blanks.len() != their_blanks.len() {
            return false;
        }

        let our_sigs = signatures(&ours_with_blanks);
        let their_sigs = signatures(&theirs_with_blanks);

        let theirs: HashSet<&Triple> = theirs_with_blanks.iter().copied().collect();
        let mut mapping = HashMap::new();
        let mut used = HashSet::new();

        match_blanks(
            &our_blanks,
            0,
            &their_blanks,
            &our_sigs,
            &their_sigs,
            &ours_with_blanks,
            &theirs,
            &mut mapping,
            &mut used,
        )
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Graph::new();
        for triple in iter {
            graph.insert(triple);
        }
        graph
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = indexmap::set::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

fn blank_nodes(triples: &[&Triple]) -> Vec<BlankNode> {
    let mut nodes = IndexSet::new();
    for triple in triples {
        if let RdfSubject::BlankNode(b) = &triple.subject {
            nodes.insert(b.clone());
        }
        if let RdfObject::BlankNode(b) = &triple.object {
            nodes.insert(b.clone());
        }
    }
    nodes.into_iter().collect()
}

/// Per blank node: how often it occurs as subject and as object, per predicate
fn signatures(triples: &[&Triple]) -> HashMap<BlankNode, Vec<(bool, String)>> {
    let mut sigs: HashMap<BlankNode, Vec<(bool, String)>> = HashMap::new();
    for triple in triples {
        if let RdfSubject::BlankNode(b) = &triple.subject {
            sigs.entry(b.clone())
                .or_default()
                .push((true, triple.predicate.as_str().to_string()));
        }
        if let RdfObject::BlankNode(b) = &triple.object {
            sigs.entry(b.clone())
                .or_default()
                .push((false, triple.predicate.as_str().to_string()));
        }
    }
    for sig in sigs.values_mut() {
        sig.sort();
    }
    sigs
}

#[allow(clippy::too_many_arguments)]
fn match_blanks(
    ours: &[BlankNode],
    index: usize,
    theirs: &[BlankNode],
    our_sigs: &HashMap<BlankNode, Vec<(bool, String)>>,
    their_sigs: &HashMap<BlankNode, Vec<(bool, String)>>,
    our_triples: &[&Triple],
    their_triples: &HashSet<&Triple>,
    mapping: &mut HashMap<BlankNode, BlankNode>,
    used: &mut HashSet<BlankNode>,
) -> bool {
    if index == ours.len() {
        return our_triples
            .iter()
            .all(|t| their_triples.contains(&relabel(t, mapping)));
    }

    let node = &ours[index];
    for candidate in theirs {
        if used.contains(candidate) || our_sigs.get(node) != their_sigs.get(candidate) {
            continue;
        }

        mapping.insert(node.clone(), candidate.clone());
        used.insert(candidate.clone());

        if consistent_so_far(our_triples, their_triples, mapping)
            && match_blanks(
                ours,
                index + 1,
                theirs,
                our_sigs,
                their_sigs,
                our_triples,
                their_triples,
                mapping,
                used,
            )
        {
            return true;
        }

        mapping.remove(node);
        used.remove(candidate);
    }

    false
}

/// Every triple whose blank nodes are all mapped must exist on the other side
fn consistent_so_far(
    our_triples: &[&Triple],
    their_triples: &HashSet<&Triple>,
    mapping: &HashMap<BlankNode, BlankNode>,
) -> bool {
    our_triples.iter().all(|t| {
        let subject_mapped = match &t.subject {
            RdfSubject::BlankNode(b) => mapping.contains_key(b),
            RdfSubject::NamedNode(_) => true,
        };
        let object_mapped = match &t.object {
            RdfObject::BlankNode(b) => mapping.contains_key(b),
            _ => true,
        };
        !(subject_mapped && object_mapped) || their_triples.contains(&relabel(t, mapping))
    })
}

fn relabel(triple: &Triple, mapping: &HashMap<BlankNode, BlankNode>) -> Triple {
    let subject = match &triple.subject {
        RdfSubject::BlankNode(b) => mapping
            .get(b)
            .map(|m| RdfSubject::BlankNode(m.clone()))
            .unwrap_or_else(|| triple.subject.clone()),
        other => other.clone(),
    };
    let object = match &triple.object {
        RdfObject::BlankNode(b) => mapping
            .get(b)
            .map(|m| RdfObject::BlankNode(m.clone()))
            .unwrap_or_else(|| triple.object.clone()),
        other => other.clone(),
    };
    Triple::new(subject, triple.predicate.clone(), object)
}

use crate::json_ld::vocab::{self, Term};
use crate::json_ld::Node;

/// How an object refers to one of its collections (`likes`, `shares`,
/// `replies`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollectionReference {
    /// The collection is embedded in the object.
    Inline {
        id: Option<String>,
        total_items: Option<u64>,
    },
    /// The collection lives on the remote server and was not fetched.
    Remote(String),
    Absent,
}

impl CollectionReference {
    pub(crate) fn from_property(node: Node<'_>, term: Term) -> CollectionReference {
        if let Some(collection) = node.get_node(term) {
            if collection.is_reference() {
                if let Some(id) = collection.id() {
                    return CollectionReference::Remote(id.to_string());
                }
            }
            return CollectionReference::Inline {
                id: collection.id().map(str::to_string),
                total_items: collection.get_u64(vocab::TOTAL_ITEMS),
            };
        }
        match node.get_str(term) {
            Some(iri) => CollectionReference::Remote(iri.to_string()),
            None => CollectionReference::Absent,
        }
    }

    /// Number of items, when the collection was inlined with a count.
    pub fn count(&self) -> Option<u64> {
        match self {
            CollectionReference::Inline { total_items, .. } => *total_items,
            CollectionReference::Remote(_) | CollectionReference::Absent => None,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, CollectionReference::Remote(_))
    }
}

use serde::{Deserialize, Serialize};

use crate::json_ld::vocab;
use crate::json_ld::Node;

use super::Object;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ActivityType {
    Create,
    Update,
    Other,
}

/// The envelope of an incoming document and the object it carries.
///
/// Documents that are not activities are taken to be the object itself.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Activity<'a> {
    envelope: Option<Node<'a>>,
    object: Node<'a>,
}

impl<'a> Activity<'a> {
    pub(crate) fn new(root: Node<'a>) -> Activity<'a> {
        let is_activity = ACTIVITY_TYPES.iter().any(|ty| root.type_is(ty));
        if !is_activity || !root.has(vocab::OBJECT) {
            return Activity {
                envelope: None,
                object: root,
            };
        }
        let object = root
            .get_node(vocab::OBJECT)
            .filter(|node| !node.is_reference())
            .unwrap_or_else(|| Node::empty(root.form()));
        Activity {
            envelope: Some(root),
            object,
        }
    }
    pub(crate) fn id(&self) -> Option<&'a str> {
        self.envelope.and_then(|node| node.id())
    }
    pub(crate) fn activity_type(&self) -> Option<ActivityType> {
        let envelope = self.envelope?;
        let activity_type = if envelope.type_is("Create") {
            ActivityType::Create
        } else if envelope.type_is("Update") {
            ActivityType::Update
        } else {
            ActivityType::Other
        };
        Some(activity_type)
    }
    pub(crate) fn actor(&self) -> Option<&'a str> {
        self.envelope.and_then(|node| node.get_iri(vocab::ACTOR))
    }
    /// Whether the envelope was sent by `expected_actor`. Bare objects are
    /// checked against their `attributedTo`.
    pub(crate) fn actor_matches(&self, expected_actor: &str) -> bool {
        self.actor()
            .or_else(|| self.object().attributed_to())
            .is_some_and(|actor| actor == expected_actor)
    }
    pub(crate) fn object(&self) -> Object<'a> {
        Object::from(self.object)
    }
    /// The IRI of the object, whether it was inlined or only referenced.
    pub(crate) fn object_uri(&self) -> Option<&'a str> {
        if let Some(uri) = self.object().uri() {
            return Some(uri);
        }
        self.envelope
            .and_then(|node| node.get_iri(vocab::OBJECT))
    }
    pub(crate) fn is_object_inlined(&self) -> bool {
        !self.object.is_empty()
    }
}

const ACTIVITY_TYPES: [&str; 28] = [
    "Accept",
    "Add",
    "Announce",
    "Arrive",
    "Block",
    "Create",
    "Delete",
    "Dislike",
    "Flag",
    "Follow",
    "Ignore",
    "Invite",
    "Join",
    "Leave",
    "Like",
    "Listen",
    "Move",
    "Offer",
    "Question",
    "Reject",
    "Read",
    "Remove",
    "TentativeReject",
    "TentativeAccept",
    "Travel",
    "Undo",
    "Update",
    "View",
];

//! Who a post is addressed to.

use std::collections::BTreeSet;

use minicbor::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::json_ld::vocab::PUBLIC_COLLECTION;

use super::model::Object;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "lowercase")]
#[cbor(index_only)]
pub enum Visibility {
    /// Addressed to the public collection.
    #[n(0)]
    Public,
    /// The public collection is only copied.
    #[n(1)]
    Unlisted,
    /// Addressed to the sender's followers.
    #[n(2)]
    Private,
    /// Only the explicitly named recipients.
    #[n(3)]
    Direct,
}

pub(crate) struct Audience<'a> {
    to: BTreeSet<&'a str>,
    cc: BTreeSet<&'a str>,
    followers_collection: Option<&'a str>,
}

impl<'a> Audience<'a> {
    pub(crate) fn new(object: &Object<'a>, followers_collection: Option<&'a str>) -> Self {
        Audience {
            to: object.to(),
            cc: object.cc(),
            followers_collection,
        }
    }

    pub(crate) fn recipients(&self) -> BTreeSet<&'a str> {
        self.to.union(&self.cc).copied().collect()
    }

    fn contains(&self, iri: &str) -> bool {
        self.to.contains(iri) || self.cc.contains(iri)
    }

    pub(crate) fn is_public(&self) -> bool {
        self.contains(PUBLIC_COLLECTION)
    }

    pub(crate) fn addressed_followers(&self) -> bool {
        self.followers_collection
            .is_some_and(|followers| self.contains(followers))
    }

    pub(crate) fn visibility(&self) -> Visibility {
        if self.to.contains(PUBLIC_COLLECTION) {
            Visibility::Public
        } else if self.cc.contains(PUBLIC_COLLECTION) {
            Visibility::Unlisted
        } else if self.addressed_followers() {
            Visibility::Private
        } else {
            Visibility::Direct
        }
    }
}

//! The fixed vocabulary understood by the parser.
//!
//! Each term pairs the short name used by compacted documents with the IRI
//! used as a property key by expanded documents.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Term {
    name: &'static str,
    iri: &'static str,
}

impl Term {
    pub(crate) const fn keyword(keyword: &'static str, alias: &'static str) -> Term {
        Term {
            name: alias,
            iri: keyword,
        }
    }

    pub(crate) const fn new(name: &'static str, iri: &'static str) -> Term {
        Term { name, iri }
    }

    /// Property key in compacted form.
    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    /// Property key in expanded form.
    pub(crate) fn iri(&self) -> &'static str {
        self.iri
    }
}

macro_rules! as_term {
    ($ident:ident, $name:literal) => {
        pub(crate) const $ident: Term = Term::new(
            $name,
            concat!("https://www.w3.org/ns/activitystreams#", $name),
        );
    };
}

macro_rules! gts_term {
    ($ident:ident, $name:literal) => {
        pub(crate) const $ident: Term =
            Term::new($name, concat!("https://gotosocial.org/ns#", $name));
    };
}

pub(crate) const CONTEXT: &str = "@context";
pub(crate) const VALUE: &str = "@value";
pub(crate) const LANGUAGE: &str = "@language";

pub(crate) const ID: Term = Term::keyword("@id", "id");
pub(crate) const TYPE: Term = Term::keyword("@type", "type");

as_term!(ACTOR, "actor");
as_term!(OBJECT, "object");
as_term!(ATTRIBUTED_TO, "attributedTo");
as_term!(CONTENT, "content");
as_term!(NAME, "name");
as_term!(SUMMARY, "summary");
as_term!(URL, "url");
as_term!(HREF, "href");
as_term!(MEDIA_TYPE, "mediaType");
as_term!(PUBLISHED, "published");
as_term!(UPDATED, "updated");
as_term!(TO, "to");
as_term!(CC, "cc");
as_term!(IN_REPLY_TO, "inReplyTo");
as_term!(TAG, "tag");
as_term!(ATTACHMENT, "attachment");
as_term!(LIKES, "likes");
as_term!(SHARES, "shares");
as_term!(REPLIES, "replies");
as_term!(TOTAL_ITEMS, "totalItems");
as_term!(SENSITIVE, "sensitive");

gts_term!(INTERACTION_POLICY, "interactionPolicy");
gts_term!(CAN_QUOTE, "canQuote");
gts_term!(AUTOMATIC_APPROVAL, "automaticApproval");
gts_term!(MANUAL_APPROVAL, "manualApproval");

pub(crate) const ACTIVITY_STREAMS_NS: &str = "https://www.w3.org/ns/activitystreams#";
pub(crate) const ACTIVITY_STREAMS_PREFIX: &str = "as:";

/// The special collection including everyone.
pub(crate) const PUBLIC_COLLECTION: &str = "https://www.w3.org/ns/activitystreams#Public";

/// Compacted documents may abbreviate the public collection.
pub(crate) fn is_public_collection(iri: &str) -> bool {
    iri == PUBLIC_COLLECTION || iri == "as:Public" || iri == "Public"
}

/// Normalize a recipient IRI, expanding abbreviations of the public collection.
pub(crate) fn normalize_iri(iri: &str) -> &str {
    if is_public_collection(iri) {
        PUBLIC_COLLECTION
    } else {
        iri
    }
}

/// Strip the ActivityStreams namespace from a type name, if present.
pub(crate) fn compact_type(type_name: &str) -> &str {
    type_name
        .strip_prefix(ACTIVITY_STREAMS_NS)
        .or_else(|| type_name.strip_prefix(ACTIVITY_STREAMS_PREFIX))
        .unwrap_or(type_name)
}

//! Typed fields of an Activity Streams object.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use jiff::Timestamp;
use minicbor::{Decode, Encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::json_ld::Node;
use crate::json_ld::vocab::{self, Term};

use super::CollectionReference;

/// Object types we know how to present. Everything else is `Other`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ObjectType {
    Note,
    Article,
    Page,
    Event,
    Other,
}

impl ObjectType {
    pub(crate) fn from_name(name: &str) -> ObjectType {
        match name {
            "Note" => ObjectType::Note,
            "Article" => ObjectType::Article,
            "Page" => ObjectType::Page,
            "Event" => ObjectType::Event,
            _ => ObjectType::Other,
        }
    }
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ObjectType::Note => "Note",
            ObjectType::Article => "Article",
            ObjectType::Page => "Page",
            ObjectType::Event => "Event",
            ObjectType::Other => "Other",
        };
        f.write_str(name)
    }
}

/// A media attachment of a post.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, Encode, Decode)]
pub struct Attachment {
    #[n(0)]
    pub url: String,
    #[n(1)]
    pub media_type: Option<String>,
    #[n(2)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Object<'a>(Node<'a>);

impl<'a> From<Node<'a>> for Object<'a> {
    fn from(node: Node<'a>) -> Self {
        Object(node)
    }
}

impl<'a> Object<'a> {
    pub(crate) fn uri(&self) -> Option<&'a str> {
        self.0.id()
    }
    pub(crate) fn object_type(&self) -> ObjectType {
        self.0
            .type_name()
            .map(ObjectType::from_name)
            .unwrap_or(ObjectType::Other)
    }
    /// `contentMap` keyed by lowercased language tag.
    pub(crate) fn content_by_language(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for (lang, text) in self.0.get_lang_map(vocab::CONTENT) {
            let lang = lang.trim().to_lowercase();
            if lang.is_empty() {
                continue;
            }
            map.entry(lang).or_insert_with(|| text.to_string());
        }
        map
    }
    pub(crate) fn content(&self) -> Option<&'a str> {
        self.0.get_plain_str(vocab::CONTENT)
    }
    pub(crate) fn title(&self) -> Option<&'a str> {
        non_empty(self.0.get_plain_str(vocab::NAME))
            .or_else(|| first_lang_value(self.0, vocab::NAME))
    }
    pub(crate) fn summary(&self) -> Option<&'a str> {
        non_empty(self.0.get_plain_str(vocab::SUMMARY))
            .or_else(|| first_lang_value(self.0, vocab::SUMMARY))
    }
    pub(crate) fn canonical_url(&self) -> Option<&'a str> {
        self.0.get_str(vocab::URL).or_else(|| {
            self.0
                .get_nodes(vocab::URL)
                .iter()
                .find_map(|link| link.get_iri(vocab::HREF))
        })
    }
    pub(crate) fn published_at(&self) -> Option<Timestamp> {
        parse_timestamp(self.0, vocab::PUBLISHED)
    }
    pub(crate) fn updated_at(&self) -> Option<Timestamp> {
        parse_timestamp(self.0, vocab::UPDATED)
    }
    pub(crate) fn to(&self) -> BTreeSet<&'a str> {
        audience_set(self.0, vocab::TO)
    }
    pub(crate) fn cc(&self) -> BTreeSet<&'a str> {
        audience_set(self.0, vocab::CC)
    }
    pub(crate) fn in_reply_to(&self) -> Option<&'a str> {
        self.0.get_iri(vocab::IN_REPLY_TO)
    }
    pub(crate) fn attributed_to(&self) -> Option<&'a str> {
        self.0.get_iri(vocab::ATTRIBUTED_TO)
    }
    pub(crate) fn sensitive(&self) -> bool {
        self.0.get_bool(vocab::SENSITIVE).unwrap_or(false)
    }
    /// `href` of every `Mention` tag.
    pub(crate) fn mentions(&self) -> Vec<&'a str> {
        self.0
            .get_nodes(vocab::TAG)
            .iter()
            .filter(|tag| tag.type_is("Mention"))
            .filter_map(|tag| tag.get_iri(vocab::HREF))
            .collect()
    }
    /// Normalized names of every `Hashtag` tag.
    pub(crate) fn hashtags(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.0
            .get_nodes(vocab::TAG)
            .iter()
            .filter(|tag| tag.type_is("Hashtag"))
            .filter_map(|tag| tag.get_str(vocab::NAME))
            .map(|name| name.trim().trim_start_matches('#').to_lowercase())
            .filter(|name| !name.is_empty() && seen.insert(name.clone()))
            .collect()
    }
    pub(crate) fn attachments(&self) -> Vec<Attachment> {
        self.0
            .get_nodes(vocab::ATTACHMENT)
            .iter()
            .filter_map(|node| {
                let url = Object(*node).canonical_url()?;
                Some(Attachment {
                    url: url.to_string(),
                    media_type: node.get_str(vocab::MEDIA_TYPE).map(str::to_string),
                    description: node.get_str(vocab::NAME).map(str::to_string),
                })
            })
            .collect()
    }
    pub(crate) fn favourites_reference(&self) -> CollectionReference {
        CollectionReference::from_property(self.0, vocab::LIKES)
    }
    pub(crate) fn shares_reference(&self) -> CollectionReference {
        CollectionReference::from_property(self.0, vocab::SHARES)
    }
    pub(crate) fn replies_reference(&self) -> CollectionReference {
        CollectionReference::from_property(self.0, vocab::REPLIES)
    }
    pub(crate) fn interaction_policy(&self) -> Option<Node<'a>> {
        self.0.get_node(vocab::INTERACTION_POLICY)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn first_lang_value<'a>(node: Node<'a>, term: Term) -> Option<&'a str> {
    let mut values = node.get_lang_map(term);
    values.sort_by(|a, b| a.0.cmp(b.0));
    values
        .into_iter()
        .map(|(_, text)| text)
        .find(|text| !text.trim().is_empty())
}

fn audience_set<'a>(node: Node<'a>, term: Term) -> BTreeSet<&'a str> {
    node.get_iris(term)
        .into_iter()
        .map(vocab::normalize_iri)
        .collect()
}

fn parse_timestamp(node: Node<'_>, term: Term) -> Option<Timestamp> {
    let value = node.get_str(term)?;
    match value.trim().parse::<Timestamp>() {
        Ok(timestamp) => Some(timestamp),
        Err(err) => {
            debug!(target: "parser", property = term.name(), %value, %err, "ignoring unparsable timestamp");
            None
        }
    }
}

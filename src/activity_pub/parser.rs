use std::borrow::Cow;
use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result};
use jiff::Timestamp;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ParserConfig;
use crate::json_ld::{Form, Node};

use super::audience::{Audience, Visibility};
use super::interaction_policy::{PolicyEvaluator, QuotePolicy};
use super::language::select_language;
use super::model::{Activity, ActivityType, Attachment, CollectionReference, Object, ObjectType};
use super::render::{self, Sections};
use super::status::ParsedStatus;

/// Identities of the sender, resolved by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Canonical URI of the actor expected to have sent the activity.
    pub actor_uri: Option<String>,
    /// Followers collection of that actor.
    pub followers_collection: Option<String>,
}

impl ParserOptions {
    pub fn new(actor_uri: impl Into<String>) -> ParserOptions {
        ParserOptions {
            actor_uri: Some(actor_uri.into()),
            followers_collection: None,
        }
    }

    pub fn with_followers_collection(mut self, followers: impl Into<String>) -> ParserOptions {
        self.followers_collection = Some(followers.into());
        self
    }
}

/// Derives the fields of a post from an incoming activity document.
///
/// Derived values are computed on first use and kept for the lifetime of the
/// parser. Malformed documents never make the parser fail; missing fields are
/// reported as `None`.
pub struct StatusParser<'a> {
    document: Cow<'a, Value>,
    form: Form,
    options: ParserOptions,
    config: ParserConfig,
    content_by_language: OnceCell<BTreeMap<String, String>>,
    language: OnceCell<Option<String>>,
    processed_text: OnceCell<String>,
    quote_policy: OnceCell<u32>,
}

impl<'a> StatusParser<'a> {
    pub fn new(document: &'a Value, options: ParserOptions) -> StatusParser<'a> {
        StatusParser::with_document(Cow::Borrowed(document), options)
    }

    pub fn from_owned(document: Value, options: ParserOptions) -> StatusParser<'static> {
        StatusParser::with_document(Cow::Owned(document), options)
    }

    fn with_document(document: Cow<'a, Value>, options: ParserOptions) -> StatusParser<'a> {
        let form = Form::detect(&document);
        debug!(target: "parser", ?form, "parsing status document");
        StatusParser {
            document,
            form,
            options,
            config: ParserConfig::default(),
            content_by_language: OnceCell::new(),
            language: OnceCell::new(),
            processed_text: OnceCell::new(),
            quote_policy: OnceCell::new(),
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    fn activity(&self) -> Activity<'_> {
        Activity::new(Node::root_as(&self.document, self.form))
    }

    fn object(&self) -> Object<'_> {
        self.activity().object()
    }

    fn audience(&self) -> Audience<'_> {
        Audience::new(
            &self.object(),
            self.options.followers_collection.as_deref(),
        )
    }

    pub fn activity_id(&self) -> Option<&str> {
        self.activity().id()
    }

    /// `None` when the document is a bare object.
    pub fn activity_type(&self) -> Option<ActivityType> {
        self.activity().activity_type()
    }

    /// Whether the document was sent by the expected actor.
    pub fn actor_matches(&self) -> bool {
        self.options
            .actor_uri
            .as_deref()
            .is_some_and(|actor| self.activity().actor_matches(actor))
    }

    /// IRI of the post.
    pub fn uri(&self) -> Option<&str> {
        self.activity().object_uri()
    }

    /// Whether the activity embeds its object rather than only naming it.
    pub fn is_object_inlined(&self) -> bool {
        self.activity().is_object_inlined()
    }

    pub fn object_type(&self) -> ObjectType {
        self.object().object_type()
    }

    /// Content by lowercased language tag.
    pub fn content_by_language(&self) -> &BTreeMap<String, String> {
        self.content_by_language
            .get_or_init(|| self.object().content_by_language())
    }

    /// Plain content of the post, falling back on the language map.
    pub fn text(&self) -> Option<&str> {
        self.object()
            .content()
            .or_else(|| self.content_by_language().values().next().map(String::as_str))
    }

    pub fn language(&self) -> Option<&str> {
        self.language
            .get_or_init(|| {
                select_language(
                    self.content_by_language(),
                    self.config.default_language.as_deref(),
                )
            })
            .as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.object().title()
    }

    pub fn summary(&self) -> Option<&str> {
        self.object().summary()
    }

    /// Content warning. Long-form posts show their summary in the body.
    pub fn spoiler_text(&self) -> Option<&str> {
        if render::has_renderer(self.object_type()) {
            return None;
        }
        self.summary()
    }

    pub fn canonical_url(&self) -> Option<&str> {
        self.object().canonical_url()
    }

    pub fn published_at(&self) -> Option<Timestamp> {
        self.object().published_at()
    }

    pub fn updated_at(&self) -> Option<Timestamp> {
        self.object().updated_at()
    }

    /// The last edit, when it happened after publication.
    pub fn edited_at(&self) -> Option<Timestamp> {
        let updated = self.updated_at()?;
        match self.published_at() {
            Some(published) if updated <= published => None,
            _ => Some(updated),
        }
    }

    pub fn in_reply_to(&self) -> Option<&str> {
        self.object().in_reply_to()
    }

    pub fn is_reply(&self) -> bool {
        self.in_reply_to().is_some()
    }

    pub fn recipients(&self) -> BTreeSet<&str> {
        self.audience().recipients()
    }

    pub fn is_public(&self) -> bool {
        self.audience().is_public()
    }

    pub fn addressed_followers(&self) -> bool {
        self.audience().addressed_followers()
    }

    pub fn visibility(&self) -> Visibility {
        self.audience().visibility()
    }

    pub fn sensitive(&self) -> bool {
        self.object().sensitive()
    }

    pub fn mentions(&self) -> Vec<&str> {
        self.object().mentions()
    }

    pub fn hashtags(&self) -> Vec<String> {
        self.object().hashtags()
    }

    pub fn attachments(&self) -> Vec<Attachment> {
        self.object().attachments()
    }

    pub fn favourites_reference(&self) -> CollectionReference {
        self.object().favourites_reference()
    }

    /// `None` when the likes collection was not inlined with a count.
    pub fn favourites_count(&self) -> Option<u64> {
        self.favourites_reference().count()
    }

    pub fn reblogs_count(&self) -> Option<u64> {
        self.object().shares_reference().count()
    }

    pub fn replies_count(&self) -> Option<u64> {
        self.object().replies_reference().count()
    }

    /// Display text, composed from title, summary, body and link for
    /// long-form posts.
    pub fn processed_text(&self) -> &str {
        self.processed_text.get_or_init(|| {
            let object = self.object();
            let sections = Sections {
                title: object.title(),
                summary: object.summary(),
                content: self.text(),
                url: object.canonical_url(),
            };
            render::render(object.object_type(), &sections)
        })
    }

    /// Who may quote the post, packed as described in
    /// [`QuotePolicy`](crate::QuotePolicy).
    ///
    /// Fails when the parser was built without the sender's actor URI.
    pub fn quote_policy(&self) -> Result<u32> {
        let actor_uri = self
            .options
            .actor_uri
            .as_deref()
            .context("the sending actor URI is required to evaluate a quote policy")?;
        if let Some(policy) = self.quote_policy.get() {
            return Ok(*policy);
        }
        let evaluator = PolicyEvaluator {
            actor_uri,
            followers_collection: self.options.followers_collection.as_deref(),
        };
        let policy = self
            .object()
            .interaction_policy()
            .and_then(|policy| evaluator.quote_policy(policy))
            .map(QuotePolicy::bits)
            .unwrap_or(self.config.default_quote_policy);
        Ok(*self.quote_policy.get_or_init(|| policy))
    }

    /// Snapshot every derived field.
    pub fn to_status(&self) -> Result<ParsedStatus> {
        let quote_policy = self.quote_policy()?;
        if !self.actor_matches() {
            warn!(target: "parser", uri = ?self.uri(), actor = ?self.options.actor_uri, "status was not sent by the expected actor");
        }
        Ok(ParsedStatus {
            uri: self.uri().map(str::to_string),
            url: self.canonical_url().map(str::to_string),
            text: self.text().unwrap_or_default().to_string(),
            processed_text: self.processed_text().to_string(),
            spoiler_text: self.spoiler_text().map(str::to_string),
            language: self.language().map(str::to_string),
            reply: self.is_reply(),
            in_reply_to: self.in_reply_to().map(str::to_string),
            visibility: self.visibility(),
            sensitive: self.sensitive(),
            published_at: self.published_at().map(|t| t.as_millisecond()),
            edited_at: self.edited_at().map(|t| t.as_millisecond()),
            mentions: self.mentions().into_iter().map(str::to_string).collect(),
            hashtags: self.hashtags(),
            attachments: self.attachments(),
            favourites_count: self.favourites_count(),
            reblogs_count: self.reblogs_count(),
            replies_count: self.replies_count(),
            quote_policy,
        })
    }
}

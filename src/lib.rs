//! Turns ActivityPub posts received from remote servers into the fields a
//! server stores: text, language, audience, counters, rendered body and quote
//! policy.
//!
//! Documents may be compacted or expanded JSON-LD. The parser does no I/O;
//! identities of the sender are resolved by the caller and passed in
//! [`ParserOptions`].

mod activity_pub;
mod config;
mod json_ld;

pub use activity_pub::{
    AUTOMATIC_APPROVAL_SHIFT, ActivityType, Attachment, CollectionReference, IdentityClass,
    ObjectType, ParsedStatus, ParserOptions, QuotePolicy, StatusParser, UNSUPPORTED_POLICY_BIT,
    Visibility,
};
pub use config::{Config, ParserConfig};

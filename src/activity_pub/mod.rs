mod audience;
mod interaction_policy;
mod language;
mod model;
mod parser;
mod render;
mod status;

pub use audience::Visibility;
pub use interaction_policy::{
    AUTOMATIC_APPROVAL_SHIFT, IdentityClass, QuotePolicy, UNSUPPORTED_POLICY_BIT,
};
pub use model::{ActivityType, Attachment, CollectionReference, ObjectType};
pub use parser::{ParserOptions, StatusParser};
pub use status::ParsedStatus;

mod activity;
mod collection;
mod object;

pub use activity::ActivityType;
pub use collection::CollectionReference;
pub use object::{Attachment, ObjectType};

pub(crate) use activity::Activity;
pub(crate) use object::Object;

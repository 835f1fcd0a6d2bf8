//! Core data model types for tinygit

mod blob;
mod commit;
mod hash;
mod kind;
mod kvlm;
mod object;

pub use blob::Blob;
pub use commit::Commit;
pub use hash::ObjectId;
pub use kind::ObjectType;
pub use kvlm::Kvlm;
pub use object::Object;

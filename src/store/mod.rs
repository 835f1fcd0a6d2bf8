//! Content-addressed object store
//!
//! Objects are framed, addressed by the SHA-1 of the frame, and stored as
//! individually zlib-compressed loose files.

mod file_store;
mod frame;

pub use file_store::ObjectStore;
pub use frame::Frame;

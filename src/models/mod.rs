// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod annotation;
pub mod document;
pub mod event;

pub use annotation::{DetectedEntity, KeyPhrase, strip_control};
pub use document::{SearchDocument, console_link};
pub use event::{TriggerEvent, decode_object_key};

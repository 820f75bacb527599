//! Data Transfer Objects for REST request serialization.
//!
//! Request bodies bind only the scalar columns a client may set; nested
//! relations sent by a client are dropped on deserialization.

pub mod equipment_dto;

pub use equipment_dto::*;

//! Model to entity mappers
//!
//! `From<Model> for Entity` converts database rows to domain objects.
//! Soft-delete columns become `RecordState`.

mod content;
mod relation;
mod user;

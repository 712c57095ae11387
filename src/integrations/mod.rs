//! Provides [`serde`] support for values, errors and the schema shape.

pub mod serde;

//! Types used to describe and assemble a `GraphQL` schema.

pub mod meta;
pub mod model;

use arcstr::ArcStr;
use derive_more::with_trait::{Display, Error};

/// Error of assembling a schema out of its types.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum SchemaError {
    /// Fields of the named type were defined more than once.
    #[display("Fields of type \"{_0}\" are already defined")]
    AlreadyDefined(#[error(not(source))] ArcStr),
}

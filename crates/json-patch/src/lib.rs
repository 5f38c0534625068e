//! RFC 6902 JSON Patch operations and their JSON encoding.
//!
//! A [`Patch`] is encoded with [`Patch::encode`], either HTML-escaped (the
//! default) or with `<`, `>` and `&` written verbatim. Both modes write
//! exactly the same members for every operation.

mod error;
mod finite;
mod formatter;
mod operation;
mod options;
mod patch;

pub use error::{EncodeError, ParseOperationTypeError};
pub use operation::{Operation, OperationType, INVALID_OPERATION};
pub use options::EncodeOptions;
pub use patch::Patch;

//! RFC 6901 JSON Pointers as used in the `path` and `from` members of JSON
//! Patch operations.

mod macros;

mod error;
mod json_pointer;
mod parser;

pub use error::ParseJsonPointerError;
pub use json_pointer::JsonPointer;

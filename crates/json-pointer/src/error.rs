#[derive(Debug, thiserror::Error, Clone, Eq, PartialEq)]
#[error("invalid json pointer: `{input}`")]
pub struct ParseJsonPointerError {
    pub(crate) input: String,
}

impl ParseJsonPointerError {
    /// The text that failed to parse.
    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }
}

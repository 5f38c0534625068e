use std::io;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("operation {index} is not representable as json: {source}")]
    Unrepresentable {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Json(serde_json::Error),
}

impl EncodeError {
    /// Classifies a failure raised while serializing the operation at `index`.
    pub(crate) fn operation(index: usize, err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Io(err.into())
        } else {
            Self::Unrepresentable { index, source: err }
        }
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Io(err.into())
        } else {
            Self::Json(err)
        }
    }
}

#[derive(Debug, thiserror::Error, Clone, Eq, PartialEq)]
#[error("unknown operation type: `{name}`")]
pub struct ParseOperationTypeError {
    pub(crate) name: String,
}

use std::str::FromStr;

use json_patch::{Operation, OperationType, ParseOperationTypeError};
use json_pointer::{JsonPointer, ParseJsonPointerError};
use serde_json::Value;

/// One operation given on the command line.
///
/// | Argument | Operation |
/// |---|---|
/// | `add:<path>=<text>` | `add`, and likewise `replace` and `test` |
/// | `remove:<path>` | `remove` |
/// | `move:<from>-><path>` | `move`, and likewise `copy` |
///
/// `<text>` is taken verbatim as a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OperationArg(pub(crate) Operation);

#[derive(Debug, thiserror::Error)]
pub(crate) enum OperationArgError {
    #[error("expected `<op>:<arguments>`, got `{arg}`")]
    MissingOperation { arg: String },
    #[error("`{op}` expects `<path>=<value>`")]
    MissingValue { op: OperationType },
    #[error("`{op}` expects `<from>-><path>`")]
    MissingFrom { op: OperationType },
    #[error(transparent)]
    OperationType(#[from] ParseOperationTypeError),
    #[error(transparent)]
    Pointer(#[from] ParseJsonPointerError),
}

impl FromStr for OperationArg {
    type Err = OperationArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, args) = s
            .split_once(':')
            .ok_or_else(|| OperationArgError::MissingOperation { arg: s.to_string() })?;
        let op: OperationType = op.parse()?;

        let operation = match op {
            OperationType::Remove => Operation::remove(args.parse()?),
            OperationType::Move | OperationType::Copy => {
                let (from, path) = args
                    .split_once("->")
                    .ok_or(OperationArgError::MissingFrom { op })?;
                Operation {
                    from: Some(from.parse::<JsonPointer>()?),
                    ..Operation::new(op, path.parse()?)
                }
            }
            OperationType::Add | OperationType::Replace | OperationType::Test => {
                let (path, value) = args
                    .split_once('=')
                    .ok_or(OperationArgError::MissingValue { op })?;
                Operation {
                    value: Some(Value::String(value.to_string())),
                    ..Operation::new(op, path.parse()?)
                }
            }
        };

        Ok(Self(operation))
    }
}

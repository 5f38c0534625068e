use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use json_pointer::JsonPointer;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{
    finite::check_finite,
    formatter::{HtmlSafe, PatchFormatter},
    ParseOperationTypeError,
};

/// Returned by [`Operation::render_text`] when the operation cannot be
/// serialized.
pub const INVALID_OPERATION: &str = "<invalid operation>";

static ROOT: JsonPointer = JsonPointer::root();

/// The six operations of RFC 6902.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OperationType {
    Add,
    Replace,
    Remove,
    Move,
    Copy,
    Test,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Add => "add",
            OperationType::Replace => "replace",
            OperationType::Remove => "remove",
            OperationType::Move => "move",
            OperationType::Copy => "copy",
            OperationType::Test => "test",
        }
    }
}

impl Display for OperationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = ParseOperationTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(OperationType::Add),
            "replace" => Ok(OperationType::Replace),
            "remove" => Ok(OperationType::Remove),
            "move" => Ok(OperationType::Move),
            "copy" => Ok(OperationType::Copy),
            "test" => Ok(OperationType::Test),
            _ => Err(ParseOperationTypeError {
                name: s.to_string(),
            }),
        }
    }
}

/// A single JSON Patch step.
///
/// `from` is only written for `move` and `copy`, `value` only for `add`,
/// `replace` and `test`. `old_value` is kept for diagnostics and is never
/// written.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation<V = Value> {
    pub op: OperationType,
    pub from: Option<JsonPointer>,
    pub path: JsonPointer,
    pub old_value: Option<V>,
    pub value: Option<V>,
}

/// The members of an [`Operation`] that appear on the wire.
#[derive(Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum WireOperation<'a, V> {
    Add {
        path: &'a JsonPointer,
        value: Option<&'a V>,
    },
    Remove {
        path: &'a JsonPointer,
    },
    Replace {
        path: &'a JsonPointer,
        value: Option<&'a V>,
    },
    Move {
        from: &'a JsonPointer,
        path: &'a JsonPointer,
    },
    Copy {
        from: &'a JsonPointer,
        path: &'a JsonPointer,
    },
    Test {
        path: &'a JsonPointer,
        value: Option<&'a V>,
    },
}

impl<V> Operation<V> {
    pub fn new(op: OperationType, path: JsonPointer) -> Self {
        Self {
            op,
            from: None,
            path,
            old_value: None,
            value: None,
        }
    }

    pub fn add(path: JsonPointer, value: V) -> Self {
        Self {
            value: Some(value),
            ..Self::new(OperationType::Add, path)
        }
    }

    pub fn remove(path: JsonPointer) -> Self {
        Self::new(OperationType::Remove, path)
    }

    pub fn replace(path: JsonPointer, old_value: Option<V>, value: V) -> Self {
        Self {
            old_value,
            value: Some(value),
            ..Self::new(OperationType::Replace, path)
        }
    }

    pub fn move_to(from: JsonPointer, path: JsonPointer) -> Self {
        Self {
            from: Some(from),
            ..Self::new(OperationType::Move, path)
        }
    }

    pub fn copy_to(from: JsonPointer, path: JsonPointer) -> Self {
        Self {
            from: Some(from),
            ..Self::new(OperationType::Copy, path)
        }
    }

    pub fn test(path: JsonPointer, value: V) -> Self {
        Self {
            value: Some(value),
            ..Self::new(OperationType::Test, path)
        }
    }

    #[must_use]
    pub fn with_old_value(self, old_value: V) -> Self {
        Self {
            old_value: Some(old_value),
            ..self
        }
    }
}

impl<V: Serialize> Operation<V> {
    /// Selects the members written for this operation's type.
    ///
    /// A `move` or `copy` without a source is written as coming from the
    /// document root; an `add`, `replace` or `test` without a value is written
    /// with `null`.
    pub fn projection(&self) -> impl Serialize + '_ {
        let path = &self.path;
        let from = self.from.as_ref().unwrap_or(&ROOT);
        let value = self.value.as_ref();

        match self.op {
            OperationType::Add => WireOperation::Add { path, value },
            OperationType::Remove => WireOperation::Remove { path },
            OperationType::Replace => WireOperation::Replace { path, value },
            OperationType::Move => WireOperation::Move { from, path },
            OperationType::Copy => WireOperation::Copy { from, path },
            OperationType::Test => WireOperation::Test { path, value },
        }
    }

    /// Renders the operation as compact, HTML-escaped JSON.
    ///
    /// Returns [`INVALID_OPERATION`] if the operation cannot be serialized.
    pub fn render_text(&self) -> String {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PatchFormatter::<HtmlSafe>::compact());

        let projection = self.projection();
        if let Err(err) = check_finite(&projection).and_then(|()| projection.serialize(&mut ser)) {
            tracing::warn!(error = %err, op = %self.op, path = %self.path, "failed to render operation");
            return INVALID_OPERATION.to_string();
        }

        String::from_utf8(buf).unwrap_or_else(|_| INVALID_OPERATION.to_string())
    }
}

impl<V: Serialize> Display for Operation<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text())
    }
}

impl<V: Serialize> Serialize for Operation<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.projection().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use json_pointer::json_pointer;
    use serde_json::json;

    use super::*;

    const ALL_TYPES: [OperationType; 6] = [
        OperationType::Add,
        OperationType::Replace,
        OperationType::Remove,
        OperationType::Move,
        OperationType::Copy,
        OperationType::Test,
    ];

    fn full_operation(op: OperationType) -> Operation {
        Operation {
            op,
            from: Some(json_pointer!("/src")),
            path: json_pointer!("/dst"),
            old_value: Some(json!("old")),
            value: Some(json!("new")),
        }
    }

    fn keys(operation: &Operation) -> Vec<String> {
        match serde_json::to_value(operation).unwrap() {
            Value::Object(obj) => obj.keys().cloned().collect(),
            other => panic!("expected an object, got {}", other),
        }
    }

    #[test]
    fn operation_type_names() {
        for op in ALL_TYPES {
            assert_eq!(op.as_str().parse::<OperationType>().unwrap(), op);
            assert_eq!(op.to_string(), op.as_str());
        }

        let err = "Add".parse::<OperationType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown operation type: `Add`");
        assert!("".parse::<OperationType>().is_err());
    }

    #[test]
    fn move_and_copy_members() {
        for op in [OperationType::Move, OperationType::Copy] {
            let mut keys = keys(&full_operation(op));
            keys.sort();
            assert_eq!(keys, ["from", "op", "path"]);
        }
    }

    #[test]
    fn value_members() {
        for op in [OperationType::Add, OperationType::Replace, OperationType::Test] {
            let mut keys = keys(&full_operation(op));
            keys.sort();
            assert_eq!(keys, ["op", "path", "value"]);
        }
    }

    #[test]
    fn remove_members() {
        let mut keys = keys(&full_operation(OperationType::Remove));
        keys.sort();
        assert_eq!(keys, ["op", "path"]);
    }

    #[test]
    fn old_value_never_written() {
        for op in ALL_TYPES {
            let text = full_operation(op).render_text();
            assert!(!text.contains("old"), "{}", text);
            assert!(!keys(&full_operation(op)).iter().any(|key| key.contains("old")));
        }
    }

    #[test]
    fn render_text_member_order() {
        assert_eq!(
            full_operation(OperationType::Move).render_text(),
            r#"{"op":"move","from":"/src","path":"/dst"}"#
        );
        assert_eq!(
            full_operation(OperationType::Replace).render_text(),
            r#"{"op":"replace","path":"/dst","value":"new"}"#
        );
        assert_eq!(
            full_operation(OperationType::Remove).render_text(),
            r#"{"op":"remove","path":"/dst"}"#
        );
    }

    #[test]
    fn missing_members_for_type() {
        let copy: Operation = Operation::new(OperationType::Copy, json_pointer!("/a"));
        assert_eq!(copy.render_text(), r#"{"op":"copy","from":"","path":"/a"}"#);

        let add: Operation = Operation::new(OperationType::Add, json_pointer!("/a"));
        assert_eq!(add.render_text(), r#"{"op":"add","path":"/a","value":null}"#);
    }

    #[test]
    fn round_trip_add() {
        let operation = Operation::add(json_pointer!("/x"), json!(5));
        let decoded: Value = serde_json::from_str(&operation.render_text()).unwrap();
        assert_eq!(decoded, json!({"op": "add", "path": "/x", "value": 5}));
    }

    #[test]
    fn constructors() {
        let operation: Operation = Operation::replace(json_pointer!("/a"), Some(json!(1)), json!(2));
        assert_eq!(operation.op, OperationType::Replace);
        assert_eq!(operation.old_value, Some(json!(1)));
        assert_eq!(operation.value, Some(json!(2)));
        assert_eq!(operation.from, None);

        let operation: Operation = Operation::move_to(json_pointer!("/a"), json_pointer!("/b"));
        assert_eq!(operation.from, Some(json_pointer!("/a")));
        assert_eq!(operation.value, None);

        let operation = Operation::remove(json_pointer!("/a")).with_old_value(json!([1]));
        assert_eq!(operation.old_value, Some(json!([1])));
        assert_eq!(operation.render_text(), r#"{"op":"remove","path":"/a"}"#);
    }

    #[test]
    fn render_text_escapes_html() {
        let operation = Operation::test(json_pointer!("/a"), json!("<b>"));
        let text = operation.render_text();
        assert!(!text.contains("<b>"));
        assert!(text.contains(&format!("\\u{:04x}b\\u{:04x}", 0x3c, 0x3e)));
        assert_eq!(operation.to_string(), text);
    }

    #[test]
    fn render_text_sentinel() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "tuple keys are not json");
        let operation = Operation::add(json_pointer!("/a"), map);
        assert_eq!(operation.render_text(), INVALID_OPERATION);
        assert_eq!(operation.to_string(), INVALID_OPERATION);

        // The value is not written for `remove`, so it renders fine.
        let mut map = BTreeMap::new();
        map.insert((1, 2), "ignored");
        let operation = Operation::remove(json_pointer!("/a")).with_old_value(map);
        assert_eq!(operation.render_text(), r#"{"op":"remove","path":"/a"}"#);
    }

    #[test]
    fn projection_is_serialize() {
        for op in ALL_TYPES {
            let operation = full_operation(op);
            assert_eq!(
                serde_json::to_value(operation.projection()).unwrap(),
                serde_json::to_value(&operation).unwrap()
            );
        }
        let operation: Operation = Operation::remove(json_pointer!("/a"));
        let projected = serde_json::to_string(&operation.projection()).unwrap();
        assert_eq!(projected, r#"{"op":"remove","path":"/a"}"#);
    }

    #[test]
    fn render_text_non_finite() {
        assert_eq!(Operation::add(json_pointer!("/x"), f64::NAN).render_text(), INVALID_OPERATION);
        assert_eq!(
            Operation::test(json_pointer!("/x"), vec![1.0, f64::INFINITY]).to_string(),
            INVALID_OPERATION
        );
        assert_eq!(
            Operation::replace(json_pointer!("/x"), None, 2.5f32).render_text(),
            r#"{"op":"replace","path":"/x","value":2.5}"#
        );

        let operation = Operation::remove(json_pointer!("/x")).with_old_value(f64::NAN);
        assert_eq!(operation.render_text(), r#"{"op":"remove","path":"/x"}"#);
    }
}

use std::{
    fmt::{self, Display, Formatter},
    io::Write,
    ops::Deref,
};

use json_pointer::JsonPointer;
use serde::{ser::SerializeSeq, Serialize, Serializer};
use serde_json::Value;

use crate::{
    finite::check_finite,
    formatter::{Escaping, HtmlSafe, PatchFormatter, Verbatim},
    EncodeError, EncodeOptions, Operation, OperationType,
};

/// An ordered sequence of operations, applied first to last.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch<V = Value>(Vec<Operation<V>>);

impl<V> Default for Patch<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> Deref for Patch<V> {
    type Target = [Operation<V>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<V> From<Vec<Operation<V>>> for Patch<V> {
    fn from(operations: Vec<Operation<V>>) -> Self {
        Self(operations)
    }
}

impl<V> FromIterator<Operation<V>> for Patch<V> {
    fn from_iter<I: IntoIterator<Item = Operation<V>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V> Extend<Operation<V>> for Patch<V> {
    fn extend<I: IntoIterator<Item = Operation<V>>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<V> IntoIterator for Patch<V> {
    type Item = Operation<V>;
    type IntoIter = std::vec::IntoIter<Operation<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Patch<V> {
    type Item = &'a Operation<V>;
    type IntoIter = std::slice::Iter<'a, Operation<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<V> Patch<V> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, operation: Operation<V>) {
        self.0.push(operation);
    }

    #[inline]
    pub fn into_inner(self) -> Vec<Operation<V>> {
        self.0
    }

    /// Returns the patch with one more operation at the end.
    #[must_use]
    pub fn append(
        mut self,
        op: OperationType,
        from: Option<JsonPointer>,
        path: JsonPointer,
        old_value: Option<V>,
        value: Option<V>,
    ) -> Self {
        self.push(Operation {
            op,
            from,
            path,
            old_value,
            value,
        });
        self
    }

    /// Returns the patch without the operation at `index`; later operations
    /// move one position forward.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[must_use]
    pub fn remove_at(mut self, index: usize) -> Self {
        let len = self.0.len();
        assert!(
            index < len,
            "removal index (is {}) should be < len (is {})",
            index,
            len
        );

        self.0[index..].rotate_left(1);
        self.0.truncate(len - 1);
        self
    }
}

impl<V: Serialize> Patch<V> {
    /// Renders one operation per line, see [`Operation::render_text`].
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    /// Writes the patch to `sink` as a JSON array followed by a newline.
    ///
    /// With `escape_html` set, `<`, `>` and `&` inside strings are written as
    /// unicode escapes. When `prefix` or `indent` is non-empty, every element
    /// starts on its own line beginning with `prefix` and one `indent` per
    /// nesting level.
    ///
    /// Operations are written as they are serialized, so on error `sink` may
    /// hold a truncated document.
    pub fn encode<W: Write>(
        &self,
        sink: W,
        escape_html: bool,
        prefix: &str,
        indent: &str,
    ) -> Result<(), EncodeError> {
        tracing::debug!(
            operations = self.len(),
            escape_html,
            pretty = !prefix.is_empty() || !indent.is_empty(),
            "encode patch"
        );

        if escape_html {
            self.encode_with::<HtmlSafe, W>(sink, prefix, indent)
        } else {
            self.encode_with::<Verbatim, W>(sink, prefix, indent)
        }
    }

    #[inline]
    pub fn encode_with_options<W: Write>(
        &self,
        sink: W,
        options: &EncodeOptions,
    ) -> Result<(), EncodeError> {
        self.encode(sink, options.escape_html, &options.prefix, &options.indent)
    }

    fn encode_with<E: Escaping, W: Write>(
        &self,
        mut sink: W,
        prefix: &str,
        indent: &str,
    ) -> Result<(), EncodeError> {
        let mut ser = serde_json::Serializer::with_formatter(
            &mut sink,
            PatchFormatter::<E>::new(prefix, indent),
        );

        let mut seq = ser.serialize_seq(Some(self.len()))?;
        for (index, operation) in self.iter().enumerate() {
            let projection = operation.projection();
            check_finite(&projection)
                .and_then(|()| seq.serialize_element(&projection))
                .map_err(|err| EncodeError::operation(index, err))?;
        }
        seq.end()?;

        sink.write_all(b"\n")?;
        Ok(())
    }
}

impl<V: Serialize> Display for Patch<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, operation) in self.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(&operation.render_text())?;
        }
        Ok(())
    }
}

impl<V: Serialize> Serialize for Patch<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

use std::{io, marker::PhantomData};

use serde_json::ser::Formatter;

/// Decides which characters of a string are written as `\uXXXX` escapes on
/// top of the escapes JSON itself requires.
pub(crate) trait Escaping {
    fn escapes(ch: char) -> bool;
}

/// Escapes `<`, `>` and `&` so the output can be embedded in HTML.
pub(crate) struct HtmlSafe;

/// Writes `<`, `>` and `&` literally.
pub(crate) struct Verbatim;

impl Escaping for Verbatim {
    #[inline]
    fn escapes(ch: char) -> bool {
        // U+2028 and U+2029 are valid in JSON strings but terminate lines in
        // JavaScript source.
        matches!(ch, '\u{2028}' | '\u{2029}')
    }
}

impl Escaping for HtmlSafe {
    #[inline]
    fn escapes(ch: char) -> bool {
        matches!(ch, '<' | '>' | '&') || Verbatim::escapes(ch)
    }
}

/// Lays out JSON either compactly or, when a prefix or indent unit is set,
/// one element per line starting with `prefix` followed by one `indent` per
/// nesting level. The first line is never prefixed.
pub(crate) struct PatchFormatter<'a, E> {
    prefix: &'a [u8],
    indent: &'a [u8],
    pretty: bool,
    depth: usize,
    has_value: bool,
    escaping: PhantomData<E>,
}

impl<'a, E: Escaping> PatchFormatter<'a, E> {
    pub(crate) fn new(prefix: &'a str, indent: &'a str) -> Self {
        Self {
            prefix: prefix.as_bytes(),
            indent: indent.as_bytes(),
            pretty: !prefix.is_empty() || !indent.is_empty(),
            depth: 0,
            has_value: false,
            escaping: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn compact() -> Self {
        Self::new("", "")
    }

    fn newline<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b"\n")?;
        writer.write_all(self.prefix)?;
        for _ in 0..self.depth {
            writer.write_all(self.indent)?;
        }
        Ok(())
    }

    fn begin_container<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        open: &[u8],
    ) -> io::Result<()> {
        self.depth += 1;
        self.has_value = false;
        writer.write_all(open)
    }

    fn end_container<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        close: &[u8],
    ) -> io::Result<()> {
        self.depth -= 1;
        if self.pretty && self.has_value {
            self.newline(writer)?;
        }
        writer.write_all(close)
    }

    fn begin_entry<W: ?Sized + io::Write>(&self, writer: &mut W, first: bool) -> io::Result<()> {
        if !first {
            writer.write_all(b",")?;
        }
        if self.pretty {
            self.newline(writer)?;
        }
        Ok(())
    }
}

impl<E: Escaping> Formatter for PatchFormatter<'_, E> {
    #[inline]
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.begin_container(writer, b"[")
    }

    #[inline]
    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.end_container(writer, b"]")
    }

    #[inline]
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.begin_entry(writer, first)
    }

    #[inline]
    fn end_array_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    #[inline]
    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.begin_container(writer, b"{")
    }

    #[inline]
    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.end_container(writer, b"}")
    }

    #[inline]
    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.begin_entry(writer, first)
    }

    #[inline]
    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(if self.pretty { b": " } else { b":" })
    }

    #[inline]
    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;

        for (idx, ch) in fragment.char_indices() {
            if E::escapes(ch) {
                writer.write_all(fragment[start..idx].as_bytes())?;
                write!(writer, "\\u{:04x}", u32::from(ch))?;
                start = idx + ch.len_utf8();
            }
        }

        writer.write_all(fragment[start..].as_bytes())
    }
}

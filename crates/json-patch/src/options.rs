/// How [`Patch::encode_with_options`](crate::Patch::encode_with_options)
/// lays out and escapes its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    pub escape_html: bool,
    pub prefix: String,
    pub indent: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            escape_html: true,
            prefix: String::new(),
            indent: String::new(),
        }
    }
}

impl EncodeOptions {
    #[must_use]
    pub fn escape_html(self, escape_html: bool) -> Self {
        Self {
            escape_html,
            ..self
        }
    }

    #[must_use]
    pub fn indent(self, prefix: impl Into<String>, indent: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            indent: indent.into(),
            ..self
        }
    }

    /// Whether the output spans multiple lines.
    #[inline]
    pub fn is_pretty(&self) -> bool {
        !self.prefix.is_empty() || !self.indent.is_empty()
    }
}

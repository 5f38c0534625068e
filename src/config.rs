use clap::Parser;
use json_patch::{EncodeOptions, Patch};

use crate::operation_arg::OperationArg;

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Config {
    /// Write `<`, `>` and `&` literally instead of as unicode escapes
    #[clap(long)]
    pub(crate) no_escape_html: bool,
    /// Written at the start of every output line but the first
    #[clap(long)]
    pub(crate) prefix: Option<String>,
    /// Written once per nesting level; output is compact when this and the prefix are empty
    #[clap(long)]
    pub(crate) indent: Option<String>,
    /// `add:<path>=<text>`, `replace:…`, `test:…`, `remove:<path>`, `move:<from>-><path>` or `copy:…`
    #[clap(required = true)]
    pub(crate) operations: Vec<OperationArg>,
}

impl Config {
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions::default()
            .escape_html(!self.no_escape_html)
            .indent(
                self.prefix.clone().unwrap_or_default(),
                self.indent.clone().unwrap_or_default(),
            )
    }

    pub fn into_patch(self) -> Patch {
        self.operations.into_iter().map(|arg| arg.0).collect()
    }
}

#[cfg(test)]
mod tests {
    use json_patch::OperationType;

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["jsondiff", "remove:/a"]).unwrap();
        assert_eq!(config.encode_options(), EncodeOptions::default());
        assert_eq!(config.into_patch().len(), 1);
    }

    #[test]
    fn options() {
        let config = Config::try_parse_from([
            "jsondiff",
            "--no-escape-html",
            "--indent",
            "  ",
            "--prefix",
            ">",
            "add:/a=<b>",
            "move:/a->/b",
        ])
        .unwrap();
        assert_eq!(
            config.encode_options(),
            EncodeOptions::default().escape_html(false).indent(">", "  ")
        );

        let ops: Vec<_> = config.into_patch().iter().map(|op| op.op).collect();
        assert_eq!(ops, [OperationType::Add, OperationType::Move]);
    }

    #[test]
    fn requires_operations() {
        assert!(Config::try_parse_from(["jsondiff"]).is_err());
        assert!(Config::try_parse_from(["jsondiff", "add:/a"]).is_err());
    }
}

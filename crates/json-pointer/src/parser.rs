use std::borrow::Cow;

use crate::ParseJsonPointerError;

pub(crate) struct JsonPointerParser<'a> {
    input: &'a str,
}

impl<'a> JsonPointerParser<'a> {
    #[inline]
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input }
    }
}

impl<'a> Iterator for JsonPointerParser<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        // `parse_json_pointer` checks the leading slash before iterating.
        let rest = self.input.strip_prefix('/')?;

        let (token, rest) = match memchr::memchr(b'/', rest.as_bytes()) {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        self.input = rest;
        Some(unescape_token(token))
    }
}

/// Decodes `~0` to `~` and `~1` to `/`. Any other `~` is kept as is.
fn unescape_token(token: &str) -> Cow<'_, str> {
    if memchr::memchr(b'~', token.as_bytes()).is_none() {
        return Cow::Borrowed(token);
    }

    let mut s = String::with_capacity(token.len());
    let mut chars = token.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '~' {
            s.push(ch);
            continue;
        }
        match chars.peek() {
            Some('0') => {
                s.push('~');
                chars.next();
            }
            Some('1') => {
                s.push('/');
                chars.next();
            }
            _ => s.push('~'),
        }
    }

    Cow::Owned(s)
}

pub(crate) fn parse_json_pointer(input: &str) -> Result<Vec<String>, ParseJsonPointerError> {
    if !input.is_empty() && !input.starts_with('/') {
        return Err(ParseJsonPointerError {
            input: input.to_string(),
        });
    }

    Ok(JsonPointerParser::new(input)
        .map(Cow::into_owned)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! tokens {
        ($($value:literal),*) => {
            &[$($value.to_string()),*]
        }
    }

    fn check(input: &str, tokens: &[String]) {
        assert_eq!(parse_json_pointer(input).unwrap(), tokens);
    }

    #[test]
    fn test_parser() {
        check("", tokens!());
        check("/foo", tokens!("foo"));
        check("/foo/0", tokens!("foo", "0"));
        check("/", tokens!(""));
        check("//", tokens!("", ""));
        check("/a~1b", tokens!("a/b"));
        check("/c%d", tokens!("c%d"));
        check("/e^f", tokens!("e^f"));
        check("/g|h", tokens!("g|h"));
        check("/ ", tokens!(" "));
        check("/m~0n", tokens!("m~n"));
        check("/~01", tokens!("~1"));
        check("/a~c/~1bc/~2d", tokens!("a~c", "/bc", "~2d"));
        check("/trailing~", tokens!("trailing~"));
        check("/ünï/cødé", tokens!("ünï", "cødé"));
    }

    #[test]
    fn test_parser_rejects_missing_slash() {
        let err = parse_json_pointer("foo/bar").unwrap_err();
        assert_eq!(err.input(), "foo/bar");
        assert!(parse_json_pointer("#/foo").is_err());
    }
}

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar value: the right-hand side of `key = value` or a list element.
///
/// The payload is literal token text. A `String` read from source keeps its
/// surrounding quotes; a `String` built in code may hold bare content and is
/// quoted on output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Scalar {
    String(String),
    Number(String),
    Identifier(String),
}

impl Scalar {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn number(n: impl fmt::Display) -> Self {
        Self::Number(n.to_string())
    }

    pub fn identifier(s: impl Into<String>) -> Self {
        Self::Identifier(s.into())
    }

    /// The `yes`/`no` identifiers used for script booleans.
    pub fn yes_no(flag: bool) -> Self {
        Self::Identifier(if flag { "yes" } else { "no" }.to_string())
    }

    /// Returns the stored text exactly as held.
    pub fn raw(&self) -> &str {
        match self {
            Self::String(s) | Self::Number(s) | Self::Identifier(s) => s,
        }
    }

    /// Returns the logical content: quotes removed and escapes resolved for
    /// strings read from source, the stored text otherwise.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::String(s) if is_delimited(s) => unescape(strip_quotes(s)),
            other => Cow::Borrowed(other.raw()),
        }
    }

    /// Returns the text written to output.
    ///
    /// A string with a quote at either end is emitted verbatim, so a value
    /// stored as `"bar"` is never double quoted.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Self::String(s) if !is_delimited(s) => Cow::Owned(format!("\"{}\"", escape(s))),
            other => Cow::Borrowed(other.raw()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.text().trim().parse().ok()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.text().trim().parse().ok()
    }

    /// Reads `yes`/`no` as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self.text().as_ref() {
            "yes" => Some(true),
            "no" => Some(false),
            _ => None,
        }
    }
}

fn is_delimited(s: &str) -> bool {
    s.starts_with('"') || s.ends_with('"')
}

fn strip_quotes(s: &str) -> &str {
    let inner = s.strip_prefix('"').unwrap_or(s);
    match inner.strip_suffix('"') {
        // `"a\"` is unterminated: the final quote is escaped content.
        Some(body) if !ends_with_escape(body) => body,
        _ => inner,
    }
}

fn ends_with_escape(s: &str) -> bool {
    s.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('\\') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    Cow::Owned(out)
}

fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['"', '\\']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    Cow::Owned(out)
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::number(n)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Self::number(n)
    }
}

impl From<bool> for Scalar {
    fn from(flag: bool) -> Self {
        Self::yes_no(flag)
    }
}

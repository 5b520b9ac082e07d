//! Markup rendering of the source for editor syntax highlighting
//!
//! Built alongside tokenization; downstream stages never read it.

use crate::frontend::token::TokenKind;

/// CSS class attached to a highlighted fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Keyword,
    Comment,
    Number,
    String,
    Error,
}

impl Class {
    fn as_str(&self) -> &'static str {
        match self {
            Class::Keyword => "keyword",
            Class::Comment => "comment",
            Class::Number => "number",
            Class::String => "string",
            Class::Error => "error",
        }
    }

    /// Class for a recognized token, `None` when it is rendered as plain text
    pub fn for_kind(kind: TokenKind) -> Option<Class> {
        match kind {
            k if k.is_keyword() => Some(Class::Keyword),
            TokenKind::LineComment | TokenKind::BlockComment => Some(Class::Comment),
            TokenKind::IntLit | TokenKind::DecimalLit => Some(Class::Number),
            TokenKind::StringLit | TokenKind::CharLit => Some(Class::String),
            TokenKind::Unknown => Some(Class::Error),
            _ => None,
        }
    }
}

/// Accumulates HTML-escaped markup
#[derive(Debug, Default)]
pub struct Highlighter {
    enabled: bool,
    output: String,
}

impl Highlighter {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            output: String::new(),
        }
    }

    pub fn plain(&mut self, text: &str) {
        if self.enabled {
            escape_into(&mut self.output, text);
        }
    }

    pub fn plain_char(&mut self, c: char) {
        if self.enabled {
            let mut buf = [0u8; 4];
            escape_into(&mut self.output, c.encode_utf8(&mut buf));
        }
    }

    pub fn span(&mut self, class: Class, text: &str) {
        if !self.enabled {
            return;
        }
        self.output.push_str("<span class=\"");
        self.output.push_str(class.as_str());
        self.output.push_str("\">");
        escape_into(&mut self.output, text);
        self.output.push_str("</span>");
    }

    /// Render a token according to its kind
    pub fn token(&mut self, kind: TokenKind, text: &str) {
        match Class::for_kind(kind) {
            Some(class) => self.span(class, text),
            None => self.plain(text),
        }
    }

    pub fn finish(self) -> String {
        self.output
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

//! Token definitions for the C# subset

use std::fmt;

use serde::{Serialize, Serializer};

use crate::utils::Position;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub lexeme: String,
    #[serde(rename = "row")]
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, pos: Position) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line: pos.line,
            column: pos.column,
        }
    }

    /// End-of-input marker used by the parser
    pub fn eof(pos: Position) -> Self {
        Self::new(TokenKind::Eof, "", pos)
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ============ Delimiters ============
    /// {
    LBrace,
    /// }
    RBrace,
    /// [
    LBracket,
    /// ]
    RBracket,
    /// (
    LParen,
    /// )
    RParen,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// .
    Dot,

    // ============ Operators ============
    /// =
    Assign,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// ++
    Increment,
    /// --
    Decrement,
    /// ==
    EqEq,
    /// !=
    NotEq,
    /// <
    Lt,
    /// >
    Gt,
    /// <=
    LtEq,
    /// >=
    GtEq,

    // ============ Identifiers and Literals ============
    Identifier,
    IntLit,
    DecimalLit,
    StringLit,
    CharLit,

    // ============ Trivia ============
    /// // ...
    LineComment,
    /// /* ... */
    BlockComment,

    // ============ Keywords ============
    Using,
    System,
    Public,
    Class,
    Static,
    Void,
    Main,
    /// string
    StringType,
    /// int
    IntType,
    /// float
    FloatType,
    /// char
    CharType,
    /// bool
    BoolType,
    False,
    True,
    Console,
    WriteLine,
    If,
    Else,
    For,

    // ============ Special ============
    /// End of input (parser only)
    Eof,
    /// Unrecognized input (lexical errors)
    Unknown,
}

impl TokenKind {
    /// Look up a reserved word. Matching is exact and case-sensitive.
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "using" => Some(TokenKind::Using),
            "System" => Some(TokenKind::System),
            "public" => Some(TokenKind::Public),
            "class" => Some(TokenKind::Class),
            "static" => Some(TokenKind::Static),
            "void" => Some(TokenKind::Void),
            "Main" => Some(TokenKind::Main),
            "string" => Some(TokenKind::StringType),
            "int" => Some(TokenKind::IntType),
            "float" => Some(TokenKind::FloatType),
            "char" => Some(TokenKind::CharType),
            "bool" => Some(TokenKind::BoolType),
            "false" => Some(TokenKind::False),
            "true" => Some(TokenKind::True),
            "Console" => Some(TokenKind::Console),
            "WriteLine" => Some(TokenKind::WriteLine),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "for" => Some(TokenKind::For),
            _ => None,
        }
    }

    /// Check if this token is a reserved word
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Using
                | TokenKind::System
                | TokenKind::Public
                | TokenKind::Class
                | TokenKind::Static
                | TokenKind::Void
                | TokenKind::Main
                | TokenKind::StringType
                | TokenKind::IntType
                | TokenKind::FloatType
                | TokenKind::CharType
                | TokenKind::BoolType
                | TokenKind::False
                | TokenKind::True
                | TokenKind::Console
                | TokenKind::WriteLine
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::For
        )
    }

    /// Comments carry no meaning for the grammar
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Primitive type keywords that start a declaration
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            TokenKind::IntType
                | TokenKind::FloatType
                | TokenKind::StringType
                | TokenKind::CharType
                | TokenKind::BoolType
        )
    }

    /// Stable name used in reports and diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LBrace => "KEY_O",
            TokenKind::RBrace => "KEY_C",
            TokenKind::LBracket => "BRA_O",
            TokenKind::RBracket => "BRA_C",
            TokenKind::LParen => "PAR_O",
            TokenKind::RParen => "PAR_C",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "PERIOD",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MULT",
            TokenKind::Slash => "DIV",
            TokenKind::Increment => "INC",
            TokenKind::Decrement => "DEC",
            TokenKind::EqEq => "EQUAL",
            TokenKind::NotEq => "DIFF",
            TokenKind::Lt => "LESS",
            TokenKind::Gt => "GREATER",
            TokenKind::LtEq => "LESS_EQ",
            TokenKind::GtEq => "GREATER_EQ",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::IntLit => "INTEGER",
            TokenKind::DecimalLit => "DECIMAL",
            TokenKind::StringLit => "STRING",
            TokenKind::CharLit => "CHAR",
            TokenKind::LineComment => "COMMENT",
            TokenKind::BlockComment => "MULTICOMMENT",
            TokenKind::Using => "R_USING",
            TokenKind::System => "R_SYSTEM",
            TokenKind::Public => "R_PUBLIC",
            TokenKind::Class => "R_CLASS",
            TokenKind::Static => "R_STATIC",
            TokenKind::Void => "R_VOID",
            TokenKind::Main => "R_MAIN",
            TokenKind::StringType => "R_STRING",
            TokenKind::IntType => "R_INT",
            TokenKind::FloatType => "R_FLOAT",
            TokenKind::CharType => "R_CHAR",
            TokenKind::BoolType => "R_BOOL",
            TokenKind::False => "R_FALSE",
            TokenKind::True => "R_TRUE",
            TokenKind::Console => "R_CONSOLE",
            TokenKind::WriteLine => "R_WRITELINE",
            TokenKind::If => "R_IF",
            TokenKind::Else => "R_ELSE",
            TokenKind::For => "R_FOR",
            TokenKind::Eof => "EOF",
            TokenKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(TokenKind::keyword_from_str("Console"), Some(TokenKind::Console));
        assert_eq!(TokenKind::keyword_from_str("console"), None);
        assert_eq!(TokenKind::keyword_from_str("main"), None);
        assert_eq!(TokenKind::keyword_from_str("integer"), None);
    }

    #[test]
    fn test_every_keyword_round_trips() {
        for word in [
            "using", "System", "public", "class", "static", "void", "Main", "string", "int",
            "float", "char", "bool", "false", "true", "Console", "WriteLine", "if", "else", "for",
        ] {
            let kind = TokenKind::keyword_from_str(word).expect("reserved word");
            assert!(kind.is_keyword(), "{word} should be a keyword");
        }
    }

    #[test]
    fn test_token_serializes_with_wire_names() {
        let token = Token::new(TokenKind::IntType, "int", Position::new(4, 5));
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["type"], "R_INT");
        assert_eq!(json["lexeme"], "int");
        assert_eq!(json["row"], 4);
        assert_eq!(json["column"], 5);
    }
}

//! Lexer for the C# subset
//!
//! A single-pass deterministic finite automaton over the characters of the
//! source. One sentinel position is appended to the input to signal the end;
//! every state has a transition for it, so scanning always terminates.
//!
//! Accepting transitions that are triggered by a lookahead character do not
//! consume it: the automaton returns to [`State::Start`] and re-examines the
//! same character.

use log::{debug, trace};

use crate::frontend::highlight::{Class, Highlighter};
use crate::frontend::token::{Token, TokenKind};
use crate::utils::Position;

/// Columns a tab advances
const TAB_WIDTH: usize = 4;

/// Everything the lexer produces for one source text
#[derive(Debug, Clone, Default)]
pub struct LexOutput {
    /// Recognized tokens in source order (comments included)
    pub tokens: Vec<Token>,
    /// Unrecognized input, as tokens of kind [`TokenKind::Unknown`]
    pub errors: Vec<Token>,
    /// Highlight markup (empty when highlighting is disabled)
    pub markup: String,
}

/// Tokenize `source` without producing markup
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Token>) {
    let output = Lexer::new(source).tokenize();
    (output.tokens, output.errors)
}

/// Automaton states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    // Two-character operator disambiguation
    Assign,
    Plus,
    Minus,
    Bang,
    Less,
    Greater,
    Slash,
    // Comments
    LineComment,
    BlockComment,
    BlockCommentStar,
    // Words and numbers
    Identifier,
    Integer,
    DecimalPoint,
    Decimal,
    // Quoted literals
    Str,
    StrEscape,
    CharOpen,
    CharEscape,
    CharBody,
    CharOverflow,
}

/// What the automaton did with the character it was fed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Consume,
    Reexamine,
}

/// The lexer state
pub struct Lexer {
    /// Source characters
    source: Vec<char>,
    /// Index of the character being examined; `source.len()` is the sentinel
    pos: usize,
    state: State,
    /// Characters accumulated for the current token
    lexeme: String,
    /// Position of the next character
    line: usize,
    column: usize,
    /// Position of the first character of the current token
    start: Position,
    tokens: Vec<Token>,
    errors: Vec<Token>,
    highlight: Highlighter,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            state: State::Start,
            lexeme: String::new(),
            line: 1,
            column: 1,
            start: Position::start(),
            tokens: Vec::new(),
            errors: Vec::new(),
            highlight: Highlighter::new(false),
        }
    }

    /// Also render highlight markup while scanning
    pub fn with_highlight(mut self, enabled: bool) -> Self {
        self.highlight = Highlighter::new(enabled);
        self
    }

    /// Run the automaton over the whole input
    pub fn tokenize(mut self) -> LexOutput {
        // The extra iteration at `pos == source.len()` feeds the sentinel.
        while self.pos <= self.source.len() {
            let input = self.source.get(self.pos).copied();
            if self.step(input) == Step::Consume {
                self.pos += 1;
            }
        }

        debug!(
            "lexical analysis finished: {} tokens, {} errors",
            self.tokens.len(),
            self.errors.len()
        );

        LexOutput {
            tokens: self.tokens,
            errors: self.errors,
            markup: self.highlight.finish(),
        }
    }

    /// Feed one character (`None` is the end-of-input sentinel)
    fn step(&mut self, input: Option<char>) -> Step {
        match self.state {
            State::Start => self.start(input),
            State::Assign => self.upgrade(input, '=', TokenKind::EqEq, Some(TokenKind::Assign)),
            State::Plus => self.upgrade(input, '+', TokenKind::Increment, Some(TokenKind::Plus)),
            State::Minus => self.upgrade(input, '-', TokenKind::Decrement, Some(TokenKind::Minus)),
            State::Bang => self.upgrade(input, '=', TokenKind::NotEq, None),
            State::Less => self.upgrade(input, '=', TokenKind::LtEq, Some(TokenKind::Lt)),
            State::Greater => self.upgrade(input, '=', TokenKind::GtEq, Some(TokenKind::Gt)),
            State::Slash => match input {
                Some('/') => self.shift('/', State::LineComment),
                Some('*') => self.shift('*', State::BlockComment),
                _ => self.accept(TokenKind::Slash),
            },
            State::LineComment => match input {
                Some(c) if !is_newline(c) => self.shift(c, State::LineComment),
                _ => self.accept(TokenKind::LineComment),
            },
            State::BlockComment => match input {
                Some('*') => self.shift('*', State::BlockCommentStar),
                Some(c) => self.shift(c, State::BlockComment),
                None => self.reject(),
            },
            State::BlockCommentStar => match input {
                Some('/') => self.finish('/', TokenKind::BlockComment),
                Some('*') => self.shift('*', State::BlockCommentStar),
                _ => {
                    self.state = State::BlockComment;
                    Step::Reexamine
                }
            },
            State::Identifier => match input {
                Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
                    self.shift(c, State::Identifier)
                }
                _ => {
                    let kind = TokenKind::keyword_from_str(&self.lexeme)
                        .unwrap_or(TokenKind::Identifier);
                    self.accept(kind)
                }
            },
            State::Integer => match input {
                Some(c) if c.is_ascii_digit() => self.shift(c, State::Integer),
                Some('.') => self.shift('.', State::DecimalPoint),
                _ => self.accept(TokenKind::IntLit),
            },
            State::DecimalPoint => match input {
                Some(c) if c.is_ascii_digit() => self.shift(c, State::Decimal),
                // "3." is malformed, not an integer followed by a period
                _ => self.reject(),
            },
            State::Decimal => match input {
                Some(c) if c.is_ascii_digit() => self.shift(c, State::Decimal),
                _ => self.accept(TokenKind::DecimalLit),
            },
            State::Str => match input {
                Some('"') => self.finish('"', TokenKind::StringLit),
                Some('\\') => self.shift('\\', State::StrEscape),
                Some(c) if !is_newline(c) => self.shift(c, State::Str),
                _ => self.reject(),
            },
            State::StrEscape => match input {
                Some(c) if !is_newline(c) => self.shift(c, State::Str),
                _ => self.reject(),
            },
            State::CharOpen => match input {
                // '' has no character; the closing quote belongs to the error
                Some('\'') => {
                    self.push('\'');
                    self.reject_here()
                }
                Some('\\') => self.shift('\\', State::CharEscape),
                Some(c) if !is_newline(c) => self.shift(c, State::CharBody),
                _ => self.reject(),
            },
            State::CharEscape => match input {
                Some(c) if !is_newline(c) => self.shift(c, State::CharBody),
                _ => self.reject(),
            },
            State::CharBody => match input {
                Some('\'') => self.finish('\'', TokenKind::CharLit),
                Some(c) if !is_newline(c) => self.shift(c, State::CharOverflow),
                _ => self.reject(),
            },
            // More than one character: swallow up to the closing quote so the
            // leftovers are reported once
            State::CharOverflow => match input {
                Some('\'') => {
                    self.push('\'');
                    self.reject_here()
                }
                Some(c) if !is_newline(c) => self.shift(c, State::CharOverflow),
                _ => self.reject(),
            },
        }
    }

    fn start(&mut self, input: Option<char>) -> Step {
        let c = match input {
            Some(c) => c,
            None => return Step::Consume,
        };

        match c {
            '{' => self.single(c, TokenKind::LBrace),
            '}' => self.single(c, TokenKind::RBrace),
            '[' => self.single(c, TokenKind::LBracket),
            ']' => self.single(c, TokenKind::RBracket),
            '(' => self.single(c, TokenKind::LParen),
            ')' => self.single(c, TokenKind::RParen),
            ';' => self.single(c, TokenKind::Semicolon),
            ',' => self.single(c, TokenKind::Comma),
            '.' => self.single(c, TokenKind::Dot),
            '*' => self.single(c, TokenKind::Star),
            '=' => self.begin(c, State::Assign),
            '+' => self.begin(c, State::Plus),
            '-' => self.begin(c, State::Minus),
            '!' => self.begin(c, State::Bang),
            '<' => self.begin(c, State::Less),
            '>' => self.begin(c, State::Greater),
            '/' => self.begin(c, State::Slash),
            '"' => self.begin(c, State::Str),
            '\'' => self.begin(c, State::CharOpen),
            ' ' => {
                self.column += 1;
                self.highlight.plain_char(c);
                Step::Consume
            }
            '\t' => {
                self.column += TAB_WIDTH;
                self.highlight.plain_char(c);
                Step::Consume
            }
            '\n' => {
                self.line += 1;
                self.column = 1;
                self.highlight.plain_char(c);
                Step::Consume
            }
            '\r' => {
                self.column = 1;
                self.highlight.plain_char(c);
                Step::Consume
            }
            c if c.is_ascii_alphabetic() => self.begin(c, State::Identifier),
            c if c.is_ascii_digit() => self.begin(c, State::Integer),
            _ => {
                let pos = Position::new(self.line, self.column);
                trace!("unrecognized character {:?} at {}", c, pos);
                let text = c.to_string();
                self.highlight.span(Class::Error, &text);
                self.errors.push(Token::new(TokenKind::Unknown, text, pos));
                self.column += 1;
                Step::Consume
            }
        }
    }

    /// Choose between the short and long form of a two-character operator
    fn upgrade(
        &mut self,
        input: Option<char>,
        second: char,
        long: TokenKind,
        short: Option<TokenKind>,
    ) -> Step {
        if input == Some(second) {
            return self.finish(second, long);
        }
        match short {
            Some(kind) => self.accept(kind),
            None => self.reject(),
        }
    }

    // ==================== Transitions ====================

    /// Leave the start state with the first character of a token
    fn begin(&mut self, c: char, next: State) -> Step {
        self.start = Position::new(self.line, self.column);
        self.lexeme.clear();
        self.push(c);
        self.state = next;
        Step::Consume
    }

    /// A one-character token, complete on its own
    fn single(&mut self, c: char, kind: TokenKind) -> Step {
        self.begin(c, State::Start);
        self.emit(kind);
        Step::Consume
    }

    fn shift(&mut self, c: char, next: State) -> Step {
        self.push(c);
        self.state = next;
        Step::Consume
    }

    /// Consume the closing character and emit
    fn finish(&mut self, c: char, kind: TokenKind) -> Step {
        self.push(c);
        self.emit(kind);
        Step::Consume
    }

    /// Emit the pending token; the lookahead is examined again from the start state
    fn accept(&mut self, kind: TokenKind) -> Step {
        self.emit(kind);
        Step::Reexamine
    }

    /// Report the pending characters as an error; the lookahead is examined again
    fn reject(&mut self) -> Step {
        self.error();
        Step::Reexamine
    }

    /// Report the pending characters, including the one just pushed
    fn reject_here(&mut self) -> Step {
        self.error();
        Step::Consume
    }

    // ==================== Output ====================

    fn push(&mut self, c: char) {
        self.lexeme.push(c);
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    fn emit(&mut self, kind: TokenKind) {
        let lexeme = std::mem::take(&mut self.lexeme);
        self.highlight.token(kind, &lexeme);
        self.tokens.push(Token::new(kind, lexeme, self.start));
        self.state = State::Start;
    }

    fn error(&mut self) {
        let lexeme = std::mem::take(&mut self.lexeme);
        trace!("lexical error {:?} at {}", lexeme, self.start);
        self.highlight.span(Class::Error, &lexeme);
        self.errors.push(Token::new(TokenKind::Unknown, lexeme, self.start));
        self.state = State::Start;
    }
}

fn is_newline(c: char) -> bool {
    c == '\n' || c == '\r'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    fn lexemes(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.lexeme.as_str()).collect()
    }

    #[test]
    fn test_simple_declaration() {
        let (tokens, errors) = tokenize("int x = 10;");

        assert!(errors.is_empty());
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::IntType,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::IntLit,
                TokenKind::Semicolon,
            ]
        );
        assert_eq!(lexemes(&tokens), vec!["int", "x", "=", "10", ";"]);
    }

    #[test]
    fn test_positions() {
        let (tokens, _) = tokenize("int x\n  y\t= 1;");

        assert_eq!(tokens[0].position(), Position::new(1, 1));
        assert_eq!(tokens[1].position(), Position::new(1, 5));
        assert_eq!(tokens[2].position(), Position::new(2, 3));
        // tab advances four columns
        assert_eq!(tokens[3].position(), Position::new(2, 8));
        assert_eq!(tokens[4].position(), Position::new(2, 10));
    }

    #[test]
    fn test_keyword_needs_whole_word() {
        let (tokens, errors) = tokenize("integer int_x int");

        assert!(errors.is_empty());
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::IntType]
        );
        assert_eq!(tokens[0].lexeme, "integer");
    }

    #[test]
    fn test_two_character_operators() {
        let (tokens, errors) = tokenize("= == != < <= > >= + ++ - -- / *");

        assert!(errors.is_empty());
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Assign,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Plus,
                TokenKind::Increment,
                TokenKind::Minus,
                TokenKind::Decrement,
                TokenKind::Slash,
                TokenKind::Star,
            ]
        );
    }

    #[test]
    fn test_operators_without_spaces() {
        let (tokens, _) = tokenize("i++)x<=y");
        assert_eq!(lexemes(&tokens), vec!["i", "++", ")", "x", "<=", "y"]);
    }

    #[test]
    fn test_bare_bang_is_an_error_and_keeps_next_char() {
        let (tokens, errors) = tokenize("!x");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].lexeme, "!");
        assert_eq!(errors[0].kind, TokenKind::Unknown);
        assert_eq!(kinds(&tokens), vec![TokenKind::Identifier]);
        assert_eq!(tokens[0].column, 2);
    }

    #[test]
    fn test_decimal_literals() {
        let (tokens, errors) = tokenize("3.14 42");

        assert!(errors.is_empty());
        assert_eq!(kinds(&tokens), vec![TokenKind::DecimalLit, TokenKind::IntLit]);
        assert_eq!(lexemes(&tokens), vec!["3.14", "42"]);
    }

    #[test]
    fn test_decimal_point_without_digits() {
        let (tokens, errors) = tokenize("3.");

        assert!(tokens.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].lexeme, "3.");

        let (tokens, errors) = tokenize("3.;");
        assert_eq!(errors.len(), 1);
        assert_eq!(kinds(&tokens), vec![TokenKind::Semicolon]);
    }

    #[test]
    fn test_string_literal() {
        let (tokens, errors) = tokenize(r#"Console.WriteLine("hola mundo");"#);

        assert!(errors.is_empty());
        assert_eq!(tokens[4].kind, TokenKind::StringLit);
        assert_eq!(tokens[4].lexeme, "\"hola mundo\"");
    }

    #[test]
    fn test_string_escape_does_not_close() {
        let (tokens, errors) = tokenize(r#""say \"hi\"""#);

        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].lexeme, r#""say \"hi\"""#);
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, errors) = tokenize("\"abc");
        assert!(tokens.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].lexeme, "\"abc");

        let (tokens, errors) = tokenize("\"abc\nx;");
        assert_eq!(errors.len(), 1);
        assert_eq!(kinds(&tokens), vec![TokenKind::Identifier, TokenKind::Semicolon]);
        assert_eq!(tokens[0].position(), Position::new(2, 1));
    }

    #[test]
    fn test_char_literals() {
        let (tokens, errors) = tokenize("'a' '\\n'");
        assert!(errors.is_empty());
        assert_eq!(kinds(&tokens), vec![TokenKind::CharLit, TokenKind::CharLit]);
        assert_eq!(lexemes(&tokens), vec!["'a'", "'\\n'"]);
    }

    #[test]
    fn test_malformed_char_literals_report_once() {
        let (tokens, errors) = tokenize("'' x");
        assert_eq!(lexemes(&errors), vec!["''"]);
        assert_eq!(kinds(&tokens), vec![TokenKind::Identifier]);

        let (tokens, errors) = tokenize("'abc';");
        assert_eq!(lexemes(&errors), vec!["'abc'"]);
        assert_eq!(kinds(&tokens), vec![TokenKind::Semicolon]);
    }

    #[test]
    fn test_comments_are_tokens() {
        let (tokens, errors) = tokenize("// note\nint /* a\nb */ x");

        assert!(errors.is_empty());
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::LineComment,
                TokenKind::IntType,
                TokenKind::BlockComment,
                TokenKind::Identifier,
            ]
        );
        assert_eq!(tokens[0].lexeme, "// note");
        assert_eq!(tokens[1].position(), Position::new(2, 1));
        assert_eq!(tokens[2].lexeme, "/* a\nb */");
        assert_eq!(tokens[3].position(), Position::new(3, 6));
    }

    #[test]
    fn test_block_comment_with_stars() {
        let (tokens, errors) = tokenize("/** x **/y");
        assert!(errors.is_empty());
        assert_eq!(kinds(&tokens), vec![TokenKind::BlockComment, TokenKind::Identifier]);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let (tokens, errors) = tokenize("int /* never\nclosed");

        assert_eq!(kinds(&tokens), vec![TokenKind::IntType]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].lexeme, "/* never\nclosed");
        assert_eq!(errors[0].position(), Position::new(1, 5));
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        let (tokens, errors) = tokenize("x @ $ y");

        assert_eq!(kinds(&tokens), vec![TokenKind::Identifier, TokenKind::Identifier]);
        assert_eq!(lexemes(&errors), vec!["@", "$"]);
        assert_eq!(errors[0].position(), Position::new(1, 3));
        assert_eq!(errors[1].position(), Position::new(1, 5));
        assert_eq!(tokens[1].column, 7);
    }

    #[test]
    fn test_carriage_return_does_not_add_lines() {
        let (tokens, _) = tokenize("a\r\nb");
        assert_eq!(tokens[1].position(), Position::new(2, 1));
    }

    #[test]
    fn test_markup() {
        let output = Lexer::new("int x = 1; // c\n\"s\" @")
            .with_highlight(true)
            .tokenize();

        assert_eq!(
            output.markup,
            "<span class=\"keyword\">int</span> x = <span class=\"number\">1</span>; \
             <span class=\"comment\">// c</span>\n<span class=\"string\">&quot;s&quot;</span> \
             <span class=\"error\">@</span>"
        );
    }

    #[test]
    fn test_empty_input() {
        let output = Lexer::new("").tokenize();
        assert!(output.tokens.is_empty());
        assert!(output.errors.is_empty());
    }
}

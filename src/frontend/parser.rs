//! Parser for the C# subset
//!
//! Predictive recursive descent with one token of lookahead, driven by the
//! First sets in [`grammar`](crate::frontend::grammar). Every grammar rule is a
//! free function over an explicit [`ParseState`], so rules can be run on their
//! own (e.g. just `expression`) as well as from [`program`].
//!
//! Errors use panic-mode recovery: the first mismatch is recorded, then
//! tokens are discarded by every `expect` without further diagnostics until
//! a `;` or `}` comes up.

use log::{debug, trace};

use crate::frontend::ast::*;
use crate::frontend::grammar::Production;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Diagnostic, Position};

/// Lookahead position, recovery flag and collected diagnostics
#[derive(Debug, Clone)]
pub struct ParseState {
    /// Significant tokens, always terminated by an `Eof` token
    tokens: Vec<Token>,
    pos: usize,
    panicking: bool,
    diagnostics: Vec<Diagnostic>,
}

impl ParseState {
    /// Start before the first token. Comments are dropped here.
    pub fn new(tokens: &[Token]) -> Self {
        let mut significant: Vec<Token> = tokens
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .cloned()
            .collect();

        let end = tokens
            .last()
            .map(|t| Position::new(t.line, t.column + t.lexeme.chars().count()))
            .unwrap_or_default();
        significant.push(Token::eof(end));

        Self {
            tokens: significant,
            pos: 0,
            panicking: false,
            diagnostics: Vec::new(),
        }
    }

    // ==================== Lookahead ====================

    pub fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Does the lookahead begin `production`?
    pub fn at(&self, production: Production) -> bool {
        production.starts_with(self.kind())
    }

    pub fn is_at_end(&self) -> bool {
        self.kind() == TokenKind::Eof
    }

    pub fn is_panicking(&self) -> bool {
        self.panicking
    }

    // ==================== Matching ====================

    /// Consume a token of the given kind.
    ///
    /// While recovering, discards one token instead and returns `None`.
    pub fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.panicking {
            self.discard();
            return None;
        }

        if self.kind() == kind {
            return Some(self.bump());
        }

        self.report(&[kind]);
        None
    }

    /// Consume the lookahead whatever its kind (the caller has already
    /// dispatched on it)
    pub fn expect_current(&mut self) -> Option<Token> {
        let kind = self.kind();
        self.expect(kind)
    }

    fn bump(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Drop the lookahead; a following `;` or `}` ends recovery
    fn discard(&mut self) {
        if self.is_at_end() {
            return;
        }
        self.pos += 1;
        if matches!(self.kind(), TokenKind::Semicolon | TokenKind::RBrace) {
            trace!("resynchronized at {}", self.current().position());
            self.panicking = false;
        }
    }

    // ==================== Diagnostics ====================

    /// Record that the lookahead is not one of `expected` and start recovering
    pub fn report(&mut self, expected: &[TokenKind]) {
        let token = self.current();
        let expected = expected
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join("|");
        let (kind, description) = if token.kind == TokenKind::Eof {
            (
                token.kind.name().to_string(),
                format!("Got Token: {} when expect: {}", token.kind, expected),
            )
        } else {
            (
                token.lexeme.clone(),
                format!(
                    "Got Token: {} \"{}\" when expect: {}",
                    token.kind, token.lexeme, expected
                ),
            )
        };

        trace!("syntax error at {}: {}", token.position(), description);
        let diagnostic = Diagnostic::new(kind, description, token.position());
        self.diagnostics.push(diagnostic);
        self.panicking = true;
    }

    /// Report the lookahead against a production's First set, unless recovering
    pub fn report_unexpected(&mut self, production: Production) {
        if !self.panicking {
            self.report(production.first());
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Tree and diagnostics of one parse
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    /// Statements of `Main`; partial when diagnostics exist
    pub statements: Vec<Stmt>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a token sequence into the statements of `Main`
pub fn build(tokens: &[Token]) -> ParseOutput {
    let mut st = ParseState::new(tokens);
    let statements = program(&mut st);
    let diagnostics = st.into_diagnostics();
    debug!(
        "parse finished: {} statements, {} syntax errors",
        statements.len(),
        diagnostics.len()
    );
    ParseOutput {
        statements,
        diagnostics,
    }
}

// ==================== Program structure ====================

/// `using System; public class Name { static void Main(string[] args) { ... } }`
pub fn program(st: &mut ParseState) -> Vec<Stmt> {
    using_directive(st);
    let body = class_declaration(st);

    // Trailing input is only worth reporting on an otherwise clean parse
    if st.diagnostics().is_empty() && !st.is_at_end() {
        st.report(&[TokenKind::Eof]);
    }

    body
}

fn using_directive(st: &mut ParseState) {
    st.expect(TokenKind::Using);
    st.expect(TokenKind::System);
    st.expect(TokenKind::Semicolon);
}

fn class_declaration(st: &mut ParseState) -> Vec<Stmt> {
    st.expect(TokenKind::Public);
    st.expect(TokenKind::Class);
    st.expect(TokenKind::Identifier);
    st.expect(TokenKind::LBrace);
    let body = main_method(st);
    st.expect(TokenKind::RBrace);
    body
}

fn main_method(st: &mut ParseState) -> Vec<Stmt> {
    st.expect(TokenKind::Static);
    st.expect(TokenKind::Void);
    st.expect(TokenKind::Main);
    st.expect(TokenKind::LParen);
    st.expect(TokenKind::StringType);
    st.expect(TokenKind::LBracket);
    st.expect(TokenKind::RBracket);
    st.expect(TokenKind::Identifier);
    st.expect(TokenKind::RParen);
    st.expect(TokenKind::LBrace);
    let body = statement_list(st);
    st.expect(TokenKind::RBrace);
    body
}

// ==================== Statements ====================

/// One or more statements
pub fn statement_list(st: &mut ParseState) -> Vec<Stmt> {
    let mut stmts = Vec::new();
    stmts.extend(statement(st));
    while st.at(Production::StatementListTail) {
        stmts.extend(statement(st));
    }
    stmts
}

pub fn statement(st: &mut ParseState) -> Option<Stmt> {
    match st.kind() {
        kind if kind.is_type() => declaration(st).map(Stmt::Declaration),
        TokenKind::Identifier if st.peek_kind(1) == TokenKind::Assign => {
            assignment(st).map(Stmt::Assignment)
        }
        // A misspelled keyword such as `Consol.WriteLine(...)` lexes as an
        // identifier; blame the statement start rather than the `.`
        TokenKind::Identifier => {
            st.report_unexpected(Production::Statement);
            st.discard();
            None
        }
        TokenKind::Console => print(st).map(Stmt::Print),
        TokenKind::If => if_statement(st).map(Stmt::If),
        TokenKind::For => for_statement(st).map(Stmt::For),
        _ => {
            st.report_unexpected(Production::Statement);
            None
        }
    }
}

fn declaration(st: &mut ParseState) -> Option<Declaration> {
    let pos = st.current().position();
    let ty = st
        .expect_current()
        .and_then(|t| PrimitiveType::from_token(t.kind));
    let declarators = declarator_list(st);
    st.expect(TokenKind::Semicolon);

    Some(Declaration {
        ty: ty?,
        declarators: declarators?,
        pos,
    })
}

fn declarator_list(st: &mut ParseState) -> Option<Vec<Declarator>> {
    let mut declarators = vec![declarator(st)];
    while st.at(Production::DeclaratorListTail) {
        st.expect(TokenKind::Comma);
        declarators.push(declarator(st));
    }
    declarators.into_iter().collect()
}

fn declarator(st: &mut ParseState) -> Option<Declarator> {
    let pos = st.current().position();
    let name = st.expect(TokenKind::Identifier);
    let init = if st.at(Production::InitializerTail) {
        st.expect(TokenKind::Assign);
        Some(expression(st))
    } else {
        None
    };

    let init = match init {
        Some(expr) => Some(expr?),
        None => None,
    };
    Some(Declarator {
        name: name?.lexeme,
        init,
        pos,
    })
}

fn assignment(st: &mut ParseState) -> Option<Assignment> {
    let pos = st.current().position();
    let target = st.expect(TokenKind::Identifier);
    st.expect(TokenKind::Assign);
    let value = expression(st);
    st.expect(TokenKind::Semicolon);

    Some(Assignment {
        target: target?.lexeme,
        value: value?,
        pos,
    })
}

fn print(st: &mut ParseState) -> Option<Print> {
    let pos = st.current().position();
    st.expect(TokenKind::Console);
    st.expect(TokenKind::Dot);
    st.expect(TokenKind::WriteLine);
    st.expect(TokenKind::LParen);
    let value = expression(st);
    st.expect(TokenKind::RParen);
    st.expect(TokenKind::Semicolon);

    Some(Print { value: value?, pos })
}

fn if_statement(st: &mut ParseState) -> Option<IfStmt> {
    let pos = st.current().position();
    st.expect(TokenKind::If);
    st.expect(TokenKind::LParen);
    let condition = expression(st);
    st.expect(TokenKind::RParen);
    st.expect(TokenKind::LBrace);
    let then_block = statement_list(st);
    st.expect(TokenKind::RBrace);

    let else_block = if st.at(Production::ElseBranch) {
        st.expect(TokenKind::Else);
        st.expect(TokenKind::LBrace);
        let block = statement_list(st);
        st.expect(TokenKind::RBrace);
        Some(block)
    } else {
        None
    };

    Some(IfStmt {
        condition: condition?,
        then_block,
        else_block,
        pos,
    })
}

fn for_statement(st: &mut ParseState) -> Option<ForStmt> {
    let pos = st.current().position();
    st.expect(TokenKind::For);
    st.expect(TokenKind::LParen);
    let init = for_init(st);
    let condition = expression(st);
    st.expect(TokenKind::Semicolon);
    let step = for_step(st);
    st.expect(TokenKind::RParen);
    st.expect(TokenKind::LBrace);
    let body = statement_list(st);
    st.expect(TokenKind::RBrace);

    Some(ForStmt {
        init: init?,
        condition: condition?,
        step: step?,
        body,
        pos,
    })
}

/// Declaration or assignment, each bringing its own `;`
fn for_init(st: &mut ParseState) -> Option<ForInit> {
    match st.kind() {
        TokenKind::Identifier => assignment(st).map(ForInit::Assignment),
        kind if kind.is_type() => declaration(st).map(ForInit::Declaration),
        _ => {
            st.report_unexpected(Production::ForInit);
            None
        }
    }
}

fn for_step(st: &mut ParseState) -> Option<ForStep> {
    let pos = st.current().position();
    let target = st.expect(TokenKind::Identifier);

    let op = if st.at(Production::ForStepOperator) {
        st.expect_current().map(|t| match t.kind {
            TokenKind::Increment => StepOp::Increment,
            _ => StepOp::Decrement,
        })
    } else {
        st.report_unexpected(Production::ForStepOperator);
        None
    };

    Some(ForStep {
        target: target?.lexeme,
        op: op?,
        pos,
    })
}

// ==================== Expressions ====================

/// Arithmetic expression with at most one relational comparison
pub fn expression(st: &mut ParseState) -> Option<Expr> {
    let left = arithmetic(st);
    if !st.at(Production::Relational) {
        return left;
    }

    let op = st.expect_current();
    let right = arithmetic(st);
    let op = op?;
    Some(Expr::Relational {
        left: Box::new(left?),
        op: RelOp::from_token(op.kind)?,
        right: Box::new(right?),
        pos: op.position(),
    })
}

/// `term ((+|-) term)*`, left-associative
pub fn arithmetic(st: &mut ParseState) -> Option<Expr> {
    let mut left = term(st);
    while st.at(Production::ArithmeticTail) {
        let op = st.expect_current();
        let right = term(st);
        left = binary(left, op, right);
    }
    left
}

/// `factor ((*|/) factor)*`, left-associative
fn term(st: &mut ParseState) -> Option<Expr> {
    let mut left = factor(st);
    while st.at(Production::TermTail) {
        let op = st.expect_current();
        let right = factor(st);
        left = binary(left, op, right);
    }
    left
}

fn binary(left: Option<Expr>, op: Option<Token>, right: Option<Expr>) -> Option<Expr> {
    let op = op?;
    Some(Expr::Arithmetic {
        left: Box::new(left?),
        op: ArithOp::from_token(op.kind)?,
        right: Box::new(right?),
        parenthesized: false,
        pos: op.position(),
    })
}

fn factor(st: &mut ParseState) -> Option<Expr> {
    if !st.at(Production::Factor) {
        st.report_unexpected(Production::Factor);
        return None;
    }

    match st.kind() {
        TokenKind::LParen => {
            st.expect(TokenKind::LParen);
            let inner = arithmetic(st);
            st.expect(TokenKind::RParen);
            inner.map(Expr::parenthesize)
        }
        TokenKind::Identifier => st.expect(TokenKind::Identifier).map(|t| Expr::Identifier {
            pos: t.position(),
            name: t.lexeme,
        }),
        _ => {
            let token = st.expect_current()?;
            Some(Expr::Literal {
                kind: LiteralKind::from_token(token.kind)?,
                pos: token.position(),
                lexeme: token.lexeme,
            })
        }
    }
}

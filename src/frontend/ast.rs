//! Statement and expression tree
//!
//! Every node owns its children outright and remembers where it started in
//! the source.

use std::fmt;

use crate::frontend::token::TokenKind;
use crate::utils::Position;

/// Declarable primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Int,
    Float,
    String,
    Char,
    Bool,
}

impl PrimitiveType {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::IntType => Some(PrimitiveType::Int),
            TokenKind::FloatType => Some(PrimitiveType::Float),
            TokenKind::StringType => Some(PrimitiveType::String),
            TokenKind::CharType => Some(PrimitiveType::Char),
            TokenKind::BoolType => Some(PrimitiveType::Bool),
            _ => None,
        }
    }
}

/// A statement inside `Main`
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Declaration(Declaration),
    Assignment(Assignment),
    Print(Print),
    If(IfStmt),
    For(ForStmt),
}

impl Stmt {
    pub fn position(&self) -> Position {
        match self {
            Stmt::Declaration(d) => d.pos,
            Stmt::Assignment(a) => a.pos,
            Stmt::Print(p) => p.pos,
            Stmt::If(i) => i.pos,
            Stmt::For(f) => f.pos,
        }
    }
}

/// `int a = 1, b;`
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub ty: PrimitiveType,
    pub declarators: Vec<Declarator>,
    pub pos: Position,
}

/// One name of a declaration with its optional initializer
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: String,
    pub init: Option<Expr>,
    pub pos: Position,
}

/// `name = expr;`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: String,
    pub value: Expr,
    pub pos: Position,
}

/// `Console.WriteLine(expr);`
#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub value: Expr,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_block: Vec<Stmt>,
    pub else_block: Option<Vec<Stmt>>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: ForInit,
    pub condition: Expr,
    pub step: ForStep,
    pub body: Vec<Stmt>,
    pub pos: Position,
}

/// Initializer clause of a `for`
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Declaration(Declaration),
    Assignment(Assignment),
}

/// `i++` / `i--`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStep {
    pub target: String,
    pub op: StepOp,
    pub pos: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOp {
    Increment,
    Decrement,
}

impl StepOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepOp::Increment => "++",
            StepOp::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Arithmetic {
        left: Box<Expr>,
        op: ArithOp,
        right: Box<Expr>,
        /// Written inside parentheses in the source
        parenthesized: bool,
        pos: Position,
    },
    Relational {
        left: Box<Expr>,
        op: RelOp,
        right: Box<Expr>,
        pos: Position,
    },
    Identifier {
        name: String,
        pos: Position,
    },
    Literal {
        kind: LiteralKind,
        lexeme: String,
        pos: Position,
    },
}

impl Expr {
    pub fn position(&self) -> Position {
        match self {
            Expr::Arithmetic { pos, .. }
            | Expr::Relational { pos, .. }
            | Expr::Identifier { pos, .. }
            | Expr::Literal { pos, .. } => *pos,
        }
    }

    /// Mark an expression as written inside parentheses.
    /// Only arithmetic nodes keep the tag; a lone operand needs no grouping.
    pub fn parenthesize(self) -> Expr {
        match self {
            Expr::Arithmetic { left, op, right, pos, .. } => Expr::Arithmetic {
                left,
                op,
                right,
                parenthesized: true,
                pos,
            },
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Decimal,
    String,
    Char,
    Bool,
}

impl LiteralKind {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::IntLit => Some(LiteralKind::Int),
            TokenKind::DecimalLit => Some(LiteralKind::Decimal),
            TokenKind::StringLit => Some(LiteralKind::String),
            TokenKind::CharLit => Some(LiteralKind::Char),
            TokenKind::True | TokenKind::False => Some(LiteralKind::Bool),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(ArithOp::Add),
            TokenKind::Minus => Some(ArithOp::Sub),
            TokenKind::Star => Some(ArithOp::Mul),
            TokenKind::Slash => Some(ArithOp::Div),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl RelOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::EqEq => Some(RelOp::Eq),
            TokenKind::NotEq => Some(RelOp::Ne),
            TokenKind::Lt => Some(RelOp::Lt),
            TokenKind::LtEq => Some(RelOp::Le),
            TokenKind::Gt => Some(RelOp::Gt),
            TokenKind::GtEq => Some(RelOp::Ge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelOp::Eq => "==",
            RelOp::Ne => "!=",
            RelOp::Lt => "<",
            RelOp::Le => "<=",
            RelOp::Gt => ">",
            RelOp::Ge => ">=",
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! TypeScript code generation
//!
//! Walks the statement tree of `Main` and writes equivalent TypeScript.
//! Statements are laid out one per line; nested blocks are indented by
//! `indent_width` spaces per level (zero keeps the output flat).

use log::debug;

use crate::frontend::ast::*;

pub struct CodeGen {
    indent_width: usize,
    indent_level: usize,
    output: String,
}

impl CodeGen {
    pub fn new() -> Self {
        Self {
            indent_width: 0,
            indent_level: 0,
            output: String::new(),
        }
    }

    /// Spaces added per nesting level
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Generate TypeScript for a statement sequence
    pub fn generate(&mut self, stmts: &[Stmt]) -> String {
        for stmt in stmts {
            self.gen_stmt(stmt);
        }
        debug!(
            "generated {} statements, {} bytes",
            stmts.len(),
            self.output.len()
        );
        std::mem::take(&mut self.output)
    }

    fn gen_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Declaration(d) => {
                let line = format!("{};", declaration(d));
                self.emit_line(&line);
            }
            Stmt::Assignment(a) => {
                let line = format!("{};", assignment(a));
                self.emit_line(&line);
            }
            Stmt::Print(p) => {
                let line = format!("console.log({});", p.value.emit());
                self.emit_line(&line);
            }
            Stmt::If(i) => self.gen_if(i),
            Stmt::For(f) => self.gen_for(f),
        }
    }

    fn gen_if(&mut self, i: &IfStmt) {
        let header = format!("if ({}) {{", i.condition.emit());
        self.emit_line(&header);
        self.gen_block(&i.then_block);

        if let Some(ref else_block) = i.else_block {
            self.emit_line("} else {");
            self.gen_block(else_block);
        }
        self.emit_line("}");
    }

    fn gen_for(&mut self, f: &ForStmt) {
        let init = match &f.init {
            ForInit::Declaration(d) => declaration(d),
            ForInit::Assignment(a) => assignment(a),
        };
        let header = format!(
            "for ({}; {}; {}{}) {{",
            init,
            f.condition.emit(),
            f.step.target,
            f.step.op.as_str()
        );
        self.emit_line(&header);
        self.gen_block(&f.body);
        self.emit_line("}");
    }

    fn gen_block(&mut self, stmts: &[Stmt]) {
        self.indent_level += 1;
        for stmt in stmts {
            self.gen_stmt(stmt);
        }
        self.indent_level -= 1;
    }

    // ==================== Output ====================

    fn emit_line(&mut self, s: &str) {
        self.emit_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    fn emit_indent(&mut self) {
        let width = self.indent_level.saturating_mul(self.indent_width);
        self.output.extend(std::iter::repeat(' ').take(width));
    }
}

impl Default for CodeGen {
    fn default() -> Self {
        Self::new()
    }
}

fn type_name(ty: PrimitiveType) -> &'static str {
    match ty {
        PrimitiveType::Int | PrimitiveType::Float => "number",
        PrimitiveType::String | PrimitiveType::Char => "string",
        PrimitiveType::Bool => "boolean",
    }
}

/// `let a: number = 1, b: number` (no terminator)
fn declaration(d: &Declaration) -> String {
    let ty = type_name(d.ty);
    let names = d
        .declarators
        .iter()
        .map(|decl| match &decl.init {
            Some(init) => format!("{}: {} = {}", decl.name, ty, init.emit()),
            None => format!("{}: {}", decl.name, ty),
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("let {}", names)
}

fn assignment(a: &Assignment) -> String {
    format!("{} = {}", a.target, a.value.emit())
}

impl Stmt {
    /// TypeScript text of this statement, unindented
    pub fn emit(&self) -> String {
        CodeGen::new().generate(std::slice::from_ref(self))
    }
}

impl Expr {
    /// TypeScript text of this expression
    pub fn emit(&self) -> String {
        match self {
            Expr::Arithmetic {
                left,
                op,
                right,
                parenthesized,
                ..
            } => {
                let text = format!("{} {} {}", left.emit(), op, right.emit());
                if *parenthesized {
                    format!("({})", text)
                } else {
                    text
                }
            }
            Expr::Relational {
                left, op, right, ..
            } => format!("{} {} {}", left.emit(), op, right.emit()),
            Expr::Identifier { name, .. } => name.clone(),
            Expr::Literal { lexeme, .. } => lexeme.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::tokenize;
    use crate::frontend::parser::build;
    use pretty_assertions::assert_eq;

    fn wrap(body: &str) -> String {
        format!(
            "using System;\npublic class P {{\nstatic void Main(string[] args) {{\n{}\n}}\n}}",
            body
        )
    }

    fn translate(body: &str, indent: usize) -> String {
        let (tokens, errors) = tokenize(&wrap(body));
        assert!(errors.is_empty(), "lexical errors: {:?}", errors);
        let out = build(&tokens);
        assert!(out.diagnostics.is_empty(), "syntax errors: {:?}", out.diagnostics);
        CodeGen::new().with_indent(indent).generate(&out.statements)
    }

    #[test]
    fn test_if_flat() {
        let ts = translate(
            "int edad = 18;\nif (edad >= 18) { Console.WriteLine(\"ok\"); }",
            0,
        );
        assert_eq!(
            ts,
            "let edad: number = 18;\nif (edad >= 18) {\nconsole.log(\"ok\");\n}\n"
        );
    }

    #[test]
    fn test_declaration_types() {
        let ts = translate(
            "float f = 1.5;\nstring s = \"a\";\nchar c = 'x';\nbool b = true;",
            0,
        );
        assert_eq!(
            ts,
            "let f: number = 1.5;\nlet s: string = \"a\";\nlet c: string = 'x';\nlet b: boolean = true;\n"
        );
    }

    #[test]
    fn test_multiple_declarators() {
        let ts = translate("int a = 1, b, c = a + 2;", 0);
        assert_eq!(ts, "let a: number = 1, b: number, c: number = a + 2;\n");
    }

    #[test]
    fn test_if_else_indented() {
        let ts = translate(
            "if (x < 1) { x = 1; } else { x = 2; Console.WriteLine(x); }",
            4,
        );
        assert_eq!(
            ts,
            "if (x < 1) {\n    x = 1;\n} else {\n    x = 2;\n    console.log(x);\n}\n"
        );
    }

    #[test]
    fn test_for_loop() {
        let ts = translate(
            "for (int i = 0; i < 3; i++) { Console.WriteLine(i); }",
            2,
        );
        assert_eq!(
            ts,
            "for (let i: number = 0; i < 3; i++) {\n  console.log(i);\n}\n"
        );

        let ts = translate("for (i = 9; i > 0; i--) { x = i; }", 0);
        assert_eq!(ts, "for (i = 9; i > 0; i--) {\nx = i;\n}\n");
    }

    #[test]
    fn test_nested_indent() {
        let ts = translate(
            "for (int i = 0; i < 2; i++) { if (i == 1) { Console.WriteLine(i); } }",
            4,
        );
        assert_eq!(
            ts,
            "for (let i: number = 0; i < 2; i++) {\n    if (i == 1) {\n        console.log(i);\n    }\n}\n"
        );
    }

    #[test]
    fn test_parentheses() {
        let ts = translate("x = (a + b) * c;\ny = (a) - 1;", 0);
        assert_eq!(ts, "x = (a + b) * c;\ny = a - 1;\n");
    }

    #[test]
    fn test_statement_emit() {
        let (tokens, _) = tokenize(&wrap("Console.WriteLine(1 + 2 * 3);"));
        let out = build(&tokens);
        assert_eq!(out.statements[0].emit(), "console.log(1 + 2 * 3);\n");
    }
}

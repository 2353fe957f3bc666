//! Graphviz renderings of the parse tree and the AST.
//!
//! Nodes are numbered in pre-order starting at 0 and every edge points from
//! a parent to its child, so `dot -Tpng` draws the trees top-down.

use string_interner::DefaultStringInterner;
use crate::ast::{self, Arithmetic};
use crate::parse_tree::*;
use crate::source::SourceCode;

#[derive(Default)]
struct DotWriter {
    out: String,
    next_id: usize,
}

impl DotWriter {
    fn node(&mut self, label: &str) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.out.push_str(&format!("\t{} [label=\"{}\"];\n", id, label.replace('"', "\\\"")));
        id
    }

    fn child(&mut self, parent: usize, label: &str) -> usize {
        let id = self.node(label);
        self.out.push_str(&format!("\t{parent} -> {id};\n"));
        id
    }

    fn finish(self) -> String {
        format!("digraph {{\n{}}}\n", self.out)
    }
}

/// Renders a `parse_tree::FunctionDefinition`, one node per production and
/// one leaf per terminal, labelled with its source text.
pub struct ParseTreePrinter<'a> {
    source: &'a SourceCode,
    dot: DotWriter,
}

impl<'a> ParseTreePrinter<'a> {
    pub fn new(source: &'a SourceCode) -> Self {
        Self {
            source,
            dot: DotWriter::default(),
        }
    }

    pub fn print(mut self, function: &FunctionDefinition) -> String {
        let root = self.dot.node("function-definition");
        if let Some(parameters) = &function.parameters {
            let node = self.dot.child(root, "parameter-declarations");
            self.terminal(node, &parameters.keyword);
            self.declarator_list(node, &parameters.declarators);
            self.terminal(node, &parameters.semicolon);
        }
        if let Some(variables) = &function.variables {
            let node = self.dot.child(root, "variable-declarations");
            self.terminal(node, &variables.keyword);
            self.declarator_list(node, &variables.declarators);
            self.terminal(node, &variables.semicolon);
        }
        if let Some(constants) = &function.constants {
            let node = self.dot.child(root, "constant-declarations");
            self.terminal(node, &constants.keyword);
            self.init_declarator_list(node, &constants.declarators);
            self.terminal(node, &constants.semicolon);
        }
        self.compound_statement(root, &function.compound_statement);
        self.terminal(root, &function.point);
        self.dot.finish()
    }

    fn terminal(&mut self, parent: usize, terminal: &Terminal) {
        let text = self.source.fragment(&terminal.location);
        self.dot.child(parent, text);
    }

    fn identifier(&mut self, parent: usize, identifier: &IdentifierTerminal) {
        self.dot.child(parent, &identifier.name);
    }

    fn declarator_list(&mut self, parent: usize, list: &DeclaratorList) {
        let node = self.dot.child(parent, "declarator-list");
        self.identifier(node, &list.first);
        for (comma, identifier) in &list.rest {
            self.terminal(node, comma);
            self.identifier(node, identifier);
        }
    }

    fn init_declarator_list(&mut self, parent: usize, list: &InitDeclaratorList) {
        let node = self.dot.child(parent, "init-declarator-list");
        self.init_declarator(node, &list.first);
        for (comma, declarator) in &list.rest {
            self.terminal(node, comma);
            self.init_declarator(node, declarator);
        }
    }

    fn init_declarator(&mut self, parent: usize, declarator: &InitDeclarator) {
        let node = self.dot.child(parent, "init-declarator");
        self.identifier(node, &declarator.identifier);
        self.terminal(node, &declarator.equals);
        self.dot.child(node, &declarator.literal.value.to_string());
    }

    fn compound_statement(&mut self, parent: usize, compound: &CompoundStatement) {
        let node = self.dot.child(parent, "compound-statement");
        self.terminal(node, &compound.begin);
        let list = self.dot.child(node, "statement-list");
        self.statement(list, &compound.statements.first);
        for (semicolon, statement) in &compound.statements.rest {
            self.terminal(list, semicolon);
            self.statement(list, statement);
        }
        self.terminal(node, &compound.end);
    }

    fn statement(&mut self, parent: usize, statement: &Statement) {
        let node = self.dot.child(parent, "statement");
        match statement {
            Statement::Assignment(assignment) => {
                let assign = self.dot.child(node, "assignment-expression");
                self.identifier(assign, &assignment.target);
                self.terminal(assign, &assignment.assign);
                self.additive_expression(assign, &assignment.expression);
            }
            Statement::Return { keyword, expression } => {
                self.terminal(node, keyword);
                self.additive_expression(node, expression);
            }
        }
    }

    // Chains are drawn the way the grammar nests them: each operator is
    // followed by a fresh expression node holding the rest of the chain.
    fn additive_expression(&mut self, parent: usize, expression: &AdditiveExpression) {
        let mut node = self.dot.child(parent, "additive-expression");
        self.multiplicative_expression(node, &expression.first);
        for (_, operator, operand) in &expression.rest {
            self.terminal(node, operator);
            node = self.dot.child(node, "additive-expression");
            self.multiplicative_expression(node, operand);
        }
    }

    fn multiplicative_expression(&mut self, parent: usize, expression: &MultiplicativeExpression) {
        let mut node = self.dot.child(parent, "multiplicative-expression");
        self.unary_expression(node, &expression.first);
        for (_, operator, operand) in &expression.rest {
            self.terminal(node, operator);
            node = self.dot.child(node, "multiplicative-expression");
            self.unary_expression(node, operand);
        }
    }

    fn unary_expression(&mut self, parent: usize, expression: &UnaryExpression) {
        let node = self.dot.child(parent, "unary-expression");
        if let Some((_, sign)) = &expression.sign {
            self.terminal(node, sign);
        }
        let primary = self.dot.child(node, "primary-expression");
        match &expression.primary {
            PrimaryExpression::Identifier(identifier) => self.identifier(primary, identifier),
            PrimaryExpression::Literal(literal) => {
                self.dot.child(primary, &literal.value.to_string());
            }
            PrimaryExpression::Parenthesized { open, expression, close } => {
                self.terminal(primary, open);
                self.additive_expression(primary, expression);
                self.terminal(primary, close);
            }
        }
    }
}

/// Renders an `ast::Function`. Identifier names are looked up in the
/// interner the function was analysed with.
pub struct AstPrinter<'a> {
    string_interner: &'a DefaultStringInterner,
    dot: DotWriter,
}

impl<'a> AstPrinter<'a> {
    pub fn new(string_interner: &'a DefaultStringInterner) -> Self {
        Self {
            string_interner,
            dot: DotWriter::default(),
        }
    }

    pub fn print(mut self, function: &ast::Function) -> String {
        let root = self.dot.node("function");
        for statement in function.statements() {
            match statement {
                ast::Statement::Normal { assignment, .. } => {
                    let node = self.dot.child(root, "statement");
                    let assign = self.dot.child(node, ":=");
                    let target = self.name(assignment.id, assignment.name);
                    self.dot.child(assign, &target);
                    self.arithmetic(assign, &assignment.value);
                }
                ast::Statement::Return(expression) => {
                    let node = self.dot.child(root, "return");
                    self.arithmetic(node, expression);
                }
            }
        }
        self.dot.finish()
    }

    fn name(&self, id: usize, name: string_interner::DefaultSymbol) -> String {
        match self.string_interner.resolve(name) {
            Some(name) => format!("{name} #{id}"),
            None => format!("#{id}"),
        }
    }

    /// Recurses into left operands only; right operands and unary operands
    /// are followed in the loop.
    fn arithmetic(&mut self, mut parent: usize, mut expression: &Arithmetic) {
        loop {
            match expression {
                Arithmetic::Binary { op, left, right } => {
                    parent = self.dot.child(parent, op.symbol());
                    self.arithmetic(parent, left);
                    expression = &**right;
                }
                Arithmetic::Unary { op, operand } => {
                    parent = self.dot.child(parent, op.symbol());
                    expression = &**operand;
                }
                Arithmetic::Literal(value) => {
                    self.dot.child(parent, &value.to_string());
                    return;
                }
                Arithmetic::Identifier { id, name } => {
                    let label = self.name(*id, *name);
                    self.dot.child(parent, &label);
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::ConstantPropagation;
    use crate::parser::Parser;
    use crate::semantic_analyzer::SemanticAnalyzer;

    #[test]
    fn parse_tree_of_minimal_function() {
        let source = SourceCode::new("BEGIN RETURN 5 END.");
        let tree = Parser::new(&source).parse_function_definition().unwrap();
        let dot = ParseTreePrinter::new(&source).print(&tree);
        let expected = "digraph {\n\
            \t0 [label=\"function-definition\"];\n\
            \t1 [label=\"compound-statement\"];\n\t0 -> 1;\n\
            \t2 [label=\"BEGIN\"];\n\t1 -> 2;\n\
            \t3 [label=\"statement-list\"];\n\t1 -> 3;\n\
            \t4 [label=\"statement\"];\n\t3 -> 4;\n\
            \t5 [label=\"RETURN\"];\n\t4 -> 5;\n\
            \t6 [label=\"additive-expression\"];\n\t4 -> 6;\n\
            \t7 [label=\"multiplicative-expression\"];\n\t6 -> 7;\n\
            \t8 [label=\"unary-expression\"];\n\t7 -> 8;\n\
            \t9 [label=\"primary-expression\"];\n\t8 -> 9;\n\
            \t10 [label=\"5\"];\n\t9 -> 10;\n\
            \t11 [label=\"END\"];\n\t1 -> 11;\n\
            \t12 [label=\".\"];\n\t0 -> 12;\n\
            }\n";
        assert_eq!(dot, expected);
    }

    #[test]
    fn parse_tree_keeps_every_terminal() {
        let source = SourceCode::new("PARAM a, b; CONST c = 1; BEGIN a := (a + b) * -c; RETURN a END.");
        let tree = Parser::new(&source).parse_function_definition().unwrap();
        let dot = ParseTreePrinter::new(&source).print(&tree);
        for label in ["PARAM", ",", ";", "CONST", "=", ":=", "(", ")", "*", "-", "+"] {
            assert!(dot.contains(&format!("[label=\"{label}\"]")), "missing {label}");
        }
    }

    #[test]
    fn ast_after_folding() {
        let source = SourceCode::new("PARAM x; VAR y; BEGIN y := x * (2 + 3); RETURN y END.");
        let tree = Parser::new(&source).parse_function_definition().unwrap();
        let mut interner = DefaultStringInterner::new();
        let (mut function, _) = SemanticAnalyzer::new(&mut interner).analyse_function(&tree).unwrap();
        ConstantPropagation::new().optimize(&mut function);

        let dot = AstPrinter::new(&interner).print(&function);
        let expected = "digraph {\n\
            \t0 [label=\"function\"];\n\
            \t1 [label=\"statement\"];\n\t0 -> 1;\n\
            \t2 [label=\":=\"];\n\t1 -> 2;\n\
            \t3 [label=\"y #1\"];\n\t2 -> 3;\n\
            \t4 [label=\"*\"];\n\t2 -> 4;\n\
            \t5 [label=\"x #0\"];\n\t4 -> 5;\n\
            \t6 [label=\"5\"];\n\t4 -> 6;\n\
            \t7 [label=\"return\"];\n\t0 -> 7;\n\
            \t8 [label=\"y #1\"];\n\t7 -> 8;\n\
            }\n";
        assert_eq!(dot, expected);
    }

    #[test]
    fn parse_tree_nests_operator_chains() {
        let source = SourceCode::new("BEGIN RETURN 1 - 2 - 3 END.");
        let tree = Parser::new(&source).parse_function_definition().unwrap();
        let dot = ParseTreePrinter::new(&source).print(&tree);
        assert_eq!(dot.matches("[label=\"additive-expression\"]").count(), 3);
        // the second and third additive-expression hang off the one before
        assert!(dot.contains("\t6 [label=\"additive-expression\"];\n\t4 -> 6;\n"));
        assert!(dot.contains("\t12 [label=\"additive-expression\"];\n\t6 -> 12;\n"));
        assert!(dot.contains("\t18 [label=\"additive-expression\"];\n\t12 -> 18;\n"));
    }

    #[test]
    fn ast_of_a_long_chain() {
        let terms = vec!["x"; 50_000].join(" - ");
        let source = SourceCode::new(&format!("PARAM x; BEGIN RETURN {terms} END."));
        let tree = Parser::new(&source).parse_function_definition().unwrap();
        let mut interner = DefaultStringInterner::new();
        let (function, _) = SemanticAnalyzer::new(&mut interner).analyse_function(&tree).unwrap();

        let dot = AstPrinter::new(&interner).print(&function);
        assert_eq!(dot.matches("[label=\"-\"]").count(), 49_999);
        assert_eq!(dot.matches("[label=\"x #0\"]").count(), 50_000);
        assert!(dot.starts_with("digraph {\n\t0 [label=\"function\"];\n\t1 [label=\"return\"];\n\t0 -> 1;\n\t2 [label=\"-\"];\n\t1 -> 2;\n"));
    }
}

//! Debug rendering of subtrees.
//!
//! [`print_node`] renders a subtree as compact single-line source text for
//! diagnostics and test assertions. [`layout`] renders the same text and
//! assigns every node in the subtree the range its rendering occupies, which
//! gives synthesized snippets and hand-built test trees realistic offsets.

use javelin_common::TextRange;

use crate::base::{NodeIndex, NodeList};
use crate::node::NodeData;
use crate::node_arena::NodeArena;
use crate::operators::CommentStyle;

/// Render the subtree rooted at `root`.
pub fn print_node(arena: &NodeArena, root: NodeIndex) -> String {
    let mut printer = Printer::new(arena);
    printer.node(root);
    printer.out
}

/// Render `root` and assign source ranges to every node in its subtree.
///
/// Returns the rendered text; offsets are relative to its first byte.
pub fn layout(arena: &mut NodeArena, root: NodeIndex) -> String {
    let (text, ranges) = {
        let mut printer = Printer::new(arena);
        printer.node(root);
        (printer.out, printer.ranges)
    };
    for (node, range) in ranges {
        arena.set_range(node, Some(range));
    }
    text
}

struct Printer<'a> {
    arena: &'a NodeArena,
    out: String,
    ranges: Vec<(NodeIndex, TextRange)>,
}

impl<'a> Printer<'a> {
    fn new(arena: &'a NodeArena) -> Self {
        Self {
            arena,
            out: String::new(),
            ranges: Vec::new(),
        }
    }

    #[inline]
    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn offset(&self) -> u32 {
        self.out.len() as u32
    }

    fn list(&mut self, list: &NodeList, separator: &str) {
        for (i, child) in list.iter().enumerate() {
            if i > 0 {
                self.push(separator);
            }
            self.node(child);
        }
    }

    fn modifiers(&mut self, list: &NodeList) {
        for child in list.iter() {
            self.node(child);
            self.push(" ");
        }
    }

    fn arguments(&mut self, list: &NodeList) {
        self.push("(");
        self.list(list, ", ");
        self.push(")");
    }

    fn optional(&mut self, prefix: &str, child: NodeIndex, suffix: &str) {
        if child.is_some() {
            self.push(prefix);
            self.node(child);
            self.push(suffix);
        }
    }

    fn body_declarations(&mut self, list: &NodeList) {
        if list.is_empty() {
            self.push("{ }");
        } else {
            self.push("{ ");
            self.list(list, " ");
            self.push(" }");
        }
    }

    fn node(&mut self, index: NodeIndex) {
        let arena = self.arena;
        let Some(data) = arena.data(index) else {
            return;
        };
        let start = self.offset();

        match data {
            NodeData::SimpleName { identifier } => self.push(identifier),
            NodeData::QualifiedName { qualifier, name } => {
                self.node(*qualifier);
                self.push(".");
                self.node(*name);
            }
            NodeData::NumberLiteral { token } => self.push(token),
            NodeData::StringLiteral { escaped } | NodeData::CharacterLiteral { escaped } => {
                self.push(escaped)
            }
            NodeData::BooleanLiteral { value } => self.push(if *value { "true" } else { "false" }),
            NodeData::NullLiteral => self.push("null"),
            NodeData::TypeLiteral { ty } => {
                self.node(*ty);
                self.push(".class");
            }
            NodeData::ThisExpression { qualifier } => {
                self.optional("", *qualifier, ".");
                self.push("this");
            }
            NodeData::FieldAccess { expression, name } => {
                self.node(*expression);
                self.push(".");
                self.node(*name);
            }
            NodeData::SuperFieldAccess { qualifier, name } => {
                self.optional("", *qualifier, ".");
                self.push("super.");
                self.node(*name);
            }
            NodeData::MethodInvocation {
                expression,
                type_arguments,
                name,
                arguments,
            } => {
                self.optional("", *expression, ".");
                if !type_arguments.is_empty() {
                    self.push("<");
                    self.list(type_arguments, ", ");
                    self.push(">");
                }
                self.node(*name);
                self.arguments(arguments);
            }
            NodeData::SuperMethodInvocation {
                qualifier,
                name,
                arguments,
            } => {
                self.optional("", *qualifier, ".");
                self.push("super.");
                self.node(*name);
                self.arguments(arguments);
            }
            NodeData::ClassInstanceCreation {
                expression,
                ty,
                arguments,
                body,
            } => {
                self.optional("", *expression, ".");
                self.push("new ");
                self.node(*ty);
                self.arguments(arguments);
                self.optional(" ", *body, "");
            }
            NodeData::ArrayAccess { array, index } => {
                self.node(*array);
                self.push("[");
                self.node(*index);
                self.push("]");
            }
            NodeData::ArrayCreation {
                ty,
                dimensions,
                initializer,
            } => self.array_creation(*ty, dimensions, *initializer),
            NodeData::ArrayInitializer { expressions } => {
                self.push("{");
                self.list(expressions, ", ");
                self.push("}");
            }
            NodeData::Infix {
                operator,
                left,
                right,
                extended_operands,
            } => {
                let op = format!(" {} ", operator.token());
                self.node(*left);
                self.push(&op);
                self.node(*right);
                for operand in extended_operands.iter() {
                    self.push(&op);
                    self.node(operand);
                }
            }
            NodeData::Prefix { operator, operand } => {
                self.push(operator.token());
                self.node(*operand);
            }
            NodeData::Postfix { operator, operand } => {
                self.node(*operand);
                self.push(operator.token());
            }
            NodeData::Conditional {
                condition,
                then_expression,
                else_expression,
            } => {
                self.node(*condition);
                self.push(" ? ");
                self.node(*then_expression);
                self.push(" : ");
                self.node(*else_expression);
            }
            NodeData::Assignment {
                operator,
                left,
                right,
            } => {
                self.node(*left);
                self.push(&format!(" {} ", operator.token()));
                self.node(*right);
            }
            NodeData::Cast { ty, expression } => {
                self.push("(");
                self.node(*ty);
                self.push(") ");
                self.node(*expression);
            }
            NodeData::InstanceOf { expression, ty } => {
                self.node(*expression);
                self.push(" instanceof ");
                self.node(*ty);
            }
            NodeData::Parenthesized { expression } => {
                self.push("(");
                self.node(*expression);
                self.push(")");
            }
            NodeData::Lambda {
                parameters,
                body,
                parenthesized,
            } => {
                let bare = !*parenthesized && parameters.len() == 1;
                if !bare {
                    self.push("(");
                }
                self.list(parameters, ", ");
                if !bare {
                    self.push(")");
                }
                self.push(" -> ");
                self.node(*body);
            }
            NodeData::MethodReference { expression, name } => {
                self.node(*expression);
                self.push("::");
                self.node(*name);
            }
            NodeData::VariableDeclarationExpression {
                modifiers,
                ty,
                fragments,
            } => {
                self.modifiers(modifiers);
                self.node(*ty);
                self.push(" ");
                self.list(fragments, ", ");
            }
            NodeData::Block { statements } => self.body_declarations(statements),
            NodeData::EmptyStatement => self.push(";"),
            NodeData::ExpressionStatement { expression } => {
                self.node(*expression);
                self.push(";");
            }
            NodeData::VariableDeclarationStatement {
                modifiers,
                ty,
                fragments,
            }
            | NodeData::FieldDeclaration {
                modifiers,
                ty,
                fragments,
            } => {
                self.modifiers(modifiers);
                self.node(*ty);
                self.push(" ");
                self.list(fragments, ", ");
                self.push(";");
            }
            NodeData::TypeDeclarationStatement { declaration } => self.node(*declaration),
            NodeData::If {
                condition,
                then_statement,
                else_statement,
            } => {
                self.push("if (");
                self.node(*condition);
                self.push(") ");
                self.node(*then_statement);
                self.optional(" else ", *else_statement, "");
            }
            NodeData::While { condition, body } => {
                self.push("while (");
                self.node(*condition);
                self.push(") ");
                self.node(*body);
            }
            NodeData::Do { body, condition } => {
                self.push("do ");
                self.node(*body);
                self.push(" while (");
                self.node(*condition);
                self.push(");");
            }
            NodeData::For {
                initializers,
                condition,
                updaters,
                body,
            } => {
                self.push("for (");
                self.list(initializers, ", ");
                self.push("; ");
                self.node(*condition);
                self.push("; ");
                self.list(updaters, ", ");
                self.push(") ");
                self.node(*body);
            }
            NodeData::EnhancedFor {
                parameter,
                expression,
                body,
            } => {
                self.push("for (");
                self.node(*parameter);
                self.push(" : ");
                self.node(*expression);
                self.push(") ");
                self.node(*body);
            }
            NodeData::Return { expression } => {
                self.push("return");
                self.optional(" ", *expression, "");
                self.push(";");
            }
            NodeData::Throw { expression } => {
                self.push("throw ");
                self.node(*expression);
                self.push(";");
            }
            NodeData::Break { label } => {
                self.push("break");
                self.optional(" ", *label, "");
                self.push(";");
            }
            NodeData::Continue { label } => {
                self.push("continue");
                self.optional(" ", *label, "");
                self.push(";");
            }
            NodeData::Labeled { label, body } => {
                self.node(*label);
                self.push(": ");
                self.node(*body);
            }
            NodeData::Switch {
                expression,
                statements,
            } => {
                self.push("switch (");
                self.node(*expression);
                self.push(") ");
                self.body_declarations(statements);
            }
            NodeData::SwitchCase { expression } => {
                if expression.is_some() {
                    self.push("case ");
                    self.node(*expression);
                    self.push(":");
                } else {
                    self.push("default:");
                }
            }
            NodeData::Synchronized { expression, body } => {
                self.push("synchronized (");
                self.node(*expression);
                self.push(") ");
                self.node(*body);
            }
            NodeData::Try {
                resources,
                body,
                catch_clauses,
                finally,
            } => {
                self.push("try ");
                if !resources.is_empty() {
                    self.push("(");
                    self.list(resources, "; ");
                    self.push(") ");
                }
                self.node(*body);
                for clause in catch_clauses.iter() {
                    self.push(" ");
                    self.node(clause);
                }
                self.optional(" finally ", *finally, "");
            }
            NodeData::CatchClause { exception, body } => {
                self.push("catch (");
                self.node(*exception);
                self.push(") ");
                self.node(*body);
            }
            NodeData::Assert {
                expression,
                message,
            } => {
                self.push("assert ");
                self.node(*expression);
                self.optional(" : ", *message, "");
                self.push(";");
            }
            NodeData::ConstructorInvocation { arguments } => {
                self.push("this");
                self.arguments(arguments);
                self.push(";");
            }
            NodeData::SuperConstructorInvocation {
                expression,
                arguments,
            } => {
                self.optional("", *expression, ".");
                self.push("super");
                self.arguments(arguments);
                self.push(";");
            }
            NodeData::CompilationUnit {
                package,
                imports,
                types,
            } => {
                self.optional("", *package, " ");
                for import in imports.iter() {
                    self.node(import);
                    self.push(" ");
                }
                self.list(types, " ");
            }
            NodeData::PackageDeclaration { name } => {
                self.push("package ");
                self.node(*name);
                self.push(";");
            }
            NodeData::ImportDeclaration {
                name,
                is_static,
                on_demand,
            } => {
                self.push(if *is_static { "import static " } else { "import " });
                self.node(*name);
                if *on_demand {
                    self.push(".*");
                }
                self.push(";");
            }
            NodeData::TypeDeclaration {
                modifiers,
                is_interface,
                name,
                type_parameters,
                superclass,
                interfaces,
                body_declarations,
            } => {
                self.modifiers(modifiers);
                self.push(if *is_interface { "interface " } else { "class " });
                self.node(*name);
                self.type_parameters(type_parameters);
                self.optional(" extends ", *superclass, "");
                if !interfaces.is_empty() {
                    self.push(if *is_interface { " extends " } else { " implements " });
                    self.list(interfaces, ", ");
                }
                self.push(" ");
                self.body_declarations(body_declarations);
            }
            NodeData::EnumDeclaration {
                modifiers,
                name,
                interfaces,
                constants,
                body_declarations,
            } => {
                self.modifiers(modifiers);
                self.push("enum ");
                self.node(*name);
                if !interfaces.is_empty() {
                    self.push(" implements ");
                    self.list(interfaces, ", ");
                }
                self.push(" { ");
                self.list(constants, ", ");
                self.push(";");
                for member in body_declarations.iter() {
                    self.push(" ");
                    self.node(member);
                }
                self.push(" }");
            }
            NodeData::EnumConstantDeclaration {
                modifiers,
                name,
                arguments,
                body,
            } => {
                self.modifiers(modifiers);
                self.node(*name);
                if !arguments.is_empty() {
                    self.arguments(arguments);
                }
                self.optional(" ", *body, "");
            }
            NodeData::AnonymousClassDeclaration { body_declarations } => {
                self.body_declarations(body_declarations)
            }
            NodeData::MethodDeclaration {
                modifiers,
                type_parameters,
                return_type,
                name,
                parameters,
                thrown,
                body,
                is_constructor,
            } => {
                self.modifiers(modifiers);
                if !type_parameters.is_empty() {
                    self.type_parameters(type_parameters);
                    self.push(" ");
                }
                if !*is_constructor {
                    self.optional("", *return_type, " ");
                }
                self.node(*name);
                self.arguments(parameters);
                if !thrown.is_empty() {
                    self.push(" throws ");
                    self.list(thrown, ", ");
                }
                if body.is_some() {
                    self.push(" ");
                    self.node(*body);
                } else {
                    self.push(";");
                }
            }
            NodeData::Initializer { modifiers, body } => {
                self.modifiers(modifiers);
                self.node(*body);
            }
            NodeData::SingleVariableDeclaration {
                modifiers,
                ty,
                varargs,
                name,
                extra_dimensions,
                initializer,
            } => {
                self.modifiers(modifiers);
                self.node(*ty);
                self.push(if *varargs { "... " } else { " " });
                self.node(*name);
                self.push(&"[]".repeat(*extra_dimensions as usize));
                self.optional(" = ", *initializer, "");
            }
            NodeData::VariableDeclarationFragment {
                name,
                extra_dimensions,
                initializer,
            } => {
                self.node(*name);
                self.push(&"[]".repeat(*extra_dimensions as usize));
                self.optional(" = ", *initializer, "");
            }
            NodeData::TypeParameter { name, bounds } => {
                self.node(*name);
                if !bounds.is_empty() {
                    self.push(" extends ");
                    self.list(bounds, " & ");
                }
            }
            NodeData::PrimitiveType { code } => self.push(code.keyword()),
            NodeData::SimpleType { name } => self.node(*name),
            NodeData::ArrayType {
                element,
                dimensions,
            } => {
                self.node(*element);
                self.push(&"[]".repeat(*dimensions as usize));
            }
            NodeData::ParameterizedType { ty, arguments } => {
                self.node(*ty);
                self.push("<");
                self.list(arguments, ", ");
                self.push(">");
            }
            NodeData::WildcardType { bound, upper } => {
                self.push("?");
                let keyword = if *upper { " extends " } else { " super " };
                self.optional(keyword, *bound, "");
            }
            NodeData::Modifier { keyword } => self.push(keyword.as_str()),
            NodeData::MarkerAnnotation { type_name } => {
                self.push("@");
                self.node(*type_name);
            }
            NodeData::Comment { style, text } => match style {
                CommentStyle::Line => {
                    self.push("//");
                    self.push(text);
                    self.push("\n");
                }
                CommentStyle::Block => {
                    self.push("/*");
                    self.push(text);
                    self.push("*/");
                }
                CommentStyle::Doc => {
                    self.push("/**");
                    self.push(text);
                    self.push("*/");
                }
            },
        }

        let end = self.offset();
        self.ranges.push((index, TextRange::from_bounds(start, end)));
    }

    fn type_parameters(&mut self, list: &NodeList) {
        if !list.is_empty() {
            self.push("<");
            self.list(list, ", ");
            self.push(">");
        }
    }

    fn array_creation(&mut self, ty: NodeIndex, dimensions: &NodeList, initializer: NodeIndex) {
        let arena = self.arena;
        self.push("new ");
        let type_start = self.offset();
        match arena.data(ty) {
            Some(NodeData::ArrayType {
                element,
                dimensions: dims,
            }) => {
                self.node(*element);
                for i in 0..*dims as usize {
                    match dimensions.get(i) {
                        Some(expr) => {
                            self.push("[");
                            self.node(expr);
                            self.push("]");
                        }
                        None => self.push("[]"),
                    }
                }
                let type_end = self.offset();
                self.ranges
                    .push((ty, TextRange::from_bounds(type_start, type_end)));
            }
            _ => self.node(ty),
        }
        self.optional(" ", initializer, "");
    }
}

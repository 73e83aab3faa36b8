//! NodeArena creation methods (add_* methods).
//!
//! Trees are built bottom-up: children are created first, and each `add_*`
//! call records the new node as the parent of its children together with the
//! slot they occupy. A child that already has a parent is deep-copied instead
//! of being shared, so no node is ever owned by two parents.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::base::{NodeIndex, NodeList};
use crate::node::{Node, NodeData, NodeKind};
use crate::operators::{
    AssignmentOperator, CommentStyle, InfixOperator, PostfixOperator, PrefixOperator,
    PrimitiveTypeCode,
};
use javelin_common::{BindingId, ModifierKeyword, Modifiers, TextRange};

/// Owning storage for one tree (or a forest of detached snippets).
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
    /// Declaration node of each binding attached to a declaration kind.
    pub(crate) declarations: FxHashMap<BindingId, NodeIndex>,
}

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow on huge inputs.
    const MAX_NODE_PREALLOC: usize = 5_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity.min(Self::MAX_NODE_PREALLOC)),
            declarations: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.declarations.clear();
    }

    // ========================================================================
    // Parent Mapping Helpers
    // ========================================================================

    /// Record `parent` and the slot for every child of `parent`.
    ///
    /// Children that already belong to another parent are replaced by deep
    /// copies before being adopted.
    fn adopt_children(&mut self, parent: NodeIndex) {
        let Some(node) = self.nodes.get(parent.0 as usize) else {
            return;
        };
        let owned = node.data.child_entries();

        let mut copies: FxHashMap<NodeIndex, NodeIndex> = FxHashMap::default();
        for &(_, child) in &owned {
            let already_owned = self
                .nodes
                .get(child.0 as usize)
                .is_some_and(|n| n.parent.is_some() && n.parent != parent);
            if already_owned && !copies.contains_key(&child) {
                trace!(?child, "child already owned; adopting a deep copy");
                let copy = self.copy_subtree_within(child);
                copies.insert(child, copy);
            }
        }
        if !copies.is_empty() {
            if let Some(node) = self.nodes.get_mut(parent.0 as usize) {
                node.data.for_each_child_mut(&mut |idx| {
                    if let Some(copy) = copies.get(idx) {
                        *idx = *copy;
                    }
                });
            }
        }

        for (slot, child) in owned {
            let child = copies.get(&child).copied().unwrap_or(child);
            if let Some(info) = self.nodes.get_mut(child.0 as usize) {
                info.parent = parent;
                info.slot = Some(slot);
            }
        }
    }

    // ========================================================================
    // Generic Creation
    // ========================================================================

    /// Push a node and adopt its children.
    pub fn add_node(&mut self, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        self.adopt_children(index);
        index
    }

    /// Push a node with a source range.
    pub fn add_node_at(&mut self, data: NodeData, range: TextRange) -> NodeIndex {
        let index = self.add_node(data);
        self.set_range(index, Some(range));
        index
    }

    pub fn set_range(&mut self, index: NodeIndex, range: Option<TextRange>) {
        if let Some(node) = self.get_mut(index) {
            node.range = range;
        }
    }

    /// Attach the resolved binding of a node.
    ///
    /// Declaration kinds are also indexed so that
    /// [`declaration_of`](Self::declaration_of) can find them.
    pub fn set_binding(&mut self, index: NodeIndex, binding: BindingId) {
        let Some(node) = self.get_mut(index) else {
            return;
        };
        node.binding = Some(binding);
        if matches!(
            node.kind(),
            NodeKind::TypeDeclaration
                | NodeKind::EnumDeclaration
                | NodeKind::AnonymousClassDeclaration
                | NodeKind::EnumConstantDeclaration
                | NodeKind::MethodDeclaration
                | NodeKind::SingleVariableDeclaration
                | NodeKind::VariableDeclarationFragment
                | NodeKind::TypeParameter
                | NodeKind::Lambda
        ) {
            self.declarations.entry(binding).or_insert(index);
        }
    }

    /// Attach the resolved static type of an expression or type reference.
    pub fn set_type_binding(&mut self, index: NodeIndex, ty: BindingId) {
        if let Some(node) = self.get_mut(index) {
            node.type_binding = Some(ty);
        }
    }

    // ========================================================================
    // Copying
    // ========================================================================

    /// Deep-copy `root` from `source` into this arena.
    ///
    /// The copy is detached (no parent), keeps source ranges and bindings, and
    /// shares nothing with the original.
    pub fn copy_subtree_from(&mut self, source: &NodeArena, root: NodeIndex) -> NodeIndex {
        let Some(node) = source.get(root) else {
            return NodeIndex::NONE;
        };
        let mut data = node.data.clone();
        data.for_each_child_mut(&mut |child| {
            *child = self.copy_subtree_from(source, *child);
        });
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            data,
            range: node.range,
            parent: NodeIndex::NONE,
            slot: None,
            binding: node.binding,
            type_binding: node.type_binding,
        });
        let entries = self.nodes[index.0 as usize].data.child_entries();
        for (slot, child) in entries {
            if let Some(info) = self.nodes.get_mut(child.0 as usize) {
                info.parent = index;
                info.slot = Some(slot);
            }
        }
        index
    }

    fn copy_subtree_within(&mut self, root: NodeIndex) -> NodeIndex {
        let snapshot = self.clone();
        self.copy_subtree_from(&snapshot, root)
    }

    // ========================================================================
    // Names and Literals
    // ========================================================================

    pub fn add_simple_name(&mut self, identifier: impl Into<String>) -> NodeIndex {
        self.add_node(NodeData::SimpleName {
            identifier: identifier.into(),
        })
    }

    pub fn add_qualified_name(&mut self, qualifier: NodeIndex, name: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::QualifiedName { qualifier, name })
    }

    /// Build `a.b.c` from dotted text.
    pub fn add_name(&mut self, dotted: &str) -> NodeIndex {
        let mut parts = dotted.split('.');
        let mut current = self.add_simple_name(parts.next().unwrap_or_default());
        for part in parts {
            let name = self.add_simple_name(part);
            current = self.add_qualified_name(current, name);
        }
        current
    }

    pub fn add_number_literal(&mut self, token: impl Into<String>) -> NodeIndex {
        self.add_node(NodeData::NumberLiteral {
            token: token.into(),
        })
    }

    pub fn add_string_literal(&mut self, escaped: impl Into<String>) -> NodeIndex {
        self.add_node(NodeData::StringLiteral {
            escaped: escaped.into(),
        })
    }

    pub fn add_character_literal(&mut self, escaped: impl Into<String>) -> NodeIndex {
        self.add_node(NodeData::CharacterLiteral {
            escaped: escaped.into(),
        })
    }

    pub fn add_boolean_literal(&mut self, value: bool) -> NodeIndex {
        self.add_node(NodeData::BooleanLiteral { value })
    }

    pub fn add_null_literal(&mut self) -> NodeIndex {
        self.add_node(NodeData::NullLiteral)
    }

    pub fn add_type_literal(&mut self, ty: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::TypeLiteral { ty })
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub fn add_this(&mut self, qualifier: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::ThisExpression { qualifier })
    }

    pub fn add_field_access(&mut self, expression: NodeIndex, name: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::FieldAccess { expression, name })
    }

    pub fn add_super_field_access(&mut self, qualifier: NodeIndex, name: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::SuperFieldAccess { qualifier, name })
    }

    pub fn add_method_invocation(
        &mut self,
        expression: NodeIndex,
        name: NodeIndex,
        arguments: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.add_node(NodeData::MethodInvocation {
            expression,
            type_arguments: NodeList::new(),
            name,
            arguments: arguments.into(),
        })
    }

    pub fn add_super_method_invocation(
        &mut self,
        qualifier: NodeIndex,
        name: NodeIndex,
        arguments: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.add_node(NodeData::SuperMethodInvocation {
            qualifier,
            name,
            arguments: arguments.into(),
        })
    }

    pub fn add_class_instance_creation(
        &mut self,
        ty: NodeIndex,
        arguments: Vec<NodeIndex>,
        body: NodeIndex,
    ) -> NodeIndex {
        self.add_node(NodeData::ClassInstanceCreation {
            expression: NodeIndex::NONE,
            ty,
            arguments: arguments.into(),
            body,
        })
    }

    pub fn add_array_access(&mut self, array: NodeIndex, index: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::ArrayAccess { array, index })
    }

    pub fn add_array_creation(
        &mut self,
        ty: NodeIndex,
        dimensions: Vec<NodeIndex>,
        initializer: NodeIndex,
    ) -> NodeIndex {
        self.add_node(NodeData::ArrayCreation {
            ty,
            dimensions: dimensions.into(),
            initializer,
        })
    }

    pub fn add_array_initializer(&mut self, expressions: Vec<NodeIndex>) -> NodeIndex {
        self.add_node(NodeData::ArrayInitializer {
            expressions: expressions.into(),
        })
    }

    pub fn add_infix(
        &mut self,
        operator: InfixOperator,
        left: NodeIndex,
        right: NodeIndex,
    ) -> NodeIndex {
        self.add_node(NodeData::Infix {
            operator,
            left,
            right,
            extended_operands: NodeList::new(),
        })
    }

    /// `a op b op c ...` as one infix node with extended operands.
    pub fn add_infix_chain(
        &mut self,
        operator: InfixOperator,
        left: NodeIndex,
        right: NodeIndex,
        extended: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.add_node(NodeData::Infix {
            operator,
            left,
            right,
            extended_operands: extended.into(),
        })
    }

    pub fn add_prefix(&mut self, operator: PrefixOperator, operand: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::Prefix { operator, operand })
    }

    pub fn add_postfix(&mut self, operator: PostfixOperator, operand: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::Postfix { operator, operand })
    }

    pub fn add_conditional(
        &mut self,
        condition: NodeIndex,
        then_expression: NodeIndex,
        else_expression: NodeIndex,
    ) -> NodeIndex {
        self.add_node(NodeData::Conditional {
            condition,
            then_expression,
            else_expression,
        })
    }

    pub fn add_assignment(
        &mut self,
        operator: AssignmentOperator,
        left: NodeIndex,
        right: NodeIndex,
    ) -> NodeIndex {
        self.add_node(NodeData::Assignment {
            operator,
            left,
            right,
        })
    }

    pub fn add_cast(&mut self, ty: NodeIndex, expression: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::Cast { ty, expression })
    }

    pub fn add_instance_of(&mut self, expression: NodeIndex, ty: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::InstanceOf { expression, ty })
    }

    pub fn add_parenthesized(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::Parenthesized { expression })
    }

    pub fn add_lambda(&mut self, parameters: Vec<NodeIndex>, body: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::Lambda {
            parameters: parameters.into(),
            body,
            parenthesized: true,
        })
    }

    pub fn add_method_reference(&mut self, expression: NodeIndex, name: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::MethodReference { expression, name })
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn add_block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        self.add_node(NodeData::Block {
            statements: statements.into(),
        })
    }

    pub fn add_empty_statement(&mut self) -> NodeIndex {
        self.add_node(NodeData::EmptyStatement)
    }

    pub fn add_expression_statement(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::ExpressionStatement { expression })
    }

    pub fn add_variable_declaration_fragment(
        &mut self,
        name: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        self.add_node(NodeData::VariableDeclarationFragment {
            name,
            extra_dimensions: 0,
            initializer,
        })
    }

    pub fn add_variable_declaration_statement(
        &mut self,
        ty: NodeIndex,
        fragments: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.add_node(NodeData::VariableDeclarationStatement {
            modifiers: NodeList::new(),
            ty,
            fragments: fragments.into(),
        })
    }

    pub fn add_variable_declaration_expression(
        &mut self,
        ty: NodeIndex,
        fragments: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.add_node(NodeData::VariableDeclarationExpression {
            modifiers: NodeList::new(),
            ty,
            fragments: fragments.into(),
        })
    }

    pub fn add_single_variable_declaration(&mut self, ty: NodeIndex, name: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::SingleVariableDeclaration {
            modifiers: NodeList::new(),
            ty,
            varargs: false,
            name,
            extra_dimensions: 0,
            initializer: NodeIndex::NONE,
        })
    }

    pub fn add_type_declaration_statement(&mut self, declaration: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::TypeDeclarationStatement { declaration })
    }

    pub fn add_if(
        &mut self,
        condition: NodeIndex,
        then_statement: NodeIndex,
        else_statement: NodeIndex,
    ) -> NodeIndex {
        self.add_node(NodeData::If {
            condition,
            then_statement,
            else_statement,
        })
    }

    pub fn add_while(&mut self, condition: NodeIndex, body: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::While { condition, body })
    }

    pub fn add_do(&mut self, body: NodeIndex, condition: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::Do { body, condition })
    }

    pub fn add_for(
        &mut self,
        initializers: Vec<NodeIndex>,
        condition: NodeIndex,
        updaters: Vec<NodeIndex>,
        body: NodeIndex,
    ) -> NodeIndex {
        self.add_node(NodeData::For {
            initializers: initializers.into(),
            condition,
            updaters: updaters.into(),
            body,
        })
    }

    pub fn add_enhanced_for(
        &mut self,
        parameter: NodeIndex,
        expression: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        self.add_node(NodeData::EnhancedFor {
            parameter,
            expression,
            body,
        })
    }

    pub fn add_return(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::Return { expression })
    }

    pub fn add_throw(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::Throw { expression })
    }

    pub fn add_break(&mut self, label: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::Break { label })
    }

    pub fn add_continue(&mut self, label: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::Continue { label })
    }

    pub fn add_labeled(&mut self, label: NodeIndex, body: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::Labeled { label, body })
    }

    pub fn add_switch(&mut self, expression: NodeIndex, statements: Vec<NodeIndex>) -> NodeIndex {
        self.add_node(NodeData::Switch {
            expression,
            statements: statements.into(),
        })
    }

    /// `case expression:`, or `default:` when `expression` is NONE.
    pub fn add_switch_case(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::SwitchCase { expression })
    }

    pub fn add_synchronized(&mut self, expression: NodeIndex, body: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::Synchronized { expression, body })
    }

    pub fn add_try(
        &mut self,
        body: NodeIndex,
        catch_clauses: Vec<NodeIndex>,
        finally: NodeIndex,
    ) -> NodeIndex {
        self.add_node(NodeData::Try {
            resources: NodeList::new(),
            body,
            catch_clauses: catch_clauses.into(),
            finally,
        })
    }

    pub fn add_catch_clause(&mut self, exception: NodeIndex, body: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::CatchClause { exception, body })
    }

    pub fn add_assert(&mut self, expression: NodeIndex, message: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::Assert {
            expression,
            message,
        })
    }

    pub fn add_constructor_invocation(&mut self, arguments: Vec<NodeIndex>) -> NodeIndex {
        self.add_node(NodeData::ConstructorInvocation {
            arguments: arguments.into(),
        })
    }

    pub fn add_super_constructor_invocation(&mut self, arguments: Vec<NodeIndex>) -> NodeIndex {
        self.add_node(NodeData::SuperConstructorInvocation {
            expression: NodeIndex::NONE,
            arguments: arguments.into(),
        })
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn add_compilation_unit(
        &mut self,
        package: NodeIndex,
        imports: Vec<NodeIndex>,
        types: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.add_node(NodeData::CompilationUnit {
            package,
            imports: imports.into(),
            types: types.into(),
        })
    }

    pub fn add_package_declaration(&mut self, name: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::PackageDeclaration { name })
    }

    pub fn add_import(&mut self, name: NodeIndex, is_static: bool, on_demand: bool) -> NodeIndex {
        self.add_node(NodeData::ImportDeclaration {
            name,
            is_static,
            on_demand,
        })
    }

    /// A class (or interface) declaration without type parameters.
    pub fn add_type_declaration(
        &mut self,
        modifiers: Vec<NodeIndex>,
        is_interface: bool,
        name: NodeIndex,
        superclass: NodeIndex,
        interfaces: Vec<NodeIndex>,
        body_declarations: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.add_node(NodeData::TypeDeclaration {
            modifiers: modifiers.into(),
            is_interface,
            name,
            type_parameters: NodeList::new(),
            superclass,
            interfaces: interfaces.into(),
            body_declarations: body_declarations.into(),
        })
    }

    pub fn add_enum_declaration(
        &mut self,
        modifiers: Vec<NodeIndex>,
        name: NodeIndex,
        constants: Vec<NodeIndex>,
        body_declarations: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.add_node(NodeData::EnumDeclaration {
            modifiers: modifiers.into(),
            name,
            interfaces: NodeList::new(),
            constants: constants.into(),
            body_declarations: body_declarations.into(),
        })
    }

    pub fn add_enum_constant(&mut self, name: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::EnumConstantDeclaration {
            modifiers: NodeList::new(),
            name,
            arguments: NodeList::new(),
            body: NodeIndex::NONE,
        })
    }

    pub fn add_anonymous_class(&mut self, body_declarations: Vec<NodeIndex>) -> NodeIndex {
        self.add_node(NodeData::AnonymousClassDeclaration {
            body_declarations: body_declarations.into(),
        })
    }

    pub fn add_field_declaration(
        &mut self,
        modifiers: Vec<NodeIndex>,
        ty: NodeIndex,
        fragments: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.add_node(NodeData::FieldDeclaration {
            modifiers: modifiers.into(),
            ty,
            fragments: fragments.into(),
        })
    }

    /// A method without type parameters or `throws` clause. Pass NONE as
    /// `body` for abstract methods.
    pub fn add_method_declaration(
        &mut self,
        modifiers: Vec<NodeIndex>,
        return_type: NodeIndex,
        name: NodeIndex,
        parameters: Vec<NodeIndex>,
        body: NodeIndex,
    ) -> NodeIndex {
        self.add_node(NodeData::MethodDeclaration {
            modifiers: modifiers.into(),
            type_parameters: NodeList::new(),
            return_type,
            name,
            parameters: parameters.into(),
            thrown: NodeList::new(),
            body,
            is_constructor: false,
        })
    }

    pub fn add_constructor_declaration(
        &mut self,
        modifiers: Vec<NodeIndex>,
        name: NodeIndex,
        parameters: Vec<NodeIndex>,
        body: NodeIndex,
    ) -> NodeIndex {
        self.add_node(NodeData::MethodDeclaration {
            modifiers: modifiers.into(),
            type_parameters: NodeList::new(),
            return_type: NodeIndex::NONE,
            name,
            parameters: parameters.into(),
            thrown: NodeList::new(),
            body,
            is_constructor: true,
        })
    }

    pub fn add_initializer(&mut self, modifiers: Vec<NodeIndex>, body: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::Initializer {
            modifiers: modifiers.into(),
            body,
        })
    }

    pub fn add_type_parameter(&mut self, name: NodeIndex, bounds: Vec<NodeIndex>) -> NodeIndex {
        self.add_node(NodeData::TypeParameter {
            name,
            bounds: bounds.into(),
        })
    }

    // ========================================================================
    // Types, Modifiers, Comments
    // ========================================================================

    pub fn add_primitive_type(&mut self, code: PrimitiveTypeCode) -> NodeIndex {
        self.add_node(NodeData::PrimitiveType { code })
    }

    pub fn add_simple_type(&mut self, name: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::SimpleType { name })
    }

    /// `SimpleType` over a dotted name.
    pub fn add_named_type(&mut self, dotted: &str) -> NodeIndex {
        let name = self.add_name(dotted);
        self.add_simple_type(name)
    }

    pub fn add_array_type(&mut self, element: NodeIndex, dimensions: u32) -> NodeIndex {
        self.add_node(NodeData::ArrayType {
            element,
            dimensions,
        })
    }

    pub fn add_parameterized_type(&mut self, ty: NodeIndex, arguments: Vec<NodeIndex>) -> NodeIndex {
        self.add_node(NodeData::ParameterizedType {
            ty,
            arguments: arguments.into(),
        })
    }

    pub fn add_wildcard_type(&mut self, bound: NodeIndex, upper: bool) -> NodeIndex {
        self.add_node(NodeData::WildcardType { bound, upper })
    }

    pub fn add_modifier(&mut self, keyword: ModifierKeyword) -> NodeIndex {
        self.add_node(NodeData::Modifier { keyword })
    }

    /// One modifier node per flag, in canonical keyword order.
    pub fn add_modifiers(&mut self, flags: Modifiers) -> Vec<NodeIndex> {
        flags
            .keywords()
            .into_iter()
            .map(|keyword| self.add_modifier(keyword))
            .collect()
    }

    pub fn add_marker_annotation(&mut self, type_name: NodeIndex) -> NodeIndex {
        self.add_node(NodeData::MarkerAnnotation { type_name })
    }

    pub fn add_comment(&mut self, style: CommentStyle, text: impl Into<String>) -> NodeIndex {
        self.add_node(NodeData::Comment {
            style,
            text: text.into(),
        })
    }
}

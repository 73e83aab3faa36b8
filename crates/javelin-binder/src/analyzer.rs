//! Declarations in scope at a position of a compilation unit.
//!
//! The analyzer answers code-assist style questions: which variables,
//! methods and types can be referenced unqualified at an offset, which
//! names are declared later in the enclosing block, and whether a given
//! declaration is reachable from a name without being hidden.
//!
//! Results are ordered nearest first:
//! 1. locals of the enclosing body, innermost scope first
//! 2. the enclosing type, its type parameters and inherited members
//! 3. lexically enclosing types, each with its inherited members
//! 4. the top-level types of the compilation unit
//!
//! A binding is reported once per signature (methods by name and erased
//! parameter types, other kinds by name), so nearer declarations shadow
//! farther ones.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::flags::DeclarationFlags;
use crate::requestor::{BindingRequestor, CollectingRequestor, SearchRequestor};
use crate::scope::{ScopeDeclaration, ScopeTree};
use crate::scope_builder::ScopeBuilder;
use javelin_ast::{ChildSlot, NodeArena, NodeData, NodeFinder, NodeIndex, NodeKind};
use javelin_bindings::{BindingResolver, VariableKind};
use javelin_common::limits::MAX_SCOPE_NESTING;
use javelin_common::{AnalysisError, AnalysisOptions, AnalysisResult, BindingId};

pub struct ScopeAnalyzer<'a> {
    arena: &'a NodeArena,
    /// The compilation unit.
    root: NodeIndex,
    resolver: BindingResolver<'a>,
    /// Applied to every query as if the caller passed `CHECK_VISIBILITY`.
    check_visibility: bool,
    types_visited: FxHashSet<BindingId>,
    /// Scope trees of bodies and lambdas, built on first use.
    trees: FxHashMap<NodeIndex, ScopeTree>,
}

impl<'a> ScopeAnalyzer<'a> {
    pub fn new(
        arena: &'a NodeArena,
        root: NodeIndex,
        resolver: BindingResolver<'a>,
    ) -> AnalysisResult<Self> {
        if !arena.is_kind(root, NodeKind::CompilationUnit) {
            return Err(AnalysisError::precondition(format!(
                "scope analysis needs a compilation unit, got {:?}",
                arena.kind(root)
            )));
        }
        Ok(Self {
            arena,
            root,
            resolver,
            check_visibility: false,
            types_visited: FxHashSet::default(),
            trees: FxHashMap::default(),
        })
    }

    pub fn with_options(mut self, options: &AnalysisOptions) -> Self {
        self.check_visibility = options.check_visibility;
        self.resolver = self.resolver.with_options(options);
        self
    }

    #[inline]
    pub fn resolver(&self) -> &BindingResolver<'a> {
        &self.resolver
    }

    fn effective_flags(&self, flags: DeclarationFlags) -> DeclarationFlags {
        if self.check_visibility {
            flags | DeclarationFlags::CHECK_VISIBILITY
        } else {
            flags
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Bindings that can be referenced at `offset`.
    ///
    /// An offset on a simple name is answered as
    /// [`declarations_in_scope_for_name`](Self::declarations_in_scope_for_name).
    #[tracing::instrument(level = "debug", skip(self), fields(flags = flags.bits()))]
    pub fn declarations_in_scope(
        &mut self,
        offset: u32,
        flags: DeclarationFlags,
    ) -> AnalysisResult<Vec<BindingId>> {
        let Some(node) = NodeFinder::covering_node(self.arena, self.root, offset, 0) else {
            return Ok(Vec::new());
        };
        if self.arena.is_kind(node, NodeKind::SimpleName) {
            return self.declarations_in_scope_for_name(node, flags);
        }
        if let Some(constants) = self.enum_case_constants(node) {
            return Ok(constants);
        }

        self.types_visited.clear();
        let flags = self.effective_flags(flags);
        let resolver = self.resolver.clone();
        let context = self.parent_type_binding(node);
        let mut requestor = CollectingRequestor::new(&resolver, context, flags);
        self.add_local_declarations(node, offset, flags, &mut requestor)?;
        if let Some(context) = context {
            self.add_type_declarations(context, flags, &mut requestor, 0)?;
        }
        let result = requestor.into_result()?;
        debug!(count = result.len(), "declarations in scope");
        Ok(result)
    }

    /// Bindings that `selector` could resolve to.
    ///
    /// A qualified selector (`expr.name`, `super.name`, `outer.new Name()`)
    /// sees the members of the qualifier's type and its supertypes only.
    #[tracing::instrument(level = "debug", skip(self), fields(selector = selector.0, flags = flags.bits()))]
    pub fn declarations_in_scope_for_name(
        &mut self,
        selector: NodeIndex,
        flags: DeclarationFlags,
    ) -> AnalysisResult<Vec<BindingId>> {
        if let Some(constants) = self.enum_case_constants(selector) {
            return Ok(constants);
        }
        let Some(context) = self.parent_type_binding(selector) else {
            return Ok(Vec::new());
        };

        self.types_visited.clear();
        let flags = self.effective_flags(flags);
        let resolver = self.resolver.clone();
        let mut requestor = CollectingRequestor::new(&resolver, Some(context), flags);
        match self.qualifier_type(selector) {
            None => {
                let offset = self.selector_start(selector)?;
                self.add_local_declarations(selector, offset, flags, &mut requestor)?;
                self.add_type_declarations(context, flags, &mut requestor, 0)?;
            }
            Some(qualifier) => {
                self.add_inherited(qualifier, flags, &mut requestor, 0)?;
            }
        }
        requestor.into_result()
    }

    /// Whether `declaration` is what `selector` refers to when written
    /// there: it must be in scope and not hidden by a nearer declaration
    /// with the same signature. With `CHECK_VISIBILITY` it must also be
    /// accessible.
    #[tracing::instrument(level = "debug", skip(self), fields(declaration = declaration.0, selector = selector.0))]
    pub fn is_declared_in_scope(
        &mut self,
        declaration: BindingId,
        selector: NodeIndex,
        flags: DeclarationFlags,
    ) -> AnalysisResult<bool> {
        if let Some(constants) = self.enum_case_constants(selector) {
            return Ok(constants.contains(&declaration));
        }
        let Some(context) = self.parent_type_binding(selector) else {
            return Ok(false);
        };

        self.types_visited.clear();
        let flags = self.effective_flags(flags);
        let resolver = self.resolver.clone();
        let mut requestor = SearchRequestor::new(&resolver, declaration, context, flags);
        match self.qualifier_type(selector) {
            None => {
                let offset = self.selector_start(selector)?;
                self.add_local_declarations(selector, offset, flags, &mut requestor)?;
                if !requestor.is_settled() {
                    self.add_type_declarations(context, flags, &mut requestor, 0)?;
                }
            }
            Some(qualifier) => {
                self.add_inherited(qualifier, flags, &mut requestor, 0)?;
            }
        }
        if requestor.is_hidden() {
            trace!(declaration = declaration.0, "hidden by a nearer declaration");
        }
        Ok(requestor.found() && requestor.is_visible())
    }

    /// Variables and local types declared after `offset` in the innermost
    /// block around it, in source order. Anonymous class bodies and local
    /// type bodies are not searched.
    #[tracing::instrument(level = "debug", skip(self), fields(flags = flags.bits()))]
    pub fn declarations_after(
        &mut self,
        offset: u32,
        flags: DeclarationFlags,
    ) -> AnalysisResult<Vec<BindingId>> {
        let arena = self.arena;
        let Some(node) = NodeFinder::covering_node(arena, self.root, offset, 0) else {
            return Ok(Vec::new());
        };
        let Some(block) = self.enclosing_block(node) else {
            return Ok(Vec::new());
        };
        let position = offset;

        self.types_visited.clear();
        let resolver = self.resolver.clone();
        let mut requestor = CollectingRequestor::new(&resolver, None, flags);
        let mut stack = vec![block];
        while let Some(current) = stack.pop() {
            resolver.cancellation().check()?;
            let Some(kind) = arena.kind(current) else {
                continue;
            };
            match kind {
                NodeKind::AnonymousClassDeclaration => continue,
                NodeKind::SingleVariableDeclaration | NodeKind::VariableDeclarationFragment => {
                    if flags.contains(DeclarationFlags::VARIABLES)
                        && arena.start(current).is_some_and(|s| position < s)
                        && let Some(binding) = declared_binding(arena, current)
                        && requestor.accept_binding(binding)?
                    {
                        break;
                    }
                    continue;
                }
                NodeKind::TypeDeclarationStatement => {
                    if flags.contains(DeclarationFlags::TYPES)
                        && arena.start(current).is_some_and(|s| position < s)
                        && let Some(binding) = declared_binding(arena, current)
                        && requestor.accept_binding(binding)?
                    {
                        break;
                    }
                    continue;
                }
                _ => {}
            }
            if let Some(data) = arena.data(current) {
                stack.extend(data.child_entries().into_iter().rev().map(|(_, c)| c));
            }
        }
        requestor.into_result()
    }

    /// Names a new variable introduced over `[offset, offset + length)`
    /// must not take: accessible variables visible before the range,
    /// variables declared after it in the enclosing block, and single static
    /// imports.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn used_names(&mut self, offset: u32, length: u32) -> AnalysisResult<FxHashSet<String>> {
        let table = self.resolver.table();
        let flags = DeclarationFlags::VARIABLES | DeclarationFlags::CHECK_VISIBILITY;
        let mut names = FxHashSet::default();
        for binding in self.declarations_in_scope(offset, flags)? {
            if let Some(name) = table.name(binding) {
                names.insert(name.to_string());
            }
        }
        let after = offset.saturating_add(length);
        for binding in self.declarations_after(after, flags)? {
            if let Some(name) = table.name(binding) {
                names.insert(name.to_string());
            }
        }
        if let Some(NodeData::CompilationUnit { imports, .. }) = self.arena.data(self.root) {
            for import in imports.iter() {
                if let Some(NodeData::ImportDeclaration {
                    name,
                    is_static: true,
                    on_demand: false,
                }) = self.arena.data(import)
                    && let Some(simple) = simple_name_identifier(self.arena, *name)
                {
                    names.insert(simple.to_string());
                }
            }
        }
        Ok(names)
    }

    /// Local declarations visible at `offset`, innermost first, including
    /// unresolved ones.
    pub fn local_declarations_visible_at(
        &mut self,
        offset: u32,
        flags: DeclarationFlags,
    ) -> AnalysisResult<Vec<ScopeDeclaration>> {
        let Some(node) = NodeFinder::covering_node(self.arena, self.root, offset, 0) else {
            return Ok(Vec::new());
        };
        let Some(body) = self.enclosing_body(node) else {
            return Ok(Vec::new());
        };
        self.local_scope_declarations(body, offset, flags)
    }

    /// The scope tree of a method, initializer, field or lambda.
    pub fn scope_tree(&mut self, body: NodeIndex) -> AnalysisResult<&ScopeTree> {
        self.ensure_tree(body)?;
        self.trees
            .get(&body)
            .ok_or_else(|| AnalysisError::malformed(format!("no scope tree for node {}", body.0)))
    }

    // ========================================================================
    // Local Declarations
    // ========================================================================

    fn add_local_declarations(
        &mut self,
        node: NodeIndex,
        offset: u32,
        flags: DeclarationFlags,
        requestor: &mut dyn BindingRequestor,
    ) -> AnalysisResult<bool> {
        if !flags.wants_locals() {
            return Ok(false);
        }
        let Some(body) = self.enclosing_body(node) else {
            return Ok(false);
        };
        for declaration in self.local_scope_declarations(body, offset, flags)? {
            let Some(binding) = declaration.binding else {
                trace!(name = %declaration.name, "unresolved local skipped");
                continue;
            };
            if requestor.accept_binding(binding)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn local_scope_declarations(
        &mut self,
        body: NodeIndex,
        offset: u32,
        flags: DeclarationFlags,
    ) -> AnalysisResult<Vec<ScopeDeclaration>> {
        let chain = self.tree_chain(body, offset)?;
        let mut out = Vec::new();
        for root in chain.iter().rev() {
            if let Some(tree) = self.trees.get(root) {
                out.extend(tree.declarations_visible_at(offset, flags).into_iter().cloned());
            }
        }
        Ok(out)
    }

    /// `body` followed by the lambdas around `offset`, outermost first.
    fn tree_chain(&mut self, body: NodeIndex, offset: u32) -> AnalysisResult<Vec<NodeIndex>> {
        let arena = self.arena;
        let mut chain = vec![body];
        let mut current = body;
        while chain.len() < MAX_SCOPE_NESTING {
            self.ensure_tree(current)?;
            let inner = self.trees.get(&current).and_then(|tree| {
                tree.lambdas()
                    .iter()
                    .copied()
                    .find(|l| arena.range(*l).is_some_and(|r| r.contains_offset(offset)))
            });
            let Some(inner) = inner else {
                break;
            };
            chain.push(inner);
            current = inner;
        }
        Ok(chain)
    }

    fn ensure_tree(&mut self, body: NodeIndex) -> AnalysisResult<()> {
        if self.trees.contains_key(&body) {
            return Ok(());
        }
        let tree = ScopeBuilder::new(self.arena)
            .with_cancellation(self.resolver.cancellation().clone())
            .build(body)?;
        self.trees.insert(body, tree);
        Ok(())
    }

    // ========================================================================
    // Type Scopes
    // ========================================================================

    /// Fields, methods and member types of `ty` and all its supertypes.
    fn add_inherited(
        &mut self,
        ty: BindingId,
        flags: DeclarationFlags,
        requestor: &mut dyn BindingRequestor,
        depth: u32,
    ) -> AnalysisResult<bool> {
        self.step(depth)?;
        if !self.types_visited.insert(ty) {
            return Ok(false);
        }
        let table = self.resolver.table();
        let Some(data) = table.type_data(ty) else {
            return Ok(false);
        };
        if flags.contains(DeclarationFlags::VARIABLES) {
            for field in &data.declared_fields {
                if requestor.accept_binding(*field)? {
                    return Ok(true);
                }
            }
        }
        if flags.contains(DeclarationFlags::METHODS) {
            for method in &data.declared_methods {
                let synthetic = table.get(*method).is_some_and(|m| m.synthetic);
                let constructor = table.method_data(*method).is_some_and(|m| m.is_constructor);
                if !synthetic && !constructor && requestor.accept_binding(*method)? {
                    return Ok(true);
                }
            }
        }
        if flags.contains(DeclarationFlags::TYPES) {
            for member in &data.declared_types {
                if requestor.accept_binding(*member)? {
                    return Ok(true);
                }
            }
        }

        let superclass = self.resolver.superclass_of(ty).or_else(|| {
            data.is_array()
                .then(|| table.java_lang_object())
                .flatten()
        });
        if let Some(superclass) = superclass
            && self.add_inherited(superclass, flags, requestor, depth + 1)?
        {
            return Ok(true);
        }
        for interface in self.resolver.interfaces_of(ty) {
            if self.add_inherited(interface, flags, requestor, depth + 1)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// `ty` with its type parameters and inherited members, then the scopes
    /// enclosing its declaration.
    fn add_type_declarations(
        &mut self,
        ty: BindingId,
        flags: DeclarationFlags,
        requestor: &mut dyn BindingRequestor,
        depth: u32,
    ) -> AnalysisResult<bool> {
        self.step(depth)?;
        let table = self.resolver.table();
        let Some(data) = table.type_data(ty) else {
            return Ok(false);
        };
        if flags.contains(DeclarationFlags::TYPES) && !data.is_anonymous() {
            if requestor.accept_binding(ty)? {
                return Ok(true);
            }
            for parameter in &data.type_parameters {
                if requestor.accept_binding(*parameter)? {
                    return Ok(true);
                }
            }
        }
        if self.add_inherited(ty, flags, requestor, 0)? {
            return Ok(true);
        }

        if data.is_local() {
            return self.add_outer_declarations_for_local_type(ty, flags, requestor, depth);
        }
        if let Some(outer) = table.declaring_type(ty) {
            return self.add_type_declarations(outer, flags, requestor, depth + 1);
        }
        if flags.contains(DeclarationFlags::TYPES)
            && self.arena.declaration_of(ty).is_some()
            && let Some(NodeData::CompilationUnit { types, .. }) = self.arena.data(self.root)
        {
            for declaration in types.iter() {
                if let Some(binding) = self.arena.binding(declaration)
                    && requestor.accept_binding(binding)?
                {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// A local or anonymous type sees what is in scope where it is
    /// declared.
    fn add_outer_declarations_for_local_type(
        &mut self,
        ty: BindingId,
        flags: DeclarationFlags,
        requestor: &mut dyn BindingRequestor,
        depth: u32,
    ) -> AnalysisResult<bool> {
        let arena = self.arena;
        let Some(node) = arena.declaration_of(ty) else {
            return Ok(false);
        };
        if !arena.kind(node).is_some_and(NodeKind::is_type_body_owner) {
            return Ok(false);
        }
        let Some(parent) = arena.parent(node) else {
            return Ok(false);
        };
        if let Some(start) = arena.start(parent)
            && self.add_local_declarations(parent, start, flags, requestor)?
        {
            return Ok(true);
        }
        if let Some(outer) = self.parent_type_binding(parent) {
            return self.add_type_declarations(outer, flags, requestor, depth + 1);
        }
        Ok(false)
    }

    fn step(&self, depth: u32) -> AnalysisResult<()> {
        self.resolver.cancellation().check()?;
        if depth > self.resolver.max_depth() {
            return Err(AnalysisError::malformed(format!(
                "type scope nesting deeper than {}",
                self.resolver.max_depth()
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Node Context
    // ========================================================================

    /// Binding of the nearest named or anonymous type around `node`,
    /// `node` included.
    fn parent_type_binding(&self, node: NodeIndex) -> Option<BindingId> {
        let arena = self.arena;
        std::iter::once(node)
            .chain(arena.ancestors(node))
            .find(|n| arena.kind(*n).is_some_and(NodeKind::is_type_body_owner))
            .and_then(|n| arena.binding(n))
    }

    /// Nearest method, initializer or field declaration owning `node`.
    fn enclosing_body(&self, node: NodeIndex) -> Option<NodeIndex> {
        let arena = self.arena;
        let declaration = std::iter::once(node)
            .chain(arena.ancestors(node))
            .find(|n| arena.kind(*n).is_some_and(NodeKind::is_body_declaration))?;
        matches!(
            arena.kind(declaration),
            Some(NodeKind::MethodDeclaration | NodeKind::Initializer | NodeKind::FieldDeclaration)
        )
        .then_some(declaration)
    }

    /// The block holding the statement around `node`.
    fn enclosing_block(&self, node: NodeIndex) -> Option<NodeIndex> {
        let arena = self.arena;
        let mut current = node;
        while !arena.kind(current)?.is_statement() {
            current = arena.parent(current)?;
            if arena.kind(current)?.is_body_declaration() {
                return None;
            }
        }
        while arena.kind(current)? != NodeKind::Block {
            current = arena.parent(current)?;
            if !arena.kind(current)?.is_statement() {
                return None;
            }
        }
        Some(current)
    }

    fn selector_start(&self, selector: NodeIndex) -> AnalysisResult<u32> {
        self.arena.start(selector).ok_or_else(|| {
            AnalysisError::malformed(format!("selector {} has no source range", selector.0))
        })
    }

    /// Static type whose members a qualified selector refers to.
    fn qualifier_type(&self, selector: NodeIndex) -> Option<BindingId> {
        let arena = self.arena;
        let parent = arena.parent(selector)?;
        let slot = arena.slot(selector)?;
        match (arena.data(parent)?, slot) {
            (NodeData::MethodInvocation { expression, .. }, ChildSlot::MethodInvocationName)
            | (NodeData::FieldAccess { expression, .. }, ChildSlot::FieldAccessName) => {
                arena.type_binding(*expression)
            }
            (NodeData::QualifiedName { qualifier, .. }, ChildSlot::QualifiedNameName) => {
                arena.type_binding(*qualifier)
            }
            (NodeData::SuperFieldAccess { .. }, _)
            | (NodeData::SuperMethodInvocation { .. }, ChildSlot::SuperMethodInvocationName) => {
                let current = self.parent_type_binding(parent)?;
                self.resolver.superclass_of(current)
            }
            (NodeData::SimpleType { .. }, _) => {
                // `outer.new Inner()` sees the member types of `outer`.
                let mut ty = parent;
                if arena.slot(ty) == Some(ChildSlot::ParameterizedTypeType) {
                    ty = arena.parent(ty)?;
                }
                if arena.slot(ty) != Some(ChildSlot::ClassInstanceCreationType) {
                    return None;
                }
                match arena.data(arena.parent(ty)?)? {
                    NodeData::ClassInstanceCreation { expression, .. } => {
                        arena.type_binding(*expression)
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Constants of the enum switched on, when `node` is a `case` label.
    fn enum_case_constants(&self, node: NodeIndex) -> Option<Vec<BindingId>> {
        let arena = self.arena;
        if arena.slot(node) != Some(ChildSlot::SwitchCaseExpression) {
            return None;
        }
        let switch = arena.parent(arena.parent(node)?)?;
        let NodeData::Switch { expression, .. } = arena.data(switch)? else {
            return None;
        };
        let table = self.resolver.table();
        let subject = table.declaration(arena.type_binding(*expression)?);
        let data = table.type_data(subject)?;
        if !data.is_enum() {
            return None;
        }
        Some(
            data.declared_fields
                .iter()
                .copied()
                .filter(|f| {
                    table
                        .variable_data(*f)
                        .is_some_and(|v| v.kind == VariableKind::EnumConstant)
                })
                .collect(),
        )
    }
}

/// Binding a variable declaration or local type statement declares.
fn declared_binding(arena: &NodeArena, node: NodeIndex) -> Option<BindingId> {
    match arena.data(node)? {
        NodeData::SingleVariableDeclaration { name, .. }
        | NodeData::VariableDeclarationFragment { name, .. } => {
            arena.binding(node).or_else(|| arena.binding(*name))
        }
        NodeData::TypeDeclarationStatement { declaration } => arena.binding(*declaration),
        _ => None,
    }
}

/// Last identifier of a simple or qualified name.
fn simple_name_identifier(arena: &NodeArena, name: NodeIndex) -> Option<&str> {
    match arena.data(name)? {
        NodeData::SimpleName { identifier } => Some(identifier.as_str()),
        NodeData::QualifiedName { name, .. } => arena.identifier(*name),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/analyzer_tests.rs"]
mod tests;

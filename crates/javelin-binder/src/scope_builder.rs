//! Single-pass construction of a [`ScopeTree`].

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::scope::{DeclarationKind, Scope, ScopeDeclaration, ScopeId, ScopeKind, ScopeTree};
use javelin_ast::{NodeArena, NodeData, NodeIndex, NodeList};
use javelin_common::limits::MAX_SCOPE_NESTING;
use javelin_common::{AnalysisError, AnalysisResult, CancellationToken, TextRange};

/// Walks one declaration body and records its scopes.
///
/// Accepted roots are method declarations, initializers, field
/// declarations and lambda expressions.
pub struct ScopeBuilder<'a> {
    arena: &'a NodeArena,
    cancel: CancellationToken,
    scopes: Vec<Scope>,
    node_scope_ids: FxHashMap<NodeIndex, ScopeId>,
    lambdas: Vec<NodeIndex>,
    current_scope_id: ScopeId,
    nesting: usize,
}

impl ScopeTree {
    /// Build the scopes of the body rooted at `root`.
    pub fn build(arena: &NodeArena, root: NodeIndex) -> AnalysisResult<ScopeTree> {
        ScopeBuilder::new(arena).build(root)
    }
}

impl<'a> ScopeBuilder<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        Self {
            arena,
            cancel: CancellationToken::never(),
            scopes: Vec::new(),
            node_scope_ids: FxHashMap::default(),
            lambdas: Vec::new(),
            current_scope_id: ScopeId::NONE,
            nesting: 0,
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[tracing::instrument(level = "debug", skip(self), fields(root = root.0))]
    pub fn build(mut self, root: NodeIndex) -> AnalysisResult<ScopeTree> {
        let arena = self.arena;
        let Some(data) = arena.data(root) else {
            return Err(AnalysisError::malformed(format!(
                "scope root {} is not in the arena",
                root.0
            )));
        };
        match data {
            NodeData::MethodDeclaration {
                type_parameters,
                parameters,
                body,
                ..
            } => {
                self.enter_scope(ScopeKind::Body, root)?;
                for type_parameter in type_parameters.iter() {
                    self.declare(type_parameter, DeclarationKind::Type, None);
                }
                for parameter in parameters.iter() {
                    self.declare(parameter, DeclarationKind::Variable, None);
                }
                self.bind_node(*body)?;
                self.exit_scope();
            }
            NodeData::Initializer { body, .. } => {
                self.enter_scope(ScopeKind::Body, root)?;
                self.bind_node(*body)?;
                self.exit_scope();
            }
            NodeData::FieldDeclaration { fragments, .. } => {
                self.enter_scope(ScopeKind::Body, root)?;
                for fragment in fragments.iter() {
                    if let Some(NodeData::VariableDeclarationFragment { initializer, .. }) =
                        arena.data(fragment)
                    {
                        self.bind_node(*initializer)?;
                    }
                }
                self.exit_scope();
            }
            NodeData::Lambda {
                parameters, body, ..
            } => {
                self.enter_scope(ScopeKind::Lambda, root)?;
                for parameter in parameters.iter() {
                    self.declare(parameter, DeclarationKind::Variable, None);
                }
                self.bind_node(*body)?;
                self.exit_scope();
            }
            other => {
                return Err(AnalysisError::precondition(format!(
                    "{:?} does not own a declaration body",
                    other.kind()
                )));
            }
        }
        debug!(scopes = self.scopes.len(), lambdas = self.lambdas.len(), "scope tree built");
        Ok(ScopeTree {
            scopes: self.scopes,
            node_scope_ids: self.node_scope_ids,
            lambdas: self.lambdas,
        })
    }

    // ========================================================================
    // Scope Management
    // ========================================================================

    fn enter_scope(&mut self, kind: ScopeKind, node: NodeIndex) -> AnalysisResult<()> {
        let Some(range) = self.arena.range(node) else {
            return Err(AnalysisError::malformed(format!(
                "scope node {} has no source range",
                node.0
            )));
        };
        self.enter_scope_with_range(kind, node, range)
    }

    fn enter_scope_with_range(
        &mut self,
        kind: ScopeKind,
        node: NodeIndex,
        range: TextRange,
    ) -> AnalysisResult<()> {
        self.cancel.check()?;
        self.nesting += 1;
        if self.nesting > MAX_SCOPE_NESTING {
            return Err(AnalysisError::malformed(format!(
                "scopes nested deeper than {MAX_SCOPE_NESTING}"
            )));
        }
        let id = ScopeId(self.scopes.len() as u32);
        let parent = self.current_scope_id;
        self.scopes.push(Scope::new(parent, kind, node, range));
        if let Some(parent_scope) = self.scope_mut(parent) {
            parent_scope.children.push(id);
        }
        self.node_scope_ids.insert(node, id);
        self.current_scope_id = id;
        Ok(())
    }

    fn exit_scope(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
        self.current_scope_id = self
            .scope_mut(self.current_scope_id)
            .map_or(ScopeId::NONE, |s| s.parent);
    }

    fn scope_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        if id.is_none() {
            None
        } else {
            self.scopes.get_mut(id.index())
        }
    }

    /// Record a variable, type parameter or local type in the current scope.
    ///
    /// `visible_after` defaults to the declaration's start.
    fn declare(&mut self, node: NodeIndex, kind: DeclarationKind, visible_after: Option<u32>) {
        let arena = self.arena;
        let (name_node, binding_node) = match arena.data(node) {
            Some(
                NodeData::SingleVariableDeclaration { name, .. }
                | NodeData::VariableDeclarationFragment { name, .. }
                | NodeData::TypeParameter { name, .. },
            ) => (*name, node),
            Some(NodeData::TypeDeclarationStatement { declaration }) => {
                match arena.data(*declaration) {
                    Some(
                        NodeData::TypeDeclaration { name, .. }
                        | NodeData::EnumDeclaration { name, .. },
                    ) => (*name, *declaration),
                    _ => return,
                }
            }
            _ => return,
        };
        let Some(name) = arena.identifier(name_node) else {
            return;
        };
        let Some(start) = arena.start(node) else {
            trace!(node = node.0, name, "skipping unpositioned declaration");
            return;
        };
        let binding = arena
            .binding(binding_node)
            .or_else(|| arena.binding(name_node));
        let declaration = ScopeDeclaration {
            name: name.to_string(),
            kind,
            node,
            binding,
            visible_after: visible_after.unwrap_or(start),
        };
        let current = self.current_scope_id;
        if let Some(scope) = self.scope_mut(current) {
            scope.names.insert(declaration.name.clone());
            scope.declarations.push(declaration);
        }
    }

    // ========================================================================
    // Walk
    // ========================================================================

    fn bind_node(&mut self, node: NodeIndex) -> AnalysisResult<()> {
        let arena = self.arena;
        let Some(data) = arena.data(node) else {
            return Ok(());
        };
        match data {
            NodeData::Block { statements } => {
                self.enter_scope(ScopeKind::Block, node)?;
                for statement in statements.iter() {
                    self.bind_node(statement)?;
                }
                self.exit_scope();
            }
            NodeData::VariableDeclarationStatement { fragments, .. }
            | NodeData::VariableDeclarationExpression { fragments, .. } => {
                for fragment in fragments.iter() {
                    self.declare(fragment, DeclarationKind::Variable, None);
                    if let Some(NodeData::VariableDeclarationFragment { initializer, .. }) =
                        arena.data(fragment)
                    {
                        self.bind_node(*initializer)?;
                    }
                }
            }
            NodeData::TypeDeclarationStatement { .. } => {
                // Local types are usable once their declaration is complete.
                let end = arena.end(node);
                if let Some(end) = end {
                    self.declare(node, DeclarationKind::Type, Some(end));
                }
            }
            NodeData::For {
                initializers,
                condition,
                updaters,
                body,
            } => {
                self.enter_scope(ScopeKind::For, node)?;
                for initializer in initializers.iter() {
                    self.bind_node(initializer)?;
                }
                self.bind_node(*condition)?;
                for updater in updaters.iter() {
                    self.bind_node(updater)?;
                }
                self.bind_node(*body)?;
                self.exit_scope();
            }
            NodeData::EnhancedFor {
                parameter,
                expression,
                body,
            } => {
                self.enter_scope(ScopeKind::EnhancedFor, node)?;
                self.declare(*parameter, DeclarationKind::Variable, None);
                self.bind_node(*expression)?;
                self.bind_node(*body)?;
                self.exit_scope();
            }
            NodeData::CatchClause { exception, body } => {
                self.enter_scope(ScopeKind::Catch, node)?;
                self.declare(*exception, DeclarationKind::Variable, None);
                self.bind_node(*body)?;
                self.exit_scope();
            }
            NodeData::Switch {
                expression,
                statements,
            } => {
                self.bind_node(*expression)?;
                self.enter_scope(ScopeKind::Switch, node)?;
                for statement in statements.iter() {
                    self.bind_node(statement)?;
                }
                self.exit_scope();
            }
            NodeData::Try {
                resources,
                body,
                catch_clauses,
                finally,
            } => {
                self.bind_try(node, resources, *body)?;
                for clause in catch_clauses.iter() {
                    self.bind_node(clause)?;
                }
                self.bind_node(*finally)?;
            }
            NodeData::Lambda { .. } => {
                self.lambdas.push(node);
            }
            NodeData::ClassInstanceCreation {
                expression,
                arguments,
                ..
            } => {
                self.bind_node(*expression)?;
                for argument in arguments.iter() {
                    self.bind_node(argument)?;
                }
            }
            NodeData::AnonymousClassDeclaration { .. }
            | NodeData::TypeDeclaration { .. }
            | NodeData::EnumDeclaration { .. } => {}
            NodeData::SingleVariableDeclaration { initializer, .. } => {
                self.declare(node, DeclarationKind::Variable, None);
                self.bind_node(*initializer)?;
            }
            _ => {
                for child in arena.children(node) {
                    if arena
                        .kind(child)
                        .is_some_and(|k| k.is_expression() || k.is_statement())
                    {
                        self.bind_node(child)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Resources are visible in the `try` block only, not in its catch
    /// clauses or `finally` block.
    fn bind_try(
        &mut self,
        node: NodeIndex,
        resources: &NodeList,
        body: NodeIndex,
    ) -> AnalysisResult<()> {
        if resources.is_empty() {
            return self.bind_node(body);
        }
        let arena = self.arena;
        let (Some(start), Some(end)) = (arena.start(node), arena.end(body)) else {
            return Err(AnalysisError::malformed(format!(
                "try statement {} has no source range",
                node.0
            )));
        };
        self.enter_scope_with_range(ScopeKind::TryResources, node, TextRange::from_bounds(start, end))?;
        for resource in resources.iter() {
            self.bind_node(resource)?;
        }
        self.bind_node(body)?;
        self.exit_scope();
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/scope_builder_tests.rs"]
mod tests;

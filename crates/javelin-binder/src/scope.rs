//! Lexical scopes of one declaration body.
//!
//! A [`ScopeTree`] mirrors the block structure of a method, initializer,
//! field declaration or lambda: the body itself, every block, `for` and
//! enhanced `for` statement, `catch` clause, `switch` statement and `try`
//! with resources opens a scope. Scopes are stored in a flat vector and link
//! to their parent by [`ScopeId`], the same way nodes link to their parent
//! by index.
//!
//! Nested type bodies and lambda bodies are not entered; a lambda gets its
//! own tree when a query position falls inside it.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::flags::DeclarationFlags;
use javelin_ast::NodeIndex;
use javelin_common::{BindingId, TextRange};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const NONE: ScopeId = ScopeId(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The construct that opened a scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Method, initializer or field declaration: parameters and type
    /// parameters live here.
    Body,
    /// Lambda expression: its parameters live here.
    Lambda,
    Block,
    For,
    EnhancedFor,
    Catch,
    Switch,
    /// Resource declarations of a `try`.
    TryResources,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Variable,
    Type,
}

/// A name introduced into a scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeDeclaration {
    pub name: String,
    pub kind: DeclarationKind,
    /// Declaring node: a variable declaration, type parameter or type
    /// declaration statement.
    pub node: NodeIndex,
    pub binding: Option<BindingId>,
    /// The declaration is visible at offsets strictly greater than this.
    ///
    /// Variables become visible after their start; local types only once
    /// their declaration statement has ended.
    pub visible_after: u32,
}

impl ScopeDeclaration {
    #[inline]
    pub fn is_visible_at(&self, offset: u32) -> bool {
        self.visible_after < offset
    }

    pub fn matches(&self, flags: DeclarationFlags) -> bool {
        match self.kind {
            DeclarationKind::Variable => flags.contains(DeclarationFlags::VARIABLES),
            DeclarationKind::Type => flags.contains(DeclarationFlags::TYPES),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub parent: ScopeId,
    pub kind: ScopeKind,
    /// Node that opened the scope.
    pub node: NodeIndex,
    pub range: TextRange,
    /// Declarations in source order.
    pub declarations: Vec<ScopeDeclaration>,
    pub children: SmallVec<[ScopeId; 4]>,
    pub names: FxHashSet<String>,
}

impl Scope {
    pub fn new(parent: ScopeId, kind: ScopeKind, node: NodeIndex, range: TextRange) -> Self {
        Self {
            parent,
            kind,
            node,
            range,
            declarations: Vec::new(),
            children: SmallVec::new(),
            names: FxHashSet::default(),
        }
    }

    /// Inside test used for query positions: `start <= offset < end`.
    #[inline]
    pub fn is_inside(&self, offset: u32) -> bool {
        self.range.contains_offset(offset)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Scopes of one declaration body.
#[derive(Clone, Debug, Default)]
pub struct ScopeTree {
    pub(crate) scopes: Vec<Scope>,
    /// Scope opened by each scope-creating node.
    pub(crate) node_scope_ids: FxHashMap<NodeIndex, ScopeId>,
    /// Lambdas met while building; their bodies are separate trees.
    pub(crate) lambdas: Vec<NodeIndex>,
}

impl ScopeTree {
    #[inline]
    pub fn root(&self) -> ScopeId {
        if self.scopes.is_empty() {
            ScopeId::NONE
        } else {
            ScopeId(0)
        }
    }

    /// The node the tree was built for.
    pub fn root_node(&self) -> Option<NodeIndex> {
        self.scopes.first().map(|s| s.node)
    }

    #[inline]
    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        if id.is_none() {
            None
        } else {
            self.scopes.get(id.index())
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(i, s)| (ScopeId(i as u32), s))
    }

    #[inline]
    pub fn scope_of_node(&self, node: NodeIndex) -> Option<ScopeId> {
        self.node_scope_ids.get(&node).copied()
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.get(id).map(|s| s.parent).filter(|p| !p.is_none())
    }

    /// Lambdas lying directly in this body (not inside another lambda).
    pub fn lambdas(&self) -> &[NodeIndex] {
        &self.lambdas
    }

    /// Innermost scope whose range contains `offset`.
    pub fn innermost_scope_at(&self, offset: u32) -> Option<ScopeId> {
        let mut current = self.root();
        if !self.get(current)?.is_inside(offset) {
            return None;
        }
        'descend: loop {
            let scope = self.get(current)?;
            for child in &scope.children {
                if self.get(*child).is_some_and(|c| c.is_inside(offset)) {
                    current = *child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// `id` and its ancestors, innermost first.
    pub fn scope_chain(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(id).filter(|id| !id.is_none()), move |current| {
            self.parent(*current)
        })
    }

    /// Declarations visible at `offset` that match `flags`: innermost scope
    /// first, later declarations of a scope before earlier ones.
    pub fn declarations_visible_at(
        &self,
        offset: u32,
        flags: DeclarationFlags,
    ) -> Vec<&ScopeDeclaration> {
        let Some(innermost) = self.innermost_scope_at(offset) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for id in self.scope_chain(innermost) {
            let Some(scope) = self.get(id) else {
                continue;
            };
            out.extend(
                scope
                    .declarations
                    .iter()
                    .rev()
                    .filter(|d| d.matches(flags) && d.is_visible_at(offset)),
            );
        }
        out
    }

    /// Names of the variables visible at `offset`, innermost first.
    pub fn visible_names_at(&self, offset: u32) -> Vec<&str> {
        self.declarations_visible_at(offset, DeclarationFlags::VARIABLES)
            .into_iter()
            .map(|d| d.name.as_str())
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod tests;

//! Binding Resolver.
//!
//! Hierarchy-aware lookups over a [`BindingTable`]:
//! - declared-only member lookups (`find_*_in_type`, `find_member`)
//! - hierarchy lookups: the type itself, then its superclass chain
//!   (recursively), then each implemented interface in declaration order
//! - supertype queries (`is_super_type`, `all_super_types`, `visit_hierarchy`)
//! - erasure, boxing and normalization helpers
//!
//! Override search lives in `overrides.rs` and visibility in `visibility.rs`.
//!
//! Declared-only lookups are cheap and return `Option`. Anything that walks
//! the supertype graph checks the session's cancellation token, caps its
//! depth and tracks visited types, and returns `AnalysisResult`.

use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashSet};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::binding::{PrimitiveKind, TypeShape};
use crate::table::{BindingTable, JAVA_LANG_OBJECT};
use javelin_common::limits::{HIERARCHY_VISITED_CAPACITY, MAX_HIERARCHY_DEPTH};
use javelin_common::{AnalysisError, AnalysisOptions, AnalysisResult, BindingId, CancellationToken};

/// Read-only resolver over one binding table.
///
/// Cheap to construct; one instance per analysis session.
#[derive(Clone, Debug)]
pub struct BindingResolver<'a> {
    pub(crate) table: &'a BindingTable,
    pub(crate) cancel: CancellationToken,
    pub(crate) max_depth: u32,
}

pub(crate) type VisitedSet = FxHashSet<BindingId>;

pub(crate) fn new_visited_set() -> VisitedSet {
    FxHashSet::with_capacity_and_hasher(HIERARCHY_VISITED_CAPACITY, FxBuildHasher)
}

impl<'a> BindingResolver<'a> {
    pub fn new(table: &'a BindingTable) -> Self {
        Self {
            table,
            cancel: CancellationToken::never(),
            max_depth: MAX_HIERARCHY_DEPTH,
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_options(mut self, options: &AnalysisOptions) -> Self {
        self.max_depth = options.max_hierarchy_depth.max(1);
        self
    }

    #[inline]
    pub fn table(&self) -> &'a BindingTable {
        self.table
    }

    #[inline]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Cancellation and depth check at a recursion boundary.
    pub(crate) fn step(&self, depth: u32) -> AnalysisResult<()> {
        self.cancel.check()?;
        if depth > self.max_depth {
            return Err(AnalysisError::malformed(format!(
                "supertype hierarchy deeper than {}",
                self.max_depth
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Identity-key equality of two ids of this table.
    #[inline]
    pub fn bindings_equal(&self, a: BindingId, b: BindingId) -> bool {
        a == b
            || matches!(
                (self.table.get(a), self.table.get(b)),
                (Some(x), Some(y)) if crate::binding::bindings_equal(x, y)
            )
    }

    /// True if both bindings share the same canonical declaration.
    pub fn equal_declarations(&self, a: BindingId, b: BindingId) -> bool {
        self.bindings_equal(self.table.declaration(a), self.table.declaration(b))
    }

    /// Pairwise equality of two type lists.
    pub fn equal_type_lists(&self, a: &[BindingId], b: &[BindingId]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| self.bindings_equal(*x, *y))
    }

    /// Same name and pairwise erasure-equal parameters.
    pub fn is_equal_method(&self, method: BindingId, name: &str, parameters: &[BindingId]) -> bool {
        let Some(data) = self.table.method_data(method) else {
            return false;
        };
        self.table.name(method) == Some(name)
            && data.parameter_types.len() == parameters.len()
            && data.parameter_types.iter().zip(parameters).all(|(p, q)| {
                self.bindings_equal(self.table.erasure(*p), self.table.erasure(*q))
            })
    }

    // =========================================================================
    // Declared-only Lookups
    // =========================================================================

    pub fn find_field_in_type(&self, ty: BindingId, name: &str) -> Option<BindingId> {
        let data = self.table.type_data(ty)?;
        if data.is_primitive() {
            return None;
        }
        data.declared_fields
            .iter()
            .copied()
            .find(|f| self.table.name(*f) == Some(name))
    }

    /// Declared method of `ty`. `None` parameters match by name only and
    /// return the first such method.
    pub fn find_method_in_type(
        &self,
        ty: BindingId,
        name: &str,
        parameters: Option<&[BindingId]>,
    ) -> Option<BindingId> {
        let data = self.table.type_data(ty)?;
        if data.is_primitive() {
            return None;
        }
        data.declared_methods.iter().copied().find(|m| match parameters {
            None => self.table.name(*m) == Some(name),
            Some(params) => self.is_equal_method(*m, name, params),
        })
    }

    pub fn find_member_type_in_type(&self, ty: BindingId, name: &str) -> Option<BindingId> {
        self.table
            .type_data(ty)?
            .declared_types
            .iter()
            .copied()
            .find(|t| self.table.name(*t) == Some(name))
    }

    /// Declared member of `ty` named `name`.
    ///
    /// With a parameter list only methods match. Without one, fields are
    /// tried first, then methods, then member types.
    pub fn find_member(
        &self,
        ty: BindingId,
        name: &str,
        parameters: Option<&[BindingId]>,
    ) -> Option<BindingId> {
        match parameters {
            Some(_) => self.find_method_in_type(ty, name, parameters),
            None => self
                .find_field_in_type(ty, name)
                .or_else(|| self.find_method_in_type(ty, name, None))
                .or_else(|| self.find_member_type_in_type(ty, name)),
        }
    }

    // =========================================================================
    // Hierarchy Lookups
    // =========================================================================

    /// Direct superclass. Type variables report their first class bound,
    /// or `Object` when every bound is an interface.
    pub fn superclass_of(&self, ty: BindingId) -> Option<BindingId> {
        let data = self.table.type_data(ty)?;
        match &data.shape {
            TypeShape::TypeVariable { bounds } => bounds
                .iter()
                .copied()
                .find(|b| !self.table.is_interface(*b))
                .or_else(|| self.table.java_lang_object()),
            _ => data.superclass,
        }
    }

    /// Direct superinterfaces in declaration order.
    pub fn interfaces_of(&self, ty: BindingId) -> SmallVec<[BindingId; 2]> {
        let Some(data) = self.table.type_data(ty) else {
            return SmallVec::new();
        };
        match &data.shape {
            TypeShape::TypeVariable { bounds } => bounds
                .iter()
                .copied()
                .filter(|b| self.table.is_interface(*b))
                .collect(),
            _ => data.interfaces.clone(),
        }
    }

    /// First result of `find` over `ty`, its superclass chain, then its
    /// interfaces in order.
    pub(crate) fn search_hierarchy<T>(
        &self,
        ty: BindingId,
        find: &mut dyn FnMut(BindingId) -> Option<T>,
    ) -> AnalysisResult<Option<T>> {
        let mut visited = new_visited_set();
        self.search_hierarchy_from(ty, 0, &mut visited, find)
    }

    fn search_hierarchy_from<T>(
        &self,
        ty: BindingId,
        depth: u32,
        visited: &mut VisitedSet,
        find: &mut dyn FnMut(BindingId) -> Option<T>,
    ) -> AnalysisResult<Option<T>> {
        self.step(depth)?;
        if !visited.insert(ty) {
            return Ok(None);
        }
        if let Some(found) = find(ty) {
            return Ok(Some(found));
        }
        if let Some(superclass) = self.superclass_of(ty)
            && let Some(found) = self.search_hierarchy_from(superclass, depth + 1, visited, find)?
        {
            return Ok(Some(found));
        }
        for interface in self.interfaces_of(ty) {
            if let Some(found) = self.search_hierarchy_from(interface, depth + 1, visited, find)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    #[tracing::instrument(level = "debug", skip(self), fields(ty = ty.0))]
    pub fn find_field_in_hierarchy(
        &self,
        ty: BindingId,
        name: &str,
    ) -> AnalysisResult<Option<BindingId>> {
        self.search_hierarchy(ty, &mut |t| self.find_field_in_type(t, name))
    }

    #[tracing::instrument(level = "debug", skip(self, parameters), fields(ty = ty.0))]
    pub fn find_method_in_hierarchy(
        &self,
        ty: BindingId,
        name: &str,
        parameters: Option<&[BindingId]>,
    ) -> AnalysisResult<Option<BindingId>> {
        self.search_hierarchy(ty, &mut |t| self.find_method_in_type(t, name, parameters))
    }

    /// [`find_member`](Self::find_member) over the hierarchy. The first type
    /// declaring a match wins; the superclass chain is searched before
    /// interfaces.
    #[tracing::instrument(level = "debug", skip(self, parameters), fields(ty = ty.0))]
    pub fn find_member_in_hierarchy(
        &self,
        ty: BindingId,
        name: &str,
        parameters: Option<&[BindingId]>,
    ) -> AnalysisResult<Option<BindingId>> {
        self.search_hierarchy(ty, &mut |t| self.find_member(t, name, parameters))
    }

    /// The supertype of `ty` (or `ty` itself) whose declaration has the
    /// given qualified name.
    pub fn find_type_in_hierarchy(
        &self,
        ty: BindingId,
        qualified_name: &str,
    ) -> AnalysisResult<Option<BindingId>> {
        if self.table.is_array(ty) || self.table.is_primitive(ty) {
            return Ok(None);
        }
        self.search_hierarchy(ty, &mut |t| {
            (self.table.qualified_name(self.table.declaration(t)) == qualified_name).then_some(t)
        })
    }

    // =========================================================================
    // Supertype Queries
    // =========================================================================

    /// Visit every supertype of `ty` (not `ty` itself): the superclass chain
    /// first, then all superinterfaces. `visitor` returns `false` to stop.
    /// Returns `false` if the visit was stopped.
    pub fn visit_hierarchy(
        &self,
        ty: BindingId,
        visitor: &mut dyn FnMut(BindingId) -> bool,
    ) -> AnalysisResult<bool> {
        let mut current = ty;
        let mut depth = 0;
        let mut seen = new_visited_set();
        while let Some(superclass) = self.superclass_of(current) {
            self.step(depth)?;
            if !seen.insert(superclass) {
                break;
            }
            if !visitor(superclass) {
                return Ok(false);
            }
            current = superclass;
            depth += 1;
        }
        let mut visited = new_visited_set();
        self.visit_interfaces(ty, 0, &mut visited, visitor)
    }

    fn visit_interfaces(
        &self,
        ty: BindingId,
        depth: u32,
        visited: &mut VisitedSet,
        visitor: &mut dyn FnMut(BindingId) -> bool,
    ) -> AnalysisResult<bool> {
        self.step(depth)?;
        if !visited.insert(ty) {
            return Ok(true);
        }
        let interfaces = self.interfaces_of(ty);
        for interface in &interfaces {
            if !visitor(*interface) {
                return Ok(false);
            }
        }
        if let Some(superclass) = self.superclass_of(ty)
            && !self.visit_interfaces(superclass, depth + 1, visited, visitor)?
        {
            return Ok(false);
        }
        for interface in interfaces {
            if !self.visit_interfaces(interface, depth + 1, visited, visitor)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// All supertypes of `ty`, excluding `ty`, without duplicates: each
    /// superclass followed by its own supertypes, then each interface.
    pub fn all_super_types(&self, ty: BindingId) -> AnalysisResult<Vec<BindingId>> {
        let mut collected: IndexSet<BindingId, FxBuildHasher> = IndexSet::default();
        self.collect_super_types(ty, 0, &mut collected)?;
        collected.shift_remove(&ty);
        Ok(collected.into_iter().collect())
    }

    fn collect_super_types(
        &self,
        ty: BindingId,
        depth: u32,
        collected: &mut IndexSet<BindingId, FxBuildHasher>,
    ) -> AnalysisResult<()> {
        self.step(depth)?;
        if let Some(superclass) = self.superclass_of(ty)
            && collected.insert(superclass)
        {
            self.collect_super_types(superclass, depth + 1, collected)?;
        }
        for interface in self.interfaces_of(ty) {
            if collected.insert(interface) {
                self.collect_super_types(interface, depth + 1, collected)?;
            }
        }
        Ok(())
    }

    /// True if `possible_super` is `ty` or one of its supertypes.
    ///
    /// Interfaces are only searched when `possible_super` is an interface.
    /// Without `consider_type_arguments` both sides are compared by
    /// declaration, so `List<String>` is a supertype of `ArrayList<Integer>`.
    pub fn is_super_type(
        &self,
        possible_super: BindingId,
        ty: BindingId,
        consider_type_arguments: bool,
    ) -> AnalysisResult<bool> {
        let target = if consider_type_arguments {
            possible_super
        } else {
            self.table.declaration(possible_super)
        };
        let search_interfaces = self.table.is_interface(target);
        let mut visited = new_visited_set();
        self.is_super_type_from(target, ty, consider_type_arguments, search_interfaces, 0, &mut visited)
    }

    fn is_super_type_from(
        &self,
        target: BindingId,
        ty: BindingId,
        consider_type_arguments: bool,
        search_interfaces: bool,
        depth: u32,
        visited: &mut VisitedSet,
    ) -> AnalysisResult<bool> {
        self.step(depth)?;
        if self.table.is_array(ty) || self.table.is_primitive(ty) || !visited.insert(ty) {
            return Ok(false);
        }
        let candidate = if consider_type_arguments {
            ty
        } else {
            self.table.declaration(ty)
        };
        if self.bindings_equal(candidate, target) {
            return Ok(true);
        }
        if let Some(superclass) = self.superclass_of(ty)
            && self.is_super_type_from(
                target,
                superclass,
                consider_type_arguments,
                search_interfaces,
                depth + 1,
                visited,
            )?
        {
            return Ok(true);
        }
        if search_interfaces {
            for interface in self.interfaces_of(ty) {
                if self.is_super_type_from(
                    target,
                    interface,
                    consider_type_arguments,
                    search_interfaces,
                    depth + 1,
                    visited,
                )? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    // =========================================================================
    // Types: Erasure, Boxing, Normalization
    // =========================================================================

    #[inline]
    pub fn is_void_type(&self, ty: BindingId) -> bool {
        self.table.type_data(ty).is_some_and(|t| t.is_void())
    }

    #[inline]
    pub fn is_java_lang_object(&self, ty: BindingId) -> bool {
        self.table.qualified_name(ty) == JAVA_LANG_OBJECT
    }

    /// Boxed counterpart of a primitive type.
    pub fn boxed_type(&self, primitive: BindingId) -> Option<BindingId> {
        let kind = self.table.primitive_kind(primitive)?;
        self.table.find_type(kind.boxed_name()?)
    }

    /// Primitive counterpart of a boxed type.
    pub fn unboxed_type(&self, boxed: BindingId) -> Option<BindingId> {
        let qualified = self.table.qualified_name(self.table.declaration(boxed));
        PrimitiveKind::from_boxed_name(qualified).map(|kind| self.table.primitive(kind))
    }

    /// The type a declaration of this type would be written as: anonymous
    /// types become their first interface (or superclass), captures become
    /// their wildcard. `None` for the null and void types.
    pub fn normalize_type(&self, ty: BindingId) -> Option<BindingId> {
        let data = self.table.type_data(ty)?;
        if data.is_null() || data.is_void() {
            return None;
        }
        if data.is_anonymous() {
            return data.interfaces.first().copied().or(data.superclass);
        }
        match data.shape {
            TypeShape::Capture { wildcard } => Some(wildcard),
            _ => Some(ty),
        }
    }

    /// Strip `dimensions` array dimensions from `array`.
    pub fn component_type(&self, array: BindingId, dimensions: u32) -> Option<BindingId> {
        let TypeShape::Array {
            element,
            dimensions: total,
            ..
        } = self.table.type_data(array)?.shape
        else {
            return None;
        };
        if dimensions > total {
            return None;
        }
        if dimensions == total {
            return Some(element);
        }
        let key = crate::key::BindingKey::array(self.table.key(element)?, total - dimensions);
        self.table.by_key(&key)
    }

    /// Package a type, member or local is declared in.
    #[inline]
    pub fn declaring_package(&self, binding: BindingId) -> Option<BindingId> {
        self.table.package_of(binding)
    }

    /// Outermost enclosing type, walking declaring-type links.
    pub fn top_level_type(&self, ty: BindingId) -> BindingId {
        let mut current = ty;
        for _ in 0..javelin_common::limits::MAX_ENCLOSING_TYPE_DEPTH {
            match self.table.declaring_type(current) {
                Some(outer) => current = outer,
                None => break,
            }
        }
        current
    }

    /// True if `ty` declares a constructor with the erased parameter types
    /// of `constructor`.
    pub fn contains_signature_equivalent_constructor(
        &self,
        ty: BindingId,
        constructor: BindingId,
    ) -> bool {
        let params = self.table.parameter_types(constructor);
        let Some(data) = self.table.type_data(ty) else {
            return false;
        };
        data.declared_methods.iter().any(|m| {
            self.table.method_data(*m).is_some_and(|d| d.is_constructor)
                && self
                    .table
                    .name(*m)
                    .is_some_and(|name| self.is_equal_method(*m, name, params))
        })
    }

    /// The single abstract method of a functional interface.
    ///
    /// Abstract methods redeclared by a subinterface count once, and
    /// abstract redeclarations of `Object`'s public methods do not count.
    #[tracing::instrument(level = "debug", skip(self), fields(ty = ty.0))]
    pub fn functional_method(&self, ty: BindingId) -> AnalysisResult<Option<BindingId>> {
        if !self.table.is_interface(ty) {
            return Ok(None);
        }
        let object = self.table.java_lang_object();
        let mut abstract_methods: SmallVec<[BindingId; 2]> = SmallVec::new();
        let mut visited = new_visited_set();
        let mut stack = vec![(ty, 0u32)];
        while let Some((current, depth)) = stack.pop() {
            self.step(depth)?;
            if !visited.insert(current) {
                continue;
            }
            let Some(data) = self.table.type_data(current) else {
                continue;
            };
            for method in &data.declared_methods {
                let modifiers = self.table.modifiers(*method);
                if !modifiers.is_abstract() || modifiers.is_static() {
                    continue;
                }
                let name = self.table.name(*method).unwrap_or("");
                let params = self.table.parameter_types(*method);
                let redeclares_object =
                    object.is_some_and(|o| self.find_method_in_type(o, name, Some(params)).is_some());
                let already_seen = abstract_methods
                    .iter()
                    .any(|m| self.is_equal_method(*m, name, params));
                if !redeclares_object && !already_seen {
                    abstract_methods.push(*method);
                }
            }
            for interface in self.interfaces_of(current).into_iter().rev() {
                stack.push((interface, depth + 1));
            }
        }
        trace!(count = abstract_methods.len(), "abstract methods collected");
        if abstract_methods.len() == 1 {
            Ok(abstract_methods.first().copied())
        } else {
            debug!(count = abstract_methods.len(), "not a functional interface");
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;

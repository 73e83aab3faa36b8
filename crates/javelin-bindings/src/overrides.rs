//! Override search.
//!
//! `m1` overrides `m2` when `m1` is a subsignature of `m2` and `m2` is
//! declared in a supertype of `m1`'s declaring type. Private, static and
//! constructor bindings never override anything.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::debug;

use crate::binding::TypeShape;
use crate::resolver::BindingResolver;
use javelin_common::{AnalysisResult, BindingId};

impl BindingResolver<'_> {
    /// Subsignature relation between `overriding` and `overridden`.
    ///
    /// Same name and arity, and either:
    /// - neither method is generic and the parameters are pairwise equal,
    ///   or equal to the erasure of the overridden parameters;
    /// - `overriding` is not generic and `overridden` is, compared under
    ///   erasure;
    /// - both declare the same number of type parameters with equal erased
    ///   bound sets, and parameters match with type variables erased.
    pub fn is_subsignature(&self, overriding: BindingId, overridden: BindingId) -> bool {
        let table = self.table;
        let (Some(m1), Some(m2)) = (table.method_data(overriding), table.method_data(overridden))
        else {
            return false;
        };
        if table.name(overriding) != table.name(overridden)
            || m1.parameter_types.len() != m2.parameter_types.len()
        {
            return false;
        }
        if m1.type_parameters.len() != m2.type_parameters.len() && !m1.type_parameters.is_empty()
        {
            return false;
        }

        if !m2.type_parameters.is_empty() {
            for (p1, p2) in m1.type_parameters.iter().zip(&m2.type_parameters) {
                if self.erased_bounds(*p1) != self.erased_bounds(*p2) {
                    return false;
                }
            }
            if self.equal_type_lists(m1.parameter_types.as_slice(), m2.parameter_types.as_slice()) {
                return true;
            }
            m1.parameter_types
                .iter()
                .zip(&m2.parameter_types)
                .all(|(p1, p2)| {
                    let p1 = if self.contains_type_variables(*p1, 0)
                        || table.type_data(*p1).is_some_and(|t| t.raw)
                    {
                        table.erasure(*p1)
                    } else {
                        *p1
                    };
                    self.bindings_equal(p1, table.erasure(*p2)) || self.bindings_equal(p1, *p2)
                })
        } else {
            if self.equal_type_lists(m1.parameter_types.as_slice(), m2.parameter_types.as_slice()) {
                return true;
            }
            m1.parameter_types
                .iter()
                .zip(&m2.parameter_types)
                .all(|(p1, p2)| {
                    let p1 = if table.type_data(*p1).is_some_and(|t| t.raw) {
                        table.declaration(*p1)
                    } else {
                        *p1
                    };
                    self.bindings_equal(p1, table.erasure(*p2)) || self.bindings_equal(p1, *p2)
                })
        }
    }

    /// Erased bounds of a type variable; `{Object}` when unbounded.
    fn erased_bounds(&self, type_variable: BindingId) -> FxHashSet<BindingId> {
        let mut bounds = FxHashSet::default();
        if let Some(TypeShape::TypeVariable { bounds: declared }) =
            self.table.type_data(type_variable).map(|t| &t.shape)
        {
            bounds.extend(declared.iter().map(|b| self.table.erasure(*b)));
        }
        if bounds.is_empty()
            && let Some(object) = self.table.java_lang_object()
        {
            bounds.insert(object);
        }
        bounds
    }

    fn contains_type_variables(&self, ty: BindingId, depth: u32) -> bool {
        if depth > javelin_common::limits::MAX_TYPE_ARGUMENT_DEPTH {
            return false;
        }
        let Some(data) = self.table.type_data(ty) else {
            return false;
        };
        match &data.shape {
            TypeShape::TypeVariable { .. } => true,
            TypeShape::Array { element, .. } => self.contains_type_variables(*element, depth + 1),
            TypeShape::Wildcard { bound, .. } => {
                bound.is_some_and(|b| self.contains_type_variables(b, depth + 1))
            }
            TypeShape::Capture { wildcard } => self.contains_type_variables(*wildcard, depth + 1),
            _ => data
                .type_arguments
                .iter()
                .any(|a| self.contains_type_variables(*a, depth + 1)),
        }
    }

    /// Declared method of `ty` that `overriding` is a subsignature of,
    /// other than `overriding` itself. Constructors never match.
    pub fn find_overridden_method_in_type(
        &self,
        ty: BindingId,
        overriding: BindingId,
    ) -> Option<BindingId> {
        let data = self.table.type_data(ty)?;
        data.declared_methods.iter().copied().find(|candidate| {
            !self.bindings_equal(*candidate, overriding)
                && !self
                    .table
                    .method_data(*candidate)
                    .is_some_and(|m| m.is_constructor)
                && self.is_subsignature(overriding, *candidate)
        })
    }

    /// First method overridden by `overriding` in `ty`, its superclass
    /// chain, then its interfaces.
    pub fn find_overridden_method_in_hierarchy(
        &self,
        ty: BindingId,
        overriding: BindingId,
    ) -> AnalysisResult<Option<BindingId>> {
        self.search_hierarchy(ty, &mut |t| self.find_overridden_method_in_type(t, overriding))
    }

    /// The method `overriding` overrides, searching superclasses before
    /// interfaces.
    pub fn find_overridden_method(
        &self,
        overriding: BindingId,
        test_visibility: bool,
    ) -> AnalysisResult<Option<BindingId>> {
        Ok(self
            .find_all_overridden_methods(overriding, test_visibility, true)?
            .first()
            .copied())
    }

    /// Methods overridden by `overriding`: at most one from the superclass
    /// chain, then one per directly implemented interface hierarchy.
    ///
    /// With `test_visibility`, a superclass match that is not visible from
    /// the overriding method's package is discarded.
    #[tracing::instrument(level = "debug", skip(self), fields(method = overriding.0))]
    pub fn find_all_overridden_methods(
        &self,
        overriding: BindingId,
        test_visibility: bool,
        first_only: bool,
    ) -> AnalysisResult<Vec<BindingId>> {
        let mut found = Vec::new();
        let Some(data) = self.table.method_data(overriding) else {
            return Ok(found);
        };
        let modifiers = self.table.modifiers(overriding);
        if modifiers.is_private() || modifiers.is_static() || data.is_constructor {
            return Ok(found);
        }
        let Some(declaring) = self.table.declaring_type(overriding) else {
            return Ok(found);
        };

        if let Some(superclass) = self.superclass_of(declaring)
            && let Some(candidate) = self.find_overridden_method_in_hierarchy(superclass, overriding)?
            && !self.table.modifiers(candidate).is_private()
        {
            let package = self.declaring_package(declaring);
            if !test_visibility || self.is_visible_in_hierarchy(candidate, package) {
                found.push(candidate);
                if first_only {
                    return Ok(found);
                }
            } else {
                debug!(candidate = candidate.0, "overridden method not visible");
            }
        }

        let interfaces: SmallVec<[BindingId; 2]> = self.interfaces_of(declaring);
        for interface in interfaces {
            if let Some(candidate) = self.find_overridden_method_in_hierarchy(interface, overriding)? {
                found.push(candidate);
                if first_only {
                    return Ok(found);
                }
            }
        }
        Ok(found)
    }

    /// True if `overriding` overrides `overridden`: a subsignature declared
    /// in a proper subtype, where neither side is private, static or a
    /// constructor.
    pub fn method_overrides(
        &self,
        overriding: BindingId,
        overridden: BindingId,
    ) -> AnalysisResult<bool> {
        let table = self.table;
        let eligible = |m: BindingId| {
            let modifiers = table.modifiers(m);
            table.method_data(m).is_some_and(|d| !d.is_constructor)
                && !modifiers.is_private()
                && !modifiers.is_static()
        };
        if !eligible(overriding)
            || !eligible(overridden)
            || self.bindings_equal(overriding, overridden)
            || !self.is_subsignature(overriding, overridden)
        {
            return Ok(false);
        }
        let (Some(sub), Some(sup)) = (
            table.declaring_type(overriding),
            table.declaring_type(overridden),
        ) else {
            return Ok(false);
        };
        if self.equal_declarations(sub, sup) {
            return Ok(false);
        }
        self.is_super_type(sup, sub, false)
    }
}

#[cfg(test)]
#[path = "tests/overrides_tests.rs"]
mod tests;

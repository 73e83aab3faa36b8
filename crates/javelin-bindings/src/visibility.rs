//! Accessibility of bindings from a type context.

use crate::binding::BindingData;
use crate::resolver::BindingResolver;
use javelin_common::limits::MAX_ENCLOSING_TYPE_DEPTH;
use javelin_common::{AnalysisResult, BindingId};

impl BindingResolver<'_> {
    /// `ty` followed by its enclosing types, innermost first.
    pub fn enclosing_types(&self, ty: BindingId) -> Vec<BindingId> {
        let mut chain = vec![ty];
        let mut current = ty;
        for _ in 0..MAX_ENCLOSING_TYPE_DEPTH {
            match self.table.declaring_type(current) {
                Some(outer) if !chain.contains(&outer) => {
                    chain.push(outer);
                    current = outer;
                }
                _ => break,
            }
        }
        chain
    }

    /// Visibility of an inherited `member` to code in `package`: public,
    /// protected and interface members always, private never, package
    /// members only from their own package.
    pub fn is_visible_in_hierarchy(&self, member: BindingId, package: Option<BindingId>) -> bool {
        let modifiers = self.table.modifiers(member);
        let declaring = self.table.declaring_type(member);
        if modifiers.is_public()
            || modifiers.is_protected()
            || declaring.is_some_and(|d| self.table.is_interface(d))
        {
            return true;
        }
        if modifiers.is_private() {
            return false;
        }
        declaring.is_some_and(|d| package.is_some() && self.declaring_package(d) == package)
    }

    /// Whether `binding` is accessible from code inside `from_type`.
    ///
    /// - locals, parameters and packages are always accessible
    /// - public members and members of interfaces are accessible
    /// - private members only from the declaring type or a type nested in it
    /// - protected members from the same package, or from a type (or one of
    ///   its enclosing types) whose superclass chain reaches the declaring
    ///   type
    /// - package members from the same package
    #[tracing::instrument(level = "debug", skip(self), fields(binding = binding.0, from = from_type.0))]
    pub fn is_visible(&self, binding: BindingId, from_type: BindingId) -> AnalysisResult<bool> {
        self.cancel.check()?;
        let Some(target) = self.table.get(binding) else {
            return Ok(false);
        };
        let declaring = match (&target.data, target.declaring_type) {
            (BindingData::Package, _) => return Ok(true),
            (BindingData::Variable(v), None) if !v.is_field() => return Ok(true),
            (_, declaring) => declaring,
        };
        let modifiers = target.modifiers;
        if modifiers.is_public() {
            return Ok(true);
        }
        let Some(declaring) = declaring else {
            // Top-level type
            return Ok(self.same_package(binding, from_type));
        };
        if self.table.is_interface(declaring) {
            return Ok(true);
        }

        let enclosing = self.enclosing_types(from_type);
        let nested_in_declaring = enclosing
            .iter()
            .any(|t| self.equal_declarations(*t, declaring));
        if modifiers.is_private() {
            return Ok(nested_in_declaring);
        }
        if nested_in_declaring || self.same_package(declaring, from_type) {
            return Ok(true);
        }
        if modifiers.is_protected() {
            for ty in enclosing {
                if self.is_super_type(declaring, ty, false)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn same_package(&self, a: BindingId, b: BindingId) -> bool {
        let package = self.declaring_package(a);
        package.is_some() && package == self.declaring_package(b)
    }
}

#[cfg(test)]
#[path = "tests/visibility_tests.rs"]
mod tests;

//! Assignment and cast conversion rules.
//!
//! `TypeRules` wraps a [`BindingResolver`] and decides whether a value of one
//! type may be assigned or cast to another:
//!
//! - **Assignment** follows assignment conversion: identity, primitive
//!   widening, boxing then widening reference, unboxing then widening
//!   primitive, `null` to any reference type, and reference subtyping.
//!   Arrays are covariant for reference elements and invariant for
//!   primitive elements; parameterized types are invariant except through
//!   wildcards, and raw types convert both ways (unchecked).
//! - **Cast** follows the legality rules for checked casts between arrays,
//!   primitives, classes and interfaces.
//!
//! Type arguments seen through a supertype are substituted one level deep:
//! `ArrayList<String>` is seen as `List<String>` when `ArrayList<E>`
//! implements `List<E>`, but nested arguments such as `List<List<E>>` are
//! compared unsubstituted.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::primitives::is_widening;
use crate::relation_queries::RelationPolicy;
use javelin_bindings::{BindingResolver, BindingTable, JAVA_IO_SERIALIZABLE, JAVA_LANG_CLONEABLE, TypeShape};
use javelin_common::limits::MAX_TYPE_ARGUMENT_DEPTH;
use javelin_common::{AnalysisError, AnalysisResult, BindingId};

type TypeArguments = SmallVec<[BindingId; 2]>;

/// How a generic supertype appears from a subtype.
#[derive(Clone, Debug, PartialEq, Eq)]
enum SuperInstance {
    /// Reached through a raw type; arguments are erased.
    Raw,
    /// Substituted type arguments; empty for non-generic supertypes.
    Arguments(TypeArguments),
}

pub struct TypeRules<'a> {
    resolver: BindingResolver<'a>,
    policy: RelationPolicy,
}

impl<'a> TypeRules<'a> {
    pub fn new(resolver: BindingResolver<'a>) -> Self {
        Self {
            resolver,
            policy: RelationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RelationPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn resolver(&self) -> &BindingResolver<'a> {
        &self.resolver
    }

    #[inline]
    fn table(&self) -> &'a BindingTable {
        self.resolver.table()
    }

    // =========================================================================
    // Classification
    // =========================================================================

    #[inline]
    pub fn is_java_lang_object(&self, ty: BindingId) -> bool {
        self.resolver.is_java_lang_object(ty)
    }

    /// Types every array converts to: `Object`, `Cloneable` and
    /// `java.io.Serializable`.
    pub fn is_array_compatible(&self, ty: BindingId) -> bool {
        let name = self.table().qualified_name(ty);
        self.is_java_lang_object(ty) || name == JAVA_LANG_CLONEABLE || name == JAVA_IO_SERIALIZABLE
    }

    fn is_reference(&self, ty: BindingId) -> bool {
        self.table()
            .type_data(ty)
            .is_some_and(|t| !t.is_primitive() && !t.is_void())
    }

    // =========================================================================
    // Assignment
    // =========================================================================

    /// Whether a value of `value_type` may be assigned to a variable of
    /// `target_type`.
    #[tracing::instrument(level = "debug", skip(self), fields(value = value_type.0, target = target_type.0))]
    pub fn can_assign(&self, value_type: BindingId, target_type: BindingId) -> AnalysisResult<bool> {
        let table = self.table();
        let (Some(value), Some(target)) = (table.type_data(value_type), table.type_data(target_type))
        else {
            return Ok(false);
        };
        if target.is_void() || value.is_void() {
            return Ok(false);
        }
        if self.resolver.bindings_equal(value_type, target_type) {
            return Ok(true);
        }
        if value.is_null() {
            return Ok(!target.is_primitive());
        }
        match (value.primitive_kind(), target.primitive_kind()) {
            (Some(from), Some(to)) => Ok(is_widening(from, to)),
            (Some(_), None) => {
                if !self.policy.allow_boxing {
                    return Ok(false);
                }
                let Some(boxed) = self.resolver.boxed_type(value_type) else {
                    return Ok(false);
                };
                trace!(boxed = boxed.0, "boxing conversion");
                self.is_subtype(boxed, target_type)
            }
            (None, Some(to)) => {
                if !self.policy.allow_boxing {
                    return Ok(false);
                }
                let unboxed = self
                    .resolver
                    .unboxed_type(value_type)
                    .and_then(|u| table.primitive_kind(u));
                Ok(unboxed.is_some_and(|from| is_widening(from, to)))
            }
            (None, None) => self.is_subtype(value_type, target_type),
        }
    }

    // =========================================================================
    // Subtyping
    // =========================================================================

    /// Reference subtype relation, aware of arrays, type variables,
    /// wildcards and parameterized types.
    pub fn is_subtype(&self, sub: BindingId, sup: BindingId) -> AnalysisResult<bool> {
        self.is_subtype_at(sub, sup, 0)
    }

    fn is_subtype_at(&self, sub: BindingId, sup: BindingId, depth: u32) -> AnalysisResult<bool> {
        self.resolver.cancellation().check()?;
        if depth > MAX_TYPE_ARGUMENT_DEPTH {
            return Err(AnalysisError::malformed("type arguments nested too deeply"));
        }
        let table = self.table();
        if self.resolver.bindings_equal(sub, sup) {
            return Ok(true);
        }
        let (Some(sub_data), Some(sup_data)) = (table.type_data(sub), table.type_data(sup)) else {
            return Ok(false);
        };
        if sub_data.is_primitive() || sup_data.is_primitive() || sub_data.is_void() || sup_data.is_void() {
            return Ok(false);
        }
        if sub_data.is_null() {
            return Ok(true);
        }
        if self.is_java_lang_object(sup) {
            return Ok(true);
        }

        match &sub_data.shape {
            TypeShape::Array { component, .. } => {
                let TypeShape::Array {
                    component: sup_component,
                    ..
                } = sup_data.shape
                else {
                    return Ok(self.is_array_compatible(sup));
                };
                if table.is_primitive(*component) || table.is_primitive(sup_component) {
                    return Ok(self.resolver.bindings_equal(*component, sup_component));
                }
                return self.is_subtype_at(*component, sup_component, depth + 1);
            }
            TypeShape::TypeVariable { bounds } => {
                for bound in bounds {
                    if self.is_subtype_at(*bound, sup, depth + 1)? {
                        return Ok(true);
                    }
                }
                return Ok(false);
            }
            TypeShape::Wildcard { bound, upper } => {
                return match bound {
                    Some(bound) if *upper => self.is_subtype_at(*bound, sup, depth + 1),
                    _ => Ok(false),
                };
            }
            TypeShape::Capture { wildcard } => {
                return self.is_subtype_at(*wildcard, sup, depth + 1);
            }
            _ => {}
        }
        if sup_data.is_array() || !matches!(sup_data.shape, TypeShape::Class(_)) {
            return Ok(false);
        }

        let sup_declaration = table.declaration(sup);
        let mut visited = FxHashSet::default();
        let Some(seen) = self.super_instance(sub, sup_declaration, 0, &mut visited)? else {
            return Ok(false);
        };
        if !sup_data.is_parameterized() {
            return Ok(true);
        }
        let arguments = match seen {
            SuperInstance::Raw => return Ok(self.policy.allow_unchecked_conversion),
            SuperInstance::Arguments(arguments) => arguments,
        };
        if arguments.len() != sup_data.type_arguments.len() {
            return Ok(self.policy.allow_unchecked_conversion && arguments.is_empty());
        }
        for (target_argument, actual) in sup_data.type_arguments.iter().zip(&arguments) {
            if !self.contains_argument(*target_argument, *actual, depth + 1)? {
                debug!(target = target_argument.0, actual = actual.0, "type argument mismatch");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Type-argument containment: `target` contains `actual` when they are
    /// equal, or `target` is a wildcard whose bound admits `actual`.
    fn contains_argument(&self, target: BindingId, actual: BindingId, depth: u32) -> AnalysisResult<bool> {
        let table = self.table();
        let Some(TypeShape::Wildcard { bound, upper }) = table.type_data(target).map(|t| t.shape.clone())
        else {
            return Ok(self.resolver.bindings_equal(target, actual));
        };
        let actual_wildcard = match table.type_data(actual).map(|t| &t.shape) {
            Some(TypeShape::Wildcard { bound, upper }) => Some((*bound, *upper)),
            _ => None,
        };
        let Some(bound) = bound else {
            return Ok(true);
        };
        if upper {
            // ? extends B admits T <: B, and ? extends S with S <: B
            match actual_wildcard {
                None => self.is_subtype_at(actual, bound, depth),
                Some((Some(actual_bound), true)) => self.is_subtype_at(actual_bound, bound, depth),
                Some(_) => Ok(self.is_java_lang_object(bound)),
            }
        } else {
            // ? super B admits T :> B, and ? super S with B <: S
            match actual_wildcard {
                None => self.is_subtype_at(bound, actual, depth),
                Some((Some(actual_bound), false)) => self.is_subtype_at(bound, actual_bound, depth),
                Some(_) => Ok(false),
            }
        }
    }

    /// The instance of `target_declaration` among the supertypes of `ty`
    /// (including `ty` itself), with `ty`'s type arguments substituted for
    /// the generic declaration's type variables.
    fn super_instance(
        &self,
        ty: BindingId,
        target_declaration: BindingId,
        depth: u32,
        visited: &mut FxHashSet<BindingId>,
    ) -> AnalysisResult<Option<SuperInstance>> {
        self.resolver.cancellation().check()?;
        if depth > self.resolver.max_depth() {
            return Err(AnalysisError::malformed("supertype hierarchy too deep"));
        }
        if !visited.insert(ty) {
            return Ok(None);
        }
        let table = self.table();
        let Some(data) = table.type_data(ty) else {
            return Ok(None);
        };
        let declaration = table.declaration(ty);
        if declaration == target_declaration {
            // a bare generic named as a supertype is a raw reference
            if data.raw || (depth > 0 && data.is_generic() && !data.is_parameterized()) {
                return Ok(Some(SuperInstance::Raw));
            }
            let arguments = if data.is_parameterized() {
                data.type_arguments.iter().copied().collect()
            } else {
                data.type_parameters.iter().copied().collect()
            };
            return Ok(Some(SuperInstance::Arguments(arguments)));
        }

        let parameters = table
            .type_data(declaration)
            .map(|d| d.type_parameters.as_slice())
            .unwrap_or(&[]);
        let mut supertypes: SmallVec<[BindingId; 4]> = SmallVec::new();
        supertypes.extend(self.resolver.superclass_of(ty));
        supertypes.extend(self.resolver.interfaces_of(ty));
        for supertype in supertypes {
            let Some(found) = self.super_instance(supertype, target_declaration, depth + 1, visited)? else {
                continue;
            };
            if data.raw {
                return Ok(Some(SuperInstance::Raw));
            }
            let substituted = match found {
                SuperInstance::Raw => SuperInstance::Raw,
                SuperInstance::Arguments(arguments) => SuperInstance::Arguments(
                    arguments
                        .into_iter()
                        .map(|arg| {
                            parameters
                                .iter()
                                .position(|p| *p == arg)
                                .and_then(|i| data.type_arguments.get(i).copied())
                                .unwrap_or(arg)
                        })
                        .collect(),
                ),
            };
            return Ok(Some(substituted));
        }
        Ok(None)
    }

    // =========================================================================
    // Casts
    // =========================================================================

    /// Whether `(target_type) expr` is legal for an `expr` of `source_type`.
    ///
    /// `target_type` must not be void, the null type or an anonymous type.
    #[tracing::instrument(level = "debug", skip(self), fields(target = target_type.0, source = source_type.0))]
    pub fn can_cast(&self, target_type: BindingId, source_type: BindingId) -> AnalysisResult<bool> {
        let table = self.table();
        let Some(target) = table.type_data(target_type) else {
            return Err(AnalysisError::precondition("cast target is not a type"));
        };
        if target.is_void() || target.is_null() || target.is_anonymous() {
            return Err(AnalysisError::precondition(format!(
                "cannot cast to `{}`",
                table.name(target_type).unwrap_or("?")
            )));
        }
        if self.resolver.bindings_equal(target_type, source_type) {
            return Ok(true);
        }
        let Some(source) = table.type_data(source_type) else {
            return Ok(false);
        };
        if source.is_void() {
            return Ok(false);
        }
        if source.is_null() {
            return Ok(!target.is_primitive());
        }

        let (mut cast, mut to_cast) = (target_type, source_type);
        if source.is_array() {
            if !target.is_array() {
                return Ok(self.is_array_compatible(target_type));
            }
            let source_dims = table.dimensions(source_type);
            let target_dims = table.dimensions(target_type);
            let source_element = table.element_type(source_type);
            let target_element = table.element_type(target_type);
            if source_dims == target_dims {
                if table.is_primitive(target_element)
                    && !self.resolver.bindings_equal(target_element, source_element)
                {
                    return Ok(false);
                }
                cast = target_element;
                to_cast = source_element;
            } else if source_dims < target_dims {
                return Ok(self.is_array_compatible(source_element));
            } else {
                return Ok(self.is_array_compatible(target_element));
            }
        }
        self.can_cast_elements(cast, to_cast)
    }

    fn can_cast_elements(&self, cast: BindingId, to_cast: BindingId) -> AnalysisResult<bool> {
        let table = self.table();
        if self.resolver.bindings_equal(cast, to_cast) {
            return Ok(true);
        }
        let cast_kind = table.primitive_kind(cast);
        let source_kind = table.primitive_kind(to_cast);
        if let Some(cast_kind) = cast_kind {
            use javelin_bindings::PrimitiveKind::Boolean;
            return Ok(source_kind.is_some_and(|s| s != Boolean && cast_kind != Boolean));
        }
        if source_kind.is_some() || !self.is_reference(to_cast) {
            return Ok(false);
        }
        if table.is_array(cast) {
            return Ok(self.is_array_compatible(to_cast));
        }
        if table.is_interface(cast) {
            return if table.modifiers(to_cast).is_final() {
                self.resolver.is_super_type(cast, to_cast, false)
            } else {
                Ok(true)
            };
        }
        if table.is_interface(to_cast) {
            return if table.modifiers(cast).is_final() {
                self.resolver.is_super_type(to_cast, cast, false)
            } else {
                Ok(true)
            };
        }
        if self.is_java_lang_object(cast) {
            return Ok(true);
        }
        Ok(self.resolver.is_super_type(to_cast, cast, false)?
            || self.resolver.is_super_type(cast, to_cast, false)?)
    }
}

#[cfg(test)]
#[path = "tests/type_rules_tests.rs"]
mod tests;

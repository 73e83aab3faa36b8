//! Sinks for the bindings a scope walk reports.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::flags::DeclarationFlags;
use javelin_bindings::{BindingData, BindingResolver};
use javelin_common::{AnalysisResult, BindingId};

/// Receives bindings in scope order. Returning `true` stops the walk.
pub(crate) trait BindingRequestor {
    fn accept_binding(&mut self, binding: BindingId) -> AnalysisResult<bool>;
}

/// What two declarations must share for the nearer one to hide the other.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum DeclarationSignature {
    Method {
        name: String,
        parameters: SmallVec<[BindingId; 4]>,
    },
    Variable(String),
    Type(String),
}

impl DeclarationSignature {
    /// Methods are keyed by name and erased parameter types, everything else
    /// by kind and name.
    pub(crate) fn of(resolver: &BindingResolver<'_>, binding: BindingId) -> Option<Self> {
        let table = resolver.table();
        let target = table.get(binding)?;
        let name = target.name.clone();
        match &target.data {
            BindingData::Method(method) => Some(Self::Method {
                name,
                parameters: method
                    .parameter_types
                    .iter()
                    .map(|p| table.erasure(*p))
                    .collect(),
            }),
            BindingData::Variable(_) => Some(Self::Variable(name)),
            BindingData::Type(_) => Some(Self::Type(name)),
            BindingData::Package => None,
        }
    }
}

/// Collects every binding whose signature was not reported before, so
/// nearer declarations shadow farther ones.
pub(crate) struct CollectingRequestor<'r, 'a> {
    resolver: &'r BindingResolver<'a>,
    context: Option<BindingId>,
    flags: DeclarationFlags,
    requested: Vec<BindingId>,
    hidden: FxHashSet<DeclarationSignature>,
}

impl<'r, 'a> CollectingRequestor<'r, 'a> {
    pub(crate) fn new(
        resolver: &'r BindingResolver<'a>,
        context: Option<BindingId>,
        flags: DeclarationFlags,
    ) -> Self {
        Self {
            resolver,
            context,
            flags,
            requested: Vec::new(),
            hidden: FxHashSet::default(),
        }
    }

    /// Collected bindings in report order, filtered by visibility from the
    /// context type when `CHECK_VISIBILITY` is set.
    pub(crate) fn into_result(self) -> AnalysisResult<Vec<BindingId>> {
        let Some(context) = self
            .context
            .filter(|_| self.flags.contains(DeclarationFlags::CHECK_VISIBILITY))
        else {
            return Ok(self.requested);
        };
        let mut visible = Vec::with_capacity(self.requested.len());
        for binding in self.requested {
            if self.resolver.is_visible(binding, context)? {
                visible.push(binding);
            }
        }
        Ok(visible)
    }
}

impl BindingRequestor for CollectingRequestor<'_, '_> {
    fn accept_binding(&mut self, binding: BindingId) -> AnalysisResult<bool> {
        if let Some(signature) = DeclarationSignature::of(self.resolver, binding)
            && self.hidden.insert(signature)
        {
            self.requested.push(binding);
        }
        Ok(false)
    }
}

/// Looks for one declaration and notes whether another declaration with
/// the same signature hides it first.
pub(crate) struct SearchRequestor<'r, 'a> {
    resolver: &'r BindingResolver<'a>,
    to_search: BindingId,
    signature: Option<DeclarationSignature>,
    context: BindingId,
    flags: DeclarationFlags,
    found: bool,
    hidden: bool,
    visible: bool,
}

impl<'r, 'a> SearchRequestor<'r, 'a> {
    pub(crate) fn new(
        resolver: &'r BindingResolver<'a>,
        to_search: BindingId,
        context: BindingId,
        flags: DeclarationFlags,
    ) -> Self {
        Self {
            resolver,
            to_search,
            signature: DeclarationSignature::of(resolver, to_search),
            context,
            flags,
            found: false,
            hidden: false,
            visible: true,
        }
    }

    /// Either the target or a declaration hiding it was reached.
    #[inline]
    pub(crate) fn is_settled(&self) -> bool {
        self.found || self.hidden
    }

    #[inline]
    pub(crate) fn found(&self) -> bool {
        self.found
    }

    #[inline]
    pub(crate) fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[inline]
    pub(crate) fn is_visible(&self) -> bool {
        self.visible
    }
}

impl BindingRequestor for SearchRequestor<'_, '_> {
    fn accept_binding(&mut self, binding: BindingId) -> AnalysisResult<bool> {
        if self.is_settled() {
            return Ok(true);
        }
        let table = self.resolver.table();
        if table.kind(binding) != table.kind(self.to_search) {
            return Ok(false);
        }
        let check_visibility = self.flags.contains(DeclarationFlags::CHECK_VISIBILITY);
        let declaration = table.declaration(binding);
        if binding == self.to_search || declaration == self.to_search {
            self.found = true;
        } else if table.name(declaration) == table.name(self.to_search)
            && self.signature.is_some()
            && DeclarationSignature::of(self.resolver, declaration) == self.signature
        {
            self.hidden = true;
            self.visible = false;
            return Ok(true);
        }
        if self.found && check_visibility {
            self.visible = self.resolver.is_visible(binding, self.context)?;
        }
        Ok(self.found)
    }
}

#[cfg(test)]
#[path = "tests/requestor_tests.rs"]
mod tests;

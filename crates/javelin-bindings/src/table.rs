//! Binding storage.
//!
//! `BindingTable` owns every binding produced for one analysis session and
//! interns them by key: adding a binding whose key is already present returns
//! the existing id. Primitive types and the null type are always present.
//!
//! Mutation lives in `table_builder.rs`; this file holds storage and the
//! read-only accessors.

use rustc_hash::FxHashMap;

use crate::binding::{Binding, BindingData, BindingKind, MethodData, PrimitiveKind, TypeData, TypeShape, VariableData};
use crate::key::BindingKey;
use javelin_common::{AnalysisError, AnalysisResult, BindingId, Modifiers};

pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";
pub const JAVA_LANG_STRING: &str = "java.lang.String";
pub const JAVA_LANG_CLONEABLE: &str = "java.lang.Cloneable";
pub const JAVA_IO_SERIALIZABLE: &str = "java.io.Serializable";

#[derive(Clone, Debug)]
pub struct BindingTable {
    pub(crate) bindings: Vec<Binding>,
    pub(crate) by_key: FxHashMap<BindingKey, BindingId>,
    pub(crate) by_qualified_name: FxHashMap<String, BindingId>,
    pub(crate) primitives: FxHashMap<PrimitiveKind, BindingId>,
    pub(crate) null_type: BindingId,
    /// Next ordinal for local/anonymous types and locals, per owner.
    pub(crate) ordinals: FxHashMap<BindingId, u32>,
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingTable {
    /// Table holding only the primitive types and the null type.
    pub fn new() -> Self {
        let mut table = Self {
            bindings: Vec::with_capacity(64),
            by_key: FxHashMap::default(),
            by_qualified_name: FxHashMap::default(),
            primitives: FxHashMap::default(),
            null_type: BindingId(0),
            ordinals: FxHashMap::default(),
        };
        for kind in PrimitiveKind::ALL {
            let mut data = TypeData::new(TypeShape::Primitive(kind));
            data.qualified_name = kind.keyword().to_string();
            let id = table.intern(Binding {
                key: BindingKey::new(kind.descriptor()),
                name: kind.keyword().to_string(),
                modifiers: Modifiers::empty(),
                declaring_type: None,
                declaration: None,
                synthetic: false,
                data: BindingData::Type(data),
            });
            table.primitives.insert(kind, id);
        }
        let mut null = TypeData::new(TypeShape::Null);
        null.qualified_name = "null".to_string();
        table.null_type = table.intern(Binding {
            key: BindingKey::new("N"),
            name: "null".to_string(),
            modifiers: Modifiers::empty(),
            declaring_type: None,
            declaration: None,
            synthetic: false,
            data: BindingData::Type(null),
        });
        table
    }

    /// Insert `binding` unless its key is already present.
    pub(crate) fn intern(&mut self, binding: Binding) -> BindingId {
        if let Some(&existing) = self.by_key.get(&binding.key) {
            return existing;
        }
        let id = BindingId(self.bindings.len() as u32);
        self.by_key.insert(binding.key.clone(), id);
        if let BindingData::Type(data) = &binding.data
            && matches!(data.shape, TypeShape::Class(_))
            && !data.qualified_name.is_empty()
            && !data.is_parameterized()
            && !data.raw
        {
            self.by_qualified_name.insert(data.qualified_name.clone(), id);
        }
        self.bindings.push(binding);
        id
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[inline]
    pub fn get(&self, id: BindingId) -> Option<&Binding> {
        self.bindings.get(id.index())
    }

    /// Like [`get`](Self::get) but reports a missing id as malformed input.
    pub fn require(&self, id: BindingId) -> AnalysisResult<&Binding> {
        self.get(id)
            .ok_or_else(|| AnalysisError::malformed(format!("unknown binding id {}", id.0)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BindingId, &Binding)> {
        self.bindings
            .iter()
            .enumerate()
            .map(|(i, b)| (BindingId(i as u32), b))
    }

    #[inline]
    pub fn by_key(&self, key: &BindingKey) -> Option<BindingId> {
        self.by_key.get(key).copied()
    }

    /// Class-like type by fully qualified source name.
    #[inline]
    pub fn find_type(&self, qualified_name: &str) -> Option<BindingId> {
        self.by_qualified_name.get(qualified_name).copied()
    }

    #[inline]
    pub fn primitive(&self, kind: PrimitiveKind) -> BindingId {
        self.primitives
            .get(&kind)
            .copied()
            .unwrap_or(self.null_type)
    }

    #[inline]
    pub fn null_type(&self) -> BindingId {
        self.null_type
    }

    #[inline]
    pub fn void_type(&self) -> BindingId {
        self.primitive(PrimitiveKind::Void)
    }

    #[inline]
    pub fn java_lang_object(&self) -> Option<BindingId> {
        self.find_type(JAVA_LANG_OBJECT)
    }

    // =========================================================================
    // Field Accessors
    // =========================================================================

    #[inline]
    pub fn key(&self, id: BindingId) -> Option<&BindingKey> {
        self.get(id).map(|b| &b.key)
    }

    #[inline]
    pub fn name(&self, id: BindingId) -> Option<&str> {
        self.get(id).map(|b| b.name.as_str())
    }

    #[inline]
    pub fn kind(&self, id: BindingId) -> Option<BindingKind> {
        self.get(id).map(Binding::kind)
    }

    #[inline]
    pub fn modifiers(&self, id: BindingId) -> Modifiers {
        self.get(id).map(|b| b.modifiers).unwrap_or_default()
    }

    #[inline]
    pub fn declaring_type(&self, id: BindingId) -> Option<BindingId> {
        self.get(id).and_then(|b| b.declaring_type)
    }

    #[inline]
    pub fn type_data(&self, id: BindingId) -> Option<&TypeData> {
        self.get(id).and_then(Binding::as_type)
    }

    #[inline]
    pub fn method_data(&self, id: BindingId) -> Option<&MethodData> {
        self.get(id).and_then(Binding::as_method)
    }

    #[inline]
    pub fn variable_data(&self, id: BindingId) -> Option<&VariableData> {
        self.get(id).and_then(Binding::as_variable)
    }

    /// Qualified name of a type; empty for local/anonymous types.
    pub fn qualified_name(&self, id: BindingId) -> &str {
        self.type_data(id)
            .map(|t| t.qualified_name.as_str())
            .unwrap_or("")
    }

    /// Canonical declaration: the generic type of a parameterized or raw
    /// instance, otherwise the binding itself.
    #[inline]
    pub fn declaration(&self, id: BindingId) -> BindingId {
        self.get(id).and_then(|b| b.declaration).unwrap_or(id)
    }

    /// Erased type; non-type bindings are returned unchanged.
    #[inline]
    pub fn erasure(&self, id: BindingId) -> BindingId {
        self.type_data(id).and_then(|t| t.erasure).unwrap_or(id)
    }

    /// Declared type of a variable, return type of a method.
    pub fn type_of(&self, id: BindingId) -> Option<BindingId> {
        match &self.get(id)?.data {
            BindingData::Variable(v) => v.ty,
            BindingData::Method(m) => m.return_type,
            BindingData::Type(_) => Some(id),
            BindingData::Package => None,
        }
    }

    /// Parameter types of a method; empty for everything else.
    pub fn parameter_types(&self, id: BindingId) -> &[BindingId] {
        self.method_data(id)
            .map(|m| m.parameter_types.as_slice())
            .unwrap_or(&[])
    }

    // =========================================================================
    // Type Predicates
    // =========================================================================

    #[inline]
    pub fn is_interface(&self, id: BindingId) -> bool {
        self.type_data(id).is_some_and(TypeData::is_interface)
    }

    #[inline]
    pub fn is_array(&self, id: BindingId) -> bool {
        self.type_data(id).is_some_and(TypeData::is_array)
    }

    /// Primitive, excluding `void`.
    #[inline]
    pub fn is_primitive(&self, id: BindingId) -> bool {
        self.type_data(id).is_some_and(TypeData::is_primitive)
    }

    #[inline]
    pub fn is_null_type(&self, id: BindingId) -> bool {
        id == self.null_type
    }

    #[inline]
    pub fn is_anonymous(&self, id: BindingId) -> bool {
        self.type_data(id).is_some_and(TypeData::is_anonymous)
    }

    #[inline]
    pub fn primitive_kind(&self, id: BindingId) -> Option<PrimitiveKind> {
        self.type_data(id).and_then(TypeData::primitive_kind)
    }

    /// Array dimensions; zero for non-array types.
    pub fn dimensions(&self, id: BindingId) -> u32 {
        match self.type_data(id).map(|t| &t.shape) {
            Some(TypeShape::Array { dimensions, .. }) => *dimensions,
            _ => 0,
        }
    }

    /// Innermost element type of an array; the type itself otherwise.
    pub fn element_type(&self, id: BindingId) -> BindingId {
        match self.type_data(id).map(|t| &t.shape) {
            Some(TypeShape::Array { element, .. }) => *element,
            _ => id,
        }
    }

    /// Package binding of a type, member or local.
    pub fn package_of(&self, id: BindingId) -> Option<BindingId> {
        let mut current = id;
        for _ in 0..javelin_common::limits::MAX_ENCLOSING_TYPE_DEPTH {
            let binding = self.get(current)?;
            match &binding.data {
                BindingData::Package => return Some(current),
                BindingData::Type(t) if t.package.is_some() => return t.package,
                BindingData::Type(t) if t.is_array() => {
                    current = self.element_type(current);
                    continue;
                }
                _ => {}
            }
            current = binding.declaring_type.or_else(|| {
                binding
                    .as_variable()
                    .and_then(|v| v.declaring_method)
                    .and_then(|m| self.declaring_type(m))
            })?;
        }
        None
    }
}

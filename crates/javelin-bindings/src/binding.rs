//! Binding records.
//!
//! A binding describes a declared entity independently of any syntax
//! occurrence. Bindings are stored in a [`BindingTable`](crate::BindingTable)
//! and addressed by [`BindingId`]; their [`BindingKey`] is the identity that
//! survives across resolution passes.

use serde::Serialize;
use smallvec::SmallVec;

use crate::key::BindingKey;
use javelin_common::{BindingId, Modifiers};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BindingKind {
    Type,
    Method,
    Variable,
    Package,
}

#[derive(Clone, Debug)]
pub struct Binding {
    pub key: BindingKey,
    /// Simple name. Constructors carry their type's simple name.
    pub name: String,
    pub modifiers: Modifiers,
    /// Declaring type of members; enclosing type of nested types.
    pub declaring_type: Option<BindingId>,
    /// Canonical declaration of a generic instance; `None` when the binding
    /// is its own declaration.
    pub declaration: Option<BindingId>,
    /// Compiler-generated (bridge methods, default constructors, ...).
    pub synthetic: bool,
    pub data: BindingData,
}

impl Binding {
    #[inline]
    pub fn kind(&self) -> BindingKind {
        match self.data {
            BindingData::Type(_) => BindingKind::Type,
            BindingData::Method(_) => BindingKind::Method,
            BindingData::Variable(_) => BindingKind::Variable,
            BindingData::Package => BindingKind::Package,
        }
    }

    #[inline]
    pub fn as_type(&self) -> Option<&TypeData> {
        match &self.data {
            BindingData::Type(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn as_method(&self) -> Option<&MethodData> {
        match &self.data {
            BindingData::Method(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn as_variable(&self) -> Option<&VariableData> {
        match &self.data {
            BindingData::Variable(data) => Some(data),
            _ => None,
        }
    }
}

/// Identity-key equality.
///
/// Valid across tables: two bindings from different resolution passes of
/// the same program compare equal iff they denote the same declaration.
pub fn bindings_equal(a: &Binding, b: &Binding) -> bool {
    a.kind() == b.kind() && a.key == b.key
}

#[derive(Clone, Debug)]
pub enum BindingData {
    Type(TypeData),
    Method(MethodData),
    Variable(VariableData),
    Package,
}

// =============================================================================
// Types
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 9] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Char,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Void,
    ];

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }

    /// Single-letter descriptor used in binding keys.
    pub const fn descriptor(self) -> &'static str {
        match self {
            Self::Boolean => "Z",
            Self::Byte => "B",
            Self::Char => "C",
            Self::Short => "S",
            Self::Int => "I",
            Self::Long => "J",
            Self::Float => "F",
            Self::Double => "D",
            Self::Void => "V",
        }
    }

    /// Qualified name of the boxed counterpart. `void` has none.
    pub const fn boxed_name(self) -> Option<&'static str> {
        match self {
            Self::Boolean => Some("java.lang.Boolean"),
            Self::Byte => Some("java.lang.Byte"),
            Self::Char => Some("java.lang.Character"),
            Self::Short => Some("java.lang.Short"),
            Self::Int => Some("java.lang.Integer"),
            Self::Long => Some("java.lang.Long"),
            Self::Float => Some("java.lang.Float"),
            Self::Double => Some("java.lang.Double"),
            Self::Void => None,
        }
    }

    /// Inverse of [`boxed_name`](Self::boxed_name).
    pub fn from_boxed_name(qualified: &str) -> Option<PrimitiveKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.boxed_name() == Some(qualified))
    }

    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Char | Self::Short | Self::Int | Self::Long
        )
    }

    pub const fn is_numeric(self) -> bool {
        self.is_integral() || matches!(self, Self::Float | Self::Double)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

/// Where a class-like type is declared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Nesting {
    TopLevel,
    Member,
    Local,
    Anonymous,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeShape {
    Primitive(PrimitiveKind),
    /// The type of the `null` literal.
    Null,
    Class(ClassKind),
    Array {
        /// Element type with one dimension removed.
        component: BindingId,
        /// Innermost non-array element type.
        element: BindingId,
        dimensions: u32,
    },
    TypeVariable {
        bounds: SmallVec<[BindingId; 2]>,
    },
    Wildcard {
        bound: Option<BindingId>,
        upper: bool,
    },
    Capture {
        wildcard: BindingId,
    },
}

#[derive(Clone, Debug)]
pub struct TypeData {
    pub shape: TypeShape,
    /// Fully qualified source name; empty for local and anonymous types.
    pub qualified_name: String,
    pub package: Option<BindingId>,
    pub nesting: Nesting,
    pub superclass: Option<BindingId>,
    pub interfaces: SmallVec<[BindingId; 2]>,
    pub declared_fields: Vec<BindingId>,
    pub declared_methods: Vec<BindingId>,
    pub declared_types: Vec<BindingId>,
    pub type_parameters: Vec<BindingId>,
    pub type_arguments: Vec<BindingId>,
    /// Raw reference to a generic type.
    pub raw: bool,
    /// Erased form; `None` when the type is its own erasure.
    pub erasure: Option<BindingId>,
}

impl TypeData {
    pub fn new(shape: TypeShape) -> Self {
        Self {
            shape,
            qualified_name: String::new(),
            package: None,
            nesting: Nesting::TopLevel,
            superclass: None,
            interfaces: SmallVec::new(),
            declared_fields: Vec::new(),
            declared_methods: Vec::new(),
            declared_types: Vec::new(),
            type_parameters: Vec::new(),
            type_arguments: Vec::new(),
            raw: false,
            erasure: None,
        }
    }

    #[inline]
    pub fn class_kind(&self) -> Option<ClassKind> {
        match self.shape {
            TypeShape::Class(kind) => Some(kind),
            _ => None,
        }
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        matches!(
            self.shape,
            TypeShape::Class(ClassKind::Interface | ClassKind::Annotation)
        )
    }

    #[inline]
    pub fn is_class(&self) -> bool {
        matches!(self.shape, TypeShape::Class(ClassKind::Class))
    }

    #[inline]
    pub fn is_enum(&self) -> bool {
        matches!(self.shape, TypeShape::Class(ClassKind::Enum))
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self.shape, TypeShape::Array { .. })
    }

    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(self.shape, TypeShape::Primitive(kind) if kind != PrimitiveKind::Void)
    }

    #[inline]
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.shape {
            TypeShape::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self.shape, TypeShape::Primitive(PrimitiveKind::Void))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self.shape, TypeShape::Null)
    }

    #[inline]
    pub fn is_type_variable(&self) -> bool {
        matches!(self.shape, TypeShape::TypeVariable { .. })
    }

    #[inline]
    pub fn is_wildcard(&self) -> bool {
        matches!(self.shape, TypeShape::Wildcard { .. })
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.nesting == Nesting::Anonymous
    }

    #[inline]
    pub fn is_local(&self) -> bool {
        matches!(self.nesting, Nesting::Local | Nesting::Anonymous)
    }

    #[inline]
    pub fn is_top_level(&self) -> bool {
        self.nesting == Nesting::TopLevel && matches!(self.shape, TypeShape::Class(_))
    }

    /// Declares type parameters (a generic declaration, not an instance).
    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.type_parameters.is_empty()
    }

    #[inline]
    pub fn is_parameterized(&self) -> bool {
        !self.type_arguments.is_empty()
    }
}

// =============================================================================
// Methods and Variables
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct MethodData {
    /// `None` for constructors.
    pub return_type: Option<BindingId>,
    pub parameter_types: SmallVec<[BindingId; 4]>,
    pub exception_types: Vec<BindingId>,
    pub type_parameters: Vec<BindingId>,
    pub is_constructor: bool,
    pub is_varargs: bool,
    pub is_default_constructor: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum VariableKind {
    Field,
    EnumConstant,
    Parameter,
    Local,
}

#[derive(Clone, Debug)]
pub struct VariableData {
    pub ty: Option<BindingId>,
    pub kind: VariableKind,
    /// Method (or lambda) declaring a parameter or local.
    pub declaring_method: Option<BindingId>,
}

impl VariableData {
    #[inline]
    pub fn is_field(&self) -> bool {
        matches!(self.kind, VariableKind::Field | VariableKind::EnumConstant)
    }
}

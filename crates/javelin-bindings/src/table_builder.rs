//! BindingTable construction.
//!
//! Binding providers (a compiler front end, a test fixture) populate a table
//! through these methods. Every method derives the binding key from the
//! declaration structure, so adding the same declaration twice returns the
//! first id and leaves the table unchanged.

use smallvec::SmallVec;
use tracing::trace;

use crate::binding::{
    Binding, BindingData, ClassKind, MethodData, Nesting, PrimitiveKind, TypeData, TypeShape,
    VariableData, VariableKind,
};
use crate::key::BindingKey;
use crate::table::{BindingTable, JAVA_IO_SERIALIZABLE, JAVA_LANG_CLONEABLE};
use javelin_common::{AnalysisError, AnalysisResult, BindingId, Modifiers};

impl BindingTable {
    /// Table seeded with the `java.lang` types the analyses rely on:
    /// `Object`, `String`, `Number`, the boxed primitives, `Cloneable`,
    /// `CharSequence`, `Runnable` and `java.io.Serializable`.
    pub fn with_core_library() -> Self {
        let mut table = Self::new();
        let seeded = table.seed_core_library();
        debug_assert!(seeded.is_ok(), "core library seeding failed: {seeded:?}");
        table
    }

    fn seed_core_library(&mut self) -> AnalysisResult<()> {
        let public = Modifiers::PUBLIC;
        let public_final = Modifiers::PUBLIC | Modifiers::FINAL;

        let object = self.add_class("java.lang", "Object", ClassKind::Class, public);
        let serializable =
            self.add_class("java.io", "Serializable", ClassKind::Interface, public);
        self.add_class("java.lang", "Cloneable", ClassKind::Interface, public);
        let char_sequence =
            self.add_class("java.lang", "CharSequence", ClassKind::Interface, public);
        let string = self.add_class("java.lang", "String", ClassKind::Class, public_final);
        self.add_interface(string, serializable)?;
        self.add_interface(string, char_sequence)?;

        let boolean = self.primitive(PrimitiveKind::Boolean);
        let int = self.primitive(PrimitiveKind::Int);
        let void = self.void_type();
        self.add_method(object, "equals", &[object], boolean, public)?;
        self.add_method(object, "hashCode", &[], int, public)?;
        self.add_method(object, "toString", &[], string, public)?;
        self.add_method(char_sequence, "length", &[], int, public)?;
        self.add_method(string, "length", &[], int, public)?;

        let number = self.add_class(
            "java.lang",
            "Number",
            ClassKind::Class,
            Modifiers::PUBLIC | Modifiers::ABSTRACT,
        );
        self.add_interface(number, serializable)?;
        self.add_method(
            number,
            "intValue",
            &[],
            int,
            Modifiers::PUBLIC | Modifiers::ABSTRACT,
        )?;

        for kind in PrimitiveKind::ALL {
            let Some(qualified) = kind.boxed_name() else {
                continue;
            };
            let simple = qualified.rsplit('.').next().unwrap_or(qualified);
            let boxed = self.add_class("java.lang", simple, ClassKind::Class, public_final);
            if kind.is_numeric() && kind != PrimitiveKind::Char {
                self.set_superclass(boxed, number)?;
            } else {
                self.add_interface(boxed, serializable)?;
            }
        }

        let runnable = self.add_class("java.lang", "Runnable", ClassKind::Interface, public);
        self.add_method(runnable, "run", &[], void, Modifiers::empty())?;
        Ok(())
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Intern `binding`; the flag is false when the key already existed.
    fn intern_new(&mut self, binding: Binding) -> (BindingId, bool) {
        let before = self.bindings.len();
        let id = self.intern(binding);
        (id, id.index() >= before)
    }

    fn type_data_mut(&mut self, id: BindingId) -> AnalysisResult<&mut TypeData> {
        match self.bindings.get_mut(id.index()).map(|b| &mut b.data) {
            Some(BindingData::Type(data)) => Ok(data),
            _ => Err(AnalysisError::precondition(format!(
                "binding {} is not a type",
                id.0
            ))),
        }
    }

    fn method_data_mut(&mut self, id: BindingId) -> AnalysisResult<&mut MethodData> {
        match self.bindings.get_mut(id.index()).map(|b| &mut b.data) {
            Some(BindingData::Method(data)) => Ok(data),
            _ => Err(AnalysisError::precondition(format!(
                "binding {} is not a method",
                id.0
            ))),
        }
    }

    fn require_type(&self, id: BindingId) -> AnalysisResult<&TypeData> {
        self.type_data(id)
            .ok_or_else(|| AnalysisError::precondition(format!("binding {} is not a type", id.0)))
    }

    fn require_key(&self, id: BindingId) -> AnalysisResult<BindingKey> {
        Ok(self.require(id)?.key.clone())
    }

    fn erased_key(&self, id: BindingId) -> AnalysisResult<BindingKey> {
        self.require_key(self.erasure(id))
    }

    fn next_ordinal(&mut self, owner: BindingId) -> u32 {
        let next = self.ordinals.entry(owner).or_insert(0);
        *next += 1;
        *next
    }

    fn class_binding(
        key: BindingKey,
        name: &str,
        kind: ClassKind,
        modifiers: Modifiers,
        declaring_type: Option<BindingId>,
        mut data: TypeData,
    ) -> Binding {
        data.shape = TypeShape::Class(kind);
        Binding {
            key,
            name: name.to_string(),
            modifiers,
            declaring_type,
            declaration: None,
            synthetic: false,
            data: BindingData::Type(data),
        }
    }

    /// Object as default superclass of classes and enums.
    fn default_superclass(&self, kind: ClassKind, qualified: &str) -> Option<BindingId> {
        match kind {
            ClassKind::Class | ClassKind::Enum => self
                .java_lang_object()
                .filter(|_| qualified != crate::table::JAVA_LANG_OBJECT),
            ClassKind::Interface | ClassKind::Annotation => None,
        }
    }

    // =========================================================================
    // Packages and Class-like Types
    // =========================================================================

    pub fn add_package(&mut self, qualified: &str) -> BindingId {
        self.intern(Binding {
            key: BindingKey::package(qualified),
            name: qualified.to_string(),
            modifiers: Modifiers::empty(),
            declaring_type: None,
            declaration: None,
            synthetic: false,
            data: BindingData::Package,
        })
    }

    /// Top-level class, interface, enum or annotation type.
    ///
    /// Classes and enums get `java.lang.Object` as superclass when the table
    /// has one.
    pub fn add_class(
        &mut self,
        package: &str,
        name: &str,
        kind: ClassKind,
        modifiers: Modifiers,
    ) -> BindingId {
        let package_id = self.add_package(package);
        let qualified = if package.is_empty() {
            name.to_string()
        } else {
            format!("{package}.{name}")
        };
        let mut data = TypeData::new(TypeShape::Class(kind));
        data.superclass = self.default_superclass(kind, &qualified);
        data.qualified_name = qualified;
        data.package = Some(package_id);
        data.nesting = Nesting::TopLevel;
        let binding = Self::class_binding(
            BindingKey::top_level_type(package, name),
            name,
            kind,
            modifiers,
            None,
            data,
        );
        let id = self.intern(binding);
        trace!(id = id.0, name, "added top-level type");
        id
    }

    /// Member type declared in `outer`. Nested interfaces and enums are
    /// implicitly static.
    pub fn add_member_type(
        &mut self,
        outer: BindingId,
        name: &str,
        kind: ClassKind,
        mut modifiers: Modifiers,
    ) -> AnalysisResult<BindingId> {
        let outer_data = self.require_type(outer)?;
        let qualified = format!("{}.{name}", outer_data.qualified_name);
        let package = outer_data.package;
        if kind != ClassKind::Class || outer_data.is_interface() {
            modifiers |= Modifiers::STATIC;
        }
        if outer_data.is_interface() {
            modifiers |= Modifiers::PUBLIC;
        }
        let key = BindingKey::nested_type(&self.require_key(outer)?, name);
        let mut data = TypeData::new(TypeShape::Class(kind));
        data.superclass = self.default_superclass(kind, &qualified);
        data.qualified_name = qualified;
        data.package = package;
        data.nesting = Nesting::Member;
        let binding = Self::class_binding(key, name, kind, modifiers, Some(outer), data);
        let (id, fresh) = self.intern_new(binding);
        if fresh {
            self.type_data_mut(outer)?.declared_types.push(id);
        }
        Ok(id)
    }

    /// Type declared in a method body of `outer`.
    pub fn add_local_type(
        &mut self,
        outer: BindingId,
        name: &str,
        kind: ClassKind,
        modifiers: Modifiers,
    ) -> AnalysisResult<BindingId> {
        let package = self.require_type(outer)?.package;
        let ordinal = self.next_ordinal(outer);
        let key = BindingKey::nested_type(&self.require_key(outer)?, &format!("{ordinal}{name}"));
        let mut data = TypeData::new(TypeShape::Class(kind));
        data.superclass = self.default_superclass(kind, "");
        data.package = package;
        data.nesting = Nesting::Local;
        Ok(self.intern(Self::class_binding(
            key,
            name,
            kind,
            modifiers,
            Some(outer),
            data,
        )))
    }

    /// Anonymous class created inside `outer`, extending or implementing
    /// `supertype`.
    pub fn add_anonymous_type(
        &mut self,
        outer: BindingId,
        supertype: BindingId,
    ) -> AnalysisResult<BindingId> {
        let package = self.require_type(outer)?.package;
        let super_is_interface = self.require_type(supertype)?.is_interface();
        let ordinal = self.next_ordinal(outer);
        let key = BindingKey::nested_type(&self.require_key(outer)?, &ordinal.to_string());
        let mut data = TypeData::new(TypeShape::Class(ClassKind::Class));
        if super_is_interface {
            data.superclass = self.java_lang_object();
            data.interfaces.push(supertype);
        } else {
            data.superclass = Some(supertype);
        }
        data.package = package;
        data.nesting = Nesting::Anonymous;
        Ok(self.intern(Self::class_binding(
            key,
            "",
            ClassKind::Class,
            Modifiers::empty(),
            Some(outer),
            data,
        )))
    }

    pub fn set_superclass(&mut self, ty: BindingId, superclass: BindingId) -> AnalysisResult<()> {
        self.require_type(superclass)?;
        self.type_data_mut(ty)?.superclass = Some(superclass);
        Ok(())
    }

    pub fn clear_superclass(&mut self, ty: BindingId) -> AnalysisResult<()> {
        self.type_data_mut(ty)?.superclass = None;
        Ok(())
    }

    pub fn add_interface(&mut self, ty: BindingId, interface: BindingId) -> AnalysisResult<()> {
        self.require_type(interface)?;
        let data = self.type_data_mut(ty)?;
        if !data.interfaces.contains(&interface) {
            data.interfaces.push(interface);
        }
        Ok(())
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Field of `ty`. Interface fields are implicitly `public static final`.
    pub fn add_field(
        &mut self,
        ty: BindingId,
        name: &str,
        field_type: BindingId,
        mut modifiers: Modifiers,
    ) -> AnalysisResult<BindingId> {
        if self.require_type(ty)?.is_interface() {
            modifiers |= Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL;
        }
        self.add_variable_member(ty, name, field_type, modifiers, VariableKind::Field)
    }

    pub fn add_enum_constant(&mut self, ty: BindingId, name: &str) -> AnalysisResult<BindingId> {
        let modifiers = Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL;
        self.add_variable_member(ty, name, ty, modifiers, VariableKind::EnumConstant)
    }

    fn add_variable_member(
        &mut self,
        ty: BindingId,
        name: &str,
        field_type: BindingId,
        modifiers: Modifiers,
        kind: VariableKind,
    ) -> AnalysisResult<BindingId> {
        self.require(field_type)?;
        let key = BindingKey::field(&self.require_key(ty)?, name);
        let (id, fresh) = self.intern_new(Binding {
            key,
            name: name.to_string(),
            modifiers,
            declaring_type: Some(ty),
            declaration: None,
            synthetic: false,
            data: BindingData::Variable(VariableData {
                ty: Some(field_type),
                kind,
                declaring_method: None,
            }),
        });
        if fresh {
            self.type_data_mut(ty)?.declared_fields.push(id);
        }
        Ok(id)
    }

    /// Method of `ty`. Interface methods without a body modifier
    /// (`default`, `static`, `private`) are implicitly `public abstract`.
    pub fn add_method(
        &mut self,
        ty: BindingId,
        name: &str,
        parameters: &[BindingId],
        return_type: BindingId,
        mut modifiers: Modifiers,
    ) -> AnalysisResult<BindingId> {
        if self.require_type(ty)?.is_interface() {
            if !modifiers.is_private() {
                modifiers |= Modifiers::PUBLIC;
            }
            if !modifiers
                .intersects(Modifiers::DEFAULT | Modifiers::STATIC | Modifiers::PRIVATE)
            {
                modifiers |= Modifiers::ABSTRACT;
            }
        }
        let ret_key = self.erased_key(return_type)?;
        self.add_method_like(ty, name, name, parameters, Some((return_type, ret_key)), modifiers)
    }

    pub fn add_constructor(
        &mut self,
        ty: BindingId,
        parameters: &[BindingId],
        modifiers: Modifiers,
    ) -> AnalysisResult<BindingId> {
        let name = self.require(ty)?.name.clone();
        self.add_method_like(ty, &name, "<init>", parameters, None, modifiers)
    }

    fn add_method_like(
        &mut self,
        ty: BindingId,
        name: &str,
        key_name: &str,
        parameters: &[BindingId],
        return_type: Option<(BindingId, BindingKey)>,
        modifiers: Modifiers,
    ) -> AnalysisResult<BindingId> {
        let declaring_key = self.require_key(ty)?;
        let param_keys = parameters
            .iter()
            .map(|p| self.erased_key(*p))
            .collect::<AnalysisResult<Vec<_>>>()?;
        let param_refs: Vec<&BindingKey> = param_keys.iter().collect();
        let key = BindingKey::method(
            &declaring_key,
            key_name,
            &param_refs,
            return_type.as_ref().map(|(_, k)| k),
        );
        let (id, fresh) = self.intern_new(Binding {
            key,
            name: name.to_string(),
            modifiers,
            declaring_type: Some(ty),
            declaration: None,
            synthetic: false,
            data: BindingData::Method(MethodData {
                return_type: return_type.map(|(id, _)| id),
                parameter_types: SmallVec::from_slice(parameters),
                is_constructor: key_name == "<init>",
                ..MethodData::default()
            }),
        });
        if fresh {
            self.type_data_mut(ty)?.declared_methods.push(id);
        }
        Ok(id)
    }

    /// Replace the parameter types of `method`, typically to refer to the
    /// method's own type variables. The new types must have the same
    /// erasures as the ones the method was keyed with.
    pub fn set_parameter_types(
        &mut self,
        method: BindingId,
        parameters: &[BindingId],
    ) -> AnalysisResult<()> {
        let current = self.parameter_types(method);
        let same_erasure = current.len() == parameters.len()
            && current
                .iter()
                .zip(parameters)
                .all(|(old, new)| self.erasure(*old) == self.erasure(*new));
        if !same_erasure {
            return Err(AnalysisError::precondition(
                "parameter types must keep the method's erased signature",
            ));
        }
        self.method_data_mut(method)?.parameter_types = SmallVec::from_slice(parameters);
        Ok(())
    }

    pub fn set_varargs(&mut self, method: BindingId, varargs: bool) -> AnalysisResult<()> {
        self.method_data_mut(method)?.is_varargs = varargs;
        Ok(())
    }

    pub fn set_default_constructor(&mut self, method: BindingId) -> AnalysisResult<()> {
        let data = self.method_data_mut(method)?;
        if !data.is_constructor {
            return Err(AnalysisError::precondition("not a constructor"));
        }
        data.is_default_constructor = true;
        Ok(())
    }

    pub fn add_exception(&mut self, method: BindingId, exception: BindingId) -> AnalysisResult<()> {
        self.require_type(exception)?;
        self.method_data_mut(method)?.exception_types.push(exception);
        Ok(())
    }

    pub fn set_synthetic(&mut self, id: BindingId) -> AnalysisResult<()> {
        self.bindings
            .get_mut(id.index())
            .ok_or_else(|| AnalysisError::precondition(format!("unknown binding id {}", id.0)))?
            .synthetic = true;
        Ok(())
    }

    pub fn set_modifiers(&mut self, id: BindingId, modifiers: Modifiers) -> AnalysisResult<()> {
        self.bindings
            .get_mut(id.index())
            .ok_or_else(|| AnalysisError::precondition(format!("unknown binding id {}", id.0)))?
            .modifiers = modifiers;
        Ok(())
    }

    // =========================================================================
    // Parameters and Locals
    // =========================================================================

    pub fn add_parameter(
        &mut self,
        method: BindingId,
        name: &str,
        ty: BindingId,
    ) -> AnalysisResult<BindingId> {
        self.add_method_variable(method, name, ty, VariableKind::Parameter)
    }

    pub fn add_local_variable(
        &mut self,
        method: BindingId,
        name: &str,
        ty: BindingId,
    ) -> AnalysisResult<BindingId> {
        self.add_method_variable(method, name, ty, VariableKind::Local)
    }

    fn add_method_variable(
        &mut self,
        method: BindingId,
        name: &str,
        ty: BindingId,
        kind: VariableKind,
    ) -> AnalysisResult<BindingId> {
        if self.method_data(method).is_none() {
            return Err(AnalysisError::precondition(format!(
                "binding {} is not a method",
                method.0
            )));
        }
        self.require(ty)?;
        let ordinal = self.next_ordinal(method);
        let key = BindingKey::local(&self.require_key(method)?, name, ordinal);
        Ok(self.intern(Binding {
            key,
            name: name.to_string(),
            modifiers: Modifiers::empty(),
            declaring_type: None,
            declaration: None,
            synthetic: false,
            data: BindingData::Variable(VariableData {
                ty: Some(ty),
                kind,
                declaring_method: Some(method),
            }),
        }))
    }

    // =========================================================================
    // Derived Types
    // =========================================================================

    /// Type variable declared by a generic type or method. The erasure is the
    /// erasure of the first bound, or `Object`.
    pub fn add_type_variable(
        &mut self,
        owner: BindingId,
        name: &str,
        bounds: &[BindingId],
    ) -> AnalysisResult<BindingId> {
        let owner_binding = self.require(owner)?;
        let declaring_type = match owner_binding.data {
            BindingData::Type(_) => Some(owner),
            BindingData::Method(_) => owner_binding.declaring_type,
            _ => {
                return Err(AnalysisError::precondition(
                    "type variables belong to types or methods",
                ));
            }
        };
        let key = BindingKey::type_variable(&owner_binding.key, name);
        let erasure = match bounds.first() {
            Some(first) => Some(self.erasure(*first)),
            None => self.java_lang_object(),
        };
        let mut data = TypeData::new(TypeShape::TypeVariable {
            bounds: SmallVec::from_slice(bounds),
        });
        data.qualified_name = name.to_string();
        data.erasure = erasure;
        let (id, fresh) = self.intern_new(Binding {
            key,
            name: name.to_string(),
            modifiers: Modifiers::empty(),
            declaring_type,
            declaration: None,
            synthetic: false,
            data: BindingData::Type(data),
        });
        if fresh {
            match self.bindings.get_mut(owner.index()).map(|b| &mut b.data) {
                Some(BindingData::Type(t)) => t.type_parameters.push(id),
                Some(BindingData::Method(m)) => m.type_parameters.push(id),
                _ => {}
            }
        }
        Ok(id)
    }

    /// Array of `element` with `dimensions` dimensions. Arrays of arrays are
    /// flattened, so `array_type(int[], 1)` is `int[][]`.
    pub fn array_type(&mut self, element: BindingId, dimensions: u32) -> AnalysisResult<BindingId> {
        if dimensions == 0 {
            return Err(AnalysisError::precondition("array dimensions must be positive"));
        }
        let element_data = self.require_type(element)?;
        if element_data.is_void() || element_data.is_null() {
            return Err(AnalysisError::precondition("no arrays of void or null"));
        }
        let (element, dimensions) = match element_data.shape {
            TypeShape::Array {
                element: inner,
                dimensions: inner_dims,
                ..
            } => (inner, inner_dims + dimensions),
            _ => (element, dimensions),
        };
        let key = BindingKey::array(&self.require_key(element)?, dimensions);
        if let Some(existing) = self.by_key(&key) {
            return Ok(existing);
        }

        let component = if dimensions == 1 {
            element
        } else {
            self.array_type(element, dimensions - 1)?
        };
        let erased_element = self.erasure(element);
        let erasure = if erased_element != element {
            Some(self.array_type(erased_element, dimensions)?)
        } else {
            None
        };

        let brackets = "[]".repeat(dimensions as usize);
        let element_binding = self.require(element)?;
        let name = format!("{}{brackets}", element_binding.name);
        let qualified = format!("{}{brackets}", self.qualified_name(element));

        let mut data = TypeData::new(TypeShape::Array {
            component,
            element,
            dimensions,
        });
        data.qualified_name = qualified;
        data.superclass = self.java_lang_object();
        data.interfaces = [JAVA_LANG_CLONEABLE, JAVA_IO_SERIALIZABLE]
            .into_iter()
            .filter_map(|q| self.find_type(q))
            .collect();
        data.erasure = erasure;
        Ok(self.intern(Binding {
            key,
            name,
            modifiers: Modifiers::PUBLIC | Modifiers::FINAL,
            declaring_type: None,
            declaration: None,
            synthetic: false,
            data: BindingData::Type(data),
        }))
    }

    /// Instance of a generic type with the given type arguments.
    ///
    /// The instance shares the generic declaration's member bindings; the
    /// provider substitutes member signatures when it needs them.
    pub fn parameterized_type(
        &mut self,
        generic: BindingId,
        arguments: &[BindingId],
    ) -> AnalysisResult<BindingId> {
        let generic_data = self.require_type(generic)?;
        if generic_data.type_parameters.len() != arguments.len() {
            return Err(AnalysisError::precondition(format!(
                "expected {} type arguments, found {}",
                generic_data.type_parameters.len(),
                arguments.len()
            )));
        }
        let argument_keys = arguments
            .iter()
            .map(|a| self.require_key(*a))
            .collect::<AnalysisResult<Vec<_>>>()?;
        let key_refs: Vec<&BindingKey> = argument_keys.iter().collect();
        let key = BindingKey::parameterized(&self.require_key(generic)?, &key_refs);

        let mut data = generic_data.clone();
        let rendered: Vec<&str> = arguments.iter().map(|a| self.qualified_name(*a)).collect();
        data.qualified_name = format!("{}<{}>", generic_data.qualified_name, rendered.join(","));
        data.type_parameters.clear();
        data.type_arguments = arguments.to_vec();
        data.erasure = Some(generic);
        self.instance_of(generic, key, data)
    }

    /// Raw reference to a generic type.
    pub fn raw_type(&mut self, generic: BindingId) -> AnalysisResult<BindingId> {
        let generic_data = self.require_type(generic)?;
        if !generic_data.is_generic() {
            return Err(AnalysisError::precondition("raw type of a non-generic type"));
        }
        let key = BindingKey::parameterized(&self.require_key(generic)?, &[]);
        let mut data = generic_data.clone();
        data.type_parameters.clear();
        data.raw = true;
        data.erasure = Some(generic);
        self.instance_of(generic, key, data)
    }

    fn instance_of(
        &mut self,
        generic: BindingId,
        key: BindingKey,
        data: TypeData,
    ) -> AnalysisResult<BindingId> {
        let generic_binding = self.require(generic)?;
        let binding = Binding {
            key,
            name: generic_binding.name.clone(),
            modifiers: generic_binding.modifiers,
            declaring_type: generic_binding.declaring_type,
            declaration: Some(generic),
            synthetic: false,
            data: BindingData::Type(data),
        };
        Ok(self.intern(binding))
    }

    /// `?`, `? extends bound` (`upper`) or `? super bound`.
    pub fn wildcard_type(
        &mut self,
        bound: Option<BindingId>,
        upper: bool,
    ) -> AnalysisResult<BindingId> {
        let key = match bound {
            Some(b) => BindingKey::wildcard(Some((&self.require_key(b)?, upper))),
            None => BindingKey::wildcard(None),
        };
        let (qualified, erasure) = match bound {
            None => ("?".to_string(), self.java_lang_object()),
            Some(b) if upper => (
                format!("? extends {}", self.qualified_name(b)),
                Some(self.erasure(b)),
            ),
            Some(b) => (
                format!("? super {}", self.qualified_name(b)),
                self.java_lang_object(),
            ),
        };
        let mut data = TypeData::new(TypeShape::Wildcard { bound, upper });
        data.qualified_name = qualified.clone();
        data.erasure = erasure;
        Ok(self.intern(Binding {
            key,
            name: qualified,
            modifiers: Modifiers::empty(),
            declaring_type: None,
            declaration: None,
            synthetic: false,
            data: BindingData::Type(data),
        }))
    }

    /// Capture of a wildcard.
    pub fn capture_type(&mut self, wildcard: BindingId) -> AnalysisResult<BindingId> {
        let wildcard_data = self.require_type(wildcard)?;
        if !wildcard_data.is_wildcard() {
            return Err(AnalysisError::precondition("capture of a non-wildcard"));
        }
        let erasure = wildcard_data.erasure;
        let name = format!("capture-of {}", wildcard_data.qualified_name);
        let key = BindingKey::new(format!("!{}", self.require_key(wildcard)?));
        let mut data = TypeData::new(TypeShape::Capture { wildcard });
        data.qualified_name = name.clone();
        data.erasure = erasure;
        Ok(self.intern(Binding {
            key,
            name,
            modifiers: Modifiers::empty(),
            declaring_type: None,
            declaration: None,
            synthetic: false,
            data: BindingData::Type(data),
        }))
    }
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;

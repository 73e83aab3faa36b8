use crate::binding::{ClassKind, PrimitiveKind};
use crate::resolver::BindingResolver;
use crate::table::BindingTable;
use javelin_common::Modifiers;

#[test]
fn test_subsignature_requires_name_and_arity() {
    let mut table = BindingTable::with_core_library();
    let int = table.primitive(PrimitiveKind::Int);
    let long = table.primitive(PrimitiveKind::Long);
    let void = table.void_type();
    let a = table.add_class("p", "A", ClassKind::Class, Modifiers::PUBLIC);
    let m_int = table.add_method(a, "m", &[int], void, Modifiers::PUBLIC).unwrap();
    let m_long = table.add_method(a, "m", &[long], void, Modifiers::PUBLIC).unwrap();
    let n_int = table.add_method(a, "n", &[int], void, Modifiers::PUBLIC).unwrap();
    let m_none = table.add_method(a, "m", &[], void, Modifiers::PUBLIC).unwrap();

    let resolver = BindingResolver::new(&table);
    assert!(resolver.is_subsignature(m_int, m_int));
    assert!(!resolver.is_subsignature(m_int, m_long));
    assert!(!resolver.is_subsignature(m_int, n_int));
    assert!(!resolver.is_subsignature(m_int, m_none));
}

#[test]
fn test_non_generic_method_overrides_generic_under_erasure() {
    let mut table = BindingTable::with_core_library();
    let object = table.java_lang_object().unwrap();
    let void = table.void_type();
    let base = table.add_class("p", "Base", ClassKind::Class, Modifiers::PUBLIC);
    let derived = table.add_class("p", "Derived", ClassKind::Class, Modifiers::PUBLIC);
    table.set_superclass(derived, base).unwrap();

    // <T> void putAll(T value) in Base
    let generic_put = table
        .add_method(base, "putAll", &[object], void, Modifiers::PUBLIC)
        .unwrap();
    let t = table.add_type_variable(generic_put, "T", &[]).unwrap();
    table.set_parameter_types(generic_put, &[t]).unwrap();
    // void putAll(Object value) in Derived
    let plain_put = table
        .add_method(derived, "putAll", &[object], void, Modifiers::PUBLIC)
        .unwrap();

    let resolver = BindingResolver::new(&table);
    assert!(resolver.is_subsignature(plain_put, generic_put));
    assert!(!resolver.is_subsignature(generic_put, plain_put));
    assert_eq!(
        resolver.find_overridden_method(plain_put, false).unwrap(),
        Some(generic_put)
    );
}

#[test]
fn test_private_static_and_constructors_override_nothing() {
    let mut table = BindingTable::with_core_library();
    let void = table.void_type();
    let base = table.add_class("p", "Base", ClassKind::Class, Modifiers::PUBLIC);
    let derived = table.add_class("p", "Derived", ClassKind::Class, Modifiers::PUBLIC);
    table.set_superclass(derived, base).unwrap();
    table.add_method(base, "run", &[], void, Modifiers::PUBLIC).unwrap();
    table.add_method(base, "helper", &[], void, Modifiers::PUBLIC).unwrap();
    table.add_constructor(base, &[], Modifiers::PUBLIC).unwrap();
    let private_run = table
        .add_method(derived, "run", &[], void, Modifiers::PRIVATE)
        .unwrap();
    let static_helper = table
        .add_method(derived, "helper", &[], void, Modifiers::PUBLIC | Modifiers::STATIC)
        .unwrap();
    let ctor = table.add_constructor(derived, &[], Modifiers::PUBLIC).unwrap();

    let resolver = BindingResolver::new(&table);
    for method in [private_run, static_helper, ctor] {
        assert!(resolver
            .find_all_overridden_methods(method, false, false)
            .unwrap()
            .is_empty());
    }
}

#[test]
fn test_private_superclass_method_is_not_overridden() {
    let mut table = BindingTable::with_core_library();
    let void = table.void_type();
    let base = table.add_class("p", "Base", ClassKind::Class, Modifiers::PUBLIC);
    let derived = table.add_class("p", "Derived", ClassKind::Class, Modifiers::PUBLIC);
    table.set_superclass(derived, base).unwrap();
    table.add_method(base, "run", &[], void, Modifiers::PRIVATE).unwrap();
    let run = table.add_method(derived, "run", &[], void, Modifiers::PUBLIC).unwrap();

    let resolver = BindingResolver::new(&table);
    assert_eq!(resolver.find_overridden_method(run, false).unwrap(), None);
}

#[test]
fn test_package_private_override_depends_on_visibility_test() {
    let mut table = BindingTable::with_core_library();
    let void = table.void_type();
    let base = table.add_class("a", "Base", ClassKind::Class, Modifiers::PUBLIC);
    let derived = table.add_class("b", "Derived", ClassKind::Class, Modifiers::PUBLIC);
    table.set_superclass(derived, base).unwrap();
    let base_run = table.add_method(base, "run", &[], void, Modifiers::empty()).unwrap();
    let run = table.add_method(derived, "run", &[], void, Modifiers::PUBLIC).unwrap();

    let resolver = BindingResolver::new(&table);
    assert_eq!(resolver.find_overridden_method(run, false).unwrap(), Some(base_run));
    assert_eq!(resolver.find_overridden_method(run, true).unwrap(), None);
}

#[test]
fn test_find_all_overridden_collects_superclass_and_interfaces() {
    let mut table = BindingTable::with_core_library();
    let void = table.void_type();
    let closeable = table.add_class("p", "Closeable", ClassKind::Interface, Modifiers::PUBLIC);
    let base = table.add_class("p", "Base", ClassKind::Class, Modifiers::PUBLIC);
    let derived = table.add_class("p", "Derived", ClassKind::Class, Modifiers::PUBLIC);
    table.set_superclass(derived, base).unwrap();
    table.add_interface(derived, closeable).unwrap();
    let base_close = table.add_method(base, "close", &[], void, Modifiers::PUBLIC).unwrap();
    let iface_close = table
        .add_method(closeable, "close", &[], void, Modifiers::empty())
        .unwrap();
    let close = table.add_method(derived, "close", &[], void, Modifiers::PUBLIC).unwrap();

    let resolver = BindingResolver::new(&table);
    assert_eq!(
        resolver.find_all_overridden_methods(close, true, false).unwrap(),
        vec![base_close, iface_close]
    );
    assert_eq!(
        resolver.find_all_overridden_methods(close, true, true).unwrap(),
        vec![base_close]
    );
}

#[test]
fn test_method_overrides() {
    let mut table = BindingTable::with_core_library();
    let void = table.void_type();
    let base = table.add_class("p", "Base", ClassKind::Class, Modifiers::PUBLIC);
    let derived = table.add_class("p", "Derived", ClassKind::Class, Modifiers::PUBLIC);
    let unrelated = table.add_class("p", "Other", ClassKind::Class, Modifiers::PUBLIC);
    table.set_superclass(derived, base).unwrap();
    let base_run = table.add_method(base, "run", &[], void, Modifiers::PUBLIC).unwrap();
    let run = table.add_method(derived, "run", &[], void, Modifiers::PUBLIC).unwrap();
    let other_run = table.add_method(unrelated, "run", &[], void, Modifiers::PUBLIC).unwrap();

    let resolver = BindingResolver::new(&table);
    assert!(resolver.method_overrides(run, base_run).unwrap());
    assert!(!resolver.method_overrides(base_run, run).unwrap());
    assert!(!resolver.method_overrides(run, run).unwrap());
    assert!(!resolver.method_overrides(other_run, base_run).unwrap());
}

//! Cross-module scenarios for the binding resolver.

use javelin_bindings::{BindingResolver, BindingTable, ClassKind, PrimitiveKind};
use javelin_common::Modifiers;

#[test]
fn shape_circle_area_lookup_and_override() {
    let mut table = BindingTable::with_core_library();
    let double = table.primitive(PrimitiveKind::Double);
    let shape = table.add_class("geo", "Shape", ClassKind::Class, Modifiers::PUBLIC);
    let circle = table.add_class("geo", "Circle", ClassKind::Class, Modifiers::PUBLIC);
    table.set_superclass(circle, shape).unwrap();
    let shape_area = table
        .add_method(shape, "area", &[], double, Modifiers::PUBLIC)
        .unwrap();
    let circle_area = table
        .add_method(circle, "area", &[], double, Modifiers::PUBLIC)
        .unwrap();

    let resolver = BindingResolver::new(&table);
    assert_eq!(
        resolver
            .find_method_in_hierarchy(circle, "area", Some(&[]))
            .unwrap(),
        Some(circle_area)
    );
    assert_eq!(
        resolver.find_overridden_method(circle_area, false).unwrap(),
        Some(shape_area)
    );
    assert_eq!(resolver.find_overridden_method(shape_area, false).unwrap(), None);
}

#[test]
fn overridden_search_prefers_superclass_over_interface() {
    let mut table = BindingTable::with_core_library();
    let void = table.void_type();
    let i = table.add_class("p", "I", ClassKind::Interface, Modifiers::PUBLIC);
    let a = table.add_class("p", "A", ClassKind::Class, Modifiers::PUBLIC);
    let b = table.add_class("p", "B", ClassKind::Class, Modifiers::PUBLIC);
    table.add_interface(a, i).unwrap();
    table.set_superclass(b, a).unwrap();
    let i_m = table.add_method(i, "m", &[], void, Modifiers::empty()).unwrap();
    let a_m = table.add_method(a, "m", &[], void, Modifiers::PUBLIC).unwrap();
    let b_m = table.add_method(b, "m", &[], void, Modifiers::PUBLIC).unwrap();

    let resolver = BindingResolver::new(&table);
    assert_eq!(
        resolver.find_overridden_method_in_hierarchy(b, b_m).unwrap(),
        Some(a_m)
    );
    assert_eq!(resolver.find_overridden_method(a_m, true).unwrap(), Some(i_m));
}

#[test]
fn private_members_are_invisible_outside_their_type() {
    let mut table = BindingTable::with_core_library();
    let int = table.primitive(PrimitiveKind::Int);
    let holder = table.add_class("p", "Holder", ClassKind::Class, Modifiers::PUBLIC);
    let secret = table
        .add_field(holder, "secret", int, Modifiers::PRIVATE)
        .unwrap();
    let shared = table
        .add_field(holder, "shared", int, Modifiers::PUBLIC)
        .unwrap();
    let mut others = Vec::new();
    for (package, name) in [("p", "Peer"), ("q", "Far"), ("p", "Child")] {
        others.push(table.add_class(package, name, ClassKind::Class, Modifiers::PUBLIC));
    }
    table.set_superclass(others[2], holder).unwrap();

    let resolver = BindingResolver::new(&table);
    for other in others {
        assert!(!resolver.is_visible(secret, other).unwrap());
        assert!(resolver.is_visible(shared, other).unwrap());
    }
    assert!(resolver.is_visible(secret, holder).unwrap());
}

//! Conversion scenarios across the resolver and the rule engine.

use javelin_bindings::{BindingResolver, BindingTable, ClassKind, PrimitiveKind};
use javelin_common::Modifiers;
use javelin_solver::{RelationKind, RelationPolicy, TypeRules, query_relation};

#[test]
fn class_interface_casts_are_symmetric() {
    let mut table = BindingTable::with_core_library();
    let c = table.add_class("p", "C", ClassKind::Class, Modifiers::PUBLIC);
    let sealed = table.add_class("p", "Sealed", ClassKind::Class, Modifiers::PUBLIC | Modifiers::FINAL);
    let i = table.add_class("p", "I", ClassKind::Interface, Modifiers::PUBLIC);
    let implementor =
        table.add_class("p", "Impl", ClassKind::Class, Modifiers::PUBLIC | Modifiers::FINAL);
    table.add_interface(implementor, i).unwrap();

    let rules = TypeRules::new(BindingResolver::new(&table));
    assert!(rules.can_cast(c, i).unwrap());
    assert!(rules.can_cast(i, c).unwrap());
    assert!(!rules.can_cast(sealed, i).unwrap());
    assert!(!rules.can_cast(i, sealed).unwrap());
    assert!(rules.can_cast(implementor, i).unwrap());
    assert!(rules.can_cast(i, implementor).unwrap());
}

#[test]
fn boxing_is_a_bijection_for_assignment() {
    let table = BindingTable::with_core_library();
    let resolver = BindingResolver::new(&table);
    let rules = TypeRules::new(resolver.clone());
    for kind in PrimitiveKind::ALL {
        if kind == PrimitiveKind::Void {
            continue;
        }
        let primitive = table.primitive(kind);
        let boxed = resolver.boxed_type(primitive).unwrap();
        assert_eq!(resolver.unboxed_type(boxed), Some(primitive));
        assert!(rules.can_assign(primitive, boxed).unwrap(), "{kind:?}");
        assert!(rules.can_assign(boxed, primitive).unwrap(), "{kind:?}");
    }
}

#[test]
fn assignability_implies_castability_for_references() {
    let mut table = BindingTable::with_core_library();
    let shape = table.add_class("geo", "Shape", ClassKind::Class, Modifiers::PUBLIC);
    let circle = table.add_class("geo", "Circle", ClassKind::Class, Modifiers::PUBLIC);
    table.set_superclass(circle, shape).unwrap();
    let shapes = table.array_type(shape, 1).unwrap();
    let circles = table.array_type(circle, 1).unwrap();
    let object = table.java_lang_object().unwrap();
    let runnable = table.find_type("java.lang.Runnable").unwrap();

    let resolver = BindingResolver::new(&table);
    let types = [shape, circle, shapes, circles, object, runnable];
    for source in types {
        for target in types {
            let assignable = query_relation(
                &resolver,
                source,
                target,
                RelationKind::Assignable,
                RelationPolicy::default(),
            )
            .unwrap();
            if assignable.is_related() {
                let castable = query_relation(
                    &resolver,
                    source,
                    target,
                    RelationKind::Castable,
                    RelationPolicy::default(),
                )
                .unwrap();
                assert!(castable.is_related(), "{source:?} -> {target:?}");
            }
        }
    }
}

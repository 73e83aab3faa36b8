use super::*;
use crate::relation_queries::RelationPolicy;
use javelin_bindings::{BindingResolver, BindingTable, ClassKind, PrimitiveKind};
use javelin_common::{AnalysisError, BindingId, Modifiers};

struct Fixture {
    table: BindingTable,
    object: BindingId,
    string: BindingId,
    number: BindingId,
    integer: BindingId,
    list: BindingId,
    array_list: BindingId,
}

impl Fixture {
    fn find(&self, name: &str) -> BindingId {
        self.table.find_type(name).unwrap()
    }

    fn prim(&self, kind: PrimitiveKind) -> BindingId {
        self.table.primitive(kind)
    }
}

/// Core library plus `util.List<E>` and `util.ArrayList<E> implements List<E>`.
fn fixture() -> Fixture {
    let mut table = BindingTable::with_core_library();
    let object = table.java_lang_object().unwrap();
    let string = table.find_type("java.lang.String").unwrap();
    let number = table.find_type("java.lang.Number").unwrap();
    let integer = table.find_type("java.lang.Integer").unwrap();
    let list = table.add_class("util", "List", ClassKind::Interface, Modifiers::PUBLIC);
    table.add_type_variable(list, "E", &[]).unwrap();
    let array_list = table.add_class("util", "ArrayList", ClassKind::Class, Modifiers::PUBLIC);
    let e = table.add_type_variable(array_list, "E", &[]).unwrap();
    let list_of_e = table.parameterized_type(list, &[e]).unwrap();
    table.add_interface(array_list, list_of_e).unwrap();
    Fixture {
        table,
        object,
        string,
        number,
        integer,
        list,
        array_list,
    }
}

fn rules(table: &BindingTable) -> TypeRules<'_> {
    TypeRules::new(BindingResolver::new(table))
}

#[test]
fn test_identity_and_void() {
    let f = fixture();
    let rules = rules(&f.table);
    let void = f.table.void_type();
    assert!(rules.can_assign(f.string, f.string).unwrap());
    assert!(!rules.can_assign(void, void).unwrap());
    assert!(!rules.can_assign(f.string, void).unwrap());
}

#[test]
fn test_primitive_widening_assignment() {
    use PrimitiveKind::*;
    let f = fixture();
    let rules = rules(&f.table);
    assert!(rules.can_assign(f.prim(Int), f.prim(Long)).unwrap());
    assert!(rules.can_assign(f.prim(Char), f.prim(Int)).unwrap());
    assert!(!rules.can_assign(f.prim(Long), f.prim(Int)).unwrap());
    assert!(!rules.can_assign(f.prim(Boolean), f.prim(Int)).unwrap());
}

#[test]
fn test_boxing_and_unboxing() {
    use PrimitiveKind::*;
    let f = fixture();
    let rules = rules(&f.table);
    let long_box = f.find("java.lang.Long");
    assert!(rules.can_assign(f.prim(Int), f.integer).unwrap());
    assert!(rules.can_assign(f.prim(Int), f.number).unwrap());
    assert!(rules.can_assign(f.prim(Int), f.object).unwrap());
    assert!(!rules.can_assign(f.prim(Int), long_box).unwrap());
    assert!(rules.can_assign(f.integer, f.prim(Int)).unwrap());
    assert!(rules.can_assign(f.integer, f.prim(Long)).unwrap());
    assert!(!rules.can_assign(f.integer, f.prim(Short)).unwrap());
    assert!(!rules.can_assign(f.string, f.prim(Int)).unwrap());

    let strict = TypeRules::new(BindingResolver::new(&f.table))
        .with_policy(RelationPolicy::default().with_boxing(false));
    assert!(!strict.can_assign(f.prim(Int), f.integer).unwrap());
    assert!(!strict.can_assign(f.integer, f.prim(Int)).unwrap());
}

#[test]
fn test_null_assignment() {
    let f = fixture();
    let rules = rules(&f.table);
    let null = f.table.null_type();
    assert!(rules.can_assign(null, f.string).unwrap());
    assert!(rules.can_assign(null, f.list).unwrap());
    assert!(!rules.can_assign(null, f.prim(PrimitiveKind::Int)).unwrap());
}

#[test]
fn test_reference_subtyping() {
    let f = fixture();
    let rules = rules(&f.table);
    let char_sequence = f.find("java.lang.CharSequence");
    assert!(rules.can_assign(f.string, char_sequence).unwrap());
    assert!(rules.can_assign(f.string, f.object).unwrap());
    assert!(!rules.can_assign(char_sequence, f.string).unwrap());
    assert!(!rules.can_assign(f.string, f.number).unwrap());
}

#[test]
fn test_array_assignment() {
    let mut f = fixture();
    let int = f.prim(PrimitiveKind::Int);
    let long = f.prim(PrimitiveKind::Long);
    let strings = f.table.array_type(f.string, 1).unwrap();
    let objects = f.table.array_type(f.object, 1).unwrap();
    let string_matrix = f.table.array_type(f.string, 2).unwrap();
    let ints = f.table.array_type(int, 1).unwrap();
    let longs = f.table.array_type(long, 1).unwrap();
    let cloneable = f.find("java.lang.Cloneable");
    let serializable = f.find("java.io.Serializable");

    let rules = rules(&f.table);
    assert!(rules.can_assign(strings, objects).unwrap());
    assert!(rules.can_assign(string_matrix, objects).unwrap());
    assert!(!rules.can_assign(objects, strings).unwrap());
    assert!(!rules.can_assign(ints, longs).unwrap());
    assert!(!rules.can_assign(ints, objects).unwrap());
    for target in [f.object, cloneable, serializable] {
        assert!(rules.can_assign(ints, target).unwrap());
    }
    assert!(!rules.can_assign(ints, f.string).unwrap());
}

#[test]
fn test_parameterized_types_are_invariant() {
    let mut f = fixture();
    let list_of_string = f.table.parameterized_type(f.list, &[f.string]).unwrap();
    let list_of_object = f.table.parameterized_type(f.list, &[f.object]).unwrap();
    let array_list_of_string = f
        .table
        .parameterized_type(f.array_list, &[f.string])
        .unwrap();

    let rules = rules(&f.table);
    assert!(rules.can_assign(array_list_of_string, list_of_string).unwrap());
    assert!(!rules.can_assign(array_list_of_string, list_of_object).unwrap());
    assert!(!rules.can_assign(list_of_string, list_of_object).unwrap());
    assert!(rules.can_assign(list_of_string, f.object).unwrap());
}

#[test]
fn test_wildcard_containment() {
    let mut f = fixture();
    let extends_number = f.table.wildcard_type(Some(f.number), true).unwrap();
    let super_integer = f.table.wildcard_type(Some(f.integer), false).unwrap();
    let unbounded = f.table.wildcard_type(None, true).unwrap();
    let list_extends_number = f.table.parameterized_type(f.list, &[extends_number]).unwrap();
    let list_super_integer = f.table.parameterized_type(f.list, &[super_integer]).unwrap();
    let list_any = f.table.parameterized_type(f.list, &[unbounded]).unwrap();
    let list_of_number = f.table.parameterized_type(f.list, &[f.number]).unwrap();
    let list_of_string = f.table.parameterized_type(f.list, &[f.string]).unwrap();
    let array_list_of_integer = f
        .table
        .parameterized_type(f.array_list, &[f.integer])
        .unwrap();

    let rules = rules(&f.table);
    assert!(rules.can_assign(array_list_of_integer, list_extends_number).unwrap());
    assert!(!rules.can_assign(list_of_string, list_extends_number).unwrap());
    assert!(rules.can_assign(list_of_number, list_super_integer).unwrap());
    assert!(!rules.can_assign(list_of_string, list_super_integer).unwrap());
    assert!(rules.can_assign(list_of_string, list_any).unwrap());
    assert!(rules.can_assign(list_extends_number, list_any).unwrap());
    assert!(!rules.can_assign(list_any, list_of_string).unwrap());
}

#[test]
fn test_raw_types_convert_unchecked() {
    let mut f = fixture();
    let raw_list = f.table.raw_type(f.list).unwrap();
    let list_of_string = f.table.parameterized_type(f.list, &[f.string]).unwrap();

    let rules = rules(&f.table);
    assert!(rules.can_assign(list_of_string, raw_list).unwrap());
    assert!(rules.can_assign(raw_list, list_of_string).unwrap());

    let checked = TypeRules::new(BindingResolver::new(&f.table))
        .with_policy(RelationPolicy::default().with_unchecked_conversion(false));
    assert!(checked.can_assign(list_of_string, raw_list).unwrap());
    assert!(!checked.can_assign(raw_list, list_of_string).unwrap());
}

#[test]
fn test_type_variable_bounds() {
    let mut f = fixture();
    let holder = f.table.add_class("p", "Holder", ClassKind::Class, Modifiers::PUBLIC);
    let t = f.table.add_type_variable(holder, "T", &[f.number]).unwrap();

    let rules = rules(&f.table);
    assert!(rules.can_assign(t, f.number).unwrap());
    assert!(rules.can_assign(t, f.object).unwrap());
    assert!(!rules.can_assign(t, f.integer).unwrap());
    assert!(!rules.can_assign(f.integer, t).unwrap());
}

#[test]
fn test_cast_primitives() {
    use PrimitiveKind::*;
    let f = fixture();
    let rules = rules(&f.table);
    assert!(rules.can_cast(f.prim(Byte), f.prim(Double)).unwrap());
    assert!(rules.can_cast(f.prim(Char), f.prim(Int)).unwrap());
    assert!(rules.can_cast(f.prim(Boolean), f.prim(Boolean)).unwrap());
    assert!(!rules.can_cast(f.prim(Boolean), f.prim(Int)).unwrap());
    assert!(!rules.can_cast(f.prim(Int), f.prim(Boolean)).unwrap());
    assert!(!rules.can_cast(f.prim(Int), f.string).unwrap());
}

#[test]
fn test_cast_references() {
    let f = fixture();
    let rules = rules(&f.table);
    let char_sequence = f.find("java.lang.CharSequence");
    let runnable = f.find("java.lang.Runnable");
    assert!(rules.can_cast(f.string, f.object).unwrap());
    assert!(rules.can_cast(f.object, f.string).unwrap());
    assert!(rules.can_cast(f.string, char_sequence).unwrap());
    assert!(!rules.can_cast(f.string, f.number).unwrap());
    assert!(!rules.can_cast(f.integer, f.string).unwrap());
    // String is final and does not implement Runnable
    assert!(!rules.can_cast(runnable, f.string).unwrap());
    assert!(!rules.can_cast(f.string, runnable).unwrap());
    assert!(rules.can_cast(runnable, f.number).unwrap());
    assert!(rules.can_cast(f.number, runnable).unwrap());
}

#[test]
fn test_cast_arrays() {
    let mut f = fixture();
    let int = f.prim(PrimitiveKind::Int);
    let long = f.prim(PrimitiveKind::Long);
    let strings = f.table.array_type(f.string, 1).unwrap();
    let objects = f.table.array_type(f.object, 1).unwrap();
    let object_matrix = f.table.array_type(f.object, 2).unwrap();
    let ints = f.table.array_type(int, 1).unwrap();
    let longs = f.table.array_type(long, 1).unwrap();
    let cloneable = f.find("java.lang.Cloneable");

    let rules = rules(&f.table);
    assert!(rules.can_cast(strings, objects).unwrap());
    assert!(rules.can_cast(objects, strings).unwrap());
    assert!(!rules.can_cast(longs, ints).unwrap());
    assert!(rules.can_cast(cloneable, ints).unwrap());
    assert!(!rules.can_cast(f.string, ints).unwrap());
    assert!(rules.can_cast(ints, f.object).unwrap());
    assert!(!rules.can_cast(ints, f.string).unwrap());
    // Object[][] -> Object[] keeps Object[] as the element
    assert!(rules.can_cast(objects, object_matrix).unwrap());
    assert!(!rules.can_cast(strings, object_matrix).unwrap());
    assert!(rules.can_cast(object_matrix, objects).unwrap());
}

#[test]
fn test_cast_null_source() {
    let f = fixture();
    let rules = rules(&f.table);
    let null = f.table.null_type();
    assert!(rules.can_cast(f.string, null).unwrap());
    assert!(!rules.can_cast(f.prim(PrimitiveKind::Int), null).unwrap());
}

#[test]
fn test_cast_rejects_invalid_targets() {
    let mut f = fixture();
    let outer = f.table.add_class("p", "Outer", ClassKind::Class, Modifiers::PUBLIC);
    let runnable = f.find("java.lang.Runnable");
    let anonymous = f.table.add_anonymous_type(outer, runnable).unwrap();
    let void = f.table.void_type();
    let null = f.table.null_type();

    let rules = rules(&f.table);
    for target in [void, null, anonymous] {
        let err = rules.can_cast(target, f.object).unwrap_err();
        assert!(matches!(err, AnalysisError::Precondition { .. }), "{err:?}");
    }
}

#[test]
fn test_cancelled_subtype_check() {
    let mut f = fixture();
    let list_of_string = f.table.parameterized_type(f.list, &[f.string]).unwrap();
    let array_list_of_string = f
        .table
        .parameterized_type(f.array_list, &[f.string])
        .unwrap();
    let token = javelin_common::CancellationToken::new();
    token.cancel();
    let rules = TypeRules::new(BindingResolver::new(&f.table).with_cancellation(token));
    let err = rules.is_subtype(array_list_of_string, list_of_string).unwrap_err();
    assert!(err.is_cancelled());
}

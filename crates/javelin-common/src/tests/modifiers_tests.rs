use super::*;

#[test]
fn test_keywords_follow_canonical_order() {
    let mods = Modifiers::FINAL | Modifiers::PUBLIC | Modifiers::STATIC;
    assert_eq!(
        mods.keywords(),
        vec![
            ModifierKeyword::Public,
            ModifierKeyword::Static,
            ModifierKeyword::Final
        ]
    );
}

#[test]
fn test_package_visibility() {
    assert!(Modifiers::STATIC.is_package_visible());
    assert!(!Modifiers::PROTECTED.is_package_visible());
    assert!(Modifiers::empty().is_package_visible());
}

#[test]
fn test_keyword_flags_round_trip_through_visibility_mask() {
    for keyword in ModifierKeyword::CANONICAL_ORDER {
        assert_eq!(
            keyword.is_visibility(),
            Modifiers::VISIBILITY.contains(keyword.flag())
        );
    }
}

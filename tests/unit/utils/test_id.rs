use rate_curves::utils::id::get_id;
use std::collections::HashSet;

#[test]
fn test_build_id_shape() {
    let id = get_id().unwrap();
    assert_eq!(id.len(), 30);
    assert!(id.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()), "{id}");
}

#[test]
fn test_build_ids_are_unique() {
    let ids: HashSet<String> = (0..100).filter_map(|_| get_id()).collect();
    assert_eq!(ids.len(), 100);
}

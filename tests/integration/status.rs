use crate::*;

#[test]
fn test_status() {
    let node = node_with_types(5);
    node.store.create(vec![0u8; 10]);
    node.store.create(vec![0u8; 6]);

    let status = node.client().status().unwrap();
    assert_eq!(status.node_id, 5);
    assert_eq!(status.chunks, 2);
    assert_eq!(status.bytes, 16);
    assert_eq!(status.types, vec!["Edge".to_string()]);
}

#[test]
fn test_types() {
    let node = node_with_types(1);
    let types = node.client().types().unwrap();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].name, "Edge");
    assert_eq!(types[0].fields.len(), 3);
}

use crate::*;

use peek_core::config::{ClientConfig, NodeEndpoint, PeekConfig};
use peek_core::{ChunkId, LocalId};
use peek_services::inspect::{self, Arg, Outcome, Window};
use peek_services::{BufferSink, ChunkStore, InspectError};

fn run(store: &HttpStore, tokens: &[&str]) -> (Result<Outcome, InspectError>, BufferSink) {
    let mut sink = BufferSink::default();
    let args = Arg::classify_all(tokens.iter().copied());
    let result = inspect::execute(store, &mut sink, &args);
    (result, sink)
}

/// Raw read over HTTP: header line plus the rendered window.
#[test]
fn test_get_chunk_as_shorts() {
    let node = node_with_types(1);
    let id = node.store.create(vec![0x12u8, 0x34, 0xAB, 0xCD, 0xEF]);
    let client = node.client();

    let (result, sink) = run(&client, &[&id.to_string(), "short", "true"]);
    let Ok(Outcome::Raw(out)) = result else {
        panic!("expected raw output, got {result:?}");
    };
    assert_eq!(out.size, 5);
    assert_eq!(out.window, Window { offset: 0, length: 5 });
    assert_eq!(
        sink.lines,
        vec![
            format!("Chunk data of {id} (chunksize 5):"),
            "1234 abcd".to_string(),
        ]
    );
}

/// A split node/local id reaches the same chunk as the combined id.
#[test]
fn test_get_chunk_by_split_id() {
    let node = node_with_types(9);
    let id = node.store.put(LocalId::new(0x20), &b"split"[..]);
    let client = node.client();

    let (_, sink) = run(&client, &["9", "0x20", "1", "3"]);
    assert_eq!(sink.lines[0], format!("Chunk data of {id} (chunksize 5):"));
    assert_eq!(sink.lines[1], "pli");
}

/// Decimal rendering with an offset-first argument order.
#[test]
fn test_get_chunk_decimal_window() {
    let node = node_with_types(1);
    let id = node.store.create(vec![0u8, 0xFF, 0x80, 0x7F]);
    let client = node.client();

    let (_, sink) = run(&client, &[&id.to_string(), "1", "3", "byte", "false"]);
    assert_eq!(sink.lines[1], "-1 -128 127");
}

/// A chunk that is not on the node fails with a single error line.
#[test]
fn test_get_missing_chunk() {
    let node = node_with_types(1);
    let client = node.client();
    let missing = ChunkId::compose(NodeId::new(1), LocalId::new(404));

    let (result, sink) = run(&client, &[&missing.to_string()]);
    assert_eq!(result, Err(InspectError::ChunkFetchFailed(missing)));
    assert!(sink.lines.is_empty());
    assert_eq!(sink.errors, vec![format!("getting chunk {missing} failed")]);
}

/// Structured read through the node's type registry.
#[test]
fn test_get_typed_object() {
    let node = node_with_types(1);
    let mut payload = 3i64.to_be_bytes().to_vec();
    payload.extend_from_slice(&4i64.to_be_bytes());
    payload.extend_from_slice(&(-2i16).to_be_bytes());
    let id = node.store.create(payload);
    let client = node.client();

    let (result, sink) = run(&client, &[&id.to_string(), "Edge"]);
    let Ok(Outcome::Structured { object, .. }) = result else {
        panic!("expected structured output, got {result:?}");
    };
    assert_eq!(
        object.value,
        serde_json::json!({ "from": 3, "to": 4, "weight": -2 })
    );
    assert_eq!(sink.lines[0], "DataStructure Edge (size 18):");
}

/// Type names travel as one path segment, whatever characters they hold.
#[test]
fn test_get_typed_object_with_reserved_characters_in_name() {
    let name = "graph/Edge v2?#%";
    let types = TypeRegistry::from_layouts([TypeLayout {
        name: name.to_string(),
        fields: vec![FieldLayout {
            name: "v".to_string(),
            kind: ElementType::Short,
        }],
    }]);
    let node = spawn_node(MemoryStore::with_types(NodeId::new(1), types)).unwrap();
    let id = node.store.create(vec![0u8, 5]);

    let local = node.store.fetch_typed_object(id, name).unwrap();
    let remote = node.client().fetch_typed_object(id, name).unwrap();
    assert!(local.is_some());
    assert_eq!(remote, local);

    let (_, sink) = run(&node.client(), &[&id.to_string(), name]);
    assert_eq!(sink.lines[0], format!("DataStructure {name} (size 2):"));
}

/// A type the node does not know is a typed-object failure, not a crash.
#[test]
fn test_get_unknown_type() {
    let node = node_with_types(1);
    let id = node.store.create(vec![0u8; 4]);
    let client = node.client();

    let (result, _) = run(&client, &[&id.to_string(), "Vertex"]);
    assert_eq!(
        result,
        Err(InspectError::TypedObjectFailed {
            id,
            type_name: "Vertex".to_string(),
        })
    );
}

/// Chunks created through the client land on the node.
#[test]
fn test_create_through_client() {
    let node = node_with_types(2);
    let client = node.client();

    let id = client.create(b"remote", None).unwrap();
    assert_eq!(id.node(), NodeId::new(2));
    assert_eq!(node.store.get(id).as_deref(), Some(&b"remote"[..]));

    let explicit = client.create(b"x", Some(LocalId::new(77))).unwrap();
    assert_eq!(explicit.local(), LocalId::new(77));
}

/// Chunk ids are routed to the node named in their top 16 bits.
#[test]
fn test_routing_across_nodes() {
    let node_a = node_with_types(1);
    let node_b = node_with_types(2);
    let id_b = node_b.store.create(&b"on b"[..]);

    let config = PeekConfig {
        client: ClientConfig {
            default_url: node_a.url.clone(),
            timeout_secs: 5,
        },
        cluster: peek_core::config::ClusterConfig {
            nodes: vec![NodeEndpoint {
                node_id: NodeId::new(2),
                url: node_b.url.clone(),
            }],
        },
        ..PeekConfig::default()
    };
    let client = HttpStore::from_config(&config).unwrap();

    let outcome = client.fetch_chunks(&[id_b]).unwrap();
    assert_eq!(outcome.success_count, 1);
    assert_eq!(&outcome.chunks[0].data[..], b"on b");
}

//! peek integration test harness.
//!
//! Each test starts its own node API on an ephemeral loopback port and
//! drives it through `HttpStore`, the same client `peek-ctl` uses.
//!
//!   cargo test --test integration

mod chunks;
mod status;

use std::net::TcpListener;

use anyhow::{Context, Result};

use libpeek::HttpStore;
use peek_api::ApiState;
use peek_core::config::{FieldLayout, TypeLayout};
use peek_core::{ElementType, NodeId};
use peek_services::{MemoryStore, TypeRegistry};

// ── Harness ───────────────────────────────────────────────────────────────────

/// A running node. The server thread lives until the test process exits.
pub struct Node {
    pub url: String,
    pub store: MemoryStore,
}

impl Node {
    pub fn client(&self) -> HttpStore {
        HttpStore::new(&self.url).expect("client should build")
    }
}

/// Serve `store` on 127.0.0.1 with an OS-assigned port.
pub fn spawn_node(store: MemoryStore) -> Result<Node> {
    let listener = TcpListener::bind("127.0.0.1:0").context("failed to bind loopback")?;
    listener.set_nonblocking(true)?;
    let port = listener.local_addr()?.port();

    let state = ApiState::new(store.clone());
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime should build");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener)
                .expect("listener should convert");
            if let Err(e) = peek_api::serve_on(listener, state).await {
                eprintln!("node API failed: {e}");
            }
        });
    });

    Ok(Node {
        url: format!("http://127.0.0.1:{port}"),
        store,
    })
}

/// Layouts shared by the tests.
pub fn test_types() -> TypeRegistry {
    let field = |name: &str, kind| FieldLayout {
        name: name.to_string(),
        kind,
    };
    TypeRegistry::from_layouts([TypeLayout {
        name: "Edge".to_string(),
        fields: vec![
            field("from", ElementType::Long),
            field("to", ElementType::Long),
            field("weight", ElementType::Short),
        ],
    }])
}

pub fn node_with_types(node_id: u16) -> Node {
    let store = MemoryStore::with_types(NodeId::new(node_id), test_types());
    spawn_node(store).expect("node should start")
}

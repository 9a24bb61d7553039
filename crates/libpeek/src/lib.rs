//! libpeek — client access to peek storage nodes over their HTTP API.
//!
//! [`HttpStore`] implements [`ChunkStore`] by routing each chunk id to the
//! node that hosts it, so the inspector runs unchanged against a remote
//! cluster.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use bytes::Bytes;
use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use peek_core::config::{ClientConfig, PeekConfig, TypeLayout};
use peek_core::wire::{
    ChunkResponse, CreateChunkRequest, StatusResponse, TypedObjectResponse, TypesResponse,
};
use peek_core::{ChunkId, LocalId, NodeId};
use peek_services::{Chunk, ChunkStore, FetchOutcome, TypedObject};

pub struct HttpStore {
    client: Client,
    default_url: String,
    nodes: HashMap<NodeId, String>,
}

impl HttpStore {
    /// A store that sends every request to `url` (e.g. `http://127.0.0.1:9101`),
    /// with the default `[client]` settings otherwise.
    pub fn new(url: &str) -> Result<Self> {
        let config = PeekConfig {
            client: ClientConfig {
                default_url: url.to_string(),
                ..ClientConfig::default()
            },
            ..PeekConfig::default()
        };
        Self::from_config(&config)
    }

    /// Use the `[client]` and `[cluster]` sections of `config`.
    pub fn from_config(config: &PeekConfig) -> Result<Self> {
        let nodes = config
            .cluster
            .nodes
            .iter()
            .map(|n| (n.node_id, n.url.clone()))
            .collect();
        let timeout = Duration::from_secs(config.client.timeout_secs);
        Self::build(&config.client.default_url, timeout, nodes)
    }

    fn build(url: &str, timeout: Duration, nodes: HashMap<NodeId, String>) -> Result<Self> {
        let mut builder = Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build HTTP client")?;
        Ok(Self {
            client,
            default_url: url.trim_end_matches('/').to_string(),
            nodes,
        })
    }

    /// API base for the node hosting `node`.
    fn base_for(&self, node: NodeId) -> String {
        let url = self
            .nodes
            .get(&node)
            .map(|u| u.trim_end_matches('/'))
            .unwrap_or(self.default_url.as_str());
        format!("{}/api", url)
    }

    /// `segments` appended to the node's API base, each percent-encoded.
    fn node_url(&self, node: NodeId, segments: &[&str]) -> Result<Url> {
        let base = self.base_for(node);
        let mut url = Url::parse(&base).with_context(|| format!("invalid node url {}", base))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("node url {} cannot take a path", base))?
            .extend(segments);
        Ok(url)
    }

    fn default_base(&self) -> String {
        format!("{}/api", self.default_url)
    }

    fn get(&self, url: &str) -> Result<Response> {
        self.client
            .get(url)
            .send()
            .with_context(|| format!("failed to connect to peekd at {} — is it running?", url))
    }

    /// Create a chunk on the default node.
    pub fn create(&self, data: &[u8], local: Option<LocalId>) -> Result<ChunkId> {
        let url = format!("{}/chunks", self.default_base());
        let body = CreateChunkRequest {
            data: hex::encode(data),
            local_id: local.map(LocalId::get),
        };
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .with_context(|| format!("failed to connect to peekd at {} — is it running?", url))?;
        let created: ChunkResponse = parse(resp)?;
        created
            .chunk_id
            .parse()
            .with_context(|| format!("node returned invalid chunk id {:?}", created.chunk_id))
    }

    pub fn status(&self) -> Result<StatusResponse> {
        parse(self.get(&format!("{}/status", self.default_base()))?)
    }

    pub fn types(&self) -> Result<Vec<TypeLayout>> {
        let resp: TypesResponse = parse(self.get(&format!("{}/types", self.default_base()))?)?;
        Ok(resp.types)
    }

    /// `Ok(None)` when the node reports 404.
    fn fetch_one(&self, id: ChunkId) -> Result<Option<Chunk>> {
        let url = self.node_url(id.node(), &["chunks", &id.to_string()])?;
        let resp = self.get(url.as_str())?;
        if resp.status() == StatusCode::NOT_FOUND {
            tracing::debug!(chunk_id = %id, "chunk not on node");
            return Ok(None);
        }
        let body: ChunkResponse = parse(resp)?;
        let data = hex::decode(&body.data).context("node returned invalid hex")?;
        Ok(Some(Chunk::new(id, Bytes::from(data))))
    }
}

/// Turn a non-success status into an error carrying the response body.
fn parse<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().unwrap_or_default();
        anyhow::bail!("request failed ({}): {}", status, text);
    }
    resp.json::<T>().context("failed to parse response")
}

impl ChunkStore for HttpStore {
    fn combine_identifier(&self, node: NodeId, local: LocalId) -> ChunkId {
        ChunkId::compose(node, local)
    }

    fn fetch_chunks(&self, ids: &[ChunkId]) -> Result<FetchOutcome> {
        let mut chunks = Vec::with_capacity(ids.len());
        for &id in ids {
            if let Some(chunk) = self.fetch_one(id)? {
                chunks.push(chunk);
            }
        }
        Ok(FetchOutcome::from_chunks(chunks))
    }

    fn fetch_typed_object(&self, id: ChunkId, type_name: &str) -> Result<Option<TypedObject>> {
        let url = self.node_url(id.node(), &["chunks", &id.to_string(), "typed", type_name])?;
        let resp = self.get(url.as_str())?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body: TypedObjectResponse = parse(resp)?;
        Ok(Some(TypedObject {
            type_name: body.type_name,
            size: body.size,
            value: body.value,
        }))
    }
}

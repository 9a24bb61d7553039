//! The inspection command: parse → resolve → fetch → clamp → decode.

use peek_core::ChunkId;

use super::args::Arg;
use super::decode;
use super::fetch::fetch_one;
use super::resolve::resolve;
use super::shape::{CallShape, DecodeRequest};
use super::window::Window;
use super::InspectError;
use crate::chunk_types::TypedObject;
use crate::sink::OutputSink;
use crate::store::ChunkStore;

/// A rendered raw read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub chunk_id: ChunkId,
    /// Full chunk size, before clamping.
    pub size: usize,
    /// The bytes that were actually rendered.
    pub window: Window,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Raw(RenderedOutput),
    Structured { chunk_id: ChunkId, object: TypedObject },
}

/// Fetch the requested chunk and render its clamped window.
pub fn decode_chunk<S: ChunkStore + ?Sized>(
    store: &S,
    request: &DecodeRequest,
) -> Result<RenderedOutput, InspectError> {
    let chunk = fetch_one(store, request.chunk_id)?;
    let options = request.options;
    let window = Window::clamp(chunk.size(), options.offset, options.length);
    let text = decode::render(&chunk.data, window, options.element, options.radix);
    Ok(RenderedOutput {
        chunk_id: chunk.id,
        size: chunk.size(),
        window,
        text,
    })
}

/// Run a parsed call against `store`.
pub fn inspect<S: ChunkStore + ?Sized>(store: &S, shape: &CallShape) -> Result<Outcome, InspectError> {
    let chunk_id = resolve(store, shape.target())?;
    match shape {
        CallShape::Structured { type_name, .. } => {
            tracing::debug!(chunk_id = %chunk_id, type_name = %type_name, "structured read");
            let object = store
                .fetch_typed_object(chunk_id, type_name)
                .unwrap_or_else(|e| {
                    tracing::warn!(chunk_id = %chunk_id, error = %e, "typed object fetch failed");
                    None
                })
                .ok_or_else(|| InspectError::TypedObjectFailed {
                    id: chunk_id,
                    type_name: type_name.clone(),
                })?;
            Ok(Outcome::Structured { chunk_id, object })
        }
        CallShape::RawTypeFirst { options, .. } | CallShape::RawOffsetFirst { options, .. } => {
            let request = DecodeRequest {
                chunk_id,
                options: *options,
            };
            decode_chunk(store, &request).map(Outcome::Raw)
        }
    }
}

/// Parse `args`, inspect, and print the result to `sink`. A failure prints
/// exactly one error line and nothing else.
pub fn execute<S, O>(store: &S, sink: &mut O, args: &[Arg]) -> Result<Outcome, InspectError>
where
    S: ChunkStore + ?Sized,
    O: OutputSink + ?Sized,
{
    let result = CallShape::parse(args).and_then(|shape| {
        tracing::debug!(?shape, "call shape");
        inspect(store, &shape)
    });

    match &result {
        Ok(Outcome::Raw(out)) => {
            sink.emit_line(&format!(
                "Chunk data of {} (chunksize {}):",
                out.chunk_id, out.size
            ));
            sink.emit_line(&out.text);
        }
        Ok(Outcome::Structured { object, .. }) => {
            sink.emit_line(&format!(
                "DataStructure {} (size {}):",
                object.type_name, object.size
            ));
            sink.emit_line(&object.to_string());
        }
        Err(e) => sink.emit_error(&e.to_string()),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk_types::FetchOutcome;
    use crate::memory_store::MemoryStore;
    use crate::schema::TypeRegistry;
    use crate::sink::BufferSink;
    use peek_core::config::{FieldLayout, TypeLayout};
    use peek_core::{ElementType, LocalId, NodeId};
    use std::cell::Cell;

    fn run(store: &MemoryStore, tokens: &[&str]) -> (Result<Outcome, InspectError>, BufferSink) {
        let mut sink = BufferSink::default();
        let args = Arg::classify_all(tokens.iter().copied());
        let result = execute(store, &mut sink, &args);
        (result, sink)
    }

    /// Counts fetch calls and never finds anything.
    #[derive(Default)]
    struct EmptyStore {
        fetches: Cell<usize>,
    }

    impl ChunkStore for EmptyStore {
        fn combine_identifier(&self, node: NodeId, local: LocalId) -> ChunkId {
            ChunkId::compose(node, local)
        }

        fn fetch_chunks(&self, _ids: &[ChunkId]) -> anyhow::Result<FetchOutcome> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(FetchOutcome::default())
        }

        fn fetch_typed_object(&self, _id: ChunkId, _type_name: &str) -> anyhow::Result<Option<TypedObject>> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(None)
        }
    }

    #[test]
    fn int_hex_over_eight_bytes() {
        let store = MemoryStore::new(NodeId::new(1));
        let id = store.create(vec![0u8, 0, 0, 1, 0xFF, 0xFF, 0xFF, 0xFE]);
        let (result, sink) = run(&store, &[&id.to_string(), "int", "true", "0"]);

        let Ok(Outcome::Raw(out)) = result else {
            panic!("expected raw output");
        };
        assert_eq!(out.window, Window { offset: 0, length: 8 });
        assert_eq!(out.text.split(' ').count(), 2);
        assert_eq!(
            sink.lines,
            vec![
                format!("Chunk data of {id} (chunksize 8):"),
                "00000001 fffffffe".to_string(),
            ]
        );
        assert!(sink.errors.is_empty());
    }

    #[test]
    fn offset_past_end_renders_empty_not_error() {
        let store = MemoryStore::new(NodeId::new(1));
        let id = store.create(vec![1u8, 2, 3, 4]);
        let (result, sink) = run(&store, &[&id.to_string(), "10", "2", "byte"]);

        let Ok(Outcome::Raw(out)) = result else {
            panic!("expected raw output");
        };
        assert_eq!(out.window, Window { offset: 4, length: 0 });
        assert_eq!(out.size, 4);
        assert_eq!(sink.lines[1], "");
        assert!(sink.errors.is_empty());
    }

    #[test]
    fn default_read_is_the_whole_chunk_as_text() {
        let store = MemoryStore::new(NodeId::new(1));
        let id = store.create(&b"hello"[..]);
        let (_, sink) = run(&store, &[&id.to_string()]);
        assert_eq!(sink.lines[1], "hello");
    }

    #[test]
    fn split_id_matches_combined_id() {
        let store = MemoryStore::new(NodeId::new(4));
        let id = store.create(vec![0xCAu8, 0xFE]);

        let node = id.node().get().to_string();
        let local = id.local().get().to_string();
        let (split, split_sink) = run(&store, &[&node, &local, "0", "2", "short"]);
        let (whole, whole_sink) = run(&store, &[&id.to_string(), "0", "2", "short"]);

        assert_eq!(split, whole);
        assert_eq!(split_sink.lines, whole_sink.lines);
        assert_eq!(split_sink.lines[1], "cafe");
    }

    #[test]
    fn fetch_failure_prints_one_error_and_nothing_else() {
        let store = EmptyStore::default();
        let mut sink = BufferSink::default();
        let result = execute(&store, &mut sink, &[Arg::from("0x0001000000000001")]);

        assert_eq!(
            result,
            Err(InspectError::ChunkFetchFailed(ChunkId::from_raw(0x0001_0000_0000_0001)))
        );
        assert_eq!(store.fetches.get(), 1);
        assert_eq!(sink.errors.len(), 1);
        assert!(sink.lines.is_empty());
    }

    #[test]
    fn unsupported_type_never_fetches() {
        let store = EmptyStore::default();
        let mut sink = BufferSink::default();
        let args = Arg::classify_all(["0x0001000000000001", "octal", "true"]);
        let result = execute(&store, &mut sink, &args);

        assert_eq!(result, Err(InspectError::UnsupportedElementType("octal".to_string())));
        assert_eq!(store.fetches.get(), 0);
        assert_eq!(sink.errors, vec!["unsupported data type \"octal\"".to_string()]);
        assert!(sink.lines.is_empty());
    }

    #[test]
    fn missing_ids_never_fetch() {
        let store = EmptyStore::default();
        for (tokens, expected) in [
            (vec![], InspectError::MissingChunkId),
            (vec!["_"], InspectError::MissingChunkId),
            (vec!["_", "1"], InspectError::MissingNodeId),
            (vec!["1", "_"], InspectError::MissingLocalId),
        ] {
            let mut sink = BufferSink::default();
            let args = Arg::classify_all(tokens);
            assert_eq!(execute(&store, &mut sink, &args), Err(expected));
            assert_eq!(sink.errors.len(), 1);
        }
        assert_eq!(store.fetches.get(), 0);
    }

    #[test]
    fn structured_read_goes_through_store() {
        let mut types = TypeRegistry::default();
        types.register(TypeLayout {
            name: "Pair".to_string(),
            fields: vec![
                FieldLayout {
                    name: "left".to_string(),
                    kind: ElementType::Short,
                },
                FieldLayout {
                    name: "right".to_string(),
                    kind: ElementType::Short,
                },
            ],
        });
        let store = MemoryStore::with_types(NodeId::new(1), types);
        let id = store.create(vec![0u8, 1, 0xFF, 0xFF]);

        let (result, sink) = run(&store, &[&id.to_string(), "Pair"]);
        let Ok(Outcome::Structured { object, .. }) = result else {
            panic!("expected structured output");
        };
        assert_eq!(object.value, serde_json::json!({ "left": 1, "right": -1 }));
        assert_eq!(sink.lines[0], "DataStructure Pair (size 4):");
    }

    #[test]
    fn unknown_structured_type_fails() {
        let store = MemoryStore::new(NodeId::new(1));
        let id = store.create(vec![0u8, 1]);
        let (result, sink) = run(&store, &[&id.to_string(), "Nope"]);
        assert_eq!(
            result,
            Err(InspectError::TypedObjectFailed {
                id,
                type_name: "Nope".to_string(),
            })
        );
        assert_eq!(sink.errors.len(), 1);
    }
}

//! Type registry — named flat layouts for structured chunk reads.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use peek_core::config::TypeLayout;

use crate::chunk_types::TypedObject;
use crate::inspect::decode::{latin1, Cursor, Element};

/// Layouts by name. Names are matched exactly.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    layouts: BTreeMap<String, TypeLayout>,
}

impl TypeRegistry {
    pub fn from_layouts(layouts: impl IntoIterator<Item = TypeLayout>) -> Self {
        let mut registry = Self::default();
        for layout in layouts {
            registry.register(layout);
        }
        registry
    }

    /// Add a layout, replacing any layout of the same name.
    pub fn register(&mut self, layout: TypeLayout) {
        self.layouts.insert(layout.name.clone(), layout);
    }

    pub fn get(&self, name: &str) -> Option<&TypeLayout> {
        self.layouts.get(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.layouts.keys().cloned().collect()
    }

    pub fn layouts(&self) -> Vec<TypeLayout> {
        self.layouts.values().cloned().collect()
    }

    /// Read `payload` as the layout named `type_name`, field by field from
    /// the start. Bytes past the last field are ignored.
    pub fn decode(&self, type_name: &str, payload: &[u8]) -> Result<TypedObject> {
        let layout = self
            .get(type_name)
            .with_context(|| format!("unknown type {}", type_name))?;

        let mut fields = serde_json::Map::new();
        let mut cursor = Cursor::new(payload);
        for field in &layout.fields {
            let value = if field.kind.width().is_none() {
                let (rest, next) = cursor.read_rest();
                cursor = next;
                serde_json::Value::String(latin1(rest))
            } else {
                let Some((element, next)) = Element::read(field.kind, cursor) else {
                    bail!(
                        "chunk too short for field {} ({}) at byte {}",
                        field.name,
                        field.kind,
                        cursor.position()
                    );
                };
                cursor = next;
                element.to_json()
            };
            fields.insert(field.name.clone(), value);
        }

        Ok(TypedObject {
            type_name: layout.name.clone(),
            size: payload.len(),
            value: serde_json::Value::Object(fields),
        })
    }
}

//! Node status and type listing commands.

use anyhow::Result;
use libpeek::HttpStore;

pub fn cmd_status(store: &HttpStore) -> Result<()> {
    let resp = store.status()?;

    println!("═══════════════════════════════════════");
    println!("  peek Node Status");
    println!("═══════════════════════════════════════");
    println!("  Node id      : 0x{:04X}", resp.node_id);
    println!("  Chunks       : {}", resp.chunks);
    println!("  Stored bytes : {}", resp.bytes);
    if resp.types.is_empty() {
        println!("  Types        : none");
    } else {
        println!("  Types        : {}", resp.types.join(", "));
    }

    Ok(())
}

pub fn cmd_types(store: &HttpStore) -> Result<()> {
    let types = store.types()?;

    if types.is_empty() {
        println!("No types registered.");
        return Ok(());
    }

    for layout in &types {
        println!("  ┌─ {}", layout.name);
        let last = layout.fields.len().saturating_sub(1);
        for (i, field) in layout.fields.iter().enumerate() {
            let branch = if i == last { "└─" } else { "│ " };
            println!("  {} {:<12} : {}", branch, field.name, field.kind);
        }
    }

    Ok(())
}

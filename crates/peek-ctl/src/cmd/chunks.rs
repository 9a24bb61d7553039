//! Chunk inspection and creation commands.

use anyhow::{bail, Context, Result};
use libpeek::HttpStore;
use peek_core::LocalId;
use peek_services::{inspect, Arg, Terminal};

/// `get <cid> ...` / `get <nid> <lid> ...`. Returns false when the inspection
/// failed; the error has already been printed.
pub fn cmd_get(store: &HttpStore, args: &[&str]) -> bool {
    let args = Arg::classify_all(args.iter().copied());
    inspect::execute(store, &mut Terminal, &args).is_ok()
}

/// `put [--local <lid>] (--hex <bytes> | --file <path>)`.
pub fn cmd_put(store: &HttpStore, args: &[&str]) -> Result<()> {
    let mut local = None;
    let mut data = None;
    let mut i = 0;
    while i < args.len() {
        let flag = args[i];
        i += 1;
        let value = *args
            .get(i)
            .with_context(|| format!("{} requires a value", flag))?;
        match flag {
            "--local" => local = Some(parse_local(value)?),
            "--hex" => {
                data = Some(hex::decode(value).context("--hex must be hex-encoded bytes")?);
            }
            "--file" => {
                data = Some(
                    std::fs::read(value).with_context(|| format!("failed to read {}", value))?,
                );
            }
            other => bail!("unknown option {}", other),
        }
        i += 1;
    }

    let Some(data) = data else {
        bail!("put requires --hex or --file");
    };
    let id = store.create(&data, local)?;
    println!("Created chunk {} ({} bytes)", id, data.len());
    Ok(())
}

fn parse_local(text: &str) -> Result<LocalId> {
    let raw = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => u64::from_str_radix(digits, 16),
        None => text.parse(),
    }
    .with_context(|| format!("invalid local id {:?}", text))?;
    Ok(LocalId::new(raw))
}

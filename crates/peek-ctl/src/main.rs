//! peek-ctl — inspect and create chunks on peek storage nodes.

mod cmd;

use anyhow::{Context, Result};
use libpeek::HttpStore;
use peek_core::config::PeekConfig;

fn print_usage() {
    println!("Usage: peek-ctl [--url <url>] <command>");
    println!();
    println!("Commands:");
    println!("  get <cid> [type]                         Read a chunk as a named type");
    println!("  get <cid> [type] [hex] [offset] [length] Dump chunk bytes");
    println!("  get <cid> [offset] [length] [type] [hex] Dump chunk bytes");
    println!("  get <nid> <lid> ...                      Same, with a split id");
    println!("  put [--local <lid>] (--hex <bytes> | --file <path>)");
    println!("                                           Store a chunk on the node");
    println!("  status                                   Show node status");
    println!("  types                                    List registered types");
    println!();
    println!("Element types: byte, short, int, long, str (default)");
    println!("Use _ to skip an optional argument.");
    println!();
    println!("Options:");
    println!("  --url <url>   Node API (default: [client] default_url from config)");
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut config = PeekConfig::load().unwrap_or_else(|e| {
        eprintln!("warning: {}, using defaults", e);
        PeekConfig::default()
    });

    // Parse --url option
    let mut remaining: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--url" {
            i += 1;
            config.client.default_url = args.get(i).context("--url requires a value")?.clone();
        } else {
            remaining.push(&args[i]);
        }
        i += 1;
    }

    let store = HttpStore::from_config(&config)?;

    match remaining.as_slice() {
        ["get", rest @ ..] => {
            if !cmd::chunks::cmd_get(&store, rest) {
                std::process::exit(1);
            }
            Ok(())
        }
        ["put", rest @ ..]             => cmd::chunks::cmd_put(&store, rest),
        ["status"] | []                => cmd::status::cmd_status(&store),
        ["types"]                      => cmd::status::cmd_types(&store),
        ["help"] | ["--help"] | ["-h"] => { print_usage(); Ok(()) }
        other => {
            eprintln!("Unknown command: {}", other.join(" "));
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

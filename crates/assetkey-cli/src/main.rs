//! assetkey — encode and decode asset storage paths from the command line.
//!
//! Commands that read stored paths or URLs need ASSET_URL_PREFIX (or S3_URL_PREFIX).

use anyhow::Context;
use assetkey_cli::{current_keys, init_tracing, print_json};
use assetkey_core::{normalize, Config, DraftKey, PathKeyCodec, SizeTag};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "assetkey", about = "Asset storage path codec")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a file name
    Normalize {
        /// Raw file name
        name: String,
    },
    /// Build the storage path for an asset
    Encode {
        /// Folder (empty for root)
        #[arg(long, default_value = "")]
        folder: String,
        /// File name including extension
        #[arg(long)]
        name: String,
        /// Preset id
        #[arg(long)]
        id: Option<String>,
        /// Prefix for a generated id
        #[arg(long)]
        id_prefix: Option<String>,
        /// Size variant: sm, md, lg, xl
        #[arg(long)]
        size: Option<SizeTag>,
        /// Generate an id when none is given
        #[arg(long)]
        generate_id: bool,
    },
    /// Decode a storage path or URL
    Decode {
        /// Storage path or public URL
        path: String,
    },
    /// Find the stored URL for a file name
    Reconcile {
        /// Target file name
        #[arg(long)]
        name: String,
        /// Target folder
        #[arg(long, default_value = "")]
        folder: String,
        /// Candidate stored URLs
        urls: Vec<String>,
    },
    /// List stored URLs no longer referenced
    Prune {
        /// URL still in use (repeatable)
        #[arg(long = "current")]
        current: Vec<String>,
        /// Previously stored URLs
        previous: Vec<String>,
    },
}

#[derive(Serialize)]
struct EncodeOutput {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

fn load_codec() -> anyhow::Result<PathKeyCodec> {
    PathKeyCodec::from_env().context("Failed to configure codec. Set ASSET_URL_PREFIX")
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize { name } => {
            print_json(&normalize(&name))?;
        }
        Commands::Encode {
            folder,
            name,
            id,
            id_prefix,
            size,
            generate_id,
        } => {
            let mut draft = DraftKey::new(&folder, &name);
            if let Some(id) = id {
                draft = draft.with_id(id);
            }
            if let Some(prefix) = id_prefix {
                draft = draft.with_id_prefix(prefix);
            }
            if let Some(size) = size {
                draft = draft.with_size(size);
            }
            if generate_id {
                draft = draft.require_id();
            }
            let key = draft.seal();
            // the URL is only shown when a prefix is configured
            let url = match Config::from_env_if_set()? {
                Some(config) => Some(PathKeyCodec::new(&config)?.url_for(&key)),
                None => None,
            };
            print_json(&EncodeOutput {
                path: key.to_path(),
                url,
            })?;
        }
        Commands::Decode { path } => {
            let codec = load_codec()?;
            print_json(&codec.decode(&path))?;
        }
        Commands::Reconcile { name, folder, urls } => {
            let codec = load_codec()?;
            print_json(&codec.reconcile(&urls, &name, &folder))?;
        }
        Commands::Prune { current, previous } => {
            let codec = load_codec()?;
            let current = current_keys(&codec, &current);
            print_json(&codec.diff_and_prune(&current, &previous))?;
        }
    }

    Ok(())
}

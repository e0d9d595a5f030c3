use std::collections::HashMap;

use assetkey_core::{AssetKey, AssetSource, PathKeyCodec};
use serde::Serialize;

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Key the currently referenced URLs by base name.
pub fn current_keys(codec: &PathKeyCodec, urls: &[String]) -> HashMap<String, AssetKey> {
    let sources = urls
        .iter()
        .map(|url| AssetSource::Stored { url: url.clone() });
    codec.map_keys(sources, "", None, None)
}

//! Path-key codec
//!
//! Encodes [`AssetKey`]s into storage paths and decodes stored paths or public URLs back
//! into keys. The codec holds the address prefix so that decoding can strip it from full
//! URLs; construction fails when no prefix is configured.

use std::borrow::Cow;

use crate::config::Config;
use crate::error::KeyError;
use crate::key::lexer::parse_name;
use crate::key::AssetKey;

#[derive(Debug, Clone)]
pub struct PathKeyCodec {
    url_prefix: String,
}

impl PathKeyCodec {
    pub fn new(config: &Config) -> Result<Self, KeyError> {
        config.validate()?;
        Ok(PathKeyCodec {
            url_prefix: config.url_prefix().to_string(),
        })
    }

    pub fn from_env() -> Result<Self, KeyError> {
        Self::new(&Config::from_env()?)
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Storage path for `key`: `folder/name(id){size}.ext`.
    pub fn encode(&self, key: &AssetKey) -> String {
        key.to_path()
    }

    /// Public URL for `key`: the address prefix joined to its storage path.
    pub fn url_for(&self, key: &AssetKey) -> String {
        format!("{}/{}", self.url_prefix, key.to_path())
    }

    /// Decode a storage path or public URL into a key.
    ///
    /// Never fails. Percent-escapes that do not decode to UTF-8 leave the input as is,
    /// and malformed markers stay part of the base name.
    pub fn decode(&self, path_or_url: &str) -> AssetKey {
        if path_or_url.is_empty() {
            return AssetKey::default();
        }

        let decoded = urlencoding::decode(path_or_url).unwrap_or_else(|e| {
            tracing::debug!(error = %e, path = %path_or_url, "Path is not valid UTF-8 after percent-decoding");
            Cow::Borrowed(path_or_url)
        });

        let path = self.strip_prefix(&decoded);
        let (folder, file_name) = match path.rfind('/') {
            Some(idx) => (&path[..idx], &path[idx + 1..]),
            None => ("", path),
        };

        let parsed = parse_name(file_name);
        AssetKey::from_parts(folder.to_string(), parsed.base_name, parsed.id, parsed.size)
    }

    /// `folder/base_name` of a stored path or URL, markers removed.
    pub fn raw_path(&self, path_or_url: &str) -> String {
        self.decode(path_or_url).raw_path()
    }

    /// Whether two stored paths or URLs name the same base asset.
    pub fn is_same_path(&self, a: &str, b: &str) -> bool {
        self.raw_path(a) == self.raw_path(b)
    }

    fn strip_prefix<'a>(&self, path: &'a str) -> &'a str {
        match path.find(&self.url_prefix) {
            Some(idx) => {
                let rest = &path[idx + self.url_prefix.len()..];
                rest.strip_prefix('/').unwrap_or(rest)
            }
            None => path,
        }
    }
}

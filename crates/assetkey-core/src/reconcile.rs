//! Batch reconciliation of stored references against current asset keys.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::codec::PathKeyCodec;
use crate::key::id::{IdSource, ShortRandom};
use crate::key::lexer::split_extension;
use crate::key::normalize::sanitize_base_name;
use crate::key::{eq_ignore_case, AssetKey, DraftKey};
use crate::size_tag::SizeTag;

/// One image reference in an edit: a freshly uploaded file or a stored URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetSource {
    Upload { file_name: String },
    Stored { url: String },
}

impl PathKeyCodec {
    /// Find the stored reference for `target_name` in `target_folder`.
    ///
    /// Candidates are pre-filtered by substring containment before being decoded. The
    /// sanitized stem only holds characters percent-encoding leaves alone, so the raw
    /// stem matches both plain and encoded URLs. When several match, the last one wins.
    pub fn reconcile<S: AsRef<str>>(
        &self,
        candidate_urls: &[S],
        target_name: &str,
        target_folder: &str,
    ) -> Option<AssetKey> {
        let target_name = sanitize_base_name(target_name);
        let target_folder = target_folder.trim();
        let (stem, _) = split_extension(&target_name);
        let stem_lower = stem.to_lowercase();
        let folder_lower = target_folder.to_lowercase();

        let mut matched = None;
        for url in candidate_urls.iter().map(AsRef::as_ref) {
            let url_lower = url.to_lowercase();
            if !url_lower.contains(&stem_lower) || !url_lower.contains(&folder_lower) {
                continue;
            }

            let key = self.decode(url);
            if eq_ignore_case(key.folder(), target_folder)
                && eq_ignore_case(key.base_name(), &target_name)
            {
                matched = Some(key);
            }
        }

        tracing::debug!(
            target_name = %target_name,
            target_folder = %target_folder,
            found = matched.is_some(),
            "Reconciled stored reference"
        );
        matched
    }

    /// Stored references no longer in use.
    ///
    /// Decodes every previous URL and returns those whose base name is not a key of
    /// `current`. Blank URLs are ignored.
    pub fn diff_and_prune<S: AsRef<str>>(
        &self,
        current: &HashMap<String, AssetKey>,
        previous_urls: &[S],
    ) -> Vec<AssetKey> {
        previous_urls
            .iter()
            .map(AsRef::as_ref)
            .filter(|url| !url.trim().is_empty())
            .map(|url| self.decode(url))
            .filter(|key| !key.base_name().is_empty() && !current.contains_key(key.base_name()))
            .collect()
    }

    /// Build sealed keys for a mixed batch of uploads and stored references.
    ///
    /// Uploads get a fresh id (with `id_prefix`) and `size`; stored URLs are decoded.
    /// The map is keyed by base name; a later source replaces an earlier one with the
    /// same base name.
    pub fn map_keys<I>(
        &self,
        sources: I,
        folder: &str,
        id_prefix: Option<&str>,
        size: Option<SizeTag>,
    ) -> HashMap<String, AssetKey>
    where
        I: IntoIterator<Item = AssetSource>,
    {
        self.map_keys_with(sources, folder, id_prefix, size, &ShortRandom)
    }

    pub fn map_keys_with<I>(
        &self,
        sources: I,
        folder: &str,
        id_prefix: Option<&str>,
        size: Option<SizeTag>,
        ids: &impl IdSource,
    ) -> HashMap<String, AssetKey>
    where
        I: IntoIterator<Item = AssetSource>,
    {
        let mut mapping = HashMap::new();
        for source in sources {
            let key = match source {
                AssetSource::Upload { file_name } => {
                    let mut draft = DraftKey::new(folder, &file_name).require_id();
                    if let Some(prefix) = id_prefix {
                        draft = draft.with_id_prefix(prefix);
                    }
                    if let Some(size) = size {
                        draft = draft.with_size(size);
                    }
                    draft.seal_with(ids)
                }
                AssetSource::Stored { url } => self.decode(&url),
            };
            mapping.insert(key.base_name().to_string(), key);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    struct Fixed(u64);

    impl IdSource for Fixed {
        fn next_id(&self) -> u64 {
            self.0
        }
    }

    fn codec() -> PathKeyCodec {
        PathKeyCodec::new(&Config::new("https://cdn.example.com").unwrap()).unwrap()
    }

    #[test]
    fn reconcile_finds_matching_url() {
        let urls = ["d/pic(1).jpg", "d/other(2).jpg"];
        let found = codec().reconcile(&urls, "pic.jpg", "d").unwrap();
        assert_eq!(found, codec().decode("d/pic(1).jpg"));
        assert!(codec().reconcile(&urls, "missing.jpg", "d").is_none());
    }

    #[test]
    fn reconcile_last_match_wins() {
        let urls = [
            "https://cdn.example.com/d/pic(1).jpg",
            "https://cdn.example.com/d/pic(2){sm}.jpg",
        ];
        let found = codec().reconcile(&urls, "pic.jpg", "d").unwrap();
        assert_eq!(found.id(), Some("2"));
    }

    #[test]
    fn reconcile_ignores_case_and_other_folders() {
        let urls = ["D/Pic(1).JPG", "e/pic(2).jpg", "d/picture(3).jpg"];
        let found = codec().reconcile(&urls, "pic.jpg", "d").unwrap();
        assert_eq!(found.id(), Some("1"));
    }

    #[test]
    fn reconcile_matches_percent_encoded_url() {
        let urls = ["https://cdn.example.com/d/my_pic-2%2812%29%7Bsm%7D.jpg"];
        let found = codec().reconcile(&urls, "my_pic-2.jpg", "d").unwrap();
        assert_eq!(found.id(), Some("12"));
        assert_eq!(found.size(), Some(SizeTag::Sm));
    }

    #[test]
    fn reconcile_finds_legacy_size_marker() {
        let urls = ["d/pic(7){xxl}.jpg"];
        let found = codec().reconcile(&urls, "pic.jpg", "d").unwrap();
        assert_eq!(found.id(), Some("7"));
        assert_eq!(found.size(), None);
    }

    #[test]
    fn reconcile_sanitizes_target_name() {
        let urls = ["gallery/my-photo(77).png"];
        let found = codec().reconcile(&urls, " my photo.png", "gallery").unwrap();
        assert_eq!(found.id(), Some("77"));
    }

    #[test]
    fn diff_and_prune_returns_orphans() {
        let current: HashMap<String, AssetKey> = [("a.jpg".to_string(), codec().decode("d/a(1).jpg"))]
            .into_iter()
            .collect();
        let pruned = codec().diff_and_prune(&current, &["d/a(1).jpg", "d/b(2).jpg", "  "]);
        assert_eq!(pruned, vec![codec().decode("d/b(2).jpg")]);
    }

    #[test]
    fn diff_and_prune_with_nothing_current() {
        let pruned = codec().diff_and_prune(&HashMap::new(), &["d/a(1).jpg"]);
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].base_name(), "a.jpg");
    }

    #[test]
    fn map_keys_mixes_uploads_and_stored() {
        let sources = vec![
            AssetSource::Stored {
                url: "https://cdn.example.com/shop/old(5){md}.jpg".to_string(),
            },
            AssetSource::Upload {
                file_name: "new image.png".to_string(),
            },
        ];
        let mapping =
            codec().map_keys_with(sources, "shop", Some("G"), Some(SizeTag::Md), &Fixed(42));

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["old.jpg"].id(), Some("5"));
        let fresh = &mapping["new-image.png"];
        assert_eq!(fresh.id(), Some("G42"));
        assert_eq!(fresh.to_path(), "shop/new-image(G42){md}.png");
    }

    #[test]
    fn map_keys_later_source_replaces_earlier() {
        let sources = vec![
            AssetSource::Stored {
                url: "shop/pic(5).jpg".to_string(),
            },
            AssetSource::Upload {
                file_name: "pic.jpg".to_string(),
            },
        ];
        let mapping = codec().map_keys_with(sources, "shop", None, None, &Fixed(9));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping["pic.jpg"].id(), Some("9"));
    }

    #[test]
    fn asset_source_serde_shape() {
        let source: AssetSource =
            serde_json::from_str(r#"{"kind":"upload","file_name":"a.jpg"}"#).unwrap();
        assert_eq!(
            source,
            AssetSource::Upload {
                file_name: "a.jpg".to_string()
            }
        );
    }
}

//! Asset key model
//!
//! An asset key names one stored image variant: folder, base name, optional id and
//! optional size tag. Keys come in two states:
//!
//! - [`DraftKey`]: an identity about to be written, which may still need an id
//! - [`AssetKey`]: a sealed identity whose id (if any) is fixed
//!
//! Sealing consumes the draft and generates the id at most once, so every encoding of
//! the resulting key yields the same path.

pub mod id;
pub mod lexer;
pub mod normalize;

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::size_tag::SizeTag;
use id::{generate_id, IdSource, ShortRandom};
use lexer::{split_extension, ID_CLOSE, ID_OPEN, SIZE_CLOSE, SIZE_OPEN};
use normalize::{normalize, sanitize_base_name, sanitize_id};

/// An asset identity that has not been sealed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftKey {
    folder: String,
    base_name: String,
    id: Option<String>,
    id_prefix: Option<String>,
    size: Option<SizeTag>,
    requires_id: bool,
}

impl DraftKey {
    /// Create a draft for `file_name` in `folder`.
    ///
    /// The folder is trimmed; the file name is normalized and stripped of marker
    /// delimiters.
    pub fn new(folder: impl AsRef<str>, file_name: &str) -> Self {
        DraftKey {
            folder: folder.as_ref().trim().to_string(),
            base_name: sanitize_base_name(file_name),
            id: None,
            id_prefix: None,
            size: None,
            requires_id: false,
        }
    }

    pub fn with_size(mut self, size: SizeTag) -> Self {
        self.size = Some(size);
        self
    }

    /// Prefix prepended to a generated id. Never applied to a preset id.
    ///
    /// Sanitized like a preset id.
    pub fn with_id_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        let prefix = sanitize_id(prefix.as_ref());
        self.id_prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    /// Generate an id when sealing if none was preset.
    pub fn require_id(mut self) -> Self {
        self.requires_id = true;
        self
    }

    /// Preset id. Normalized, with marker delimiters and `.` replaced by `-`, so the
    /// sealed key equals what decoding its path yields.
    pub fn with_id(mut self, id: impl AsRef<str>) -> Self {
        let id = sanitize_id(id.as_ref());
        self.id = (!id.is_empty()).then_some(id);
        self
    }

    /// Swap the base name's extension, e.g. after re-encoding the payload.
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.base_name = sanitize_base_name(&replace_extension(&self.base_name, extension));
        self
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn requires_id(&self) -> bool {
        self.requires_id
    }

    pub fn seal(self) -> AssetKey {
        self.seal_with(&ShortRandom)
    }

    /// Seal the draft, drawing a generated id from `ids` if one is required.
    pub fn seal_with(self, ids: &impl IdSource) -> AssetKey {
        let id = match self.id {
            Some(id) => Some(id),
            None if self.requires_id => Some(generate_id(self.id_prefix.as_deref(), ids)),
            None => None,
        };
        AssetKey {
            folder: self.folder,
            base_name: self.base_name,
            id,
            size: self.size,
        }
    }
}

/// A sealed asset identity.
///
/// Derived `PartialEq` is exact. Use [`AssetKey::is_same`] and
/// [`AssetKey::is_equivalent`] for the case-insensitive identity rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetKey {
    folder: String,
    base_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<SizeTag>,
}

impl AssetKey {
    pub(crate) fn from_parts(
        folder: String,
        base_name: String,
        id: Option<String>,
        size: Option<SizeTag>,
    ) -> Self {
        AssetKey {
            folder,
            base_name,
            id,
            size,
        }
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn size(&self) -> Option<SizeTag> {
        self.size
    }

    /// Whether this key carries an id marker.
    pub fn requires_id(&self) -> bool {
        self.id.is_some()
    }

    /// The same asset in another size variant.
    pub fn with_size(&self, size: Option<SizeTag>) -> AssetKey {
        AssetKey {
            size,
            ..self.clone()
        }
    }

    /// `folder/base_name` without id or size markers.
    pub fn raw_path(&self) -> String {
        if self.folder.is_empty() {
            self.base_name.clone()
        } else {
            format!("{}/{}", self.folder, self.base_name)
        }
    }

    /// Strict identity: folder, base name and id all match, ignoring case.
    ///
    /// A key with an id never matches a key without one.
    pub fn is_same(&self, other: &AssetKey) -> bool {
        let ids_match = match (&self.id, &other.id) {
            (None, None) => true,
            (Some(a), Some(b)) => eq_ignore_case(a, b),
            _ => false,
        };
        ids_match && self.is_equivalent(other)
    }

    /// Same logical asset: folder and base name match, ignoring case and id.
    pub fn is_equivalent(&self, other: &AssetKey) -> bool {
        eq_ignore_case(&self.folder, &other.folder)
            && eq_ignore_case(&self.base_name, &other.base_name)
    }

    /// Serialize to the storage path `folder/name(id){size}.ext`.
    pub fn to_path(&self) -> String {
        let (stem, ext) = split_extension(&self.base_name);

        let mut name = String::with_capacity(self.base_name.len() + 16);
        name.push_str(stem);
        if let Some(ref id) = self.id {
            name.push(ID_OPEN);
            name.push_str(id);
            name.push(ID_CLOSE);
        }
        if let Some(size) = self.size {
            name.push(SIZE_OPEN);
            name.push_str(size.as_str());
            name.push(SIZE_CLOSE);
        }
        name.push_str(ext);

        let name = normalize(&name);
        let folder = self.folder.trim();
        if folder.is_empty() {
            name
        } else {
            format!("{}/{}", folder, name)
        }
    }
}

impl Display for AssetKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.to_path())
    }
}

/// Replace everything from the last `.` of `file_name` with `extension`.
///
/// Names without a `.` get `extension` appended.
pub fn replace_extension(file_name: &str, extension: &str) -> String {
    let (stem, _) = split_extension(file_name);
    format!("{}{}", stem, extension)
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

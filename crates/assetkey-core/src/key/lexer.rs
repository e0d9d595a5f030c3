//! Marker scanning for serialized asset names.
//!
//! A serialized file name reads `stem(id){size}.ext`. Decoding works backward: the
//! extension is split off first, then a trailing size marker, then a trailing id marker.
//! A marker only counts when its closing delimiter is the last character of the working
//! name, its opening delimiter is not the first character, and the pair is balanced.
//! Anything else is left in the stem untouched.

use crate::size_tag::SizeTag;

pub const ID_OPEN: char = '(';
pub const ID_CLOSE: char = ')';
pub const SIZE_OPEN: char = '{';
pub const SIZE_CLOSE: char = '}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Id,
    Size,
}

impl MarkerKind {
    pub const fn delimiters(self) -> (char, char) {
        match self {
            MarkerKind::Id => (ID_OPEN, ID_CLOSE),
            MarkerKind::Size => (SIZE_OPEN, SIZE_CLOSE),
        }
    }
}

pub fn is_marker_delimiter(c: char) -> bool {
    matches!(c, ID_OPEN | ID_CLOSE | SIZE_OPEN | SIZE_CLOSE)
}

/// Split a file name into `(stem, extension)`, the extension keeping its leading `.`.
///
/// Names without a `.` have an empty extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}

/// Split a trailing marker of the given kind off `name`.
///
/// Returns `(rest, contents)`, or `None` when `name` does not end in a well-formed marker.
pub fn split_marker(name: &str, kind: MarkerKind) -> Option<(&str, &str)> {
    let (open, close) = kind.delimiters();
    let inner = name.strip_suffix(close)?;
    let start = inner.rfind(open)?;
    if start == 0 {
        return None;
    }
    let contents = &inner[start + open.len_utf8()..];
    if contents.contains(close) {
        return None;
    }
    Some((&name[..start], contents))
}

/// Components of a serialized file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub base_name: String,
    pub id: Option<String>,
    pub size: Option<SizeTag>,
}

/// Parse a serialized file name (no folder) into its base name and markers.
///
/// A well-formed size marker is always stripped; contents that are not a known
/// [`SizeTag`] read as no size. Empty markers (`()`, `{}`) are stripped and read as
/// absent.
pub fn parse_name(file_name: &str) -> ParsedName {
    let (mut stem, ext) = split_extension(file_name);

    let mut size = None;
    if let Some((rest, contents)) = split_marker(stem, MarkerKind::Size) {
        if !contents.is_empty() {
            match contents.parse::<SizeTag>() {
                Ok(tag) => size = Some(tag),
                Err(_) => tracing::debug!(file_name, contents, "Unknown size marker dropped"),
            }
        }
        stem = rest;
    }

    let mut id = None;
    if let Some((rest, contents)) = split_marker(stem, MarkerKind::Id) {
        if !contents.is_empty() {
            id = Some(contents.to_string());
        }
        stem = rest;
    }

    ParsedName {
        base_name: format!("{}{}", stem, ext),
        id,
        size,
    }
}

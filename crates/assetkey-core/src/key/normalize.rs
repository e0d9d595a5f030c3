//! File name normalization.

use super::lexer::is_marker_delimiter;

/// Normalize a file name part for use in a storage path.
///
/// Leading and trailing whitespace is trimmed. Every remaining character other than an
/// ASCII letter, digit, `(`, `)`, `{`, `}`, `_`, `-` or `.` is replaced with a single `-`.
pub fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if is_allowed(c) { c } else { '-' })
        .collect()
}

/// Normalize a base name and replace marker delimiters with `-`.
///
/// Base names must never carry `()` or `{}` themselves, otherwise a decoded path could
/// not tell a user-supplied parenthesis from an id marker.
pub fn sanitize_base_name(raw: &str) -> String {
    normalize(raw)
        .chars()
        .map(|c| if is_marker_delimiter(c) { '-' } else { c })
        .collect()
}

/// Normalize an id or id prefix for use inside an `(id)` marker.
///
/// Marker delimiters and `.` become `-`, so the id can neither close its marker early
/// nor be mistaken for an extension.
pub fn sanitize_id(raw: &str) -> String {
    sanitize_base_name(raw).replace('.', "-")
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_marker_delimiter(c) || matches!(c, '_' | '-' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_each_disallowed_char_with_one_dash() {
        assert_eq!(normalize("bad name!@#.jpg"), "bad-name---.jpg");
    }

    #[test]
    fn keeps_allowed_chars() {
        assert_eq!(normalize("a-Z_0.9(x){y}"), "a-Z_0.9(x){y}");
    }

    #[test]
    fn trims_whitespace_first() {
        assert_eq!(normalize("  photo 1.png \n"), "photo-1.png");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn non_ascii_letters_become_dashes() {
        assert_eq!(normalize("café.jpg"), "caf-.jpg");
        assert_eq!(normalize("a]b[c"), "a-b-c");
    }

    #[test]
    fn sanitize_strips_marker_delimiters() {
        assert_eq!(sanitize_base_name("pic (1).jpg"), "pic--1-.jpg");
        assert_eq!(sanitize_base_name("{draft}.png"), "-draft-.png");
    }

    #[test]
    fn sanitize_id_strips_markers_and_dots() {
        assert_eq!(sanitize_id("a)b"), "a-b");
        assert_eq!(sanitize_id("1.2"), "1-2");
        assert_eq!(sanitize_id(" x y "), "x-y");
        assert_eq!(sanitize_id("U23840"), "U23840");
    }
}

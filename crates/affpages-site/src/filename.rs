//! Product-name to file-stem conversion.

use sha2::{Digest, Sha256};

/// Longest stem kept, in characters.
pub const MAX_STEM_CHARS: usize = 80;

const ILLEGAL: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Turns a product name into a file stem safe on common filesystems.
///
/// Drops path separators, reserved punctuation, and control characters,
/// joins whitespace runs with `_`, keeps at most [`MAX_STEM_CHARS`]
/// characters, and trims `_` and `.` from both ends. A name with nothing
/// left falls back to `product_` plus a SHA-256 prefix of the original.
///
/// Applying it to its own output returns the same string.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !ILLEGAL.contains(c) && !c.is_control())
        .collect();

    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    let truncated: String = joined.chars().take(MAX_STEM_CHARS).collect();
    let stem = truncated.trim_matches(|c| c == '_' || c == '.');

    if stem.is_empty() {
        fallback_stem(name)
    } else {
        stem.to_owned()
    }
}

fn fallback_stem(name: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(name.as_bytes()));
    format!("product_{}", &digest[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_spaces_and_strips_illegal_characters() {
        assert_eq!(
            sanitize_filename("삼성 갤럭시 버즈2 프로 <블랙>"),
            "삼성_갤럭시_버즈2_프로_블랙"
        );
        assert_eq!(sanitize_filename("a/b\\c:d*e?f\"g|h"), "abcdefgh");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(sanitize_filename("  LG   그램\t15\n "), "LG_그램_15");
    }

    #[test]
    fn trims_dots_and_underscores() {
        assert_eq!(sanitize_filename("..hidden name.."), "hidden_name");
        assert_eq!(sanitize_filename("_x_"), "x");
    }

    #[test]
    fn truncates_on_char_boundary() {
        let long = "가".repeat(200);
        let out = sanitize_filename(&long);
        assert_eq!(out.chars().count(), MAX_STEM_CHARS);
    }

    #[test]
    fn empty_or_all_illegal_falls_back_to_hash() {
        let empty = sanitize_filename("");
        let illegal = sanitize_filename("???///");
        assert!(empty.starts_with("product_"));
        assert!(illegal.starts_with("product_"));
        assert_eq!(illegal.len(), "product_".len() + 12);
        assert_ne!(empty, illegal);
    }

    #[test]
    fn fallback_is_stable() {
        assert_eq!(sanitize_filename("<>"), sanitize_filename("<>"));
    }

    #[test]
    fn sanitizing_is_idempotent() {
        let long = "긴 이름 ".repeat(40);
        let inputs = [
            "삼성 갤럭시 버즈2 프로 <블랙>",
            "  spaced   out  ",
            "..dots..",
            "",
            "***",
            "a_ _b",
            long.as_str(),
        ];
        for input in inputs {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once, "not idempotent for {input:?}");
        }
    }
}

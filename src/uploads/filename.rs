use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref UNSAFE_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.-]").unwrap();
}

/// Reduces an arbitrary client-supplied name to a single safe path component.
///
/// Characters are NFKD-decomposed and whatever is still non-ASCII is dropped, separators and whitespace runs become `_`,
/// anything outside `[A-Za-z0-9_.-]` is removed and leading/trailing `.`/`_`
/// are trimmed. May return an empty string.
pub fn secure_filename(raw: &str) -> String {
    let ascii: String = raw
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let stripped = UNSAFE_CHARS.replace_all(&joined, "");

    stripped.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Name under which a user's self-introduction upload is stored.
pub fn intro_filename(username: &str, original: &str) -> String {
    secure_filename(&format!("{}_intro_{}", username, original))
}

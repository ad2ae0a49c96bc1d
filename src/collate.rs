use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Builds a case and accent insensitive key for ordering display names.
///
/// Compatibility decomposition folds ligatures and full-width forms, marks
/// are dropped, and whitespace runs collapse to one space.
pub fn sort_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_space = false;

    for ch in name.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_whitespace() {
            pending_space = !key.is_empty();
            continue;
        }
        if pending_space {
            key.push(' ');
            pending_space = false;
        }
        key.extend(ch.to_lowercase());
    }

    key
}

pub(crate) fn sort_key_cache(name: &str) -> Arc<str> {
    if name.is_empty() {
        Arc::<str>::from("")
    } else {
        Arc::<str>::from(sort_key(name))
    }
}

//! Derivations applied to a project before it is saved or rendered.

use crate::constants::{SHORT_DESCRIPTION_ELLIPSIS, SHORT_DESCRIPTION_LIMIT};
use crate::entities::validation::MAX_SLUG_LENGTH;

/// Fallback slug for titles that contain no alphanumeric characters.
pub const FALLBACK_SLUG: &str = "project";

/// URL-safe slug: lowercase, runs of non-alphanumerics collapsed into a
/// single hyphen, no leading or trailing hyphen. Transliteration can make
/// the slug longer than the title, so it is cut back to fit the column.
pub fn slugify_title(title: &str) -> String {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        truncate_slug(&slug, MAX_SLUG_LENGTH).to_string()
    }
}

/// Shortens an ASCII slug to at most `max` bytes, preferring to cut at a
/// hyphen so that words stay whole.
fn truncate_slug(slug: &str, max: usize) -> &str {
    if slug.len() <= max {
        return slug;
    }
    let head = &slug[..max];
    if slug[max..].starts_with('-') {
        return head;
    }
    match head.rfind('-') {
        Some(pos) if pos > 0 => &head[..pos],
        _ => head.trim_end_matches('-'),
    }
}

/// First 250 characters of `description` plus an ellipsis when it is longer,
/// otherwise the description itself. Counts characters, so it may cut a word.
pub fn derive_short_description(description: &str) -> String {
    match description.char_indices().nth(SHORT_DESCRIPTION_LIMIT) {
        Some((cut, _)) => {
            let mut short = String::with_capacity(cut + SHORT_DESCRIPTION_ELLIPSIS.len());
            short.push_str(&description[..cut]);
            short.push_str(SHORT_DESCRIPTION_ELLIPSIS);
            short
        }
        None => description.to_string(),
    }
}

/// Splits a comma-separated technology field into trimmed, non-empty entries.
pub fn parse_technologies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tech| !tech.is_empty())
        .map(String::from)
        .collect()
}

/// Candidate slug for the n-th attempt at finding a free one: `base`,
/// `base-2`, `base-3`, ... The base is shortened so the suffixed slug still
/// fits in [`MAX_SLUG_LENGTH`].
pub fn slug_candidate(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        return truncate_slug(base, MAX_SLUG_LENGTH).to_string();
    }
    let suffix = format!("-{attempt}");
    let base = truncate_slug(base, MAX_SLUG_LENGTH - suffix.len());
    format!("{base}{suffix}")
}

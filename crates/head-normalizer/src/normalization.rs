use unicode_normalization::UnicodeNormalization;

/// Display text of a heading: NFC-normalized, whitespace runs collapsed to one space.
///
/// Markup like `<h1>Tree\n  <em>Removal</em></h1>` yields `Tree Removal`.
pub fn heading_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Hard-truncate to `max_chars` characters.
///
/// Strings already within the limit are returned unchanged, trailing
/// whitespace included. After a cut, whitespace left dangling at the end is
/// trimmed.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((byte_idx, _)) => s[..byte_idx].trim_end().to_string(),
    }
}

/// Turn a URL slug segment into a display title: `tree-removal` -> `Tree Removal`.
///
/// Runs of `-` and `_` become a single space and the first letter of every
/// word is upper-cased. The rest of each word is left as written.
pub fn title_case_segment(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

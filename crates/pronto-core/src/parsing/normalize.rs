use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize report text for comparison.
///
/// Steps:
/// 1. Decompose (NFD) and drop combining marks, so "FUNCIONÁRIO" -> "FUNCIONARIO"
/// 2. Uppercase
/// 3. Turn ordinal indicators and every other non-alphanumeric into a space
///    ("1º ENTRADA", "1° ENTRADA" -> "1 ENTRADA")
/// 4. Collapse whitespace and trim
pub fn normalize_text(raw: &str) -> String {
    let stripped: String = raw.nfd().filter(|c| !is_combining_mark(*c)).collect();

    let mut spaced = String::with_capacity(stripped.len());
    for c in stripped.to_uppercase().chars() {
        match c {
            'º' | 'ª' | '°' => spaced.push(' '),
            c if c.is_alphanumeric() => spaced.push(c),
            _ => spaced.push(' '),
        }
    }

    collapse_ws(&spaced)
}

/// Clean a name for storage: trimmed, uppercased, single-spaced. Diacritics are kept.
pub fn clean_name(raw: &str) -> String {
    collapse_ws(&raw.to_uppercase())
}

/// Number of non-space characters in an already normalized string.
pub fn significant_len(normalized: &str) -> usize {
    normalized.chars().filter(|c| !c.is_whitespace()).count()
}

pub(crate) fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

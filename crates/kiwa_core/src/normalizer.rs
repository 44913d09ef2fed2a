use unicode_normalization::UnicodeNormalization;

/// Comparison key for search: lowercase, NFD, strip accents, trim.
///
/// The result is never shown to the user; callers keep the original text
/// for display and only compare normalized forms.
pub fn normalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let stripped = strip_accents(&lower);
    stripped.trim().to_string()
}

fn strip_accents(s: &str) -> String {
    // Decompose and drop the Combining Diacritical Marks block
    s.nfd().filter(|c| !is_mark(*c)).collect()
}

fn is_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

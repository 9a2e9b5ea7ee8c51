//! Locale-aware string ordering for product names.
//!
//! Approximates a Portuguese collator in three levels: base letters first
//! (case and Latin diacritics ignored), then accents, then case with
//! lowercase sorting before uppercase.

use std::cmp::Ordering;

/// Compare two names the way a pt-BR collator would.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| secondary_key(a).cmp(secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(tertiary_key(b)))
}

fn primary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase).map(fold_diacritic)
}

fn secondary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

// Lowercase sorts first: `false < true`.
fn tertiary_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().map(char::is_uppercase)
}

/// Map an accented Latin lowercase letter to its base letter.
fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => c,
    }
}

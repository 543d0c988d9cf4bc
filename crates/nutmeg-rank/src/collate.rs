//! Name ordering for result lists.
//!
//! Approximates an English locale collation: letters compare without regard
//! to case or Latin accents first, and only exact ties fall back to
//! lowercase-before-uppercase, unaccented-before-accented.

use std::cmp::Ordering;

#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| tertiary(a, b))
}

fn primary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase).map(strip_accent)
}

/// Tie-break for names that are equal once case and accents are folded.
/// Accents decide first (plain before accented anywhere in the name), then
/// case (lowercase first), then code points. Returns `Equal` only for
/// identical strings.
fn tertiary(a: &str, b: &str) -> Ordering {
    accent_pass(a, b)
        .then_with(|| case_pass(a, b))
        .then_with(|| a.cmp(b))
}

fn accent_pass(a: &str, b: &str) -> Ordering {
    a.chars()
        .zip(b.chars())
        .map(|(x, y)| (strip_accent(x) != x).cmp(&(strip_accent(y) != y)))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn case_pass(a: &str, b: &str) -> Ordering {
    a.chars()
        .zip(b.chars())
        .map(|(x, y)| x.is_uppercase().cmp(&y.is_uppercase()))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn strip_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'ç' => 'c',
        'Ç' => 'C',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => 'O',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        other => other,
    }
}

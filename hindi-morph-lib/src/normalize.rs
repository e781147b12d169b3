// Word normalisation and the Devanagari character classes the rule engine
// needs at morpheme boundaries.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// Format characters that only steer conjunct rendering.
const ZERO_WIDTH: &[char] = &['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Canonicalise a word before analysis.
///
/// Drops zero-width format characters, trims surrounding whitespace, composes
/// to NFC and collapses a combining mark typed twice in a row (e.g. a doubled
/// matra) into one. Nukta letters stay in their NFC shape (base + U+093C), so
/// precomposed and decomposed input compare equal.
///
/// The result is a fixed point: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(word: &str) -> String {
    let visible: String = word.chars().filter(|c| !ZERO_WIDTH.contains(c)).collect();
    let mut current: String = visible.trim().nfc().collect();
    loop {
        let collapsed = collapse_repeated_marks(&current);
        if collapsed.len() == current.len() {
            return current;
        }
        // Removing a mark can unblock a composition.
        current = collapsed.nfc().collect();
    }
}

fn collapse_repeated_marks(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if is_combining_mark(c) && prev == Some(c) {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Dependent vowel sign (matra).
pub(crate) fn is_vowel_sign(c: char) -> bool {
    matches!(c,
        '\u{093A}'..='\u{093B}'
        | '\u{093E}'..='\u{094C}'
        | '\u{094E}'..='\u{094F}'
        | '\u{0955}'..='\u{0957}'
        | '\u{0962}'..='\u{0963}')
}

/// Independent vowel letter.
pub(crate) fn is_independent_vowel(c: char) -> bool {
    matches!(c, '\u{0904}'..='\u{0914}' | '\u{0960}'..='\u{0961}' | '\u{0972}'..='\u{0977}')
}

/// Candrabindu, anusvara and visarga.
pub(crate) fn is_nasal_mark(c: char) -> bool {
    matches!(c, '\u{0900}'..='\u{0903}')
}

/// The independent letter written for a vowel sign (ि → इ).
pub(crate) fn independent_vowel(sign: char) -> Option<char> {
    let v = match sign {
        'ा' => 'आ',
        'ि' => 'इ',
        'ी' => 'ई',
        'ु' => 'उ',
        'ू' => 'ऊ',
        'ृ' => 'ऋ',
        '\u{0944}' => 'ॠ',
        '\u{0945}' => 'ऍ',
        '\u{0946}' => 'ऎ',
        'े' => 'ए',
        'ै' => 'ऐ',
        'ॉ' => 'ऑ',
        '\u{094A}' => 'ऒ',
        'ो' => 'ओ',
        'ौ' => 'औ',
        '\u{0962}' => 'ऌ',
        '\u{0963}' => 'ॡ',
        _ => return None,
    };
    Some(v)
}

/// True for strings made only of vowels and nasalisation marks, i.e. the
/// shape a vowel contraction can produce.
pub(crate) fn is_vocalic(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| is_vowel_sign(c) || is_independent_vowel(c) || is_nasal_mark(c))
}

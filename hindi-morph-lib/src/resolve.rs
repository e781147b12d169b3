// Dictionary confirmation of a candidate stem.

use log::trace;

use crate::dictionary::Dictionary;
use crate::types::RootInfo;

/// A candidate stem after dictionary lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub root: String,
    /// None when no dictionary entry was found.
    pub root_info: Option<RootInfo>,
    /// Trailing characters removed before the lookup succeeded.
    pub trimmed: usize,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        self.root_info.is_some()
    }
}

/// Look `candidate` up in the dictionary, dropping up to `max_trims` trailing
/// characters one at a time on a miss. An unknown stem is returned as its own
/// root with no metadata; that is a normal outcome, not an error.
pub fn resolve(candidate: &str, dict: &Dictionary, max_trims: usize) -> Resolution {
    let mut current = candidate;
    for trimmed in 0..=max_trims {
        if current.is_empty() {
            break;
        }
        if let Some(info) = dict.lookup(current) {
            if trimmed > 0 {
                trace!("{candidate:?} resolved as {current:?} after {trimmed} trim(s)");
            }
            return Resolution {
                root: current.to_string(),
                root_info: Some(info.clone()),
                trimmed,
            };
        }
        current = drop_last_char(current);
    }

    trace!("{candidate:?} not in dictionary");
    Resolution {
        root: candidate.to_string(),
        root_info: None,
        trimmed: 0,
    }
}

fn drop_last_char(s: &str) -> &str {
    match s.char_indices().next_back() {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dict() -> Dictionary {
        Dictionary::from_document(&json!({
            "पढ़": { "category": "verb", "meaning": "read" },
            "घर": { "category": "noun", "meaning": "house" }
        }))
        .unwrap()
    }

    #[test]
    fn test_exact_hit() {
        let r = resolve("घर", &dict(), 2);
        assert!(r.is_resolved());
        assert_eq!(r.root, "घर");
        assert_eq!(r.trimmed, 0);
    }

    #[test]
    fn test_one_trim() {
        // "पढ़े" → "पढ़"
        let r = resolve("पढ़े", &dict(), 2);
        assert_eq!(r.root, "पढ़");
        assert_eq!(r.trimmed, 1);
        assert_eq!(r.root_info.unwrap().meaning.as_deref(), Some("read"));
    }

    #[test]
    fn test_two_trims() {
        let r = resolve("घरों", &dict(), 2);
        assert_eq!(r.root, "घर");
        assert_eq!(r.trimmed, 2);
    }

    #[test]
    fn test_trim_bound() {
        // Three extra characters is one too many.
        let r = resolve("घरोंा", &dict(), 2);
        assert!(!r.is_resolved());
        assert_eq!(r.root, "घरोंा");
    }

    #[test]
    fn test_never_trims_to_empty() {
        let d = Dictionary::empty();
        let r = resolve("क", &d, 2);
        assert!(!r.is_resolved());
        assert_eq!(r.root, "क");
        assert!(!resolve("", &d, 2).is_resolved());
    }

    #[test]
    fn test_zero_trims() {
        let r = resolve("घरों", &dict(), 0);
        assert!(!r.is_resolved());
    }
}

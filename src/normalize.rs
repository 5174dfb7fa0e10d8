//! Text normalization for free-text performance signals.
//!
//! lowercase → strip everything that is not a letter, digit or whitespace →
//! collapse whitespace. Used for fuzzy category matching and for the
//! recommender's dedup key.

use once_cell::sync::OnceCell;
use regex::Regex;

/// Normalize a signal: `"  Black-Holes!! "` → `"blackholes"`.
pub fn normalize(s: &str) -> String {
    static RE_STRIP: OnceCell<Regex> = OnceCell::new();
    static RE_WS: OnceCell<Regex> = OnceCell::new();

    let re_strip = RE_STRIP.get_or_init(|| Regex::new(r"[^\p{L}\p{N}\s]+").expect("strip regex"));
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"));

    let lower = s.to_lowercase();
    let stripped = re_strip.replace_all(&lower, "");
    re_ws.replace_all(&stripped, " ").trim().to_string()
}

/// Either string contains the other. Empty strings never match.
pub fn contains_either(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

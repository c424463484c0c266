// src/core/sanitize.rs

/// Collapse every whitespace run (newlines, tabs, NBSP included) to one
/// space and trim both ends. Empty in, empty out.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Split on `delim`, trim each piece, drop empties.
pub fn split_segments(s: &str, delim: char) -> Vec<&str> {
    s.split(delim)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Cut to at most `max` chars (not bytes) and append `marker` when cut.
pub fn truncate_chars(s: &str, max: usize, marker: &str) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + marker.len());
            out.push_str(&s[..cut]);
            out.push_str(marker);
            out
        }
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(normalize_ws("  Начальная\n\t цена \u{a0} "), "Начальная цена");
        assert_eq!(normalize_ws(""), "");
        assert_eq!(normalize_ws(" \n\t "), "");
    }

    #[test]
    fn segments_are_trimmed_and_non_empty() {
        assert_eq!(
            split_segments("Адрес | | г. Москва |", '|'),
            vec!["Адрес", "г. Москва"]
        );
        assert!(split_segments(" | ", '|').is_empty());
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let cyr = "жжжжж";
        assert_eq!(truncate_chars(cyr, 5, "..."), "жжжжж");
        assert_eq!(truncate_chars(cyr, 3, "..."), "жжж...");
        assert_eq!(truncate_chars("", 3, "..."), "");
    }
}

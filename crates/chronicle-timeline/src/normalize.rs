//! Line-break normalization for sentence-style summaries.
//!
//! Summaries come back either with `<br>` markers already in place, or as a
//! run of numbered items (`1. … 2. … 3. …`). Both are rewritten into the same
//! canonical shape: trimmed segments joined by [`SEGMENT_SEPARATOR`].
//! Normalizing an already-normalized summary returns it unchanged.

use std::sync::LazyLock;

use regex::Regex;

/// HTML line-break marker.
pub const LINE_BREAK: &str = "<br>";

/// Separator between normalized segments.
pub const SEGMENT_SEPARATOR: &str = "<br> <br> ";

/// A numbered item marker.
///
/// At the start of a line the period may run straight into the item text
/// (`2.Second`); mid-line it must be followed by whitespace or end of text.
/// Neither form accepts a digit after the period, so `2.5` is never an item.
static NUMBERED_ITEM: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(\d+)\.(?:\D|$)|\b(\d+)\.(?:\s|$)"));

/// Normalize the line-break layout of a summary.
///
/// Never fails: if the numbered-item pattern cannot be used the raw text is
/// returned as-is.
pub fn normalize_summary(raw: &str) -> String {
    let text = if raw.contains(LINE_BREAK) {
        canonical_join(raw.split(LINE_BREAK)).unwrap_or_else(|| raw.to_string())
    } else {
        raw.to_string()
    };

    if text.contains(LINE_BREAK) {
        return text;
    }

    match NUMBERED_ITEM.as_ref() {
        Ok(pattern) => split_numbered(pattern, &text),
        Err(e) => {
            tracing::debug!(error = %e, "numbered item pattern unavailable, keeping summary as-is");
            text
        }
    }
}

/// Insert separators before every numbered item except item 1.
fn split_numbered(pattern: &Regex, text: &str) -> String {
    let cuts: Vec<usize> = pattern
        .captures_iter(text)
        .filter(|caps| {
            let number = caps.get(1).or_else(|| caps.get(2));
            number.and_then(|m| m.as_str().parse::<u64>().ok()) != Some(1)
        })
        .filter_map(|caps| caps.get(0).map(|m| m.start()))
        .filter(|&start| {
            text[..start]
                .chars()
                .next_back()
                .is_none_or(char::is_whitespace)
        })
        .collect();

    if cuts.is_empty() {
        return text.to_string();
    }

    let mut segments = Vec::with_capacity(cuts.len() + 1);
    let mut prev = 0;
    for cut in cuts {
        segments.push(&text[prev..cut]);
        prev = cut;
    }
    segments.push(&text[prev..]);

    canonical_join(segments.into_iter()).unwrap_or_else(|| text.to_string())
}

/// Trim segments, drop empty ones and join with [`SEGMENT_SEPARATOR`].
///
/// Returns `None` when nothing but whitespace remains.
fn canonical_join<'a>(segments: impl Iterator<Item = &'a str>) -> Option<String> {
    let kept: Vec<&str> = segments.map(str::trim).filter(|s| !s.is_empty()).collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join(SEGMENT_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_items_get_separators() {
        assert_eq!(
            normalize_summary("1. First. 2. Second. 3. Third."),
            "1. First.<br> <br> 2. Second.<br> <br> 3. Third."
        );
    }

    #[test]
    fn test_existing_markers_are_canonicalized() {
        assert_eq!(
            normalize_summary("1. A <br> 2. B <br> 3. C <br>"),
            "1. A<br> <br> 2. B<br> <br> 3. C"
        );
        assert_eq!(
            normalize_summary("One.<br><br>Two."),
            "One.<br> <br> Two."
        );
    }

    #[test]
    fn test_plain_text_unchanged() {
        let text = "The council approved the budget on Tuesday.";
        assert_eq!(normalize_summary(text), text);
    }

    #[test]
    fn test_decimal_numbers_are_not_items() {
        let text = "Rates rose 2.5 percent while 3.1 million jobs were added.";
        assert_eq!(normalize_summary(text), text);
    }

    #[test]
    fn test_number_inside_word_is_not_an_item() {
        let text = "Version v2. shipped today";
        assert_eq!(normalize_summary(text), text);
    }

    #[test]
    fn test_multiline_numbered_items() {
        assert_eq!(
            normalize_summary("1. Alpha.\n2. Beta.\n3. Gamma."),
            "1. Alpha.<br> <br> 2. Beta.<br> <br> 3. Gamma."
        );
    }

    #[test]
    fn test_line_start_items_without_space() {
        assert_eq!(
            normalize_summary("1.First\n2.Second\n3.Third"),
            "1.First<br> <br> 2.Second<br> <br> 3.Third"
        );
    }

    #[test]
    fn test_decimal_at_line_start_is_not_an_item() {
        let text = "Inflation was\n2.5 percent in May.";
        assert_eq!(normalize_summary(text), text);
    }

    #[test]
    fn test_only_markers_kept_raw() {
        assert_eq!(normalize_summary("<br> <br>"), "<br> <br>");
    }

    #[test]
    fn test_single_segment_after_markers_is_split_by_numbers() {
        assert_eq!(
            normalize_summary("1. A 2. B<br>"),
            "1. A<br> <br> 2. B"
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "1. First. 2. Second. 3. Third.",
            "1. A <br> 2. B <br> 3. C <br>",
            "1. A 2. B<br>",
            "1.First\n2.Second\n3.Third",
            " 2. Leading item ",
            "Plain sentence.",
            "<br>",
            "",
            "x<<br>br> y",
        ];
        for input in inputs {
            let once = normalize_summary(input);
            assert_eq!(normalize_summary(&once), once, "not idempotent for {input:?}");
        }
    }
}

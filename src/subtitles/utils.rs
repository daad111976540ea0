/// Byte order mark some editors put in front of subtitle files
const UTF8_BOM: char = '\u{FEFF}';

/// Strip a leading byte order mark, if any
pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix(UTF8_BOM).unwrap_or(text)
}

/// A line made only of digits is a cue sequence number
pub(crate) fn is_sequence_number(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit())
}

/// Whitespace-only lines separate cues and carry nothing
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Timestamp lines carry a `start --> end` range
pub(crate) fn is_time_range(line: &str) -> bool {
    line.contains("-->")
}

/// Whole-token match against whitespace-split text
pub(crate) fn contains_token(text: &str, word: &str) -> bool {
    text.split_whitespace().any(|token| token == word)
}

/// Capitalize the first character of every word.
///
/// Only whitespace starts a new word: `hello-world` becomes `Hello-world`,
/// not `Hello-World`. Words are re-joined with single spaces.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_are_digit_only_lines() {
        assert!(is_sequence_number("12"));
        assert!(is_sequence_number(" 7 "));
        assert!(!is_sequence_number("00:00:01,000 --> 00:00:02,000"));
        assert!(!is_sequence_number("12 monkeys"));
        assert!(!is_sequence_number(""));
    }

    #[test]
    fn time_ranges_need_an_arrow() {
        assert!(is_time_range("00:00:01,000 --> 00:00:02,000"));
        assert!(!is_time_range("10 minutes left."));
    }

    #[test]
    fn token_match_is_whole_word() {
        assert!(contains_token("over the hill", "the"));
        assert!(!contains_token("there it is", "the"));
        assert!(!contains_token("the, end", "the"));
    }

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("where is the  money"), "Where Is The Money");
        assert_eq!(title_case("élan vital"), "Élan Vital");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("hello-world o'neil"), "Hello-world O'neil");
    }

    #[test]
    fn bom_is_stripped_once() {
        assert_eq!(strip_bom("\u{FEFF}1\n"), "1\n");
        assert_eq!(strip_bom("1\n"), "1\n");
    }
}

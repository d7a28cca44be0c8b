//! Text helpers shared by the candidate write paths.

pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

const TITLE_CASE_EXCEPTIONS: [&str; 13] = [
    "in", "of", "and", "or", "the", "a", "an", "bin", "bint", "ibn", "ur", "al", "for",
];

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Title-cases a phrase, keeping connective words lowercase unless they
/// start or end the phrase. Hyphenated words are cased per segment.
pub fn to_standard_title_case(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let word_count = words.len();

    words
        .iter()
        .enumerate()
        .map(|(wi, word)| {
            let segments: Vec<&str> = word.split('-').collect();
            let segment_count = segments.len();
            segments
                .iter()
                .enumerate()
                .map(|(si, segment)| {
                    let is_first = wi == 0 && si == 0;
                    let is_last = wi == word_count - 1 && si == segment_count - 1;
                    if TITLE_CASE_EXCEPTIONS.contains(segment) && !is_first && !is_last {
                        segment.to_string()
                    } else {
                        capitalize(segment)
                    }
                })
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_cases_plain_phrases() {
        assert_eq!(to_standard_title_case("hired"), "Hired");
        assert_eq!(to_standard_title_case("  on hold  "), "On Hold");
    }

    #[test]
    fn keeps_connectives_lowercase_mid_phrase() {
        assert_eq!(to_standard_title_case("head of engineering"), "Head of Engineering");
        assert_eq!(to_standard_title_case("of counsel"), "Of Counsel");
    }

    #[test]
    fn cases_hyphen_segments() {
        assert_eq!(to_standard_title_case("follow-up call"), "Follow-Up Call");
    }
}

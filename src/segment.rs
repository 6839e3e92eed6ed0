//! Sentence segmentation.
//!
//! Splits normalized text into trimmed, non-empty sentence strings on
//! terminator runs (`.`, `!`, `?`). This is a heuristic boundary scanner,
//! not a linguistic one: abbreviations, decimals, and quotes are not
//! special-cased, and consecutive terminators fold into one boundary.

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            in_space = true;
        } else {
            if in_space && !out.is_empty() {
                out.push(' ');
            }
            in_space = false;
            out.push(ch);
        }
    }
    out
}

/// Split text into sentences.
///
/// A sentence is a maximal run of non-terminator characters followed by one
/// or more terminators; a trailing run with no terminator is kept as a final
/// sentence. Input is whitespace-normalized first, and every returned
/// element is trimmed and non-empty — bare terminator runs with no body
/// attach to no sentence and are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let normalized = normalize_whitespace(text);
    let chars: Vec<char> = normalized.chars().collect();
    let mut sentences = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        // Skip whitespace and terminators that precede any sentence body.
        while i < chars.len() && (is_terminator(chars[i]) || chars[i].is_whitespace()) {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }
        let start = i;
        // Body: everything up to the next terminator.
        while i < chars.len() && !is_terminator(chars[i]) {
            i += 1;
        }
        // The full terminator run belongs to this sentence.
        while i < chars.len() && is_terminator(chars[i]) {
            i += 1;
        }
        let sentence: String = chars[start..i].iter().collect();
        let trimmed = sentence.trim();
        if !trimmed.is_empty() {
            sentences.push(trimmed.to_string());
        }
    }

    sentences
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminators() {
        let s = split_sentences("Hello world. How are you? Fine!");
        assert_eq!(s, vec!["Hello world.", "How are you?", "Fine!"]);
    }

    #[test]
    fn trailing_unterminated_run_is_a_sentence() {
        let s = split_sentences("First one. and then a fragment");
        assert_eq!(s, vec!["First one.", "and then a fragment"]);
    }

    #[test]
    fn consecutive_terminators_fold_into_boundary() {
        let s = split_sentences("Wait... really?! Yes.");
        assert_eq!(s, vec!["Wait...", "really?!", "Yes."]);
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(normalize_whitespace("  a\n\tb   c  "), "a b c");
        let s = split_sentences("One.\n\n\nTwo.\t Three.");
        assert_eq!(s, vec!["One.", "Two.", "Three."]);
    }

    #[test]
    fn empty_and_punctuation_only_inputs() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n\t ").is_empty());
        assert!(split_sentences("...!?.").is_empty());
    }

    #[test]
    fn no_element_is_empty() {
        let inputs = ["a. . b.", "?start. end", "x", ". . ."];
        for input in inputs {
            for sentence in split_sentences(input) {
                assert!(!sentence.trim().is_empty(), "empty sentence from {:?}", input);
            }
        }
    }

    #[test]
    fn leading_terminators_attach_to_nothing() {
        let s = split_sentences("?start. end");
        assert_eq!(s, vec!["start.", "end"]);
    }

    #[test]
    fn joined_output_preserves_non_whitespace_content() {
        let input = "Alpha beta.  Gamma!   Delta epsilon";
        let joined = split_sentences(input).join(" ");
        assert_eq!(joined, normalize_whitespace(input));
    }
}

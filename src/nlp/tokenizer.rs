//! Sentence and word tokenization
//!
//! A rule-based splitter for whitespace/punctuation tokenizable text. Sentence
//! boundaries are terminal punctuation followed by whitespace (or the end of
//! the text) and blank lines. Periods after known abbreviations and single
//! capital initials do not end a sentence.

use rustc_hash::FxHashSet;

/// Abbreviations whose trailing period is not a sentence boundary (lowercase,
/// without the final period)
const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "e.g", "i.e", "etc", "vs",
];

/// Rule-based sentence and word tokenizer
#[derive(Debug, Clone)]
pub struct Tokenizer {
    abbreviations: FxHashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a tokenizer with the default abbreviation list
    pub fn new() -> Self {
        Self {
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add abbreviations (given without their final period)
    pub fn with_abbreviations(mut self, abbreviations: &[&str]) -> Self {
        for abbr in abbreviations {
            self.abbreviations
                .insert(abbr.trim_end_matches('.').to_lowercase());
        }
        self
    }

    /// Split text into trimmed, non-empty sentences in document order
    pub fn tokenize_sentences(&self, text: &str) -> Vec<String> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (pos, ch) = chars[i];

            if ch == '\n' {
                // A blank line always closes the current sentence
                let mut j = i + 1;
                let mut newlines = 1;
                while j < chars.len() && chars[j].1.is_whitespace() {
                    if chars[j].1 == '\n' {
                        newlines += 1;
                    }
                    j += 1;
                }
                if newlines >= 2 {
                    push_sentence(&mut sentences, &text[start..pos]);
                    start = chars.get(j).map_or(text.len(), |&(p, _)| p);
                    i = j;
                    continue;
                }
                i += 1;
                continue;
            }

            if is_terminator(ch) {
                // Absorb runs like "?!" and closing quotes or brackets
                let mut j = i + 1;
                while j < chars.len() && (is_terminator(chars[j].1) || is_closer(chars[j].1)) {
                    j += 1;
                }

                let at_end = j == chars.len();
                let before_space = !at_end && chars[j].1.is_whitespace();
                let lone_period = ch == '.' && !chars[i + 1..j].iter().any(|&(_, c)| is_terminator(c));

                if (at_end || before_space) && !(lone_period && self.is_abbreviation(text, pos)) {
                    let end = chars.get(j).map_or(text.len(), |&(p, _)| p);
                    push_sentence(&mut sentences, &text[start..end]);
                    start = end;
                }

                i = j;
                continue;
            }

            i += 1;
        }

        push_sentence(&mut sentences, &text[start..]);
        sentences
    }

    /// Split a sentence into lowercase word tokens with punctuation stripped.
    ///
    /// Apostrophes and hyphens inside a word are kept ("don't", "state-of-the-art").
    pub fn tokenize_words(&self, sentence: &str) -> Vec<String> {
        sentence
            .split(|c: char| c.is_whitespace() || is_word_delimiter(c))
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase())
            .collect()
    }

    /// Check whether the word ending right before byte offset `period` is an
    /// abbreviation or a single capital initial
    fn is_abbreviation(&self, text: &str, period: usize) -> bool {
        let head = &text[..period];
        let word_start = head
            .char_indices()
            .rev()
            .find(|&(_, c)| !(c.is_alphanumeric() || c == '.'))
            .map_or(0, |(p, c)| p + c.len_utf8());
        let word = &head[word_start..];
        if word.is_empty() {
            return false;
        }

        // "J.K" and "U.S": the letter right before the period is an initial
        let last_segment = word.rsplit('.').next().unwrap_or(word);
        if is_capital_initial(last_segment) {
            return true;
        }

        self.abbreviations.contains(&word.to_lowercase())
    }
}

fn is_capital_initial(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!((chars.next(), chars.next()), (Some(first), None) if first.is_uppercase())
}

fn push_sentence(sentences: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '’' | '”' | '»')
}

fn is_word_delimiter(c: char) -> bool {
    !c.is_alphanumeric() && !matches!(c, '\'' | '’' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_sentences() {
        let tokenizer = Tokenizer::new();
        let sentences =
            tokenizer.tokenize_sentences("Rust is fast. It is also safe! Do you agree?");

        assert_eq!(
            sentences,
            vec!["Rust is fast.", "It is also safe!", "Do you agree?"]
        );
    }

    #[test]
    fn test_final_sentence_without_terminator() {
        let tokenizer = Tokenizer::new();
        let sentences = tokenizer.tokenize_sentences("First one. And a trailing fragment");

        assert_eq!(sentences, vec!["First one.", "And a trailing fragment"]);
    }

    #[test]
    fn test_title_abbreviations_do_not_split() {
        let tokenizer = Tokenizer::new();
        let sentences =
            tokenizer.tokenize_sentences("Mr. Smith met Dr. Jones today. They talked.");

        assert_eq!(
            sentences,
            vec!["Mr. Smith met Dr. Jones today.", "They talked."]
        );
    }

    #[test]
    fn test_single_capital_initial_does_not_split() {
        let tokenizer = Tokenizer::new();
        let sentences = tokenizer.tokenize_sentences("J. K. Rowling wrote books. Many read them.");

        assert_eq!(
            sentences,
            vec!["J. K. Rowling wrote books.", "Many read them."]
        );
    }

    #[test]
    fn test_dotted_initials_do_not_split() {
        let tokenizer = Tokenizer::new();

        assert_eq!(
            tokenizer.tokenize_sentences("J.K. Rowling wrote books. Many read them."),
            vec!["J.K. Rowling wrote books.", "Many read them."]
        );
        assert_eq!(
            tokenizer.tokenize_sentences("The U.S. economy grew. Prices rose."),
            vec!["The U.S. economy grew.", "Prices rose."]
        );
        assert_eq!(
            tokenizer.tokenize_sentences("She moved to Washington D.C. last year. It rained."),
            vec!["She moved to Washington D.C. last year.", "It rained."]
        );
    }

    #[test]
    fn test_lowercase_dotted_word_still_splits() {
        let tokenizer = Tokenizer::new();
        let sentences = tokenizer.tokenize_sentences("Visit example.com. It loads fast.");

        assert_eq!(sentences, vec!["Visit example.com.", "It loads fast."]);
    }

    #[test]
    fn test_latin_abbreviations_do_not_split() {
        let tokenizer = Tokenizer::new();
        let sentences =
            tokenizer.tokenize_sentences("Use tools, e.g. hammers and saws. Then rest.");

        assert_eq!(
            sentences,
            vec!["Use tools, e.g. hammers and saws.", "Then rest."]
        );
    }

    #[test]
    fn test_inner_periods_do_not_split() {
        let tokenizer = Tokenizer::new();
        let sentences = tokenizer.tokenize_sentences("Pi is 3.14 roughly. See example.com now.");

        assert_eq!(sentences, vec!["Pi is 3.14 roughly.", "See example.com now."]);
    }

    #[test]
    fn test_closing_quotes_stay_with_sentence() {
        let tokenizer = Tokenizer::new();
        let sentences = tokenizer.tokenize_sentences("He said \"stop.\" Then he left.");

        assert_eq!(sentences, vec!["He said \"stop.\"", "Then he left."]);
    }

    #[test]
    fn test_blank_line_is_a_boundary() {
        let tokenizer = Tokenizer::new();
        let sentences = tokenizer.tokenize_sentences("A heading\n\nBody text follows here.");

        assert_eq!(sentences, vec!["A heading", "Body text follows here."]);
    }

    #[test]
    fn test_single_newline_is_not_a_boundary() {
        let tokenizer = Tokenizer::new();
        let sentences = tokenizer.tokenize_sentences("A wrapped\nline of text.");

        assert_eq!(sentences, vec!["A wrapped\nline of text."]);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        let tokenizer = Tokenizer::new();

        assert!(tokenizer.tokenize_sentences("").is_empty());
        assert!(tokenizer.tokenize_sentences("   \n\t  ").is_empty());
        assert!(tokenizer.tokenize_sentences("...").len() <= 1);
    }

    #[test]
    fn test_custom_abbreviation() {
        let tokenizer = Tokenizer::new().with_abbreviations(&["approx."]);
        let sentences = tokenizer.tokenize_sentences("It weighs approx. ten kilos. Heavy.");

        assert_eq!(sentences, vec!["It weighs approx. ten kilos.", "Heavy."]);
    }

    #[test]
    fn test_tokenize_words_strips_punctuation() {
        let tokenizer = Tokenizer::new();
        let words = tokenizer.tokenize_words("Hello, World! (Rust) is \"great\".");

        assert_eq!(words, vec!["hello", "world", "rust", "is", "great"]);
    }

    #[test]
    fn test_tokenize_words_keeps_inner_apostrophes_and_hyphens() {
        let tokenizer = Tokenizer::new();
        let words = tokenizer.tokenize_words("Don't use state-of-the-art 'tools' -- ever.");

        assert_eq!(
            words,
            vec!["don't", "use", "state-of-the-art", "tools", "ever"]
        );
    }

    #[test]
    fn test_tokenize_words_empty() {
        let tokenizer = Tokenizer::new();

        assert!(tokenizer.tokenize_words("").is_empty());
        assert!(tokenizer.tokenize_words(" ... !!! ").is_empty());
    }
}

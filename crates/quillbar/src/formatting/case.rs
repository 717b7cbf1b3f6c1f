//! Sentence, word, and character case transforms.
//!
//! All transforms rewrite the selected text in place and are
//! character-count-preserving, so same-length replacement keeps every
//! per-character attribute aligned with its character. Case mappings that
//! would change a character's length (e.g. 'ß' uppercasing to "SS") are
//! left unchanged.

use regex::Regex;

use crate::buffer::AttributedBuffer;
use crate::error::FormatError;
use crate::formatting::batch::BatchScope;

/// Pattern matching sentence-like spans: the shortest run of text starting
/// at a non-whitespace character and ending at `.`, `!`, or `?`, or running
/// to the end of the input.
const SENTENCE_PATTERN: &str = r"(\S.+?[.!?])|(\S.+)";

/// Pattern matching words: maximal runs of non-whitespace characters.
const WORD_PATTERN: &str = r"\S+";

/// The case transform requested from the toolbar menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    /// Uppercase the first character of each sentence.
    SentenceStart,
    /// Uppercase the entire selection.
    AllUpper,
    /// Lowercase the entire selection.
    AllLower,
    /// Flip the case of every character individually.
    ToggleEachChar,
    /// Uppercase the first character of each word.
    TitleEachWord,
}

/// Tokenizing case transformer.
///
/// Holds the compiled sentence and word patterns; build one per controller
/// and reuse it.
#[derive(Debug)]
pub struct CaseTransformer {
    sentence: Regex,
    word: Regex,
}

impl CaseTransformer {
    /// Compile the tokenization patterns.
    pub fn new() -> Self {
        Self {
            // Both patterns are fixed and known-good.
            sentence: Regex::new(SENTENCE_PATTERN).expect("sentence pattern compiles"),
            word: Regex::new(WORD_PATTERN).expect("word pattern compiles"),
        }
    }

    /// Apply `mode` to the current selection.
    ///
    /// An empty selection is a no-op for every mode. The original selection
    /// is restored afterwards (all transforms preserve character counts).
    /// Returns `true` if the document was modified.
    pub fn transform<B: AttributedBuffer>(&self, buffer: &mut B, mode: CaseMode) -> bool {
        let selection = buffer.selection();
        if selection.is_empty() {
            tracing::debug!(
                target: "quillbar::case",
                error = %FormatError::NoOpSelection,
                "case transform skipped"
            );
            return false;
        }

        let text = buffer.text_in(selection.range());
        let modified = match mode {
            CaseMode::AllUpper => self.rewrite_whole(buffer, &text, upper_char),
            CaseMode::AllLower => self.rewrite_whole(buffer, &text, lower_char),
            CaseMode::SentenceStart => self.upcase_token_starts(buffer, &text, &self.sentence),
            CaseMode::TitleEachWord => self.upcase_token_starts(buffer, &text, &self.word),
            CaseMode::ToggleEachChar => self.flip_each_char(buffer, &text),
        };

        buffer.set_selection(selection);

        tracing::trace!(
            target: "quillbar::case",
            ?mode,
            chars = selection.len,
            modified,
            "case transform"
        );
        modified
    }

    /// Replace the entire selection with a per-character mapping in one
    /// write.
    fn rewrite_whole<B: AttributedBuffer>(
        &self,
        buffer: &mut B,
        text: &str,
        map: fn(char) -> char,
    ) -> bool {
        let selection = buffer.selection();
        let replaced: String = text.chars().map(map).collect();
        if replaced == text {
            return false;
        }
        buffer.replace_range(selection.range(), &replaced);
        true
    }

    /// Uppercase the first character of every token the pattern finds.
    fn upcase_token_starts<B: AttributedBuffer>(
        &self,
        buffer: &mut B,
        text: &str,
        pattern: &Regex,
    ) -> bool {
        let selection = buffer.selection();
        let mut modified = false;

        let mut scope = BatchScope::new(buffer);
        for token in pattern.find_iter(text) {
            let Some(first) = text[token.start()..].chars().next() else {
                continue;
            };
            let upper = upper_char(first);
            if upper == first {
                continue;
            }
            // Token positions are byte offsets into the selected text;
            // buffer writes take character offsets.
            let offset = text[..token.start()].chars().count();
            let at = selection.start + offset;
            scope.replace_range(at..at + 1, &upper.to_string());
            modified = true;
        }
        drop(scope);

        modified
    }

    /// Flip the case of every character individually.
    fn flip_each_char<B: AttributedBuffer>(&self, buffer: &mut B, text: &str) -> bool {
        let selection = buffer.selection();
        let mut modified = false;

        let mut scope = BatchScope::new(buffer);
        for (offset, ch) in text.chars().enumerate() {
            let flipped = if ch.is_uppercase() {
                lower_char(ch)
            } else {
                upper_char(ch)
            };
            if flipped == ch {
                continue;
            }
            let at = selection.start + offset;
            scope.replace_range(at..at + 1, &flipped.to_string());
            modified = true;
        }
        drop(scope);

        modified
    }
}

impl Default for CaseTransformer {
    fn default() -> Self {
        Self::new()
    }
}

/// Uppercase a character if its mapping is exactly one character.
fn upper_char(ch: char) -> char {
    let mut mapped = ch.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(upper), None) => upper,
        _ => ch,
    }
}

/// Lowercase a character if its mapping is exactly one character.
fn lower_char(ch: char) -> char {
    let mut mapped = ch.to_lowercase();
    match (mapped.next(), mapped.next()) {
        (Some(lower), None) => lower,
        _ => ch,
    }
}

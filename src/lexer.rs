//! Tokenizer for the command line handed over by the context-menu shell extension.
//!
//! The shell extension encloses every path in double quotes. Paths cannot contain double
//! quotes, so there is no escaping: a `"` always opens or closes a quote scope.

const QUOTE: char = '"';
const SEPARATOR: char = ' ';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Outside,
    InsideQuote,
}

struct LexingFSM {
    state: LexingState,
    buffer: String,
    tokens: Vec<String>,
}

impl LexingFSM {
    fn new() -> Self {
        LexingFSM {
            state: LexingState::Outside,
            buffer: String::new(),
            tokens: Vec::new(),
        }
    }

    /// Feeds every character of `line` through the state machine.
    ///
    /// An unterminated quote at the end of input is dropped silently, whatever sits in the
    /// buffer at that point is not flushed.
    fn make_tokens(mut self, line: &str) -> Vec<String> {
        for ch in line.chars() {
            match (self.state, ch) {
                (LexingState::Outside, QUOTE) => self.state = LexingState::InsideQuote,
                (LexingState::InsideQuote, QUOTE) => self.state = LexingState::Outside,
                (LexingState::Outside, SEPARATOR) => self.flush(),
                (_, c) => self.buffer.push(c),
            }
        }
        self.tokens
    }

    fn flush(&mut self) {
        // Consecutive separators and empty quotes never produce empty tokens.
        if !self.buffer.is_empty() {
            self.tokens.push(std::mem::take(&mut self.buffer));
        }
    }
}

/// Splits a raw command line into tokens with the surrounding quotes removed.
///
/// Only the space character separates tokens, and only outside of a quote scope.
///
/// ```
/// use genie_cmd::lexer::split_into_tokens;
/// let tokens = split_into_tokens(r#"-CopyFile "C:\My Files\" "a b.txt""#);
/// assert_eq!(tokens, vec!["-CopyFile", r"C:\My Files\", "a b.txt"]);
/// ```
pub fn split_into_tokens(line: &str) -> Vec<String> {
    let mut line = line.trim().to_string();
    if !line.is_empty() {
        // Terminating separator so the last token gets flushed.
        line.push(SEPARATOR);
    }
    LexingFSM::new().make_tokens(&line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_option_and_quoted_filenames() {
        let tokens = split_into_tokens(r#"-option1 "D:\" "file1.txt" "file with space1.txt""#);
        assert_eq!(
            tokens,
            vec!["-option1", r"D:\", "file1.txt", "file with space1.txt"]
        );
    }

    #[test]
    fn empty_command_line_has_no_tokens() {
        assert!(split_into_tokens("").is_empty());
        assert!(split_into_tokens("   ").is_empty());
    }

    #[test]
    fn option_only() {
        assert_eq!(split_into_tokens("-option1"), vec!["-option1"]);
    }

    #[test]
    fn ignores_empty_parameters() {
        let tokens = split_into_tokens(r#" -option1  "abc" ""   "def" "#);
        assert_eq!(tokens, vec!["-option1", "abc", "def"]);
    }

    #[test]
    fn unquoted_input_splits_on_runs_of_spaces() {
        let line = "a  bb   ccc d";
        let expected: Vec<&str> = line.split(' ').filter(|s| !s.is_empty()).collect();
        assert_eq!(split_into_tokens(line), expected);
    }

    #[test]
    fn quote_inside_word_is_removed() {
        assert_eq!(
            split_into_tokens(r#"C:\"Program Files"\x"#),
            vec![r"C:\Program Files\x"]
        );
    }

    #[test]
    fn unterminated_quote_is_tolerated() {
        assert_eq!(split_into_tokens(r#"first "second third"#), vec!["first"]);
    }

    #[test]
    fn tab_is_an_ordinary_character() {
        assert_eq!(split_into_tokens("a\tb c"), vec!["a\tb", "c"]);
    }
}

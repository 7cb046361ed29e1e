//! Vocabulary extraction from generated free-form text.
//!
//! Text-generation models return word lists in a handful of loose shapes:
//! ```text
//! 1. hola - hello
//! - perro: dog
//! • casa – house
//! ```
//! Each line is stripped of its list prefix and split on the first recognized
//! delimiter. Lines without a delimiter are dropped.

use serde::{Deserialize, Serialize};

/// List bullets removed from the start of a line.
const BULLETS: [&str; 3] = ["- ", "* ", "• "];

/// Word/meaning delimiters in priority order.
const DELIMITERS: [&str; 3] = [":", " - ", " – "];

/// Emphasis markers removed when [`ParseOptions::strip_markdown`] is set.
const MARKDOWN_MARKERS: [&str; 3] = ["**", "__", "`"];

/// A word in the target language paired with its meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VocabItem {
    pub word: String,
    pub meaning: String,
}

impl VocabItem {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
        }
    }
}

/// Parser knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Remove `**`, `__` and backtick emphasis before looking for a delimiter.
    pub strip_markdown: bool,
}

/// Parse raw text into vocabulary items, in the order they appear.
///
/// Never fails: lines that don't look like `word <delimiter> meaning` are skipped,
/// so the result may be empty.
pub fn parse_vocabulary(raw_text: &str) -> Vec<VocabItem> {
    parse_vocabulary_with(raw_text, &ParseOptions::default())
}

/// Parse raw text into vocabulary items using explicit options.
pub fn parse_vocabulary_with(raw_text: &str, options: &ParseOptions) -> Vec<VocabItem> {
    let items: Vec<VocabItem> = raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| parse_line(line, options))
        .collect();

    log::debug!("parsed {} vocabulary items", items.len());
    items
}

fn parse_line(line: &str, options: &ParseOptions) -> Option<VocabItem> {
    let body = strip_number(strip_bullet(line));

    let body = if options.strip_markdown {
        MARKDOWN_MARKERS
            .iter()
            .fold(body.to_string(), |acc, marker| acc.replace(marker, ""))
    } else {
        body.to_string()
    };

    let Some((word, meaning)) = DELIMITERS
        .iter()
        .find_map(|delim| body.split_once(delim))
    else {
        log::debug!("no delimiter, skipping line: {line:?}");
        return None;
    };

    let (word, meaning) = (word.trim(), meaning.trim());
    if word.is_empty() || meaning.is_empty() {
        log::debug!("empty word or meaning, skipping line: {line:?}");
        return None;
    }

    Some(VocabItem::new(word, meaning))
}

fn strip_bullet(line: &str) -> &str {
    BULLETS
        .iter()
        .find_map(|bullet| line.strip_prefix(bullet))
        .unwrap_or(line)
}

/// Strip a `"1. "` style prefix when `". "` shows up within the first five characters.
fn strip_number(line: &str) -> &str {
    if !line.starts_with(|c: char| c.is_ascii_digit()) {
        return line;
    }

    let head_end = line
        .char_indices()
        .nth(5)
        .map_or(line.len(), |(idx, _)| idx);

    match line[..head_end].find(". ") {
        Some(pos) => &line[pos + 2..],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(items: &[VocabItem]) -> Vec<(&str, &str)> {
        items
            .iter()
            .map(|i| (i.word.as_str(), i.meaning.as_str()))
            .collect()
    }

    #[test]
    fn parse_empty_text() {
        assert!(parse_vocabulary("").is_empty());
        assert!(parse_vocabulary("\n\n   \n").is_empty());
    }

    #[test]
    fn drop_line_without_delimiter() {
        assert!(parse_vocabulary("just a sentence with no delimiter").is_empty());
        assert!(parse_vocabulary("bien-estar").is_empty());
    }

    #[test]
    fn strip_numbered_prefix() {
        let items = parse_vocabulary("1. gato - cat");
        assert_eq!(items, vec![VocabItem::new("gato", "cat")]);

        let items = parse_vocabulary("10. diez - ten");
        assert_eq!(pairs(&items), vec![("diez", "ten")]);
    }

    #[test]
    fn number_prefix_only_within_five_chars() {
        let items = parse_vocabulary("12345. foo: bar");
        assert_eq!(pairs(&items), vec![("12345. foo", "bar")]);
    }

    #[test]
    fn strip_bullets() {
        let text = "- perro: dog\n* gato: cat\n• casa – house";
        let items = parse_vocabulary(text);
        assert_eq!(
            pairs(&items),
            vec![("perro", "dog"), ("gato", "cat"), ("casa", "house")]
        );
    }

    #[test]
    fn bullet_then_number() {
        let items = parse_vocabulary("- 3. libro - book");
        assert_eq!(pairs(&items), vec![("libro", "book")]);
    }

    #[test]
    fn colon_takes_priority() {
        let items = parse_vocabulary("reloj: clock - watch");
        assert_eq!(pairs(&items), vec![("reloj", "clock - watch")]);
    }

    #[test]
    fn split_on_first_occurrence() {
        let items = parse_vocabulary("a - b - c\nx: y: z");
        assert_eq!(pairs(&items), vec![("a", "b - c"), ("x", "y: z")]);
    }

    #[test]
    fn preserve_order_and_skip_noise() {
        let text = "Here is your list:\n\n1. hola - hello\nSome filler\n2. adios - goodbye\r\n3. gracias - thank you\n";
        let items = parse_vocabulary(text);
        assert_eq!(
            pairs(&items),
            vec![("hola", "hello"), ("adios", "goodbye"), ("gracias", "thank you")]
        );
    }

    #[test]
    fn drop_empty_fields() {
        assert!(parse_vocabulary("gato:").is_empty());
        assert!(parse_vocabulary(": cat").is_empty());
        assert!(parse_vocabulary("- ").is_empty());
        assert!(parse_vocabulary("1. ").is_empty());
    }

    #[test]
    fn non_ascii_lines() {
        let items = parse_vocabulary("1. 猫 - cat\n2. 日本語: Japanese");
        assert_eq!(pairs(&items), vec![("猫", "cat"), ("日本語", "Japanese")]);
    }

    #[test]
    fn markdown_left_alone_by_default() {
        let items = parse_vocabulary("1. **hola** - hello");
        assert_eq!(pairs(&items), vec![("**hola**", "hello")]);
    }

    #[test]
    fn markdown_stripped_when_enabled() {
        let options = ParseOptions { strip_markdown: true };
        let items = parse_vocabulary_with("1. **hola** - hello\n- `perro`: __dog__", &options);
        assert_eq!(pairs(&items), vec![("hola", "hello"), ("perro", "dog")]);
    }
}

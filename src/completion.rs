use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

/// Trigger symbol to candidate completions, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<String>>")]
pub struct Autocompletions(BTreeMap<char, Vec<String>>);

impl Autocompletions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, symbol: char, candidates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.0.insert(symbol, candidates.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_trigger(&self, symbol: char) -> bool {
        self.0.contains_key(&symbol)
    }

    pub fn candidates(&self, symbol: char) -> Option<&[String]> {
        self.0.get(&symbol).map(Vec::as_slice)
    }

    pub fn triggers(&self) -> impl Iterator<Item = char> + '_ {
        self.0.keys().copied()
    }
}

impl From<BTreeMap<String, Vec<String>>> for Autocompletions {
    fn from(raw: BTreeMap<String, Vec<String>>) -> Self {
        let mut table = BTreeMap::new();
        for (key, candidates) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(symbol), None) => {
                    table.insert(symbol, candidates);
                },
                _ => log::warn!("skipping trigger {key:?}: a trigger must be a single character"),
            }
        }
        Self(table)
    }
}

fn trailing_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\S+$").expect("valid regex"))
}

fn trailing_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+$").expect("valid regex"))
}

/// Byte offset of the `caret`-th char, clamped to the end of `text`.
pub fn byte_offset(text: &str, caret: usize) -> usize {
    text.char_indices().nth(caret).map_or(text.len(), |(i, _)| i)
}

/// The run of non-whitespace ending at the caret, extended by the char under
/// the caret unless that one is whitespace.
pub fn current_word(text: &str, caret: usize) -> &str {
    word_match(text, caret).map_or("", |m| m.as_str())
}

/// Char index where `current_word` starts, or the caret when there is none.
pub fn current_word_start(text: &str, caret: usize) -> usize {
    match word_match(text, caret) {
        Some(m) => text[..m.start()].chars().count(),
        None => caret.min(text.chars().count()),
    }
}

fn word_match(text: &str, caret: usize) -> Option<regex::Match<'_>> {
    let cut = byte_offset(text, caret);
    let head = match text[cut..].chars().next() {
        Some(next) if !next.is_whitespace() => &text[..cut + next.len_utf8()],
        _ => &text[..cut],
    };
    trailing_token().find(head)
}

pub fn suggestions(table: &Autocompletions, text: &str, caret: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut chars = current_word(text, caret).chars();
    let Some(candidates) = chars.next().and_then(|symbol| table.candidates(symbol)) else {
        return Vec::new();
    };

    let typed = chars.as_str().to_lowercase();
    candidates
        .iter()
        .filter(|candidate| candidate.to_lowercase().starts_with(&typed))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub value: String,
    pub caret: usize,
}

/// Puts `item` into `text` at `caret`, either right after a trigger symbol
/// or over the token being typed.
pub fn splice(table: &Autocompletions, text: &str, caret: usize, item: &str) -> Splice {
    let (head, tail) = text.split_at(byte_offset(text, caret));

    let start = if head.chars().next_back().is_some_and(|c| table.is_trigger(c)) {
        head.len()
    } else {
        token_start(table, head)
    };

    let mut value = String::with_capacity(start + item.len() + tail.len());
    value.push_str(&head[..start]);
    value.push_str(item);
    let caret = value.chars().count();
    value.push_str(tail);

    Splice{value, caret}
}

// Start of the text that a completion overwrites: whatever follows the
// trigger of the trailing token, else the trailing word.
fn token_start(table: &Autocompletions, head: &str) -> usize {
    if let Some(token) = trailing_token().find(head) {
        if let Some(symbol) = token.as_str().chars().next().filter(|&c| table.is_trigger(c)) {
            return token.start() + symbol.len_utf8();
        }
    }
    trailing_word().find(head).map_or(head.len(), |m| m.start())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Autocompletions {
        Autocompletions::new()
            .with('@', ["Fouquet’s", "Dunkin' Donuts", "Walmart"])
            .with('#', ["DinnerWithFriends", "BreakfastAtWork", "Grosseries"])
    }

    #[test]
    fn empty_text_has_no_suggestions() {
        assert!(suggestions(&table(), "", 0).is_empty());
    }

    #[test]
    fn bare_trigger_offers_everything() {
        assert_eq!(suggestions(&table(), "@", 1), vec!["Fouquet’s", "Dunkin' Donuts", "Walmart"]);
    }

    #[test]
    fn prefix_filter_ignores_case() {
        assert_eq!(suggestions(&table(), "@wal", 4), vec!["Walmart"]);
        assert_eq!(suggestions(&table(), "#BREAK", 6), vec!["BreakfastAtWork"]);
    }

    #[test]
    fn filter_is_a_prefix_not_a_substring() {
        assert!(suggestions(&table(), "@mart", 5).is_empty());
    }

    #[test]
    fn unknown_trigger_has_no_suggestions() {
        assert!(suggestions(&table(), "$wal", 4).is_empty());
        assert!(suggestions(&table(), "hello wal", 9).is_empty());
    }

    #[test]
    fn only_the_trailing_word_matters() {
        let a = suggestions(&table(), "lunch at @du", 12);
        let b = suggestions(&table(), "@du", 3);
        assert_eq!(a, b);
        assert_eq!(a, vec!["Dunkin' Donuts"]);
    }

    #[test]
    fn word_takes_the_char_under_the_caret() {
        assert_eq!(current_word("@wal mart", 3), "@wal");
        assert_eq!(current_word("@wal mart", 4), "@wal");
        assert_eq!(current_word("@wal mart", 5), "m");
        assert_eq!(suggestions(&table(), "@wal mart", 4), vec!["Walmart"]);
    }

    #[test]
    fn caret_before_a_space_still_completes() {
        assert_eq!(current_word("paid @wal for", 9), "@wal");
        assert_eq!(suggestions(&table(), "paid @wal for", 9), vec!["Walmart"]);
        assert_eq!(current_word("paid @wal for", 10), "f");
        assert!(suggestions(&table(), "paid @wal for", 10).is_empty());
    }

    #[test]
    fn word_start_is_counted_in_chars() {
        assert_eq!(current_word_start("x @walmart", 5), 2);
        assert_eq!(current_word_start("café @fou", 9), 5);
        assert_eq!(current_word_start("@wal ", 5), 5);
        assert_eq!(current_word_start("", 3), 0);
    }

    #[test]
    fn caret_past_end_is_clamped() {
        assert_eq!(current_word("#din", 42), "#din");
    }

    #[test]
    fn word_after_whitespace_is_empty() {
        assert_eq!(current_word("@wal ", 5), "");
    }

    #[test]
    fn splice_after_trigger_inserts() {
        let out = splice(&table(), "buy @ now", 5, "Walmart");
        assert_eq!(out, Splice{value: "buy @Walmart now".to_string(), caret: 12});
    }

    #[test]
    fn splice_overwrites_the_typed_token() {
        let out = splice(&table(), "@wal", 4, "Walmart");
        assert_eq!(out.value, "@Walmart");
        assert_eq!(out.caret, 8);
    }

    #[test]
    fn splice_keeps_the_text_after_the_caret() {
        let out = splice(&table(), "at @wal today", 7, "Walmart");
        assert_eq!(out.value, "at @Walmart today");
        assert_eq!(out.caret, 11);
    }

    #[test]
    fn splice_overwrites_punctuated_tokens() {
        let out = splice(&table(), "@dunkin'", 8, "Dunkin' Donuts");
        assert_eq!(out.value, "@Dunkin' Donuts");
        assert_eq!(out.caret, 15);
    }

    #[test]
    fn splice_counts_chars_not_bytes() {
        let out = splice(&table(), "café @fou", 9, "Fouquet’s");
        assert_eq!(out.value, "café @Fouquet’s");
        assert_eq!(out.caret, 15);
    }

    #[test]
    fn splice_without_trigger_replaces_the_last_word() {
        let out = splice(&table(), "hello wor", 9, "world");
        assert_eq!(out.value, "hello world");
        assert_eq!(out.caret, 11);
    }

    #[test]
    fn multi_char_keys_are_skipped() {
        let raw = BTreeMap::from([
            ("@".to_string(), vec!["Walmart".to_string()]),
            ("::".to_string(), vec!["nope".to_string()]),
            (String::new(), vec!["nope".to_string()]),
        ]);
        let table = Autocompletions::from(raw);
        assert_eq!(table.triggers().collect::<Vec<_>>(), vec!['@']);
    }

    #[test]
    fn yaml_table_deserializes() {
        let table: Autocompletions = serde_yaml::from_str("'@': [Walmart]\n'#': [Grosseries]\n").unwrap();
        assert!(table.is_trigger('@'));
        assert_eq!(table.candidates('#'), Some(&["Grosseries".to_string()][..]));
    }
}

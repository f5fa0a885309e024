//! Token classification against the closed command vocabulary
//!
//! Each spelling maps to exactly one token. `r`/`re` are deliberately
//! overloaded between the Remove command and the Result item; the
//! resolver settles them from the neighbouring words.

use crate::core::types::{Command, Item};

/// Classification of a single word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Command(Command),
    Item(Item),
    /// Either Remove or Result
    Ambiguous,
    Unknown,
}

impl Token {
    /// The command this token may stand for
    pub fn command(&self) -> Option<Command> {
        match self {
            Token::Command(c) => Some(*c),
            Token::Ambiguous => Some(Command::Remove),
            _ => None,
        }
    }

    /// The item this token may stand for
    pub fn item(&self) -> Option<Item> {
        match self {
            Token::Item(i) => Some(*i),
            Token::Ambiguous => Some(Item::Result),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Token::Unknown)
    }
}

/// Spelling table, exhaustive
const VOCABULARY: &[(&str, Token)] = &[
    ("a", Token::Command(Command::Add)),
    ("ad", Token::Command(Command::Add)),
    ("add", Token::Command(Command::Add)),
    ("new", Token::Command(Command::Add)),
    ("+", Token::Command(Command::Add)),
    ("s", Token::Command(Command::Show)),
    ("sh", Token::Command(Command::Show)),
    ("sho", Token::Command(Command::Show)),
    ("show", Token::Command(Command::Show)),
    ("ls", Token::Command(Command::Show)),
    ("list", Token::Command(Command::Show)),
    ("u", Token::Command(Command::Update)),
    ("up", Token::Command(Command::Update)),
    ("upd", Token::Command(Command::Update)),
    ("update", Token::Command(Command::Update)),
    ("ed", Token::Command(Command::Update)),
    ("edit", Token::Command(Command::Update)),
    ("rm", Token::Command(Command::Remove)),
    ("rem", Token::Command(Command::Remove)),
    ("remove", Token::Command(Command::Remove)),
    ("del", Token::Command(Command::Remove)),
    ("delete", Token::Command(Command::Remove)),
    ("-", Token::Command(Command::Remove)),
    ("h", Token::Command(Command::Help)),
    ("help", Token::Command(Command::Help)),
    ("?", Token::Command(Command::Help)),
    ("clear", Token::Command(Command::Clear)),
    ("cls", Token::Command(Command::Clear)),
    ("erase", Token::Command(Command::Erase)),
    ("exit", Token::Command(Command::ExitSave)),
    ("quit", Token::Command(Command::ExitSave)),
    ("q", Token::Command(Command::ExitSave)),
    ("x", Token::Command(Command::ExitSave)),
    ("exit!", Token::Command(Command::ExitNoSave)),
    ("quit!", Token::Command(Command::ExitNoSave)),
    ("q!", Token::Command(Command::ExitNoSave)),
    ("x!", Token::Command(Command::ExitNoSave)),
    ("g", Token::Item(Item::Goal)),
    ("go", Token::Item(Item::Goal)),
    ("goal", Token::Item(Item::Goal)),
    ("goals", Token::Item(Item::Goal)),
    ("ac", Token::Item(Item::Action)),
    ("act", Token::Item(Item::Action)),
    ("action", Token::Item(Item::Action)),
    ("actions", Token::Item(Item::Action)),
    ("ag", Token::Item(Item::Agreement)),
    ("agr", Token::Item(Item::Agreement)),
    ("agree", Token::Item(Item::Agreement)),
    ("agreement", Token::Item(Item::Agreement)),
    ("agreements", Token::Item(Item::Agreement)),
    ("al", Token::Item(Item::Alert)),
    ("ale", Token::Item(Item::Alert)),
    ("alert", Token::Item(Item::Alert)),
    ("alerts", Token::Item(Item::Alert)),
    ("res", Token::Item(Item::Result)),
    ("result", Token::Item(Item::Result)),
    ("results", Token::Item(Item::Result)),
    ("all", Token::Item(Item::All)),
    ("everything", Token::Item(Item::All)),
    ("*", Token::Item(Item::All)),
    ("r", Token::Ambiguous),
    ("re", Token::Ambiguous),
];

/// Classify one word; case-insensitive, never fails
pub fn classify(word: &str) -> Token {
    let lower = word.to_lowercase();
    VOCABULARY
        .iter()
        .find(|(spelling, _)| *spelling == lower)
        .map(|(_, token)| *token)
        .unwrap_or(Token::Unknown)
}

/// All spellings accepted for a command, for help output
pub fn spellings_of(command: Command) -> Vec<&'static str> {
    VOCABULARY
        .iter()
        .filter(|(_, token)| *token == Token::Command(command))
        .map(|(spelling, _)| *spelling)
        .collect()
}

/// All spellings accepted for an item, for help output
pub fn item_spellings(item: Item) -> Vec<&'static str> {
    VOCABULARY
        .iter()
        .filter(|(_, token)| *token == Token::Item(item))
        .map(|(spelling, _)| *spelling)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviations() {
        assert_eq!(classify("a"), Token::Command(Command::Add));
        assert_eq!(classify("ad"), Token::Command(Command::Add));
        assert_eq!(classify("go"), Token::Item(Item::Goal));
        assert_eq!(classify("ac"), Token::Item(Item::Action));
        assert_eq!(classify("ag"), Token::Item(Item::Agreement));
        assert_eq!(classify("al"), Token::Item(Item::Alert));
        assert_eq!(classify("exit!"), Token::Command(Command::ExitNoSave));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("SHOW"), Token::Command(Command::Show));
        assert_eq!(classify("Goals"), Token::Item(Item::Goal));
    }

    #[test]
    fn test_re_is_ambiguous() {
        assert_eq!(classify("re"), Token::Ambiguous);
        assert_eq!(classify("r"), Token::Ambiguous);
        assert_eq!(classify("re").command(), Some(Command::Remove));
        assert_eq!(classify("re").item(), Some(Item::Result));
    }

    #[test]
    fn test_unknown_words() {
        assert_eq!(classify("lose"), Token::Unknown);
        assert_eq!(classify("1"), Token::Unknown);
        assert_eq!(classify(""), Token::Unknown);
        assert!(!classify("adds").is_known());
    }

    #[test]
    fn test_spellings_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for (spelling, _) in VOCABULARY {
            assert!(seen.insert(*spelling), "duplicate spelling {}", spelling);
        }
    }

    #[test]
    fn test_every_record_kind_has_spellings() {
        for item in Item::RECORDS {
            assert!(item_spellings(item).contains(&item.name()));
        }
        assert!(spellings_of(Command::Remove).contains(&"rm"));
    }
}

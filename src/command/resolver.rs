//! Resolution of the leading words of a line into a (Command, Item) pair
//!
//! The grammar accepts "verb noun" and "noun verb" order, and `help` takes
//! a nested command as its argument. Resolution is a fixed table over the
//! first two tokens, so every rule can be tested on its own:
//!
//! | t1        | t2        | command | item   |
//! |-----------|-----------|---------|--------|
//! | Ambiguous | Ambiguous | Remove  | Result |
//! | Command   | Item      | t1      | t2     |
//! | Item      | Command   | t2      | t1     |
//! | Command   | Ambiguous | t1      | Result |
//! | Ambiguous | Command   | t2      | Result |
//! | Ambiguous | Item      | Remove  | t2     |
//! | Item      | Ambiguous | Remove  | t1     |
//! | Command   | other     | t1      | -      |
//! | Item      | other     | -       | t1     |
//! | Ambiguous | other     | Remove  | -      |
//! | Unknown   | any       | -       | -      |

use crate::command::vocabulary::{classify, Token};
use crate::core::types::{Command, Item};

/// Number of leading words the resolver looks at
pub const LOOKAHEAD: usize = 3;

/// A command/item pair found in some words of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Target {
    pub command: Option<Command>,
    pub item: Option<Item>,
}

impl Target {
    pub fn new(command: Option<Command>, item: Option<Item>) -> Self {
        Self { command, item }
    }
}

/// Outcome of resolving one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub command: Option<Command>,
    pub item: Option<Item>,
    /// What `help` was asked about, if the command is Help
    pub help_target: Option<Target>,
    /// How many leading words were used
    pub consumed: usize,
    /// The leading words, as typed, for notices
    pub words: Vec<String>,
}

impl Resolution {
    pub fn target(&self) -> Target {
        Target::new(self.command, self.item)
    }

    /// Is the pair complete enough to dispatch?
    pub fn is_valid(&self) -> bool {
        match (self.command, self.item) {
            (Some(Command::Show), Some(_)) => true,
            (Some(Command::Add | Command::Update | Command::Remove), Some(item)) => {
                item != Item::All
            }
            (Some(command), _) => !command.takes_item(),
            (None, _) => false,
        }
    }

    /// Words to name in an unknown-command notice
    pub fn offending(&self) -> String {
        let mut end = self.consumed.max(1);
        if self.command.is_some() && self.item.is_none() {
            end += 1;
        }
        self.words[..end.min(self.words.len())].join(" ")
    }
}

/// Resolve the first two tokens with the table above
///
/// Returns the pair and how many of the two tokens were used.
fn resolve_pair(t1: Token, t2: Token) -> (Target, usize) {
    use Token::{Ambiguous, Command as C, Item as I};

    let (command, item, used) = match (t1, t2) {
        (Ambiguous, Ambiguous) => (Some(Command::Remove), Some(Item::Result), 2),
        (C(c), I(i)) | (I(i), C(c)) => (Some(c), Some(i), 2),
        (C(c), Ambiguous) | (Ambiguous, C(c)) => (Some(c), Some(Item::Result), 2),
        (Ambiguous, I(i)) | (I(i), Ambiguous) => (Some(Command::Remove), Some(i), 2),
        (C(c), _) => (Some(c), None, 1),
        (I(i), _) => (None, Some(i), 1),
        (Ambiguous, _) => (Some(Command::Remove), None, 1),
        (Token::Unknown, _) => (None, None, 0),
    };
    (Target::new(command, item), used)
}

/// Resolve a target named after `help`; no defaults apply here
fn resolve_help_target(tokens: &[Token]) -> (Target, usize) {
    let t1 = tokens.first().copied().unwrap_or(Token::Unknown);
    let t2 = tokens.get(1).copied().unwrap_or(Token::Unknown);
    resolve_pair(t1, t2)
}

/// Resolve a whole input line
pub fn resolve(line: &str) -> Resolution {
    let words: Vec<String> = line
        .split_whitespace()
        .take(LOOKAHEAD)
        .map(str::to_string)
        .collect();
    let tokens: Vec<Token> = words.iter().map(|w| classify(w)).collect();
    let token = |i: usize| tokens.get(i).copied().unwrap_or(Token::Unknown);

    let help = Token::Command(Command::Help);
    let (command, item, help_target, consumed) = if token(0) == help {
        let (nested, used) = resolve_help_target(&tokens[1..]);
        (Some(Command::Help), None, Some(nested), 1 + used)
    } else if token(1) == help && token(0).is_known() {
        // "add help" asks about the word before; a third word may refine it
        let rest: Vec<Token> = std::iter::once(token(0))
            .chain(tokens.get(2).copied())
            .collect();
        let (nested, used) = resolve_help_target(&rest);
        (Some(Command::Help), None, Some(nested), 1 + used)
    } else {
        let (target, used) = resolve_pair(token(0), token(1));
        let mut item = target.item;
        if target.command == Some(Command::Show) && item.is_none() && words.len() == 1 {
            item = Some(Item::All);
        }
        (target.command, item, None, used)
    };

    let resolution = Resolution {
        command,
        item,
        help_target,
        consumed,
        words,
    };
    tracing::debug!(
        "resolved {:?} -> {:?} {:?} (help {:?}, consumed {})",
        line,
        resolution.command,
        resolution.item,
        resolution.help_target,
        resolution.consumed
    );
    resolution
}

/// The text left after the consumed words, whitespace collapsed
pub fn remainder(line: &str, consumed: usize) -> String {
    line.split_whitespace()
        .skip(consumed)
        .collect::<Vec<_>>()
        .join(" ")
}

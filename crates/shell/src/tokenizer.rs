// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line tokenizer.
//!
//! A rendered step line is split into words by an explicit finite-state
//! machine. Each state has one handler in [`TRANSITIONS`]; the driver calls
//! the handler for the current state until the line is consumed or the
//! machine reaches [`State::Error`].
//!
//! ```text
//! CommandBegin ──▶ Space ──'-'──▶ FlagKey ──▶ FlagValue ──▶ Space
//!                    │                ▲            │
//!                    └──other──▶ Args ┘            └──'-'──▶ FlagKey
//! ```
//!
//! Words keep their role so callers can choose between the bare word list
//! ([`tokenize`]) and a process argument vector ([`argv`]) where flags keep
//! their dash marker.

use crate::span::Span;
use crate::tokenize_error::TokenizeError;

/// Tokenizer states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    CommandBegin,
    Space,
    Args,
    FlagKey,
    FlagValue,
    Error,
}

/// A state handler consumes input and returns the next state.
pub(crate) type Handler = fn(&mut Machine<'_>) -> State;

/// Transition table. [`State::Error`] is terminal and has no handler.
pub(crate) const TRANSITIONS: [(State, Handler); 5] = [
    (State::CommandBegin, command_begin),
    (State::Space, space),
    (State::Args, args),
    (State::FlagKey, flag_key),
    (State::FlagValue, flag_value),
];

pub(crate) fn handler(state: State) -> Option<Handler> {
    TRANSITIONS
        .iter()
        .find(|(s, _)| *s == state)
        .map(|(_, h)| *h)
}

/// Role of an emitted word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordKind {
    /// Executable name read by the first state (may be empty).
    Command,
    /// Flag name; `marker` holds the leading dashes.
    Flag { marker: String },
    /// Value attached to the preceding flag.
    FlagValue,
    /// Positional argument.
    Positional,
}

/// A word emitted by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub kind: WordKind,
    pub text: String,
    pub span: Span,
}

impl Word {
    /// The word as a process argument: flags get their dash marker back.
    pub fn to_arg(&self) -> String {
        match &self.kind {
            WordKind::Flag { marker } => format!("{}{}", marker, self.text),
            _ => self.text.clone(),
        }
    }
}

/// Cursor and output buffer shared by the state handlers.
pub(crate) struct Machine<'a> {
    line: &'a str,
    pos: usize,
    words: Vec<Word>,
    error: Option<TokenizeError>,
}

impl<'a> Machine<'a> {
    pub(crate) fn new(line: &'a str) -> Self {
        Self {
            line,
            pos: 0,
            words: Vec::new(),
            error: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn at(line: &'a str, pos: usize) -> Self {
        Self {
            pos,
            ..Self::new(line)
        }
    }

    #[cfg(test)]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[cfg(test)]
    pub(crate) fn words(&self) -> &[Word] {
        &self.words
    }

    fn peek(&self) -> Option<char> {
        self.line.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.line.len()
    }

    fn emit(&mut self, kind: WordKind, text: String, start: usize) {
        self.words.push(Word {
            kind,
            text,
            span: Span::new(start, self.pos),
        });
    }

    /// Read one word, honoring single and double quotes.
    ///
    /// Stops before an unquoted space, or after the quote that closes an
    /// open quote. A backslash directly before the open quote character
    /// makes it literal (the backslash is dropped). Other quote characters
    /// inside an open quote are literal. Unterminated quotes end at the end
    /// of the line.
    fn read_word(&mut self) -> String {
        let mut text = String::new();
        let mut open: Option<char> = None;
        let mut prev: Option<char> = None;
        while let Some(c) = self.peek() {
            match open {
                None if c == '\'' || c == '"' => {
                    open = Some(c);
                    self.bump();
                }
                None if c == ' ' => break,
                Some(q) if c == q => {
                    self.bump();
                    if prev == Some('\\') {
                        text.pop();
                        text.push(c);
                    } else {
                        break;
                    }
                }
                _ => {
                    text.push(c);
                    self.bump();
                }
            }
            prev = Some(c);
        }
        text
    }

    /// Run the machine to completion.
    pub(crate) fn run(mut self) -> Result<Vec<Word>, TokenizeError> {
        let mut state = State::CommandBegin;
        while !self.at_end() {
            let Some(step) = handler(state) else {
                return Err(TokenizeError::NoSuchState {
                    state,
                    position: self.pos,
                });
            };
            state = step(&mut self);
            if state == State::Error {
                return Err(self.error.take().unwrap_or(TokenizeError::NoSuchState {
                    state,
                    position: self.pos,
                }));
            }
        }
        Ok(self.words)
    }
}

/// Read the executable name: a run of alphanumerics, which may continue
/// through `-`, `_` and `.` once started. Always emits, even when empty.
pub(crate) fn command_begin(m: &mut Machine<'_>) -> State {
    let start = m.pos;
    let mut name = String::new();
    while let Some(c) = m.peek() {
        let accepted =
            c.is_ascii_alphanumeric() || (!name.is_empty() && matches!(c, '-' | '_' | '.'));
        if !accepted {
            break;
        }
        name.push(c);
        m.bump();
    }
    m.emit(WordKind::Command, name, start);
    State::Space
}

pub(crate) fn space(m: &mut Machine<'_>) -> State {
    match m.peek() {
        Some(' ') => {
            m.bump();
            State::Space
        }
        Some('-') => State::FlagKey,
        _ => State::Args,
    }
}

pub(crate) fn args(m: &mut Machine<'_>) -> State {
    let start = m.pos;
    let word = m.read_word();
    m.emit(WordKind::Positional, word, start);
    State::Space
}

pub(crate) fn flag_key(m: &mut Machine<'_>) -> State {
    let start = m.pos;
    let mut marker = String::new();
    while m.peek() == Some('-') {
        marker.push('-');
        m.bump();
    }
    let mut name = String::new();
    while let Some(c) = m.peek() {
        if c.is_ascii_alphanumeric() || c == '-' {
            name.push(c);
            m.bump();
            continue;
        }
        if c != ' ' && c != '=' {
            m.error = Some(TokenizeError::InvalidFlagKey {
                key: name,
                span: Span::new(start, m.pos),
            });
            return State::Error;
        }
        break;
    }
    m.emit(WordKind::Flag { marker }, name, start);
    State::FlagValue
}

pub(crate) fn flag_value(m: &mut Machine<'_>) -> State {
    match m.peek() {
        Some('-') => return State::FlagKey,
        Some('=') => m.bump(),
        Some(' ') => {
            m.bump();
            if m.peek() == Some('-') {
                return State::FlagKey;
            }
        }
        _ => {}
    }
    let start = m.pos;
    let value = m.read_word();
    m.emit(WordKind::FlagValue, value, start);
    State::Space
}

/// Tokenize a line into roles and text.
pub fn words(line: &str) -> Result<Vec<Word>, TokenizeError> {
    Machine::new(line.trim()).run()
}

/// Tokenize a line into bare words.
///
/// Flag names appear without their dash marker, followed by their value
/// (if any) as the next word:
///
/// ```ignore
/// assert_eq!(
///     vc_shell::tokenize("cmd -k1=v1 -k2 v2 'a b'").unwrap(),
///     ["cmd", "k1", "v1", "k2", "v2", "a b"],
/// );
/// ```
pub fn tokenize(line: &str) -> Result<Vec<String>, TokenizeError> {
    Ok(words(line)?.into_iter().map(|w| w.text).collect())
}

/// Tokenize a line into a process argument vector (flags keep their dashes).
pub fn argv(line: &str) -> Result<Vec<String>, TokenizeError> {
    Ok(words(line)?.iter().map(Word::to_arg).collect())
}

/// Join words back into a line that tokenizes to the same words.
///
/// Words that are empty, start with `-`, or contain spaces or quotes are
/// quoted. An empty leading command word is dropped and the following word
/// is quoted so the command slot stays empty.
pub fn join(words: &[String]) -> String {
    let mut parts = Vec::with_capacity(words.len());
    let mut force_quote = false;
    for (i, word) in words.iter().enumerate() {
        if i == 0 && word.is_empty() {
            force_quote = true;
            continue;
        }
        if force_quote || needs_quotes(word) {
            parts.push(quote(word));
        } else {
            parts.push(word.clone());
        }
        force_quote = false;
    }
    parts.join(" ")
}

fn needs_quotes(word: &str) -> bool {
    word.is_empty() || word.starts_with('-') || word.contains([' ', '\'', '"'])
}

fn quote(word: &str) -> String {
    if word.contains('\'') {
        format!("\"{}\"", word.replace('"', "\\\""))
    } else {
        format!("'{}'", word)
    }
}

#[cfg(test)]
#[path = "tokenizer_tests.rs"]
mod tests;

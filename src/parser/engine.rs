//! Shift-reduce parse engine.
//!
//! The engine keeps two stacks grown in lockstep, a state stack and a
//! value stack, both seeded with a bottom sentinel. It consumes one
//! lookahead token at a time, driving shifts and reductions from the
//! action table and feeding reduction results to a [`SymbolSink`].
//!
//! When the action row rejects the lookahead, a state committed to a
//! single completed production reduces by default first, so pending
//! reductions (and their actions) are not lost to recovery. Error
//! recovery itself follows the classic three-token scheme: report
//! once, pop until a state that can shift the error terminal, shift
//! it, and suppress further reports until three real tokens have been
//! shifted. End of input is never recovered past.

use tracing::trace;

use crate::base::{TextRange, TextSize};
use crate::parser::actions::{self, SymbolSink};
use crate::parser::errors::{ErrorSink, SyntaxError};
use crate::parser::grammar::NonTerminal;
use crate::parser::tables::{Action, ParseTables};
use crate::parser::token_kind::TokenKind;
use thiserror::Error;

/// How many recovery messages may list expected tokens before the
/// report degrades to the short form.
const MAX_EXPECTED_SHOWN: usize = 5;

/// Semantic value carried on the value stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value {
    #[default]
    Empty,
    Text(String),
}

impl Value {
    pub fn into_text(self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::Text(s) => s,
        }
    }
}

/// A lookahead token as the engine sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Value,
    pub range: TextRange,
}

impl Token {
    pub fn new(kind: TokenKind, value: Value, range: TextRange) -> Self {
        Self { kind, value, range }
    }

    fn eof(at: TextSize) -> Self {
        Self {
            kind: TokenKind::Eof,
            value: Value::Empty,
            range: TextRange::empty(at),
        }
    }
}

/// Internal inconsistency between the engine and its tables. These are
/// bugs in table construction, not malformed input; malformed input is
/// handled by recovery and [`SyntaxError`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("parser state {state} is out of bounds")]
    StateOutOfBounds { state: u32 },
    #[error("rule {rule} is not in the tables")]
    UnknownRule { rule: u32 },
    #[error("rule {rule} would pop past the bottom of the stack")]
    StackUnderflow { rule: u32 },
    #[error("no goto from state {state} on {lhs:?}")]
    MissingGoto { state: u32, lhs: NonTerminal },
}

/// The table-driven parser. One engine instance parses one token
/// stream; the stacks are consumed by [`ParseEngine::run`].
pub struct ParseEngine<'t> {
    tables: &'t ParseTables,
    states: Vec<u32>,
    values: Vec<Value>,
    lookahead: Option<Token>,
    /// Non-zero while recovery is suppressing reports; decremented on
    /// every shifted source token.
    err_status: u8,
    shifted: u64,
    last_end: TextSize,
}

impl<'t> ParseEngine<'t> {
    pub fn new(tables: &'t ParseTables) -> Self {
        Self {
            tables,
            states: vec![0],
            values: vec![Value::Empty],
            lookahead: None,
            err_status: 0,
            shifted: 0,
            last_end: TextSize::default(),
        }
    }

    /// Both stacks, including the sentinel frame.
    pub fn stack_depth(&self) -> usize {
        self.states.len()
    }

    /// Source tokens shifted so far. Error terminals pushed during
    /// recovery do not count.
    pub fn tokens_shifted(&self) -> u64 {
        self.shifted
    }

    /// Drive the engine over `tokens` until accept or unrecoverable
    /// failure. Returns `Ok(true)` on accept and `Ok(false)` when
    /// recovery exhausts the input or the stack.
    pub fn run<S, E>(
        &mut self,
        tokens: &mut impl Iterator<Item = Token>,
        sink: &mut S,
        errors: &mut E,
    ) -> Result<bool, EngineError>
    where
        S: SymbolSink,
        E: ErrorSink,
    {
        loop {
            debug_assert_eq!(self.states.len(), self.values.len());
            let kind = self.fill_lookahead(tokens);
            let state = *self
                .states
                .last()
                .ok_or(EngineError::StateOutOfBounds { state: 0 })?;
            let action = self
                .tables
                .action(state, kind)
                .ok_or(EngineError::StateOutOfBounds { state })?;

            match action {
                Action::Shift(next) => {
                    let token = self
                        .lookahead
                        .take()
                        .unwrap_or_else(|| Token::eof(self.last_end));
                    trace!(state, next, token = kind.describe(), "shift");
                    self.last_end = token.range.end();
                    self.states.push(next);
                    self.values.push(token.value);
                    self.shifted += 1;
                    self.err_status = self.err_status.saturating_sub(1);
                }
                Action::Reduce(rule) => self.reduce(rule, sink)?,
                Action::Accept => {
                    trace!(shifted = self.shifted, "accept");
                    self.states.truncate(1);
                    self.values.truncate(1);
                    return Ok(true);
                }
                Action::Error => {
                    // A reduction the state is already committed to
                    // fires regardless of the lookahead. This keeps
                    // completed productions (and their actions) from
                    // being thrown away when the next token is bad.
                    if let Some(rule) = self.tables.default_reduce(state) {
                        self.reduce(rule, sink)?;
                    } else if !self.recover(state, errors) {
                        return Ok(false);
                    }
                }
            }
        }
    }

    fn fill_lookahead(&mut self, tokens: &mut impl Iterator<Item = Token>) -> TokenKind {
        if self.lookahead.is_none() {
            let eof_at = self.last_end;
            self.lookahead = Some(tokens.next().unwrap_or_else(|| Token::eof(eof_at)));
        }
        self.lookahead
            .as_ref()
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn reduce<S: SymbolSink>(&mut self, rule: u32, sink: &mut S) -> Result<(), EngineError> {
        let len = self
            .tables
            .rule_len(rule)
            .ok_or(EngineError::UnknownRule { rule })?;
        let lhs = self
            .tables
            .rule_lhs(rule)
            .ok_or(EngineError::UnknownRule { rule })?;
        let action = self
            .tables
            .rule_action(rule)
            .ok_or(EngineError::UnknownRule { rule })?;

        // The sentinel frame must survive every pop.
        if self.values.len() <= len {
            return Err(EngineError::StackUnderflow { rule });
        }
        let mut popped = self.values.split_off(self.values.len() - len);
        self.states.truncate(self.states.len() - len);

        let result = actions::apply(action, &mut popped, sink);

        let top = *self
            .states
            .last()
            .ok_or(EngineError::StackUnderflow { rule })?;
        let next = self
            .tables
            .goto(top, lhs)
            .ok_or(EngineError::MissingGoto { state: top, lhs })?;
        trace!(rule, ?lhs, from = top, to = next, "reduce");
        self.states.push(next);
        self.values.push(result);
        Ok(())
    }

    /// Returns `false` when recovery cannot continue: the failing
    /// lookahead is end of input, or no state on the stack can shift
    /// the error terminal.
    fn recover<E: ErrorSink>(&mut self, state: u32, errors: &mut E) -> bool {
        let (kind, range) = match &self.lookahead {
            Some(t) => (t.kind, t.range),
            None => (TokenKind::Eof, TextRange::empty(self.last_end)),
        };

        if self.err_status == 0 {
            errors.report(SyntaxError::new(self.describe_error(state, kind), range));
        }

        // End of input cannot be discarded or parsed past; an error
        // here means the parse ends mid-recovery, which is rejection.
        if kind == TokenKind::Eof {
            trace!("end of input during recovery, giving up");
            return false;
        }

        if self.err_status == 3 {
            // An error right after shifting the error terminal: drop
            // the lookahead instead of looping forever on it.
            trace!(token = kind.describe(), "discarding lookahead");
            self.lookahead = None;
        }
        self.err_status = 3;

        loop {
            let Some(&top) = self.states.last() else {
                return false;
            };
            if let Some(Action::Shift(next)) = self.tables.action(top, TokenKind::Error) {
                trace!(from = top, to = next, "shifting error terminal");
                self.states.push(next);
                self.values.push(Value::Empty);
                return true;
            }
            if self.states.len() == 1 {
                trace!("stack exhausted during recovery, giving up");
                return false;
            }
            self.states.pop();
            self.values.pop();
        }
    }

    fn describe_error(&self, state: u32, unexpected: TokenKind) -> String {
        let expected: Vec<&str> = self
            .tables
            .expected_in(state)
            .filter(|&t| !matches!(t, TokenKind::Error | TokenKind::Unknown))
            .map(TokenKind::describe)
            .collect();

        let mut message = format!("syntax error, unexpected {}", unexpected.describe());
        if !expected.is_empty() && expected.len() <= MAX_EXPECTED_SHOWN {
            message.push_str(", expecting ");
            message.push_str(&expected.join(" or "));
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::errors::DiagnosticSink;
    use crate::parser::lexer::token_stream;
    use crate::parser::tables::java_tables;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl SymbolSink for Recorder {
        fn set_current_package(&mut self, name: &str) {
            self.events.push(format!("package {name}"));
        }
        fn add_package_import(&mut self, name: &str) {
            self.events.push(format!("import {name}"));
        }
        fn record_class(&mut self, name: &str) {
            self.events.push(format!("type {name}"));
        }
        fn enter_class(&mut self, name: &str) {
            self.events.push(format!("enter {name}"));
        }
        fn exit_class(&mut self) {
            self.events.push("exit".into());
        }
    }

    fn parse(source: &str) -> (bool, Recorder, DiagnosticSink) {
        let mut engine = ParseEngine::new(java_tables());
        let mut sink = Recorder::default();
        let mut errors = DiagnosticSink::default();
        let accepted = engine
            .run(&mut token_stream(source), &mut sink, &mut errors)
            .unwrap();
        if accepted {
            assert_eq!(engine.stack_depth(), 1);
        }
        (accepted, sink, errors)
    }

    #[test]
    fn test_empty_input_accepts() {
        let (accepted, sink, errors) = parse("");
        assert!(accepted);
        assert!(sink.events.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_package_and_imports() {
        let (accepted, sink, errors) =
            parse("package com.example;\nimport java.util.List;\nimport java.io.*;\n");
        assert!(accepted);
        assert!(errors.is_empty());
        assert_eq!(
            sink.events,
            vec![
                "package com.example",
                "import java.util.List",
                "import java.io.*",
            ]
        );
    }

    #[test]
    fn test_nested_classes_fire_enter_and_exit() {
        let (accepted, sink, errors) = parse("public class Outer { static class Inner {} }");
        assert!(accepted);
        assert!(errors.is_empty());
        assert_eq!(sink.events, vec!["enter Outer", "enter Inner", "exit", "exit"]);
    }

    #[test]
    fn test_field_type_is_recorded() {
        let (accepted, sink, _) = parse("class C { private java.util.Map cache; }");
        assert!(accepted);
        assert_eq!(sink.events, vec!["enter C", "type java.util.Map", "exit"]);
    }

    #[test]
    fn test_missing_semicolon_recovers_and_reports_once() {
        let (accepted, sink, errors) = parse("package com.foo class Bar {}");
        assert!(accepted);
        assert_eq!(errors.len(), 1);
        // The package reduction never fired, the class still did.
        assert_eq!(sink.events, vec!["enter Bar", "exit"]);
    }

    #[test]
    fn test_pending_close_fires_before_recovery() {
        // The body reduction is inevitable once '}' is shifted; a bad
        // next token must not swallow the exit callback.
        let (accepted, sink, errors) = parse("class A {} #\nclass B {}");
        assert!(accepted);
        assert_eq!(errors.len(), 1);
        assert_eq!(sink.events, vec!["enter A", "exit", "enter B", "exit"]);
    }

    #[test]
    fn test_unclosed_class_is_rejected_but_still_seen() {
        let (accepted, sink, errors) = parse("class A {");
        assert!(!accepted);
        assert_eq!(errors.len(), 1);
        assert_eq!(sink.events, vec!["enter A"]);
    }

    #[test]
    fn test_error_message_names_the_unexpected_token() {
        let (_, _, errors) = parse("package ;");
        let rendered = errors.into_errors()[0].to_string();
        assert!(rendered.contains("unexpected ';'"), "{rendered}");
        assert!(rendered.contains("expecting identifier"), "{rendered}");
    }

    #[test]
    fn test_token_count_ignores_error_terminals() {
        let mut engine = ParseEngine::new(java_tables());
        let mut sink = Recorder::default();
        let mut errors = DiagnosticSink::default();
        engine
            .run(&mut token_stream("class A {}"), &mut sink, &mut errors)
            .unwrap();
        assert_eq!(engine.tokens_shifted(), 4);
    }
}

//! Table-driven shift-reduce parser for the Java dependency grammar.
//!
//! This module provides the parsing core:
//! - **logos** for fast lexing of the Java subset
//! - a dependency-scanning grammar expressed as plain production data
//! - SLR(1) table synthesis with conflict detection
//! - a deterministic stack automaton driving semantic actions
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with TokenKind
//!     ↓
//! ParseEngine → shift/reduce over the action and goto tables
//!     ↓
//! RuleAction dispatch → SymbolSink callbacks
//!     ↓
//! DependsBuilder → package, imports, classes
//! ```
//!
//! The engine never interprets semantic payloads itself; it stores
//! them on the value stack and hands them to the per-production
//! actions on reduction. Syntax errors are recovered with the
//! distinguished error terminal and reported through an [`ErrorSink`];
//! only malformed tables or stack corruption surface as a hard
//! [`EngineError`].

pub mod actions;
pub mod engine;
mod errors;
pub mod grammar;
mod lexer;
pub mod tables;
mod token_kind;

pub use actions::{RuleAction, SymbolSink};
pub use engine::{EngineError, ParseEngine, Token, Value};
pub use errors::{DiagnosticSink, ErrorSink, SyntaxError};
pub use lexer::{LexedToken, Lexer, token_stream};
pub use tables::{Action, ParseTables, TableError, java_tables};
pub use token_kind::TokenKind;

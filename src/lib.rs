//! # javadep-base
//!
//! Core library for scanning Java source for dependency information:
//! the declared package, imported packages, and class names declared
//! or referenced in a compilation unit.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! depends   → DependsBuilder, ScanReport, scan_java entry point
//!   ↓
//! parser    → Logos lexer, grammar tables, shift-reduce engine,
//!             semantic-action dispatch, syntax errors
//!   ↓
//! base      → Primitives (TextRange/TextSize, qualified names)
//! ```
//!
//! The parser is a table-driven shift-reduce automaton over a
//! dependency-scanning subset of the Java grammar. Reductions fire
//! semantic actions that feed a [`depends::DependsBuilder`]; the
//! extracted names remain available to the caller whether or not the
//! parse ultimately succeeded.

// ============================================================================
// MODULES (dependency order: base → parser → depends)
// ============================================================================

/// Foundation types: TextRange/TextSize, qualified-name helpers
pub mod base;

/// Parser: Logos lexer, grammar tables, shift-reduce engine
pub mod parser;

/// Dependency extraction: builder, scan report, entry point
pub mod depends;

// Re-export the common entry points
pub use depends::{DependsBuilder, ScanReport, scan_java};
pub use parser::{EngineError, SyntaxError};

// Re-export foundation types
pub use base::{TextRange, TextSize};

//! Java dependency extraction.
//!
//! [`DependsBuilder`] is the [`SymbolSink`] the parse engine feeds;
//! it accumulates the package declaration, imports, and declared or
//! referenced class names of one compilation unit. Extraction is best
//! effort: whatever was collected before a parse failure still lands
//! in the final [`ScanReport`].

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;
use tracing::debug;

use crate::base::qualify;
use crate::parser::{
    DiagnosticSink, EngineError, ParseEngine, SymbolSink, SyntaxError, java_tables, token_stream,
};

/// Everything a single scan extracted, plus how the parse ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Whether the parse ran to accept. Recovered syntax errors do not
    /// clear this; only unrecoverable input does.
    pub accepted: bool,
    pub package: Option<SmolStr>,
    /// Imported packages and types, wildcard imports as `a.b.*`.
    pub imports: Vec<SmolStr>,
    /// Declared classes (scope-qualified) and referenced type names,
    /// in first-seen order, deduplicated.
    pub classes: Vec<SmolStr>,
    pub errors: Vec<SyntaxError>,
}

/// Accumulates symbols during one parse. Nested class declarations
/// are tracked through a scope stack so inner classes come out
/// qualified by their enclosing classes.
#[derive(Debug, Default)]
pub struct DependsBuilder {
    package: Option<SmolStr>,
    imports: IndexSet<SmolStr, FxBuildHasher>,
    classes: IndexSet<SmolStr, FxBuildHasher>,
    scope: Vec<SmolStr>,
}

impl DependsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn scope_prefix(&self) -> String {
        self.scope
            .iter()
            .fold(String::new(), |acc, part| qualify(&acc, part))
    }

    pub fn finish(self, accepted: bool, errors: Vec<SyntaxError>) -> ScanReport {
        ScanReport {
            accepted,
            package: self.package,
            imports: self.imports.into_iter().collect(),
            classes: self.classes.into_iter().collect(),
            errors,
        }
    }
}

impl SymbolSink for DependsBuilder {
    fn set_current_package(&mut self, name: &str) {
        self.package = Some(SmolStr::new(name));
    }

    fn add_package_import(&mut self, name: &str) {
        self.imports.insert(SmolStr::new(name));
    }

    fn record_class(&mut self, name: &str) {
        self.classes.insert(SmolStr::new(name));
    }

    fn enter_class(&mut self, name: &str) {
        let qualified = qualify(&self.scope_prefix(), name);
        self.classes.insert(SmolStr::from(qualified));
        self.scope.push(SmolStr::new(name));
    }

    fn exit_class(&mut self) {
        self.scope.pop();
    }
}

/// Scan one Java source text for its package, imports, and classes.
///
/// Syntax errors are recovered where possible and reported in the
/// returned [`ScanReport`]; `Err` is reserved for internal engine
/// faults.
pub fn scan_java(source: &str) -> Result<ScanReport, EngineError> {
    let mut builder = DependsBuilder::new();
    let mut errors = DiagnosticSink::default();
    let mut engine = ParseEngine::new(java_tables());
    let accepted = engine.run(&mut token_stream(source), &mut builder, &mut errors)?;
    debug!(
        accepted,
        tokens = engine.tokens_shifted(),
        diagnostics = errors.len(),
        "java scan complete"
    );
    Ok(builder.finish(accepted, errors.into_errors()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_qualifies_nested_classes() {
        let mut b = DependsBuilder::new();
        b.enter_class("Outer");
        b.enter_class("Inner");
        b.enter_class("Innermost");
        b.exit_class();
        b.exit_class();
        b.exit_class();
        let report = b.finish(true, Vec::new());
        assert_eq!(
            report.classes,
            vec!["Outer", "Outer.Inner", "Outer.Inner.Innermost"]
        );
    }

    #[test]
    fn test_exit_without_enter_is_harmless() {
        let mut b = DependsBuilder::new();
        b.exit_class();
        b.enter_class("A");
        let report = b.finish(true, Vec::new());
        assert_eq!(report.classes, vec!["A"]);
    }

    #[test]
    fn test_duplicate_symbols_collapse_in_order() {
        let mut b = DependsBuilder::new();
        b.add_package_import("java.util.List");
        b.add_package_import("java.io.File");
        b.add_package_import("java.util.List");
        b.record_class("String");
        b.record_class("String");
        let report = b.finish(true, Vec::new());
        assert_eq!(report.imports, vec!["java.util.List", "java.io.File"]);
        assert_eq!(report.classes, vec!["String"]);
    }

    #[test]
    fn test_scan_full_unit() {
        let report = scan_java(
            "package com.example.app;\n\
             import java.util.Map;\n\
             import java.io.*;\n\
             public class App {\n\
                 private Map registry;\n\
                 static class Config {}\n\
             }\n",
        )
        .unwrap();
        assert!(report.accepted);
        assert!(report.errors.is_empty());
        assert_eq!(report.package.as_deref(), Some("com.example.app"));
        assert_eq!(report.imports, vec!["java.util.Map", "java.io.*"]);
        assert_eq!(report.classes, vec!["App", "Map", "App.Config"]);
    }

    #[test]
    fn test_scan_keeps_partial_results_on_failure() {
        let report = scan_java("package p;\nclass A { class B {").unwrap();
        assert!(!report.accepted);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.package.as_deref(), Some("p"));
        assert_eq!(report.classes, vec!["A", "A.B"]);
    }
}

//! Semantic-action dispatch for grammar reductions.
//!
//! Every production carries one [`RuleAction`] tag; a single dispatch
//! function interprets the tag against the popped value frames and the
//! caller's [`SymbolSink`]. Operand indices count from the bottom of
//! the popped span, i.e. index 0 is the leftmost right-hand-side
//! symbol. Actions compute exactly one result value and have no
//! control-flow effect on the engine.

use super::engine::Value;

/// Callback surface the grammar feeds during reduction.
///
/// Implemented by [`crate::depends::DependsBuilder`]; tests supply
/// lightweight recording sinks. Actions are invoked only on genuine
/// reductions, never speculatively, so implementations need no
/// compensation logic for error recovery.
pub trait SymbolSink {
    /// The compilation unit's own package declaration.
    fn set_current_package(&mut self, name: &str);
    /// An imported package or type; wildcard imports arrive as `a.b.*`.
    fn add_package_import(&mut self, name: &str);
    /// A class name referenced by a member declaration.
    fn record_class(&mut self, name: &str);
    /// A class declaration header; opens a nesting scope.
    fn enter_class(&mut self, name: &str);
    /// End of a class body; closes the innermost scope.
    fn exit_class(&mut self);
}

/// The semantic action associated with a production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Push an empty value; pure bookkeeping rule.
    Empty,
    /// Forward the value at the given operand index unchanged.
    Forward(usize),
    /// Join two name operands with `.` (qualified-name growth).
    JoinName { left: usize, right: usize },
    /// `package Name ;` (operand: the package name).
    SetPackage(usize),
    /// `import Name ;` (operand: the imported name).
    AddImport(usize),
    /// `import Name . * ;` (operand gets `.*` appended).
    AddWildcardImport(usize),
    /// Class header (operand: the declared class name).
    DeclareClass(usize),
    /// Class body closed.
    CloseClass,
    /// Member type reference (operand: the referenced class name).
    RecordTypeName(usize),
}

/// Run one action over the popped frames, returning the reduced value.
///
/// Values are taken out of the popped slice by `std::mem::take`; the
/// rest drops with the slice's backing storage.
pub(crate) fn apply<S: SymbolSink>(
    action: RuleAction,
    popped: &mut [Value],
    sink: &mut S,
) -> Value {
    match action {
        RuleAction::Empty => Value::Empty,
        RuleAction::Forward(i) => std::mem::take(&mut popped[i]),
        RuleAction::JoinName { left, right } => {
            let l = std::mem::take(&mut popped[left]).into_text();
            let r = std::mem::take(&mut popped[right]).into_text();
            Value::Text(format!("{l}.{r}"))
        }
        RuleAction::SetPackage(i) => {
            let name = std::mem::take(&mut popped[i]).into_text();
            sink.set_current_package(&name);
            Value::Empty
        }
        RuleAction::AddImport(i) => {
            let name = std::mem::take(&mut popped[i]).into_text();
            sink.add_package_import(&name);
            Value::Empty
        }
        RuleAction::AddWildcardImport(i) => {
            let name = std::mem::take(&mut popped[i]).into_text();
            sink.add_package_import(&format!("{name}.*"));
            Value::Empty
        }
        RuleAction::DeclareClass(i) => {
            let name = std::mem::take(&mut popped[i]).into_text();
            sink.enter_class(&name);
            Value::Empty
        }
        RuleAction::CloseClass => {
            sink.exit_class();
            Value::Empty
        }
        RuleAction::RecordTypeName(i) => {
            let name = std::mem::take(&mut popped[i]).into_text();
            sink.record_class(&name);
            Value::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl SymbolSink for Recorder {
        fn set_current_package(&mut self, name: &str) {
            self.calls.push(format!("package {name}"));
        }
        fn add_package_import(&mut self, name: &str) {
            self.calls.push(format!("import {name}"));
        }
        fn record_class(&mut self, name: &str) {
            self.calls.push(format!("ref {name}"));
        }
        fn enter_class(&mut self, name: &str) {
            self.calls.push(format!("enter {name}"));
        }
        fn exit_class(&mut self) {
            self.calls.push("exit".to_string());
        }
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_join_name() {
        let mut sink = Recorder::default();
        let mut popped = vec![text("com.foo"), Value::Empty, text("bar")];
        let out = apply(
            RuleAction::JoinName { left: 0, right: 2 },
            &mut popped,
            &mut sink,
        );
        assert_eq!(out, text("com.foo.bar"));
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_wildcard_import_appends_star() {
        let mut sink = Recorder::default();
        let mut popped = vec![
            Value::Empty,
            text("com.foo"),
            Value::Empty,
            Value::Empty,
            Value::Empty,
        ];
        let out = apply(RuleAction::AddWildcardImport(1), &mut popped, &mut sink);
        assert_eq!(out, Value::Empty);
        assert_eq!(sink.calls, vec!["import com.foo.*"]);
    }

    #[test]
    fn test_declare_and_close_class() {
        let mut sink = Recorder::default();
        let mut popped = vec![Value::Empty, Value::Empty, text("Bar")];
        apply(RuleAction::DeclareClass(2), &mut popped, &mut sink);
        let mut popped = vec![Value::Empty, Value::Empty, Value::Empty];
        apply(RuleAction::CloseClass, &mut popped, &mut sink);
        assert_eq!(sink.calls, vec!["enter Bar", "exit"]);
    }

    #[test]
    fn test_forward_moves_the_operand() {
        let mut sink = Recorder::default();
        let mut popped = vec![text("List")];
        let out = apply(RuleAction::Forward(0), &mut popped, &mut sink);
        assert_eq!(out, text("List"));
        assert_eq!(popped[0], Value::Empty);
    }
}

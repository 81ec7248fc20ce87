//! # Writer Scopes
//!
//! Tracks the nesting of objects and arrays plus the indentation level shared
//! by every concrete writer.

use crate::error::{AppError, AppResult};
use derive_more::Display;

/// The kind of an open scope.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// A `{ ... }` scope.
    #[display("Object")]
    Object,
    /// A `[ ... ]` scope.
    #[display("Array")]
    Array,
}

/// An open object or array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    /// Object or array.
    pub kind: ScopeKind,
    /// Number of members or elements written so far.
    pub object_count: usize,
    /// Whether this scope is itself an element of an array.
    pub is_in_array: bool,
}

impl Scope {
    fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            object_count: 0,
            is_in_array: false,
        }
    }
}

/// Scope stack and indentation counter.
#[derive(Debug, Default)]
pub struct WriterState {
    scopes: Vec<Scope>,
    indent_level: usize,
}

impl WriterState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the innermost scope.
    pub fn current(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    /// Returns the innermost scope mutably.
    pub fn current_mut(&mut self) -> Option<&mut Scope> {
        self.scopes.last_mut()
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// True when exactly one scope is open.
    pub fn is_top_level(&self) -> bool {
        self.scopes.len() == 1
    }

    /// True when the innermost scope is an array.
    pub fn in_array(&self) -> bool {
        matches!(self.current(), Some(s) if s.kind == ScopeKind::Array)
    }

    /// Counts one more child in the innermost scope and returns the previous count.
    pub fn bump_object_count(&mut self) -> usize {
        match self.scopes.last_mut() {
            Some(scope) => {
                let previous = scope.object_count;
                scope.object_count += 1;
                previous
            }
            None => 0,
        }
    }

    /// Opens a scope. The enclosing scope counts it as one child.
    pub fn start_scope(&mut self, kind: ScopeKind) -> &mut Scope {
        if let Some(parent) = self.scopes.last_mut() {
            parent.object_count += 1;
        }
        self.scopes.push(Scope::new(kind));
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Closes the innermost scope, which must be of `kind`.
    pub fn end_scope(&mut self, kind: ScopeKind) -> AppResult<Scope> {
        match self.scopes.last() {
            None => Err(AppError::Scope(
                "Scope must be present to end.".into(),
            )),
            Some(scope) if scope.kind != kind => Err(AppError::Scope(format!(
                "The scope to end is expected to be of type '{}' but it is of type '{}'.",
                kind, scope.kind
            ))),
            Some(_) => self
                .scopes
                .pop()
                .ok_or_else(|| AppError::Scope("Scope stack is empty.".into())),
        }
    }

    /// Checks that a property name may be written now.
    pub fn verify_can_write_property_name(&self, name: &str) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::Argument(
                "The property name must not be empty or whitespace.".into(),
            ));
        }
        match self.current() {
            None => Err(AppError::Scope(format!(
                "There must be an active scope for name '{}' to be written.",
                name
            ))),
            Some(scope) if scope.kind != ScopeKind::Object => Err(AppError::Scope(format!(
                "The active scope must be an object scope for property name '{}' to be written.",
                name
            ))),
            Some(_) => Ok(()),
        }
    }

    /// Current indentation level.
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Increments the indentation level.
    pub fn increase_indentation(&mut self) {
        self.indent_level += 1;
    }

    /// Decrements the indentation level.
    pub fn decrease_indentation(&mut self) -> AppResult<()> {
        if self.indent_level == 0 {
            return Err(AppError::IndentationLevelInvalid);
        }
        self.indent_level -= 1;
        Ok(())
    }

    /// Number of indentation units to emit for a format with `base` indentation.
    pub fn indentation_units(&self, base: usize) -> usize {
        (base + self.indent_level).saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_scope_counts_child_in_parent() {
        let mut state = WriterState::new();
        state.start_scope(ScopeKind::Array);
        state.start_scope(ScopeKind::Object);
        state.end_scope(ScopeKind::Object).unwrap();
        assert_eq!(state.current().unwrap().object_count, 1);
        assert!(state.is_top_level());
    }

    #[test]
    fn test_end_scope_wrong_kind() {
        let mut state = WriterState::new();
        state.start_scope(ScopeKind::Object);
        let err = state.end_scope(ScopeKind::Array).unwrap_err();
        assert!(matches!(err, AppError::Scope(_)));
        // The object scope is still open.
        assert_eq!(state.depth(), 1);
    }

    #[test]
    fn test_end_scope_without_open_scope() {
        let mut state = WriterState::new();
        assert!(matches!(
            state.end_scope(ScopeKind::Object),
            Err(AppError::Scope(_))
        ));
    }

    #[test]
    fn test_decrease_indentation_below_zero() {
        let mut state = WriterState::new();
        state.increase_indentation();
        state.decrease_indentation().unwrap();
        assert!(matches!(
            state.decrease_indentation(),
            Err(AppError::IndentationLevelInvalid)
        ));
    }

    #[test]
    fn test_property_name_checks() {
        let mut state = WriterState::new();
        assert!(matches!(
            state.verify_can_write_property_name("a"),
            Err(AppError::Scope(_))
        ));
        state.start_scope(ScopeKind::Array);
        assert!(matches!(
            state.verify_can_write_property_name("a"),
            Err(AppError::Scope(_))
        ));
        state.start_scope(ScopeKind::Object);
        assert!(state.verify_can_write_property_name("a").is_ok());
        assert!(matches!(
            state.verify_can_write_property_name("  "),
            Err(AppError::Argument(_))
        ));
    }
}

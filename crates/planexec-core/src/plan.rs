//! The plan: a last-in-first-out stack of symbolic actions.
//!
//! The planner hands over "remaining work" with the next step on top. The
//! executor only ever looks at or removes the top element; nothing is
//! inserted below it.

use crate::action::{ActionError, SymbolicAction};

/// Remaining symbolic actions, next step on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Top of the stack is the last element.
    stack: Vec<SymbolicAction>,
}

impl Plan {
    /// An empty plan.
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Build a plan from actions listed in the order they should run.
    ///
    /// The list is pushed in reverse so that its first element ends up on
    /// top.
    ///
    /// # Errors
    ///
    /// Returns the first [`ActionError`] found; no partial plan is returned.
    pub fn from_execution_order(
        actions: impl IntoIterator<Item = SymbolicAction>,
    ) -> Result<Self, ActionError> {
        let mut actions: Vec<SymbolicAction> = actions.into_iter().collect();
        actions.reverse();
        let mut plan = Self::new();
        for action in actions {
            plan.push(action)?;
        }
        Ok(plan)
    }

    /// Push an action on top; it becomes the next step.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] if the action fails validation.
    pub fn push(&mut self, action: SymbolicAction) -> Result<(), ActionError> {
        action.validate()?;
        self.stack.push(action);
        Ok(())
    }

    /// Remove and return the next step.
    pub fn pop(&mut self) -> Option<SymbolicAction> {
        self.stack.pop()
    }

    /// The next step, without removing it.
    pub fn peek(&self) -> Option<&SymbolicAction> {
        self.stack.last()
    }

    /// Number of remaining steps.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether every step has been taken.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Remaining steps, next step first.
    pub fn iter(&self) -> impl Iterator<Item = &SymbolicAction> {
        self.stack.iter().rev()
    }
}

//! Ordered action plans

use crate::action::Action;

/// An ordered list of actions produced by an agent's planner
#[derive(Debug)]
pub struct Plan<A> {
    actions: Vec<A>,
}

impl<A: Action> Plan<A> {
    /// Create a new empty plan
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Append an action; plan order is execution order
    pub fn push(&mut self, action: A) {
        self.actions.push(action);
    }

    /// Actions in execution order
    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    /// Kinds of every action, in order
    pub fn kinds(&self) -> Vec<&'static str> {
        self.actions.iter().map(Action::kind).collect()
    }

    /// Targets of every action, in order (duplicates kept)
    pub fn targets(&self) -> Vec<String> {
        self.actions.iter().map(Action::id).collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<A: Action> Default for Plan<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> FromIterator<A> for Plan<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

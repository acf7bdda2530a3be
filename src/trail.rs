use crate::assignment::Assignment;
use crate::clause::ClauseIdx;
use crate::data::{Lit, Var};

/// Why a literal was put on the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AssignCause {
    /// Free choice; opens a decision level.
    Decision,

    /// Forced by unit propagation through this clause.
    Propagated { clause: ClauseIdx },

    /// The negation of a popped decision, forced at the parent level after a
    /// conflict.
    Flipped,

    /// Unit clause in the input, forced at the root level before search.
    InputUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrailEntry {
    pub lit: Lit,
    pub cause: AssignCause,
}

/// The assignment trail: every assigned literal in assignment order, with
/// decision-level boundaries.
///
/// A decision level is the trail segment from a decision entry up to the next
/// one. The root level is the prefix before the first decision and holds the
/// input units and their flips.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Trail {
    entries: Vec<TrailEntry>,
    decision_marks: Vec<usize>,
    assignment: Assignment,
}

impl Trail {
    /// Grow the variable table so that `var` is known.
    pub(crate) fn expand(&mut self, var: Var) {
        self.assignment.expand(var);
    }

    pub fn var_count(&self) -> usize {
        self.assignment.var_count()
    }

    pub fn assigned_count(&self) -> usize {
        self.entries.len()
    }

    pub fn unassigned_count(&self) -> usize {
        self.var_count() - self.assigned_count()
    }

    pub fn is_complete(&self) -> bool {
        self.unassigned_count() == 0
    }

    /// Number of decision levels above the root.
    pub fn decision_depth(&self) -> usize {
        self.decision_marks.len()
    }

    pub fn value(&self, lit: Lit) -> Option<bool> {
        self.assignment.value(lit)
    }

    pub fn is_true(&self, lit: Lit) -> bool {
        self.assignment.is_true(lit)
    }

    pub fn is_false(&self, lit: Lit) -> bool {
        self.assignment.is_false(lit)
    }

    pub fn is_unassigned(&self, lit: Lit) -> bool {
        self.assignment.is_unassigned(lit)
    }

    /// Unassigned variables in ascending label order.
    pub fn unassigned_vars(&self) -> impl Iterator<Item = Var> + '_ {
        (1..=self.var_count() as u32)
            .map(Var::new)
            .filter(|v| self.is_unassigned(v.lit(true)))
    }

    pub(crate) fn first_unassigned(&self) -> Option<Var> {
        self.assignment.first_unassigned()
    }

    pub(crate) fn get(&self, idx: usize) -> Option<TrailEntry> {
        self.entries.get(idx).copied()
    }

    pub(crate) fn entries(&self) -> &[TrailEntry] {
        &self.entries
    }

    /// Open a new decision level and make `lit` true.
    pub(crate) fn decide(&mut self, lit: Lit) {
        self.decision_marks.push(self.entries.len());
        self.push(lit, AssignCause::Decision);
    }

    /// Record a forced assignment at the current level and make `lit` true.
    pub(crate) fn force(&mut self, lit: Lit, cause: AssignCause) {
        debug_assert!(!matches!(cause, AssignCause::Decision));
        self.push(lit, cause);
    }

    fn push(&mut self, lit: Lit, cause: AssignCause) {
        self.entries.push(TrailEntry { lit, cause });
        self.assignment.assign(lit);
    }

    /// Pop the top decision level, unassigning its decision and every forced
    /// assignment in reverse order. Returns the popped decision entry, or
    /// `None` when only the root level remains.
    pub(crate) fn pop_level(&mut self) -> Option<TrailEntry> {
        let mark = self.decision_marks.pop()?;
        let decision = self.entries[mark];
        debug_assert!(matches!(decision.cause, AssignCause::Decision));

        while self.entries.len() > mark {
            let entry = self.entries.pop().expect("entries above the mark");
            self.assignment.unassign(entry.lit);
        }

        Some(decision)
    }

    pub(crate) fn is_clause_satisfied(&self, clause: &[Lit]) -> bool {
        clause.iter().any(|&lit| self.is_true(lit))
    }
}

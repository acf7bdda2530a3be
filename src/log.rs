//! Trace formatting for the trail and the clause database.

use crate::data::Lit;
use crate::trail::{AssignCause, Trail};
use crate::Solver;

const RED: &str = "\u{1b}[31m";
const GREEN: &str = "\u{1b}[32m";
const END: &str = "\u{1b}[0m";

impl Trail {
    /// Literal colored by its current truth value.
    pub(crate) fn fmt_lit(&self, lit: Lit) -> String {
        match self.value(lit) {
            Some(true) => format!("{GREEN}{lit}{END}"),
            Some(false) => format!("{RED}{lit}{END}"),
            None => format!("{lit}"),
        }
    }

    /// Trail rendering with cause annotations: D(ecision), P(ropagated),
    /// F(lipped), U(nit input).
    pub(crate) fn fmt_trail(&self) -> String {
        let mut out = "[".to_string();
        for (i, entry) in self.entries().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let annotation = match entry.cause {
                AssignCause::Decision => 'D',
                AssignCause::Propagated { .. } => 'P',
                AssignCause::Flipped => 'F',
                AssignCause::InputUnit => 'U',
            };
            out.push_str(&format!("{}{annotation}", entry.lit));
        }
        out.push(']');
        out
    }
}

impl Solver {
    /// Clause rendering with per-literal truth colors and `*` markers on the
    /// two watched literals.
    pub(crate) fn fmt_clause(&self, idx: crate::clause::ClauseIdx) -> String {
        let lits = self.clause_db.lits(idx);
        let [o0, o1] = self.clause_db.watched_offsets(idx);

        let mut out = "(".to_string();
        for (offset, &lit) in lits.iter().enumerate() {
            if offset > 0 {
                out.push_str(" | ");
            }
            out.push_str(&self.trail.fmt_lit(lit));
            if offset as u32 == o0 || offset as u32 == o1 {
                out.push('*');
            }
        }
        out.push(')');
        out
    }

    /// Dump every clause with its watches, debug builds only.
    pub(crate) fn log_state(&self) {
        #[cfg(debug_assertions)]
        {
            tracing::debug!("trail = {}", self.trail.fmt_trail());
            for idx in self.clause_db.indices() {
                tracing::debug!("{}", self.fmt_clause(idx));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_rendering_annotates_causes() {
        let mut solver = Solver::new();
        solver.add_clause([1, 2]);
        solver.add_clause([-2, 3]);

        solver.trail.decide(Lit::new(-1));
        solver.trail.force(Lit::new(2), AssignCause::Flipped);

        let rendered = solver.trail.fmt_trail();
        assert_eq!(rendered, "[-1D, 2F]");
    }

    #[test]
    fn clause_rendering_marks_watches() {
        let mut solver = Solver::new();
        solver.add_clause([1, 2, 3]);

        let idx = solver.clause_db.indices().next().unwrap();
        let rendered = solver.fmt_clause(idx);
        assert_eq!(rendered, "(1* | 2* | 3)");
    }
}

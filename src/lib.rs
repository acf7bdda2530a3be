//! A DPLL SAT solver with two-watched-literal unit propagation and
//! chronological backtracking.
//!
//! Clauses are added as signed DIMACS integers. Unit input clauses are forced
//! at the root level before search; empty or contradictory input makes the
//! formula trivially unsatisfiable. During search every clause has at least
//! two literals and watches two of them.

mod assignment;
mod clause;
mod data;
pub mod dimacs;
pub mod heuristic;
mod log;
mod propagate;
mod trail;

use tracing::debug;

use clause::Watch;
use data::LitVec;
use heuristic::{Heuristic, LabelOrder};
use propagate::Propagation;
use trail::AssignCause;

pub use clause::ClauseDb;
pub use data::{Lit, Var};
pub use trail::Trail;

/// Search statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stats {
    pub decisions: u64,
    pub propagations: u64,
    pub conflicts: u64,
}

pub struct Solver {
    clause_db: ClauseDb,

    /// For every literal, the clauses currently watching it.
    watches: LitVec<Vec<Watch>>,

    trail: Trail,

    /// Trail position where unit propagation resumes. The trail suffix past
    /// this cursor is the propagation queue.
    unpropagated_pos: usize,

    /// Set when the input contains an empty clause or contradictory units.
    trivially_unsat: bool,

    heuristic: Box<dyn Heuristic>,

    stats: Stats,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            clause_db: ClauseDb::default(),
            watches: LitVec::new(),
            trail: Trail::default(),
            unpropagated_pos: 0,
            trivially_unsat: false,
            heuristic: Box::new(LabelOrder),
            stats: Stats::default(),
        }
    }
}

/// A satisfying assignment, borrowed from the solver that found it.
pub struct Model<'a> {
    trail: &'a Trail,
}

impl<'a> Model<'a> {
    /// Truth value of a literal in signed DIMACS encoding.
    pub fn lit(&self, lit: i32) -> bool {
        self.trail.is_true(Lit::new(lit))
    }

    pub fn value(&self, var: Var) -> bool {
        self.trail.is_true(var.lit(true))
    }

    /// The model as signed DIMACS literals, one per variable in label order.
    pub fn as_vec(&self) -> Vec<i32> {
        (1..=self.trail.var_count() as i32)
            .map(|label| if self.lit(label) { label } else { -label })
            .collect()
    }
}

impl std::fmt::Debug for Model<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Model").field(&self.as_vec()).finish()
    }
}

#[derive(Debug)]
pub enum Verdict<'a> {
    Sat(Model<'a>),
    Unsat,
}

impl<'a> Verdict<'a> {
    pub fn is_sat(&self) -> bool {
        matches!(self, Verdict::Sat(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, Verdict::Unsat)
    }

    pub fn unwrap_sat(self) -> Model<'a> {
        match self {
            Verdict::Sat(model) => model,
            Verdict::Unsat => panic!("verdict is UNSAT"),
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heuristic(heuristic: impl Heuristic + 'static) -> Self {
        let mut solver = Self::new();
        solver.set_heuristic(heuristic);
        solver
    }

    pub fn set_heuristic(&mut self, heuristic: impl Heuristic + 'static) {
        self.heuristic = Box::new(heuristic);
    }

    /// Build a solver from DIMACS input.
    pub fn from_dimacs(input: &str) -> Result<Solver, dimacs::ParseError> {
        let parsed = dimacs::Dimacs::parse(input)?;

        let mut solver = Solver::new();
        if let Some(header) = parsed.header {
            solver.reserve_vars(header.var_count);
            if header.clause_count != parsed.clauses.len() {
                tracing::warn!(
                    "header announces {} clauses, input has {}",
                    header.clause_count,
                    parsed.clauses.len()
                );
            }
        }
        for clause in parsed.clauses {
            solver.add_clause(clause);
        }
        Ok(solver)
    }

    /// Make variables `1..=count` known to the solver even if no clause
    /// mentions them; they still receive values in the final model.
    pub fn reserve_vars(&mut self, count: usize) {
        if count > 0 {
            let max = Var::new(count as u32);
            self.trail.expand(max);
            self.watches.expand(max.lit(false), Vec::new());
        }
    }

    /// Add a clause given as signed DIMACS literals.
    ///
    /// Duplicate literals are dropped and tautological clauses discarded. A
    /// unit clause is forced at the root level; an empty clause marks the
    /// formula trivially unsatisfiable.
    pub fn add_clause<I>(&mut self, cls: I)
    where
        I: IntoIterator<Item = i32>,
    {
        let mut cls: Vec<Lit> = cls.into_iter().map(Lit::new).collect();

        cls.sort_by_key(|lit| lit.index());
        cls.dedup();
        if cls.windows(2).any(|pair| pair[0].var() == pair[1].var()) {
            return;
        }

        if let Some(&max) = cls.last() {
            self.reserve_vars(max.var().label() as usize);
        }

        match cls.len() {
            0 => {
                self.trivially_unsat = true;
            }
            1 => {
                let unit = cls[0];
                if self.trail.is_false(unit) {
                    self.trivially_unsat = true;
                } else if self.trail.is_unassigned(unit) {
                    self.trail.force(unit, AssignCause::InputUnit);
                }
            }
            _ => {
                let idx = self.clause_db.insert(&cls);
                for lit in self.clause_db.watched_lits(idx) {
                    self.watches[lit].push(Watch { clause: idx });
                }
            }
        }
    }

    /// Run the DPLL search.
    ///
    /// Propagates to fixed point, then either reports SAT (assignment
    /// complete), decides a fresh variable, or on conflict pops the top
    /// decision level and forces the flipped decision at the parent level.
    /// UNSAT once a conflict hits the root level.
    pub fn solve(&mut self) -> Verdict<'_> {
        if self.trivially_unsat {
            debug!("input is trivially unsatisfiable");
            return Verdict::Unsat;
        }

        loop {
            self.log_state();

            match self.propagate() {
                Propagation::Conflict(clause) => {
                    self.stats.conflicts += 1;
                    debug!("conflict: {}", self.fmt_clause(clause));
                    if !self.backtrack_and_flip() {
                        debug!("conflict at root level, formula is unsatisfiable");
                        return Verdict::Unsat;
                    }
                }
                Propagation::Done => {
                    if self.trail.is_complete() {
                        assert!(
                            self.check_assignment(),
                            "model does not satisfy the input formula"
                        );
                        debug!("satisfying assignment found");
                        return Verdict::Sat(Model { trail: &self.trail });
                    }
                    self.decide_next();
                }
            }
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    fn decide_next(&mut self) {
        let var = self
            .heuristic
            .choose_variable(&self.trail, &self.clause_db)
            .unwrap_or_else(|| {
                self.trail
                    .first_unassigned()
                    .expect("incomplete assignment has an unassigned variable")
            });
        debug_assert!(
            self.trail.is_unassigned(var.lit(true)),
            "heuristic returned an assigned variable"
        );

        let phase = self
            .heuristic
            .choose_phase(var, &self.trail, &self.clause_db)
            .unwrap_or(true);

        self.stats.decisions += 1;
        debug!("deciding {var} = {phase}");
        self.trail.decide(var.lit(phase));
    }

    /// Chronological backtracking: pop exactly one decision level and force
    /// the negation of its decision at the parent level. Returns false when
    /// only the root level remains.
    fn backtrack_and_flip(&mut self) -> bool {
        debug!("backtracking from {}", self.trail.fmt_trail());
        match self.trail.pop_level() {
            Some(decision) => {
                self.unpropagated_pos = self.trail.assigned_count();
                debug!("forcing flipped decision {}", -decision.lit);
                self.trail.force(-decision.lit, AssignCause::Flipped);
                true
            }
            None => false,
        }
    }

    /// Does the current assignment satisfy every stored clause?
    fn check_assignment(&self) -> bool {
        self.clause_db
            .iter()
            .all(|clause| self.trail.is_clause_satisfied(clause))
    }
}

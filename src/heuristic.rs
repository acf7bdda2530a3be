//! Pluggable variable/phase selection for the search driver.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::clause::ClauseDb;
use crate::data::Var;
use crate::trail::Trail;

/// Decision heuristic consulted before every fresh decision.
///
/// Both operations are optional: returning `None` hands the choice back to
/// the driver, which falls back to the first unassigned variable in ascending
/// label order and to the phase TRUE. Implementations only read the trail and
/// the formula; any internal state (e.g. a PRNG) is their own.
pub trait Heuristic {
    /// Pick the next decision variable. Must return an unassigned variable.
    fn choose_variable(&mut self, _trail: &Trail, _clauses: &ClauseDb) -> Option<Var> {
        None
    }

    /// Pick the phase for the first decision on `var`.
    fn choose_phase(&mut self, _var: Var, _trail: &Trail, _clauses: &ClauseDb) -> Option<bool> {
        None
    }
}

/// No opinion on anything: label order, TRUE first.
#[derive(Debug, Default, Clone, Copy)]
pub struct LabelOrder;

impl Heuristic for LabelOrder {}

/// Uniformly random variable and phase, deterministic per seed.
#[derive(Debug, Clone)]
pub struct RandomDecision {
    rng: SmallRng,
}

impl RandomDecision {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Heuristic for RandomDecision {
    fn choose_variable(&mut self, trail: &Trail, _clauses: &ClauseDb) -> Option<Var> {
        let open: Vec<Var> = trail.unassigned_vars().collect();
        if open.is_empty() {
            return None;
        }
        Some(open[self.rng.gen_range(0..open.len())])
    }

    fn choose_phase(&mut self, _var: Var, _trail: &Trail, _clauses: &ClauseDb) -> Option<bool> {
        Some(self.rng.gen())
    }
}

/// Jeroslow-Wang-like phase selection: TRUE iff the positive literal of the
/// variable occurs at least as often as the negative one across all clauses.
#[derive(Debug, Default, Clone, Copy)]
pub struct OccurrencePhase;

impl Heuristic for OccurrencePhase {
    fn choose_phase(&mut self, var: Var, _trail: &Trail, clauses: &ClauseDb) -> Option<bool> {
        let mut positive = 0usize;
        let mut negative = 0usize;

        for clause in clauses.iter() {
            for &lit in clause {
                if lit.var() == var {
                    if lit.is_pos() {
                        positive += 1;
                    } else {
                        negative += 1;
                    }
                }
            }
        }

        Some(positive >= negative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Lit;

    fn formula(clauses: &[&[i32]]) -> (Trail, ClauseDb) {
        let mut trail = Trail::default();
        let mut db = ClauseDb::default();
        for cls in clauses {
            let lits: Vec<Lit> = cls.iter().map(|&l| Lit::new(l)).collect();
            for &lit in &lits {
                trail.expand(lit.var());
            }
            db.insert(&lits);
        }
        (trail, db)
    }

    #[test]
    fn occurrence_phase_follows_the_majority_sign() {
        let (trail, db) = formula(&[&[1, 2], &[1, -2], &[-1, 2]]);
        let mut heuristic = OccurrencePhase;

        assert_eq!(
            heuristic.choose_phase(Var::new(1), &trail, &db),
            Some(true)
        );
        // Ties go to TRUE.
        assert_eq!(
            heuristic.choose_phase(Var::new(2), &trail, &db),
            Some(true)
        );
    }

    #[test]
    fn occurrence_phase_prefers_false_for_mostly_negative() {
        let (trail, db) = formula(&[&[-1, 2], &[-1, -2], &[1, 2]]);
        let mut heuristic = OccurrencePhase;
        assert_eq!(
            heuristic.choose_phase(Var::new(1), &trail, &db),
            Some(false)
        );
    }

    #[test]
    fn random_decision_is_deterministic_per_seed() {
        let (trail, db) = formula(&[&[1, 2, 3], &[-1, -2, -3]]);

        let mut a = RandomDecision::new(7);
        let mut b = RandomDecision::new(7);
        for _ in 0..10 {
            assert_eq!(
                a.choose_variable(&trail, &db),
                b.choose_variable(&trail, &db)
            );
            let var = Var::new(1);
            assert_eq!(
                a.choose_phase(var, &trail, &db),
                b.choose_phase(var, &trail, &db)
            );
        }
    }

    #[test]
    fn random_decision_returns_unassigned_vars_only() {
        let (mut trail, db) = formula(&[&[1, 2, 3], &[-1, -2, -3]]);
        trail.decide(Lit::new(2));

        let mut heuristic = RandomDecision::new(42);
        for _ in 0..20 {
            let var = heuristic.choose_variable(&trail, &db).unwrap();
            assert!(trail.is_unassigned(var.lit(true)));
        }
    }
}

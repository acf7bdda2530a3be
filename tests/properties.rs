use proptest::prelude::*;

use chronosat::heuristic::{OccurrencePhase, RandomDecision};
use chronosat::Solver;

/// Exhaustive satisfiability check over all assignments, usable up to ten or
/// so variables.
fn brute_force_is_sat(var_count: u32, clauses: &[Vec<i32>]) -> bool {
    for bits in 0u32..1 << var_count {
        let lit_is_true = |lit: i32| {
            let value = bits & (1 << (lit.unsigned_abs() - 1)) != 0;
            if lit > 0 {
                value
            } else {
                !value
            }
        };

        if clauses
            .iter()
            .all(|clause| clause.iter().any(|&lit| lit_is_true(lit)))
        {
            return true;
        }
    }
    false
}

fn model_satisfies(model: &[i32], clauses: &[Vec<i32>]) -> bool {
    clauses.iter().all(|clause| {
        clause
            .iter()
            .any(|&lit| model[(lit.unsigned_abs() - 1) as usize] == lit)
    })
}

fn solver_for(var_count: u32, clauses: &[Vec<i32>]) -> Solver {
    let mut solver = Solver::new();
    solver.reserve_vars(var_count as usize);
    for clause in clauses {
        solver.add_clause(clause.iter().copied());
    }
    solver
}

/// Random CNF formulas over at most 10 variables, including unit clauses,
/// duplicate literals, and tautologies, which the loader must normalize.
fn formula() -> impl Strategy<Value = (u32, Vec<Vec<i32>>)> {
    (2u32..=10).prop_flat_map(|var_count| {
        let lit = (1..=var_count, any::<bool>()).prop_map(|(var, negate)| {
            if negate {
                -(var as i32)
            } else {
                var as i32
            }
        });
        let clause = proptest::collection::vec(lit, 1..=4);
        let clauses = proptest::collection::vec(clause, 0..=24);
        (Just(var_count), clauses)
    })
}

proptest! {
    #[test]
    fn verdict_agrees_with_brute_force((var_count, clauses) in formula()) {
        let mut solver = solver_for(var_count, &clauses);
        let verdict = solver.solve();
        prop_assert_eq!(verdict.is_sat(), brute_force_is_sat(var_count, &clauses));
    }

    #[test]
    fn sat_models_satisfy_every_clause((var_count, clauses) in formula()) {
        let mut solver = solver_for(var_count, &clauses);
        if let chronosat::Verdict::Sat(model) = solver.solve() {
            prop_assert!(model_satisfies(&model.as_vec(), &clauses));
        }
    }

    #[test]
    fn search_is_deterministic((var_count, clauses) in formula()) {
        let mut first = solver_for(var_count, &clauses);
        let mut second = solver_for(var_count, &clauses);

        match (first.solve(), second.solve()) {
            (chronosat::Verdict::Sat(a), chronosat::Verdict::Sat(b)) => {
                prop_assert_eq!(a.as_vec(), b.as_vec());
            }
            (chronosat::Verdict::Unsat, chronosat::Verdict::Unsat) => {}
            _ => prop_assert!(false, "verdicts differ between identical runs"),
        }
    }

    #[test]
    fn seeded_random_heuristic_is_deterministic((var_count, clauses) in formula()) {
        let mut first = solver_for(var_count, &clauses);
        first.set_heuristic(RandomDecision::new(99));
        let mut second = solver_for(var_count, &clauses);
        second.set_heuristic(RandomDecision::new(99));

        match (first.solve(), second.solve()) {
            (chronosat::Verdict::Sat(a), chronosat::Verdict::Sat(b)) => {
                prop_assert_eq!(a.as_vec(), b.as_vec());
            }
            (chronosat::Verdict::Unsat, chronosat::Verdict::Unsat) => {}
            _ => prop_assert!(false, "verdicts differ between identical runs"),
        }
    }

    #[test]
    fn heuristics_never_change_the_verdict((var_count, clauses) in formula()) {
        let mut label_order = solver_for(var_count, &clauses);
        let expected = label_order.solve().is_sat();

        let mut random = solver_for(var_count, &clauses);
        random.set_heuristic(RandomDecision::new(3));
        prop_assert_eq!(random.solve().is_sat(), expected);

        let mut occurrence = solver_for(var_count, &clauses);
        occurrence.set_heuristic(OccurrencePhase);
        prop_assert_eq!(occurrence.solve().is_sat(), expected);
    }
}

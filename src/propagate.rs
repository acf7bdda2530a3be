//! Unit propagation over the two-watched-literal scheme.

use crate::clause::{ClauseIdx, Watch, WatchStatus};
use crate::trail::AssignCause;
use crate::Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Propagation {
    /// Fixed point reached, no clause violated.
    Done,
    /// The clause has all literals false under the current assignment.
    Conflict(ClauseIdx),
}

impl Solver {
    /// Run unit propagation to fixed point.
    ///
    /// The propagation queue is the trail suffix past `unpropagated_pos`:
    /// each entry there is a literal that just became true, so its negation
    /// just became false and that falsified literal's watch list has to be
    /// walked. Forced assignments land past the cursor and are drained in the
    /// same call, so the fixed point includes transitive consequences.
    pub(crate) fn propagate(&mut self) -> Propagation {
        while let Some(entry) = self.trail.get(self.unpropagated_pos) {
            let falsified = -entry.lit;
            debug_assert!(self.trail.is_false(falsified));

            // The walk below appends to other literals' watch lists, so take
            // this list out of the table first. A replacement watch is never
            // `falsified` itself, so nothing is appended to the detached list.
            let mut watch_list = std::mem::take(&mut self.watches[falsified]);
            let mut conflict = None;

            watch_list.retain(|watch| {
                // Once a conflict is found the remaining watches are kept
                // untouched; search backtracks anyway.
                if conflict.is_some() {
                    return true;
                }

                match self.clause_db.resolve_watch(watch.clause, falsified, &self.trail) {
                    WatchStatus::Satisfied => true,
                    WatchStatus::Rewatch { slot, offset } => {
                        let new_lit = self.clause_db.lits(watch.clause)[offset as usize];
                        self.clause_db.move_watch(watch.clause, slot, offset);
                        self.watches[new_lit].push(Watch {
                            clause: watch.clause,
                        });
                        false
                    }
                    WatchStatus::Unit(unit) => {
                        self.stats.propagations += 1;
                        tracing::debug!("propagating {unit} from clause {:?}", watch.clause);
                        self.trail.force(
                            unit,
                            AssignCause::Propagated {
                                clause: watch.clause,
                            },
                        );
                        true
                    }
                    WatchStatus::Conflict => {
                        conflict = Some(watch.clause);
                        true
                    }
                }
            });

            self.watches[falsified] = watch_list;

            if let Some(clause) = conflict {
                tracing::debug!("conflict in clause {clause:?}");
                return Propagation::Conflict(clause);
            }

            self.unpropagated_pos += 1;
        }

        self.check_watches();

        Propagation::Done
    }

    /// Watch bookkeeping consistency, checked at every quiescent point in
    /// debug builds: the two watch offsets of a clause are distinct and each
    /// corresponds to exactly one watch-list entry, every watch-list entry
    /// corresponds to a watch offset, and no clause watches two false
    /// literals. A no-op in release builds.
    pub(crate) fn check_watches(&self) {
        if !cfg!(debug_assertions) {
            return;
        }

        for idx in self.clause_db.indices() {
            let [o0, o1] = self.clause_db.watched_offsets(idx);
            assert_ne!(o0, o1, "clause {idx:?} watches one offset twice");

            let [w0, w1] = self.clause_db.watched_lits(idx);
            assert!(
                !(self.trail.is_false(w0) && self.trail.is_false(w1)),
                "clause {idx:?} watches two false literals at quiescence"
            );

            for lit in [w0, w1] {
                let entries = self.watches[lit]
                    .iter()
                    .filter(|watch| watch.clause == idx)
                    .count();
                assert_eq!(
                    entries, 1,
                    "clause {idx:?} must appear exactly once in the watch list of {lit}"
                );
            }
        }

        let mut total_watches = 0;
        for list in self.watches.iter() {
            total_watches += list.len();
        }
        assert_eq!(
            total_watches,
            2 * self.clause_db.len(),
            "every clause is watched by exactly two literals"
        );
    }
}

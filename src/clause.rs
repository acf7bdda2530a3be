//! Clause storage and watched-literal resolution.
//!
//! Clauses live contiguously in one arena. Every clause has at least two
//! literals and no variable appears in it twice. The literal sequence of a
//! clause never changes after insertion; the two watches are mutable offsets
//! into it.

use std::ops::Range;

use crate::data::Lit;
use crate::trail::Trail;

/// Stable handle for a clause, indexing [`ClauseDb::headers`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub(crate) struct ClauseIdx(u32);

/// Watch-list entry: a back-reference from a literal to a clause currently
/// watching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Watch {
    pub clause: ClauseIdx,
}

#[derive(Debug, Clone)]
struct ClauseHeader {
    range: Range<u32>,
    /// Offsets of the two watched literals within the clause. Always distinct.
    watched: [u32; 2],
}

/// Outcome of re-examining a clause whose watched literal became false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WatchStatus {
    /// One of the watches is true; the false watch is tolerated until the
    /// clause is visited again.
    Satisfied,
    /// A replacement literal was found; move watch slot `slot` to `offset`.
    Rewatch { slot: usize, offset: u32 },
    /// All literals but the other watch are false; that literal must be made
    /// true.
    Unit(Lit),
    /// Every literal is false.
    Conflict,
}

#[derive(Debug, Default, Clone)]
pub struct ClauseDb {
    lit_data: Vec<Lit>,
    headers: Vec<ClauseHeader>,
}

impl ClauseDb {
    /// Number of stored clauses.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Iterate over the literal sequences of all clauses in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &[Lit]> + '_ {
        self.headers.iter().map(move |header| {
            &self.lit_data[header.range.start as usize..header.range.end as usize]
        })
    }

    pub(crate) fn indices(&self) -> impl Iterator<Item = ClauseIdx> {
        (0..self.headers.len() as u32).map(ClauseIdx)
    }

    /// Store a clause, watching its first two literals.
    pub(crate) fn insert(&mut self, cls: &[Lit]) -> ClauseIdx {
        debug_assert!(cls.len() >= 2, "clauses must have at least two literals");
        debug_assert!(self.lit_data.len() + cls.len() <= u32::MAX as usize);

        let start = self.lit_data.len() as u32;
        self.lit_data.extend_from_slice(cls);
        let end = self.lit_data.len() as u32;

        self.headers.push(ClauseHeader {
            range: start..end,
            watched: [0, 1],
        });
        ClauseIdx(self.headers.len() as u32 - 1)
    }

    pub(crate) fn lits(&self, idx: ClauseIdx) -> &[Lit] {
        let header = &self.headers[idx.0 as usize];
        &self.lit_data[header.range.start as usize..header.range.end as usize]
    }

    /// The two watched literals of the clause.
    pub(crate) fn watched_lits(&self, idx: ClauseIdx) -> [Lit; 2] {
        let lits = self.lits(idx);
        let watched = self.headers[idx.0 as usize].watched;
        [lits[watched[0] as usize], lits[watched[1] as usize]]
    }

    pub(crate) fn watched_offsets(&self, idx: ClauseIdx) -> [u32; 2] {
        self.headers[idx.0 as usize].watched
    }

    /// Move watch slot `slot` of the clause to the literal at `offset`.
    pub(crate) fn move_watch(&mut self, idx: ClauseIdx, slot: usize, offset: u32) {
        let header = &mut self.headers[idx.0 as usize];
        debug_assert!(offset < header.range.end - header.range.start);
        header.watched[slot] = offset;
        debug_assert_ne!(header.watched[0], header.watched[1]);
    }

    /// True iff one of the two watched literals is currently true.
    pub(crate) fn is_watched_true(&self, idx: ClauseIdx, trail: &Trail) -> bool {
        let [w0, w1] = self.watched_lits(idx);
        trail.is_true(w0) || trail.is_true(w1)
    }

    /// Re-examine the clause after `falsified`, one of its watched literals,
    /// became false.
    ///
    /// Checks satisfaction through the other watch first, then scans the
    /// clause in literal order for the first non-false literal outside the
    /// watched pair. Only reports what should happen; the propagation engine
    /// applies watch-list and trail updates.
    pub(crate) fn resolve_watch(&self, idx: ClauseIdx, falsified: Lit, trail: &Trail) -> WatchStatus {
        let lits = self.lits(idx);
        let [o0, o1] = self.watched_offsets(idx);

        let slot = if lits[o0 as usize] == falsified {
            0
        } else {
            debug_assert_eq!(lits[o1 as usize], falsified);
            1
        };

        if self.is_watched_true(idx, trail) {
            return WatchStatus::Satisfied;
        }

        for (offset, &candidate) in lits.iter().enumerate() {
            if offset as u32 == o0 || offset as u32 == o1 {
                continue;
            }
            if !trail.is_false(candidate) {
                return WatchStatus::Rewatch {
                    slot,
                    offset: offset as u32,
                };
            }
        }

        let other_offset = if slot == 0 { o1 } else { o0 };
        let other = lits[other_offset as usize];
        if trail.is_unassigned(other) {
            WatchStatus::Unit(other)
        } else {
            debug_assert!(trail.is_false(other));
            WatchStatus::Conflict
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Var;
    use crate::trail::AssignCause;

    fn clause(lits: &[i32]) -> Vec<Lit> {
        lits.iter().map(|&l| Lit::new(l)).collect()
    }

    fn trail_for(max_var: u32) -> Trail {
        let mut trail = Trail::default();
        trail.expand(Var::new(max_var));
        trail
    }

    #[test]
    fn insert_watches_first_two() {
        let mut db = ClauseDb::default();
        let idx = db.insert(&clause(&[1, -2, 3]));

        assert_eq!(db.watched_lits(idx), [Lit::new(1), Lit::new(-2)]);
        assert_eq!(db.watched_offsets(idx), [0, 1]);
    }

    #[test]
    fn satisfied_through_other_watch_keeps_watches() {
        let mut db = ClauseDb::default();
        let idx = db.insert(&clause(&[1, 2, 3]));

        let mut trail = trail_for(3);
        trail.force(Lit::new(2), AssignCause::InputUnit);
        trail.force(Lit::new(-1), AssignCause::InputUnit);

        // Even though literal 3 would be a valid replacement, the satisfied
        // check comes first and nothing moves.
        assert_eq!(
            db.resolve_watch(idx, Lit::new(1), &trail),
            WatchStatus::Satisfied
        );
        assert_eq!(db.watched_offsets(idx), [0, 1]);
    }

    #[test]
    fn rewatch_picks_first_non_false_in_clause_order() {
        let mut db = ClauseDb::default();
        let idx = db.insert(&clause(&[1, 2, 3, 4]));

        let mut trail = trail_for(4);
        trail.force(Lit::new(-1), AssignCause::InputUnit);
        trail.force(Lit::new(-3), AssignCause::InputUnit);

        assert_eq!(
            db.resolve_watch(idx, Lit::new(1), &trail),
            WatchStatus::Rewatch { slot: 0, offset: 3 }
        );
    }

    #[test]
    fn unit_when_only_other_watch_is_open() {
        let mut db = ClauseDb::default();
        let idx = db.insert(&clause(&[1, 2, 3]));

        let mut trail = trail_for(3);
        trail.force(Lit::new(-1), AssignCause::InputUnit);
        trail.force(Lit::new(-3), AssignCause::InputUnit);

        assert_eq!(
            db.resolve_watch(idx, Lit::new(1), &trail),
            WatchStatus::Unit(Lit::new(2))
        );
    }

    #[test]
    fn conflict_when_every_literal_is_false() {
        let mut db = ClauseDb::default();
        let idx = db.insert(&clause(&[1, 2]));

        let mut trail = trail_for(2);
        trail.force(Lit::new(-2), AssignCause::InputUnit);
        trail.force(Lit::new(-1), AssignCause::InputUnit);

        assert_eq!(
            db.resolve_watch(idx, Lit::new(1), &trail),
            WatchStatus::Conflict
        );
    }
}

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(i64);

impl PersonId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyId(i64);

impl FamilyId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out timestamp-shaped ids that never repeat within one store.
///
/// Every id already present (loaded or imported) must be passed to
/// [`IdAllocator::observe`] so later allocations stay above it.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, id: i64) {
        if id > self.last {
            self.last = id;
        }
    }

    pub fn next(&mut self, now_ms: i64) -> i64 {
        let candidate = if now_ms > self.last {
            now_ms
        } else {
            self.last.saturating_add(1)
        };
        self.last = candidate;
        candidate
    }

    pub fn next_person(&mut self, now_ms: i64) -> PersonId {
        PersonId(self.next(now_ms))
    }

    pub fn next_family(&mut self, now_ms: i64) -> FamilyId {
        FamilyId(self.next(now_ms))
    }

    pub fn last(&self) -> i64 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_is_strictly_increasing_within_one_millisecond() {
        let mut ids = IdAllocator::new();
        let a = ids.next(1_000);
        let b = ids.next(1_000);
        let c = ids.next(999);
        assert_eq!(a, 1_000);
        assert_eq!(b, 1_001);
        assert_eq!(c, 1_002);
    }

    #[test]
    fn allocator_skips_observed_ids() {
        let mut ids = IdAllocator::new();
        ids.observe(5_000);
        ids.observe(10);
        assert_eq!(ids.next(4_000), 5_001);
        assert_eq!(ids.next(9_000), 9_000);
    }
}

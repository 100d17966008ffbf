//! Synthetic member sets for benchmarking.
//!
//! Member 1 is the single root. Every later member i picks a parent
//! uniformly from the members already created (1..i), so the result is
//! always a valid tree with realistic fan-out.

use crate::{member::MemberRecord, rng::SeededRng, types::MemberId};

pub const MIN_MONTHLY_REVENUE: i64 = 1_000;
pub const MAX_MONTHLY_REVENUE: i64 = 10_000;

pub fn generate_members(n: usize, seed: u64) -> Vec<MemberRecord> {
    let mut rng = SeededRng::new(seed);
    let mut members = Vec::with_capacity(n);

    for i in 1..=n as i64 {
        let parent_id = if i == 1 {
            None
        } else {
            Some(MemberId::Int(rng.range_inclusive(1, i - 1)))
        };
        let revenue = rng.range_inclusive(MIN_MONTHLY_REVENUE, MAX_MONTHLY_REVENUE);
        members.push(MemberRecord::new(i, parent_id, revenue as f64));
    }
    log::debug!("Generated {n} members (seed {seed})");
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::Hierarchy;

    #[test]
    fn generated_set_is_a_single_tree() {
        let records = generate_members(500, 42);
        assert_eq!(records.len(), 500);
        assert_eq!(records[0].parent_id, None);
        assert!(records[1..].iter().all(|r| r.parent_id.is_some()));

        let h = Hierarchy::build(records).unwrap();
        assert_eq!(h.len(), 500);
        assert_eq!(h.roots().len(), 1);
    }

    #[test]
    fn same_seed_same_members() {
        assert_eq!(generate_members(100, 9), generate_members(100, 9));
        assert_ne!(generate_members(100, 9), generate_members(100, 10));
    }

    #[test]
    fn zero_members_is_empty() {
        assert!(generate_members(0, 1).is_empty());
    }
}

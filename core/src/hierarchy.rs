//! Hierarchy builder: turns a flat record list into a validated forest.
//!
//! BUILD ORDER (each step sees the full output of the previous one):
//!   1. Collapse duplicate ids, last record wins (revenue AND parent).
//!   2. Link every member to its parent's child list.
//!   3. Reject any cycle, including self-loops.
//!
//! RULES:
//!   - Member order is first-occurrence order of each id. A duplicate
//!     replaces the stored member in place, it does not move it.
//!   - A parent id that resolves to nothing demotes the member to a root.
//!     This is a tolerated input condition, logged but never an error.
//!   - Construction either fully succeeds or returns an error. No partial
//!     hierarchy ever escapes.
//!   - The hierarchy is never mutated after build().

use crate::{
    error::{CommissionError, CommissionResult},
    member::{Member, MemberRecord},
    types::MemberId,
};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Hierarchy {
    members:    Vec<Member>,
    index:      HashMap<MemberId, usize>,
    parents:    Vec<Option<usize>>,
    dangling:   Vec<usize>,
    duplicates: usize,
}

impl Hierarchy {
    /// Build and validate a hierarchy from records in input order.
    pub fn build<I>(records: I) -> CommissionResult<Self>
    where
        I: IntoIterator<Item = MemberRecord>,
    {
        let mut members: Vec<Member> = Vec::new();
        let mut index: HashMap<MemberId, usize> = HashMap::new();
        let mut duplicates = 0usize;

        for record in records {
            match index.get(&record.id) {
                Some(&slot) => {
                    members[slot] = Member::from_record(record);
                    duplicates += 1;
                }
                None => {
                    index.insert(record.id.clone(), members.len());
                    members.push(Member::from_record(record));
                }
            }
        }

        let mut parents: Vec<Option<usize>> = vec![None; members.len()];
        let mut dangling: Vec<usize> = Vec::new();

        for child in 0..members.len() {
            let Some(parent_id) = members[child].parent_id.clone() else {
                continue;
            };
            match index.get(&parent_id) {
                Some(&parent) => {
                    members[parent].children.push(child);
                    parents[child] = Some(parent);
                }
                None => {
                    log::warn!(
                        "Member {} references unknown parent {parent_id}; treating as root",
                        members[child].id
                    );
                    dangling.push(child);
                }
            }
        }

        check_for_cycles(&members)?;

        log::debug!(
            "Hierarchy built: {} members, {} duplicate records collapsed, {} dangling parents",
            members.len(),
            duplicates,
            dangling.len()
        );

        Ok(Self {
            members,
            index,
            parents,
            dangling,
            duplicates,
        })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &MemberId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &MemberId) -> Option<&Member> {
        self.index_of(id).map(|i| &self.members[i])
    }

    /// Stable position of `id` in the member table.
    pub fn index_of(&self, id: &MemberId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Panics if `index` is out of range. Indices come from this hierarchy.
    pub fn member_at(&self, index: usize) -> &Member {
        &self.members[index]
    }

    /// Members in internal order (first occurrence of each id).
    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    /// Direct children of `id` in link order, or None for an unknown id.
    pub fn children(&self, id: &MemberId) -> Option<Vec<&Member>> {
        self.get(id).map(|m| {
            m.children
                .iter()
                .map(|&c| &self.members[c])
                .collect()
        })
    }

    /// The resolved parent of `id`. None for roots, including members
    /// whose parent id pointed nowhere.
    pub fn parent(&self, id: &MemberId) -> Option<&Member> {
        let i = self.index_of(id)?;
        self.parents[i].map(|p| &self.members[p])
    }

    /// Every member without a resolved parent.
    pub fn roots(&self) -> Vec<&Member> {
        self.members
            .iter()
            .zip(&self.parents)
            .filter(|(_, parent)| parent.is_none())
            .map(|(m, _)| m)
            .collect()
    }

    /// Members whose `parent_id` was set but matched no known member.
    pub fn dangling_parents(&self) -> Vec<&Member> {
        self.dangling.iter().map(|&i| &self.members[i]).collect()
    }

    /// Number of input records that overwrote an earlier record.
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }
}

/// Depth-first walk from every unvisited member with an explicit frame
/// stack. A child found on the current path closes a cycle.
fn check_for_cycles(members: &[Member]) -> CommissionResult<()> {
    let mut visited = vec![false; members.len()];
    let mut on_path = vec![false; members.len()];
    // (member index, next child position)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..members.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        on_path[start] = true;
        stack.push((start, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            match members[node].children.get(next) {
                Some(&child) => {
                    frame.1 += 1;
                    if !visited[child] {
                        visited[child] = true;
                        on_path[child] = true;
                        stack.push((child, 0));
                    } else if on_path[child] {
                        return Err(CommissionError::Cycle {
                            member: members[child].id.to_string(),
                        });
                    }
                }
                None => {
                    on_path[node] = false;
                    stack.pop();
                }
            }
        }
    }
    Ok(())
}

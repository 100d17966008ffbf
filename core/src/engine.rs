//! The aggregation engine: turns a validated hierarchy into commissions.
//!
//! A member's contribution is the sum, over its direct children, of the
//! child's daily revenue plus the child's own contribution. A member's own
//! revenue is counted by its parent, never by itself, so leaves
//! contribute 0 and a root's contribution excludes its own revenue.
//!
//! RULES:
//!   - The memo table belongs to one engine instance. Two engines over
//!     the same hierarchy never share or merge their memos.
//!   - Every member's contribution is computed at most once per engine.
//!   - Commission = round_half_up(rate * contribution), rate applied first.
//!   - The hierarchy is read-only here.

use crate::{
    config::CommissionConfig,
    error::{CommissionError, CommissionResult},
    hierarchy::Hierarchy,
    rounding::round_half_up,
    types::MemberId,
};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

pub struct CommissionEngine<'h> {
    hierarchy:    &'h Hierarchy,
    config:       CommissionConfig,
    memo:         HashMap<usize, f64>,
    computations: u64,
}

impl<'h> CommissionEngine<'h> {
    /// Engine with the default 5% rule.
    pub fn new(hierarchy: &'h Hierarchy) -> Self {
        Self::with_config(hierarchy, CommissionConfig::default())
    }

    pub fn with_config(hierarchy: &'h Hierarchy, config: CommissionConfig) -> Self {
        Self {
            hierarchy,
            config,
            memo: HashMap::new(),
            computations: 0,
        }
    }

    pub fn hierarchy(&self) -> &'h Hierarchy {
        self.hierarchy
    }

    pub fn config(&self) -> &CommissionConfig {
        &self.config
    }

    /// Total downstream contribution of `id`, before rate and rounding.
    pub fn contribution(&mut self, id: &MemberId) -> CommissionResult<f64> {
        let index = self
            .hierarchy
            .index_of(id)
            .ok_or_else(|| CommissionError::UnknownMember { id: id.to_string() })?;
        Ok(self.contribution_at(index))
    }

    /// Commission for every member, in hierarchy order.
    pub fn calculate_commissions(&mut self) -> CommissionResult<Commissions> {
        let hierarchy = self.hierarchy;
        let mut entries = Vec::with_capacity(hierarchy.len());

        for (index, member) in hierarchy.iter().enumerate() {
            let contribution = self.contribution_at(index);
            let commission =
                round_half_up(self.config.rate * contribution, self.config.decimal_places)?;
            entries.push((member.id.to_string(), commission));
        }

        log::debug!(
            "Commissions calculated for {} members ({} contributions computed)",
            entries.len(),
            self.computations
        );
        Ok(Commissions { entries })
    }

    /// Number of members with a cached contribution.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Cached contribution of `id`, if this engine has computed it.
    pub fn memoized(&self, id: &MemberId) -> Option<f64> {
        let index = self.hierarchy.index_of(id)?;
        self.memo.get(&index).copied()
    }

    /// Contributions actually computed so far. Cache hits do not count.
    pub fn computations(&self) -> u64 {
        self.computations
    }

    /// Iterative post-order walk. Each frame is visited twice: once to
    /// queue its uncached children, once to sum them.
    fn contribution_at(&mut self, start: usize) -> f64 {
        if let Some(&total) = self.memo.get(&start) {
            return total;
        }
        let hierarchy = self.hierarchy;
        // (member index, children already queued)
        let mut stack: Vec<(usize, bool)> = vec![(start, false)];

        while let Some((node, expanded)) = stack.pop() {
            let member = hierarchy.member_at(node);
            if expanded {
                let mut total = 0.0;
                for &child in member.child_indices() {
                    total += hierarchy.member_at(child).daily_revenue();
                    // Children finish before their parent in post-order.
                    total += self.memo[&child];
                }
                self.memo.insert(node, total);
                self.computations += 1;
            } else if !self.memo.contains_key(&node) {
                stack.push((node, true));
                for &child in member.child_indices().iter().rev() {
                    if !self.memo.contains_key(&child) {
                        stack.push((child, false));
                    }
                }
            }
        }
        self.memo[&start]
    }
}

/// Member id (external string form) to rounded commission.
///
/// Kept in hierarchy order; serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Commissions {
    entries: Vec<(String, f64)>,
}

impl Commissions {
    pub fn get(&self, id: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Sum of all rounded commissions.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, value)| value).sum()
    }
}

impl Serialize for Commissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

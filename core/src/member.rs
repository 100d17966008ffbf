//! Member records as delivered by a loader, and the linked member nodes
//! the hierarchy owns.

use crate::{
    error::{CommissionError, CommissionResult},
    types::{MemberId, DAYS_PER_MONTH},
};
use serde::{Deserialize, Serialize};

/// One raw input row. Order of records is significant: it drives
/// last-write-wins duplicate resolution and child ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id:              MemberId,
    #[serde(default)]
    pub parent_id:       Option<MemberId>,
    pub monthly_revenue: f64,
}

impl MemberRecord {
    pub fn new(id: impl Into<MemberId>, parent_id: Option<MemberId>, monthly_revenue: f64) -> Self {
        Self {
            id: id.into(),
            parent_id,
            monthly_revenue,
        }
    }

    /// Loader-side check. The hierarchy itself assumes revenue is a
    /// finite, non-negative number and never calls this.
    pub fn validate(&self, position: usize) -> CommissionResult<()> {
        if !self.monthly_revenue.is_finite() {
            return Err(CommissionError::InvalidRecord {
                position,
                reason: format!("member {} has non-finite revenue", self.id),
            });
        }
        if self.monthly_revenue < 0.0 {
            return Err(CommissionError::InvalidRecord {
                position,
                reason: format!(
                    "member {} has negative revenue {}",
                    self.id, self.monthly_revenue
                ),
            });
        }
        Ok(())
    }
}

/// A node in the hierarchy.
///
/// `children` holds indices into the owning hierarchy's member table.
/// The table is the only owner; these are lookups, not ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id:              MemberId,
    pub parent_id:       Option<MemberId>,
    pub monthly_revenue: f64,
    pub(crate) children: Vec<usize>,
}

impl Member {
    pub(crate) fn from_record(record: MemberRecord) -> Self {
        Self {
            id:              record.id,
            parent_id:       record.parent_id,
            monthly_revenue: record.monthly_revenue,
            children:        Vec::new(),
        }
    }

    pub fn daily_revenue(&self) -> f64 {
        self.monthly_revenue / DAYS_PER_MONTH
    }

    /// Indices of direct children, in link order.
    pub fn child_indices(&self) -> &[usize] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_revenue_is_exact_division() {
        let m = Member::from_record(MemberRecord::new(1, None, 4500.0));
        assert_eq!(m.daily_revenue(), 150.0);

        let m = Member::from_record(MemberRecord::new(2, None, 1000.0));
        assert_eq!(m.daily_revenue(), 1000.0 / 30.0);
    }

    #[test]
    fn parent_id_may_be_absent_or_null() {
        let recs: Vec<MemberRecord> = serde_json::from_str(
            r#"[
                {"id": 1, "monthly_revenue": 3000},
                {"id": 2, "parent_id": null, "monthly_revenue": 10},
                {"id": 3, "parent_id": 1, "monthly_revenue": 2.5}
            ]"#,
        )
        .unwrap();
        assert_eq!(recs[0].parent_id, None);
        assert_eq!(recs[1].parent_id, None);
        assert_eq!(recs[2].parent_id, Some(MemberId::Int(1)));
        assert_eq!(recs[2].monthly_revenue, 2.5);
    }

    #[test]
    fn validate_rejects_negative_and_non_finite_revenue() {
        assert!(MemberRecord::new(1, None, 0.0).validate(0).is_ok());

        let err = MemberRecord::new(1, None, -5.0).validate(3).unwrap_err();
        assert!(matches!(err, CommissionError::InvalidRecord { position: 3, .. }));

        let err = MemberRecord::new(1, None, f64::NAN).validate(0).unwrap_err();
        assert!(matches!(err, CommissionError::InvalidRecord { .. }));
    }
}

//! Shared primitive types used across the whole engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Days a monthly revenue figure is spread across.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Opaque member key as it arrives from the loader.
///
/// Ids are not assumed to be contiguous or even numeric. An integer id and
/// a string id never compare equal, so `1` and `"1"` are different members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberId {
    Int(i64),
    Text(String),
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberId::Int(n)  => write!(f, "{n}"),
            MemberId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MemberId {
    fn from(n: i64) -> Self {
        MemberId::Int(n)
    }
}

impl From<i32> for MemberId {
    fn from(n: i32) -> Self {
        MemberId::Int(n.into())
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        MemberId::Text(s.to_string())
    }
}

impl From<String> for MemberId {
    fn from(s: String) -> Self {
        MemberId::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_render_in_external_form() {
        assert_eq!(MemberId::from(42).to_string(), "42");
        assert_eq!(MemberId::from(-7).to_string(), "-7");
        assert_eq!(MemberId::from("A-17").to_string(), "A-17");
    }

    #[test]
    fn int_and_text_ids_are_distinct() {
        assert_ne!(MemberId::from(1), MemberId::from("1"));
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let ids: Vec<MemberId> = serde_json::from_str(r#"[1, "x", 30]"#).unwrap();
        assert_eq!(ids, vec![MemberId::Int(1), MemberId::from("x"), MemberId::Int(30)]);
    }
}

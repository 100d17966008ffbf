//! Referral-hierarchy commission engine.
//!
//! Flow: records → [`hierarchy::Hierarchy::build`] → validated forest →
//! [`engine::CommissionEngine::calculate_commissions`] → id → commission.

pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod hierarchy;
pub mod io;
pub mod member;
pub mod rng;
pub mod rounding;
pub mod timing;
pub mod types;

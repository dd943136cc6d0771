//! Scoring core for the Signals networking platform.
//!
//! The library owns the gamification rules (activity score, badges,
//! compatibility ranking) and nothing else; authentication, persistence, and
//! realtime delivery stay with the surrounding application, which reaches the
//! engine through the [`gamification::GamificationStore`] port.

pub mod config;
pub mod error;
pub mod gamification;
pub mod telemetry;

//! HTTP handlers for the quiz service.

pub mod health;
pub mod quiz;

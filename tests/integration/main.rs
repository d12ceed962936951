//! Integration tests for readable-article
//!
//! These tests verify the complete extraction pipeline works end-to-end
//! with realistic HTML samples.

mod edge_cases;
mod feature_combinations;
mod real_world_articles;

//! Integration tests for the tree comparison engine

mod comparison_scenarios;
mod test_utils;

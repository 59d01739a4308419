//! Scenario-based tests for shipgate


mod gate_rules;
mod snapshot_format;

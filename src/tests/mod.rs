//! Scenario tests driving the chain core against a deterministic fake node.

mod builder;

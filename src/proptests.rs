//! Property-based tests for the evaluator.

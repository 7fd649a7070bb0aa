//! Aggregation and assessment tests.

mod classify_test;

//! Language model client tests.

mod openrouter_test;

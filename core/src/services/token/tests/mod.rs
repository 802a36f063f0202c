//! Tests for the token module.

mod service_tests;

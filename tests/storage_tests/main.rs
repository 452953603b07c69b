//! Tests for durable persistence

mod atomic_tests;

//! Tests for the Portal session

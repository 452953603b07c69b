//! Tests for the in-memory record store

//! Unit tests for the profile context.

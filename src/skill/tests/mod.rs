//! Unit tests for the skill context.

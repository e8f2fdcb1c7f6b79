//! Step definitions for task lifecycle scenarios.

mod then;
mod when;

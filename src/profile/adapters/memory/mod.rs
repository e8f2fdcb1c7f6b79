//! In-memory profile adapter.

mod profile;

pub use profile::InMemoryProfileRepository;

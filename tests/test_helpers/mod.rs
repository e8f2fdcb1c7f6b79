//! Process environment guard shared by the cluster harness.
//!
//! Embedded `PostgreSQL` bootstrap reads its settings from environment
//! variables, so every mutation is serialized behind one global lock and
//! undone when the guard drops.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Applies environment changes until dropped.
pub struct EnvVarGuard {
    restore: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets or removes each variable; `None` removes it.
    pub fn set_many(changes: &[(OsString, Option<OsString>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let restore = changes
            .iter()
            .map(|(key, value)| {
                let previous = env::var_os(key);
                apply(key, value.as_deref());
                (key.clone(), previous)
            })
            .collect();

        Self {
            restore,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restore.drain(..).rev() {
            apply(&key, previous.as_deref());
        }
    }
}

fn apply(key: &OsString, value: Option<&std::ffi::OsStr>) {
    // SAFETY: callers hold ENV_MUTEX, so no other test thread mutates the
    // environment concurrently.
    unsafe {
        match value {
            Some(new_value) => env::set_var(key, new_value),
            None => env::remove_var(key),
        }
    }
}

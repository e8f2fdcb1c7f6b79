//! Environment helpers for `PostgreSQL` test clusters.

use super::BoxError;
use std::ffi::OsString;
use std::net::TcpListener;

pub(super) fn env_vars_to_os(
    env_vars: &[(String, Option<String>)],
) -> Vec<(OsString, Option<OsString>)> {
    env_vars
        .iter()
        .map(|(key, value)| (OsString::from(key), value.as_ref().map(OsString::from)))
        .collect()
}

/// Picks a free port unless `PG_PORT` already names one.
pub(super) fn port_env_changes() -> Result<Vec<(OsString, Option<OsString>)>, BoxError> {
    if std::env::var_os("PG_PORT").is_some() {
        return Ok(Vec::new());
    }

    let listener = TcpListener::bind(("127.0.0.1", 0)).map_err(|err| Box::new(err) as BoxError)?;
    let port = listener
        .local_addr()
        .map(|addr| addr.port())
        .map_err(|err| Box::new(err) as BoxError)?;
    drop(listener);

    Ok(vec![(
        OsString::from("PG_PORT"),
        Some(OsString::from(port.to_string())),
    )])
}

//! Filesystem helpers for `PostgreSQL` test clusters.

use super::BoxError;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use postgresql_embedded::Settings;

fn open_ambient_dir(path: &Utf8Path) -> Result<Dir, BoxError> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|err| Box::new(err) as BoxError)
}

pub(super) fn sync_password_from_file(settings: &mut Settings) -> Result<(), BoxError> {
    let lossy_path = settings.password_file.to_string_lossy();
    let password_path = Utf8Path::new(lossy_path.as_ref());
    let file_name = password_path.file_name().ok_or_else(|| {
        Box::new(std::io::Error::other("password path must include a file name")) as BoxError
    })?;
    let dir = open_ambient_dir(password_path.parent().unwrap_or_else(|| Utf8Path::new(".")))?;
    match dir.read_to_string(file_name) {
        Ok(contents) => {
            let password = contents.trim_end();
            if !password.is_empty() {
                password.clone_into(&mut settings.password);
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(Box::new(err) as BoxError),
    }
    Ok(())
}

/// Reads the port the server actually bound from `postmaster.pid`.
pub(super) fn sync_port_from_pid(settings: &mut Settings) -> Result<(), BoxError> {
    let lossy_dir = settings.data_dir.to_string_lossy();
    let data_dir = open_ambient_dir(Utf8Path::new(lossy_dir.as_ref()))?;
    let contents = match data_dir.read_to_string("postmaster.pid") {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(Box::new(err) as BoxError),
    };

    let Some(port) = contents
        .lines()
        .nth(3)
        .and_then(|line| line.trim().parse::<u16>().ok())
    else {
        return Ok(());
    };
    settings.port = port;
    Ok(())
}

use std::path::PathBuf;

/// Supplies the directory dump files are written to.
///
/// The writer tolerates absence of this collaborator and falls back to a
/// `logs` directory under the current working directory.
pub trait LogPathConfig: Send + Sync {
    fn log_path(&self) -> PathBuf;
}

/// Supplies the identity shown in a rich dump's header.
///
/// Consulted only when configured; a `None` user simply omits the
/// `by:` annotation.
pub trait IdentitySource: Send + Sync {
    fn current_user_id(&self) -> Option<String>;
}

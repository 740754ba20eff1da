use std::path::{Path, PathBuf};

/// Load `.env` from the working directory, then the one next to the
/// executable. Variables already set in the process win.
pub fn load_env() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    if let Ok(mut exe_path) = std::env::current_exe() {
        exe_path.pop();
        let env_path: PathBuf = exe_path.join(".env");
        if env_path.exists() && load_from_path(&env_path) {
            tracing::debug!(path = %env_path.display(), "loaded .env next to executable");
        }
    }
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> bool {
    dotenvy::from_path(path.as_ref()).is_ok()
}

pub fn var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

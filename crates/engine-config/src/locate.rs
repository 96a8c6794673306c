use std::{
    env,
    path::{Path, PathBuf},
};

/// Name of the configuration file shipped next to the binary.
pub const PROPERTIES_FILE: &str = "application.properties";

/// Directory name searched for bundled resources beside the executable.
const RESOURCES_DIR: &str = "resources";

/// Candidate locations for the properties file, in lookup order:
/// the executable's directory, its `resources/` subdirectory, then the
/// current working directory.
pub fn candidates() -> Vec<PathBuf> {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = env::current_dir().ok();
    candidates_from(exe_dir.as_deref(), cwd.as_deref())
}

pub(crate) fn candidates_from(exe_dir: Option<&Path>, cwd: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);
    if let Some(dir) = exe_dir {
        paths.push(dir.join(PROPERTIES_FILE));
        paths.push(dir.join(RESOURCES_DIR).join(PROPERTIES_FILE));
    }
    if let Some(dir) = cwd {
        let path = dir.join(PROPERTIES_FILE);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

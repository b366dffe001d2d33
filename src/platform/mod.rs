//! Per-platform extension store locations.
//!
//! The candidate table is a static mapping from platform to path templates;
//! it performs no filesystem I/O and most candidates will not exist on any
//! given machine. Existence checks belong to the store reader.

use std::path::{Path, PathBuf};

/// Operating system family the auditor runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Unknown,
}

impl Platform {
    /// Detect the platform of the current process.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Candidate extension store locations for this machine, in priority order
/// (stable channel before beta before dev).
pub fn candidate_store_paths(platform: Platform) -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        tracing::warn!("could not resolve home directory, no store candidates");
        return Vec::new();
    };
    let local_app_data = std::env::var_os("LOCALAPPDATA").map(PathBuf::from);
    candidate_paths_from(platform, &home, local_app_data.as_deref())
}

/// Pure candidate construction from explicit roots.
fn candidate_paths_from(
    platform: Platform,
    home: &Path,
    local_app_data: Option<&Path>,
) -> Vec<PathBuf> {
    match platform {
        Platform::Windows => {
            let app_data = local_app_data
                .map(Path::to_path_buf)
                .unwrap_or_else(|| home.join("AppData").join("Local"));
            ["Chrome", "Chrome Beta", "Chrome Dev"]
                .iter()
                .map(|channel| {
                    app_data
                        .join("Google")
                        .join(channel)
                        .join("User Data")
                        .join("Default")
                        .join("Extensions")
                })
                .collect()
        }
        Platform::MacOs => {
            let app_support = home.join("Library").join("Application Support");
            ["Chrome", "Chrome Beta"]
                .iter()
                .map(|channel| {
                    app_support
                        .join("Google")
                        .join(channel)
                        .join("Default")
                        .join("Extensions")
                })
                .collect()
        }
        Platform::Linux => vec![
            home.join(".config")
                .join("google-chrome")
                .join("Default")
                .join("Extensions"),
            home.join(".config")
                .join("chromium")
                .join("Default")
                .join("Extensions"),
            // Flatpak installs keep their config under ~/.var/app
            home.join(".var")
                .join("app")
                .join("com.google.Chrome")
                .join("config")
                .join("google-chrome")
                .join("Default")
                .join("Extensions"),
        ],
        Platform::Unknown => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_prefers_local_app_data() {
        let home = Path::new("C:/Users/alice");
        let lad = Path::new("D:/AppData/Local");
        let paths = candidate_paths_from(Platform::Windows, home, Some(lad));
        assert_eq!(paths.len(), 3);
        assert!(paths[0].starts_with(lad));
        assert!(paths[0].ends_with("Chrome/User Data/Default/Extensions"));
        assert!(paths[1].ends_with("Chrome Beta/User Data/Default/Extensions"));
        assert!(paths[2].ends_with("Chrome Dev/User Data/Default/Extensions"));
    }

    #[test]
    fn windows_falls_back_to_home_app_data() {
        let home = Path::new("C:/Users/alice");
        let paths = candidate_paths_from(Platform::Windows, home, None);
        assert!(paths[0].starts_with(home.join("AppData").join("Local")));
    }

    #[test]
    fn macos_stable_before_beta() {
        let home = Path::new("/Users/alice");
        let paths = candidate_paths_from(Platform::MacOs, home, None);
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("Google/Chrome/Default/Extensions"));
        assert!(paths[1].ends_with("Google/Chrome Beta/Default/Extensions"));
    }

    #[test]
    fn linux_includes_chromium_and_flatpak() {
        let home = Path::new("/home/alice");
        let paths = candidate_paths_from(Platform::Linux, home, None);
        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with(".config/google-chrome/Default/Extensions"));
        assert!(paths[1].ends_with(".config/chromium/Default/Extensions"));
        assert!(paths[2]
            .to_string_lossy()
            .contains(".var/app/com.google.Chrome"));
    }

    #[test]
    fn unknown_platform_has_no_candidates() {
        let paths = candidate_paths_from(Platform::Unknown, Path::new("/home/alice"), None);
        assert!(paths.is_empty());
    }
}

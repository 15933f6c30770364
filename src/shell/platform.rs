//! Platform and environment detection.

use std::path::PathBuf;

/// Check if running in a CI environment.
///
/// Used to force non-interactive output in `main()`.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// File name an executable has on this platform (`python3` vs `python3.exe`).
pub fn executable_name(tool: &str) -> String {
    if cfg!(target_os = "windows") && !tool.ends_with(".exe") {
        format!("{}.exe", tool)
    } else {
        tool.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_ci_detects_environment() {
        let ci_vars = [
            "CI",
            "GITHUB_ACTIONS",
            "GITLAB_CI",
            "CIRCLECI",
            "TRAVIS",
            "JENKINS_URL",
        ];
        let saved: Vec<_> = ci_vars
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();
        for k in &ci_vars {
            std::env::remove_var(k);
        }

        let outside = is_ci();
        std::env::set_var("GITLAB_CI", "true");
        let inside = is_ci();
        std::env::remove_var("GITLAB_CI");

        // Restore env vars
        for (k, v) in &saved {
            if let Some(val) = v {
                std::env::set_var(k, val);
            }
        }
        assert!(!outside);
        assert!(inside);
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn executable_name_is_unchanged_on_unix() {
        assert_eq!(executable_name("python3"), "python3");
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn executable_name_adds_exe_on_windows() {
        assert_eq!(executable_name("python"), "python.exe");
        assert_eq!(executable_name("python.exe"), "python.exe");
    }

    #[test]
    fn parse_system_path_matches_env() {
        let parsed = parse_system_path();
        if std::env::var_os("PATH").is_none() {
            assert!(parsed.is_empty());
        }
    }
}

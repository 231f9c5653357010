mod init;
mod schema;

pub use init::{run_init_wizard, write_profile};
pub use schema::Profile;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/bio-age/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("bio-age"))
}

/// Get the default profile path (~/.config/bio-age/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Pick where a profile is written: an explicit target first, then the
/// global `--config` path, then the default location.
///
/// Using the same `--config` path for writing and for `load_profile` keeps
/// `init` and `score` pointed at the same file.
pub fn resolve_profile_path(path: Option<PathBuf>, config: Option<PathBuf>) -> Result<PathBuf> {
    match path.or(config) {
        Some(p) => Ok(p),
        None => get_config_path(),
    }
}

/// Load the profile.
///
/// # Arguments
///
/// * `path` - Optional path to a profile. If None, uses the default path
///   (~/.config/bio-age/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly passed file does not exist
/// - The file cannot be read
/// - The YAML cannot be parsed or contains unknown fields
///
/// A missing file at the default path is not an error; an empty profile is
/// returned instead.
pub fn load_profile(path: Option<PathBuf>) -> Result<Profile> {
    let (profile_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path()?, false),
    };

    if !profile_path.exists() {
        if explicit {
            anyhow::bail!("Profile not found at {}", profile_path.display());
        }
        tracing::debug!(path = %profile_path.display(), "no profile, using defaults");
        return Ok(Profile::default());
    }

    read_profile(&profile_path)
}

fn read_profile(path: &Path) -> Result<Profile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile at {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(Profile::default());
    }

    let profile: Profile = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse profile: invalid YAML in {}", path.display()))?;

    tracing::debug!(path = %path.display(), "loaded profile");
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Sex;
    use std::env;

    #[test]
    fn test_resolve_profile_path_prefers_explicit_path() {
        let path = resolve_profile_path(
            Some(PathBuf::from("/tmp/explicit.yaml")),
            Some(PathBuf::from("/tmp/global.yaml")),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/explicit.yaml"));
    }

    #[test]
    fn test_resolve_profile_path_falls_back_to_config_flag() {
        let path = resolve_profile_path(None, Some(PathBuf::from("/tmp/global.yaml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/global.yaml"));
    }

    #[test]
    fn test_resolve_profile_path_defaults_to_config_dir() {
        let path = resolve_profile_path(None, None).unwrap();
        assert_eq!(path, get_config_path().unwrap());
        assert!(path.ends_with(".config/bio-age/config.yaml"));
    }

    #[test]
    fn test_written_profile_loads_from_config_path() {
        let config = env::temp_dir().join("bio_age_test_config_flag_profile.yaml");
        let _ = fs::remove_file(&config);

        let target = resolve_profile_path(None, Some(config.clone())).unwrap();
        let profile = Profile {
            sex: Some(Sex::Female),
            ..Profile::default()
        };
        write_profile(&target, &profile, false).unwrap();

        assert_eq!(load_profile(Some(config.clone())).unwrap(), profile);

        let _ = fs::remove_file(&config);
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let path = env::temp_dir().join("bio_age_test_missing_profile.yaml");
        let _ = fs::remove_file(&path);

        let err = load_profile(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Profile not found"));
    }

    #[test]
    fn test_load_profile_from_file() {
        let path = env::temp_dir().join("bio_age_test_load_profile.yaml");
        fs::write(&path, "sex: female\nvo2_max: 44.5\n").unwrap();

        let profile = load_profile(Some(path.clone())).unwrap();
        assert_eq!(profile.sex, Some(Sex::Female));
        assert_eq!(profile.vo2_max, Some(44.5));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_file_is_empty_profile() {
        let path = env::temp_dir().join("bio_age_test_empty_profile.yaml");
        fs::write(&path, "\n").unwrap();

        assert_eq!(load_profile(Some(path.clone())).unwrap(), Profile::default());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let path = env::temp_dir().join("bio_age_test_bad_profile.yaml");
        fs::write(&path, "hrv: [not a number\n").unwrap();

        let err = load_profile(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse profile"));

        let _ = fs::remove_file(&path);
    }
}

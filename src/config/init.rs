use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::Path;

use super::schema::Profile;
use crate::scoring::{BiometricInput, Metric, Sex};

/// Prompt with a message and return the trimmed line that was entered.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<String> {
    write!(out, "{}", message).context("Failed to write prompt")?;
    out.flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim().to_string())
}

/// Prompt with a default value. Returns the default if input is empty.
fn prompt_with_default<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
    default: &str,
) -> Result<String> {
    let line = prompt(input, out, &format!("{} [{}]: ", message, default))?;
    if line.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(line)
    }
}

/// Ask for one numeric metric until a value inside its domain is given.
fn prompt_metric<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    metric: Metric,
    default: f64,
) -> Result<f64> {
    let domain = metric.domain();
    let message = format!(
        "{} ({}, {}-{})",
        metric.label(),
        metric.unit(),
        domain.min,
        domain.max
    );
    loop {
        let line = prompt_with_default(input, out, &message, &default.to_string())?;
        match line.parse::<f64>() {
            Ok(v) if domain.contains(v) => return Ok(v),
            Ok(_) => writeln!(
                out,
                "  Invalid: must be between {} and {}. Try again.",
                domain.min, domain.max
            )?,
            Err(_) => writeln!(out, "  Invalid: must be a number. Try again.")?,
        }
    }
}

/// Walk through every input and return the completed profile.
///
/// `start` supplies the value offered as each prompt's default.
pub fn run_init_wizard<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    start: &BiometricInput,
) -> Result<Profile> {
    writeln!(out, "Biological Age Profile")?;
    writeln!(out, "======================")?;
    writeln!(out, "Press enter to keep the value in brackets.")?;
    writeln!(out)?;

    let sex = loop {
        let line = prompt_with_default(input, out, "Sex (male/female)", start.sex.as_str())?;
        match line.parse::<Sex>() {
            Ok(sex) => break sex,
            Err(e) => writeln!(out, "  Invalid: {}. Try again.", e)?,
        }
    };

    let mut values = [0.0; 6];
    for (slot, metric) in values.iter_mut().zip(Metric::ALL) {
        *slot = prompt_metric(input, out, metric, start.value(metric))?;
    }
    let [hrv, rhr, body_fat_pct, height_inches, weight_lbs, vo2_max] = values;

    Ok(Profile::from_input(&BiometricInput {
        sex,
        hrv,
        rhr,
        body_fat_pct,
        height_inches,
        weight_lbs,
        vo2_max,
    }))
}

/// Write a profile as YAML atomically.
///
/// Refuses to replace an existing file unless `overwrite` is set. Parent
/// directories are created as needed.
pub fn write_profile(path: &Path, profile: &Profile, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        anyhow::bail!(
            "Refusing to overwrite existing profile at {} (pass --force to replace it)",
            path.display()
        );
    }

    let yaml = serde_saphyr::to_string(profile)
        .map_err(|e| anyhow::anyhow!("Failed to serialize profile: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes()).context("Failed to write profile")?;
    file.commit().context("Failed to save profile")?;

    tracing::debug!(path = %path.display(), "wrote profile");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_profile;
    use std::env;
    use std::io::Cursor;

    #[test]
    fn test_wizard_accepts_defaults() {
        let mut input = Cursor::new("\n\n\n\n\n\n\n");
        let mut out = Vec::new();
        let profile = run_init_wizard(&mut input, &mut out, &BiometricInput::default()).unwrap();
        assert_eq!(profile.resolve(), BiometricInput::default());
    }

    #[test]
    fn test_wizard_retries_invalid_values() {
        // bad sex, then female; hrv out of range, then 64; rest defaults
        let mut input = Cursor::new("other\nfemale\n500\nabc\n64\n\n\n\n\n\n");
        let mut out = Vec::new();
        let profile = run_init_wizard(&mut input, &mut out, &BiometricInput::default()).unwrap();

        assert_eq!(profile.sex, Some(Sex::Female));
        assert_eq!(profile.hrv, Some(64.0));
        assert_eq!(profile.rhr, Some(52.0));

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("invalid sex 'other'"));
        assert!(transcript.contains("must be between 20 and 120"));
        assert!(transcript.contains("must be a number"));
    }

    #[test]
    fn test_write_then_load_profile() {
        let path = env::temp_dir().join("bio_age_test_write_profile.yaml");
        let _ = std::fs::remove_file(&path);

        let profile = Profile::from_input(&BiometricInput {
            sex: Sex::Female,
            vo2_max: 41.5,
            ..BiometricInput::default()
        });
        write_profile(&path, &profile, false).unwrap();

        let loaded = load_profile(Some(path.clone())).unwrap();
        assert_eq!(loaded, profile);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_write_refuses_overwrite() {
        let path = env::temp_dir().join("bio_age_test_overwrite_profile.yaml");
        std::fs::write(&path, "sex: male\n").unwrap();

        let err = write_profile(&path, &Profile::default(), false).unwrap_err();
        assert!(err.to_string().contains("Refusing to overwrite"));
        assert!(write_profile(&path, &Profile::default(), true).is_ok());

        let _ = std::fs::remove_file(&path);
    }
}

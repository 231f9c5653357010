use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::scoring::{BiometricInput, Metric, ScoreResult, SubScores};

/// Bar width used when stdout is not a terminal.
const DEFAULT_BAR_WIDTH: usize = 20;
const MAX_BAR_WIDTH: usize = 40;
/// Label + raw value + score columns of a breakdown row.
const BREAKDOWN_FIXED_WIDTH: usize = 2 + 10 + 14 + 7 + 2;

/// Traffic-light band for a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        if score >= 70.0 {
            ScoreBand::Good
        } else if score >= 40.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }

    fn paint(&self, text: &str) -> String {
        match self {
            ScoreBand::Good => text.green().to_string(),
            ScoreBand::Fair => text.yellow().to_string(),
            ScoreBand::Poor => text.red().to_string(),
        }
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Width of the breakdown bars for the current terminal.
pub fn bar_width() -> usize {
    match get_terminal_width() {
        Some(width) if width > BREAKDOWN_FIXED_WIDTH + 10 => {
            (width - BREAKDOWN_FIXED_WIDTH).min(MAX_BAR_WIDTH)
        }
        Some(_) => 10,
        None => DEFAULT_BAR_WIDTH,
    }
}

/// Fitness score with one decimal, e.g. "81.8"
pub fn format_fitness_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Biological age with one decimal and a unit, e.g. "30.9 years"
pub fn format_biological_age(age: f64) -> String {
    format!("{:.1} years", age)
}

/// Horizontal bar for a 0-100 score. Scores above 100 render as full.
pub fn score_bar(score: f64, width: usize, use_colors: bool) -> String {
    let ratio = (score / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    if use_colors {
        format!(
            "{}{}",
            ScoreBand::for_score(score).paint(&filled_str),
            empty_str.dimmed()
        )
    } else {
        format!("{}{}", filled_str, empty_str)
    }
}

/// The two headline lines shown to the user.
pub fn format_summary(result: &ScoreResult, use_colors: bool) -> String {
    let score = format_fitness_score(result.fitness_score);
    let age = format_biological_age(result.biological_age);

    if use_colors {
        let band = ScoreBand::for_score(result.fitness_score);
        format!(
            "Fitness Score: {}\nBiological Age: {}",
            band.paint(&score).bold(),
            age.bold()
        )
    } else {
        format!("Fitness Score: {}\nBiological Age: {}", score, age)
    }
}

/// One row per component: label, raw value, sub-score and bar.
pub fn format_breakdown(result: &ScoreResult, use_colors: bool, bar_width: usize) -> String {
    result
        .breakdown()
        .iter()
        .map(|c| {
            let label = format!("{:<10}", c.label);
            let raw = format!("{:<14}", c.raw);
            let score = format!("{:>5.1}", c.score);
            let bar = score_bar(c.score, bar_width, use_colors);

            if use_colors {
                format!("  {}{}  {}  {}", label.bold(), raw.dimmed(), score, bar)
            } else {
                format!("  {}{}  {}  {}", label, raw, score, bar)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Summary, optionally followed by the component breakdown.
pub fn format_human(result: &ScoreResult, use_colors: bool, breakdown: bool) -> String {
    let summary = format_summary(result, use_colors);
    if breakdown {
        format!(
            "{}\n\n{}",
            summary,
            format_breakdown(result, use_colors, bar_width())
        )
    } else {
        summary
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    fitness_score: f64,
    biological_age: f64,
    bmi: f64,
    sub_scores: &'a SubScores,
    input: &'a BiometricInput,
}

/// Pretty JSON with the scores and the input they came from.
pub fn format_json(result: &ScoreResult) -> Result<String> {
    let report = JsonReport {
        fitness_score: result.fitness_score,
        biological_age: result.biological_age,
        bmi: result.bmi,
        sub_scores: &result.sub_scores,
        input: result.input(),
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize score report")
}

/// Tab-separated values for scripting
/// Columns: fitness_score, biological_age (no headers, no colors)
pub fn format_tsv(result: &ScoreResult) -> String {
    format!("{:.1}\t{:.1}", result.fitness_score, result.biological_age)
}

/// Table of accepted input ranges and their defaults.
pub fn format_domains(use_colors: bool) -> String {
    let header = format!(
        "{:<15}{:>8}{:>8}{:>9}  {}",
        "field", "min", "max", "default", "unit"
    );
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    let rows = Metric::ALL.iter().map(|metric| {
        let d = metric.domain();
        format!(
            "{:<15}{:>8}{:>8}{:>9}  {}",
            metric.key(),
            d.min,
            d.max,
            d.default,
            metric.unit()
        )
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::compute_score;

    fn sample_result() -> ScoreResult {
        compute_score(&BiometricInput::default()).unwrap()
    }

    #[test]
    fn test_format_fitness_score_one_decimal() {
        assert_eq!(format_fitness_score(81.77249), "81.8");
        assert_eq!(format_fitness_score(0.0), "0.0");
    }

    #[test]
    fn test_format_biological_age() {
        assert_eq!(format_biological_age(30.9365), "30.9 years");
    }

    #[test]
    fn test_format_summary_plain() {
        let result = sample_result();
        assert_eq!(
            format_summary(&result, false),
            "Fitness Score: 81.8\nBiological Age: 30.9 years"
        );
    }

    #[test]
    fn test_score_band() {
        assert_eq!(ScoreBand::for_score(85.0), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(70.0), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(55.0), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_score(10.0), ScoreBand::Poor);
    }

    #[test]
    fn test_score_bar_plain() {
        assert_eq!(score_bar(50.0, 10, false), "█████░░░░░");
        assert_eq!(score_bar(0.0, 4, false), "░░░░");
        assert_eq!(score_bar(100.0, 4, false), "████");
    }

    #[test]
    fn test_score_bar_caps_above_hundred() {
        assert_eq!(score_bar(140.0, 4, false), "████");
    }

    #[test]
    fn test_format_breakdown_plain() {
        let result = sample_result();
        let output = format_breakdown(&result, false, 10);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("  HRV"));
        assert!(lines[0].contains("87 ms"));
        assert!(lines[0].contains("83.8"));
        assert!(lines[3].contains("BMI"));
        assert!(lines[3].contains("26.3"));
        assert!(lines[4].contains("VO2 Max"));
    }

    #[test]
    fn test_format_human_without_breakdown() {
        let result = sample_result();
        assert_eq!(format_human(&result, false, false), format_summary(&result, false));
    }

    #[test]
    fn test_format_json() {
        let result = sample_result();
        let json = format_json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["fitness_score"].as_f64().unwrap() > 81.0);
        assert_eq!(value["input"]["sex"], "male");
        assert_eq!(value["input"]["hrv"], 87.0);
        assert_eq!(value["sub_scores"]["rhr"], 80.0);
    }

    #[test]
    fn test_format_tsv() {
        let result = sample_result();
        assert_eq!(format_tsv(&result), "81.8\t30.9");
    }

    #[test]
    fn test_format_domains_plain() {
        let output = format_domains(false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("field"));
        assert!(lines[1].starts_with("hrv"));
        assert!(lines[1].contains("120"));
        assert!(lines[3].contains("12"));
    }
}

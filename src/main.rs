use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use bio_age::config::{self, Profile};
use bio_age::scoring::{self, BiometricInput, Sex};
use bio_age::{output, ScoringError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_SCORING: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute fitness score and biological age (default if no subcommand)
    Score(ScoreArgs),
    /// Create a profile with your usual values
    Init(InitArgs),
    /// Show accepted input ranges and defaults
    Domains,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
    Tsv,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Sex: male or female
    #[arg(long)]
    sex: Option<String>,

    /// Heart rate variability (ms)
    #[arg(long)]
    hrv: Option<f64>,

    /// Resting heart rate (bpm)
    #[arg(long)]
    rhr: Option<f64>,

    /// Body fat (%)
    #[arg(long = "body-fat")]
    body_fat: Option<f64>,

    /// Height (inches)
    #[arg(long)]
    height: Option<f64>,

    /// Weight (lbs)
    #[arg(long)]
    weight: Option<f64>,

    /// VO2 max (ml/kg/min)
    #[arg(long = "vo2-max")]
    vo2_max: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Show each component's contribution
    #[arg(short, long)]
    breakdown: bool,

    /// Score values outside the accepted input ranges instead of rejecting them
    #[arg(long)]
    allow_out_of_range: bool,
}

impl ScoreArgs {
    /// Flags given on the command line, as a profile layer.
    fn overrides(&self) -> Result<Profile, ScoringError> {
        let sex = self.sex.as_deref().map(str::parse::<Sex>).transpose()?;
        Ok(Profile {
            sex,
            hrv: self.hrv,
            rhr: self.rhr,
            body_fat_pct: self.body_fat,
            height_inches: self.height,
            weight_lbs: self.weight,
            vo2_max: self.vo2_max,
        })
    }
}

#[derive(Args, Debug)]
struct InitArgs {
    /// Where to write the profile (defaults to --config, then ~/.config/bio-age/config.yaml)
    #[arg(long)]
    path: Option<PathBuf>,

    /// Skip the prompts and write the default values
    #[arg(long)]
    defaults: bool,

    /// Replace an existing profile
    #[arg(long)]
    force: bool,
}

#[derive(Parser, Debug)]
#[command(name = "bio-age")]
#[command(about = "Fitness score and biological age from a few biometrics", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Profile to read, and to write with `init` (defaults to ~/.config/bio-age/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    // scoring flags, used when no subcommand is given
    #[command(flatten)]
    score: ScoreArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let use_colors = !cli.no_color && output::should_use_colors();
    let command = cli.command.unwrap_or(Commands::Score(cli.score));

    let code = match command {
        Commands::Score(args) => run_score(&args, cli.config, use_colors),
        Commands::Init(args) => run_init(&args, cli.config),
        Commands::Domains => {
            println!("{}", output::format_domains(use_colors));
            EXIT_SUCCESS
        }
    };

    std::process::exit(code);
}

fn run_score(args: &ScoreArgs, config_path: Option<PathBuf>, use_colors: bool) -> i32 {
    let profile = match config::load_profile(config_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    let overrides = match args.overrides() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Scoring error: {}", e);
            return EXIT_SCORING;
        }
    };

    let input = overrides.or(profile).resolve();
    tracing::debug!(?input, "resolved input");

    if !args.allow_out_of_range {
        if let Err(errors) = scoring::validate_input(&input) {
            eprintln!("Input errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            eprintln!("Pass --allow-out-of-range to score these values anyway.");
            return EXIT_CONFIG;
        }
    }

    let start_time = Instant::now();
    let result = match scoring::compute_score(&input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Scoring error: {}", e);
            return EXIT_SCORING;
        }
    };
    tracing::debug!(
        elapsed = %humantime::format_duration(start_time.elapsed()),
        "scored input"
    );

    match args.format {
        OutputFormat::Human => {
            println!("{}", output::format_human(&result, use_colors, args.breakdown));
        }
        OutputFormat::Json => match output::format_json(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Output error: {:#}", e);
                return EXIT_SCORING;
            }
        },
        OutputFormat::Tsv => println!("{}", output::format_tsv(&result)),
    }

    EXIT_SUCCESS
}

fn run_init(args: &InitArgs, config_path: Option<PathBuf>) -> i32 {
    let path = match config::resolve_profile_path(args.path.clone(), config_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    if path.exists() && !args.force {
        eprintln!(
            "Profile already exists at {}. Pass --force to replace it.",
            path.display()
        );
        return EXIT_CONFIG;
    }

    let profile = if args.defaults {
        Profile::from_input(&BiometricInput::default())
    } else {
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout();
        match config::run_init_wizard(&mut stdin, &mut stdout, &BiometricInput::default()) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Init error: {:#}", e);
                return EXIT_CONFIG;
            }
        }
    };

    if let Err(e) = config::write_profile(&path, &profile, args.force) {
        eprintln!("Config error: {:#}", e);
        return EXIT_CONFIG;
    }

    println!("Profile written to {}", path.display());
    EXIT_SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_flags_score_without_subcommand() {
        let cli = Cli::try_parse_from(["bio-age", "--hrv", "50", "--sex", "female"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.score.hrv, Some(50.0));
        assert_eq!(cli.score.sex.as_deref(), Some("female"));
    }

    #[test]
    fn test_score_subcommand_flags() {
        let cli = Cli::try_parse_from(["bio-age", "score", "--vo2-max", "44", "--format", "tsv"])
            .unwrap();
        match cli.command {
            Some(Commands::Score(args)) => {
                assert_eq!(args.vo2_max, Some(44.0));
                assert!(matches!(args.format, OutputFormat::Tsv));
            }
            other => panic!("expected score command, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_flags_conflict_with_subcommand() {
        assert!(Cli::try_parse_from(["bio-age", "--hrv", "50", "domains"]).is_err());
    }

    #[test]
    fn test_global_config_reaches_init() {
        let cli =
            Cli::try_parse_from(["bio-age", "-c", "/tmp/mine.yaml", "init", "--defaults"]).unwrap();
        let Some(Commands::Init(args)) = cli.command else {
            panic!("expected init command");
        };
        let path = config::resolve_profile_path(args.path, cli.config).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/mine.yaml"));
    }

    #[test]
    fn test_config_after_subcommand() {
        let cli =
            Cli::try_parse_from(["bio-age", "init", "--defaults", "--config", "/tmp/mine.yaml"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/mine.yaml")));
    }
}

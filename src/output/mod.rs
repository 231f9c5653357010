pub mod formatter;

pub use formatter::{
    bar_width, format_biological_age, format_breakdown, format_domains, format_fitness_score,
    format_human, format_json, format_summary, format_tsv, score_bar, should_use_colors, ScoreBand,
};

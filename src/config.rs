use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum, ValueHint};

use crate::data::model::Gender;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(author, version, about = "Explore historical baby-name popularity", long_about = None)]
pub struct Cli {
    /// Dataset to open on start (.csv, .json or .parquet)
    #[arg(value_hint = ValueHint::FilePath)]
    pub dataset: Option<PathBuf>,

    /// Number of names in the top chart
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    pub top_n: u16,

    /// Hide the mean-rank table under the top chart
    #[arg(long = "no-mean-rank", action = ArgAction::SetFalse)]
    pub mean_rank: bool,

    /// Initial gender selection
    #[arg(long, value_enum, default_value_t = GenderArg::M)]
    pub gender: GenderArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    M,
    F,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::M => Gender::Male,
            GenderArg::F => Gender::Female,
        }
    }
}

// ---------------------------------------------------------------------------
// View configuration
// ---------------------------------------------------------------------------

/// Settings that stay fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// How many names the top chart shows.
    pub top_n: usize,
    /// Show the table with the mean-rank column.
    pub show_mean_rank: bool,
    pub default_gender: Gender,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            top_n: 20,
            show_mean_rank: true,
            default_gender: Gender::Male,
        }
    }
}

impl From<&Cli> for ViewConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            top_n: usize::from(cli.top_n),
            show_mean_rank: cli.mean_rank,
            default_gender: cli.gender.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["name-trends"]).unwrap();
        assert!(cli.dataset.is_none());
        assert_eq!(ViewConfig::from(&cli), ViewConfig::default());
    }

    #[test]
    fn flags_map_to_config() {
        let cli = Cli::try_parse_from([
            "name-trends",
            "babynames.csv",
            "--top-n",
            "10",
            "--no-mean-rank",
            "--gender",
            "f",
        ])
        .unwrap();
        assert_eq!(cli.dataset, Some(PathBuf::from("babynames.csv")));
        let cfg = ViewConfig::from(&cli);
        assert_eq!(cfg.top_n, 10);
        assert!(!cfg.show_mean_rank);
        assert_eq!(cfg.default_gender, Gender::Female);
    }

    #[test]
    fn zero_top_n_is_rejected() {
        assert!(Cli::try_parse_from(["name-trends", "--top-n", "0"]).is_err());
    }
}

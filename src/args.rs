//! Command line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::tichu::Points;

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(short, long)]
    pub ui: Option<Ui>,

    /// Where player records are kept.
    #[arg(short, long, default_value = "player_stats.json")]
    pub records: PathBuf,

    /// Keep player records in memory only.
    #[arg(long)]
    pub ephemeral: bool,

    /// The score a team must reach to win the match.
    #[arg(short, long, default_value_t = 1000, value_parser = clap::value_parser!(Points).range(1..))]
    pub target: Points,

    /// Disable colored console output.
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, ValueEnum, Default)]
pub enum Ui {
    #[cfg_attr(not(feature = "tui"), default)]
    Console,
    #[cfg(feature = "tui")]
    #[default]
    Tui,
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args() {
        Args::command().debug_assert();

        let args = Args::parse_from(["tichu", "--ui", "console", "--target", "500"]);
        assert!(matches!(args.ui, Some(Ui::Console)));
        assert_eq!(args.target, 500);
        assert_eq!(args.records, PathBuf::from("player_stats.json"));
        assert!(!args.ephemeral);
    }

    #[test]
    fn test_target_must_be_positive() {
        assert!(Args::try_parse_from(["tichu", "--target", "0"]).is_err());
        assert!(Args::try_parse_from(["tichu", "--target", "-100"]).is_err());
        assert_eq!(Args::parse_from(["tichu", "-t", "1"]).target, 1);
    }
}

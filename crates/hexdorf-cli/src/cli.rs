//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Load a Hexdorf tile document and optionally play it out.
#[derive(Debug, Parser)]
#[command(name = "hexdorf", version, about)]
pub struct Cli {
    /// Path to the tiles YAML document
    pub tiles: PathBuf,

    /// Seed for shuffling, task sizes and the random player
    #[arg(long, env = "HEXDORF_SEED")]
    pub seed: Option<u64>,

    /// Keep tiles in document order
    #[arg(long)]
    pub no_shuffle: bool,

    /// Play the deck out with random legal moves
    #[arg(long)]
    pub play: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_positional_argument() {
        let cli = Cli::try_parse_from(["hexdorf", "tiles.yaml"]).unwrap();
        assert_eq!(cli.tiles, PathBuf::from("tiles.yaml"));
        assert!(!cli.play);
        assert!(!cli.no_shuffle);
    }

    #[test]
    fn test_missing_path_is_rejected() {
        let err = Cli::try_parse_from(["hexdorf"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_extra_positional_is_rejected() {
        assert!(Cli::try_parse_from(["hexdorf", "a.yaml", "b.yaml"]).is_err());
    }

    #[test]
    fn test_flags() {
        let cli =
            Cli::try_parse_from(["hexdorf", "t.yaml", "--seed", "7", "--play", "--json", "--no-shuffle"])
                .unwrap();
        assert_eq!(cli.seed, Some(7));
        assert!(cli.play && cli.json && cli.no_shuffle);
    }
}

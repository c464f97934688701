use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gravity_chess", version, about = "Chess under gravity, with movable platforms")]
pub struct Cli {
    /// YAML config file (falls back to GRAVITY_CHESS_CONFIG)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start from a board layout file (8 lines of `.KQRBNPkqrbnp`), White to move
    #[arg(long, value_name = "PATH")]
    pub layout: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Play in a window (default)
    Gui,
    /// Play in the terminal
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::parse_from(["gravity_chess"]);
        assert_eq!(cli.command, None);
        assert_eq!(cli.config, None);
        assert_eq!(cli.layout, None);
    }

    #[test]
    fn test_text_with_config() {
        let cli = Cli::parse_from(["gravity_chess", "--config", "cfg.yaml", "--layout", "mate.txt", "text"]);
        assert_eq!(cli.command, Some(Commands::Text));
        assert_eq!(cli.config, Some(PathBuf::from("cfg.yaml")));
        assert_eq!(cli.layout, Some(PathBuf::from("mate.txt")));
    }
}

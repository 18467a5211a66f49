use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "floaty", about = concat!("floaty v", env!("CARGO_PKG_VERSION"), " - a small floating todo panel"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding items.json (overrides [store] dir)
    #[arg(long = "data-dir", global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file to read instead of the default
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List items
    List,
    /// Add an item at the end of the list
    Add(AddArgs),
    /// Toggle an item's done state
    Done(PositionArgs),
    /// Delete an item
    Rm(PositionArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Item text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct PositionArgs {
    /// Position in the list, starting at 1
    pub position: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands_and_globals() {
        let cli = Cli::try_parse_from(["floaty", "add", "Buy", "oat", "milk", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Some(Commands::Add(args)) => assert_eq!(args.text, vec!["Buy", "oat", "milk"]),
            _ => panic!("expected add"),
        }

        let cli = Cli::try_parse_from(["floaty", "--data-dir", "/tmp/x", "rm", "2"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Some(Commands::Rm(PositionArgs { position: 2 }))));
    }

    #[test]
    fn bare_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["floaty"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn add_requires_text() {
        assert!(Cli::try_parse_from(["floaty", "add"]).is_err());
    }

    #[test]
    fn position_must_be_a_number() {
        assert!(Cli::try_parse_from(["floaty", "done", "first"]).is_err());
    }
}

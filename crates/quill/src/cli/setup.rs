use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "quill",
    bin_name = "quill",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Author pages, articles and notes in your own editor", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data root (overrides QUILL_ROOT)
    #[arg(long, global = true, help_heading = "Options")]
    pub root: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a resource and open it for editing
    #[command(alias = "n", display_order = 1)]
    New {
        /// Resource type: page, article or note
        kind: String,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,

        /// Commit as soon as the editor exits
        #[arg(long, conflicts_with = "no_editor")]
        commit: bool,
    },

    /// Open an existing resource for editing
    #[command(alias = "e", display_order = 2)]
    Edit {
        /// ID or type/slug (e.g. article/hello-world)
        selector: String,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,

        /// Commit as soon as the editor exits
        #[arg(long, conflicts_with = "no_editor")]
        commit: bool,
    },

    /// Reopen the editor on the edit in progress
    #[command(display_order = 3)]
    Open,

    /// Save the edit in progress
    #[command(alias = "c", display_order = 4)]
    Commit,

    /// Abandon the edit in progress
    #[command(display_order = 5)]
    Discard,

    /// Show the edit in progress
    #[command(alias = "st", display_order = 6)]
    Status,

    /// Print the scratch buffer path of the edit in progress
    #[command(display_order = 7)]
    Path,

    /// Remove a stuck or corrupted lock
    #[command(display_order = 8)]
    Unlock {
        /// Required: removes the lock without saving
        #[arg(long, required = true)]
        force: bool,
    },

    /// List resources, newest first
    #[command(alias = "ls", display_order = 10)]
    List {
        /// Only this type
        #[arg(long = "type", short = 't')]
        kind: Option<String>,

        #[arg(long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Show one resource
    #[command(alias = "v", display_order = 11)]
    Show {
        /// ID or type/slug
        selector: String,

        #[arg(long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Delete a resource
    #[command(alias = "rm", display_order = 12)]
    Delete {
        /// ID or type/slug
        selector: String,
    },

    /// Rebuild slug indexes from the records
    #[command(display_order = 20)]
    Reindex,

    /// Generate resource IDs
    #[command(display_order = 21)]
    Id {
        /// Millisecond Unix timestamp (defaults to now)
        #[arg(long)]
        at: Option<i64>,

        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
    },

    /// Show the effective configuration
    #[command(display_order = 22)]
    Config,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn parses_new_with_flags() {
        let cli = parse(&["quill", "new", "article", "--no-editor"]);
        match cli.command {
            Commands::New {
                kind,
                no_editor,
                commit,
            } => {
                assert_eq!(kind, "article");
                assert!(no_editor);
                assert!(!commit);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn no_editor_conflicts_with_commit() {
        assert!(Cli::try_parse_from(["quill", "new", "page", "--no-editor", "--commit"]).is_err());
    }

    #[test]
    fn global_flags_anywhere() {
        let cli = parse(&["quill", "list", "-vv", "--root", "/tmp/q", "--output", "json"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/q")));
        assert!(matches!(
            cli.command,
            Commands::List {
                output: OutputFormat::Json,
                kind: None
            }
        ));
    }

    #[test]
    fn unlock_requires_force() {
        assert!(Cli::try_parse_from(["quill", "unlock"]).is_err());
        assert!(Cli::try_parse_from(["quill", "unlock", "--force"]).is_ok());
    }

    #[test]
    fn id_defaults_to_one() {
        match parse(&["quill", "id", "--at", "1700000000000"]).command {
            Commands::Id { at, count } => {
                assert_eq!(at, Some(1_700_000_000_000));
                assert_eq!(count, 1);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}

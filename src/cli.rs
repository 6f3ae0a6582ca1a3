//! Command-line definitions.
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::Overrides;

/// Version string reported by `--version` and `version`.
pub const VERSION: &str = match option_env!("HOSTSMGR_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Top-level CLI entry point for the hosts manager.
#[derive(Parser, Debug)]
#[command(
    name = "hostsmgr",
    about = "Manage the hosts file with tags",
    version = VERSION,
    disable_version_flag = true
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Print version
    #[arg(short = 'V', long = "version", visible_short_alias = 'v', action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Read settings from this TOML file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Hosts file to operate on
    #[arg(long, global = true, value_name = "PATH")]
    pub hosts_file: Option<PathBuf>,

    /// Tag metadata file
    #[arg(long, global = true, value_name = "PATH")]
    pub tags_file: Option<PathBuf>,
}

impl GlobalOpts {
    /// Command-line values that take precedence over config and environment.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            hosts_file: self.hosts_file.clone(),
            tags_file: self.tags_file.clone(),
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List entries with their tags
    List(ListOpts),
    /// Add an entry for one or more hostnames
    Add(AddOpts),
    /// Change the address, name or tags of an entry
    Edit(EditOpts),
    /// Remove an entry and its tags
    Remove(RemoveOpts),
    /// Show all tagged hostnames
    Tags,
    /// Back up the hosts file
    Backup,
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name, used for the log file and privilege messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Add(_) => "add",
            Self::Edit(_) => "edit",
            Self::Remove(_) => "remove",
            Self::Tags => "tags",
            Self::Backup => "backup",
            Self::Version => "version",
        }
    }
}

/// Options for the `list` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ListOpts {
    /// Only show entries carrying this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Include disabled entries
    #[arg(long)]
    pub all: bool,

    /// Sort by ip, name or tag
    #[arg(long, value_name = "KEY")]
    pub sort: Option<String>,

    /// Reverse the order
    #[arg(long)]
    pub desc: bool,
}

/// Options for the `add` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct AddOpts {
    /// Address for the new entries
    #[arg(long)]
    pub ip: Option<String>,

    /// Hostnames to add
    #[arg(long = "host", value_delimiter = ',', value_name = "HOST")]
    pub hosts: Vec<String>,

    /// Tags to attach
    #[arg(long = "tag", value_delimiter = ',', value_name = "TAG")]
    pub tags: Vec<String>,

    /// Comment written after the hostname
    #[arg(long)]
    pub comment: Option<String>,
}

/// Options for the `edit` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct EditOpts {
    /// Hostname of the entry to edit
    #[arg(long)]
    pub host: Option<String>,

    /// New address
    #[arg(long)]
    pub ip: Option<String>,

    /// New hostname
    #[arg(long)]
    pub rename: Option<String>,

    /// Tag changes, e.g. "+web,-old"
    #[arg(long, allow_hyphen_values = true)]
    pub tag: Option<String>,
}

/// Options for the `remove` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct RemoveOpts {
    /// Hostname of the entry to remove
    #[arg(long)]
    pub host: Option<String>,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_list_options() {
        let cli = Cli::parse_from([
            "hostsmgr", "list", "--tag", "web", "--all", "--sort", "ip", "--desc",
        ]);
        let Command::List(opts) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(opts.tag.as_deref(), Some("web"));
        assert!(opts.all);
        assert_eq!(opts.sort.as_deref(), Some("ip"));
        assert!(opts.desc);
    }

    #[test]
    fn parse_add_splits_hosts_and_tags() {
        let cli = Cli::parse_from([
            "hostsmgr", "add", "--ip", "10.0.0.5", "--host", "a.lan,b.lan", "--tag", "web,dev",
            "--comment", "lab box",
        ]);
        let Command::Add(opts) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(opts.ip.as_deref(), Some("10.0.0.5"));
        assert_eq!(opts.hosts, vec!["a.lan", "b.lan"]);
        assert_eq!(opts.tags, vec!["web", "dev"]);
        assert_eq!(opts.comment.as_deref(), Some("lab box"));
    }

    #[test]
    fn parse_edit_accepts_leading_minus_tag_ops() {
        let cli = Cli::parse_from(["hostsmgr", "edit", "--host", "a.lan", "--tag", "-old,+new"]);
        let Command::Edit(opts) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(opts.tag.as_deref(), Some("-old,+new"));
    }

    #[test]
    fn parse_global_paths_after_subcommand() {
        let cli = Cli::parse_from(["hostsmgr", "tags", "--hosts-file", "/tmp/hosts"]);
        assert!(matches!(cli.command, Command::Tags));
        assert_eq!(cli.global.hosts_file, Some(PathBuf::from("/tmp/hosts")));
    }

    #[test]
    fn version_flags_display_version() {
        for flag in ["-V", "-v", "--version"] {
            let err = Cli::try_parse_from(["hostsmgr", flag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayVersion, "{flag}");
        }
    }

    #[test]
    fn help_is_not_an_error_exit() {
        let err = Cli::try_parse_from(["hostsmgr", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = Cli::try_parse_from(["hostsmgr", "frobnicate"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        assert!(err.use_stderr());
    }

    #[test]
    fn parse_version_subcommand() {
        let cli = Cli::parse_from(["hostsmgr", "version"]);
        assert!(matches!(cli.command, Command::Version));
        assert_eq!(cli.command.name(), "version");
    }
}

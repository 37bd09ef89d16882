//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Blog frontend server and feed generator
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: blogfront.toml)
    #[arg(short = 'C', long, global = true, default_value = "blogfront.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Override the backend base URL
    #[arg(short = 'B', long, global = true, value_hint = clap::ValueHint::Url)]
    pub backend: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the frontend server
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write the sitemap from current backend data
    Sitemap {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write the RSS feed from current backend data
    Rss {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the locale list resolved from a user language and Accept-Language header
    #[command(visible_alias = "l")]
    Locales {
        /// Stored language of the logged-in user
        #[arg(short, long)]
        user_language: Option<String>,

        /// Raw Accept-Language header value
        #[arg(short, long)]
        accept_language: Option<String>,

        /// Look up the stored language of the user owning this token
        #[arg(short, long, conflicts_with = "user_language")]
        token: Option<String>,
    },

    /// Print the site info merged over the configured fallback
    SiteInfo {
        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Skip the backend and print the fallback record
        #[arg(long)]
        offline: bool,
    },
}

/// Output destination for generated documents.
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_verbose_and_version_coexist() {
        let cli = Cli::try_parse_from(["blogfront", "-v", "locales"]).unwrap();
        assert!(cli.verbose);
        let err = Cli::try_parse_from(["blogfront", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["blogfront", "serve", "-p", "3000", "-i", "0.0.0.0"]).unwrap();
        match cli.command {
            Commands::Serve { interface, port } => {
                assert_eq!(port, Some(3000));
                assert_eq!(interface, Some("0.0.0.0".parse().unwrap()));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.config, PathBuf::from("blogfront.toml"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "blogfront",
            "rss",
            "-o",
            "out.xml",
            "--backend",
            "https://api.example.com",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.backend.as_deref(), Some("https://api.example.com"));
        let Commands::Rss { output } = cli.command else {
            panic!("expected rss");
        };
        assert_eq!(output.output, Some(PathBuf::from("out.xml")));
    }

    #[test]
    fn test_locales_args() {
        let cli = Cli::try_parse_from(["blogfront", "locales", "-u", "en-US", "-a", "zh-CN,zh;q=0.9"])
            .unwrap();
        let Commands::Locales {
            user_language,
            accept_language,
            ..
        } = cli.command
        else {
            panic!("expected locales");
        };
        assert_eq!(user_language.as_deref(), Some("en-US"));
        assert_eq!(accept_language.as_deref(), Some("zh-CN,zh;q=0.9"));
    }
}

use clap::{ArgAction, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a query and print it
    ///
    /// Values are read as JSON when they parse as JSON, and as plain
    /// strings otherwise.
    #[clap(name = "build", visible_alias = "b")]
    Build {
        /// Domain to query (items, builds, archive.entries, ...)
        ///
        /// Defaults to `default_domain` from the config file.
        #[arg(required = false)]
        domain: Option<String>,

        /// Filter criteria as a JSON object
        #[arg(required = false, short, long)]
        find: Option<String>,

        /// Field to include; repeat for multiple fields
        #[arg(required = false, short, long)]
        include: Vec<String>,

        /// Sort specification, e.g. '{"$asc":["name"]}'
        #[arg(required = false, short, long)]
        sort: Option<String>,

        /// Number of results to skip
        #[arg(required = false, short, long)]
        offset: Option<String>,

        /// Maximum number of results
        #[arg(required = false, short, long)]
        limit: Option<String>,
    },

    /// Print the query of a configured preset
    #[command(arg_required_else_help = true)]
    #[clap(name = "preset", visible_alias = "p")]
    Preset {
        /// Preset name
        #[arg(required = true)]
        name: String,
    },

    /// List configured presets
    #[clap(name = "presets", visible_alias = "ls")]
    Presets,

    /// Print the configuration file to stdout
    Config,

    /// Generate default config
    #[clap(name = "defconfig")]
    DefConfig,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_build() {
        let args = Args::try_parse_from([
            "aql", "build", "builds", "-i", "name", "-i", "number", "-l", "5", "-v",
        ])
        .unwrap();

        assert_eq!(args.verbose, 1);
        match args.command {
            Commands::Build {
                domain,
                include,
                limit,
                find,
                ..
            } => {
                assert_eq!(domain.as_deref(), Some("builds"));
                assert_eq!(include, ["name", "number"]);
                assert_eq!(limit.as_deref(), Some("5"));
                assert!(find.is_none());
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_parse_preset() {
        let args = Args::try_parse_from(["aql", "-c", "/tmp/aql.toml", "preset", "jars"]).unwrap();

        assert_eq!(args.config.as_deref(), Some("/tmp/aql.toml"));
        assert!(matches!(args.command, Commands::Preset { name } if name == "jars"));
    }
}

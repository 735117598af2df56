use std::io;

use aql_config::config::{generate_default_config, set_config_path, Config};
use build::{print_query, BuildArgs};
use clap::Parser;
use cli::{Args, Commands};
use error::CliResult;
use logging::setup_logging;
use presets::{list_presets, print_config, print_preset};
use tracing::debug;
use utils::set_color;

mod build;
mod cli;
mod error;
mod logging;
mod presets;
mod utils;

fn handle_cli() -> CliResult<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        set_color(false);
    }

    if let Some(ref config) = args.config {
        set_config_path(config);
    }

    match args.command {
        Commands::Build {
            domain,
            find,
            include,
            sort,
            offset,
            limit,
        } => {
            let config = Config::new()?;
            let build_args = BuildArgs {
                domain,
                find,
                include,
                sort,
                offset,
                limit,
            };
            debug!("{build_args:?}");
            print_query(&build_args, &config, &mut io::stdout().lock())?;
        }
        Commands::Preset { name } => {
            let config = Config::new()?;
            print_preset(&config, &name, &mut io::stdout().lock())?;
        }
        Commands::Presets => {
            let config = Config::new()?;
            list_presets(&config)?;
        }
        Commands::Config => {
            print_config(&mut io::stdout().lock())?;
        }
        Commands::DefConfig => {
            generate_default_config()?;
        }
    }

    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}

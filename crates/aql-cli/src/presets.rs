use std::{
    fs,
    io::{ErrorKind, Write},
    sync::Arc,
};

use aql_config::config::{config_path, Config};
use aql_events::{DiagnosticSinkHandle, TracingSink};
use nu_ansi_term::Color::{Blue, Cyan};
use tabled::{
    builder::Builder,
    settings::{peaker::PriorityMax, themes::BorderCorrection, Panel, Style, Width},
};
use tracing::info;

use crate::{
    error::{CliError, CliResult},
    utils::{term_width, write_output, Colored},
};

pub fn print_preset(config: &Config, name: &str, out: &mut impl Write) -> CliResult<()> {
    let preset = config.get_preset(name)?;
    let sink: DiagnosticSinkHandle = Arc::new(TracingSink);
    write_output(out, &preset.to_query(sink).query())
}

/// Rows of the presets table: name, domain and rendered query.
pub fn preset_rows(config: &Config, sink: DiagnosticSinkHandle) -> Vec<[String; 3]> {
    config
        .presets
        .iter()
        .map(|(name, preset)| {
            [
                name.clone(),
                preset.resolved_domain(),
                preset.to_query(sink.clone()).query(),
            ]
        })
        .collect()
}

pub fn list_presets(config: &Config) -> CliResult<()> {
    let rows = preset_rows(config, Arc::new(TracingSink));
    if rows.is_empty() {
        info!("No presets configured");
        return Ok(());
    }

    let mut builder = Builder::new();
    builder.push_record(["Name".to_string(), "Domain".to_string(), "Query".to_string()]);
    for [name, domain, query] in rows {
        builder.push_record([
            Colored(Blue, name).to_string(),
            Colored(Cyan, domain).to_string(),
            query,
        ]);
    }

    let table = builder
        .build()
        .with(Panel::header("Presets"))
        .with(Style::rounded())
        .with(BorderCorrection {})
        .with(Width::wrap(term_width()).priority(PriorityMax::default()))
        .to_string();

    info!("\n{table}");
    Ok(())
}

/// Prints the configuration file, or the annotated defaults when there is none.
pub fn print_config(out: &mut impl Write) -> CliResult<()> {
    let path = config_path();
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => Config::default_config()
            .to_annotated_document()?
            .to_string(),
        Err(err) => {
            return Err(CliError::IoError {
                action: format!("reading {}", path.display()),
                source: err,
            })
        }
    };

    write_output(out, content.trim_end())
}

// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::{fs, io::Write, path::PathBuf};

use anyhow::{Context, Error};
use clap::{Parser, ValueEnum};
use log::{debug, info};

use dictfilter::{
    json_utils::{json_emit_to_file, json_emit_to_string, read_input},
    process_filter::{process_filter, DocumentFormat},
    ProjectorOptions, Value, DEFAULT_MAX_DEPTH,
};

/// Select and reshape fields of a JSON or YAML document using a YAML shape template.
#[derive(Parser, Debug)]
#[command(name = "dictfilter", version)]
struct Cli {
    /// YAML template file
    #[arg(short, long)]
    template: PathBuf,

    /// Document to filter (reads stdin when omitted)
    document: Option<PathBuf>,

    /// Document format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Auto)]
    format: FormatArg,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the result on a single line
    #[arg(long)]
    compact: bool,

    /// Maximum template nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short = 'l', long = "log-level", default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Auto,
    Json,
    Yaml,
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level.as_str())).init();
    debug!("{:?}", cli);

    let template_string = fs::read_to_string(&cli.template)
        .with_context(|| format!("failed to read template {}", cli.template.display()))?;
    let document_string = read_input(cli.document.as_deref())?;

    let format = match (cli.format, &cli.document) {
        (FormatArg::Json, _) => DocumentFormat::Json,
        (FormatArg::Yaml, _) => DocumentFormat::Yaml,
        (FormatArg::Auto, Some(document)) => DocumentFormat::from_path(document),
        (FormatArg::Auto, None) => DocumentFormat::Json,
    };

    let options = ProjectorOptions {
        max_depth: cli.max_depth,
    };

    let template_filename = cli.template.display().to_string();
    let output = process_filter(&document_string, format, &template_filename, &template_string, &options)?;
    info!("projected {} keys", output.len());

    let output = Value::from(output);
    let pretty = !cli.compact;
    match &cli.output {
        Some(filename) => json_emit_to_file(&output, pretty, filename)?,
        None => {
            let out_str = json_emit_to_string(&output, pretty)?;
            std::io::stdout().write_all(out_str.as_bytes())?;
        }
    }

    Ok(())
}

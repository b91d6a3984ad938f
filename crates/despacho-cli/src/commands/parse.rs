//! Parse command - turn a pasted order block into a dispatch form.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use despacho_core::models::config::DespachoConfig;
use despacho_core::{ExtractionResult, Field, FieldSource, Flag, FlagSet, FormState, Record};

use super::config::default_config_path;

/// Fields always printed on the dispatch sheet, filled or not.
const SHEET_FIELDS: [Field; 7] = [
    Field::NationalId,
    Field::FullName,
    Field::StreetAddress,
    Field::Locality,
    Field::Phone,
    Field::Email,
    Field::Notes,
];

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input text file ("-" reads stdin)
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Overwrite a field after extraction (e.g. --set notes="Dejar en conserjería")
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Overwrite a flag after extraction (e.g. --flag onAccount or --flag prepaid=false)
    #[arg(long = "flag", value_name = "KEY[=BOOL]")]
    flag: Vec<String>,

    /// Show which rule filled each field
    #[arg(long)]
    show_sources: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Printable dispatch sheet
    Text,
}

/// JSON view of the final form.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FormOutput<'a> {
    record: &'a Record,
    flags: &'a FlagSet,
    missing: Vec<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sources: Option<&'a [FieldSource]>,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let text = read_input(&args.input).await?;

    info!("Parsing {} bytes from {}", text.len(), args.input.display());

    let result = config.parser().parse(&text);

    let mut form = FormState::new();
    form.apply(&result);

    // User edits bypass the extractor.
    for edit in &args.set {
        form.apply_field_edit(edit)?;
    }
    for edit in &args.flag {
        form.apply_flag_edit(edit)?;
    }

    let include_sources = args.show_sources || config.output.include_sources;
    let output = format_form(&form, &result, args.format, &config, include_sources)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let missing = form.record.missing();
    if !missing.is_empty() {
        debug!(
            "Fields left empty: {}",
            missing.iter().map(Field::key).collect::<Vec<_>>().join(", ")
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn load_config(config_path: Option<&str>) -> anyhow::Result<DespachoConfig> {
    if let Some(path) = config_path {
        return Ok(DespachoConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(DespachoConfig::from_file(&default_path)?)
    } else {
        Ok(DespachoConfig::default())
    }
}

async fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    Ok(tokio::fs::read_to_string(input).await?)
}

fn format_form(
    form: &FormState,
    result: &ExtractionResult,
    format: OutputFormat,
    config: &DespachoConfig,
    include_sources: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let output = FormOutput {
                record: &form.record,
                flags: &form.flags,
                missing: form.record.missing(),
                sources: include_sources.then_some(result.sources.as_slice()),
            };
            if config.output.pretty_json {
                Ok(serde_json::to_string_pretty(&output)?)
            } else {
                Ok(serde_json::to_string(&output)?)
            }
        }
        OutputFormat::Csv => format_csv(form),
        OutputFormat::Text => Ok(format_text(form, include_sources.then_some(&result.sources))),
    }
}

fn format_csv(form: &FormState) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let header: Vec<&str> = Field::ALL
        .iter()
        .map(Field::key)
        .chain(Flag::ALL.iter().map(Flag::key))
        .collect();
    wtr.write_record(&header)?;

    let row: Vec<String> = form
        .record
        .iter()
        .map(|(_, value)| value.to_string())
        .chain(form.flags.iter().map(|(_, on)| on.to_string()))
        .collect();
    wtr.write_record(&row)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(form: &FormState, sources: Option<&Vec<FieldSource>>) -> String {
    let mut output = String::new();
    let record = &form.record;

    if record.order_number.is_empty() {
        output.push_str("Despacho\n");
    } else {
        output.push_str(&format!("Despacho N°{}\n", record.order_number));
    }

    let checkboxes: Vec<String> = form
        .flags
        .iter()
        .map(|(flag, on)| format!("[{}] {}", if on { "x" } else { " " }, flag.sheet_label()))
        .collect();
    output.push_str(&checkboxes.join("  "));
    output.push_str("\n\n");

    let extra = [Field::Region, Field::OrderType, Field::Branch]
        .into_iter()
        .filter(|f| record.is_filled(*f));
    for field in SHEET_FIELDS.into_iter().chain(extra) {
        let label = format!("{}:", field.sheet_label());
        output.push_str(&format!("{:<16}{}\n", label, record.get(field)));
    }

    if let Some(sources) = sources {
        output.push_str("\nSources:\n");
        for source in sources {
            output.push_str(&format!("  {} <- {} ({})\n", source.field, source.rule, source.matched));
        }
    }

    output
}

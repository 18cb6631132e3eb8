mod cli;
mod settings;
mod workflow;

use anyhow::{Context, Result};
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use flagpick::logging;
use log::info;
use settings::ResolvedConfig;
use workflow::PickerWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();

	if cli.list_themes {
		for name in flagpick::tui::style::names() {
			println!("{name}");
		}
		return Ok(());
	}

	let level = match &cli.log_level {
		Some(value) => logging::parse_level(value)?,
		None => logging::DEFAULT_LEVEL,
	};
	let log_path = logging::initialize(level, cli.log_file.as_deref())
		.context("failed to initialise logging")?;
	info!("logging to {}", log_path.display());

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	run_picker(cli.output, resolved)
}

/// Execute the picker workflow and print the result in the chosen format.
fn run_picker(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
	let workflow = PickerWorkflow::from_config(settings);
	let selection = workflow.run()?;

	match format {
		OutputFormat::Plain => print_plain(selection.as_ref()),
		OutputFormat::Json => print_json(selection.as_ref())?,
	}

	Ok(())
}

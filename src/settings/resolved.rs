use flagpick::data::RegionKind;
use flagpick::picker::{PickerOptions, TriggerContent};
use flagpick::tui::style::{StyleOverrides, Theme};

/// Application-ready configuration derived from user input, config files and
/// sensible defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	pub kind: RegionKind,
	/// Explicit candidate codes; `None` offers the whole table.
	pub candidates: Option<Vec<String>>,
	pub exclude: Vec<String>,
	pub translation: String,
	pub current: Option<String>,
	pub options: PickerOptions,
	pub theme_name: Option<String>,
	pub theme: Theme,
	pub overrides: StyleOverrides,
}

impl ResolvedConfig {
	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		println!("  Region: {}", self.kind);
		match &self.candidates {
			Some(codes) if !codes.is_empty() => println!("  Codes: {}", codes.join(", ")),
			Some(_) => println!("  Codes: (none)"),
			None => println!("  Codes: (all)"),
		}
		if !self.exclude.is_empty() {
			println!("  Excluded: {}", self.exclude.join(", "));
		}
		println!("  Translation: {}", self.translation);
		if let Some(current) = &self.current {
			println!("  Current: {current}");
		}
		println!("  Closeable: {}", bool_to_word(self.options.closeable));
		println!("  Filterable: {}", bool_to_word(self.options.filterable));
		println!("  Filter placeholder: {}", self.options.filter_placeholder);
		println!(
			"  Auto-focus filter: {}",
			bool_to_word(self.options.auto_focus_filter)
		);
		println!("  Disabled: {}", bool_to_word(self.options.disabled));
		println!(
			"  Transparent: {}",
			bool_to_word(self.options.presentation.transparent)
		);
		println!("  Animation: {}", self.options.presentation.animation);
		match &self.options.trigger {
			TriggerContent::Flag => println!("  Trigger: (flag)"),
			TriggerContent::Label(label) => println!("  Trigger: {label}"),
		}
		println!("  Close label: {}", self.options.close_label);
		println!(
			"  UI theme: {}",
			self.theme_name
				.as_deref()
				.unwrap_or("(use the library default)")
		);
		if !self.overrides.is_empty() {
			println!("  Style overrides: yes");
		}
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}

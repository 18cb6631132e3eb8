use anyhow::Result;
use flagpick::picker::Selection;
use serde_json::json;

/// Print a plain-text representation of the final selection.
pub(crate) fn print_plain(selection: Option<&Selection>) {
	match selection {
		Some(selection) => println!("{}\t{}", selection.code, selection.name),
		None => println!("No selection"),
	}
}

/// Format the final selection as a JSON string.
pub(crate) fn format_selection_json(selection: Option<&Selection>) -> Result<String> {
	let payload = match selection {
		Some(selection) => json!({
			"accepted": true,
			"selection": selection,
		}),
		None => json!({
			"accepted": false,
			"selection": serde_json::Value::Null,
		}),
	};

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the final selection.
pub(crate) fn print_json(selection: Option<&Selection>) -> Result<()> {
	println!("{}", format_selection_json(selection)?);
	Ok(())
}

//! Country and US-state picker for terminal interfaces.
//!
//! [`CountryPicker`] owns the selection state (working list, filter, letter
//! index, open/closed) and is renderer agnostic. The [`tui`] module draws it
//! with ratatui and drives it from crossterm events.

pub mod app_dirs;
pub mod data;
pub mod error;
pub mod filter;
pub mod letters;
pub mod logging;
pub mod picker;
pub mod resolve;
pub mod tui;

pub use data::{CountryRecord, LocalizedNames, RegionKind, RegionTable, countries, states};
pub use error::{DataError, OptionsError, PickerBuildError, StyleError};
pub use filter::FilterEngine;
pub use letters::LetterIndex;
pub use picker::{CountryPicker, PickerBuilder, PickerOptions, Selection};
pub use resolve::{DEFAULT_TRANSLATION, Flag, resolve_flag, resolve_name};
pub use tui::{PickerStyles, PickerView, StyleOverrides, Theme};

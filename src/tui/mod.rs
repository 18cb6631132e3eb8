//! Terminal presentation of the picker.
//!
//! [`PickerView`] wraps a [`CountryPicker`](crate::picker::CountryPicker) and
//! maps key and mouse events onto it; [`run`] hosts a view on a real
//! terminal.

pub mod components;
pub mod input;
pub mod runtime;
pub mod style;
pub mod view;

pub use input::FilterInput;
pub use runtime::{App, run};
pub use style::{PickerStyles, StyleElement, StyleOverrides, StyleSpec, Theme};
pub use view::{Focus, PickerView};

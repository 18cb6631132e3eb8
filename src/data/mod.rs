//! Read-only reference tables keyed by two-letter code.
//!
//! Two tables ship with the crate: every known country (with flags and a few
//! translated names) and the states of the United States. Both are embedded
//! JSON documents parsed once on first use. Hosts can also inject their own
//! [`RegionTable`] built with [`RegionTable::from_json`].

mod record;
mod table;

pub use record::{COMMON_NAME_KEY, CountryRecord, LocalizedNames};
pub use table::{RegionKind, RegionTable, countries, states};

//! Domain models for the country reference data

pub mod country;

pub use country::{Country, CountryDto, CountryEvent};
pub use motorpool_common::{ModificationInfo, StringUuid};

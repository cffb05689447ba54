//! Repository layer - data access abstraction

pub mod country;

pub use country::{CountryRepository, CountryRepositoryImpl};

#[cfg(test)]
pub use country::MockCountryRepository;

use vellum_core::{driver::Driver, Error, Result};

use url::Url;

/// Opens the built-in driver matching the URL scheme.
///
/// `sqlite:` URLs open the SQLite driver and `memory:` the in-memory store.
/// Each needs its cargo feature.
pub fn connect(url: &str) -> Result<Box<dyn Driver>> {
    let parsed = Url::parse(url).map_err(|e| {
        Error::invalid_driver_configuration(format!("invalid connection URL `{url}`: {e}"))
    })?;

    match parsed.scheme() {
        "sqlite" => connect_sqlite(url),
        "memory" => connect_memory(),
        scheme => Err(Error::invalid_driver_configuration(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Box<dyn Driver>> {
    Ok(Box::new(vellum_driver_sqlite::Sqlite::new(url)?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Box<dyn Driver>> {
    Err(Error::invalid_driver_configuration(
        "`sqlite` feature not enabled",
    ))
}

#[cfg(feature = "memory")]
fn connect_memory() -> Result<Box<dyn Driver>> {
    Ok(Box::new(vellum_driver_memory::Memory::new()))
}

#[cfg(not(feature = "memory"))]
fn connect_memory() -> Result<Box<dyn Driver>> {
    Err(Error::invalid_driver_configuration(
        "`memory` feature not enabled",
    ))
}

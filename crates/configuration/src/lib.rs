// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{DatabaseSettings, ServerSettings, Settings};

/// Loads the application settings.
///
/// Sources are layered lowest-priority first: the compiled-in defaults, an
/// optional `splitpool.toml` file in the working directory, then environment
/// variables prefixed with `SPLITPOOL` (double underscore as the section
/// separator, e.g. `SPLITPOOL_DATABASE__HOST`).
pub fn load_settings() -> Result<Settings, ConfigError> {
    let defaults = config::Config::try_from(&Settings::default())?;

    let builder = config::Config::builder()
        .add_source(defaults)
        .add_source(config::File::with_name("splitpool").required(false))
        .add_source(config::Environment::with_prefix("SPLITPOOL").separator("__"))
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}

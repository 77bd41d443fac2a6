use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidatorError {
    /// The store could not answer a uniqueness lookup. This is a store
    /// failure, not a validation failure, and aborts the whole run.
    #[error("Uniqueness lookup against {table}.{column} failed: {source}")]
    UniqueLookup {
        table: String,
        column: String,
        #[source]
        source: anyhow::Error,
    },
}

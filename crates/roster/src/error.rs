use database::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Participant store error: {0}")]
    Store(#[from] DbError),
}

//! # Splitpool Database Crate
//!
//! High-level, application-specific interface to the PostgreSQL `users`
//! table that holds the roster.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** encapsulates all SQL; the rest of the application talks to
//!   the [`ParticipantStore`] trait, never to the database directly.
//! - **Injected handle:** the store is constructed once at startup and passed
//!   down explicitly. There is no process-wide connection singleton, which is
//!   what makes the in-memory test double possible.
//! - **Asynchronous & Pooled:** all operations are asynchronous over a shared
//!   `PgPool`.
//!
//! ## Public API
//!
//! - `connect`: builds the connection pool from typed settings.
//! - `run_migrations`: applies the embedded schema migrations.
//! - `ParticipantStore`: the persistence seam.
//! - `PgParticipantStore`: the Postgres implementation.
//! - `DbError`: the specific error types returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod store;

#[cfg(any(test, feature = "test-util"))]
pub mod memory;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use store::{ParticipantStore, PgParticipantStore};

#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryParticipantStore;

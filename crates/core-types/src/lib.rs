pub mod share;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use share::equal_share;
pub use structs::Participant;

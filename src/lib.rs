//! Arcadia: a Skyrim-style alchemy calculator. Pick up to three ingredients,
//! get the resulting potion (or poison, or failure) with level/perk-scaled
//! value and magnitudes. Served as a local HTTP API plus a CLI.

pub mod alchemy;
pub mod cli;
pub mod data;
pub mod server;

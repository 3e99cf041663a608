//! DSSAT `.SOL` soil file parsing, serialization, and block-level editing.
//!
//! A `.SOL` file is a line-oriented text container: a free-text prologue
//! followed by zero or more profile blocks, each introduced by a `*` marker
//! line carrying a 10-character profile code. This crate provides:
//!
//! - **Catalog**: [`show_profiles`] lists every block with its verbatim text
//! - **Parser**: [`read_profile`] extracts one profile, normalized for
//!   display, with a tolerant fallback for ragged layer tables
//! - **Writer**: [`build_soil_file`] renders the fixed-column block layout
//!   DSSAT's soil reader expects
//! - **Mutators**: [`append_profile`], [`update_soil_file`],
//!   [`delete_soil_profile`], block splices that leave sibling profiles
//!   byte-identical, with the file removed once its last profile is deleted
//! - **Cross-reference**: [`find_profile_references`] locates experiment
//!   files that mention a profile code
//!
//! Operations are synchronous and self-contained: each one opens, reads or
//! writes, and closes the file within its own call; new content is fully
//! assembled in memory before a single write, so a failed write leaves the
//! previous on-disk state intact.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sbuild_model::{LayerInput, NewProfile};
//! use sbuild_sol::{HeaderOverrides, build_soil_file, read_profile};
//!
//! let profile = NewProfile {
//!     profile_id: "UMVA030003".to_string(),
//!     site: "umarya".to_string(),
//!     country: "India".to_string(),
//!     lat: 23.5,
//!     lon: 80.75,
//!     layers: vec![LayerInput::new(11.0)],
//! };
//! build_soil_file(&profile, Path::new("UMVA030003.SOL"), &HeaderOverrides::default())?;
//! let parsed = read_profile(Path::new("UMVA030003.SOL"), "UMVA030003")?;
//! ```

mod catalog;
mod error;
mod mutate;
mod parse;
mod record;
mod scan;
mod writer;
mod xref;

// === Error Types ===
pub use error::{Result, SolError};

// === Catalog ===
pub use catalog::{ProfileEntry, show_profiles};

// === Parser ===
pub use parse::read_profile;

// === Writer ===
pub use writer::{HeaderOverrides, SOL_FILE_HEADER, build_soil_file};

// === Mutators ===
pub use mutate::{append_profile, delete_soil_profile, update_soil_file};

// === Cross-reference search ===
pub use xref::find_profile_references;

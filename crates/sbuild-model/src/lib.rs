//! Data model for DSSAT soil profiles.
//!
//! This crate provides:
//!
//! - **Entity types**: [`SoilProfile`] and [`SoilLayer`], the parsed,
//!   display-ready representation of one profile inside a `.SOL` file
//! - **Writer-side records**: [`LayerInput`], the layer description accepted
//!   by the file writer, with unset fields completed to the `-99` sentinel
//! - **Value normalization**: [`sane`] and [`parse_optional_number`], the
//!   single place where DSSAT's `-99`/`NaN` missing-value conventions are
//!   folded into empty strings and optional numbers
//!
//! All profile and layer fields are held as display strings: the GUI edit
//! grid works on text, and numeric coercion happens only at the serialize
//! edge. [`sane`] guarantees callers never see `-99` or `NaN` as if it were
//! real data.

mod input;
mod layer;
mod profile;
mod value;

pub use input::{LayerInput, NewProfile};
pub use layer::SoilLayer;
pub use profile::SoilProfile;
pub use value::{
    MISSING_TOKEN, MISSING_VALUE, format_number, is_missing_number, is_numeric_token,
    parse_optional_number, sane,
};

//! Build a track for model cars from square tiles.
//!
//! The geometry lives in [`track`], the [`editor`] turns user input into changes of a track.

// The member crates are part of the public interface.
#![allow(clippy::pub_use)]

pub use trackgen_id as id;
pub use trackgen_track as track;
pub use trackgen_types as types;

pub mod editor;

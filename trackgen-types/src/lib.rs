//! Value types shared by all trackgen crates.

pub mod border;
pub mod scalar;
pub mod vector;

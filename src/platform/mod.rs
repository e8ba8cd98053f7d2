//! Platform abstraction layer
//!
//! Translates host input events (DOM key names, pointer coordinates) into
//! simulation requests.

pub mod input;

pub use input::{Control, InputRouter, Key};

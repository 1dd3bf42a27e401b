#![allow(dead_code)]
mod debug;
mod pline_modifiers;
mod pline_test_properties;

pub use debug::*;
pub use pline_modifiers::*;
pub use pline_test_properties::*;

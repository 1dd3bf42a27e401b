//! Algorithm internals made public for testing, benchmarking and visualizing the offset stages.
//!
//! Most callers only need [Polyline](super::Polyline) methods.
pub mod pline_intersects;
pub mod pline_offset;

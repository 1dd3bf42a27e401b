//! Parallel offsetting of 2D polylines made of line and circular arc segments.
//!
//! Arcs are stored as a `bulge` on the vertex that starts them (`tan(sweep / 4)`), see
//! [PlineVertex](polyline::PlineVertex). The main entry points are
//! [Polyline::parallel_offset](polyline::Polyline::parallel_offset) and
//! [Polyline::parallel_offset_opt](polyline::Polyline::parallel_offset_opt).
//!
//! # Examples
//!
//! ```
//! # use parallel_contours::pline_closed;
//! # use parallel_contours::polyline::Polyline;
//! // counter clockwise 10 x 10 square, positive offsets go inward
//! let square: Polyline<f64> = pline_closed![
//!     (0.0, 0.0, 0.0),
//!     (10.0, 0.0, 0.0),
//!     (10.0, 10.0, 0.0),
//!     (0.0, 10.0, 0.0),
//! ];
//! let inner = square.parallel_offset(2.0);
//! assert_eq!(inner.len(), 1);
//! assert!((inner[0].area() - 36.0).abs() < 1e-9);
//! ```
#[macro_use]
mod macros;
#[macro_use]
pub mod core;
pub mod polyline;
pub mod spatial_index;

use thiserror::Error;

/// Error returned by [StaticAABB2DIndexBuilder::build](super::StaticAABB2DIndexBuilder::build).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpatialIndexBuildError {
    /// Number of boxes added does not match the count the builder was created with.
    #[error("expected {expected} boxes to be added but {added} were added")]
    ItemCountError { added: usize, expected: usize },
    /// Box extents could not be mapped onto the hilbert curve grid (e.g. NaN coordinates).
    #[error("box coordinates could not be mapped to hilbert grid values")]
    NumericCastError,
}

//! Overlay compositing for virtual try-on.
//!
//! Places a product image (glasses, clothing) over a photo at a given
//! center point and scale. Transparent overlays are alpha-blended, opaque
//! ones replace the covered pixels, and anything falling outside the photo
//! is clipped.

pub mod compose;
pub mod placement;
pub mod raster;
pub mod resize;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use compose::{composite, composite_with_region};
pub use placement::{PlacementRequest, Region, placement_region};
pub use raster::Raster;
pub use resize::scaled_size;

/// Errors that can occur while compositing.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CompositeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for compositor operations.
pub type Result<T> = std::result::Result<T, CompositeError>;

pub(crate) fn invalid(msg: impl Into<String>) -> CompositeError {
    CompositeError::InvalidArgument(msg.into())
}

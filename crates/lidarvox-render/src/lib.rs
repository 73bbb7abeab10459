#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Image plane coordinate system used by every drawing routine:
//!
//! ```text
//!   (0,0)----------+v
//!     |
//!     |
//!     +u
//! ```
//!
//! `u` indexes rows and `v` indexes columns. A bird's-eye view of a voxel grid maps
//! the grid x axis to `u` and the grid y axis to `v`.

/// Bird's-eye-view rasterization of voxel grids.
pub mod bev;

/// Pixel blending.
pub mod blend;

/// Utilities to draw on images.
pub mod draw;

mod error;

/// RGB image container.
pub mod image;

pub use crate::bev::{bev_to_image, density_bev, draw_bev_box, occupancy_bev, BevBox};
pub use crate::blend::blend;
pub use crate::draw::{clip_to_viewport, draw_circles, draw_line, draw_polygon};
pub use crate::error::RenderError;
pub use crate::image::{Image, ImageSize};

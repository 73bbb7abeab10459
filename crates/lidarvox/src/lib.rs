#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use lidarvox_grid as grid;

#[doc(inline)]
pub use lidarvox_render as render;

#[doc(inline)]
pub use lidarvox_voxelize as voxelize;

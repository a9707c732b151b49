//! CPU raster surface, `vello_cpu` drawing, clip masks and pixel kernels.

pub mod buffer;
pub mod color_matrix;
pub mod draw;
pub mod kernels;
pub mod mask;
pub mod shape;

pub use buffer::{PixelRect, RasterBuffer};
pub use color_matrix::ColorMatrix;
pub use draw::Canvas;
pub use kernels::SobelOptions;
pub use mask::Mask;
pub use shape::BoxShape;

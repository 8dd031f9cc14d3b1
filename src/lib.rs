pub mod bounds;
pub mod camera;
pub mod error;
pub mod io;
pub mod mesh;
pub mod transform;
pub mod volume;

#[cfg(test)]
mod unit_test;

mod image;
pub use crate::image::RgbdImage;
pub use crate::volume::TsdfVolume;

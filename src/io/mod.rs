use std::path::Path;

mod geometry;
pub use geometry::Geometry;
mod error;
pub use error::LoadError;
mod ply;
pub use ply::{read_ply, write_ply, PlyCodec};

/// Capability interface for reading and writing geometry interchange files.
pub trait MeshCodec {
    fn read(&self, path: &Path) -> Result<Geometry, LoadError>;
    fn write(&self, path: &Path, geometry: &Geometry) -> Result<(), LoadError>;
}

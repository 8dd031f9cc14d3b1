mod grid;
pub use grid::TsdfVolume;

mod fusion;

mod extract;
pub use extract::{MarchingCubes, SurfaceExtractor, SurfaceMesh};

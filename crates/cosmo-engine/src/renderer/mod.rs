pub mod instance;
pub mod camera;
pub mod geometry;

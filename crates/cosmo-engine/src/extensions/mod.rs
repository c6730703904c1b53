// extensions/mod.rs
//
// Optional extension modules for CosmoEngine.
// Decoupled from core Node/Scene; games opt in by creating these systems.

pub mod transform;

pub use transform::{TransformGraph, LocalTransform};

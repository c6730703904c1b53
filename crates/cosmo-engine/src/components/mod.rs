pub mod node;
pub mod material;

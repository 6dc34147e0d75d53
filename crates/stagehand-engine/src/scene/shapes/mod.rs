pub mod text;
pub mod texture;

pub mod entity;
pub mod grid;
pub mod movement;
pub mod tile;

pub mod geometry;
pub mod timebase;

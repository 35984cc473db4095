pub mod log;
pub mod misc;
pub mod string;
pub mod wall;

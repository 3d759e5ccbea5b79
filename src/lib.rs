// Uni-Run: a double-jumping runner on a rapier2d world

pub mod core;
pub mod engine;
pub mod game;

// Game modules: the runner character and the level hosting it

pub mod characters;
pub mod level;

// Engine modules: physics, input, audio, assets, game loop

pub mod assets;
pub mod audio;
pub mod game_loop;
pub mod input;
pub mod physics;

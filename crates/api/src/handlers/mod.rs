pub mod audio;
pub mod media;
pub mod player;
pub mod settings;

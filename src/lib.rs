pub mod audio;
pub mod config;
pub mod engine;
pub mod logging;
pub mod menubar;
pub mod player;
pub mod renderer;
pub mod script;
pub mod timeline;
pub mod types;

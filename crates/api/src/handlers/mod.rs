pub mod billing;
pub mod messes;
pub mod periods;
pub mod settings;

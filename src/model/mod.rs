pub mod config;
pub mod economy;
pub mod persistence;
pub mod simulation;
pub mod species;
pub mod state;

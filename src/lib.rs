//! Void Miner game library
//!
//! A top-down space-mining arcade game: pilot a thrust-and-rotate ship with
//! automatic braking through a wrapping field of procedurally generated,
//! material-typed asteroids.

pub mod asteroid;
pub mod config;
pub mod constants;
pub mod error;
pub mod graphics;
pub mod material;
pub mod player;
pub mod rendering;
pub mod simulation;
pub mod wrap;

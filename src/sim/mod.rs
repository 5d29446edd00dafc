pub mod controller;
pub mod event;
pub mod hazard;
pub mod mining;
pub mod movement;
pub mod notify;
pub mod progression;
pub mod world;
pub mod worldgen;

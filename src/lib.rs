//! Synthflight library - endless synthwave flight with an audio-reactive ring

pub mod audio;
pub mod camera;
pub mod city;
pub mod cli;
pub mod clock;
pub mod error;
pub mod params;
pub mod rendering;
pub mod simulation;
pub mod spectrum;
pub mod terrain;

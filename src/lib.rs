//! Sonosphere library - audio-reactive sphere deformation

pub mod audio;
pub mod bands;
pub mod camera;
pub mod error;
pub mod mapping;
pub mod noise;
pub mod params;
pub mod pipeline;
pub mod rendering;
pub mod spectrum;
pub mod sphere;

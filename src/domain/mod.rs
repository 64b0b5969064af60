// Domain layer - Core types and playback policies

pub mod errors;
pub mod model;
pub mod rules;

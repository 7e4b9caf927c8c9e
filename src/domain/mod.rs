// Domain layer - Core types and rules

pub mod errors;
pub mod model;

// Domain layer - schedule models and the pure analysis core
pub mod color;
pub mod grid;
pub mod interval;
pub mod signature;

mod vulnerability_shape;

pub use vulnerability_shape::VulnerabilityShape;

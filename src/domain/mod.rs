// Population trend and vehicle forecasting
pub mod forecasting;

// Request shape parsing
pub mod request;

// Parking availability types
pub mod parking;

// Repository traits
pub mod repositories;

// Domain-specific error types
pub mod errors;

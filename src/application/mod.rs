pub mod bootstrap;

// Vehicle forecasting
pub mod forecast_service;

// Parking availability
pub mod parking_service;

pub use bootstrap::AppState;

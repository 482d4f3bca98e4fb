// Application layer - Use cases and collaborator traits
pub mod sensor_api;
pub mod session;
pub mod stations_view_model;

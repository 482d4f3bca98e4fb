// Domain layer - Station data and view state models
pub mod station;
pub mod user;
pub mod view_state;

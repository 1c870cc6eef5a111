pub mod cache;
pub mod connection;
pub mod models;
pub mod users;
pub mod workouts;

pub use connection::DbClient;

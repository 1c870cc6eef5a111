//! API request handlers for the fitness tracking service.
//! Each module corresponds to a specific API endpoint or related group of endpoints.

// Account handlers
pub mod login; // Token issuance
pub mod register; // User registration

// Workout handlers
pub mod create_workout; // Workout logging
pub mod list_workouts; // Paginated workout history
pub mod workout_summary; // Cached per-type aggregates

// Service handlers
pub mod health; // Health reporting

// Re-export handlers for easier access
pub(crate) use create_workout::create_workout;
pub(crate) use health::health_check;
pub(crate) use list_workouts::list_workouts;
pub(crate) use login::login;
pub(crate) use register::register_user;
pub(crate) use workout_summary::get_workout_summary;

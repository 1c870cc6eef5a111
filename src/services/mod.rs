//! Long-running service components that live outside the request path.

pub mod background_jobs;

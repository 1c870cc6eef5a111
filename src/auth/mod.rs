//! Authentication building blocks: password hashing, access tokens and the
//! request extractor that resolves the bearer token to a database user.

pub mod extract;
pub mod password;
pub mod token;

pub use extract::AuthenticatedUser;

//! Categories: slug-addressed pages that links are shared into.
//!
//! Categories are provisioned directly in the database; this feature only
//! resolves them.

pub mod models;
pub mod services;

pub use models::Category;
pub use services::CategoryService;

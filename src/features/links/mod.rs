//! Links shared into a category page.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/{slug}` | Category page with its links |
//! | POST | `/{slug}` | Submit a link (passcode-gated), then show the page |
//! | * | anything else | "You are lost" page |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use handlers::PageState;
pub use services::{LinkService, SubmissionService};

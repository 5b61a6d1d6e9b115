mod link_service;
mod submission_service;

pub use link_service::LinkService;
pub use submission_service::{SubmissionOutcome, SubmissionService};

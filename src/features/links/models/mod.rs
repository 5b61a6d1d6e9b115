mod link;

pub use link::{normalize_url, CreateLink, Link};

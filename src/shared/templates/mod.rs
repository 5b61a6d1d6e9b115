mod engine;

pub use engine::{TemplateEngine, TemplateError};

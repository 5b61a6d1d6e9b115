pub mod categories;
pub mod links;

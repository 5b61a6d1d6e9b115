pub mod page_handler;

pub use page_handler::{category_page, favicon, you_are_lost, PageState};

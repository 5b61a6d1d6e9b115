pub mod link_dto;

pub use link_dto::{CategoryPageDto, FormValuesDto, LinkDisplayDto, PageMessages, SubmitLinkForm};

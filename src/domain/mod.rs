pub mod model_selection;
pub mod page_digest;

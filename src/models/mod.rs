pub mod constants;
pub mod document_model;
pub mod service_result;
pub mod user_model;

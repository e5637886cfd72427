pub mod document_form;
pub mod document_response;
pub mod search_query;

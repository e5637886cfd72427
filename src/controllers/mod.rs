pub mod document_controller;
pub mod login_controller;
pub mod report_controller;

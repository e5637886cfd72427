pub mod db;
pub mod document_service;
pub mod error;
pub mod report_service;

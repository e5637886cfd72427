use serde::Serialize;

use crate::models::document_model::Document;

/// JSON shape of a document record; internal storage paths are not
/// exposed, only the public file URL.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: String,
    pub name: String,
    pub fax_number: Option<String>,
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub status: Option<String>,
    pub fax_type: Option<String>,
    pub number_of_pages: Option<i32>,
    pub notes: Option<String>,
    pub file_url: Option<String>,
    pub file_size: Option<i64>,
    pub is_important: bool,
    pub commitment_date: Option<String>,
    pub upload_date: String,
    pub date_created: String,
}

impl DocumentResponse {
    pub fn filter_document(document: &Document) -> Self {
        DocumentResponse {
            id: document._id.to_string(),
            name: document.name.to_owned(),
            fax_number: document.fax_number.to_owned(),
            sender: document.sender.to_owned(),
            recipient: document.recipient.to_owned(),
            status: document.status.to_owned(),
            fax_type: document.fax_type.to_owned(),
            number_of_pages: document.number_of_pages,
            notes: document.notes.to_owned(),
            file_url: document.file_url.to_owned(),
            file_size: document.file_size,
            is_important: document.is_important,
            commitment_date: document
                .commitment_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            upload_date: document.upload_date.format("%d/%m/%Y %H:%M").to_string(),
            date_created: document.date_created.format("%d/%m/%Y %H:%M").to_string(),
        }
    }
}

use chrono::NaiveDate;
use serde::Deserialize;

/// Metadata fields collected from the multipart create/update form.
/// Field names mirror the client form (camelCase).
#[derive(Debug, Default, Clone)]
pub struct DocumentFormData {
    pub id: Option<String>,
    pub name: String,
    pub fax_number: Option<String>,
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub status: Option<String>,
    pub fax_type: Option<String>,
    pub number_of_pages: Option<i32>,
    pub notes: Option<String>,
    pub is_important: bool,
    pub commitment_date: Option<NaiveDate>,
    pub remove_file: bool,
}

impl DocumentFormData {
    /// Routes one multipart text field into the form. Unknown fields are
    /// ignored so client-side additions do not break uploads.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "id" => self.id = non_empty(value),
            "name" => self.name = value,
            "faxNumber" => self.fax_number = non_empty(value),
            "sender" => self.sender = non_empty(value),
            "recipient" => self.recipient = non_empty(value),
            "status" => self.status = non_empty(value),
            "faxType" => self.fax_type = non_empty(value),
            "numberOfPages" => self.number_of_pages = value.trim().parse().ok(),
            "notes" => self.notes = non_empty(value),
            "isImportant" => self.is_important = parse_flag(&value),
            "commitmentDate" => {
                self.commitment_date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
            }
            "removeFile" => self.remove_file = parse_flag(&value),
            _ => {}
        }
    }
}

/// Raw bytes of the uploaded file, if the form carried one.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteDocumentRequest {
    pub id: String,
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "on" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_route_by_form_name() {
        let mut form = DocumentFormData::default();
        form.set_field("name", "فاكس وارد".to_string());
        form.set_field("faxNumber", "0123".to_string());
        form.set_field("numberOfPages", "4".to_string());
        form.set_field("isImportant", "on".to_string());
        form.set_field("commitmentDate", "2025-09-16".to_string());
        form.set_field("unknownField", "ignored".to_string());

        assert_eq!(form.name, "فاكس وارد");
        assert_eq!(form.fax_number.as_deref(), Some("0123"));
        assert_eq!(form.number_of_pages, Some(4));
        assert!(form.is_important);
        assert_eq!(
            form.commitment_date,
            NaiveDate::from_ymd_opt(2025, 9, 16)
        );
    }

    #[test]
    fn blank_optional_fields_stay_none() {
        let mut form = DocumentFormData::default();
        form.set_field("sender", "   ".to_string());
        form.set_field("numberOfPages", "not-a-number".to_string());
        assert!(form.sender.is_none());
        assert!(form.number_of_pages.is_none());
    }
}

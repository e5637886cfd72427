use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use tracing::{error, info};

use crate::dtos::document::{
    document_form::{DocumentFormData, UploadedFile},
    search_query::SearchQuery,
};
use crate::models::{document_model::Document, service_result::ServiceResult};
use crate::services::db::{Database, DocumentStatistics};
use crate::services::error::{into_service_result, ServiceError};
use crate::utils::storage::{FileStorage, StoredFile};

/// Raw bytes of a stored upload plus what the controller needs to shape
/// the download response.
#[derive(Debug)]
pub struct DownloadPayload {
    pub data: Vec<u8>,
    pub document_name: String,
    pub file_path: String,
}

/// Business operations over document records. Every method returns the
/// uniform envelope; failures are folded into it and never propagate.
#[derive(Clone)]
pub struct DocumentService {
    db: Database,
    storage: FileStorage,
}

impl DocumentService {
    pub fn new(db: Database, storage: FileStorage) -> Self {
        DocumentService { db, storage }
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<Document>> {
        let outcome = async {
            let documents = self.db.get_all().await?;
            Ok((documents, "تم جلب البيانات بنجاح".to_string()))
        }
        .await;
        into_service_result(outcome, "حدث خطأ أثناء جلب البيانات")
    }

    pub async fn get_by_id(&self, id: &str) -> ServiceResult<Document> {
        let outcome = async {
            let document = self.find_existing(id).await?;
            Ok((document, "تم جلب البيانات بنجاح".to_string()))
        }
        .await;
        into_service_result(outcome, "حدث خطأ أثناء جلب بيانات الفاكس")
    }

    pub async fn create(
        &self,
        form: DocumentFormData,
        upload: Option<UploadedFile>,
    ) -> ServiceResult<Document> {
        let outcome = self.create_inner(form, upload).await;
        into_service_result(outcome, "حدث خطأ أثناء إضافة الفاكس")
    }

    async fn create_inner(
        &self,
        form: DocumentFormData,
        upload: Option<UploadedFile>,
    ) -> Result<(Document, String), ServiceError> {
        validate_new(&form)?;

        let stored = match upload.filter(|f| !f.data.is_empty()) {
            Some(file) => Some(self.save_upload(&file).await?),
            None => {
                info!("no file uploaded with new document");
                None
            }
        };

        let document = build_document(&form, stored, Utc::now());
        self.db.insert(&document).await?;
        Ok((document, "تم إضافة الفاكس بنجاح".to_string()))
    }

    pub async fn update(
        &self,
        form: DocumentFormData,
        upload: Option<UploadedFile>,
    ) -> ServiceResult<Document> {
        let outcome = self.update_inner(form, upload).await;
        into_service_result(outcome, "حدث خطأ أثناء تحديث الفاكس")
    }

    async fn update_inner(
        &self,
        form: DocumentFormData,
        upload: Option<UploadedFile>,
    ) -> Result<(Document, String), ServiceError> {
        let id = form.id.clone().unwrap_or_default();
        let existing = self.find_existing(&id).await?;

        let new_file = match upload.filter(|f| !f.data.is_empty()) {
            Some(file) => {
                // The replaced file is removed best-effort before the new
                // one is linked in.
                if let Some(old_path) = existing.file_path.as_deref() {
                    self.storage.delete(old_path).await;
                }
                Some(self.save_upload(&file).await?)
            }
            None => {
                if form.remove_file {
                    if let Some(old_path) = existing.file_path.as_deref() {
                        self.storage.delete(old_path).await;
                    }
                }
                None
            }
        };

        let updated = merge_update(&existing, &form, new_file);
        self.db.replace(&updated).await?;
        Ok((updated, "تم تحديث الفاكس بنجاح".to_string()))
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<bool> {
        let outcome = self.delete_inner(id).await;
        into_service_result(outcome, "حدث خطأ أثناء حذف الفاكس")
    }

    async fn delete_inner(&self, id: &str) -> Result<(bool, String), ServiceError> {
        let document = self.find_existing(id).await?;

        if let Some(path) = document.file_path.as_deref() {
            self.storage.delete(path).await;
        }

        if !self.db.delete(document._id).await? {
            return Err(ServiceError::NotFound("فشل في حذف الفاكس".to_string()));
        }
        Ok((true, "تم حذف الفاكس بنجاح".to_string()))
    }

    pub async fn search(&self, query: &SearchQuery) -> ServiceResult<Vec<Document>> {
        let outcome = async {
            let documents = self.db.search(query).await?;
            let message = format!("تم العثور على {} نتيجة", documents.len());
            Ok((documents, message))
        }
        .await;
        into_service_result(outcome, "حدث خطأ أثناء البحث")
    }

    pub async fn statistics(&self) -> ServiceResult<DocumentStatistics> {
        let outcome = async {
            let statistics = self.db.statistics().await?;
            Ok((statistics, "تم جلب الإحصائيات بنجاح".to_string()))
        }
        .await;
        into_service_result(outcome, "حدث خطأ أثناء جلب الإحصائيات")
    }

    pub async fn download(&self, id: &str) -> ServiceResult<DownloadPayload> {
        let outcome = self.download_inner(id).await;
        into_service_result(outcome, "حدث خطأ أثناء تحميل الملف")
    }

    async fn download_inner(&self, id: &str) -> Result<(DownloadPayload, String), ServiceError> {
        let document = self.find_existing(id).await?;
        if !document.has_file() {
            return Err(ServiceError::NotFound("الملف غير موجود".to_string()));
        }
        let file_path = document.file_path.as_deref().unwrap_or_default();

        let data = self.storage.read(file_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ServiceError::NotFound("الملف غير موجود على الخادم".to_string())
            } else {
                ServiceError::Storage(e)
            }
        })?;

        let payload = DownloadPayload {
            data,
            document_name: document.name.clone(),
            file_path: file_path.to_string(),
        };
        Ok((payload, "تم تحميل الملف بنجاح".to_string()))
    }

    async fn find_existing(&self, id: &str) -> Result<Document, ServiceError> {
        let not_found = || ServiceError::NotFound("الفاكس غير موجود".to_string());
        let object_id = ObjectId::parse_str(id).map_err(|_| not_found())?;
        self.db.get_by_id(object_id).await?.ok_or_else(not_found)
    }

    async fn save_upload(&self, file: &UploadedFile) -> Result<StoredFile, ServiceError> {
        self.storage
            .save(&file.file_name, &file.data)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to store uploaded file");
                ServiceError::Validation("حدث خطأ أثناء حفظ الملف".to_string())
            })
    }
}

fn validate_new(form: &DocumentFormData) -> Result<(), ServiceError> {
    let required = |message: &str| ServiceError::Validation(message.to_string());
    if form.name.trim().is_empty() {
        return Err(required("اسم الوثيقة مطلوب"));
    }
    if form.sender.as_deref().unwrap_or("").trim().is_empty() {
        return Err(required("اسم المرسل مطلوب"));
    }
    if form.recipient.as_deref().unwrap_or("").trim().is_empty() {
        return Err(required("اسم المستقبل مطلوب"));
    }
    Ok(())
}

fn build_document(
    form: &DocumentFormData,
    stored: Option<StoredFile>,
    now: DateTime<Utc>,
) -> Document {
    let mut document = Document {
        _id: ObjectId::new(),
        name: form.name.clone(),
        fax_number: form.fax_number.clone(),
        sender: form.sender.clone(),
        recipient: form.recipient.clone(),
        status: form.status.clone(),
        fax_type: form.fax_type.clone(),
        number_of_pages: form.number_of_pages,
        notes: form.notes.clone(),
        file_path: None,
        file_url: None,
        file_size: None,
        date_created: now,
        upload_date: now,
        is_important: form.is_important,
        commitment_date: commitment_datetime(form),
    };
    if let Some(file) = stored {
        attach_file(&mut document, file);
    }
    document
}

/// Overwrites the metadata fields and resolves the file reference: a new
/// file replaces it, `remove_file` clears it, otherwise the existing
/// reference is preserved.
pub(crate) fn merge_update(
    existing: &Document,
    form: &DocumentFormData,
    new_file: Option<StoredFile>,
) -> Document {
    let mut updated = existing.clone();
    updated.name = form.name.clone();
    updated.fax_number = form.fax_number.clone();
    updated.sender = form.sender.clone();
    updated.recipient = form.recipient.clone();
    updated.status = form.status.clone();
    updated.fax_type = form.fax_type.clone();
    updated.number_of_pages = form.number_of_pages;
    updated.notes = form.notes.clone();
    updated.is_important = form.is_important;
    updated.commitment_date = commitment_datetime(form);

    if let Some(file) = new_file {
        attach_file(&mut updated, file);
    } else if form.remove_file {
        updated.file_path = None;
        updated.file_url = None;
        updated.file_size = None;
    }
    updated
}

fn attach_file(document: &mut Document, file: StoredFile) {
    document.file_path = Some(file.file_path);
    document.file_url = Some(file.file_url);
    document.file_size = Some(file.file_size);
}

fn commitment_datetime(form: &DocumentFormData) -> Option<DateTime<Utc>> {
    form.commitment_date
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> DocumentFormData {
        let mut form = DocumentFormData::default();
        form.name = "فاكس تجريبي".to_string();
        form.sender = Some("المرسل".to_string());
        form.recipient = Some("المستقبل".to_string());
        form
    }

    fn stored_file(path: &str) -> StoredFile {
        StoredFile {
            file_path: path.to_string(),
            file_url: format!("/uploads/faxes/{}", path),
            file_size: 42,
        }
    }

    #[test]
    fn create_requires_name_sender_and_recipient() {
        assert!(validate_new(&valid_form()).is_ok());

        let mut no_name = valid_form();
        no_name.name = "  ".to_string();
        assert!(matches!(
            validate_new(&no_name),
            Err(ServiceError::Validation(m)) if m == "اسم الوثيقة مطلوب"
        ));

        let mut no_sender = valid_form();
        no_sender.sender = None;
        assert!(validate_new(&no_sender).is_err());

        let mut no_recipient = valid_form();
        no_recipient.recipient = Some(String::new());
        assert!(validate_new(&no_recipient).is_err());
    }

    #[test]
    fn new_document_file_fields_are_all_or_nothing() {
        let now = Utc::now();
        let without = build_document(&valid_form(), None, now);
        assert!(without.file_path.is_none());
        assert!(without.file_url.is_none());
        assert!(without.file_size.is_none());

        let with = build_document(&valid_form(), Some(stored_file("a.pdf")), now);
        assert!(with.file_path.is_some());
        assert!(with.file_url.is_some());
        assert_eq!(with.file_size, Some(42));
        assert_eq!(with.date_created, now);
        assert_eq!(with.upload_date, now);
    }

    #[test]
    fn update_without_new_file_preserves_the_reference() {
        let existing = build_document(&valid_form(), Some(stored_file("old.pdf")), Utc::now());
        let updated = merge_update(&existing, &valid_form(), None);
        assert_eq!(updated.file_path, existing.file_path);
        assert_eq!(updated.file_url, existing.file_url);
    }

    #[test]
    fn update_with_remove_flag_clears_the_reference() {
        let existing = build_document(&valid_form(), Some(stored_file("old.pdf")), Utc::now());
        let mut form = valid_form();
        form.remove_file = true;
        let updated = merge_update(&existing, &form, None);
        assert!(updated.file_path.is_none());
        assert!(updated.file_url.is_none());
        assert!(updated.file_size.is_none());
    }

    #[test]
    fn update_with_new_file_replaces_the_reference() {
        let existing = build_document(&valid_form(), Some(stored_file("old.pdf")), Utc::now());
        let updated = merge_update(&existing, &valid_form(), Some(stored_file("new.pdf")));
        assert_eq!(updated.file_path.as_deref(), Some("new.pdf"));
        assert_eq!(updated.file_size, Some(42));
    }

    #[test]
    fn update_overwrites_metadata_and_keeps_identity() {
        let existing = build_document(&valid_form(), None, Utc::now());
        let mut form = valid_form();
        form.status = Some("sent".to_string());
        form.is_important = true;
        let updated = merge_update(&existing, &form, None);
        assert_eq!(updated._id, existing._id);
        assert_eq!(updated.date_created, existing.date_created);
        assert_eq!(updated.status.as_deref(), Some("sent"));
        assert!(updated.is_important);
    }
}

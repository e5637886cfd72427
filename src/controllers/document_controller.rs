use std::path::Path;

use actix_multipart::Multipart;
use actix_web::{
    get,
    http::header::{
        Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
    },
    post,
    web::{self, Data, Form},
    Error, HttpResponse,
};
use futures_util::TryStreamExt;

use crate::dtos::document::{
    document_form::{DeleteDocumentRequest, DocumentFormData, UploadedFile},
    document_response::DocumentResponse,
    search_query::SearchQuery,
};
use crate::models::{document_model::Document, service_result::ServiceResult};
use crate::services::document_service::DocumentService;

/// Splits the multipart create/update form into its metadata fields and
/// the optional file part (field name `file`).
async fn parse_document_form(
    mut payload: Multipart,
) -> Result<(DocumentFormData, Option<UploadedFile>), Error> {
    let mut form = DocumentFormData::default();
    let mut upload: Option<UploadedFile> = None;

    while let Some(mut field) = payload.try_next().await? {
        let Some(disposition) = field.content_disposition().cloned() else {
            continue;
        };
        let Some(name) = disposition.get_name().map(str::to_string) else {
            continue;
        };

        let mut data: Vec<u8> = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            data.extend_from_slice(&chunk);
        }

        if name == "file" {
            let file_name = disposition
                .get_filename()
                .filter(|f| !f.is_empty())
                .unwrap_or("upload")
                .to_string();
            if !data.is_empty() {
                upload = Some(UploadedFile { file_name, data });
            }
        } else {
            form.set_field(&name, String::from_utf8_lossy(&data).into_owned());
        }
    }

    Ok((form, upload))
}

fn filter_documents(result: ServiceResult<Vec<Document>>) -> ServiceResult<Vec<DocumentResponse>> {
    ServiceResult {
        success: result.success,
        message: result.message,
        data: result.data.map(|documents| {
            documents
                .iter()
                .map(DocumentResponse::filter_document)
                .collect()
        }),
    }
}

fn filter_document(result: ServiceResult<Document>) -> ServiceResult<DocumentResponse> {
    ServiceResult {
        success: result.success,
        message: result.message,
        data: result.data.as_ref().map(DocumentResponse::filter_document),
    }
}

#[get("")]
async fn get_documents(service: Data<DocumentService>) -> HttpResponse {
    HttpResponse::Ok().json(filter_documents(service.get_all().await))
}

/// Registered before `/{id}` so the literal path wins.
#[get("/statistics")]
async fn get_statistics(service: Data<DocumentService>) -> HttpResponse {
    let result = service.statistics().await;
    // The dashboard expects the counters flat, zeroed on failure.
    HttpResponse::Ok().json(result.data.unwrap_or_default())
}

#[get("/{id}")]
async fn get_document(service: Data<DocumentService>, path: web::Path<String>) -> HttpResponse {
    let result = filter_document(service.get_by_id(&path.into_inner()).await);
    if result.success {
        HttpResponse::Ok().json(result)
    } else {
        HttpResponse::NotFound().json(result)
    }
}

#[post("")]
async fn create_document(
    service: Data<DocumentService>,
    payload: Multipart,
) -> Result<HttpResponse, Error> {
    let (form, upload) = parse_document_form(payload).await?;
    let result = filter_document(service.create(form, upload).await);
    Ok(HttpResponse::Ok().json(result))
}

#[post("/update")]
async fn update_document(
    service: Data<DocumentService>,
    payload: Multipart,
) -> Result<HttpResponse, Error> {
    let (form, upload) = parse_document_form(payload).await?;
    let result = filter_document(service.update(form, upload).await);
    Ok(HttpResponse::Ok().json(result))
}

#[post("/delete")]
async fn delete_document(
    service: Data<DocumentService>,
    body: Form<DeleteDocumentRequest>,
) -> HttpResponse {
    HttpResponse::Ok().json(service.delete(&body.id).await)
}

#[post("/search")]
async fn search_documents(
    service: Data<DocumentService>,
    query: Form<SearchQuery>,
) -> HttpResponse {
    HttpResponse::Ok().json(filter_documents(service.search(&query).await))
}

#[get("/{id}/download")]
async fn download_document(
    service: Data<DocumentService>,
    path: web::Path<String>,
) -> HttpResponse {
    let result = service.download(&path.into_inner()).await;
    let Some(payload) = result.data else {
        return HttpResponse::NotFound().json(ServiceResult::<()>::fail(result.message));
    };

    let mime = mime_guess::from_path(&payload.file_path).first_or_octet_stream();
    let extension = Path::new(&payload.file_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("pdf");
    let file_name = format!("{}.{}", payload.document_name, extension);

    HttpResponse::Ok()
        .content_type(mime.as_ref())
        .insert_header(attachment_disposition(file_name))
        .body(payload.data)
}

/// Document names are free text (usually Arabic), so the header carries a
/// sanitized ASCII `filename` plus a UTF-8 `filename*` extended value.
fn attachment_disposition(file_name: String) -> ContentDisposition {
    let ascii_fallback: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![
            DispositionParam::Filename(ascii_fallback),
            DispositionParam::FilenameExt(ExtendedValue {
                charset: Charset::Ext("UTF-8".to_string()),
                language_tag: None,
                value: file_name.into_bytes(),
            }),
        ],
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(get_documents);
    cfg.service(get_statistics);
    cfg.service(create_document);
    cfg.service(update_document);
    cfg.service(delete_document);
    cfg.service(search_documents);
    cfg.service(download_document);
    cfg.service(get_document);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_header_quotes_and_spaces_are_neutralized() {
        let disposition = attachment_disposition("my \"fax\" report.pdf".to_string());
        assert_eq!(disposition.disposition, DispositionType::Attachment);
        assert_eq!(
            disposition.parameters[0],
            DispositionParam::Filename("my__fax__report.pdf".to_string())
        );
    }

    #[test]
    fn attachment_header_carries_utf8_name_in_extended_value() {
        let disposition = attachment_disposition("تقرير.pdf".to_string());
        let DispositionParam::FilenameExt(ext) = &disposition.parameters[1] else {
            panic!("expected an extended filename parameter");
        };
        assert_eq!(ext.value, "تقرير.pdf".as_bytes());
        // The plain parameter stays ASCII for legacy clients.
        let DispositionParam::Filename(plain) = &disposition.parameters[0] else {
            panic!("expected a plain filename parameter");
        };
        assert!(plain.is_ascii());
    }
}

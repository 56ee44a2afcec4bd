use actix_multipart::{Field, Multipart};
use actix_web::{
    get,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    post, web, HttpRequest, HttpResponse,
};
use futures::StreamExt;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    middleware::get_request_id,
    models::{
        domain::{SourceDocument, SourceFormat},
        dto::{ExportRequest, GenerationParams},
    },
    services::export,
};

const INDEX_HTML: &str = include_str!("../../static/index.html");

const MAX_TEXT_FIELD_BYTES: usize = 1024;

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[post("/api/quizzes")]
async fn create_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let request_id = get_request_id(&req).unwrap_or_default();

    let form = read_upload_form(payload, state.config.max_upload_bytes)
        .await
        .inspect_err(|e| log::warn!("[{}] Upload rejected: {}", request_id, e))?;
    let (document, params) = form.into_parts()?;

    log::info!(
        "[{}] File uploaded: '{}' ({} bytes)",
        request_id,
        document.file_name,
        document.bytes.len()
    );

    let response = state
        .quiz_service
        .run(document, params)
        .await
        .inspect_err(|e| log::error!("[{}] Quiz run failed: {}", request_id, e))?;

    log::info!(
        "[{}] Quiz run finished with {} questions",
        request_id,
        response.questions.len()
    );
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/quizzes/export")]
async fn export_quiz_csv(request: web::Json<ExportRequest>) -> Result<HttpResponse, AppError> {
    let table = request.into_inner().into_table()?;
    let csv = export::to_csv(&table)?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(
                export::CSV_FILE_NAME.to_string(),
            )],
        })
        .body(csv))
}

#[derive(Debug, Default)]
struct UploadForm {
    document: Option<SourceDocument>,
    question_count: Option<String>,
    subject: String,
    tone: String,
}

impl UploadForm {
    fn into_parts(self) -> AppResult<(SourceDocument, GenerationParams)> {
        let document = self
            .document
            .ok_or_else(|| AppError::ValidationError("no file was uploaded".to_string()))?;

        let raw_count = self.question_count.unwrap_or_default();
        let question_count = raw_count.trim().parse::<u32>().map_err(|_| {
            AppError::ValidationError(format!(
                "question count must be a whole number, got '{}'",
                raw_count.trim()
            ))
        })?;

        Ok((
            document,
            GenerationParams::new(question_count, &self.subject, &self.tone),
        ))
    }
}

async fn read_upload_form(mut payload: Multipart, max_upload_bytes: usize) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        match name.as_str() {
            "file" => {
                let file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or_default()
                    .to_string();
                let content_type = field.content_type().map(|mime| mime.essence_str().to_string());

                // Format is decided from the part headers, before the body is buffered.
                let format = SourceFormat::from_upload(&file_name, content_type.as_deref())?;
                let bytes = read_field(&mut field, max_upload_bytes, "file").await?;
                form.document = Some(SourceDocument::new(file_name, format, bytes));
            }
            "question_count" => form.question_count = Some(read_text_field(&mut field, &name).await?),
            "subject" => form.subject = read_text_field(&mut field, &name).await?,
            "tone" => form.tone = read_text_field(&mut field, &name).await?,
            other => {
                log::debug!("Ignoring form field '{}'", other);
                while let Some(chunk) = field.next().await {
                    chunk?;
                }
            }
        }
    }

    Ok(form)
}

async fn read_field(field: &mut Field, limit: usize, name: &str) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if bytes.len() + chunk.len() > limit {
            return Err(AppError::ValidationError(format!(
                "{} exceeds the {} byte upload limit",
                name, limit
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn read_text_field(field: &mut Field, name: &str) -> AppResult<String> {
    let bytes = read_field(field, MAX_TEXT_FIELD_BYTES, name).await?;
    String::from_utf8(bytes)
        .map_err(|_| AppError::ValidationError(format!("form field '{}' is not valid UTF-8", name)))
}

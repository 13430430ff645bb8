use axum::extract::Multipart;
use bytes::Bytes;
use tracing::warn;

use crate::errors::AppError;

/// Multipart field carrying the uploaded resume.
pub const PDF_FIELD: &str = "pdfFile";
pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";
const NO_FILE: &str = "No file uploaded or the file format is incorrect. Please upload a PDF.";

/// Pulls the `pdfFile` part out of a multipart body, skipping any other fields.
pub async fn read_pdf_upload(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(PDF_FIELD) {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if data.len() > MAX_PDF_BYTES {
            return Err(AppError::Validation(
                "File too large. Maximum size is 10MB".to_string(),
            ));
        }
        return Ok(data);
    }
    Err(AppError::Validation(NO_FILE.to_string()))
}

/// Extracts plain text on a blocking thread. Non-PDF input and PDFs without text are 400s.
pub async fn extract_pdf_text(data: Bytes) -> Result<String, AppError> {
    if !data.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation(NO_FILE.to_string()));
    }

    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await;

    let text = match extracted {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF text extraction failed: {e}");
            return Err(AppError::Validation(
                "Could not read text from the uploaded PDF".to_string(),
            ));
        }
        // The parser panics on some malformed files.
        Err(e) if e.is_panic() => {
            warn!("PDF parser panicked on upload");
            return Err(AppError::Validation(
                "Could not read text from the uploaded PDF".to_string(),
            ));
        }
        Err(e) => return Err(AppError::Internal(e.into())),
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation(
            "The uploaded PDF contains no extractable text".to_string(),
        ));
    }
    Ok(text.to_string())
}

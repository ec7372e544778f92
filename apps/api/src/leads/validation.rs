use crate::errors::AppError;

const MAX_NAME_LEN: usize = 100;

/// Resume file types accepted by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeKind {
    Pdf,
    Doc,
    Docx,
}

impl ResumeKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ResumeKind::Pdf => "pdf",
            ResumeKind::Doc => "doc",
            ResumeKind::Docx => "docx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ResumeKind::Pdf => "application/pdf",
            ResumeKind::Doc => "application/msword",
            ResumeKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Validated resume metadata, derived from file content rather than the
/// client-declared content type.
#[derive(Debug)]
pub struct ResumeMeta {
    pub kind: ResumeKind,
    pub original_filename: String,
    pub size: i64,
}

fn file_extension(filename: &str) -> Option<String> {
    filename.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

/// Determines the resume type from magic bytes, falling back to the file
/// extension only when the content is unrecognized.
///
/// DOCX is a ZIP container, so the ZIP signature alone is not enough; the
/// extension has to agree before a ZIP is accepted as DOCX.
pub fn sniff_resume(data: &[u8], filename: &str) -> Option<ResumeKind> {
    let ext = file_extension(filename);

    if data.starts_with(b"%PDF") {
        return Some(ResumeKind::Pdf);
    }
    // OLE2 compound document, the legacy .doc container.
    if data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]) {
        return Some(ResumeKind::Doc);
    }
    if data.starts_with(b"PK\x03\x04") {
        return match ext.as_deref() {
            Some("docx") => Some(ResumeKind::Docx),
            _ => None,
        };
    }

    match ext.as_deref() {
        Some("pdf") => Some(ResumeKind::Pdf),
        Some("doc") => Some(ResumeKind::Doc),
        Some("docx") => Some(ResumeKind::Docx),
        _ => None,
    }
}

pub fn validate_name(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_email(value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if is_valid_email(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(AppError::Validation(
            "email is not a valid email address".to_string(),
        ))
    }
}

// Mirrors the common `local@domain.tld` address grammar: dot-atom local
// part, dotted domain, alphabetic TLD of at least two characters.
fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let tld = labels[labels.len() - 1];
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    labels.iter().all(|label| {
        !label.is_empty()
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

/// Validates the uploaded resume: present, within the size cap, and of an
/// accepted type regardless of what the client declared.
pub fn validate_resume(
    filename: Option<&str>,
    data: &[u8],
    max_bytes: usize,
) -> Result<ResumeMeta, AppError> {
    let filename = filename
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    if data.is_empty() {
        return Err(AppError::Validation("resume file is empty".to_string()));
    }
    if data.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "resume file exceeds the maximum allowed size of {:.1}MB",
            max_bytes as f64 / (1024.0 * 1024.0)
        )));
    }

    let kind = sniff_resume(data, filename).ok_or_else(|| {
        AppError::Validation("unsupported resume type; allowed types: pdf, doc, docx".to_string())
    })?;

    Ok(ResumeMeta {
        kind,
        original_filename: filename.to_string(),
        size: data.len() as i64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_emails_pass() {
        for email in [
            "jane@example.com",
            "jane.doe+leads@example.co.uk",
            "j_d%40@sub-domain.example.io",
        ] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn invalid_emails_fail() {
        for email in [
            "",
            "jane",
            "jane@",
            "@example.com",
            "jane@example",
            "jane@example.c",
            "jane@exa mple.com",
            "jane@@example.com",
            "jane@example.123",
        ] {
            assert!(!is_valid_email(email), "{email} should be invalid");
        }
    }

    #[test]
    fn name_is_trimmed_and_required() {
        assert_eq!(validate_name("first_name", "  Jane ").unwrap(), "Jane");
        assert!(validate_name("first_name", "   ").is_err());
        assert!(validate_name("last_name", &"x".repeat(101)).is_err());
    }

    #[test]
    fn sniffs_pdf_regardless_of_extension() {
        assert_eq!(
            sniff_resume(b"%PDF-1.7 stuff", "resume.bin"),
            Some(ResumeKind::Pdf)
        );
    }

    #[test]
    fn sniffs_legacy_doc_magic() {
        let mut data = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        data.extend_from_slice(&[0u8; 16]);
        assert_eq!(sniff_resume(&data, "resume.doc"), Some(ResumeKind::Doc));
    }

    #[test]
    fn zip_only_counts_as_docx_with_matching_extension() {
        assert_eq!(
            sniff_resume(b"PK\x03\x04rest", "resume.docx"),
            Some(ResumeKind::Docx)
        );
        assert_eq!(sniff_resume(b"PK\x03\x04rest", "archive.zip"), None);
    }

    #[test]
    fn unknown_content_falls_back_to_extension() {
        assert_eq!(sniff_resume(b"plain text", "resume.pdf"), Some(ResumeKind::Pdf));
        assert_eq!(sniff_resume(b"plain text", "resume.txt"), None);
    }

    #[test]
    fn resume_size_cap_is_enforced() {
        let big = vec![b'a'; 2048];
        let err = validate_resume(Some("resume.pdf"), &big, 1024).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn missing_and_empty_resumes_are_rejected() {
        assert!(validate_resume(None, b"%PDF", 1024).is_err());
        assert!(validate_resume(Some("resume.pdf"), b"", 1024).is_err());
    }

    #[test]
    fn png_content_is_rejected() {
        let png = b"\x89PNG\r\n\x1a\n....";
        assert!(validate_resume(Some("image.png"), png, 1024).is_err());
    }
}

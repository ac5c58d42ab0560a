// src/utils.rs

/// Whitespace-only input counts as blank; no request is made for blank input.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// MIME type for a resume upload, or `None` for anything that is not a PDF
/// or plain-text file. Callers reject unsupported files before any network
/// call is made.
pub fn resume_mime_type(filename: &str) -> Option<&'static str> {
    match get_file_extension(filename)?.as_str() {
        "pdf" => Some("application/pdf"),
        "txt" | "text" => Some("text/plain"),
        _ => None,
    }
}

/// Normalize an experience-level override to the labels the backend infers.
/// Unknown labels pass through lowercased; blank input means no override.
pub fn normalize_experience_level(level: Option<&str>) -> Option<String> {
    let level = level.map(str::trim).filter(|l| !l.is_empty())?;
    let normalized = match level.to_lowercase().as_str() {
        "jr" | "junior" | "entry" | "entry-level" => "junior".to_string(),
        "mid" | "intermediate" | "mid-level" => "mid".to_string(),
        "sr" | "senior" | "lead" | "principal" => "senior".to_string(),
        other => other.to_string(),
    };
    Some(normalized)
}

/// Shorten free text for log lines
pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \n\t"));
        assert!(!is_blank("5 years building APIs"));
    }

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("resume.pdf"), Some("pdf".to_string()));
        assert_eq!(get_file_extension("resume.TXT"), Some("txt".to_string()));
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_resume_mime_type() {
        assert_eq!(resume_mime_type("cv.pdf"), Some("application/pdf"));
        assert_eq!(resume_mime_type("cv.txt"), Some("text/plain"));
        assert_eq!(resume_mime_type("notes.TEXT"), Some("text/plain"));
        assert_eq!(resume_mime_type("cv.docx"), None);
        assert_eq!(resume_mime_type("noext"), None);
    }

    #[test]
    fn test_normalize_experience_level() {
        assert_eq!(
            normalize_experience_level(Some("Senior")),
            Some("senior".to_string())
        );
        assert_eq!(
            normalize_experience_level(Some("jr")),
            Some("junior".to_string())
        );
        assert_eq!(
            normalize_experience_level(Some("Staff")),
            Some("staff".to_string())
        );
        assert_eq!(normalize_experience_level(Some("  ")), None);
        assert_eq!(normalize_experience_level(None), None);
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 10), "short");
        assert_eq!(truncate_for_log("abcdefghij", 4), "abcd...");
    }
}

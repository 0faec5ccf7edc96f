use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::PrepVistaError;

const MIB: u64 = 1024 * 1024;

/// Upload limit for resumes, in bytes.
pub const MAX_RESUME_BYTES: u64 = 10 * MIB;

/// A file picked by the user. Only the name, type and size are ever looked at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub size_bytes: u64,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: Option<&str>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.map(str::to_string),
            size_bytes,
        }
    }

    /// Builds a selection from a path on disk, guessing the MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, PrepVistaError> {
        let metadata = std::fs::metadata(path).map_err(|e| PrepVistaError::FileMetadataError {
            path: path.display().to_string(),
            source: e,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = guess_mime_type(&name);
        Ok(Self::new(name, mime_type, metadata.len()))
    }

    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / MIB as f64
    }

    fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }

    pub fn looks_like_pdf(&self) -> bool {
        self.mime_type.as_deref() == Some("application/pdf")
            || self.extension().as_deref() == Some("pdf")
    }

    pub fn looks_like_video(&self) -> bool {
        match self.mime_type.as_deref() {
            Some(mime) => mime.starts_with("video/"),
            None => guess_mime_type(&self.name).is_some_and(|mime| mime.starts_with("video/")),
        }
    }

    /// Accepts the file as a resume upload: a PDF no larger than [`MAX_RESUME_BYTES`].
    pub fn check_resume(&self) -> Result<(), PrepVistaError> {
        if !self.looks_like_pdf() {
            return Err(PrepVistaError::UnsupportedFileType {
                name: self.name.clone(),
                expected: "a PDF document".to_string(),
            });
        }
        if self.size_bytes > MAX_RESUME_BYTES {
            return Err(PrepVistaError::FileTooLarge {
                name: self.name.clone(),
                size_bytes: self.size_bytes,
                limit_bytes: MAX_RESUME_BYTES,
            });
        }
        Ok(())
    }

    pub fn check_video(&self) -> Result<(), PrepVistaError> {
        if self.looks_like_video() {
            Ok(())
        } else {
            Err(PrepVistaError::UnsupportedFileType {
                name: self.name.clone(),
                expected: "a video file".to_string(),
            })
        }
    }
}

pub(crate) fn guess_mime_type(name: &str) -> Option<&'static str> {
    let extension = Path::new(name).extension()?.to_string_lossy().to_lowercase();
    let mime = match extension.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_pdf_detection_by_mime_or_extension() {
        assert!(SelectedFile::new("cv", Some("application/pdf"), 10).looks_like_pdf());
        assert!(SelectedFile::new("cv.PDF", None, 10).looks_like_pdf());
        assert!(!SelectedFile::new("cv.docx", Some("application/msword"), 10).looks_like_pdf());
    }

    #[test]
    fn test_resume_size_limit() {
        let file = SelectedFile::new("cv.pdf", None, MAX_RESUME_BYTES + 1);
        assert!(matches!(
            file.check_resume(),
            Err(PrepVistaError::FileTooLarge { .. })
        ));
        let file = SelectedFile::new("cv.pdf", None, MAX_RESUME_BYTES);
        assert!(file.check_resume().is_ok());
    }

    #[test]
    fn test_video_check() {
        assert!(SelectedFile::new("take.webm", Some("video/webm"), 1).check_video().is_ok());
        assert!(SelectedFile::new("take.pdf", Some("application/pdf"), 1).check_video().is_err());
    }

    #[test]
    fn test_video_check_without_mime_type() {
        assert!(SelectedFile::new("take.mp4", None, 1).check_video().is_ok());
        assert!(SelectedFile::new("TAKE.MOV", None, 1).check_video().is_ok());
        assert!(SelectedFile::new("notes.txt", None, 1).check_video().is_err());
        assert!(SelectedFile::new("take", None, 1).check_video().is_err());
    }

    #[test]
    fn test_from_path_reads_size_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"%PDF-1.4").unwrap();

        let selected = SelectedFile::from_path(&path).unwrap();
        assert_eq!(selected.name, "resume.pdf");
        assert_eq!(selected.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(selected.size_bytes, 8);
    }

    #[test]
    fn test_from_missing_path_fails() {
        let err = SelectedFile::from_path(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, PrepVistaError::FileMetadataError { .. }));
    }
}

//! Staged file attachments.

use crate::error::StagingError;
use std::path::Path;
use std::sync::Arc;

/// MIME type declared for content that neither sniffing nor the extension
/// table can identify.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// A file the operator intends to send with the next mission.
///
/// Identity is positional: two attachments with identical bytes and names
/// are still distinct entries in the staging list. The bytes are shared, so
/// cloning an attachment into a mission snapshot does not copy content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    bytes: Arc<[u8]>,
    file_name: String,
    mime_type: String,
}

/// Display category of an attachment, derived from its declared MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Document,
    Code,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            bytes: Arc::from(bytes.into()),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Read a file from disk. The declared MIME type is sniffed from the
    /// content first and the extension second.
    pub fn from_path(path: &Path) -> Result<Self, StagingError> {
        let metadata = std::fs::metadata(path).map_err(|source| StagingError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(StagingError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path).map_err(|source| StagingError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = declared_mime_type(&bytes, path);

        Ok(Self::new(file_name, mime_type, bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Byte length of the content.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn kind(&self) -> AttachmentKind {
        if self.mime_type.contains("image") {
            AttachmentKind::Image
        } else if self.mime_type.contains("pdf") {
            AttachmentKind::Document
        } else {
            AttachmentKind::Code
        }
    }

    /// Size in kilobytes with one decimal, e.g. `"1.5 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size() as f64 / 1024.0)
    }
}

fn declared_mime_type(bytes: &[u8], path: &Path) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let mime = match extension.as_str() {
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "py" => "text/x-python",
        "rs" => "text/x-rust",
        "js" => "text/javascript",
        "ts" | "tsx" => "text/typescript",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "json" => "application/json",
        "toml" => "application/toml",
        "yaml" | "yml" => "application/yaml",
        "sh" => "application/x-sh",
        _ => DEFAULT_MIME_TYPE,
    };
    mime.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn size_matches_byte_length() {
        let attachment = Attachment::new("a.py", "text/x-python", b"print(1)".to_vec());
        assert_eq!(attachment.size(), 8);
        assert_eq!(attachment.bytes(), b"print(1)");
    }

    #[test]
    fn kind_follows_mime_type() {
        assert_eq!(
            Attachment::new("a.png", "image/png", Vec::new()).kind(),
            AttachmentKind::Image
        );
        assert_eq!(
            Attachment::new("a.pdf", "application/pdf", Vec::new()).kind(),
            AttachmentKind::Document
        );
        assert_eq!(
            Attachment::new("a.py", "text/x-python", Vec::new()).kind(),
            AttachmentKind::Code
        );
        assert_eq!(
            Attachment::new("blob", "", Vec::new()).kind(),
            AttachmentKind::Code
        );
    }

    #[test]
    fn size_label_uses_kilobytes() {
        let attachment = Attachment::new("a.bin", DEFAULT_MIME_TYPE, vec![0u8; 1536]);
        assert_eq!(attachment.size_label(), "1.5 KB");
        let empty = Attachment::new("e.bin", DEFAULT_MIME_TYPE, Vec::new());
        assert_eq!(empty.size_label(), "0.0 KB");
    }

    #[test]
    fn from_path_reads_name_bytes_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solver.py");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"print('hi')\n").unwrap();

        let attachment = Attachment::from_path(&path).unwrap();
        assert_eq!(attachment.file_name(), "solver.py");
        assert_eq!(attachment.mime_type(), "text/x-python");
        assert_eq!(attachment.bytes(), b"print('hi')\n");
    }

    #[test]
    fn from_path_sniffs_png_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screenshot");
        let png_header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        std::fs::write(&path, png_header).unwrap();

        let attachment = Attachment::from_path(&path).unwrap();
        assert_eq!(attachment.mime_type(), "image/png");
        assert_eq!(attachment.kind(), AttachmentKind::Image);
    }

    #[test]
    fn from_path_rejects_directories_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Attachment::from_path(dir.path()),
            Err(StagingError::NotAFile { .. })
        ));
        assert!(matches!(
            Attachment::from_path(&dir.path().join("nope.txt")),
            Err(StagingError::Read { .. })
        ));
    }
}

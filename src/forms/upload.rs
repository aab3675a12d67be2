use std::io::{self, Write};

use tempfile::NamedTempFile;

/// One uploaded file, already spooled to a temporary file by the caller.
#[derive(Debug)]
pub struct UploadedFile {
    pub file: NamedTempFile,
    pub file_name: Option<String>,
    pub size: u64,
}

impl UploadedFile {
    /// Spool `bytes` into a fresh temporary file.
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> io::Result<Self> {
        let mut file = NamedTempFile::new()?;
        file.write_all(bytes)?;
        file.flush()?;

        Ok(Self {
            file,
            file_name: Some(file_name.into()),
            size: bytes.len() as u64,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Original name as sent by the client, or an empty string.
    pub fn original_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn from_bytes_spools_content() {
        let upload = UploadedFile::from_bytes("desk.jpg", b"jpeg-bytes").unwrap();
        assert_eq!(upload.size, 10);
        assert_eq!(upload.original_name(), "desk.jpg");

        let mut content = String::new();
        upload.file.reopen().unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "jpeg-bytes");
    }

    #[test]
    fn empty_upload_is_detected() {
        let upload = UploadedFile::from_bytes("empty.png", b"").unwrap();
        assert!(upload.is_empty());
    }
}

use crate::domain::ports::Storage;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn resolve(&self, document: &str) -> PathBuf {
        self.base_path.join(document)
    }

    fn read_document(&self, document: &str) -> std::io::Result<Option<Vec<u8>>> {
        match fs::read(self.resolve(document)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_document(&self, document: &str, data: &[u8]) -> std::io::Result<()> {
        let full_path = self.resolve(document);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write next to the target and rename over it so readers never see a half-written document.
        let mut tmp_name = full_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let written = fs::File::create(&tmp_path).and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|_| fs::rename(&tmp_path, &full_path)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }
}

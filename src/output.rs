use anyhow::anyhow;
use formatx::formatx;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Somewhere to write each named results document.
pub trait Output: Debug {
    fn writer_for_location_key(&self, location_key: &str) -> anyhow::Result<impl Write>;
}

/// Writes each results document to its own file in a directory.
#[derive(Debug)]
pub struct FileOutput {
    directory_path: PathBuf,
    file_template: String,
}

impl FileOutput {
    /// Arguments:
    /// * `directory_path` - directory the files are created in
    /// * `file_template` - file name with a `{}` placeholder for the location key,
    ///                     e.g. `house__results_{}.csv`
    pub fn new(directory_path: PathBuf, file_template: String) -> Self {
        Self {
            directory_path,
            file_template,
        }
    }

    fn file_name(&self, location_key: &str) -> anyhow::Result<String> {
        formatx!(&self.file_template, location_key).map_err(|e| {
            anyhow!(
                "Could not make a file name from template '{}': {e:?}",
                self.file_template
            )
        })
    }
}

impl Output for FileOutput {
    fn writer_for_location_key(&self, location_key: &str) -> anyhow::Result<impl Write> {
        Ok(BufWriter::new(File::create(
            self.directory_path.join(self.file_name(location_key)?),
        )?))
    }
}

impl Output for &FileOutput {
    fn writer_for_location_key(&self, location_key: &str) -> anyhow::Result<impl Write> {
        <FileOutput as Output>::writer_for_location_key(self, location_key)
    }
}

/// Keeps each results document in memory, keyed by location key.
#[derive(Clone, Debug, Default)]
pub struct MemoryOutput {
    documents: Arc<Mutex<IndexMap<String, Vec<u8>>>>,
}

impl MemoryOutput {
    pub fn location_keys(&self) -> Vec<String> {
        self.documents.lock().keys().cloned().collect()
    }

    pub fn document(&self, location_key: &str) -> Option<String> {
        self.documents
            .lock()
            .get(location_key)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl Output for MemoryOutput {
    fn writer_for_location_key(&self, location_key: &str) -> anyhow::Result<impl Write> {
        // a document is replaced when its key is written again
        self.documents
            .lock()
            .insert(location_key.to_string(), Default::default());

        Ok(MemoryWriter {
            location_key: location_key.to_string(),
            documents: self.documents.clone(),
        })
    }
}

struct MemoryWriter {
    location_key: String,
    documents: Arc<Mutex<IndexMap<String, Vec<u8>>>>,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.documents
            .lock()
            .entry(self.location_key.clone())
            .or_default()
            .extend_from_slice(buf);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn should_collect_documents_in_memory() {
        let output = MemoryOutput::default();
        {
            let mut writer = output.writer_for_location_key("comparison").unwrap();
            write!(writer, "a,b\n1,2\n").unwrap();
        }
        output
            .writer_for_location_key("by_fuel")
            .unwrap()
            .write_all(b"c\n")
            .unwrap();

        assert_eq!(output.location_keys(), ["comparison", "by_fuel"]);
        assert_eq!(output.document("comparison").unwrap(), "a,b\n1,2\n");
        assert_eq!(output.document("missing"), None);
    }

    #[rstest]
    fn should_replace_rewritten_documents() {
        let output = MemoryOutput::default();
        for contents in ["first", "second"] {
            output
                .writer_for_location_key("summary")
                .unwrap()
                .write_all(contents.as_bytes())
                .unwrap();
        }

        assert_eq!(output.document("summary").unwrap(), "second");
    }

    #[rstest]
    fn should_name_files_from_template() {
        let output = FileOutput::new(PathBuf::from("."), "house__results_{}.csv".to_string());
        assert_eq!(
            output.file_name("comparison").unwrap(),
            "house__results_comparison.csv"
        );
    }
}

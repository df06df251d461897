use inkreview_core::FileLike;
use web_sys::File;

/// A `File` from the picker or a drop
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserFile(pub File);

impl BrowserFile {
    pub fn file(&self) -> &File {
        &self.0
    }
}

impl From<File> for BrowserFile {
    fn from(file: File) -> Self {
        Self(file)
    }
}

impl FileLike for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }
}

/// First file of a picker or drop selection
pub fn first_file(files: Option<web_sys::FileList>) -> Option<BrowserFile> {
    files.and_then(|list| list.get(0)).map(BrowserFile::from)
}

use std::collections::HashMap;

use iar_model::{Document, UploadReport};

/// Source asset id to registry id, learned from earlier upload reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMap {
    ids: HashMap<String, String>,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect mappings from upload documents; other documents are ignored.
    ///
    /// When a source id appears more than once the last report wins.
    pub fn from_documents<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        let mut map = Self::new();
        for report in documents.into_iter().filter_map(Document::into_upload) {
            map.record(&report);
        }
        map
    }

    /// Remember the destination of a successful upload.
    pub fn record(&mut self, report: &UploadReport) {
        if let Some(dest_id) = &report.dest_id {
            self.insert(report.source_id.clone(), dest_id.clone());
        }
    }

    pub fn insert(&mut self, source_id: String, dest_id: String) {
        self.ids.insert(source_id, dest_id);
    }

    pub fn get(&self, source_id: &str) -> Option<&str> {
        self.ids.get(source_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iar_model::{DepartmentReport, UploadMethod};
    use serde_json::json;

    #[test]
    fn later_reports_win_and_failures_are_ignored() {
        let documents = vec![
            Document::Upload(UploadReport::created("s1", "https://r/", 201, "d1")),
            Document::Report(DepartmentReport::default()),
            Document::Upload(UploadReport::failed(
                "s2",
                UploadMethod::Post,
                "https://r/",
                Some(400),
                json!({"name": ["required"]}),
            )),
            Document::Upload(UploadReport::created("s1", "https://r/", 201, "d9")),
        ];
        let map = IdMap::from_documents(documents);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("s1"), Some("d9"));
        assert_eq!(map.get("s2"), None);
    }
}

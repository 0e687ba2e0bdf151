//! Attachment records derived from legacy resource paths.

use log::debug;

use reqmig_core::model::{Attachment, AttachmentEntry};

use crate::config::AttachmentConfig;

/// Turns legacy absolute resource paths into project-relative attachments.
#[derive(Debug, Clone, Default)]
pub struct AttachmentCollector {
    config: AttachmentConfig,
}

impl AttachmentCollector {
    pub fn new(config: AttachmentConfig) -> Self {
        Self { config }
    }

    /// Builds the attachment list of one artifact.
    ///
    /// Existing entries come first, followed by the primary resource and
    /// then the embedded resources in their given order. An empty primary
    /// path counts as absent. Returns `None` only when there is nothing at
    /// all to list.
    pub fn collect(
        &self,
        existing: Option<Vec<AttachmentEntry>>,
        primary: Option<&str>,
        embedded: &[String],
    ) -> Option<Vec<AttachmentEntry>> {
        let collected: Vec<AttachmentEntry> = primary
            .filter(|path| !path.is_empty())
            .into_iter()
            .chain(embedded.iter().map(String::as_str))
            .map(|path| AttachmentEntry::Collected(self.attachment(path)))
            .collect();

        match existing {
            Some(mut entries) => {
                entries.extend(collected);
                Some(entries)
            }
            None if collected.is_empty() => None,
            None => Some(collected),
        }
    }

    /// Derives one attachment record from a legacy absolute path.
    ///
    /// # Examples
    ///
    /// ```
    /// # use reqmig::AttachmentCollector;
    /// let collector = AttachmentCollector::default();
    /// let attachment =
    ///     collector.attachment(r"C:\Export\modules_Test_Project_Template\SubDir\Spec.docx");
    /// assert_eq!(attachment.file_path, r"SubDir\Spec.docx");
    /// assert_eq!(attachment.file_name, "Spec");
    /// assert_eq!(attachment.title, "Spec");
    /// ```
    pub fn attachment(&self, path: &str) -> Attachment {
        let relative = self.relative_path(path);
        Attachment::new(relative, file_stem(relative))
    }

    fn relative_path<'a>(&self, path: &'a str) -> &'a str {
        let anchor = self.config.anchor();
        match path.rfind(anchor) {
            Some(at) if !anchor.is_empty() => &path[at + anchor.len()..],
            _ => {
                debug!(path, anchor; "Resource path lacks project anchor, keeping it whole");
                path
            }
        }
    }
}

/// Base name of a path with either separator, without its extension.
///
/// A leading dot does not start an extension, so `.profile` keeps its name.
fn file_stem(path: &str) -> &str {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match base.rfind('.') {
        Some(dot) if base[..dot].chars().any(|c| c != '.') => &base[..dot],
        _ => base,
    }
}

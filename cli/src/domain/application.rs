//! Application and template documents.
//!
//! Both wrap an opaque [`Document`] fetched from the API. The wrappers make
//! explicit the handful of fields the tool depends on (`name`, `design.vms`)
//! and leave everything else untouched so the whole document can be submitted
//! back unchanged.

use ravello_common::{Document, DocumentError, Value};

/// Location of the VM list inside an application document.
pub const VMS_PATH: &[&str] = &["design", "vms"];

/// Name given to the `index`-th clone: the basename followed by the index,
/// with no separator and no padding.
#[must_use]
pub fn clone_vm_name(basename: &str, index: u32) -> String {
    format!("{basename}{index}")
}

/// An application fetched from the API, held mutably for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDocument(Document);

impl ApplicationDocument {
    #[must_use]
    pub fn new(doc: Document) -> Self {
        Self(doc)
    }

    /// The application's numeric id, used to address it on update/publish.
    pub fn id(&self) -> Result<i64, DocumentError> {
        let value = self.0.at_path(&["id"])?;
        value.as_i64().ok_or_else(|| DocumentError::WrongType {
            path: "id".to_string(),
            expected: "integer",
            found: value.kind(),
        })
    }

    pub fn name(&self) -> Result<&str, DocumentError> {
        self.0.require_str("name")
    }

    /// The VMs currently in the design.
    pub fn vms(&self) -> Result<&[Value], DocumentError> {
        self.0.sequence_at(VMS_PATH)
    }

    pub fn vms_mut(&mut self) -> Result<&mut Vec<Value>, DocumentError> {
        self.0.sequence_at_mut(VMS_PATH)
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.0
    }
}

/// A template image: the read-only source every clone is copied from.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateImage(Document);

impl TemplateImage {
    #[must_use]
    pub fn new(doc: Document) -> Self {
        Self(doc)
    }

    pub fn name(&self) -> Result<&str, DocumentError> {
        self.0.require_str("name")
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.0
    }
}

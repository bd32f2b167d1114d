use relform_core::SchemaDocument;
use serde_yaml::Value;

use crate::apply::apply;
use crate::diff::{SchemaChange, diff_documents};
use crate::error::TransformError;
use crate::foreign_key::add_foreign_keys;
use crate::statement::is_skipped;
use crate::tags::strip_document_tags;

/// A loaded document and its editable working copy.
///
/// The base never changes after construction. Omitted tags are only applied to the
/// rendered views, so the working document stays fully typed.
#[derive(Debug, Clone)]
pub struct SchemaSession {
    base: SchemaDocument,
    working: SchemaDocument,
    omitted_tags: Vec<String>,
}

impl SchemaSession {
    pub fn new(base: SchemaDocument) -> Self {
        Self {
            working: base.clone(),
            base,
            omitted_tags: Vec::new(),
        }
    }

    pub fn base(&self) -> &SchemaDocument {
        &self.base
    }

    pub fn working(&self) -> &SchemaDocument {
        &self.working
    }

    pub fn omitted_tags(&self) -> &[String] {
        &self.omitted_tags
    }

    /// Apply statements to the working copy; see [`apply`].
    pub fn transform<S: AsRef<str>>(&mut self, statements: &[S]) -> Result<(), TransformError> {
        apply(&mut self.working, statements)?;
        Ok(())
    }

    /// Like [`transform`](Self::transform), but the working copy is left as it was when
    /// any statement fails.
    pub fn apply_atomic<S: AsRef<str>>(&mut self, statements: &[S]) -> Result<(), TransformError> {
        let mut draft = self.working.clone();
        apply(&mut draft, statements)?;
        self.working = draft;
        Ok(())
    }

    pub fn add_foreign_keys<S: AsRef<str>>(&mut self, specs: &[S]) -> Result<(), TransformError> {
        add_foreign_keys(&mut self.working, specs)?;
        Ok(())
    }

    pub fn add_foreign_keys_atomic<S: AsRef<str>>(
        &mut self,
        specs: &[S],
    ) -> Result<(), TransformError> {
        let mut draft = self.working.clone();
        add_foreign_keys(&mut draft, specs)?;
        self.working = draft;
        Ok(())
    }

    /// Remember keys to drop from [`view`](Self::view). Blank entries, `#` comments and
    /// tags already registered are ignored.
    pub fn omit_tags<S: AsRef<str>>(&mut self, tags: &[S]) {
        for tag in tags {
            let tag = tag.as_ref().trim();
            if is_skipped(tag) || self.omitted_tags.iter().any(|t| t == tag) {
                continue;
            }
            self.omitted_tags.push(tag.to_string());
        }
    }

    /// The working document with omitted tags removed.
    pub fn view(&self) -> Result<Value, serde_yaml::Error> {
        strip_document_tags(&self.working, &self.omitted_tags)
    }

    pub fn base_view(&self) -> Result<Value, serde_yaml::Error> {
        self.base.to_value()
    }

    /// Drop every edit and omitted tag.
    pub fn reset(&mut self) {
        self.working = self.base.clone();
        self.omitted_tags.clear();
    }

    pub fn diff(&self) -> Vec<SchemaChange> {
        diff_documents(&self.base, &self.working)
    }
}

use relform_core::SchemaDocument;

/// Standardized exporter interface for all supported diagram formats.
pub trait DiagramExporter {
    fn render(&self, doc: &SchemaDocument) -> String;
}

//! Diagram renderers for schema documents.

pub mod diagram;
pub mod mermaid;

pub use diagram::DiagramExporter;
pub use mermaid::{MermaidExporter, mermaid_type, render_mermaid};

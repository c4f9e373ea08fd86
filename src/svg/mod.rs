//! SVG handling: parsing, structural validation and the conversions the
//! tools expose.

use std::sync::{Arc, LazyLock};
use thiserror::Error;

pub mod document;
pub mod jsx;
pub mod metadata;
pub mod minify;
pub mod pdf;
pub mod pretty;
pub mod raster;
pub mod validate;
pub mod vocabulary;

#[derive(Debug, Error)]
pub enum SvgError {
    #[error("XML syntax error at position {position}: {message}")]
    Syntax { position: u64, message: String },
    #[error("failed to parse SVG: {0}")]
    Parse(String),
    #[error("{0}")]
    Render(String),
    #[error("minification failed: {0}")]
    Minify(String),
    #[error("PDF conversion failed: {0}")]
    Pdf(String),
    #[error("{0}")]
    Codegen(String),
    #[error("failed to write formatted output: {0}")]
    Write(String),
}

/// Tag or attribute name with any namespace prefix removed.
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Namespace prefix of a qualified name, if any.
pub fn prefix(name: &str) -> Option<&str> {
    name.split_once(':').map(|(prefix, _)| prefix)
}

// System fonts are scanned once; both the rasterizer and the PDF writer
// share the database.
static FONTS: LazyLock<Arc<usvg::fontdb::Database>> = LazyLock::new(|| {
    let mut database = usvg::fontdb::Database::new();
    database.load_system_fonts();
    tracing::debug!(faces = database.len(), "loaded system fonts");
    Arc::new(database)
});

/// Parses source into a render tree with references and styles resolved.
pub(crate) fn load_tree(source: &str) -> Result<usvg::Tree, SvgError> {
    let options = usvg::Options {
        fontdb: Arc::clone(&FONTS),
        ..usvg::Options::default()
    };
    usvg::Tree::from_str(source, &options).map_err(|err| SvgError::Parse(err.to_string()))
}

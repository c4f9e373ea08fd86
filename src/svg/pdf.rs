use super::{SvgError, load_tree};
use svg2pdf::{ConversionOptions, PageOptions};

/// Draws the SVG onto a single PDF page sized to the image.
pub fn convert(source: &str) -> Result<Vec<u8>, SvgError> {
    let tree = load_tree(source)?;
    svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|err| SvgError::Pdf(err.to_string()))
}

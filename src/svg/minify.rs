//! SVG minification, delegated to `svag`.
//!
//! Input is checked for well-formedness first so malformed markup is
//! reported the same way as by every other tool.

use super::SvgError;
use super::document::check_well_formed;

// One svag pass does not always reach a fixed point.
const MAX_PASSES: usize = 4;

pub fn minify(source: &str) -> Result<String, SvgError> {
    check_well_formed(source)?;

    let mut current = svag_pass(source)?;
    for _ in 1..MAX_PASSES {
        let next = svag_pass(&current)?;
        if next == current {
            break;
        }
        current = next;
    }
    Ok(current)
}

fn svag_pass(source: &str) -> Result<String, SvgError> {
    svag::minify(source).map_err(|err| SvgError::Minify(err.to_string()))
}

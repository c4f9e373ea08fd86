use super::{SvgError, load_tree};
use resvg::tiny_skia::{Pixmap, Transform};

pub const MAX_DIMENSION: u32 = 16_384;

/// Rasterizes SVG source into PNG bytes.
///
/// With both `width` and `height` the image is stretched to that box; with
/// one of them the other follows the intrinsic aspect ratio.
pub fn rasterize(
    source: &str,
    width: Option<f64>,
    height: Option<f64>,
) -> Result<Vec<u8>, SvgError> {
    let tree = load_tree(source)?;
    let size = tree.size();
    let (target_width, target_height) = target_size(
        f64::from(size.width()),
        f64::from(size.height()),
        width,
        height,
    )?;

    let mut pixmap = Pixmap::new(target_width, target_height).ok_or_else(|| {
        SvgError::Render(format!(
            "cannot allocate a {target_width}x{target_height} canvas"
        ))
    })?;
    let transform = Transform::from_scale(
        target_width as f32 / size.width(),
        target_height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|err| SvgError::Render(format!("PNG encoding failed: {err}")))
}

fn target_size(
    intrinsic_width: f64,
    intrinsic_height: f64,
    width: Option<f64>,
    height: Option<f64>,
) -> Result<(u32, u32), SvgError> {
    for (label, value) in [("width", width), ("height", height)] {
        if let Some(value) = value
            && !(value.is_finite() && value > 0.0)
        {
            return Err(SvgError::Render(format!(
                "{label} must be a positive number, got {value}"
            )));
        }
    }

    let (width, height) = match (width, height) {
        (Some(width), Some(height)) => (width, height),
        (Some(width), None) => (width, intrinsic_height * width / intrinsic_width),
        (None, Some(height)) => (intrinsic_width * height / intrinsic_height, height),
        (None, None) => (intrinsic_width, intrinsic_height),
    };
    Ok((pixels("width", width)?, pixels("height", height)?))
}

fn pixels(label: &str, value: f64) -> Result<u32, SvgError> {
    let value = value.ceil().max(1.0);
    if value > f64::from(MAX_DIMENSION) {
        return Err(SvgError::Render(format!(
            "{label} of {value}px exceeds the {MAX_DIMENSION}px limit"
        )));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20" viewBox="0 0 40 20"><rect width="40" height="20" fill="#00f"/></svg>"##;
    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn png_dimensions(png: &[u8]) -> (u32, u32) {
        let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
        let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
        (width, height)
    }

    #[test]
    fn renders_intrinsic_size() {
        let png = rasterize(SQUARE, None, None).expect("render");
        assert!(png.starts_with(PNG_SIGNATURE));
        assert_eq!(png_dimensions(&png), (40, 20));
    }

    #[test]
    fn width_only_keeps_aspect_ratio() {
        let png = rasterize(SQUARE, Some(80.0), None).expect("render");
        assert_eq!(png_dimensions(&png), (80, 40));
    }

    #[test]
    fn both_dimensions_stretch() {
        let png = rasterize(SQUARE, Some(10.0), Some(10.0)).expect("render");
        assert_eq!(png_dimensions(&png), (10, 10));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(target_size(10.0, 10.0, Some(0.0), None).is_err());
        assert!(target_size(10.0, 10.0, None, Some(-5.0)).is_err());
    }

    #[test]
    fn rejects_oversized_output() {
        let err = target_size(10.0, 10.0, Some(100_000.0), None).expect_err("too big");
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn fractional_sizes_round_up() {
        assert_eq!(target_size(10.5, 3.2, None, None).expect("size"), (11, 4));
    }

    #[test]
    fn unparseable_source_is_an_error() {
        assert!(rasterize("<svg", None, None).is_err());
    }

    #[test]
    fn renders_without_namespace_declaration() {
        let png = rasterize(
            r#"<svg width="8" height="8"><rect width="8" height="8"/></svg>"#,
            None,
            None,
        )
        .expect("render");
        assert_eq!(png_dimensions(&png), (8, 8));
    }
}

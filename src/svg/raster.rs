use crate::{
    foundation::error::{SymbolFxError, SymbolFxResult},
    svg::document::SvgDocument,
};

/// Largest preview edge we are willing to allocate.
const MAX_DIM: u32 = 4096;

/// Rasterized preview of a mounted element.
#[derive(Clone, Debug)]
pub struct Preview {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8 pixels.
    pub rgba8_premul: Vec<u8>,
}

impl Preview {
    /// Convert premultiplied pixels to straight alpha (for PNG encoders).
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.rgba8_premul.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Render the current state of `doc` into a `width`×`height` pixmap.
///
/// The document's intrinsic size (viewBox or width/height) is scaled non-uniformly to fill the
/// target. CSS keyframe effects are not evaluated; the preview shows the static attribute state,
/// which is what value-driven sessions mutate.
pub(crate) fn rasterize(doc: &SvgDocument, width: u32, height: u32) -> SymbolFxResult<Preview> {
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(SymbolFxError::validation(format!(
            "preview size must be within 1..={MAX_DIM}, got {width}x{height}"
        )));
    }

    let tree = usvg::Tree::from_str(&doc.to_svg_string(), &usvg::Options::default())
        .map_err(|e| SymbolFxError::parse(format!("usvg rejected document: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| SymbolFxError::validation("failed to allocate preview pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&tree, xform, &mut pixmap.as_mut());
    Ok(Preview {
        width,
        height,
        rgba8_premul: pixmap.data().to_vec(),
    })
}

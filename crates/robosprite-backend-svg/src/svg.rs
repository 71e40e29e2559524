//! Minimal SVG document writer.
//!
//! Only the handful of primitives the figure needs are supported: filled
//! ellipses and rounded rectangles inside a single layer group, each with an
//! optional transform.

use std::fmt::Write as _;

/// Threshold below which a transform component counts as a no-op.
const EPSILON: f64 = 1e-6;

/// An SVG `transform` attribute built from rotate, scale and translate parts.
///
/// Parts are always emitted in rotate, scale, translate order; parts that
/// would have no effect are omitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    rotate: Option<(f64, f64, f64)>,
    scale: (f64, f64),
    translate: (f64, f64),
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            rotate: None,
            scale: (1.0, 1.0),
            translate: (0.0, 0.0),
        }
    }
}

impl Transform {
    /// The identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotation by `angle` degrees about `(cx, cy)`.
    pub fn rotate(mut self, angle: f64, cx: f64, cy: f64) -> Self {
        self.rotate = Some((angle, cx, cy));
        self
    }

    /// Scale by `(sx, sy)`.
    pub fn scale(mut self, sx: f64, sy: f64) -> Self {
        self.scale = (sx, sy);
        self
    }

    /// Translation by `(tx, ty)`.
    pub fn translate(mut self, tx: f64, ty: f64) -> Self {
        self.translate = (tx, ty);
        self
    }

    /// Whether every part is a no-op.
    pub fn is_identity(&self) -> bool {
        self.value().is_empty()
    }

    /// Value of the attribute, e.g. `rotate(5.000000 25.000000 25.000000)`.
    pub fn value(&self) -> String {
        let mut parts = Vec::new();

        if let Some((angle, cx, cy)) = self.rotate {
            if angle.abs() > EPSILON {
                parts.push(format!("rotate({:.6} {:.6} {:.6})", angle, cx, cy));
            }
        }

        let (sx, sy) = self.scale;
        if (sx - 1.0).abs() > EPSILON || (sy - 1.0).abs() > EPSILON {
            parts.push(format!("scale({:.6} {:.6})", sx, sy));
        }

        let (tx, ty) = self.translate;
        if tx.abs() > EPSILON || ty.abs() > EPSILON {
            parts.push(format!("translate({:.6} {:.6})", tx, ty));
        }

        parts.join(" ")
    }

    /// Full attribute with a leading space, or an empty string for the
    /// identity.
    pub fn attribute(&self) -> String {
        let value = self.value();
        if value.is_empty() {
            String::new()
        } else {
            format!(" transform=\"{}\"", value)
        }
    }
}

/// An SVG document under construction.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    body: String,
}

impl SvgDocument {
    /// Starts a document with a `width` by `height` canvas.
    pub fn new(width: u32, height: u32) -> Self {
        let mut body = String::new();
        body.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
        body.push_str("<svg\n");
        body.push_str("   xmlns:dc=\"http://purl.org/dc/elements/1.1/\"\n");
        body.push_str("   xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"\n");
        body.push_str("   xmlns:svg=\"http://www.w3.org/2000/svg\"\n");
        body.push_str("   xmlns=\"http://www.w3.org/2000/svg\"\n");
        let _ = writeln!(body, "   width=\"{}\"", width);
        let _ = writeln!(body, "   height=\"{}\"", height);
        let _ = writeln!(body, "   viewBox=\"0 0 {} {}\"", width, height);
        body.push_str("   version=\"1.1\" >\n");
        body.push_str("  <g id=\"layer1\">\n");
        Self { body }
    }

    /// Adds a filled ellipse.
    pub fn ellipse(
        &mut self,
        (cx, cy): (f64, f64),
        (rx, ry): (f64, f64),
        fill: &str,
        transform: Transform,
    ) -> &mut Self {
        let _ = writeln!(
            self.body,
            "<ellipse style=\"fill:{}\" cx=\"{:.6}\" cy=\"{:.6}\" rx=\"{:.6}\" ry=\"{:.6}\"{} />",
            fill,
            cx,
            cy,
            rx,
            ry,
            transform.attribute()
        );
        self
    }

    /// Adds a filled rectangle with rounded corners of vertical radius `ry`.
    pub fn rect(
        &mut self,
        (x, y): (f64, f64),
        (width, height): (f64, f64),
        ry: f64,
        fill: &str,
        transform: Transform,
    ) -> &mut Self {
        let _ = writeln!(
            self.body,
            "<rect style=\"fill:{}\" x=\"{:.6}\" y=\"{:.6}\" width=\"{:.6}\" height=\"{:.6}\" ry=\"{:.6}\"{} />",
            fill,
            x,
            y,
            width,
            height,
            ry,
            transform.attribute()
        );
        self
    }

    /// Closes the layer and the document.
    pub fn finish(mut self) -> String {
        self.body.push_str("</g></svg>\n");
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identity_transform_is_empty() {
        assert_eq!(Transform::new().attribute(), "");
        assert!(Transform::new().rotate(0.0, 25.0, 25.0).is_identity());
        assert!(Transform::new().scale(1.0, 1.0).translate(0.0, 0.0).is_identity());
    }

    #[test]
    fn test_transform_order() {
        let t = Transform::new()
            .translate(5.0, 0.0)
            .scale(0.8, 1.0)
            .rotate(-3.0, 15.0, 65.0);
        assert_eq!(
            t.attribute(),
            " transform=\"rotate(-3.000000 15.000000 65.000000) scale(0.800000 1.000000) translate(5.000000 0.000000)\""
        );
    }

    #[test]
    fn test_scale_only_on_one_axis() {
        let t = Transform::new().scale(1.0, 2.0);
        assert_eq!(t.value(), "scale(1.000000 2.000000)");
    }

    #[test]
    fn test_document_layout() {
        let mut doc = SvgDocument::new(50, 100);
        doc.ellipse((25.0, 25.0), (16.0, 14.0), "#000000", Transform::new())
            .rect((15.0, 65.0), (5.0, 25.0), 4.0, "#000000", Transform::new());
        let text = doc.finish();

        assert!(text.starts_with("<?xml version=\"1.0\""));
        assert!(text.contains("   width=\"50\"\n"));
        assert!(text.contains("   viewBox=\"0 0 50 100\"\n"));
        assert!(text.contains("<g id=\"layer1\">"));
        assert!(text.contains(
            "<ellipse style=\"fill:#000000\" cx=\"25.000000\" cy=\"25.000000\" rx=\"16.000000\" ry=\"14.000000\" />"
        ));
        assert!(text.contains("ry=\"4.000000\" />"));
        assert!(text.ends_with("</g></svg>\n"));
    }
}

//! The stick-figure drawing.

use robosprite_core::FigurePose;

use crate::svg::{SvgDocument, Transform};

/// Canvas width in user units.
pub const CANVAS_WIDTH: u32 = 50;

/// Canvas height in user units.
pub const CANVAS_HEIGHT: u32 = 100;

const BODY_FILL: &str = "#000000";
const EYE_FILL: &str = "#0000ff";
const MOUTH_FILL: &str = "#ff5555";

/// Horizontal scales inside this range are drawn without re-centering.
const NO_RECENTER: std::ops::RangeInclusive<f64> = 0.96..=1.04;

/// Draws `pose` as a complete SVG document.
pub fn draw_figure(pose: &FigurePose) -> String {
    let scale_x = pose.scale_x;
    let shift = if NO_RECENTER.contains(&scale_x) {
        0.0
    } else {
        f64::from(CANVAS_WIDTH) / 2.0 * (1.0 - scale_x)
    };
    let base = Transform::new().scale(scale_x, 1.0).translate(shift, 0.0);

    let mut doc = SvgDocument::new(CANVAS_WIDTH, CANVAS_HEIGHT);

    // Head and body tilt in opposite directions.
    doc.ellipse(
        (25.0, 25.0),
        (16.0, 14.0),
        BODY_FILL,
        base.rotate(pose.head, 25.0, 25.0),
    );
    doc.ellipse(
        (25.0, 55.0),
        (13.0, 17.0),
        BODY_FILL,
        base.rotate(-pose.head, 25.0, 55.0),
    );

    // Eyes
    doc.ellipse((20.0, 25.0), (3.0, 2.0), EYE_FILL, base);
    doc.ellipse((30.0, 25.0), (3.0, 2.0), EYE_FILL, base);

    // Mouth
    doc.ellipse((25.0, 35.0), (7.0, 1.0), MOUTH_FILL, base);

    // Legs swing about their top-left corners.
    doc.rect(
        (15.0, 65.0),
        (5.0, 25.0),
        4.0,
        BODY_FILL,
        base.rotate(pose.left_limb, 15.0, 65.0),
    );
    doc.rect(
        (30.0, 65.0),
        (5.0, 25.0),
        4.0,
        BODY_FILL,
        base.rotate(pose.right_limb, 30.0, 65.0),
    );

    // Hands share the leg angles.
    doc.rect(
        (10.0, 45.0),
        (5.0, 18.0),
        2.5,
        BODY_FILL,
        base.rotate(pose.left_limb, 20.0, 45.0),
    );
    doc.rect(
        (35.0, 45.0),
        (5.0, 18.0),
        2.5,
        BODY_FILL,
        base.rotate(pose.right_limb, 45.0, 45.0),
    );

    doc.finish()
}

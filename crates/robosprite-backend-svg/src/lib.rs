//! Robosprite Vector Backend
//!
//! Draws the walking-man figure as SVG and rasterizes each frame with
//! Inkscape.
//!
//! # Example
//!
//! ```no_run
//! use robosprite_backend_svg::{InkscapeCli, Rasterizer, VectorRenderer};
//! use robosprite_core::{figure_catalog, Generator};
//! use robosprite_tool::SystemRunner;
//!
//! let rasterizer = Rasterizer::locate(None, InkscapeCli::Legacy).unwrap();
//! let renderer = VectorRenderer::new(rasterizer, SystemRunner::default(), "out");
//! let report = Generator::new(renderer).run(&figure_catalog()).unwrap();
//! println!("{} frames", report.frames_rendered);
//! ```

pub mod error;
pub mod figure;
pub mod raster;
pub mod renderer;
pub mod svg;

pub use error::{SvgError, SvgResult};
pub use figure::{draw_figure, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use raster::{InkscapeCli, Rasterizer};
pub use renderer::VectorRenderer;
pub use svg::{SvgDocument, Transform};

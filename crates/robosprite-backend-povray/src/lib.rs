//! Robosprite Ray-Traced Backend
//!
//! Renders the robot with POV-Ray. The scene file is supplied by the user and
//! reads its joint angles from a generated include file (see [`options`]);
//! every traced frame is then composited onto a transparent background with
//! ImageMagick.
//!
//! # Example
//!
//! ```no_run
//! use robosprite_backend_povray::{RaytraceRenderer, RaytraceTools, SceneConfig};
//! use robosprite_core::{robot_catalog, Generator};
//! use robosprite_tool::SystemRunner;
//!
//! let tools = RaytraceTools::locate(None, None).unwrap();
//! let renderer = RaytraceRenderer::new(
//!     SceneConfig::new("img/robot.pov"),
//!     tools,
//!     SystemRunner::default(),
//!     "img",
//! );
//! let report = Generator::new(renderer).run(&robot_catalog()).unwrap();
//! println!("{} frames", report.frames_rendered);
//! ```

pub mod error;
pub mod options;
pub mod renderer;
pub mod scene;

pub use error::{PovrayError, PovrayResult};
pub use options::{PoseParameters, DEFAULT_OPTIONS_FILE};
pub use renderer::{RaytraceRenderer, RaytraceTools};
pub use scene::{SceneConfig, DEFAULT_BACKGROUND, DEFAULT_SIZE};

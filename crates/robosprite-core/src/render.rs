//! The frame renderer seam.

use crate::error::BackendError;
use crate::frame::{FrameSlot, RenderedFrame};

/// Converts one pose into one raster file.
///
/// Implementations own any temporary artifacts they create and remove them
/// before returning; they never delete a file they have already returned.
/// Every call must produce a new, uniquely named file.
pub trait FrameRenderer {
    /// Pose type this renderer understands.
    type Pose;

    /// Backend error type.
    type Error: BackendError;

    /// Renders `pose` into the frame described by `slot`.
    fn render(&mut self, slot: &FrameSlot, pose: &Self::Pose) -> Result<RenderedFrame, Self::Error>;

    /// Called once before the first frame of a run.
    fn prepare(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

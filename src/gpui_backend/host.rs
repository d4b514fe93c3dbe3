use gpui::{Bounds, Pixels};

use crate::viewport::HostContainer;

/// The chart canvas as seen during prepaint.
pub(crate) struct CanvasHost {
    bounds: Bounds<Pixels>,
    scale_factor: f32,
}

impl CanvasHost {
    pub(crate) fn new(bounds: Bounds<Pixels>, scale_factor: f32) -> Self {
        Self {
            bounds,
            scale_factor,
        }
    }
}

impl HostContainer for CanvasHost {
    fn client_size(&self) -> Option<(f32, f32)> {
        let width = f32::from(self.bounds.size.width);
        let height = f32::from(self.bounds.size.height);
        Some((width, height))
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.scale_factor
    }
}

//! Host viewport tracking and backing-surface sizing.
//!
//! The coordinator turns the host container's pixel box and the display's
//! device pixel ratio into a logical [`Viewport`] plus a [`BackingSurface`]
//! resolution. Callers draw in logical units; the surface scale maps them to
//! physical pixels.

use std::time::{Duration, Instant};

/// Delay before the post-mount re-measurement that absorbs first-paint layout
/// churn.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Logical chart size and the display's pixel density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    pixel_scale: f32,
}

impl Viewport {
    /// Create a viewport; `None` unless every component is finite and positive.
    pub fn new(width: f32, height: f32, pixel_scale: f32) -> Option<Self> {
        let valid = |value: f32| value.is_finite() && value > 0.0;
        if valid(width) && valid(height) && valid(pixel_scale) {
            Some(Self {
                width,
                height,
                pixel_scale,
            })
        } else {
            None
        }
    }

    /// Logical width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Logical height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Physical pixels per logical pixel.
    pub fn pixel_scale(&self) -> f32 {
        self.pixel_scale
    }
}

/// The element a chart is mounted in.
pub trait HostContainer {
    /// Current logical size, or `None` while the container is not attached.
    fn client_size(&self) -> Option<(f32, f32)>;

    /// Physical pixels per logical pixel reported by the display.
    fn device_pixel_ratio(&self) -> f32;
}

/// Read the container's current box.
///
/// Returns `None` when the container is detached or has no area. Unusable
/// pixel ratios fall back to 1.
pub fn measure(container: &impl HostContainer) -> Option<Viewport> {
    let (width, height) = container.client_size()?;
    let ratio = container.device_pixel_ratio();
    let ratio = if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    };
    Viewport::new(width, height, ratio)
}

/// Raster buffer sized for a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BackingSurface {
    /// Displayed width in logical units.
    pub logical_width: f32,
    /// Displayed height in logical units.
    pub logical_height: f32,
    /// Buffer width in physical pixels.
    pub physical_width: u32,
    /// Buffer height in physical pixels.
    pub physical_height: u32,
    /// Uniform scale applied to every drawing command.
    pub scale: f32,
}

impl BackingSurface {
    /// Resize the buffer for a viewport.
    ///
    /// Physical dimensions truncate like a canvas size assignment does.
    pub fn resize(&mut self, viewport: &Viewport) {
        self.logical_width = viewport.width();
        self.logical_height = viewport.height();
        self.physical_width = (viewport.width() * viewport.pixel_scale()) as u32;
        self.physical_height = (viewport.height() * viewport.pixel_scale()) as u32;
        self.scale = viewport.pixel_scale();
    }

    /// Check whether the buffer has been sized.
    pub fn is_allocated(&self) -> bool {
        self.physical_width > 0 && self.physical_height > 0
    }
}

/// What a measurement changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeChange {
    /// A new non-zero viewport replaced the stored one.
    Resized(Viewport),
    /// The container lost its area; rendering must pause until it regains
    /// one.
    Suspended,
}

impl SizeChange {
    /// The new viewport, if the change produced one.
    pub fn viewport(self) -> Option<Viewport> {
        match self {
            Self::Resized(viewport) => Some(viewport),
            Self::Suspended => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Detached,
    Mounted {
        since: Instant,
        settle_pending: bool,
    },
}

/// Tracks the host container and keeps the backing surface in step with it.
#[derive(Debug, Clone)]
pub struct SizingCoordinator {
    phase: Phase,
    settle_delay: Duration,
    viewport: Option<Viewport>,
    surface: BackingSurface,
}

impl Default for SizingCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_DELAY)
    }
}

impl SizingCoordinator {
    /// Create a detached coordinator.
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            phase: Phase::Detached,
            settle_delay,
            viewport: None,
            surface: BackingSurface::default(),
        }
    }

    /// Delay before the post-mount re-measurement.
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Last observed non-zero viewport.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// The backing surface.
    pub fn surface(&self) -> &BackingSurface {
        &self.surface
    }

    /// Scale transform applied to drawing, 1 before the first measurement.
    pub fn scale_factor(&self) -> f32 {
        self.viewport.map_or(1.0, |viewport| viewport.pixel_scale())
    }

    /// Whether resize notifications are currently accepted.
    pub fn is_mounted(&self) -> bool {
        matches!(self.phase, Phase::Mounted { .. })
    }

    /// Whether the post-mount re-measurement is still outstanding.
    pub fn settle_pending(&self) -> bool {
        matches!(
            self.phase,
            Phase::Mounted {
                settle_pending: true,
                ..
            }
        )
    }

    /// Attach to a host, measure once and arm the settle timer.
    ///
    /// Reports a change when the measurement differs from the stored
    /// viewport.
    pub fn mount(&mut self, host: &impl HostContainer, now: Instant) -> Option<SizeChange> {
        self.phase = Phase::Mounted {
            since: now,
            settle_pending: true,
        };
        tracing::debug!("viewport coordinator mounted");
        self.observe(host)
    }

    /// Run the delayed re-measurement once the settle delay has elapsed.
    pub fn poll_settle(&mut self, host: &impl HostContainer, now: Instant) -> Option<SizeChange> {
        let Phase::Mounted {
            since,
            settle_pending: true,
        } = self.phase
        else {
            return None;
        };
        if now.saturating_duration_since(since) < self.settle_delay {
            return None;
        }
        self.phase = Phase::Mounted {
            since,
            settle_pending: false,
        };
        self.observe(host)
    }

    /// Handle a host-resize notification.
    pub fn on_resize(&mut self, host: &impl HostContainer) -> Option<SizeChange> {
        if !self.is_mounted() {
            tracing::trace!("resize ignored while detached");
            return None;
        }
        self.observe(host)
    }

    /// Detach from the host and release the surface.
    ///
    /// Later notifications are ignored, and the next mount measures from
    /// scratch.
    pub fn unmount(&mut self) {
        self.phase = Phase::Detached;
        self.viewport = None;
        self.surface = BackingSurface::default();
        tracing::debug!("viewport coordinator unmounted");
    }

    fn observe(&mut self, host: &impl HostContainer) -> Option<SizeChange> {
        let Some(next) = measure(host) else {
            self.viewport.take()?;
            self.surface = BackingSurface::default();
            tracing::debug!("viewport lost its area, rendering suspended");
            return Some(SizeChange::Suspended);
        };
        if self.viewport == Some(next) {
            return None;
        }
        self.surface.resize(&next);
        self.viewport = Some(next);
        tracing::debug!(
            width = next.width(),
            height = next.height(),
            scale = next.pixel_scale(),
            physical_width = self.surface.physical_width,
            physical_height = self.surface.physical_height,
            "viewport resized"
        );
        Some(SizeChange::Resized(next))
    }
}

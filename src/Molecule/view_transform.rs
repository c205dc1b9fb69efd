use log::debug;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// radians of rotation per pixel of pointer drag
pub const ROTATION_PER_PIXEL: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    Flat2D,
    Perspective3D,
}

impl ViewMode {
    /// allowed zoom range
    pub fn scale_bounds(&self) -> (f64, f64) {
        match self {
            ViewMode::Flat2D => (0.5, 5.0),
            ViewMode::Perspective3D => (0.3, 3.0),
        }
    }
}

/// Current rotation, zoom and pan of a molecule view. Not persisted; rebuilt per screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    mode: ViewMode,
    /// radians about the X axis
    pub rotation_x: f64,
    /// radians about the Y axis
    pub rotation_y: f64,
    scale: f64,
    pub pan: Vector2<f64>,
}

impl ViewTransform {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            rotation_x: 0.0,
            rotation_y: 0.0,
            scale: 1.0,
            pan: Vector2::zeros(),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switches between flat and perspective views; the zoom is clamped to the new range.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.set_scale(self.scale);
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        let (min, max) = self.mode.scale_bounds();
        self.scale = if scale.is_finite() {
            scale.clamp(min, max)
        } else {
            1.0
        };
    }

    /// pinch / scroll
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_scale(self.scale * factor);
    }

    /// Pointer drag in pixels: horizontal movement turns about Y, vertical about X.
    /// Flat views ignore rotation.
    pub fn rotate_by(&mut self, dx: f64, dy: f64) {
        if self.mode == ViewMode::Flat2D {
            debug!("rotation ignored in 2D view");
            return;
        }
        self.rotation_y += dx * ROTATION_PER_PIXEL;
        self.rotation_x += dy * ROTATION_PER_PIXEL;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan += Vector2::new(dx, dy);
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(ViewMode::Perspective3D)
    }
}

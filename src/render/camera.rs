use crate::foundation::core::{Affine, Point, Vec2};

/// World-to-screen transform: the world point shown at the screen's top-left, and a zoom factor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Camera {
    pub origin: Point,
    pub zoom: f64,
}

impl Default for Camera {
    /// Root at `(300, 50)` on screen, unscaled.
    fn default() -> Self {
        Self {
            origin: Point::new(-300.0, -50.0),
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Camera that shows `center` in the middle of a `width` x `height` screen.
    pub fn centered_on(center: Point, width: f64, height: f64, zoom: f64) -> Self {
        let half = Vec2::new(width, height) / (2.0 * zoom);
        Self {
            origin: center - half,
            zoom,
        }
    }

    pub fn transform(&self) -> Affine {
        Affine::scale(self.zoom) * Affine::translate(-self.origin.to_vec2())
    }

    pub fn world_to_screen(&self, p: Point) -> Point {
        self.transform() * p
    }

    pub fn screen_to_world(&self, p: Point) -> Point {
        self.transform().inverse() * p
    }

    /// Multiply zoom by `factor`, keeping the world point under `screen` fixed.
    pub fn zoom_about(&mut self, screen: Point, factor: f64) {
        if factor <= 0.0 || !factor.is_finite() {
            return;
        }
        let anchor = self.screen_to_world(screen);
        self.zoom *= factor;
        self.origin = anchor - screen.to_vec2() / self.zoom;
    }

    /// Move the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.origin -= delta / self.zoom;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/camera.rs"]
mod tests;

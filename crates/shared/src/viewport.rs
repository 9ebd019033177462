use crate::models::Position;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 5.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Initial zoom on narrow (mobile) screens.
pub const MOBILE_ZOOM: f64 = 0.6;

/// Pan/zoom applied to the canvas when drawing it.
///
/// Rendering is `scale(zoom) translate(pan)` with the origin at the top-left
/// corner, so `pan` is in canvas units and a screen point is
/// `zoom * (p + pan)`. Stored positions stay in canvas space; only pointer
/// input passes through `screen_to_canvas`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub pan: Position,
    initial_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(1.0)
    }
}

impl Viewport {
    pub fn new(initial_zoom: f64) -> Self {
        let zoom = initial_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        Viewport {
            zoom,
            pan: Position { x: 0.0, y: 0.0 },
            initial_zoom: zoom,
        }
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(-ZOOM_STEP);
    }

    /// Shift by a delta in canvas units. On screen it moves `zoom` times as far.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan.x += dx;
        self.pan.y += dy;
    }

    pub fn reset(&mut self) {
        self.zoom = self.initial_zoom;
        self.pan = Position { x: 0.0, y: 0.0 };
    }

    pub fn canvas_to_screen(&self, p: Position) -> Position {
        Position {
            x: (p.x + self.pan.x) * self.zoom,
            y: (p.y + self.pan.y) * self.zoom,
        }
    }

    /// Undo the render transform. `None` if the zoom is degenerate.
    pub fn screen_to_canvas(&self, p: Position) -> Option<Position> {
        if self.zoom <= 0.0 || !self.zoom.is_finite() {
            return None;
        }
        Some(Position {
            x: p.x / self.zoom - self.pan.x,
            y: p.y / self.zoom - self.pan.y,
        })
    }
}

/// Pixels of touchpad scrolling treated as one wheel notch.
pub const PIXELS_PER_LINE: f32 = 10.0;

/// A scroll amount as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollDelta {
    /// Mouse wheel notches.
    Lines { x: f32, y: f32 },
    /// Touchpad or precision scrolling, in physical pixels.
    Pixels { x: f64, y: f64 },
}

impl ScrollDelta {
    /// Vertical component expressed in wheel notches.
    pub fn vertical_lines(self) -> f32 {
        match self {
            ScrollDelta::Lines { y, .. } => y,
            ScrollDelta::Pixels { y, .. } => y as f32 / PIXELS_PER_LINE,
        }
    }
}

/// A high-level action produced from window input.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Change the camera distance by this amount (positive moves away).
    Zoom(f32),
    /// The drawable area changed size, in physical pixels.
    Resize { width: u32, height: u32 },
    /// Close the window and leave the event loop.
    Quit,
    /// Input with no binding.
    Noop,
}

impl Action {
    /// Map a scroll event to a zoom. A scroll with no vertical part is a no-op.
    pub fn from_scroll(delta: ScrollDelta) -> Self {
        let lines = delta.vertical_lines();
        if lines == 0.0 {
            Action::Noop
        } else {
            Action::Zoom(lines)
        }
    }
}

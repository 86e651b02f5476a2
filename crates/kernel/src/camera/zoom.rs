use serde::{Deserialize, Serialize};

/// Vertical field of view driven by the scroll wheel, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zoom {
    pub fov: f32,
}

impl Zoom {
    pub const MIN_FOV: f32 = 1.0;
    pub const MAX_FOV: f32 = 45.0;

    /// Scrolling away from the user narrows the view.
    pub fn apply_scroll(&mut self, scroll: f32) {
        self.fov = (self.fov - scroll).clamp(Self::MIN_FOV, Self::MAX_FOV);
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self { fov: Self::MAX_FOV }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_narrows_and_clamps() {
        let mut zoom = Zoom::default();
        zoom.apply_scroll(5.0);
        assert_eq!(zoom.fov, 40.0);
        zoom.apply_scroll(100.0);
        assert_eq!(zoom.fov, 1.0);
        zoom.apply_scroll(-100.0);
        assert_eq!(zoom.fov, 45.0);
    }
}

//! Zoom and focus state for the player surface.
//!
//! A presentation concern, not a playback one: the "map view" zooms
//! into the minimap corner of a VOD so rotations can be read without
//! pausing. The transform is consumed by whatever renders the player.

/// Scale applied when the map view is active.
const MAP_VIEW_SCALE: f64 = 2.7;
/// Focus point of the map view (top-left corner, where minimaps live).
const MAP_VIEW_FOCUS: (f64, f64) = (0.02, 0.05);
const CENTER: (f64, f64) = (0.5, 0.5);

/// Current zoom/focus of the player surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Transform origin as fractions of width and height.
    pub focus: (f64, f64),
    pub scale: f64,
    map_view: bool,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            focus: CENTER,
            scale: 1.0,
            map_view: false,
        }
    }
}

impl ViewTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zoom into the minimap corner.
    pub fn map_view(&mut self) {
        self.scale = MAP_VIEW_SCALE;
        self.focus = MAP_VIEW_FOCUS;
        self.map_view = true;
    }

    /// Back to an unscaled, centered view. Exact, not approximate.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Flip between map view and the normal view.
    pub fn toggle_map_view(&mut self) {
        if self.map_view {
            self.reset();
        } else {
            self.map_view();
        }
    }

    pub fn is_map_view(&self) -> bool {
        self.map_view
    }
}

use serde::{Deserialize, Serialize};

/// Widths strictly below this use the compact navigation.
pub const COMPACT_LAYOUT_MAX_WIDTH: f64 = 768.0;
/// Scroll offsets strictly above this show the scroll-to-top button.
pub const SCROLL_TOP_THRESHOLD: f64 = 200.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportMetrics {
    pub width: f64,
    pub scroll_y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationLayout {
    Compact,
    #[default]
    Expanded,
}

impl NavigationLayout {
    #[must_use]
    pub fn for_width(width: f64) -> Self {
        if width < COMPACT_LAYOUT_MAX_WIDTH {
            Self::Compact
        } else {
            Self::Expanded
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewportState {
    pub metrics: ViewportMetrics,
    pub navigation: NavigationLayout,
    pub show_scroll_to_top: bool,
}

impl ViewportState {
    #[must_use]
    pub fn new(metrics: ViewportMetrics) -> Self {
        let mut state = Self::default();
        state.resize(metrics.width);
        state.scroll(metrics.scroll_y);
        state
    }

    /// Returns true when the navigation layout flipped.
    pub fn resize(&mut self, width: f64) -> bool {
        self.metrics.width = sanitize(width);
        let navigation = NavigationLayout::for_width(self.metrics.width);
        let changed = navigation != self.navigation;
        self.navigation = navigation;
        changed
    }

    /// Returns true when the scroll-to-top flag flipped.
    pub fn scroll(&mut self, scroll_y: f64) -> bool {
        self.metrics.scroll_y = sanitize(scroll_y);
        let show = self.metrics.scroll_y > SCROLL_TOP_THRESHOLD;
        let changed = show != self.show_scroll_to_top;
        self.show_scroll_to_top = show;
        changed
    }

    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.navigation == NavigationLayout::Compact
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

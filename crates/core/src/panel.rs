//! Advanced search panel visibility.

pub const SHOW_LABEL: &str = "Advanced Search";
pub const HIDE_LABEL: &str = "Hide Advanced Search";

/// Starts hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvancedPanel {
    visible: bool,
}

impl AdvancedPanel {
    pub fn is_visible(self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn toggle_label(self) -> &'static str {
        if self.visible {
            HIDE_LABEL
        } else {
            SHOW_LABEL
        }
    }
}

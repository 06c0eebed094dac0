use bevy::prelude::*;

/// A checkpoint notice with its remaining display time.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckpointPanel {
    pub heading: String,
    remaining: f32,
}

impl CheckpointPanel {
    /// Seconds until the panel dismisses itself.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Which overlays are up. At most one checkpoint panel exists at a time.
#[derive(Resource, Debug, Default)]
pub struct Overlays {
    checkpoint: Option<CheckpointPanel>,
    end_heading: Option<String>,
}

impl Overlays {
    /// Shows `heading`, replacing any panel already up.
    pub fn show_checkpoint(&mut self, heading: impl Into<String>, timeout: f32) {
        self.checkpoint = Some(CheckpointPanel {
            heading: heading.into(),
            remaining: timeout,
        });
    }

    pub fn dismiss_checkpoint(&mut self) {
        self.checkpoint = None;
    }

    /// Goal reached: the checkpoint panel gives way to the end panel.
    pub fn complete(&mut self, heading: impl Into<String>) {
        self.checkpoint = None;
        self.end_heading = Some(heading.into());
    }

    /// Counts the checkpoint panel down, dismissing it at zero.
    pub fn tick(&mut self, dt: f32) {
        if let Some(panel) = &mut self.checkpoint {
            panel.remaining -= dt;
            if panel.remaining <= 0.0 {
                self.checkpoint = None;
            }
        }
    }

    pub fn checkpoint(&self) -> Option<&CheckpointPanel> {
        self.checkpoint.as_ref()
    }

    pub fn end_heading(&self) -> Option<&str> {
        self.end_heading.as_deref()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Drone paint panel visibility.
#[derive(Resource, Debug, Default)]
pub struct Customization {
    pub visible: bool,
    /// Free colour picker shown under the palette.
    pub custom_open: bool,
}

impl Customization {
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if !self.visible {
            self.custom_open = false;
        }
    }

    /// Label for the show/hide button.
    pub fn button_label(&self) -> &'static str {
        if self.visible {
            "Hide customization"
        } else {
            "Show customization"
        }
    }
}

/// 8-bit sRGB triple for egui colour widgets.
pub fn to_srgb_u8(color: Color) -> [u8; 3] {
    let [r, g, b, _] = color.to_srgba().to_u8_array();
    [r, g, b]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_checkpoint_replaces_older() {
        let mut o = Overlays::default();
        o.show_checkpoint("one", 20.0);
        o.tick(5.0);
        o.show_checkpoint("two", 20.0);
        let panel = o.checkpoint().unwrap();
        assert_eq!(panel.heading, "two");
        assert_eq!(panel.remaining(), 20.0);
    }

    #[test]
    fn panel_expires_after_timeout() {
        let mut o = Overlays::default();
        o.show_checkpoint("one", 20.0);
        for _ in 0..19 {
            o.tick(1.0);
        }
        assert!(o.checkpoint().is_some());
        o.tick(1.0);
        assert!(o.checkpoint().is_none());
    }

    #[test]
    fn completing_clears_checkpoint_panel() {
        let mut o = Overlays::default();
        o.show_checkpoint("one", 20.0);
        o.complete("Package delivered!");
        assert!(o.checkpoint().is_none());
        assert_eq!(o.end_heading(), Some("Package delivered!"));

        o.reset();
        assert_eq!(o.end_heading(), None);
    }

    #[test]
    fn dismiss_is_immediate() {
        let mut o = Overlays::default();
        o.show_checkpoint("one", 20.0);
        o.dismiss_checkpoint();
        assert!(o.checkpoint().is_none());
        // Ticking with nothing up is harmless.
        o.tick(1.0);
    }

    #[test]
    fn hiding_customization_closes_picker() {
        let mut c = Customization::default();
        assert_eq!(c.button_label(), "Show customization");
        c.toggle();
        c.custom_open = true;
        assert_eq!(c.button_label(), "Hide customization");
        c.toggle();
        assert!(!c.visible && !c.custom_open);
    }

    #[test]
    fn srgb_bytes_match_palette_hex() {
        assert_eq!(to_srgb_u8(Color::srgb_u8(0xef, 0xcd, 0x54)), [0xef, 0xcd, 0x54]);
    }
}

use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub accent: Color32,
    pub accent_dim: Color32,
    pub accent_glow: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_dim: Color32,
    pub border: Color32,
    pub terminal_green: Color32,
    pub spacing_8: f32,
    pub spacing_16: f32,
    pub spacing_24: f32,
    pub spacing_32: f32,
    pub message_width_ratio: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg_primary: Color32::from_rgb(0x0A, 0x0A, 0x0B),
            bg_secondary: Color32::from_rgb(0x0F, 0x0F, 0x11),
            bg_tertiary: Color32::from_rgb(0x14, 0x14, 0x18),
            accent: Color32::from_rgb(0x63, 0x66, 0xF1),
            accent_dim: Color32::from_rgb(0x4F, 0x46, 0xE5),
            accent_glow: Color32::from_rgba_unmultiplied(0x63, 0x66, 0xF1, 38),
            text_primary: Color32::from_rgb(0xE4, 0xE4, 0xE7),
            text_secondary: Color32::from_rgb(0x71, 0x71, 0x7A),
            text_dim: Color32::from_rgb(0x3F, 0x3F, 0x46),
            border: Color32::from_rgb(0x1F, 0x1F, 0x23),
            terminal_green: Color32::from_rgb(0x22, 0xC5, 0x5E),
            spacing_8: 8.0,
            spacing_16: Self::P16,
            spacing_24: Self::P24,
            spacing_32: 32.0,
            message_width_ratio: 0.85,
        }
    }
}

impl Theme {
    pub const P16: f32 = 16.0;
    pub const P24: f32 = 24.0;

    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_primary;
        visuals.extreme_bg_color = self.bg_secondary;
        visuals.override_text_color = Some(self.text_secondary);
        visuals.widgets.noninteractive.bg_fill = self.bg_primary;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.inactive.bg_fill = Color32::TRANSPARENT;
        visuals.widgets.inactive.weak_bg_fill = Color32::TRANSPARENT;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.inactive.fg_stroke.color = self.text_secondary;
        visuals.widgets.hovered.bg_fill = self.accent_glow;
        visuals.widgets.hovered.weak_bg_fill = self.accent_glow;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent_dim);
        visuals.widgets.hovered.fg_stroke.color = self.text_primary;
        visuals.widgets.active.bg_fill = self.accent_glow;
        visuals.widgets.active.weak_bg_fill = self.accent_glow;
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, self.accent);
        visuals.widgets.active.fg_stroke.color = self.text_primary;
        visuals.selection.bg_fill = self.accent_dim;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);
        visuals.text_cursor.stroke = Stroke::new(2.0, self.accent_dim);

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        style.spacing.button_padding = egui::vec2(16.0, 10.0);
        style.text_styles.insert(TextStyle::Heading, FontId::monospace(12.0));
        style.text_styles.insert(TextStyle::Body, FontId::monospace(14.0));
        style.text_styles.insert(TextStyle::Button, FontId::monospace(12.0));
        style.text_styles.insert(TextStyle::Monospace, FontId::monospace(14.0));
        style.text_styles.insert(TextStyle::Small, FontId::monospace(10.0));
        ctx.set_style(style);
    }

    pub fn header_frame(&self) -> Frame {
        Frame::new()
            .fill(self.bg_primary)
            .inner_margin(Margin::symmetric(self.spacing_32 as i8, self.spacing_24 as i8))
            .stroke(Stroke::new(1.0, self.border))
    }

    pub fn composer_frame(&self) -> Frame {
        Frame::new()
            .fill(self.bg_secondary)
            .inner_margin(Margin::same(4))
            .corner_radius(CornerRadius::ZERO)
            .stroke(Stroke::new(1.0, self.border))
    }

    pub fn user_message_frame(&self) -> Frame {
        Frame::new()
            .fill(self.bg_tertiary)
            .inner_margin(Margin::symmetric(20, self.spacing_16 as i8))
            .stroke(Stroke::new(1.0, self.border))
    }
}

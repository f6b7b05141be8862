use crate::metrics::DEFAULT_HISTORY_CAPACITY;

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Settings {
    pub scale: f32,
    pub font_size: f32,
    /// How often the rolling plots take a sample, in samples per second.
    pub plot_fps: f32,
    pub plot_paused: bool,
    /// Multiplier on the plots' Y range.
    pub plot_y_scale: f32,
    /// How many samples each rolling plot keeps.
    pub history_length: usize,
    #[serde(skip)]
    show_window: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: 1.2,
            font_size: 15.0,
            plot_fps: 60.0,
            plot_paused: false,
            plot_y_scale: 1.0,
            history_length: DEFAULT_HISTORY_CAPACITY,
            show_window: false,
        }
    }
}

impl Settings {
    pub fn show(&mut self) {
        self.show_window = true;
    }

    pub fn is_visible(&self) -> bool {
        self.show_window
    }

    pub fn hide(&mut self) {
        self.show_window = false;
    }

    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_pixels_per_point(self.scale);

        let mut style = (*ctx.style()).clone();
        style.text_styles = [
            (
                egui::TextStyle::Heading,
                egui::FontId::new(self.font_size + 4.0, egui::FontFamily::Proportional),
            ),
            (
                egui::TextStyle::Body,
                egui::FontId::new(self.font_size, egui::FontFamily::Proportional),
            ),
            (
                egui::TextStyle::Monospace,
                egui::FontId::new(self.font_size, egui::FontFamily::Monospace),
            ),
            (
                egui::TextStyle::Button,
                egui::FontId::new(self.font_size, egui::FontFamily::Proportional),
            ),
            (
                egui::TextStyle::Small,
                egui::FontId::new(self.font_size - 2.0, egui::FontFamily::Proportional),
            ),
        ]
        .into();
        ctx.set_style(style);
    }
}

pub fn show_settings_window(ctx: &egui::Context, settings: &mut Settings) {
    if !settings.is_visible() {
        return;
    }

    egui::Window::new("⚙ Settings")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("UI Scale:");
                ui.add(egui::Slider::new(&mut settings.scale, 0.5..=2.0).step_by(0.1));
            });

            ui.horizontal(|ui| {
                ui.label("Font Size:");
                ui.add(egui::Slider::new(&mut settings.font_size, 8.0..=32.0).step_by(1.0));
            });

            ui.horizontal(|ui| {
                ui.label("History Length:");
                ui.add(egui::Slider::new(&mut settings.history_length, 10..=360).step_by(10.0));
            });

            ui.separator();

            if ui.button("Close").clicked() {
                settings.hide();
            }
        });
}

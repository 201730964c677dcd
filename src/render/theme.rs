use egui::{Color32, Visuals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        }
    }

    pub fn panel_bg(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(20, 20, 20),
            Theme::Light => Color32::WHITE,
        }
    }

    pub fn grid_color(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgba_premultiplied(100, 100, 100, 60),
            Theme::Light => Color32::from_rgba_premultiplied(180, 180, 180, 80),
        }
    }

    /// Colour of free markers and the field magnitude trace
    /// (black on paper, near-white on the dark theme).
    pub fn foreground(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_gray(230),
            Theme::Light => Color32::BLACK,
        }
    }

    /// Bx, By, Bz trace colours.
    pub fn axis_colors(&self) -> [Color32; 3] {
        match self {
            Theme::Dark => [
                Color32::from_rgb(90, 140, 255),
                Color32::from_rgb(255, 90, 90),
                Color32::from_rgb(80, 200, 80),
            ],
            Theme::Light => [Color32::BLUE, Color32::RED, Color32::from_rgb(0, 128, 0)],
        }
    }
}

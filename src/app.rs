use std::sync::Arc;

use eframe::egui;

use crate::config::VERSION;
use crate::control::interaction::ClickOutcome;
use crate::control::session::{Command, Session};
use crate::render::theme::Theme;
use crate::state::region::{OrbitId, MAX_CROSSINGS};
use crate::ui::command_bar::{self, BarAction};
use crate::ui::orbit_panel;

/// The main annotation window.
pub struct BoundmarkApp {
    session: Session,
    theme: Theme,
    /// Text typed into the comment field, cleared on submit and on orbit change.
    comment_draft: String,
    /// Orbit the draft belongs to.
    draft_orbit: OrbitId,
    /// A message to display in the footer until dismissed.
    status: Option<String>,
    /// A screenshot was requested and its image has not arrived yet.
    pending_screenshot: bool,
}

impl BoundmarkApp {
    pub fn new(cc: &eframe::CreationContext<'_>, mut session: Session) -> Self {
        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(15.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::proportional(14.5),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::proportional(20.0),
        );
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        ctx.set_style(style);

        let theme = Theme::default();
        ctx.set_visuals(theme.visuals());

        let draft_orbit = session.current_orbit();
        let status = session.take_notice();
        Self {
            session,
            theme,
            comment_draft: String::new(),
            draft_orbit,
            status,
            pending_screenshot: false,
        }
    }

    fn run(&mut self, command: Command) {
        if let Err(e) = self.session.execute(command) {
            tracing::error!("{e}");
            self.status = Some(e.to_string());
        }
    }

    fn report_click(&mut self, outcome: ClickOutcome) {
        match outcome {
            ClickOutcome::Rejected(boundary) => {
                self.status = Some(format!(
                    "{boundary} already has {MAX_CROSSINGS} crossings; right-click to remove one"
                ));
            }
            ClickOutcome::Added(..) | ClickOutcome::Removed(..) => self.status = None,
            _ => {}
        }
    }

    fn keyboard_commands(&self, ctx: &egui::Context) -> Vec<Command> {
        if ctx.wants_keyboard_input() {
            return Vec::new();
        }
        ctx.input(|i| {
            let bindings = [
                (egui::Key::ArrowLeft, Command::PrevOrbit),
                (egui::Key::ArrowRight, Command::NextOrbit),
                (egui::Key::ArrowUp, Command::NextType),
                (egui::Key::ArrowDown, Command::PrevType),
                (egui::Key::Delete, Command::DeleteLast),
            ];
            bindings
                .into_iter()
                .filter(|(key, _)| i.key_pressed(*key))
                .map(|(_, command)| command)
                .collect()
        })
    }

    /// Crop a screenshot to the figure and hand it to a save dialog.
    fn save_screenshot(&mut self, ctx: &egui::Context, color_image: &egui::ColorImage) {
        let ppp = ctx.pixels_per_point();
        let (rgba, width, height) = crop_rgba(color_image, self.session.figure().frame_rect, ppp);

        let file_name = format!("orbit_{}.png", self.session.current_orbit());
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&file_name)
            .add_filter("PNG Image", &["png"])
            .save_file()
        else {
            return;
        };
        match image::RgbaImage::from_raw(width as u32, height as u32, rgba) {
            Some(img) => match img.save(&path) {
                Ok(()) => tracing::info!("Saved figure to {:?}", path),
                Err(e) => self.status = Some(format!("Failed to save image: {e}")),
            },
            None => self.status = Some("Screenshot had an unexpected size".to_string()),
        }
    }
}

/// RGBA bytes of `rect` (in points) cut out of a full-window screenshot.
fn crop_rgba(
    color_image: &egui::ColorImage,
    rect: Option<egui::Rect>,
    ppp: f32,
) -> (Vec<u8>, usize, usize) {
    let full_w = color_image.width();
    let full_h = color_image.height();
    let Some(rect) = rect else {
        let rgba = color_image
            .pixels
            .iter()
            .flat_map(|c| [c.r(), c.g(), c.b(), c.a()])
            .collect();
        return (rgba, full_w, full_h);
    };

    let x0 = ((rect.left() * ppp) as usize).min(full_w);
    let y0 = ((rect.top() * ppp) as usize).min(full_h);
    let x1 = ((rect.right() * ppp).ceil() as usize).min(full_w);
    let y1 = ((rect.bottom() * ppp).ceil() as usize).min(full_h);
    let cw = x1.saturating_sub(x0);
    let ch = y1.saturating_sub(y0);
    let mut cropped = Vec::with_capacity(cw * ch * 4);
    for row in y0..y1 {
        for col in x0..x1 {
            let c = color_image.pixels[row * full_w + col];
            cropped.extend_from_slice(&[c.r(), c.g(), c.b(), c.a()]);
        }
    }
    (cropped, cw, ch)
}

impl eframe::App for BoundmarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.theme.visuals());

        // ------------------------------------------------------------------
        // 0. Screenshot requested last frame
        // ------------------------------------------------------------------
        if self.pending_screenshot {
            let mut screenshot: Option<Arc<egui::ColorImage>> = None;
            ctx.input(|i| {
                for event in &i.raw.events {
                    if let egui::Event::Screenshot { image, .. } = event {
                        screenshot = Some(image.clone());
                    }
                }
            });
            if let Some(color_image) = screenshot {
                self.pending_screenshot = false;
                self.save_screenshot(ctx, &color_image);
            }
        }

        // ------------------------------------------------------------------
        // 1. Save before the window goes away
        // ------------------------------------------------------------------
        if ctx.input(|i| i.viewport().close_requested()) {
            match self.session.save_if_dirty() {
                Ok(true) => tracing::info!("Saved annotations on exit"),
                Ok(false) => {}
                Err(e) => {
                    tracing::error!("Saving on exit failed: {e}");
                    self.status = Some(format!("Not closing, save failed: {e}"));
                    ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                }
            }
        }

        let mut commands = self.keyboard_commands(ctx);

        // --- Header panel ---
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 8)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.visuals_mut().override_text_color = Some(ui.visuals().strong_text_color());
                    ui.heading("Boundmark");
                    ui.visuals_mut().override_text_color = None;

                    ui.separator();

                    if ui.button("Save Annotations").clicked() {
                        commands.push(Command::Save);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let theme_label = match self.theme {
                            Theme::Dark => "Light Mode",
                            Theme::Light => "Dark Mode",
                        };
                        if ui.button(theme_label).clicked() {
                            self.theme = self.theme.toggle();
                        }

                        ui.separator();
                        ui.small(format!("v{VERSION}"));
                    });
                });
            });

        // --- Footer panel ---
        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 6)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let count = self.session.region().annotated_orbits();
                    let label = if count == 1 {
                        "1 annotated orbit".to_string()
                    } else {
                        format!("{count} annotated orbits")
                    };
                    ui.label(egui::RichText::new(label).weak());

                    if self.session.is_dirty() {
                        ui.separator();
                        ui.label(egui::RichText::new("unsaved changes").italics());
                    }

                    if let Some(msg) = &self.status {
                        ui.separator();
                        ui.colored_label(egui::Color32::from_rgb(255, 80, 80), msg);
                        if ui.small_button("dismiss").clicked() {
                            self.status = None;
                        }
                    }
                });
            });

        // --- Command bar ---
        let mut bar_action = BarAction::None;
        egui::TopBottomPanel::top("commands")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 6)))
            .show(ctx, |ui| {
                bar_action = command_bar::show_command_bar(ui, &self.session, &mut self.comment_draft);
            });

        match bar_action {
            BarAction::None => {}
            BarAction::Run(command) => commands.push(command),
            BarAction::FitView => self.session.figure_mut().view.fit(),
            BarAction::ExportImage => {
                self.pending_screenshot = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            }
        }

        // --- Central panel with the orbit figure ---
        let mut click = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            click = orbit_panel::show_orbit_figure(self.session.figure_mut(), ui, &self.theme);
        });

        if let Some(click) = click {
            let outcome = self.session.click(click);
            self.report_click(outcome);
        }
        for command in commands {
            self.run(command);
        }

        if self.session.current_orbit() != self.draft_orbit {
            self.draft_orbit = self.session.current_orbit();
            self.comment_draft.clear();
        }
        if self.session.figure_mut().take_redraw() {
            ctx.request_repaint();
        }
    }
}

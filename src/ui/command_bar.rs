use eframe::egui;

use crate::control::session::{Command, Session};
use crate::data::datetime;

/// What the command bar asks the app to do this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum BarAction {
    None,
    Run(Command),
    FitView,
    ExportImage,
}

fn bar_btn(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add(egui::Button::new(label).min_size(egui::vec2(0.0, 26.0)))
}

pub fn show_command_bar(ui: &mut egui::Ui, session: &Session, draft: &mut String) -> BarAction {
    let mut action = BarAction::None;
    let navigator = session.navigator();
    let orbit = session.current_orbit();
    let boundary = session.current_type();

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        if bar_btn(ui, "< Orbit").on_hover_text("Previous orbit (Left)").clicked() {
            action = BarAction::Run(Command::PrevOrbit);
        }
        ui.label(
            egui::RichText::new(format!(
                "Orbit {orbit}  ({}/{})",
                navigator.position() + 1,
                navigator.orbits().len()
            ))
            .strong(),
        );
        if bar_btn(ui, "Orbit >").on_hover_text("Next orbit (Right)").clicked() {
            action = BarAction::Run(Command::NextOrbit);
        }

        ui.separator();

        if bar_btn(ui, "< Type").on_hover_text("Previous boundary type (Down)").clicked() {
            action = BarAction::Run(Command::PrevType);
        }
        let type_label = boundary.map_or("none", |b| b.label());
        ui.label(egui::RichText::new(type_label).strong());
        if bar_btn(ui, "Type >").on_hover_text("Next boundary type (Up)").clicked() {
            action = BarAction::Run(Command::NextType);
        }

        let delete = ui.add_enabled(
            boundary.is_some(),
            egui::Button::new("Delete last").min_size(egui::vec2(0.0, 26.0)),
        );
        if delete.on_hover_text("Remove the most recent crossing of this type (Delete)").clicked() {
            action = BarAction::Run(Command::DeleteLast);
        }

        ui.separator();

        let has_data = session.figure().has_data();
        let fit = ui.add_enabled(has_data, egui::Button::new("Fit").min_size(egui::vec2(0.0, 26.0)));
        if fit.on_hover_text("Show the whole orbit").clicked() {
            action = BarAction::FitView;
        }
        if bar_btn(ui, "Export PNG").on_hover_text("Save the figure as an image").clicked() {
            action = BarAction::ExportImage;
        }
    });

    ui.horizontal_wrapped(|ui| {
        if let Some(boundary) = boundary {
            let region = session.region();
            let crossings = region.crossings(orbit, boundary);
            let listed = if crossings.is_empty() {
                "no crossings".to_string()
            } else {
                crossings
                    .iter()
                    .map(|t| datetime::format_timestamp(*t))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            ui.label(egui::RichText::new(listed).monospace());
            if let Some(flag) = region.flag(orbit, boundary) {
                ui.label(egui::RichText::new(format!("[{}]", flag.label())).italics());
            }
            ui.separator();
        }

        ui.label("Comment:");
        let edit = ui.add(
            egui::TextEdit::singleline(draft)
                .hint_text("press Enter to save")
                .desired_width(320.0),
        );
        if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            action = BarAction::Run(Command::SubmitComment(std::mem::take(draft)));
        }
        if let Some(comment) = session.region().comment(orbit) {
            ui.label(egui::RichText::new(comment).weak());
        }
    });

    action
}

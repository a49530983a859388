use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icon;
use planner_timeline::model::{GroupBy, ZoomLevel};

use crate::app::PlannerApp;
use crate::ui::theme;

/// Render the top menu bar and the navigation strip below it.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  Open...", icon::FOLDER_OPEN)).clicked() {
                app.open_snapshot();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Save          Ctrl+S", icon::FLOPPY_DISK)).clicked() {
                app.save_snapshot();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_snapshot_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Import CSV...", icon::FILE_CSV)).clicked() {
                app.import_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Timeline Scale").small().weak());
            for zoom in ZoomLevel::ALL {
                if ui.radio(app.settings.zoom == zoom, zoom.label()).clicked() {
                    app.set_zoom(zoom);
                    ui.close_menu();
                }
            }
            ui.separator();
            ui.label(RichText::new("Rows").small().weak());
            for group_by in [GroupBy::Group, GroupBy::Resource] {
                if ui.radio(app.settings.group_by == group_by, group_by.label()).clicked() {
                    app.set_group_by(group_by);
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui
                .checkbox(&mut app.settings.show_conflicts, "Highlight double-bookings")
                .changed()
            {
                app.mark_settings_dirty();
            }
            if ui
                .checkbox(&mut app.settings.highlight_missing_dates, "Show items without dates")
                .changed()
            {
                app.mark_settings_dirty();
            }
        });

        ui.menu_button(RichText::new("  Store  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Simulated backend").small().weak());
            ui.horizontal(|ui| {
                ui.label("Commit delay (frames)");
                if ui
                    .add(egui::DragValue::new(&mut app.settings.commit_latency_frames).range(0..=600))
                    .changed()
                {
                    app.mark_settings_dirty();
                }
            });
            ui.checkbox(&mut app.store.reject_commits, "Reject every commit");
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("CSV Format...").clicked() {
                app.show_csv_help = true;
                ui.close_menu();
            }
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned plan name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let unsaved = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.store.name(), unsaved))
                    .size(11.0)
                    .weak(),
            );
        });
    });

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        if ui
            .button(icon::CARET_LEFT)
            .on_hover_text("Previous period")
            .clicked()
        {
            app.step_period(false);
        }
        if ui.button(format!("{} Today", icon::CALENDAR)).clicked() {
            app.go_to_today();
        }
        if ui.button(icon::CARET_RIGHT).on_hover_text("Next period").clicked() {
            app.step_period(true);
        }

        ui.separator();
        if ui
            .button(icon::MAGNIFYING_GLASS_MINUS)
            .on_hover_text("Zoom out (Ctrl+Scroll)")
            .clicked()
        {
            app.set_zoom(app.settings.zoom.zoom_out());
        }
        ui.label(RichText::new(app.settings.zoom.label()).color(theme::TEXT_SECONDARY));
        if ui
            .button(icon::MAGNIFYING_GLASS_PLUS)
            .on_hover_text("Zoom in (Ctrl+Scroll)")
            .clicked()
        {
            app.set_zoom(app.settings.zoom.zoom_in());
        }

        ui.separator();
        let mut group_by = app.settings.group_by;
        ui.selectable_value(&mut group_by, GroupBy::Group, format!("{} Groups", icon::STACK));
        ui.selectable_value(&mut group_by, GroupBy::Resource, format!("{} Resources", icon::USERS));
        app.set_group_by(group_by);

        ui.separator();
        ui.label(icon::MAGNIFYING_GLASS);
        ui.add(
            egui::TextEdit::singleline(&mut app.filter.search)
                .hint_text("Filter items…")
                .desired_width(180.0),
        );
        if !app.filter.search.is_empty() && ui.small_button(icon::X).clicked() {
            app.filter.search.clear();
        }
    });
    ui.add_space(2.0);
}

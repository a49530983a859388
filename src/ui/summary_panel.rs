use std::collections::{BTreeMap, BTreeSet, HashMap};

use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icon;
use planner_timeline::engine::ConflictReport;
use planner_timeline::model::{ItemFilter, Schedule, ScheduleItem};
use uuid::Uuid;

use crate::ui::theme;

/// Actions that the summary panel can request.
pub enum PanelAction {
    None,
    /// Select the item and scroll it into view.
    Focus(Uuid),
}

/// Render the left-side panel: group filter, double-bookings and undated items.
pub fn show_summary_panel(
    items: &[ScheduleItem],
    groups: &[String],
    conflicts: &BTreeMap<String, ConflictReport>,
    filter: &mut ItemFilter,
    selected: Option<Uuid>,
    ui: &mut Ui,
) -> PanelAction {
    let mut action = PanelAction::None;
    let names: HashMap<Uuid, &str> = items.iter().map(|i| (i.id, i.name.as_str())).collect();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            section_title(ui, "Groups", groups.len());
            show_group_filter(groups, filter, ui);

            ui.add_space(6.0);
            ui.separator();

            let clashing: Vec<_> = conflicts.iter().filter(|(_, r)| !r.is_clear()).collect();
            let total: usize = clashing.iter().map(|(_, r)| r.count).sum();
            section_title(ui, "Double-bookings", total);
            if clashing.is_empty() {
                ui.label(RichText::new("None").size(11.0).color(theme::TEXT_DIM));
            }
            for (resource, report) in clashing {
                ui.label(
                    RichText::new(format!("{} {}  ({})", icon::WARNING, resource, report.count))
                        .size(12.0)
                        .color(theme::CONFLICT),
                );
                for (a, b) in &report.pairs {
                    let label = format!(
                        "{}  ×  {}",
                        names.get(a).copied().unwrap_or("?"),
                        names.get(b).copied().unwrap_or("?")
                    );
                    if item_row(ui, &label, selected == Some(*a) || selected == Some(*b)) {
                        action = PanelAction::Focus(*a);
                    }
                }
            }

            ui.add_space(6.0);
            ui.separator();

            let undated: Vec<_> = items
                .iter()
                .filter(|i| !matches!(i.schedule(), Schedule::Scheduled(_)))
                .collect();
            section_title(ui, "Without dates", undated.len());
            if undated.is_empty() {
                ui.label(RichText::new("None").size(11.0).color(theme::TEXT_DIM));
            }
            for item in undated {
                let label = format!("{}  ·  {}", item.name, item.group);
                if item_row(ui, &label, selected == Some(item.id)) {
                    action = PanelAction::Focus(item.id);
                }
            }
        });

    action
}

fn section_title(ui: &mut Ui, title: &str, count: usize) {
    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(title)
                .strong()
                .size(14.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(
            RichText::new(format!("({})", count))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(2.0);
}

/// Checkbox per group. Everything checked clears the filter.
fn show_group_filter(groups: &[String], filter: &mut ItemFilter, ui: &mut Ui) {
    let mut shown: BTreeSet<String> = filter
        .groups
        .clone()
        .unwrap_or_else(|| groups.iter().cloned().collect());
    let mut changed = false;

    for group in groups {
        let mut checked = shown.contains(group);
        if ui.checkbox(&mut checked, group.as_str()).changed() {
            changed = true;
            if checked {
                shown.insert(group.clone());
            } else {
                shown.remove(group);
            }
        }
    }

    if changed {
        let all = groups.iter().all(|g| shown.contains(g));
        filter.groups = if all { None } else { Some(shown) };
    }
}

/// A clickable one-line entry. Returns true when clicked.
fn item_row(ui: &mut Ui, label: &str, is_selected: bool) -> bool {
    let frame = egui::Frame::none()
        .fill(if is_selected {
            theme::BG_SELECTED
        } else {
            Color32::TRANSPARENT
        })
        .rounding(egui::Rounding::same(4.0))
        .inner_margin(egui::Margin::symmetric(6.0, 3.0));
    let response = frame
        .show(ui, |ui| {
            ui.add(
                egui::Label::new(
                    RichText::new(label)
                        .size(11.5)
                        .color(if is_selected {
                            Color32::WHITE
                        } else {
                            theme::TEXT_SECONDARY
                        }),
                )
                .truncate(),
            );
        })
        .response
        .interact(egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.clicked()
}

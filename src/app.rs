use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use planner_timeline::config::PlannerSettings;
use planner_timeline::engine::{
    conflicts_by_resource, CommitEvent, ConflictReport, DragController, EndOutcome,
    ViewportTracker,
};
use planner_timeline::io::{self, ItemStore, Snapshot};
use planner_timeline::model::{
    compute_filtered_timeline, GroupBy, ItemFilter, ItemStatus, Padding, ScheduleItem, Timeline,
    ZoomLevel,
};

use crate::ui;

/// Inputs the cached layout was computed from.
#[derive(Debug, Clone, PartialEq)]
struct LayoutKey {
    revision: u64,
    zoom: ZoomLevel,
    group_by: GroupBy,
    padding: Padding,
    filter: ItemFilter,
    today: NaiveDate,
}

/// Where the chart should scroll to on the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollTarget {
    Date(NaiveDate),
    /// Relative horizontal move in pixels.
    By(f32),
}

/// Main application state.
pub struct PlannerApp {
    pub store: ItemStore,
    pub drag: DragController,
    pub tracker: ViewportTracker,
    pub settings: PlannerSettings,
    settings_path: Option<PathBuf>,
    settings_dirty: bool,

    pub file_path: Option<PathBuf>,
    pub selected: Option<Uuid>,
    pub filter: ItemFilter,
    pub scroll_target: Option<ScrollTarget>,

    // Dialog state
    pub show_about: bool,
    pub show_csv_help: bool,

    pub status_message: String,

    layout: Option<(LayoutKey, Arc<Timeline>)>,
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Phosphor icons render inline with text as a fallback font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings_path = match PlannerSettings::default_path() {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "settings will not be persisted");
                None
            }
        };
        let settings = settings_path
            .as_deref()
            .map(PlannerSettings::load_or_default)
            .unwrap_or_default();

        Self::with_settings(settings, settings_path)
    }

    /// App state without touching the egui context; `settings_path` of `None`
    /// keeps settings in memory only.
    fn with_settings(settings: PlannerSettings, settings_path: Option<PathBuf>) -> Self {
        let mut store = ItemStore::new("Sample Plan", Self::sample_items(today()));
        store.latency_frames = settings.commit_latency_frames;

        Self {
            store,
            drag: DragController::new(),
            tracker: ViewportTracker::new(),
            settings,
            settings_path,
            settings_dirty: false,
            file_path: None,
            selected: None,
            filter: ItemFilter::default(),
            scroll_target: Some(ScrollTarget::Date(today())),
            show_about: false,
            show_csv_help: false,
            status_message: "Ready".to_string(),
            layout: None,
        }
    }

    /// A small plan with a double-booked resource and an undated item.
    fn sample_items(today: NaiveDate) -> Vec<ScheduleItem> {
        let day = |n: i64| today + chrono::Duration::days(n);
        vec![
            ScheduleItem::new("Site survey", "P-101 Kitchen", day(-6), day(-3))
                .with_resource("Ana")
                .with_status(ItemStatus::Done)
                .with_progress(100),
            ScheduleItem::new("Measure openings", "P-101 Kitchen", day(-2), day(1))
                .with_resource("Ivo")
                .with_status(ItemStatus::InProgress)
                .with_progress(60),
            ScheduleItem::new("Cut worktops", "P-101 Kitchen", day(2), day(6))
                .with_resource("Workshop"),
            ScheduleItem::new("Install cabinets", "P-101 Kitchen", day(7), day(11))
                .with_resource("Ana"),
            ScheduleItem::new("Order glass", "P-102 Facade", day(0), day(3))
                .with_resource("Ivo")
                .with_status(ItemStatus::Late),
            ScheduleItem::new("Weld frames", "P-102 Facade", day(4), day(12))
                .with_resource("Workshop")
                .with_status(ItemStatus::Blocked),
            ScheduleItem::new("Fit panels", "P-102 Facade", day(10), day(16))
                .with_resource("Ana"),
            ScheduleItem::unscheduled("Final inspection", "P-102 Facade"),
            ScheduleItem::new("Paint", "P-103 Office", day(14), day(18))
                .with_resource("Ivo"),
            ScheduleItem::new("Flooring", "P-103 Office", day(16), day(22)),
        ]
    }

    // --- Layout ---

    /// The timeline for the current items and view settings, recomputed only
    /// when one of them changed.
    pub fn timeline(&mut self) -> Arc<Timeline> {
        let key = LayoutKey {
            revision: self.store.revision(),
            zoom: self.settings.zoom,
            group_by: self.settings.group_by,
            padding: self.settings.padding,
            filter: self.filter.clone(),
            today: today(),
        };
        if let Some((cached, timeline)) = &self.layout {
            if *cached == key {
                return Arc::clone(timeline);
            }
        }
        let timeline = Arc::new(compute_filtered_timeline(
            self.store.items(),
            key.zoom,
            key.group_by,
            key.padding,
            &key.filter,
            key.today,
        ));
        self.layout = Some((key, Arc::clone(&timeline)));
        timeline
    }

    /// All groups present in the current items, in first-seen order.
    pub fn groups(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.store
            .items()
            .iter()
            .filter(|i| seen.insert(i.group.as_str()))
            .map(|i| i.group.clone())
            .collect()
    }

    // --- View settings ---

    /// Ignored while a bar is being dragged: the drag keeps the scale it
    /// started with.
    pub fn set_zoom(&mut self, zoom: ZoomLevel) {
        if zoom == self.settings.zoom {
            return;
        }
        if self.drag.is_dragging() {
            debug!(?zoom, "zoom ignored during drag");
            return;
        }
        // Keep the date under the left edge in place.
        let anchor = self.timeline().x_to_date(self.tracker.viewport().scroll_left + 100.0);
        self.settings.zoom = zoom;
        self.scroll_target = Some(ScrollTarget::Date(anchor));
        self.settings_dirty = true;
    }

    pub fn set_group_by(&mut self, group_by: GroupBy) {
        if group_by != self.settings.group_by {
            self.settings.group_by = group_by;
            self.settings_dirty = true;
        }
    }

    pub fn mark_settings_dirty(&mut self) {
        self.settings_dirty = true;
    }

    fn persist_settings(&mut self) {
        if !std::mem::take(&mut self.settings_dirty) {
            return;
        }
        self.store.latency_frames = self.settings.commit_latency_frames;
        if let Some(path) = &self.settings_path {
            if let Err(e) = self.settings.save(path) {
                warn!(error = %e, "could not save settings");
            }
        }
    }

    // --- Navigation ---

    pub fn go_to_today(&mut self) {
        self.scroll_target = Some(ScrollTarget::Date(today()));
    }

    /// Step one period (day/week/month by zoom) backwards or forwards.
    pub fn step_period(&mut self, forward: bool) {
        let step = self.timeline().period_step();
        self.scroll_target = Some(ScrollTarget::By(if forward { step } else { -step }));
    }

    // --- File operations ---

    pub fn open_snapshot(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Plan", &["json"])
            .pick_file()
        {
            match io::load_snapshot(&path) {
                Ok(snapshot) => {
                    let count = snapshot.items.len();
                    self.replace_items(snapshot.name, snapshot.items);
                    self.file_path = Some(path);
                    self.status_message = format!("Loaded {} items", count);
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_snapshot(&mut self) {
        match self.file_path.clone() {
            Some(path) => self.write_snapshot(&path),
            None => self.save_snapshot_as(),
        }
    }

    pub fn save_snapshot_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Plan", &["json"])
            .set_file_name(format!("{}.json", self.store.name()))
            .save_file()
        {
            self.write_snapshot(&path);
            self.file_path = Some(path);
        }
    }

    fn write_snapshot(&mut self, path: &std::path::Path) {
        let snapshot: Snapshot = self.store.to_snapshot();
        match io::save_snapshot(&snapshot, path) {
            Ok(()) => self.status_message = "Plan saved".to_string(),
            Err(e) => self.status_message = format!("Error saving: {}", e),
        }
    }

    pub fn import_csv(&mut self) {
        if !self.store.items().is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("This will replace the current plan. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match io::import_csv(&path) {
                Ok(report) => {
                    let name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("Imported Plan")
                        .to_string();
                    let count = report.items.len();
                    self.replace_items(name, report.items);
                    self.file_path = None;
                    self.status_message = match (report.skipped, report.undated) {
                        (0, 0) => format!("Imported {} items", count),
                        (skipped, undated) => format!(
                            "Imported {} items ({} rows skipped, {} without dates)",
                            count, skipped, undated
                        ),
                    };
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    fn replace_items(&mut self, name: String, items: Vec<ScheduleItem>) {
        // Replies for the old collection still arrive; they are rolled back
        // against items that no longer exist and change nothing.
        self.drag.cancel_drag();
        self.store.replace(name, items);
        self.selected = None;
        self.filter.groups = None;
        self.scroll_target = Some(ScrollTarget::Date(today()));
    }

    // --- Commits ---

    /// Feed one frame of pointer and keyboard input to the running drag.
    fn drive_drag(&mut self, signal: DragSignal) {
        if !self.drag.is_dragging() {
            return;
        }
        match signal {
            DragSignal::Idle => {}
            DragSignal::Moved(x) => {
                self.drag.update_drag(x);
            }
            DragSignal::Released(x) => {
                if let Some(x) = x {
                    self.drag.update_drag(x);
                }
                self.finish_drag();
            }
            DragSignal::Abandoned(reason) => {
                if self.drag.cancel_drag() {
                    self.status_message = format!("Move cancelled ({})", reason);
                }
            }
        }
    }

    fn finish_drag(&mut self) {
        if let EndOutcome::Submitted(request) = self.drag.end_drag(&mut self.store) {
            let name = self.item_name(request.item_id);
            self.status_message = format!(
                "Saving '{}' ({} → {})…",
                name,
                request.start.format("%Y-%m-%d"),
                request.end.format("%Y-%m-%d")
            );
        }
    }

    fn reconcile_commits(&mut self) {
        for event in self.drag.poll_commits() {
            match event {
                CommitEvent::Committed { item_id, span } => {
                    self.status_message = format!(
                        "Updated '{}' ({} → {})",
                        self.item_name(item_id),
                        span.start.format("%Y-%m-%d"),
                        span.end.format("%Y-%m-%d")
                    );
                }
                CommitEvent::RolledBack(failure) => {
                    debug!(item = %failure.item_id, attempted = ?failure.attempted, "showing rollback");
                    self.status_message = format!(
                        "Could not move '{}': {}",
                        self.item_name(failure.item_id),
                        failure.error
                    );
                }
            }
        }
    }

    fn item_name(&self, id: Uuid) -> String {
        self.store
            .get(id)
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "item".to_string())
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// What this frame's input means for a drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragSignal {
    Idle,
    Moved(f32),
    /// Button let go, with the last known pointer x.
    Released(Option<f32>),
    /// The gesture cannot finish normally. The release may never arrive
    /// once the window loses focus with the button held.
    Abandoned(&'static str),
}

fn read_drag_signal(input: &egui::InputState) -> DragSignal {
    let focus_lost = !input.focused
        || input
            .events
            .iter()
            .any(|e| matches!(e, egui::Event::WindowFocused(false)));
    if focus_lost {
        return DragSignal::Abandoned("window lost focus");
    }
    if input.key_pressed(egui::Key::Escape) {
        return DragSignal::Abandoned("Escape");
    }
    let x = input.pointer.latest_pos().map(|p| p.x);
    if input.pointer.any_released() {
        return DragSignal::Released(x);
    }
    x.map_or(DragSignal::Idle, DragSignal::Moved)
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Frame boundary: deliver due commits, then fold their replies in.
        self.store.tick();
        self.reconcile_commits();

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_snapshot();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        let timeline = self.timeline();
        let view = self.drag.optimistic_view(self.store.items());
        let conflicts = if self.settings.show_conflicts {
            conflicts_by_resource(&view)
        } else {
            Default::default()
        };
        let conflict_total: usize = conflicts.values().map(|r: &ConflictReport| r.count).sum();

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let dim = |text: String| {
                            egui::RichText::new(text)
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM)
                        };
                        ui.label(dim(format!("Items: {}", self.store.items().len())));
                        ui.label(dim(" · ".to_string()));
                        ui.label(dim(format!("Conflicts: {}", conflict_total)));
                        ui.label(dim(" · ".to_string()));
                        ui.label(dim(format!("Saving: {}", self.drag.pending_commits())));
                        ui.label(dim(" · ".to_string()));
                        ui.label(dim(format!("Zoom: {}", self.settings.zoom.label())));
                    });
                });
            });

        let groups = self.groups();
        let mut panel_action = ui::summary_panel::PanelAction::None;
        egui::SidePanel::left("summary_panel")
            .default_width(240.0)
            .min_width(180.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                panel_action = ui::summary_panel::show_summary_panel(
                    &view,
                    &groups,
                    &conflicts,
                    &mut self.filter,
                    self.selected,
                    ui,
                );
            });
        if let ui::summary_panel::PanelAction::Focus(id) = panel_action {
            self.selected = Some(id);
            if let Some(start) = view.iter().find(|i| i.id == id).and_then(|i| i.start) {
                self.scroll_target = Some(ScrollTarget::Date(start));
            }
        }

        let conflicting: HashSet<Uuid> = conflicts
            .values()
            .flat_map(|r| r.pairs.iter().flat_map(|(a, b)| [*a, *b]))
            .collect();

        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let mut interaction = ui::gantt_chart::ChartInteraction::default();
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let chart = ui::gantt_chart::ChartInput {
                timeline: &timeline,
                items: &view,
                conflicts: &conflicts,
                conflicting: &conflicting,
                settings: &self.settings,
                today: today(),
                scroll_target: self.scroll_target.take(),
            };
            interaction = ui::gantt_chart::show_gantt_chart(
                chart,
                &mut self.drag,
                &mut self.tracker,
                &mut self.selected,
                ui,
            );
        });

        if let Some(message) = interaction.message {
            self.status_message = message;
        }
        if let Some(zoom) = interaction.zoom {
            self.set_zoom(zoom);
        }
        // After the chart, so a drag that began this frame sees its release too.
        let signal = ctx.input(read_drag_signal);
        self.drive_drag(signal);

        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_csv_help {
            ui::dialogs::show_csv_help_dialog(self, ctx);
        }

        self.persist_settings();

        // Keep frames coming while a commit is out so its reply is picked up.
        if self.drag.pending_commits() > 0 || self.store.queued() > 0 {
            ctx.request_repaint();
        }
    }
}

//! Native host for the landing backdrop, built with eframe/egui.
//!
//! [`Viewer`] owns one mounted [`Scene`] plus the dashboard view state. Each
//! egui frame it feeds elapsed time and pointer input to the scene, paints
//! the presented sprites behind a scrollable page, and reports how much of
//! the stats block is on screen.

use backdrop_core::{
    config::Config,
    dashboard::{ActionStatus, AlertFilter, AlertKind, DashboardState, Severity, Tab},
    palette::Rgb,
    pointer::{HERO_ORB_COUNTER_PARALLAX, HERO_ORB_PARALLAX, PointerTracker},
    presenter::{Sprite, SpriteKind},
    scene::Scene,
    types::Viewport,
    visibility::visible_ratio,
};
use eframe::App;
use glam::Vec2;
use rand::{Rng, SeedableRng, rng, rngs::StdRng};
use std::time::Duration;

/// Seconds the mock autopilot execution stays in the executing state.
const EXECUTE_DELAY_SECS: f64 = 3.0;

/// Main application state for the backdrop viewer.
///
/// ### Fields
/// - `scene` - Mounted animation state; replaced wholesale on reset.
/// - `cfg` - Configuration every new scene is mounted with.
/// - `seed` - Seed of the current scene's RNG, shown in the status bar.
/// - `dashboard` - Tab, alert and autopilot state of the side panel.
/// - `running` - Whether elapsed time is fed to the scene.
/// - `last_time` - egui time of the previous frame, if any.
/// - `execute_until` - When the pending autopilot execution completes.
pub struct Viewer {
    scene: Scene<StdRng>,
    cfg: Config,
    seed: u64,
    dashboard: DashboardState,
    running: bool,
    last_time: Option<f64>,
    execute_until: Option<f64>,
}

impl Viewer {
    /// Creates a viewer with a randomly seeded scene.
    pub fn new(cfg: Config) -> Self {
        let seed = rng().random();
        Self::with_seed(cfg, seed)
    }

    /// Creates a viewer whose scene is seeded with `seed`.
    ///
    /// The scene starts at the fallback viewport size and is resized on the
    /// first painted frame.
    pub fn with_seed(cfg: Config, seed: u64) -> Self {
        let scene = Scene::mount(cfg.clone(), Viewport::default(), StdRng::seed_from_u64(seed));
        Self {
            scene,
            cfg,
            seed,
            dashboard: DashboardState::sample(),
            running: true,
            last_time: None,
            execute_until: None,
        }
    }

    /// Drops the current scene and mounts a fresh one with the next seed.
    fn reset(&mut self) {
        let viewport = self.scene.store().viewport();
        self.seed = self.seed.wrapping_add(1);
        self.scene = Scene::mount(self.cfg.clone(), viewport, StdRng::seed_from_u64(self.seed));
        self.last_time = None;
    }

    /// Feeds the time elapsed since the previous frame to the scene.
    ///
    /// The first call only records `now`. While paused the clock is still
    /// recorded so resuming does not replay the pause.
    ///
    /// ### Parameters
    /// - `now` - Current egui time in seconds.
    fn advance_to(&mut self, now: f64) {
        let dt = match self.last_time {
            Some(prev) if self.running => (now - prev).max(0.0),
            _ => 0.0,
        };
        self.last_time = Some(now);

        if dt > 0.0 {
            self.scene.advance(Duration::from_secs_f64(dt));
        }

        if let Some(deadline) = self.execute_until
            && now >= deadline
        {
            self.dashboard.autopilot.finish_execution();
            self.execute_until = None;
        }
    }

    fn execute_all(&mut self, now: f64) {
        if self.dashboard.autopilot.execute_all() > 0 {
            tracing::info!("autopilot executing pending actions");
            self.execute_until = Some(now + EXECUTE_DELAY_SECS);
        }
    }

    /// Builds the top panel (run controls and the typed heading).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.heading(self.scene.heading());
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let store = self.scene.store();
                ui.label(format!("seed = {}", self.seed));
                ui.label(format!("timers = {}", self.scene.active_timers()));
                ui.separator();
                ui.label(format!("ticks = {}", store.tick_count()));
                ui.label(format!("entities = {}", store.population()));
            });
        });
    }

    /// Builds the right-hand dashboard panel.
    fn ui_dashboard_panel(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        egui::SidePanel::right("dashboard_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for tab in Tab::ALL {
                        if ui
                            .selectable_label(self.dashboard.tab == tab, tab.label())
                            .clicked()
                        {
                            self.dashboard.select_tab(tab);
                        }
                    }
                });
                ui.separator();

                match self.dashboard.tab {
                    Tab::Alerts => self.ui_alerts(ui),
                    Tab::Autopilot => self.ui_autopilot(ui, now),
                    tab => {
                        ui.heading(tab.label());
                        ui.label("Sample data only.");
                    }
                }
            });
    }

    fn ui_alerts(&mut self, ui: &mut egui::Ui) {
        let board = &mut self.dashboard.alerts;
        ui.label(format!("{} unacknowledged", board.unacknowledged_count()));

        ui.horizontal_wrapped(|ui| {
            if ui
                .selectable_label(board.filter() == AlertFilter::All, "All")
                .clicked()
            {
                board.set_filter(AlertFilter::All);
            }
            for kind in [
                AlertKind::Security,
                AlertKind::Risk,
                AlertKind::Opportunity,
                AlertKind::System,
            ] {
                let filter = AlertFilter::Kind(kind);
                if ui
                    .selectable_label(board.filter() == filter, kind_label(kind))
                    .clicked()
                {
                    board.set_filter(filter);
                }
            }
        });
        ui.separator();

        let mut acknowledge = None;
        for alert in board.visible() {
            ui.group(|ui| {
                ui.colored_label(severity_color(alert.severity), &alert.title);
                ui.horizontal(|ui| {
                    ui.label(format!("{} min ago", alert.age_minutes));
                    if alert.acknowledged {
                        ui.label("✔");
                    } else if ui.small_button("Acknowledge").clicked() {
                        acknowledge = Some(alert.id.clone());
                    }
                });
            });
        }
        if let Some(id) = acknowledge {
            board.acknowledge(&id);
        }
    }

    fn ui_autopilot(&mut self, ui: &mut egui::Ui, now: f64) {
        let panel = &mut self.dashboard.autopilot;
        ui.horizontal(|ui| {
            ui.label(if panel.enabled { "Autopilot on" } else { "Autopilot off" });
            if ui.button(if panel.enabled { "Disable" } else { "Enable" }).clicked() {
                panel.toggle();
            }
        });
        ui.separator();

        let selected = panel.selected().map(|s| s.id);
        let mut choose = None;
        for strategy in panel.strategies() {
            let text = format!("{} ({:.1}% APY)", strategy.name, strategy.expected_return);
            if ui
                .selectable_label(selected == Some(strategy.id), text)
                .clicked()
            {
                choose = Some(strategy.id);
            }
        }
        if let Some(id) = choose {
            panel.select(id);
        }
        ui.separator();

        for action in panel.actions() {
            let status = match action.status {
                ActionStatus::Pending => "pending",
                ActionStatus::Executing => "executing",
                ActionStatus::Completed => "completed",
                ActionStatus::Failed => "failed",
            };
            ui.label(format!(
                "{} {} → {} ({}), {status}",
                action.amount, action.from, action.to, action.reason
            ));
        }

        if ui.button("Execute All").clicked() {
            self.execute_all(now);
        }
    }

    /// Paints the glow, dots and logos of the current frame into `rect`.
    fn paint_backdrop(&self, painter: &egui::Painter, rect: egui::Rect) {
        let frame = self.scene.frame();

        if let Some(glow) = frame.glow {
            let center = to_screen(rect, glow.center);
            for i in 1..=6 {
                let r = glow.radius * i as f32 / 6.0;
                painter.circle_filled(center, r, color(Rgb(59, 130, 246), 0.012));
            }
        }

        let size = Vec2::new(rect.width(), rect.height());
        for (center, radius, tint) in hero_orbs(size, self.scene.pointer()) {
            painter.circle_filled(to_screen(rect, center), radius, color(tint, 0.08));
        }

        let viewport = self.scene.store().viewport();
        for sprite in frame.sprites.iter().filter(|s| s.is_on_screen(viewport)) {
            match sprite.kind {
                SpriteKind::Dot => {
                    let half = sprite.size * 0.5;
                    let center = to_screen(rect, sprite.pos) + egui::vec2(half, half);
                    painter.circle_filled(center, half, color(sprite.color, sprite.opacity));
                }
                SpriteKind::Logo => paint_logo(painter, rect, sprite),
            }
        }
    }

    /// Builds the central panel: the backdrop with a scrollable page on top.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            let viewport = Viewport::measured_or_fallback(Some(Vec2::new(rect.width(), rect.height())));
            if viewport != self.scene.store().viewport() {
                self.scene.resize(viewport);
            }

            if let Some(p) = ctx.input(|i| i.pointer.hover_pos())
                && rect.contains(p)
            {
                self.scene.pointer_moved(Vec2::new(p.x - rect.min.x, p.y - rect.min.y));
            }

            let painter = ui.painter_at(rect);
            self.paint_backdrop(&painter, rect);

            let output = egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(rect.height());
                let stats = ui.group(|ui| {
                    ui.heading("The Hyperion Edge");
                    for (name, value) in self.scene.stats().values() {
                        ui.label(stat_label(name, value));
                    }
                });
                ui.add_space(rect.height() * 0.5);
                (stats.response.rect, ui.clip_rect())
            });

            let (section, window) = output.inner;
            let ratio = visible_ratio((section.top(), section.bottom()), (window.top(), window.bottom()));
            self.scene.observe_stats_visibility(ratio);
        });
    }
}

impl App for Viewer {
    /// eframe callback: advances the scene, then builds all panels.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.advance_to(now);

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_dashboard_panel(ctx);
        self.ui_central_panel(ctx);

        if self.running || self.execute_until.is_some() {
            ctx.request_repaint();
        }
    }
}

/// Draws a logo glyph rotated about its anchor, with a faint halo behind it.
fn paint_logo(painter: &egui::Painter, rect: egui::Rect, sprite: &Sprite) {
    let Some(symbol) = sprite.glyph else {
        return;
    };
    let pos = to_screen(rect, sprite.pos);
    let angle = sprite.rotation_deg.to_radians();

    if let Some(halo) = sprite.halo {
        let galley = painter.layout_no_wrap(
            symbol.to_string(),
            egui::FontId::proportional(sprite.size * 1.15),
            color(halo, sprite.opacity * 0.5),
        );
        let shape = egui::epaint::TextShape::new(pos, galley, color(halo, sprite.opacity * 0.5));
        painter.add(shape.with_angle(angle));
    }

    let galley = painter.layout_no_wrap(
        symbol.to_string(),
        egui::FontId::proportional(sprite.size),
        color(sprite.color, sprite.opacity),
    );
    let shape = egui::epaint::TextShape::new(pos, galley, color(sprite.color, sprite.opacity));
    painter.add(shape.with_angle(angle));
}

/// The two large hero orbs: centre, radius and tint.
///
/// The first follows the pointer, the second drifts against it.
fn hero_orbs(size: Vec2, pointer: &PointerTracker) -> [(Vec2, f32, Rgb); 2] {
    [
        (
            size * Vec2::new(0.25, 0.3) + pointer.parallax(HERO_ORB_PARALLAX),
            180.0,
            Rgb(59, 130, 246),
        ),
        (
            size * Vec2::new(0.75, 0.7) + pointer.parallax(HERO_ORB_COUNTER_PARALLAX),
            120.0,
            Rgb(139, 92, 246),
        ),
    ]
}

/// Converts a palette colour and opacity to an egui colour.
fn color(rgb: Rgb, opacity: f32) -> egui::Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(rgb.0, rgb.1, rgb.2, alpha)
}

/// Maps a viewport-pixel position into the painted `rect`.
fn to_screen(rect: egui::Rect, p: Vec2) -> egui::Pos2 {
    egui::pos2(rect.min.x + p.x, rect.min.y + p.y)
}

/// Display text for one landing statistic.
fn stat_label(name: &str, value: f64) -> String {
    match name {
        "market" => format!("${value:.1}T market size"),
        "chains" => format!("{value:.0}+ chains supported"),
        "security" => format!("{value:.1}% security score"),
        "speed" => format!("{value:.1}s execution speed"),
        _ => format!("{value} {name}"),
    }
}

fn kind_label(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::Security => "Security",
        AlertKind::Risk => "Risk",
        AlertKind::Opportunity => "Opportunity",
        AlertKind::System => "System",
    }
}

fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Critical => egui::Color32::RED,
        Severity::High => egui::Color32::from_rgb(249, 115, 22),
        Severity::Medium => egui::Color32::YELLOW,
        Severity::Low => egui::Color32::LIGHT_BLUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer() -> Viewer {
        Viewer::with_seed(Config::default(), 3)
    }

    #[test]
    fn color_maps_opacity_to_alpha() {
        let c = color(Rgb(10, 20, 30), 1.0);
        assert_eq!(c, egui::Color32::from_rgba_unmultiplied(10, 20, 30, 255));
        assert_eq!(color(Rgb(10, 20, 30), 0.0).a(), 0);
        assert_eq!(color(Rgb(10, 20, 30), 7.0).a(), 255);
    }

    #[test]
    fn to_screen_offsets_by_rect_origin() {
        let rect = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(800.0, 600.0));
        assert_eq!(to_screen(rect, Vec2::new(5.0, -20.0)), egui::pos2(105.0, 30.0));
    }

    #[test]
    fn hero_orbs_follow_pointer_in_opposite_directions() {
        let size = Vec2::new(1200.0, 800.0);
        let mut pointer = PointerTracker::new();
        let [still, counter_still] = hero_orbs(size, &pointer);
        assert!(still.0.abs_diff_eq(Vec2::new(300.0, 240.0), 1e-3));
        assert!(counter_still.0.abs_diff_eq(Vec2::new(900.0, 560.0), 1e-3));

        pointer.moved(Vec2::new(500.0, 300.0));
        let [orb, counter] = hero_orbs(size, &pointer);
        assert!(orb.0.abs_diff_eq(Vec2::new(310.0, 246.0), 1e-3));
        assert!(counter.0.abs_diff_eq(Vec2::new(895.0, 557.0), 1e-3));
    }

    #[test]
    fn stat_labels_follow_precision() {
        assert_eq!(stat_label("market", 3.2), "$3.2T market size");
        assert_eq!(stat_label("chains", 17.0), "17+ chains supported");
        assert_eq!(stat_label("security", 99.8), "99.8% security score");
    }

    #[test]
    fn first_frame_only_records_time() {
        let mut v = viewer();
        v.advance_to(10.0);
        assert_eq!(v.scene.store().tick_count(), 0);

        v.advance_to(10.5);
        assert_eq!(v.scene.store().tick_count(), 31);
    }

    #[test]
    fn paused_viewer_does_not_replay_the_pause() {
        let mut v = viewer();
        v.advance_to(1.0);
        v.running = false;
        v.advance_to(5.0);
        assert_eq!(v.scene.store().tick_count(), 0);

        v.running = true;
        v.advance_to(5.5);
        assert_eq!(v.scene.store().tick_count(), 31);
    }

    #[test]
    fn execution_clears_after_delay() {
        let mut v = viewer();
        v.advance_to(0.0);
        v.execute_all(0.0);
        assert!(v
            .dashboard
            .autopilot
            .actions()
            .iter()
            .all(|a| a.status == ActionStatus::Executing));

        v.advance_to(2.5);
        assert_eq!(v.dashboard.autopilot.actions().len(), 2);

        v.advance_to(3.0);
        assert!(v.dashboard.autopilot.actions().is_empty());
        assert!(v.execute_until.is_none());
    }

    #[test]
    fn reset_mounts_a_fresh_scene() {
        let mut v = viewer();
        v.advance_to(0.0);
        v.advance_to(0.5);
        v.scene.observe_stats_visibility(1.0);
        assert_eq!(v.scene.active_timers(), 3);

        v.reset();

        assert_eq!(v.seed, 4);
        assert_eq!(v.scene.store().tick_count(), 0);
        assert_eq!(v.scene.active_timers(), 2);
        assert!(!v.scene.stats().is_revealed());
        assert!(v.last_time.is_none());
    }
}

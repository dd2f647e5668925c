//! Everything a mounted landing view owns, wired to one scheduler.
//!
//! A [`Scene`] holds the particle store on the stepper timer, the stats
//! section with its reveal gate and count-up timer, the pointer tracker and
//! the typewriter heading on its own timer. The host calls
//! [`Scene::advance`] with elapsed time and feeds pointer and visibility
//! input. [`Scene::teardown`] (also run on drop) cancels every timer; after
//! it nothing changes any more.

use crate::{
    config::{Config, CounterConfig},
    easing::{CounterTarget, EasingCounter, landing_stats},
    pointer::PointerTracker,
    presenter::{self, Frame},
    scheduler::{Scheduler, TimerId},
    store::ParticleStore,
    typewriter::Typewriter,
    types::Viewport,
    visibility::VisibilityTrigger,
};
use glam::Vec2;
use rand::Rng;
use std::time::Duration;

/// Most stepper ticks replayed by one `advance`; older backlog is dropped.
pub const MAX_CATCH_UP_TICKS: u32 = 240;

/// The count-up statistics block, revealed once.
#[derive(Debug)]
pub struct StatsSection {
    trigger: VisibilityTrigger,
    targets: Vec<CounterTarget>,
    duration: Duration,
    steps: u32,
    counter: Option<EasingCounter>,
    timer: Option<TimerId>,
}

impl StatsSection {
    pub fn new(targets: Vec<CounterTarget>, cfg: &CounterConfig) -> Self {
        Self {
            trigger: VisibilityTrigger::new(cfg.reveal_threshold),
            targets,
            duration: cfg.duration(),
            steps: cfg.steps,
            counter: None,
            timer: None,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.trigger.is_revealed()
    }

    pub fn counter(&self) -> Option<&EasingCounter> {
        self.counter.as_ref()
    }

    /// `(name, displayed)` pairs; all zero until revealed.
    pub fn values(&self) -> Vec<(&str, f64)> {
        match &self.counter {
            Some(c) => c.values().collect(),
            None => self.targets.iter().map(|t| (t.name.as_str(), 0.0)).collect(),
        }
    }
}

pub struct Scene<R: Rng> {
    store: ParticleStore<R>,
    scheduler: Scheduler,
    stepper: TimerId,
    heading_timer: TimerId,
    stats: StatsSection,
    pointer: PointerTracker,
    typewriter: Typewriter,
    mounted: bool,
}

impl<R: Rng> Scene<R> {
    /// Builds the store and starts the stepper timer.
    pub fn mount(cfg: Config, viewport: Viewport, rng: R) -> Self {
        let cfg = cfg.sanitized();
        let store = ParticleStore::new(cfg.clone(), viewport, rng);
        let mut scheduler = Scheduler::new();
        let stepper = scheduler.schedule(cfg.timing.tick_period());
        let typewriter = Typewriter::new(&cfg.typewriter);
        let heading_timer = scheduler.schedule(typewriter.resolution());

        tracing::info!(
            population = store.population(),
            tick_ms = cfg.timing.tick_ms,
            "scene mounted"
        );

        Self {
            store,
            scheduler,
            stepper,
            heading_timer,
            stats: StatsSection::new(landing_stats(), &cfg.counter),
            pointer: PointerTracker::new(),
            typewriter,
            mounted: true,
        }
    }

    /// Feeds elapsed wall-clock time to every timer.
    pub fn advance(&mut self, dt: Duration) {
        if !self.mounted {
            return;
        }

        let fired = self.scheduler.advance(dt);

        let ticks = Scheduler::fired_count(&fired, self.stepper);
        if ticks > MAX_CATCH_UP_TICKS {
            tracing::debug!(ticks, "stepper backlog truncated");
        }
        self.store.tick_n(ticks.min(MAX_CATCH_UP_TICKS));

        if let (Some(id), Some(counter)) = (self.stats.timer, self.stats.counter.as_mut()) {
            for _ in 0..Scheduler::fired_count(&fired, id) {
                if !counter.step() {
                    self.scheduler.cancel(id);
                    self.stats.timer = None;
                    break;
                }
            }
        }

        let beats = Scheduler::fired_count(&fired, self.heading_timer);
        if beats > 0 {
            let step = self.typewriter.resolution().saturating_mul(beats);
            self.typewriter.advance(step);
        }
    }

    /// Reports how much of the stats section is on screen.
    ///
    /// ### Returns
    /// `true` if this call started the count-up. That happens at most once
    /// per scene.
    pub fn observe_stats_visibility(&mut self, visible_ratio: f32) -> bool {
        if !self.mounted || !self.stats.trigger.observe(visible_ratio) {
            return false;
        }
        let counter = EasingCounter::start(self.stats.targets.clone(), self.stats.duration, self.stats.steps);
        self.stats.timer = Some(self.scheduler.schedule(counter.step_period()));
        self.stats.counter = Some(counter);
        tracing::info!(visible_ratio, "stats revealed");
        true
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        if self.mounted {
            self.pointer.moved(pos);
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if self.mounted {
            self.store.resize(viewport);
        }
    }

    /// Cancels every timer. Idempotent.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.scheduler.cancel_all();
        self.stats.timer = None;
        self.mounted = false;
        tracing::info!(ticks = self.store.tick_count(), "scene torn down");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current drawable state, including the pointer glow.
    pub fn frame(&self) -> Frame {
        presenter::present(&self.store, Some(&self.pointer))
    }

    pub fn store(&self) -> &ParticleStore<R> {
        &self.store
    }

    pub fn stats(&self) -> &StatsSection {
        &self.stats
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn heading(&self) -> &str {
        self.typewriter.text()
    }

    pub fn active_timers(&self) -> usize {
        self.scheduler.active_count()
    }
}

impl<R: Rng> Drop for Scene<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    const MS: Duration = Duration::from_millis(1);

    fn scene() -> Scene<StdRng> {
        Scene::mount(
            Config::default(),
            Viewport::new(1200.0, 800.0),
            StdRng::seed_from_u64(21),
        )
    }

    #[test]
    fn stepper_runs_every_16ms() {
        let mut s = scene();
        s.advance(160 * MS);
        assert_eq!(s.store().tick_count(), 10);
        s.advance(15 * MS);
        assert_eq!(s.store().tick_count(), 10);
        s.advance(MS);
        assert_eq!(s.store().tick_count(), 11);
    }

    #[test]
    fn single_stepping_in_small_increments_matches_one_big_step() {
        let mut a = scene();
        let mut b = scene();
        for _ in 0..100 {
            a.advance(16 * MS);
        }
        b.advance(1600 * MS);
        assert_eq!(a.frame(), b.frame());
    }

    #[test]
    fn teardown_freezes_state() {
        let mut s = scene();
        s.advance(100 * MS);
        s.observe_stats_visibility(1.0);
        s.advance(500 * MS);

        s.teardown();
        let frozen = s.frame();
        let ticks = s.store().tick_count();
        let stats: Vec<(String, f64)> = s
            .stats()
            .values()
            .into_iter()
            .map(|(n, v)| (n.to_string(), v))
            .collect();

        s.advance(Duration::from_secs(10));
        s.pointer_moved(Vec2::new(10.0, 10.0));
        s.resize(Viewport::new(100.0, 100.0));

        assert!(!s.is_mounted());
        assert_eq!(s.active_timers(), 0);
        assert_eq!(s.frame(), frozen);
        assert_eq!(s.store().tick_count(), ticks);
        let after: Vec<(String, f64)> = s
            .stats()
            .values()
            .into_iter()
            .map(|(n, v)| (n.to_string(), v))
            .collect();
        assert_eq!(after, stats);
    }

    #[test]
    fn stats_wait_for_visibility_then_count_up_once() {
        let mut s = scene();
        s.advance(Duration::from_secs(3));
        assert!(s.stats().values().iter().all(|(_, v)| *v == 0.0));

        assert!(!s.observe_stats_visibility(0.1));
        assert!(s.observe_stats_visibility(0.25));
        assert_eq!(s.active_timers(), 3);

        s.advance(1000 * MS);
        let chains = s.stats().counter().and_then(|c| c.displayed("chains")).unwrap();
        assert!(chains > 0.0 && chains < 20.0);

        s.advance(1000 * MS);
        assert_eq!(
            s.stats().values(),
            vec![("market", 3.2), ("chains", 20.0), ("security", 99.8), ("speed", 0.8)]
        );
        assert_eq!(s.active_timers(), 2);

        // Scrolling away and back does not restart the count-up.
        assert!(!s.observe_stats_visibility(0.0));
        assert!(!s.observe_stats_visibility(1.0));
        assert_eq!(s.stats().counter().map(|c| c.current_step()), Some(60));
    }

    #[test]
    fn no_reveal_after_teardown() {
        let mut s = scene();
        s.teardown();
        assert!(!s.observe_stats_visibility(1.0));
        assert!(!s.stats().is_revealed());
    }

    #[test]
    fn heading_types_while_mounted() {
        let mut s = scene();
        s.advance(450 * MS);
        assert_eq!(s.heading(), "Hyp");
    }

    #[test]
    fn pointer_feeds_glow() {
        let mut s = scene();
        s.pointer_moved(Vec2::new(300.0, 200.0));
        assert_eq!(s.frame().glow.map(|g| g.center), Some(Vec2::new(300.0, 200.0)));
    }

    #[test]
    fn heading_stops_with_teardown() {
        let mut s = scene();
        assert_eq!(s.active_timers(), 2);
        s.advance(450 * MS);
        s.teardown();
        s.advance(Duration::from_secs(1));
        assert_eq!(s.heading(), "Hyp");
    }

    #[test]
    fn enormous_steps_finish_quickly() {
        let mut s = scene();
        s.observe_stats_visibility(1.0);
        s.advance(Duration::MAX);
        s.advance(Duration::from_secs(u64::MAX / 4));

        assert_eq!(s.store().tick_count(), 2 * MAX_CATCH_UP_TICKS as u64);
        assert!(s.stats().counter().is_some_and(|c| c.is_finished()));
        assert!("Hyperion Dashboard".starts_with(s.heading()));
    }

    #[test]
    fn long_pause_is_truncated() {
        let mut s = scene();
        s.advance(Duration::from_secs(60));
        assert_eq!(s.store().tick_count(), MAX_CATCH_UP_TICKS as u64);
    }
}

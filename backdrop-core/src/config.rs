//! Tuning values for the backdrop animations.
//!
//! Every value is purely visual. Config is read from a TOML file with
//! per-section defaults, and [`Config::sanitized`] clamps bad values
//! instead of rejecting them.

use rand::Rng;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Lower bound on entities per field.
pub const MIN_ENTITIES: usize = 20;
/// Upper bound on entities per field.
pub const MAX_ENTITIES: usize = 40;
/// Slowest allowed fall speed, in pixels per tick.
pub const MIN_FALL_SPEED: f32 = 0.05;
/// Environment variable naming a config file to load.
pub const CONFIG_ENV: &str = "BACKDROP_CONFIG";

/// Closed range `[min, max]` that values are sampled from.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draws a value uniformly from the span. A collapsed span yields `min`.
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    fn sanitized(self, name: &str, floor: f32) -> Self {
        let mut out = self;
        if !out.min.is_finite() || !out.max.is_finite() {
            tracing::warn!("{name}: non-finite span {:?}, using [{floor}, {floor}]", self);
            return Self::new(floor, floor);
        }
        if out.min > out.max {
            std::mem::swap(&mut out.min, &mut out.max);
        }
        out.min = out.min.max(floor);
        out.max = out.max.max(out.min);
        if out != self {
            tracing::warn!("{name}: adjusted span {:?} -> {:?}", self, out);
        }
        out
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub falling: FallingConfig,
    pub floating: FloatingConfig,
    pub counter: CounterConfig,
    pub timing: TimingConfig,
    pub typewriter: TypewriterConfig,
}

/// Falling chain-logo field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FallingConfig {
    pub count: usize,
    /// Distance below the bottom edge a logo may travel before it respawns.
    pub margin: f32,
    /// Respawned logos start at least this far above the top edge...
    pub spawn_offset: f32,
    /// ...and at most `spawn_offset + spawn_band` above it.
    pub spawn_band: f32,
    pub speed: Span,
    pub size: Span,
    pub opacity: Span,
    /// Degrees added to the rotation every tick.
    pub spin: f32,
    pub drift_amplitude: f32,
    pub drift_frequency: f32,
}

impl Default for FallingConfig {
    fn default() -> Self {
        Self {
            count: 25,
            margin: 50.0,
            spawn_offset: 50.0,
            spawn_band: 300.0,
            speed: Span::new(0.5, 2.5),
            size: Span::new(18.0, 34.0),
            opacity: Span::new(0.1, 0.3),
            spin: 0.5,
            drift_amplitude: 0.5,
            drift_frequency: 0.01,
        }
    }
}

/// Bouncing background dots.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FloatingConfig {
    pub count: usize,
    /// Each velocity component is drawn from `[-max_speed, max_speed)`.
    pub max_speed: f32,
    pub size: Span,
    pub opacity: Span,
}

impl Default for FloatingConfig {
    fn default() -> Self {
        Self {
            count: 40,
            max_speed: 0.25,
            size: Span::new(2.0, 6.0),
            opacity: Span::new(0.3, 0.7),
        }
    }
}

/// Count-up statistics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: u64,
    pub steps: u32,
    /// Fraction of the stats section that must be on screen to start.
    pub reveal_threshold: f32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            steps: 60,
            reveal_threshold: 0.2,
        }
    }
}

impl CounterConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Particle stepper period.
    pub tick_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { tick_ms: 16 }
    }
}

impl TimingConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Dashboard heading typed out and erased in a loop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub text: String,
    pub type_ms: u64,
    pub hold_ms: u64,
    pub delete_ms: u64,
    pub pause_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            text: "Hyperion Dashboard".to_string(),
            type_ms: 150,
            hold_ms: 2000,
            delete_ms: 100,
            pause_ms: 500,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load from `$BACKDROP_CONFIG`, then `./backdrop.toml`, else defaults.
    ///
    /// The result is always sanitized.
    pub fn load_default() -> Self {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        if let Some(path) = &env_path
            && !path.exists()
        {
            tracing::warn!("{CONFIG_ENV} points at {:?}, which does not exist", path);
        }

        Self::load_first(env_path.into_iter().chain([PathBuf::from("./backdrop.toml")]))
    }

    /// Loads the first existing file among `candidates`.
    ///
    /// A file that fails to load is logged and skipped. Falls back to
    /// defaults when nothing loads.
    pub fn load_first(candidates: impl IntoIterator<Item = PathBuf>) -> Self {
        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {:?}", path);
                    return config.sanitized();
                }
                Err(e) => {
                    tracing::warn!("Failed to load config: {}", e);
                }
            }
        }

        tracing::info!("Using default config");
        Self::default()
    }

    /// Clamp misconfiguration to the nearest usable value.
    pub fn sanitized(mut self) -> Self {
        let f = &mut self.falling;
        f.count = clamp_count("falling.count", f.count);
        f.margin = non_negative("falling.margin", f.margin);
        f.spawn_offset = non_negative("falling.spawn_offset", f.spawn_offset);
        f.spawn_band = non_negative("falling.spawn_band", f.spawn_band);
        f.speed = f.speed.sanitized("falling.speed", MIN_FALL_SPEED);
        f.size = f.size.sanitized("falling.size", 0.0);
        f.opacity = clamp_unit_span("falling.opacity", f.opacity);
        if !f.spin.is_finite() {
            tracing::warn!("falling.spin: not finite, using 0");
            f.spin = 0.0;
        }
        f.drift_amplitude = non_negative("falling.drift_amplitude", f.drift_amplitude);
        f.drift_frequency = non_negative("falling.drift_frequency", f.drift_frequency);

        let p = &mut self.floating;
        p.count = clamp_count("floating.count", p.count);
        p.max_speed = non_negative("floating.max_speed", p.max_speed);
        p.size = p.size.sanitized("floating.size", 0.0);
        p.opacity = clamp_unit_span("floating.opacity", p.opacity);

        let c = &mut self.counter;
        if c.steps == 0 {
            tracing::warn!("counter.steps: 0, using 1");
            c.steps = 1;
        }
        if !(0.0..=1.0).contains(&c.reveal_threshold) {
            let fixed = if c.reveal_threshold.is_nan() {
                CounterConfig::default().reveal_threshold
            } else {
                c.reveal_threshold.clamp(0.0, 1.0)
            };
            tracing::warn!("counter.reveal_threshold: {} -> {}", c.reveal_threshold, fixed);
            c.reveal_threshold = fixed;
        }

        self.timing.tick_ms = at_least_one_ms("timing.tick_ms", self.timing.tick_ms);

        let t = &mut self.typewriter;
        t.type_ms = at_least_one_ms("typewriter.type_ms", t.type_ms);
        t.hold_ms = at_least_one_ms("typewriter.hold_ms", t.hold_ms);
        t.delete_ms = at_least_one_ms("typewriter.delete_ms", t.delete_ms);
        t.pause_ms = at_least_one_ms("typewriter.pause_ms", t.pause_ms);

        self
    }
}

fn clamp_count(name: &str, count: usize) -> usize {
    let fixed = count.clamp(MIN_ENTITIES, MAX_ENTITIES);
    if fixed != count {
        tracing::warn!("{name}: {count} -> {fixed}");
    }
    fixed
}

fn non_negative(name: &str, v: f32) -> f32 {
    if v.is_finite() && v >= 0.0 {
        v
    } else {
        tracing::warn!("{name}: {v} -> 0");
        0.0
    }
}

fn clamp_unit_span(name: &str, span: Span) -> Span {
    let s = span.sanitized(name, 0.0);
    Span::new(s.min.min(1.0), s.max.min(1.0))
}

fn at_least_one_ms(name: &str, ms: u64) -> u64 {
    if ms == 0 {
        tracing::warn!("{name}: 0, using 1");
        1
    } else {
        ms
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Default config file content, documenting every key.
pub fn generate_default_config() -> String {
    r#"# Backdrop animation tuning
#
# Set BACKDROP_CONFIG to load this file from another location.

[falling]
count = 25
margin = 50.0
spawn_offset = 50.0
spawn_band = 300.0
speed = { min = 0.5, max = 2.5 }
size = { min = 18.0, max = 34.0 }
opacity = { min = 0.1, max = 0.3 }
spin = 0.5
drift_amplitude = 0.5
drift_frequency = 0.01

[floating]
count = 40
max_speed = 0.25
size = { min = 2.0, max = 6.0 }
opacity = { min = 0.3, max = 0.7 }

[counter]
duration_ms = 2000
steps = 60
reveal_threshold = 0.2

[timing]
tick_ms = 16

[typewriter]
text = "Hyperion Dashboard"
type_ms = 150
hold_ms = 2000
delete_ms = 100
pause_ms = 500
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn generated_config_parses_to_defaults() {
        let cfg = Config::from_toml_str(&generate_default_config()).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn missing_sections_take_defaults() {
        let cfg = Config::from_toml_str("[falling]\ncount = 30\n").unwrap();
        assert_eq!(cfg.falling.count, 30);
        assert_eq!(cfg.falling.margin, 50.0);
        assert_eq!(cfg.counter, CounterConfig::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml_str("[falling\ncount = ").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here/backdrop.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn sanitized_clamps_misconfiguration() {
        let mut cfg = Config::default();
        cfg.falling.count = 0;
        cfg.falling.speed = Span::new(3.0, -1.0);
        cfg.falling.margin = -10.0;
        cfg.floating.count = 10_000;
        cfg.counter.steps = 0;
        cfg.counter.reveal_threshold = 4.0;
        cfg.timing.tick_ms = 0;

        let cfg = cfg.sanitized();
        assert_eq!(cfg.falling.count, MIN_ENTITIES);
        assert_eq!(cfg.falling.speed, Span::new(MIN_FALL_SPEED, 3.0));
        assert_eq!(cfg.falling.margin, 0.0);
        assert_eq!(cfg.floating.count, MAX_ENTITIES);
        assert_eq!(cfg.counter.steps, 1);
        assert_eq!(cfg.counter.reveal_threshold, 1.0);
        assert_eq!(cfg.timing.tick_ms, 1);
    }

    #[test]
    fn load_first_skips_broken_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "[falling\ncount = ").unwrap();
        std::fs::write(&good, "[falling]\ncount = 30\n").unwrap();

        let cfg = Config::load_first([dir.path().join("missing.toml"), broken.clone(), good]);
        assert_eq!(cfg.falling.count, 30);

        let cfg = Config::load_first([broken]);
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_first_sanitizes_loaded_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backdrop.toml");
        std::fs::write(&path, "[floating]\ncount = 500\n").unwrap();

        let cfg = Config::load_first([path]);
        assert_eq!(cfg.floating.count, MAX_ENTITIES);
    }

    #[test]
    fn sanitized_leaves_defaults_alone() {
        assert_eq!(Config::default().sanitized(), Config::default());
    }

    #[test]
    fn span_sample_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let span = Span::new(0.5, 2.5);
        for _ in 0..200 {
            let v = span.sample(&mut rng);
            assert!(v >= 0.5 && v < 2.5);
        }
        assert_eq!(Span::new(1.0, 1.0).sample(&mut rng), 1.0);
    }
}

//! Training configuration resource.
//!
//! Holds every tunable of a practice run, loaded from an INI file. Missing
//! keys keep their defaults, and out-of-range values are normalized rather
//! than rejected so a session can always start.
//!
//! # Configuration File Format
//!
//! ```ini
//! [session]
//! duration_seconds = 60
//! auto_start = false
//! pause_enabled = true
//! freeze_time_scale_when_paused = true
//!
//! [targets]
//! max_alive = 3
//! spawn_interval_seconds = 0.5
//! lifetime_seconds = 0
//! area_x = 10
//! area_y = 2
//! area_z = 10
//! anchor_x = 0
//! anchor_y = 1.5
//! anchor_z = -12
//! scale_min = 0.35
//! scale_max = 0.75
//!
//! [flash]
//! min_interval_seconds = 2.5
//! max_interval_seconds = 5
//! fuse_seconds = 0.6
//! min_distance = 6
//! max_distance = 12
//! yaw_range_degrees = 75
//!
//! [camera]
//! fov_y_degrees = 60
//! aspect = 1.7777
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::Vec3;
use log::info;
use std::path::PathBuf;

const DEFAULT_CONFIG_PATH: &str = "./training.ini";

/// Shortest spawn interval and fuse, in seconds.
pub const MIN_INTERVAL_SECONDS: f64 = 0.01;
/// Shortest flash interval bound, in seconds.
pub const MIN_FLASH_INTERVAL_SECONDS: f64 = 0.1;
/// Smallest target scale and flash distance.
const MIN_POSITIVE: f32 = 0.01;

/// Session clock and pause behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub duration_seconds: f64,
    /// Start the session straight after the initial reset.
    pub auto_start: bool,
    /// When `false`, pause requests are ignored.
    pub pause_enabled: bool,
    /// Drop the world time scale to zero while paused.
    pub freeze_time_scale_when_paused: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            duration_seconds: 60.0,
            auto_start: false,
            pause_enabled: true,
            freeze_time_scale_when_paused: true,
        }
    }
}

/// Target pool rules and spawn volume.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSpawnerSettings {
    pub spawn_only_while_session_running: bool,
    pub spawn_while_paused: bool,
    pub clear_targets_on_session_reset: bool,
    pub fill_to_max_on_session_start: bool,
    pub max_alive_targets: usize,
    pub spawn_interval_seconds: f64,
    /// `0` disables automatic despawn.
    pub target_lifetime_seconds: f64,
    /// Full extents of the spawn volume, centred on `anchor`.
    pub area_size: Vec3,
    pub anchor: Vec3,
    pub target_scale_min: f32,
    pub target_scale_max: f32,
}

impl Default for TargetSpawnerSettings {
    fn default() -> Self {
        Self {
            spawn_only_while_session_running: true,
            spawn_while_paused: false,
            clear_targets_on_session_reset: true,
            fill_to_max_on_session_start: true,
            max_alive_targets: 3,
            spawn_interval_seconds: 0.5,
            target_lifetime_seconds: 0.0,
            area_size: Vec3::new(10.0, 2.0, 10.0),
            anchor: Vec3::new(0.0, 1.5, -12.0),
            target_scale_min: 0.35,
            target_scale_max: 0.75,
        }
    }
}

/// Flash scheduling, placement around the camera and exposure thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashSpawnerSettings {
    pub spawn_only_while_session_running: bool,
    pub spawn_while_paused: bool,
    pub clear_on_session_reset: bool,
    pub show_indicator: bool,
    pub min_interval_seconds: f64,
    pub max_interval_seconds: f64,
    pub fuse_seconds: f64,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Half-angle of the yaw cone around the flattened camera forward.
    pub horizontal_angle_range_degrees: f32,
    pub height_offset: f32,
    pub height_variance: f32,
    /// Informational; the classifier only looks at on-screen-ness.
    pub full_flash_angle_degrees: f32,
    /// Informational; the classifier only looks at on-screen-ness.
    pub back_flash_angle_degrees: f32,
    pub indicator_scale: f32,
}

impl Default for FlashSpawnerSettings {
    fn default() -> Self {
        Self {
            spawn_only_while_session_running: true,
            spawn_while_paused: false,
            clear_on_session_reset: true,
            show_indicator: true,
            min_interval_seconds: 2.5,
            max_interval_seconds: 5.0,
            fuse_seconds: 0.6,
            min_distance: 6.0,
            max_distance: 12.0,
            horizontal_angle_range_degrees: 75.0,
            height_offset: 0.0,
            height_variance: 0.6,
            full_flash_angle_degrees: 25.0,
            back_flash_angle_degrees: 80.0,
            indicator_scale: 0.2,
        }
    }
}

/// Initial camera pose and lens.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    pub position: Vec3,
    pub fov_y_degrees: f32,
    pub aspect: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 0.0),
            fov_y_degrees: 60.0,
            aspect: 16.0 / 9.0,
        }
    }
}

/// Training configuration resource.
#[derive(Resource, Debug, Clone, Default)]
pub struct TrainingConfig {
    pub session: SessionSettings,
    pub targets: TargetSpawnerSettings,
    pub flash: FlashSpawnerSettings,
    pub camera: CameraSettings,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl TrainingConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            ..Self::default()
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. The result is normalized.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        read_f64(&config, "session", "duration_seconds", &mut self.session.duration_seconds);
        read_bool(&config, "session", "auto_start", &mut self.session.auto_start);
        read_bool(&config, "session", "pause_enabled", &mut self.session.pause_enabled);
        read_bool(
            &config,
            "session",
            "freeze_time_scale_when_paused",
            &mut self.session.freeze_time_scale_when_paused,
        );

        let targets = &mut self.targets;
        read_bool(&config, "targets", "only_while_running", &mut targets.spawn_only_while_session_running);
        read_bool(&config, "targets", "spawn_while_paused", &mut targets.spawn_while_paused);
        read_bool(&config, "targets", "clear_on_reset", &mut targets.clear_targets_on_session_reset);
        read_bool(&config, "targets", "fill_on_start", &mut targets.fill_to_max_on_session_start);
        if let Some(max) = config.getuint("targets", "max_alive").ok().flatten() {
            targets.max_alive_targets = max as usize;
        }
        read_f64(&config, "targets", "spawn_interval_seconds", &mut targets.spawn_interval_seconds);
        read_f64(&config, "targets", "lifetime_seconds", &mut targets.target_lifetime_seconds);
        read_f32(&config, "targets", "area_x", &mut targets.area_size.x);
        read_f32(&config, "targets", "area_y", &mut targets.area_size.y);
        read_f32(&config, "targets", "area_z", &mut targets.area_size.z);
        read_f32(&config, "targets", "anchor_x", &mut targets.anchor.x);
        read_f32(&config, "targets", "anchor_y", &mut targets.anchor.y);
        read_f32(&config, "targets", "anchor_z", &mut targets.anchor.z);
        read_f32(&config, "targets", "scale_min", &mut targets.target_scale_min);
        read_f32(&config, "targets", "scale_max", &mut targets.target_scale_max);

        let flash = &mut self.flash;
        read_bool(&config, "flash", "only_while_running", &mut flash.spawn_only_while_session_running);
        read_bool(&config, "flash", "spawn_while_paused", &mut flash.spawn_while_paused);
        read_bool(&config, "flash", "clear_on_reset", &mut flash.clear_on_session_reset);
        read_bool(&config, "flash", "show_indicator", &mut flash.show_indicator);
        read_f64(&config, "flash", "min_interval_seconds", &mut flash.min_interval_seconds);
        read_f64(&config, "flash", "max_interval_seconds", &mut flash.max_interval_seconds);
        read_f64(&config, "flash", "fuse_seconds", &mut flash.fuse_seconds);
        read_f32(&config, "flash", "min_distance", &mut flash.min_distance);
        read_f32(&config, "flash", "max_distance", &mut flash.max_distance);
        read_f32(&config, "flash", "yaw_range_degrees", &mut flash.horizontal_angle_range_degrees);
        read_f32(&config, "flash", "height_offset", &mut flash.height_offset);
        read_f32(&config, "flash", "height_variance", &mut flash.height_variance);
        read_f32(&config, "flash", "full_flash_angle_degrees", &mut flash.full_flash_angle_degrees);
        read_f32(&config, "flash", "back_flash_angle_degrees", &mut flash.back_flash_angle_degrees);
        read_f32(&config, "flash", "indicator_scale", &mut flash.indicator_scale);

        let camera = &mut self.camera;
        read_f32(&config, "camera", "position_x", &mut camera.position.x);
        read_f32(&config, "camera", "position_y", &mut camera.position.y);
        read_f32(&config, "camera", "position_z", &mut camera.position.z);
        read_f32(&config, "camera", "fov_y_degrees", &mut camera.fov_y_degrees);
        read_f32(&config, "camera", "aspect", &mut camera.aspect);

        self.normalize();

        info!(
            "Loaded config: {}s session, {} targets every {}s, flashes every {}-{}s",
            self.session.duration_seconds,
            self.targets.max_alive_targets,
            self.targets.spawn_interval_seconds,
            self.flash.min_interval_seconds,
            self.flash.max_interval_seconds
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        set("session", "duration_seconds", self.session.duration_seconds.to_string());
        set("session", "auto_start", self.session.auto_start.to_string());
        set("session", "pause_enabled", self.session.pause_enabled.to_string());
        set(
            "session",
            "freeze_time_scale_when_paused",
            self.session.freeze_time_scale_when_paused.to_string(),
        );

        let t = &self.targets;
        set("targets", "only_while_running", t.spawn_only_while_session_running.to_string());
        set("targets", "spawn_while_paused", t.spawn_while_paused.to_string());
        set("targets", "clear_on_reset", t.clear_targets_on_session_reset.to_string());
        set("targets", "fill_on_start", t.fill_to_max_on_session_start.to_string());
        set("targets", "max_alive", t.max_alive_targets.to_string());
        set("targets", "spawn_interval_seconds", t.spawn_interval_seconds.to_string());
        set("targets", "lifetime_seconds", t.target_lifetime_seconds.to_string());
        set("targets", "area_x", t.area_size.x.to_string());
        set("targets", "area_y", t.area_size.y.to_string());
        set("targets", "area_z", t.area_size.z.to_string());
        set("targets", "anchor_x", t.anchor.x.to_string());
        set("targets", "anchor_y", t.anchor.y.to_string());
        set("targets", "anchor_z", t.anchor.z.to_string());
        set("targets", "scale_min", t.target_scale_min.to_string());
        set("targets", "scale_max", t.target_scale_max.to_string());

        let f = &self.flash;
        set("flash", "only_while_running", f.spawn_only_while_session_running.to_string());
        set("flash", "spawn_while_paused", f.spawn_while_paused.to_string());
        set("flash", "clear_on_reset", f.clear_on_session_reset.to_string());
        set("flash", "show_indicator", f.show_indicator.to_string());
        set("flash", "min_interval_seconds", f.min_interval_seconds.to_string());
        set("flash", "max_interval_seconds", f.max_interval_seconds.to_string());
        set("flash", "fuse_seconds", f.fuse_seconds.to_string());
        set("flash", "min_distance", f.min_distance.to_string());
        set("flash", "max_distance", f.max_distance.to_string());
        set("flash", "yaw_range_degrees", f.horizontal_angle_range_degrees.to_string());
        set("flash", "height_offset", f.height_offset.to_string());
        set("flash", "height_variance", f.height_variance.to_string());
        set("flash", "full_flash_angle_degrees", f.full_flash_angle_degrees.to_string());
        set("flash", "back_flash_angle_degrees", f.back_flash_angle_degrees.to_string());
        set("flash", "indicator_scale", f.indicator_scale.to_string());

        let c = &self.camera;
        set("camera", "position_x", c.position.x.to_string());
        set("camera", "position_y", c.position.y.to_string());
        set("camera", "position_z", c.position.z.to_string());
        set("camera", "fov_y_degrees", c.fov_y_degrees.to_string());
        set("camera", "aspect", c.aspect.to_string());

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Return a copy with every value forced into its usable range.
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Clamp every value into its usable range in place.
    ///
    /// Non-finite values fall back to the field default first. Inverted
    /// min/max pairs are left for the samplers to handle.
    pub fn normalize(&mut self) {
        let s = &mut self.session;
        let sd = SessionSettings::default();
        s.duration_seconds = finite_f64(s.duration_seconds, sd.duration_seconds).max(1.0);

        let t = &mut self.targets;
        let td = TargetSpawnerSettings::default();
        t.max_alive_targets = t.max_alive_targets.max(1);
        t.spawn_interval_seconds = finite_f64(t.spawn_interval_seconds, td.spawn_interval_seconds)
            .max(MIN_INTERVAL_SECONDS);
        t.target_lifetime_seconds =
            finite_f64(t.target_lifetime_seconds, td.target_lifetime_seconds).max(0.0);
        t.area_size = finite_vec3(t.area_size, td.area_size).abs();
        t.anchor = finite_vec3(t.anchor, td.anchor);
        t.target_scale_min = finite_f32(t.target_scale_min, td.target_scale_min).max(MIN_POSITIVE);
        t.target_scale_max = finite_f32(t.target_scale_max, td.target_scale_max).max(MIN_POSITIVE);

        let f = &mut self.flash;
        let fd = FlashSpawnerSettings::default();
        f.min_interval_seconds = finite_f64(f.min_interval_seconds, fd.min_interval_seconds)
            .max(MIN_FLASH_INTERVAL_SECONDS);
        f.max_interval_seconds = finite_f64(f.max_interval_seconds, fd.max_interval_seconds)
            .max(MIN_FLASH_INTERVAL_SECONDS);
        f.fuse_seconds = finite_f64(f.fuse_seconds, fd.fuse_seconds).max(MIN_INTERVAL_SECONDS);
        f.min_distance = finite_f32(f.min_distance, fd.min_distance).max(MIN_POSITIVE * 10.0);
        f.max_distance = finite_f32(f.max_distance, fd.max_distance).max(MIN_POSITIVE * 10.0);
        f.horizontal_angle_range_degrees =
            finite_f32(f.horizontal_angle_range_degrees, fd.horizontal_angle_range_degrees)
                .clamp(0.0, 180.0);
        f.height_offset = finite_f32(f.height_offset, fd.height_offset);
        f.height_variance = finite_f32(f.height_variance, fd.height_variance).max(0.0);
        f.full_flash_angle_degrees =
            finite_f32(f.full_flash_angle_degrees, fd.full_flash_angle_degrees).clamp(0.0, 180.0);
        f.back_flash_angle_degrees =
            finite_f32(f.back_flash_angle_degrees, fd.back_flash_angle_degrees).clamp(0.0, 180.0);
        f.indicator_scale = finite_f32(f.indicator_scale, fd.indicator_scale).max(MIN_POSITIVE);

        let c = &mut self.camera;
        let cd = CameraSettings::default();
        c.position = finite_vec3(c.position, cd.position);
        c.fov_y_degrees = finite_f32(c.fov_y_degrees, cd.fov_y_degrees).clamp(1.0, 179.0);
        c.aspect = finite_f32(c.aspect, cd.aspect);
        if c.aspect <= 0.0 {
            c.aspect = cd.aspect;
        }
    }
}

fn finite_f64(value: f64, default: f64) -> f64 {
    if value.is_finite() { value } else { default }
}

fn finite_f32(value: f32, default: f32) -> f32 {
    if value.is_finite() { value } else { default }
}

fn finite_vec3(value: Vec3, default: Vec3) -> Vec3 {
    if value.is_finite() { value } else { default }
}

fn read_f64(config: &Ini, section: &str, key: &str, target: &mut f64) {
    if let Some(value) = config.getfloat(section, key).ok().flatten() {
        *target = value;
    }
}

fn read_f32(config: &Ini, section: &str, key: &str, target: &mut f32) {
    if let Some(value) = config.getfloat(section, key).ok().flatten() {
        *target = value as f32;
    }
}

fn read_bool(config: &Ini, section: &str, key: &str, target: &mut bool) {
    if let Some(value) = config.getbool(section, key).ok().flatten() {
        *target = value;
    }
}

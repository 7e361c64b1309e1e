use config::{Config, ConfigError, Environment, File, FileFormat};
use erebus_kinematics::{Angle, DifferentialDrive, KinematicsError, Pose};
use erebus_motion::MotionConfig;
use serde::Deserialize;
use tracing::{error, info};

use crate::mission::Goal;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Everything the simulation driver reads at startup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub robot: RobotSettings,
    pub motion: MotionConfig,
    pub simulation: SimulationSettings,
    pub mission: Vec<Goal>,
}

/// Physical parameters and starting pose of the simulated robot.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RobotSettings {
    pub wheel_radius: f64,
    pub axle_length: f64,
    /// Wheel angular velocity at a ratio of 1.0 (rad/s).
    pub max_wheel_velocity: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub start_heading_deg: f64,
}

impl Default for RobotSettings {
    fn default() -> Self {
        // e-puck
        RobotSettings {
            wheel_radius: 0.0205,
            axle_length: 0.052,
            max_wheel_velocity: 6.28,
            start_x: 0.0,
            start_y: 0.0,
            start_heading_deg: 0.0,
        }
    }
}

impl RobotSettings {
    pub fn kinematics(&self) -> Result<DifferentialDrive, KinematicsError> {
        DifferentialDrive::new(self.wheel_radius, self.axle_length, self.max_wheel_velocity)
    }

    pub fn start_pose(&self) -> Pose {
        Pose::new(self.start_x, self.start_y, Angle::from_degrees(self.start_heading_deg))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Control period (ms).
    pub tick_ms: u64,
    /// Sleep out every tick instead of running as fast as possible.
    pub realtime: bool,
    /// Half-width of the uniform noise added to each GPS coordinate (m).
    pub gps_noise: f64,
    pub seed: u64,
    /// Ticks after which a goal that has not completed is abandoned.
    pub max_ticks_per_goal: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            tick_ms: 32,
            realtime: false,
            gps_noise: 0.0,
            seed: 0,
            max_ticks_per_goal: 2_000,
        }
    }
}

impl SimulationSettings {
    pub fn dt(&self) -> f64 {
        self.tick_ms as f64 / 1000.0
    }
}

/// Loads `path` as TOML, then applies `EREBUS__SECTION__KEY` environment overrides.
pub fn load_settings(path: &str) -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", path);

    let settings = Config::builder()
        .add_source(File::new(path, FileFormat::Toml).required(true))
        .add_source(
            Environment::with_prefix("EREBUS")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .and_then(|config| config.try_deserialize::<Settings>());

    match settings {
        Ok(settings) => {
            info!(goals = settings.mission.len(), "Successfully loaded configuration");
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erebus_motion::Criteria;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = parse("");
        assert_eq!(settings.motion, MotionConfig::default());
        assert_eq!(settings.simulation.tick_ms, 32);
        assert!(settings.mission.is_empty());
        assert!(settings.robot.kinematics().is_ok());
    }

    #[test]
    fn test_partial_tuning_keeps_other_defaults() {
        let settings = parse(
            r#"
            [motion.rotation]
            accuracy_deg = 3.5

            [simulation]
            realtime = true
            "#,
        );
        assert_eq!(settings.motion.rotation.accuracy_deg, 3.5);
        assert_eq!(settings.motion.rotation.velocity_reduction_threshold_deg, 10.0);
        assert_eq!(settings.motion.translation, MotionConfig::default().translation);
        assert!(settings.simulation.realtime);
    }

    #[test]
    fn test_mission_goals() {
        let settings = parse(
            r#"
            [[mission]]
            type = "wheels"
            left = 1.0
            right = -1.0
            ticks = 5

            [[mission]]
            type = "rotate"
            degrees = 90.0
            criteria = "farthest"

            [[mission]]
            type = "rotate"
            degrees = 180.0

            [[mission]]
            type = "move_to"
            x = 0.12
            y = -0.06

            [[mission]]
            type = "stop"
            "#,
        );
        assert_eq!(
            settings.mission,
            vec![
                Goal::Wheels { left: 1.0, right: -1.0, ticks: 5 },
                Goal::Rotate { degrees: 90.0, criteria: Criteria::Farthest },
                Goal::Rotate { degrees: 180.0, criteria: Criteria::Closest },
                Goal::MoveTo { x: 0.12, y: -0.06 },
                Goal::Stop,
            ]
        );
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let settings = parse(include_str!("../config/default.toml"));
        assert!(settings.motion.validate().is_ok());
        assert!(settings.robot.kinematics().is_ok());
        assert!(!settings.mission.is_empty());
    }

    #[test]
    fn test_start_pose() {
        let robot = RobotSettings {
            start_x: 0.5,
            start_heading_deg: 450.0,
            ..RobotSettings::default()
        };
        let pose = robot.start_pose();
        assert_eq!(pose.position.x, 0.5);
        assert!((pose.heading.degrees() - 90.0).abs() < 1e-9);
    }
}

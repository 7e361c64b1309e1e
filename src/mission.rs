//! Per-tick behaviour executor: walks a list of goals against the simulator.

use std::fmt;
use std::time::Duration;

use erebus_kinematics::{Angle, Pose, Position2D, Unit};
use erebus_motion::{Criteria, DriveBase};
use serde::Deserialize;
use spin_sleep::SpinSleeper;
use tracing::{debug, info, warn};

use crate::config::SimulationSettings;
use crate::simulation::{SimulatedWheel, Simulator};

/// One step of a mission.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Goal {
    /// Turn in place to an absolute heading.
    Rotate {
        degrees: f64,
        #[serde(default)]
        criteria: Criteria,
    },
    /// Drive to an arena coordinate.
    MoveTo { x: f64, y: f64 },
    /// Hold raw wheel ratios for a number of ticks.
    Wheels { left: f64, right: f64, ticks: u32 },
    Stop,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Rotate { degrees, criteria } => write!(f, "rotate to {degrees}° ({criteria:?})"),
            Goal::MoveTo { x, y } => write!(f, "move to {}", Position2D::new(*x, *y)),
            Goal::Wheels { left, right, ticks } => {
                write!(f, "wheels (L: {left}, R: {right}) for {ticks} ticks")
            }
            Goal::Stop => write!(f, "stop"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutcome {
    Completed { ticks: u32 },
    TimedOut { ticks: u32 },
}

/// Summary printed at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionReport {
    pub outcomes: Vec<GoalOutcome>,
    pub final_pose: Pose,
    pub total_ticks: u32,
    /// Mean of [`DriveBase::wheel_direction`] over every tick.
    pub average_wheel_direction: f64,
}

impl MissionReport {
    pub fn completed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, GoalOutcome::Completed { .. }))
            .count()
    }
}

impl fmt::Display for MissionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} goals completed in {} ticks, final pose {}, average wheel direction {:.3}",
            self.completed(),
            self.outcomes.len(),
            self.total_ticks,
            self.final_pose,
            self.average_wheel_direction
        )
    }
}

/// Drives a [`DriveBase`] over simulated wheels through a list of goals.
pub struct MissionRunner {
    drive_base: DriveBase<SimulatedWheel>,
    simulator: Simulator,
    settings: SimulationSettings,
    sleeper: SpinSleeper,
    total_ticks: u32,
    wheel_direction_sum: f64,
}

impl MissionRunner {
    pub fn new(
        drive_base: DriveBase<SimulatedWheel>,
        simulator: Simulator,
        settings: SimulationSettings,
    ) -> Self {
        MissionRunner {
            drive_base,
            simulator,
            settings,
            sleeper: SpinSleeper::new(1_000),
            total_ticks: 0,
            wheel_direction_sum: 0.0,
        }
    }

    /// The drive base and its last wheel commands.
    pub fn drive_base(&self) -> &DriveBase<SimulatedWheel> {
        &self.drive_base
    }

    /// Runs every goal in order. A goal that exceeds `max_ticks_per_goal` is
    /// abandoned with a warning and the mission moves on.
    pub fn run(&mut self, goals: &[Goal]) -> anyhow::Result<MissionReport> {
        let mut outcomes = Vec::with_capacity(goals.len());

        for (index, goal) in goals.iter().enumerate() {
            info!(step = index + 1, total = goals.len(), %goal, "Starting goal");
            let outcome = self.run_goal(goal)?;
            match outcome {
                GoalOutcome::Completed { ticks } => {
                    info!(%goal, ticks, pose = %self.simulator.pose(), "Goal completed");
                }
                GoalOutcome::TimedOut { ticks } => {
                    warn!(%goal, ticks, pose = %self.simulator.pose(), "Goal timed out, skipping");
                }
            }
            outcomes.push(outcome);
        }

        let average_wheel_direction = if self.total_ticks == 0 {
            0.0
        } else {
            self.wheel_direction_sum / self.total_ticks as f64
        };

        Ok(MissionReport {
            outcomes,
            final_pose: self.simulator.pose(),
            total_ticks: self.total_ticks,
            average_wheel_direction,
        })
    }

    fn run_goal(&mut self, goal: &Goal) -> anyhow::Result<GoalOutcome> {
        let mut ticks = 0;

        while ticks < self.settings.max_ticks_per_goal {
            let sensed = self.simulator.sense();
            self.drive_base.set_position(sensed.position);
            self.drive_base.sync_heading(sensed.heading);

            let done = match *goal {
                Goal::Rotate { degrees, criteria } => self
                    .drive_base
                    .rotate_to_angle(Angle::new(degrees, Unit::Degrees), criteria),
                Goal::MoveTo { x, y } => self.drive_base.move_to_position(Position2D::new(x, y)),
                Goal::Wheels { left, right, ticks: hold } => {
                    if ticks >= hold {
                        true
                    } else {
                        self.drive_base.move_wheels(left, right);
                        false
                    }
                }
                Goal::Stop => {
                    self.drive_base.move_wheels(0.0, 0.0);
                    true
                }
            };

            if done {
                return Ok(GoalOutcome::Completed { ticks });
            }

            self.tick()?;
            ticks += 1;
        }

        Ok(GoalOutcome::TimedOut { ticks })
    }

    fn tick(&mut self) -> anyhow::Result<()> {
        let pose = self.simulator.step(
            self.drive_base.left_wheel(),
            self.drive_base.right_wheel(),
            self.settings.dt(),
        )?;
        self.total_ticks += 1;
        self.wheel_direction_sum += self.drive_base.wheel_direction();
        debug!(tick = self.total_ticks, %pose, "Simulation tick");

        if self.settings.realtime {
            self.sleeper
                .sleep(Duration::from_millis(self.settings.tick_ms));
        }
        Ok(())
    }
}

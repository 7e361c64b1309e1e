mod config;
mod mission;
mod simulation;

use anyhow::Context;
use erebus_motion::{DriveBase, Wheel};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

use crate::mission::MissionRunner;
use crate::simulation::{SimulatedWheel, Simulator};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Erebus drive simulation started.");

    let settings = config::load_settings(config::DEFAULT_CONFIG_PATH)
        .context("failed to load configuration")?;

    let kinematics = settings
        .robot
        .kinematics()
        .context("invalid robot parameters")?;
    let drive_base = DriveBase::new(
        SimulatedWheel::default(),
        SimulatedWheel::default(),
        settings.motion,
    )
    .context("invalid motion tuning")?;
    let simulator = Simulator::new(
        kinematics,
        settings.robot.start_pose(),
        settings.simulation.gps_noise,
        settings.simulation.seed,
    );
    info!(%kinematics, start = %settings.robot.start_pose(), "Robot ready");

    let mut runner = MissionRunner::new(drive_base, simulator, settings.simulation.clone());
    let report = runner.run(&settings.mission)?;

    info!(
        left = runner.drive_base().left_wheel().velocity(),
        right = runner.drive_base().right_wheel().velocity(),
        "Last wheel command"
    );
    info!(%report, "Mission finished");
    Ok(())
}

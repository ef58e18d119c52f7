// scrollstack-inspect
// Builds a stack from a scenario file over a simulated surface and reports
// each pane's rect, visibility state, frame, inner offset and live cells.

mod report;
mod scenario;
mod settings;
mod surface;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use report::Snapshot;
use scenario::{Scenario, Session};
use settings::{InspectSettings, OutputFormat};

#[derive(Parser)]
#[command(name = "scrollstack-inspect")]
#[command(version, about = "Inspect nested scroll stack placement for a scenario")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (overrides settings.json)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep the viewport from the top of the stack to the bottom
    Sweep {
        scenario: PathBuf,
        /// Distance between snapshots (overrides settings.json)
        #[arg(short, long)]
        step: Option<f32>,
    },
    /// Report placement at a single offset
    At { scenario: PathBuf, offset: f32 },
    /// Replay the scenario's scroll_to steps
    Replay {
        scenario: PathBuf,
        /// Ask the surface to animate each scroll
        #[arg(long)]
        animated: bool,
    },
    /// Write default settings to the config dir
    InitSettings {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = settings::load_settings();
    let format = cli.format.unwrap_or(settings.format);

    let snapshots = match cli.command {
        Commands::Sweep { scenario, step } => {
            let step = step.unwrap_or(settings.sweep_step);
            sweep(&mut load(&scenario)?, step)?
        }
        Commands::At { scenario, offset } => {
            let mut session = load(&scenario)?;
            session.scroll_to_offset(offset);
            log::debug!("attached panes: {:?}", session.stack.host().attached());
            vec![Snapshot::capture(&session)]
        }
        Commands::Replay { scenario, animated } => {
            let scenario = Scenario::load(&scenario)?;
            let mut session = scenario.build();
            replay(&scenario, &mut session, animated || settings.animated_scrolls)?
        }
        Commands::InitSettings { force } => return init_settings(force),
    };

    let output = match format {
        OutputFormat::Table => report::render_table(&snapshots),
        OutputFormat::Json => report::render_json(&snapshots)?,
    };
    print!("{}", output);
    Ok(())
}

fn load(path: &std::path::Path) -> Result<Session> {
    Ok(Scenario::load(path)?.build())
}

/// Upper bound on snapshots in one sweep.
const MAX_SWEEP_SNAPSHOTS: u64 = 100_000;

/// Snapshots from offset 0 to the last reachable offset, `step` apart.
/// The last snapshot is always taken at the last reachable offset.
fn sweep(session: &mut Session, step: f32) -> Result<Vec<Snapshot>> {
    if !step.is_finite() || step <= 0.0 {
        anyhow::bail!("sweep step must be positive and finite, got {}", step);
    }
    let max = f64::from(session.max_offset());
    let step = f64::from(step);
    let steps = (max / step).ceil() as u64;
    if steps >= MAX_SWEEP_SNAPSHOTS {
        anyhow::bail!(
            "sweeping {} with step {} takes {} snapshots (limit {}), use a larger step",
            max,
            step,
            steps + 1,
            MAX_SWEEP_SNAPSHOTS
        );
    }

    // Offsets come from the index, not a running sum: past 2^24 an f32 sum
    // stops advancing for small steps.
    let mut snapshots = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let y = (i as f64 * step).min(max) as f32;
        session.scroll_to_offset(y);
        snapshots.push(Snapshot::capture(session));
    }
    log::info!("sweep captured {} snapshots", snapshots.len());
    Ok(snapshots)
}

fn replay(scenario: &Scenario, session: &mut Session, animated: bool) -> Result<Vec<Snapshot>> {
    let mut snapshots = vec![Snapshot::capture(session)];
    for step in &scenario.scroll_to {
        let offset = session.scroll_to_item(*step, animated)?;
        log::info!(
            "scrolled to pane {} ({:?}) at offset {}",
            step.index,
            step.position,
            offset
        );
        snapshots.push(Snapshot::capture(session));
    }
    Ok(snapshots)
}

fn init_settings(force: bool) -> Result<()> {
    let path = settings::settings_path().context("Cannot determine settings path")?;
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    settings::save_settings_to(&InspectSettings::default(), &path)?;
    println!("wrote {}", path.display());
    Ok(())
}

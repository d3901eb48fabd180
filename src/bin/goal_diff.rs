use anyhow::{Context as _, Result};
use clap::Parser;

use megaverse::{
    config::Config,
    fetch::{fetch_goal, GoalDiff},
    render::render,
    shape::Phase,
};

/// Compares a generated picture with the goal map stored on the server.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[arg(value_enum)]
    phase: Phase,
}

fn main() -> Result<()> {
    megaverse::init_logger();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let goal = fetch_goal(&config.api_url, &config.candidate_id)?;
    println!("goal map {}x{}", goal.grid.rows(), goal.grid.columns());
    print!("{}", render(goal.grid, &goal.placements));

    if goal.grid != cli.phase.grid() {
        println!(
            "warning: goal grid differs from {:?} grid {:?}",
            cli.phase,
            cli.phase.grid()
        );
    }

    let generated = cli
        .phase
        .generate()
        .with_context(|| format!("{:?} does not fit its grid", cli.phase))?;
    let diff = GoalDiff::polyanets(&goal.placements, &generated);

    if diff.is_empty() {
        println!("{:?} matches the goal polyanets", cli.phase);
    } else {
        println!("missing: {:?}", diff.missing);
        println!("extra: {:?}", diff.extra);
    }
    Ok(())
}

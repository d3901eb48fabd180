use anyhow::{Context as _, Result};
use cfg_if::cfg_if;
use clap::Parser;

use megaverse::{render::render, shape::Phase};

/// Draws the challenge pictures on the Megaverse through its REST API.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Target picture to reproduce
    #[arg(value_enum)]
    phase: Phase,

    /// Print the generated picture and exit without calling the API
    #[arg(long)]
    dry_run: bool,

    /// Remove the generated entities instead of placing them
    #[arg(long, conflicts_with = "dry_run")]
    clear: bool,
}

fn main() -> Result<()> {
    megaverse::init_logger();
    let cli = Cli::parse();

    let placements = cli
        .phase
        .generate()
        .with_context(|| format!("{:?} does not fit its grid", cli.phase))?;

    if cli.dry_run {
        print!("{}", render(cli.phase.grid(), &placements));
        println!("{} entities", placements.len());
        return Ok(());
    }

    cfg_if! {
        if #[cfg(feature = "net")] {
            use megaverse::{
                client::{HttpTransport, MegaverseClient},
                config::Config,
                driver,
            };

            let config = Config::from_env()?;
            let transport = HttpTransport::new(config.timeout)?;
            let client = MegaverseClient::new(
                transport,
                config.api_url,
                config.candidate_id,
                config.retry,
            );

            if cli.clear {
                driver::clear_all(&client, &placements);
            } else {
                driver::place_all(&client, &placements);
            }
            println!("{:?} done", cli.phase);
        } else {
            anyhow::bail!("built without the `net` feature; only --dry-run is available");
        }
    }

    Ok(())
}

use anyhow::{bail, Context as _, Result};
use clap::{Parser, Subcommand};

use megaverse::{
    basis::{Color, Direction, Kind},
    client::{HttpTransport, MegaverseClient},
    config::Config,
    grid::Grid,
    shape::PHASE2_GRID,
};

/// Places or removes a single astral entity.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Side length of the grid the coordinates are checked against
    #[arg(long, default_value_t = PHASE2_GRID.rows())]
    grid: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// POST one entity
    Place {
        /// polyanet, soloon or cometh
        kind: Kind,
        row: u8,
        column: u8,
        /// Required for soloons
        #[arg(long, value_enum)]
        color: Option<Color>,
        /// Required for comeths
        #[arg(long, value_enum)]
        direction: Option<Direction>,
    },
    /// DELETE one entity
    Remove {
        /// polyanet, soloon or cometh
        kind: Kind,
        row: u8,
        column: u8,
    },
}

fn main() -> Result<()> {
    megaverse::init_logger();
    let cli = Cli::parse();
    let side = cli.grid;
    let grid = Grid::square(side);

    let checked = |row: u8, column: u8| {
        grid.pos(row, column).with_context(|| {
            format!(
                "({}, {}) is outside of the {}x{} grid",
                row, column, side, side
            )
        })
    };

    let config = Config::from_env()?;
    let client = MegaverseClient::new(
        HttpTransport::new(config.timeout)?,
        config.api_url,
        config.candidate_id,
        config.retry,
    );

    let outcome = match cli.action {
        Action::Place {
            kind,
            row,
            column,
            color,
            direction,
        } => client.place_parts(kind, checked(row, column)?, color, direction)?,
        Action::Remove { kind, row, column } => client.remove(kind, checked(row, column)?),
    };

    if !outcome.is_done() {
        bail!("request failed: {:?}", outcome);
    }
    Ok(())
}

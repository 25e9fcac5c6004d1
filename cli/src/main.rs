use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sweeper_core::*;

use command::{Command, HELP};

mod command;

/// Play Minesweeper in the terminal, one command per line.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed for mine placement, taken from the clock when missing
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbosity.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("Mine placement seed: {}", seed);

    let controller = GameController::new(RandomGridFactory::new(GameConfig::default(), seed));
    play(controller, io::stdin().lock(), io::stdout().lock())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Runs commands from `input` until it ends or a quit command, re-rendering after every notification.
fn play<F: GridFactory>(
    mut controller: GameController<F>,
    input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<()> {
    let (notify, notified) = mpsc::channel();
    controller.subscribe(move || {
        // the receiver outlives the controller, a failed send only happens on shutdown
        let _ = notify.send(());
    });

    writeln!(output, "{HELP}")?;
    render(&controller, &mut output)?;

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(output, "{HELP}")?,
            Ok(command) => {
                if let Err(err) = dispatch(&mut controller, command) {
                    writeln!(output, "{err}")?;
                }
            }
            Err(err) => writeln!(output, "{err}")?,
        }

        if notified.try_iter().count() > 0 {
            render(&controller, &mut output)?;
        }
    }

    output.flush()?;
    Ok(())
}

fn dispatch<F: GridFactory>(
    controller: &mut GameController<F>,
    command: Command,
) -> anyhow::Result<()> {
    let (coords, result) = match command {
        Command::Open(coords) => (coords, controller.open_cell(coords)),
        Command::OpenAround(coords) => (coords, controller.open_around(coords)),
        Command::ToggleFlag(coords) => (coords, controller.toggle_flag(coords)),
        Command::NewGame => {
            controller.new_game();
            return Ok(());
        }
        Command::Help | Command::Quit => return Ok(()),
    };

    let outcome = result.with_context(|| {
        let (rows, cols) = controller.grid().size();
        format!("{coords:?} is outside the {rows}x{cols} grid")
    })?;
    log::debug!("{:?} at {:?}: {:?}", command, coords, outcome);
    Ok(())
}

fn render<F: GridFactory>(controller: &GameController<F>, output: &mut impl Write) -> io::Result<()> {
    writeln!(output)?;
    write!(output, "{}", controller.grid_text())?;
    writeln!(output, "{}", controller.status_line())?;
    output.flush()
}

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context};

use hanoi::{optimal_nr_moves, render, solve, Pacing, PegId, Towers};

/// Disk counts above this ask for confirmation before animating 2^n - 1 moves.
const SOFT_DISK_LIMIT: u32 = 8;
/// Pause between animated moves.
const MOVE_DELAY: Duration = Duration::from_millis(500);

fn main() {
    // logs go to stderr, stdout is owned by the diagrams
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lines();

    let nr_disks = prompt_disk_count(&mut lines)?;
    log::info!("solving for {nr_disks} disks");

    let mut towers = Towers::new(nr_disks, PegId::A);
    render::print_initial(&towers);
    prompt_enter(&mut lines, "Press enter to start...")?;

    let pacing = Pacing::Fixed(MOVE_DELAY);
    let start = Instant::now();
    let mut nr_moves = 0;

    solve(nr_disks, PegId::A, PegId::B, PegId::C, |mv, nr| {
        towers
            .perform_move(mv)
            .with_context(|| format!("applying move {nr}"))?;
        render::print_after_move(&towers, mv, nr);
        nr_moves = nr;
        pacing.pause();
        Ok(())
    })?;

    println!();
    println!(
        "Solved in {nr_moves} moves (optimal = {}) in {}s",
        optimal_nr_moves(nr_disks),
        start.elapsed().as_secs_f32()
    );

    Ok(())
}

/// Keep asking until we get a usable disk count. Counts above
/// [SOFT_DISK_LIMIT] are accepted only after an explicit confirmation.
fn prompt_disk_count(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<u32> {
    loop {
        prompt("Number of disks: ")?;
        let line = next_line(lines)?;

        let nr_disks = match parse_disk_count(&line) {
            Ok(nr_disks) => nr_disks,
            Err(err) => {
                println!("Invalid input: {err}");
                continue;
            }
        };

        if nr_disks > SOFT_DISK_LIMIT {
            println!(
                "{nr_disks} disks take {} moves to solve.",
                optimal_nr_moves(nr_disks)
            );
            prompt("Continue anyway? [y/N] ")?;
            if !is_confirmation(&next_line(lines)?) {
                continue;
            }
        }

        return Ok(nr_disks);
    }
}

fn prompt_enter(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    text: &str,
) -> anyhow::Result<()> {
    prompt(text)?;
    next_line(lines)?;
    Ok(())
}

fn prompt(text: &str) -> anyhow::Result<()> {
    print!("{text}");
    io::stdout().flush().context("flushing prompt")?;
    Ok(())
}

fn next_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> anyhow::Result<String> {
    match lines.next() {
        Some(line) => Ok(line.context("reading from stdin")?),
        None => bail!("stdin closed"),
    }
}

fn parse_disk_count(line: &str) -> anyhow::Result<u32> {
    let trimmed = line.trim();
    let nr_disks: u32 = trimmed
        .parse()
        .map_err(|_| anyhow!("'{trimmed}' is not a positive number"))?;
    if nr_disks == 0 {
        bail!("disk count must be at least 1");
    }
    Ok(nr_disks)
}

fn is_confirmation(line: &str) -> bool {
    matches!(line.trim(), "y" | "Y" | "yes")
}

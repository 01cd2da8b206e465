use colored::Colorize;

use crate::towers::{Move, PegId, Towers};

const PEG_GAP: &str = "   ";
const ROD: char = '|';

/// Column width for one peg, wide enough for the largest disk.
fn peg_width(nr_disks: u32) -> usize {
    (2 * nr_disks as usize).saturating_sub(1).max(1)
}

/// One rendered slot: a centered disk fill or a bare rod.
fn disk_cell(disk: Option<u32>, width: usize) -> String {
    match disk {
        Some(size) => {
            let fill = 2 * size as usize - 1;
            let pad = (width - fill) / 2;
            format!("{}{}{}", " ".repeat(pad), "=".repeat(fill), " ".repeat(pad))
        }
        None => {
            let pad = (width - 1) / 2;
            format!("{}{}{}", " ".repeat(pad), ROD, " ".repeat(pad))
        }
    }
}

fn border(width: usize) -> String {
    "-".repeat(3 * width + 2 * PEG_GAP.len())
}

fn label_row(width: usize) -> String {
    let pad = (width - 1) / 2;
    PegId::ALL
        .map(|id| format!("{}{}{}", " ".repeat(pad), id, " ".repeat(pad)))
        .join(PEG_GAP)
}

/// Plain diagram of the current state: one row per level from the top down,
/// framed by border lines, peg labels beneath. No color, no header.
pub fn diagram(towers: &Towers) -> String {
    let width = peg_width(towers.nr_disks());
    let mut out = String::new();

    out.push_str(&border(width));
    out.push('\n');
    for level in (1..=towers.nr_disks() as usize).rev() {
        let row = PegId::ALL
            .map(|id| disk_cell(towers.disk_at(id, level), width))
            .join(PEG_GAP);
        out.push_str(&row);
        out.push('\n');
    }
    out.push_str(&border(width));
    out.push('\n');
    out.push_str(&label_row(width));
    out.push('\n');
    out
}

/// Print the starting layout before any move.
pub fn print_initial(towers: &Towers) {
    println!();
    println!("Initial state:");
    print!("{}", diagram(towers));
}

/// Print the state after `mv`, highlighting the disk that just landed and
/// the slot it vacated.
pub fn print_after_move(towers: &Towers, mv: Move, nr_move: u64) {
    let width = peg_width(towers.nr_disks());

    // the moved disk now tops the destination peg; the level above the
    // source peg's new top just became free
    let landed = (mv.dst, towers.peg(mv.dst).height());
    let vacated = (mv.src, towers.peg(mv.src).height() + 1);

    println!();
    println!("Move {nr_move}: {mv}");
    println!("{}", border(width));
    for level in (1..=towers.nr_disks() as usize).rev() {
        for (i, id) in PegId::ALL.into_iter().enumerate() {
            if i > 0 {
                print!("{PEG_GAP}");
            }

            let disk = towers.disk_at(id, level);
            if (id, level) == landed || (id, level) == vacated {
                print_cell_highlighted(disk, width);
            } else {
                print!("{}", disk_cell(disk, width));
            }
        }
        println!();
    }
    println!("{}", border(width));
    println!("{}", label_row(width));
}

fn print_cell_highlighted(disk: Option<u32>, width: usize) {
    match disk {
        Some(size) => {
            let fill = 2 * size as usize - 1;
            let pad = (width - fill) / 2;
            print!(
                "{}{}{}",
                " ".repeat(pad),
                "=".repeat(fill).on_red(),
                " ".repeat(pad)
            );
        }
        None => {
            let pad = (width - 1) / 2;
            print!(
                "{}{}{}",
                " ".repeat(pad),
                ROD.to_string().on_blue(),
                " ".repeat(pad)
            );
        }
    }
}

use std::io::{self, Write};

use colored::Colorize;
use ising_sim::IsingLattice;

/// Clear the terminal and draw the lattice as a two-colour heatmap.
///
/// Each site is two cells wide so the grid looks roughly square.
pub fn draw_frame(out: &mut impl Write, lattice: &IsingLattice, status: &str) -> io::Result<()> {
    // home the cursor and clear the screen
    write!(out, "\x1b[H\x1b[2J")?;
    writeln!(out, "{status}")?;

    let cols = lattice.cols();
    for row in lattice.spins().chunks(cols) {
        let mut line = String::with_capacity(cols * 24);
        for &s in row {
            let cell = if s > 0 { "  ".on_red() } else { "  ".on_blue() };
            line.push_str(&cell.to_string());
        }
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#![cfg(feature = "std")]

use crate::{
    common::CellState,
    config::GRID_SIZE,
    grid::{Cell, Grid},
    scheduler::Match,
    strategy::ProbabilityMatrix,
    Coord,
};

fn print_column_header(width: usize) {
    std::print!("   ");
    for c in 0..GRID_SIZE {
        let ch = (b'A' + c as u8) as char;
        std::print!(" {:>width$}", ch, width = width);
    }
    std::println!();
}

fn glyph(cell: Cell, reveal: bool) -> char {
    match (cell, reveal) {
        (Cell::Ship, true) => '■',
        (Cell::Hit, _) => '✗',
        (Cell::Miss, _) => '·',
        _ => '~',
    }
}

/// Print a grid. With `reveal` unset, unfired ship cells look like water.
pub fn print_grid(title: &str, grid: &Grid, reveal: bool) {
    std::println!("\n{}", title);
    print_column_header(1);
    for r in 0..GRID_SIZE {
        std::print!("{:2} ", r + 1);
        for c in 0..GRID_SIZE {
            let cell = grid.get(Coord::new(r, c)).unwrap_or_default();
            std::print!(" {}", glyph(cell, reveal));
        }
        std::println!();
    }
}

/// Print a probability matrix, blanking cells that are already resolved.
pub fn print_probability_board(pdf: &ProbabilityMatrix, grid: &Grid) {
    std::println!("\nProbability distribution:");
    print_column_header(4);
    for r in 0..GRID_SIZE {
        std::print!("{:2} ", r + 1);
        for c in 0..GRID_SIZE {
            let coord = Coord::new(r, c);
            match grid.state(coord) {
                CellState::Unknown => std::print!(" {:4.2}", pdf.get(coord)),
                _ => std::print!(" {:>4}", "--"),
            }
        }
        std::println!();
    }
}

/// Both boards of a match, plus the opponent's heatmap when it keeps one.
pub fn print_match(m: &Match) {
    print_grid("Enemy waters", m.computer_grid(), false);
    print_grid("Your fleet", m.human_grid(), true);
    if let Some(pdf) = m.opponent().heatmap() {
        print_probability_board(pdf, m.human_grid());
    }
    std::println!(
        "\nOpponent: {} | your shots: {} | its shots: {}",
        m.opponent().name(),
        m.shots_by(crate::Side::Human),
        m.shots_by(crate::Side::Computer),
    );
}

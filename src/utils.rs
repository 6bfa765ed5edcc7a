//! Some utility functions

use chrono::{Local, NaiveDate};

use crate::board::{Board, BoardEntry};

/// The current local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A debug utility that pretty-prints a board, column by column
pub fn print_board(board: &Board) {
    println!("TODO ({})", board.todo.len());
    for entry in &board.todo {
        print_entry(entry);
    }
    println!("DONE ({})", board.done.len());
    for entry in &board.done {
        print_entry(entry);
    }
}

pub fn print_entry(entry: &BoardEntry) {
    println!("    {}", format_entry(entry));
}

/// Format a single line, e.g. `✓  Learn Go  [2024-06-01 → 2024-06-03]  (id 1)`
pub fn format_entry(entry: &BoardEntry) -> String {
    let task = &entry.task;
    let completion = if task.completed() { "✓" } else { " " };
    let overdue = if entry.overdue { "!" } else { " " };
    let dates = match (task.start_date(), task.end_date()) {
        (None, None) => String::new(),
        (start, end) => format!("  [{} → {}]", format_date(start), format_date(end)),
    };
    format!("{}{} {}{}\t(id {})", completion, overdue, task.text(), dates, task.id())
}

fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "…".to_string(),
    }
}

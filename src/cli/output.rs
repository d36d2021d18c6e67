//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::models::{Session, Teacher};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

fn header(names: &[&str]) -> Vec<Cell> {
    names.iter().map(|n| Cell::new(n).fg(Color::Cyan)).collect()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn id_cell(id: Option<i64>) -> Cell {
    Cell::new(id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()))
}

/// Print a table of teachers
pub fn print_teacher_table(teachers: &[Teacher]) {
    if teachers.is_empty() {
        info("No teachers found. Add one with 'yoga-studio add-teacher'");
        return;
    }

    let mut table = new_table();
    table.set_header(header(&["ID", "First name", "Last name"]));

    for teacher in teachers {
        table.add_row(vec![
            id_cell(teacher.id),
            Cell::new(&teacher.first_name),
            Cell::new(&teacher.last_name),
        ]);
    }

    println!("{table}");
}

/// Print a table of sessions
pub fn print_session_table(sessions: &[Session]) {
    if sessions.is_empty() {
        info("No sessions scheduled");
        return;
    }

    let mut table = new_table();
    table.set_header(header(&["ID", "Name", "Date", "Teacher", "Participants"]));

    for session in sessions {
        let teacher = match session.teacher_id {
            Some(id) => Cell::new(id),
            None => Cell::new("none").fg(Color::Yellow),
        };

        table.add_row(vec![
            id_cell(session.id),
            Cell::new(&session.name),
            Cell::new(session.date.format("%Y-%m-%d %H:%M").to_string()),
            teacher,
            Cell::new(session.users.len()),
        ]);
    }

    println!("{table}");
}

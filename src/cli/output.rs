//! Colored terminal output for location listings and diagnostics
//!
//! `colored` honours NO_COLOR and CLICOLOR_FORCE.

use std::fmt::Display;

use colored::Colorize;

pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Data problems that do not stop the command, e.g. orphaned locations.
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow(), msg);
}

pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// `  label: value`, labels right-aligned so stats columns line up.
pub fn field(label: &str, value: &(impl Display + ?Sized)) {
    println!("  {:>20}: {}", label.green(), value);
}

pub fn header(title: &(impl Display + ?Sized)) {
    println!("{}", title.to_string().cyan().bold());
}

/// Indented line under a header, e.g. child locations in `show`.
pub fn detail(msg: &(impl Display + ?Sized)) {
    println!("    {}", msg);
}

/// Tab-separated data row for scripting; never colored.
pub fn row<I, T>(columns: I)
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    let line = columns
        .into_iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("\t");
    println!("{}", line);
}

/// Raw text such as rendered TOML.
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}

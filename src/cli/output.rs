//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
//! Every helper writes to the given writer so the menu can run against
//! any `Write`.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

/// Print error (red bold "Error:" prefix)
pub fn error(out: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}: {}", "Error".red().bold(), msg)
}

/// Print warning (yellow "Warning:" prefix)
pub fn warning(out: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}: {}", "Warning".yellow(), msg)
}

/// Print completed action (green label)
pub fn action(out: &mut impl Write, label: &str, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}: {}", label.green(), msg)
}

/// Print section header (cyan bold)
pub fn header(out: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg.to_string().cyan().bold())
}

/// Print indented detail (no color)
pub fn detail(out: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "  {}", msg)
}

/// Print plain output (no color, for data lines)
pub fn info(out: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg)
}

/// Print prompt without newline (cyan)
pub fn prompt(out: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    write!(out, "{} ", msg.to_string().cyan())?;
    out.flush()
}

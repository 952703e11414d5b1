//! Interactive menu loop
//!
//! Reads choices line by line from any `BufRead` and writes to any `Write`,
//! so the loop runs the same against a terminal or an in-memory buffer.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::{debug, instrument};

use crate::application::services::{CatalogService, LoadReport};
use crate::application::ApplicationResult;
use crate::cli::output;
use crate::cli::CliResult;
use crate::domain::Course;
use crate::infrastructure::InfraError;

/// Menu choices, keyed by the number the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Load,
    List,
    Show,
    Exit,
}

impl MenuChoice {
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(Self::Load),
            2 => Some(Self::List),
            3 => Some(Self::Show),
            9 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Interactive session over one catalog service.
pub struct Menu<'a, R, W> {
    service: &'a mut CatalogService,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(service: &'a mut CatalogService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Run until the user picks Exit or input ends.
    pub fn run(&mut self) -> CliResult<()> {
        self.run_loop()
            .map_err(|e| InfraError::io("menu terminal I/O", e).into())
    }

    /// Load a catalog and print the outcome, as menu choice 1 does.
    pub fn preload(&mut self, path: &Path) -> CliResult<()> {
        self.load_and_report(path)
            .map_err(|e| InfraError::io("menu terminal I/O", e).into())
    }

    fn run_loop(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                debug!("menu: input closed");
                return Ok(());
            };
            let choice_line = line.trim();
            if choice_line.is_empty() {
                continue;
            }

            let Ok(number) = choice_line.parse::<i64>() else {
                output::info(&mut self.output, &format!("{} is not a valid option", choice_line))?;
                continue;
            };

            match MenuChoice::from_number(number) {
                Some(MenuChoice::Load) => self.load()?,
                Some(MenuChoice::List) => self.list()?,
                Some(MenuChoice::Show) => self.show()?,
                Some(MenuChoice::Exit) => {
                    output::info(&mut self.output, "Good bye")?;
                    return Ok(());
                }
                None => {
                    output::info(&mut self.output, &format!("{} is not a valid option", number))?
                }
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let out = &mut self.output;
        writeln!(out)?;
        output::header(out, "Menu:")?;
        output::detail(out, "1. Load Data Structure")?;
        output::detail(out, "2. Print Course List")?;
        output::detail(out, "3. Print Course")?;
        output::detail(out, "9. Exit")?;
        output::prompt(out, "Enter choice:")
    }

    /// Next input line without its terminator, `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        output::prompt(&mut self.output, question)?;
        Ok(self.read_line()?.unwrap_or_default().trim().to_string())
    }

    #[instrument(level = "debug", skip(self))]
    fn load(&mut self) -> io::Result<()> {
        let file_name = self.ask("Enter file name to load:")?;
        if file_name.is_empty() {
            return output::info(&mut self.output, "No file name entered");
        }
        self.load_and_report(Path::new(&file_name))
    }

    fn load_and_report(&mut self, path: &Path) -> io::Result<()> {
        let result = self.service.load(path);
        report_load(&mut self.output, &result)
    }

    fn list(&mut self) -> io::Result<()> {
        match self.service.list() {
            Ok(courses) => {
                for course in courses {
                    output::info(&mut self.output, course)?;
                }
                Ok(())
            }
            Err(e) => output::info(&mut self.output, &e),
        }
    }

    fn show(&mut self) -> io::Result<()> {
        if !self.service.is_loaded() {
            return output::info(&mut self.output, "Please load the data structure first");
        }
        let query = self.ask("Enter course number:")?;
        match self.service.show(&query) {
            Ok(course) => write_course(&mut self.output, course),
            Err(e) => output::info(&mut self.output, &e),
        }
    }
}

/// Print warnings and the loaded count, or the failure.
pub fn report_load(out: &mut impl Write, result: &ApplicationResult<LoadReport>) -> io::Result<()> {
    match result {
        Ok(report) => {
            for warning in &report.warnings {
                output::warning(out, warning)?;
            }
            output::action(out, "Courses loaded", &report.loaded)
        }
        Err(e) => output::error(out, e),
    }
}

/// Print a course line followed by its prerequisites line.
pub fn write_course(out: &mut impl Write, course: &Course) -> io::Result<()> {
    output::info(out, course)?;
    output::info(out, &format!("Prerequisites: {}", course.prerequisites_display()))
}

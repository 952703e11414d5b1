//! Tests for the interactive menu loop driven by scripted input

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use coursetree::application::services::CatalogService;
use coursetree::cli::menu::{Menu, MenuChoice};
use coursetree::infrastructure::traits::RealFileSystem;
use coursetree::util::testing;

fn create_catalog(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write catalog file");
    path
}

/// Run the menu over `script` and return everything it printed.
fn run_script(service: &mut CatalogService, script: &str) -> String {
    testing::init_test_setup();
    let mut output = Vec::new();
    Menu::new(service, Cursor::new(script.to_string()), &mut output)
        .run()
        .expect("menu run");
    String::from_utf8(output).expect("utf8 output")
}

fn service() -> CatalogService {
    CatalogService::new(Arc::new(RealFileSystem))
}

#[test]
fn given_menu_numbers_then_map_to_choices() {
    assert_eq!(MenuChoice::from_number(1), Some(MenuChoice::Load));
    assert_eq!(MenuChoice::from_number(2), Some(MenuChoice::List));
    assert_eq!(MenuChoice::from_number(3), Some(MenuChoice::Show));
    assert_eq!(MenuChoice::from_number(9), Some(MenuChoice::Exit));
    assert_eq!(MenuChoice::from_number(4), None);
}

#[test]
fn given_load_list_show_script_when_running_then_prints_catalog() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_catalog(
        &temp,
        "courses.csv",
        "MATH100,College Algebra\nCS201,Data Structures,CS101,math100\nCS101,Intro to CS\n",
    );
    let script = format!("1\n{}\n2\n3\ncs201\n3\ncs101\n9\n", path.display());
    let mut service = service();

    // Act
    let out = run_script(&mut service, &script);

    // Assert
    assert!(out.contains("Menu:"));
    assert!(out.contains("  1. Load Data Structure"));
    assert!(out.contains("Enter file name to load: "));
    assert!(out.contains("Courses loaded: 3"));
    assert!(out.contains("CS101, Intro to CS\nCS201, Data Structures\nMATH100, College Algebra\n"));
    assert!(out.contains("CS201, Data Structures\nPrerequisites: CS101, MATH100\n"));
    assert!(out.contains("CS101, Intro to CS\nPrerequisites: None\n"));
    assert!(out.trim_end().ends_with("Good bye"));
}

#[test]
fn given_empty_tree_when_listing_or_showing_then_asks_to_load_first() {
    let mut service = service();

    let out = run_script(&mut service, "2\n3\n9\n");

    assert_eq!(out.matches("Please load the data structure first").count(), 2);
    assert!(!out.contains("Enter course number:"));
}

#[test]
fn given_invalid_choices_when_running_then_reports_and_continues() {
    let mut service = service();

    let out = run_script(&mut service, "abc\n\n7\n9\n");

    assert!(out.contains("abc is not a valid option"));
    assert!(out.contains("7 is not a valid option"));
    // blank line re-prompts: four menus for three non-blank and one blank line
    assert_eq!(out.matches("Enter choice:").count(), 4);
    assert!(out.contains("Good bye"));
}

#[test]
fn given_missing_file_when_loading_then_reports_error_and_keeps_catalog() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "courses.csv", "CS101,Intro to CS\n");
    let missing = temp.path().join("nope.csv");
    let script = format!("1\n{}\n1\n{}\n2\n9\n", path.display(), missing.display());
    let mut service = service();

    let out = run_script(&mut service, &script);

    assert!(out.contains(&format!("Error: could not open file {}", missing.display())));
    assert!(out.contains("CS101, Intro to CS"));
    assert_eq!(service.tree().len(), 1);
}

#[test]
fn given_malformed_line_when_loading_then_warns_with_line_number() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "courses.csv", "CS101,Intro\nBROKEN\nCS201,Data Structures\n");
    let script = format!("1\n{}\n9\n", path.display());
    let mut service = service();

    let out = run_script(&mut service, &script);

    assert_eq!(out.matches("line 2 missing fields").count(), 1);
    assert!(out.contains("Warning: line 2 missing fields and will be skipped"));
    assert!(out.contains("Courses loaded: 2"));
}

#[test]
fn given_blank_answers_when_prompted_then_reports_missing_input() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "courses.csv", "CS101,Intro\n");
    let script = format!("1\n\n1\n{}\n3\n  \n3\nCS999\n9\n", path.display());
    let mut service = service();

    let out = run_script(&mut service, &script);

    assert!(out.contains("No file name entered"));
    assert!(out.contains("No course number entered"));
    assert!(out.contains("Course not found"));
}

#[test]
fn given_input_ends_without_exit_when_running_then_returns() {
    let mut service = service();

    let out = run_script(&mut service, "2\n");

    assert!(out.contains("Please load the data structure first"));
    assert!(!out.contains("Good bye"));
}

#[test]
fn given_preload_when_running_then_catalog_available_immediately() {
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "courses.csv", "CS101,Intro to CS\n");
    let mut service = service();
    let mut output = Vec::new();

    {
        let mut menu = Menu::new(&mut service, Cursor::new("2\n9\n"), &mut output);
        menu.preload(&path).unwrap();
        menu.run().unwrap();
    }

    let out = String::from_utf8(output).unwrap();
    let loaded_at = out.find("Courses loaded: 1").expect("preload reported");
    let menu_at = out.find("Menu:").expect("menu shown");
    assert!(loaded_at < menu_at);
    assert!(out.contains("CS101, Intro to CS"));
}

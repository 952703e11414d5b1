//! Tests for the one-shot list, show, tree and config commands

use std::path::{Path, PathBuf};

use rstest::rstest;
use tempfile::TempDir;

use coursetree::cli::commands::{run_config, run_list, run_show, run_tree};
use coursetree::config::Settings;
use coursetree::exitcode;
use coursetree::infrastructure::di::ServiceContainer;
use coursetree::util::testing;

fn create_catalog(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write catalog file");
    path
}

fn container() -> ServiceContainer {
    testing::init_test_setup();
    ServiceContainer::new(Settings::default())
}

fn text(buf: Vec<u8>) -> String {
    String::from_utf8(buf).expect("utf8 output")
}

#[test]
fn given_catalog_when_listing_then_sorted_lines_on_stdout() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(
        &temp,
        "courses.csv",
        "MATH100,College Algebra\nCS201,Data Structures,CS101\nCS101,Intro to CS\n",
    );
    let (mut out, mut err) = (Vec::new(), Vec::new());

    run_list(&container(), &path, &mut out, &mut err).unwrap();

    assert_eq!(
        text(out),
        "CS101, Intro to CS\nCS201, Data Structures\nMATH100, College Algebra\n"
    );
    assert!(err.is_empty());
}

#[test]
fn given_catalog_when_showing_then_prints_prerequisites_line() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(
        &temp,
        "courses.csv",
        "CS101,Intro to CS\nCS201,Data Structures,CS101\n",
    );
    let (mut out, mut err) = (Vec::new(), Vec::new());

    run_show(&container(), &path, " cs201", &mut out, &mut err).unwrap();

    assert_eq!(text(out), "CS201, Data Structures\nPrerequisites: CS101\n");
}

#[test]
fn given_course_without_prerequisites_when_showing_then_prints_none() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "courses.csv", "CS101,Intro to CS\n");
    let (mut out, mut err) = (Vec::new(), Vec::new());

    run_show(&container(), &path, "CS101", &mut out, &mut err).unwrap();

    assert_eq!(text(out), "CS101, Intro to CS\nPrerequisites: None\n");
}

#[test]
fn given_unknown_course_when_showing_then_not_found_exit_code() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "courses.csv", "CS101,Intro to CS\n");
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let result = run_show(&container(), &path, "CS999", &mut out, &mut err);

    let e = result.unwrap_err();
    assert_eq!(e.exit_code(), exitcode::NOT_FOUND);
    assert_eq!(e.to_string(), "Course not found");
    assert!(out.is_empty());
}

#[test]
fn given_catalog_when_printing_tree_then_layout_size_and_depth() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "courses.csv", "M1,Middle\nC1,Lower\nX1,Higher\n");
    let (mut out, mut err) = (Vec::new(), Vec::new());

    run_tree(&container(), &path, &mut out, &mut err).unwrap();

    let printed = text(out);
    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines[0], "M1");
    assert!(lines[1].ends_with("< C1"));
    assert!(lines[2].ends_with("> X1"));
    assert_eq!(&lines[3..], ["Courses: 3", "Depth: 2"]);
}

#[test]
fn given_malformed_line_when_running_one_shot_then_warning_on_stderr_only() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "courses.csv", "CS101,Intro to CS\nMATH201\n");
    let (mut out, mut err) = (Vec::new(), Vec::new());

    run_list(&container(), &path, &mut out, &mut err).unwrap();

    assert_eq!(text(out), "CS101, Intro to CS\n");
    assert_eq!(
        text(err),
        "Warning: line 2 missing fields and will be skipped\n"
    );
}

#[rstest]
#[case::list("list")]
#[case::show("show")]
#[case::tree("tree")]
fn given_missing_file_when_running_one_shot_then_noinput(#[case] command: &str) {
    let container = container();
    let path = Path::new("/nonexistent/courses.csv");
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let result = match command {
        "list" => run_list(&container, path, &mut out, &mut err),
        "show" => run_show(&container, path, "CS101", &mut out, &mut err),
        _ => run_tree(&container, path, &mut out, &mut err),
    };

    let e = result.unwrap_err();
    assert_eq!(e.exit_code(), exitcode::NOINPUT);
    assert_eq!(e.to_string(), "could not open file /nonexistent/courses.csv");
    assert!(out.is_empty());
}

#[test]
fn given_settings_when_printing_config_then_toml_dump() {
    let mut out = Vec::new();

    run_config(&container(), &mut out).unwrap();

    let printed = text(out);
    assert!(printed.starts_with("Config file: "));
    assert!(printed.contains("delimiter = \",\""));
    assert!(printed.contains("color = true"));
}

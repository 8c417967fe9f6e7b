//! Integration tests for the sankey-svg binary.
//!
//! These tests run the compiled binary over the sample flow tables in `demos/`
//! and check the structure of the SVG it writes.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sankey-svg"))
}

fn demos_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("demos");
    path
}

fn demo(name: &str) -> String {
    let path = demos_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Cannot read {:?}: {}", path, e))
}

/// Run the binary with the given stdin input and extra CLI args.
fn run(input: &str, extra_args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(extra_args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            if let Some(ref mut stdin) = child.stdin {
                stdin.write_all(input.as_bytes()).ok();
            }
            child.wait_with_output()
        })
        .expect("Failed to run binary")
}

/// Run the binary and return stdout, asserting success.
fn run_ok(input: &str, extra_args: &[&str]) -> String {
    let output = run(input, extra_args);
    assert!(
        output.status.success(),
        "Binary exited with {:?}:\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Non-UTF8 output")
}

/// Run the binary and return stderr, asserting failure with exit code 1.
fn run_err(input: &str, extra_args: &[&str]) -> String {
    let output = run(input, extra_args);
    assert_eq!(output.status.code(), Some(1), "expected exit code 1");
    assert!(output.stdout.is_empty(), "nothing is drawn on failure");
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ─── Demo inputs ────────────────────────────────────────────────────────────

#[test]
fn test_all_demos_render() {
    let mut names: Vec<String> = fs::read_dir(demos_dir())
        .expect("demos directory exists")
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".csv"))
        .collect();
    names.sort();
    assert!(!names.is_empty(), "No demo inputs found in {:?}", demos_dir());

    for name in &names {
        let src = demo(name);
        let svg = run_ok(&src, &[]);
        assert!(svg.starts_with("<svg "), "{name}: not an SVG document");
        assert!(svg.ends_with("</svg>"), "{name}: unterminated SVG");

        let flows = src
            .lines()
            .skip(1)
            .filter(|l| !l.trim().is_empty() && !l.trim_start().starts_with("%%"))
            .count();
        assert_eq!(svg.matches("<path ").count(), flows, "{name}: one path per flow");
    }
}

#[test]
fn test_energy_demo_structure() {
    let svg = run_ok(&demo("energy.csv"), &["--units", "TWh"]);
    assert_eq!(svg.matches("<path ").count(), 68);
    assert_eq!(svg.matches("<rect ").count(), 48);
    assert_eq!(svg.matches("<text ").count(), 48);
    assert!(svg.contains("<title>Nuclear\n840 TWh</title>"));
    assert!(svg.contains(r#"id="linkGrad-SolarSolarPV""#));
    assert!(svg.contains("Lighting &amp; appliances - homes"));
}

#[test]
fn test_quoted_names() {
    let svg = run_ok(&demo("simple.csv"), &[]);
    assert!(svg.contains("<title>Solar, rooftop\n42</title>"));
    assert!(svg.contains(r#"id="linkGrad-SolarrooftopGrid""#));
}

// ─── Flag tests ─────────────────────────────────────────────────────────────

#[test]
fn test_canvas_flags() {
    let svg = run_ok(&demo("simple.csv"), &["--width", "400", "--height", "300"]);
    assert!(svg.contains(r#"width="400" height="300" viewBox="0 0 400 300""#));
}

#[test]
fn test_edge_color_none() {
    let svg = run_ok(&demo("simple.csv"), &["--edge-color", "none"]);
    assert!(!svg.contains("linearGradient"));
    assert_eq!(svg.matches(r##"stroke="#aaa""##).count(), 3);
}

#[test]
fn test_all_alignments_render() {
    let src = demo("energy.csv");
    for align in ["left", "right", "center", "justify"] {
        let svg = run_ok(&src, &["--align", align]);
        assert_eq!(svg.matches("<path ").count(), 68, "align={align}");
    }
}

#[test]
fn test_output_file() {
    let out = std::env::temp_dir().join(format!("sankey-svg-e2e-{}.svg", std::process::id()));
    let out_str = out.to_string_lossy().into_owned();
    let stdout = run_ok(&demo("simple.csv"), &["-o", &out_str]);
    assert!(stdout.is_empty());
    let written = fs::read_to_string(&out).expect("output file written");
    assert!(written.starts_with("<svg "));
    fs::remove_file(&out).ok();
}

#[test]
fn test_input_file_argument() {
    let path = demos_dir().join("simple.csv");
    let output = Command::new(binary_path())
        .arg(&path)
        .output()
        .expect("Failed to run binary");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("<svg "));
}

#[test]
fn test_empty_input_renders_nothing() {
    assert_eq!(run_ok("sankey-beta\n", &[]), "");
}

// ─── Error reporting ────────────────────────────────────────────────────────

#[test]
fn test_parse_error_exit_code() {
    let stderr = run_err("sankey-beta\nA,B\n", &[]);
    assert!(stderr.contains("error: line 2: expected 3 fields"), "stderr: {stderr}");
}

#[test]
fn test_cycle_error_exit_code() {
    let stderr = run_err("A,B,1\nB,A,1\n", &[]);
    assert!(stderr.contains("circular link"), "stderr: {stderr}");
}

#[test]
fn test_unknown_alignment_rejected() {
    let output = run("A,B,1\n", &["--align", "diagonal"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("diagonal"));
}

#[test]
fn test_missing_input_file() {
    let stderr = run_err("", &["/nonexistent/flows.csv"]);
    assert!(stderr.contains("error: cannot read"));
}

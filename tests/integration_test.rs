use image::ColorType;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs the `daypilot-icon` binary inside `work_dir` with the given arguments.
fn run_icon_gen(work_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_daypilot-icon"))
        .current_dir(work_dir)
        .args(args)
        .output()
        .expect("Failed to run daypilot-icon command")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("daypilot-icon command failed");
    }
}

/// Checks both icons under `icons_dir` decode with the expected size and color mode
fn verify_icons(icons_dir: &Path, size: u32) {
    let icon_path = icons_dir.join("app_icon.png");
    let foreground_path = icons_dir.join("app_icon_foreground.png");

    assert!(
        icon_path.exists(),
        "App icon should exist at: {}",
        icon_path.display()
    );
    assert!(
        foreground_path.exists(),
        "Foreground icon should exist at: {}",
        foreground_path.display()
    );

    let icon = image::open(&icon_path).expect("Failed to load app icon");
    assert_eq!(icon.width(), size);
    assert_eq!(icon.height(), size);
    assert_eq!(icon.color(), ColorType::Rgb8, "App icon should be opaque RGB");

    let foreground = image::open(&foreground_path).expect("Failed to load foreground icon");
    assert_eq!(foreground.width(), size);
    assert_eq!(foreground.height(), size);
    assert_eq!(
        foreground.color(),
        ColorType::Rgba8,
        "Foreground icon should carry an alpha channel"
    );
    assert_eq!(foreground.to_rgba8().get_pixel(0, 0)[3], 0);
}

/// Running without arguments in an empty directory writes both icons under
/// assets/icons, and the run can be repeated after deleting the output
#[test]
fn test_default_run_in_empty_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let work_dir = temp_dir.path();
    let icons_dir = work_dir.join("assets").join("icons");

    let output = run_icon_gen(work_dir, &[]);
    assert_success(&output);
    verify_icons(&icons_dir, 1024);

    std::fs::remove_dir_all(work_dir.join("assets")).expect("Failed to remove assets");
    assert!(!icons_dir.exists());

    let output = run_icon_gen(work_dir, &[]);
    assert_success(&output);
    verify_icons(&icons_dir, 1024);
}

#[test]
fn test_repeated_runs_are_idempotent() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let work_dir = temp_dir.path();
    let icons_dir = work_dir.join("assets").join("icons");

    assert_success(&run_icon_gen(work_dir, &[]));
    let first = std::fs::read(icons_dir.join("app_icon.png")).expect("Failed to read icon");

    assert_success(&run_icon_gen(work_dir, &[]));
    let second = std::fs::read(icons_dir.join("app_icon.png")).expect("Failed to read icon");

    verify_icons(&icons_dir, 1024);
    assert_eq!(first, second, "Rerunning should produce identical output");
}

#[test]
fn test_custom_output_size_and_colors() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let work_dir = temp_dir.path();

    let output = run_icon_gen(
        work_dir,
        &[
            "-o",
            "out/launcher",
            "--size",
            "256",
            "--primary",
            "#10b981",
            "--secondary",
            "#065f46",
        ],
    );
    assert_success(&output);

    let icons_dir = work_dir.join("out").join("launcher");
    verify_icons(&icons_dir, 256);

    let icon = image::open(icons_dir.join("app_icon.png"))
        .expect("Failed to load app icon")
        .to_rgb8();
    assert_eq!(icon.get_pixel(0, 0).0, [0x10, 0xb9, 0x81]);
}

#[test]
fn test_too_small_size_fails_without_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let work_dir = temp_dir.path();

    let output = run_icon_gen(work_dir, &["--size", "16"]);
    assert!(!output.status.success(), "A 16px icon should be rejected");
    assert!(!work_dir.join("assets").exists());
}

#[test]
fn test_invalid_color_fails_without_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let work_dir = temp_dir.path();

    let output = run_icon_gen(work_dir, &["--primary", "not-a-color"]);
    assert!(!output.status.success(), "An invalid color should be rejected");
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("Invalid color"),
        "stderr should explain the failure"
    );
    assert!(!work_dir.join("assets").exists());
}

#[test]
fn test_unwritable_output_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let work_dir = temp_dir.path();
    std::fs::write(work_dir.join("assets"), b"").expect("Failed to create blocker file");

    let output = run_icon_gen(work_dir, &[]);
    assert!(!output.status.success());
}

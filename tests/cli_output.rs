use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use liquidglass::cli::{CliArgs, run};
use liquidglass::generate;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("liquidglass-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn writes_png_and_svg_filter() {
    let dir = scratch_dir("single");
    let out = dir.join("button.png");
    let args = CliArgs::try_parse_from([
        "liquid-glass",
        "--no-settings",
        "-s",
        "100x60",
        "-r",
        "20",
        "-b",
        "10",
        "-o",
        out.to_str().unwrap(),
        "--svg",
    ])
    .unwrap();

    assert!(run(args) == ExitCode::SUCCESS);

    let written = image::open(&out).unwrap().into_rgba8();
    let expected = generate(100, 60, 20.0, 10.0).unwrap().unwrap();
    assert_eq!(written.as_raw(), expected.as_raw());
    assert_eq!(written.get_pixel(50, 30).0, [128, 128, 128, 255]);

    let svg = std::fs::read_to_string(dir.join("button.svg")).unwrap();
    assert!(svg.contains("href=\"button.png\""));
    assert!(svg.contains("scale=\"20\""));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn batch_into_output_dir() {
    let dir = scratch_dir("batch");
    let args = CliArgs::try_parse_from([
        "liquid-glass",
        "--no-settings",
        "-s",
        "32x16",
        "48x48",
        "--output-dir",
        dir.to_str().unwrap(),
        "--format",
        "raw",
    ])
    .unwrap();

    assert!(run(args) == ExitCode::SUCCESS);

    let raw = std::fs::read(dir.join("displacement_32x16.rgba")).unwrap();
    assert_eq!(raw.len(), 32 * 16 * 4);
    assert!(dir.join("displacement_48x48.rgba").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn degenerate_size_fails_without_output() {
    let dir = scratch_dir("degenerate");
    let out = dir.join("empty.png");
    let args = CliArgs::try_parse_from([
        "liquid-glass",
        "--no-settings",
        "-s",
        "0x60",
        "-o",
        out.to_str().unwrap(),
    ])
    .unwrap();

    assert!(run(args) == ExitCode::FAILURE);
    assert!(!out.exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn lossy_format_is_rejected() {
    let dir = scratch_dir("lossy");
    let out = dir.join("map.jpg");
    let args = CliArgs::try_parse_from([
        "liquid-glass",
        "--no-settings",
        "-s",
        "10x10",
        "-o",
        out.to_str().unwrap(),
    ])
    .unwrap();

    assert!(run(args) == ExitCode::FAILURE);
    assert!(!out.exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn single_output_with_several_sizes_is_rejected() {
    let dir = scratch_dir("conflict");
    let out = dir.join("one.png");
    let args = CliArgs::try_parse_from([
        "liquid-glass",
        "--no-settings",
        "-s",
        "32x16",
        "48x48",
        "-o",
        out.to_str().unwrap(),
        "--output-dir",
        dir.to_str().unwrap(),
    ])
    .unwrap();

    assert!(run(args) == ExitCode::FAILURE);
    assert!(!out.exists());
    assert!(!dir.join("displacement_32x16.png").exists());
    assert!(!dir.join("displacement_48x48.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

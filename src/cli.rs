// ============================================================================
// liquid-glass CLI — render displacement maps to files
// ============================================================================
//
// Usage examples:
//   liquid-glass --size 320x120 --output button.png
//   liquid-glass -s 320x120 -r 24 -b 12 -o button.png --svg
//   liquid-glass -s 320x120 640x400 --output-dir maps/ --format tiff
//   liquid-glass -s 100x60 --radius 16 --save-settings
//
// Radius, bezel, refraction scale, filter id and format fall back to the saved
// settings file, then to the built-in defaults.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crate::error::GlassError;
use crate::io::{MapFormat, write_map};
use crate::ops::displacement::GlassShape;
use crate::ops::filter::svg_filter;
use crate::settings::GlassSettings;
use crate::{log_err, log_info, log_warn};

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// liquid-glass displacement map generator.
#[derive(Parser, Debug)]
#[command(
    name = "liquid-glass",
    about = "Generate liquid-glass displacement maps for rounded UI elements",
    long_about = "Render per-pixel displacement maps (R = X offset, G = Y offset,\n\
                  128 = no offset) for rounded rectangles with a curved glass bezel.\n\
                  Output is always lossless: PNG, BMP, TGA, TIFF or raw RGBA.\n\n\
                  Example:\n  \
                  liquid-glass --size 320x120 --output button.png --svg\n  \
                  liquid-glass -s 320x120 640x400 --output-dir maps/"
)]
pub struct CliArgs {
    /// Element size(s) as WIDTHxHEIGHT in pixels, e.g. "320x120".
    #[arg(short, long, required = true, num_args = 1.., value_parser = parse_size, value_name = "WxH")]
    pub size: Vec<(u32, u32)>,

    /// Corner radius in pixels.
    #[arg(short, long, value_name = "PX")]
    pub radius: Option<f64>,

    /// Bezel width in pixels (the curved rim of the glass).
    #[arg(short, long, value_name = "PX")]
    pub bezel: Option<f64>,

    /// Output file path. Only valid for a single size.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output directory; files are named displacement_<W>x<H>.<ext>.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format: png, bmp, tga, tiff, raw.
    /// When omitted, inferred from --output's extension, then from settings.
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Also write an SVG filter (feDisplacementMap) next to each map.
    #[arg(long)]
    pub svg: bool,

    /// Displacement scale written into the SVG filter.
    #[arg(long, value_name = "SCALE")]
    pub refraction_scale: Option<f64>,

    /// id attribute of the SVG filter.
    #[arg(long, value_name = "ID")]
    pub filter_id: Option<String>,

    /// Persist the effective radius/bezel/scale/format/id as the new defaults.
    #[arg(long)]
    pub save_settings: bool,

    /// Ignore the saved settings file and start from built-in defaults.
    #[arg(long)]
    pub no_settings: bool,

    /// Print per-map timing information.
    #[arg(short, long)]
    pub verbose: bool,
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run all CLI processing and return an OS exit code.
/// `0` = every map written, `1` = one or more failed.
pub fn run(args: CliArgs) -> ExitCode {
    let mut settings = if args.no_settings {
        GlassSettings::default()
    } else {
        GlassSettings::load()
    };
    apply_overrides(&mut settings, &args);
    log_info!("Settings: {}", settings.to_config_string().replace('\n', " "));

    if let Err(msg) = check_output_target(args.size.len(), args.output.as_deref()) {
        eprintln!("error: {}", msg);
        log_err!("{}", msg);
        return ExitCode::FAILURE;
    }

    let format = match resolve_format(args.format.as_deref(), args.output.as_deref(), &settings) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {}", e);
            log_err!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    settings.output_format = format;

    if args.save_settings {
        match settings.save() {
            Ok(path) => {
                log_info!("Saved settings to {}", path.display());
            }
            Err(e) => {
                eprintln!("warning: could not save settings: {}", e);
                log_warn!("could not save settings: {}", e);
            }
        }
    }

    if let Some(dir) = &args.output_dir
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        eprintln!(
            "error: could not create output directory '{}': {}",
            dir.display(),
            e
        );
        return ExitCode::FAILURE;
    }

    if args.verbose
        && let Some(path) = crate::logger::log_path()
    {
        println!("log: {}", path.display());
    }

    let total = args.size.len();
    let multi = total > 1;
    let mut any_failure = false;

    for (idx, &(width, height)) in args.size.iter().enumerate() {
        if multi || args.verbose {
            println!("[{}/{}] {}x{}", idx + 1, total, width, height);
        }

        let start = Instant::now();
        let shape = GlassShape::new(width, height, settings.border_radius, settings.bezel_width);
        let output_path = build_output_path(
            width,
            height,
            args.output.as_deref(),
            args.output_dir.as_deref(),
            format,
        );

        match run_one(&shape, &output_path, format, args.svg, &settings) {
            Ok(()) => {
                let ms = start.elapsed().as_secs_f64() * 1000.0;
                log_info!("{}x{} -> {} ({:.1}ms)", width, height, output_path.display(), ms);
                if args.verbose || multi {
                    println!("  → {} ({:.0}ms)", output_path.display(), ms);
                }
            }
            Err(e) => {
                eprintln!("  error: {}", e);
                log_err!("{}x{}: {}", width, height, e);
                any_failure = true;
            }
        }
    }

    if any_failure { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

// ============================================================================
// Per-size pipeline
// ============================================================================

fn run_one(
    shape: &GlassShape,
    output: &Path,
    format: MapFormat,
    svg: bool,
    settings: &GlassSettings,
) -> Result<(), GlassError> {
    let map = shape.render()?.ok_or(GlassError::DegenerateInput {
        width: shape.width,
        height: shape.height,
    })?;
    write_map(&map, output, format)?;

    if svg {
        let href = output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let markup = svg_filter(
            &settings.filter_id,
            shape.width,
            shape.height,
            &href,
            settings.refraction_scale,
        );
        std::fs::write(output.with_extension("svg"), markup)?;
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// `--output` names exactly one file, so it cannot take several sizes, even
/// alongside `--output-dir`: every map would land on the same path.
pub fn check_output_target(sizes: usize, output: Option<&Path>) -> Result<(), String> {
    match output {
        Some(out) if sizes > 1 => Err(format!(
            "{} sizes given but --output '{}' names a single file.\n\
             Drop --output and use --output-dir for a batch.",
            sizes,
            out.display()
        )),
        _ => Ok(()),
    }
}

/// Parse "WIDTHxHEIGHT" (also accepts 'X' and '×').
pub fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let w = w.trim().parse::<u32>().map_err(|e| format!("bad width '{}': {}", w, e))?;
    let h = h.trim().parse::<u32>().map_err(|e| format!("bad height '{}': {}", h, e))?;
    Ok((w, h))
}

fn apply_overrides(settings: &mut GlassSettings, args: &CliArgs) {
    if let Some(r) = args.radius {
        settings.border_radius = r;
    }
    if let Some(b) = args.bezel {
        settings.bezel_width = b;
    }
    if let Some(s) = args.refraction_scale {
        settings.refraction_scale = s;
    }
    if let Some(id) = &args.filter_id {
        settings.filter_id = id.clone();
    }
}

/// `--format` wins, then the `--output` extension, then the saved setting.
pub fn resolve_format(
    format_arg: Option<&str>,
    output: Option<&Path>,
    settings: &GlassSettings,
) -> Result<MapFormat, GlassError> {
    if let Some(f) = format_arg {
        return MapFormat::parse(f);
    }
    if let Some(result) = output.and_then(MapFormat::from_path) {
        return result;
    }
    Ok(settings.output_format)
}

/// Explicit `--output` first, then `--output-dir`, then the current directory.
pub fn build_output_path(
    width: u32,
    height: u32,
    output: Option<&Path>,
    output_dir: Option<&Path>,
    format: MapFormat,
) -> PathBuf {
    if let Some(out) = output {
        return out.to_path_buf();
    }
    let name = format!("displacement_{}x{}.{}", width, height, format.extension());
    match output_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

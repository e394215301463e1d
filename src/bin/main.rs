//! ALICE-SDF-Term CLI
//!
//! Render scene descriptions to the terminal with ANSI truecolor.

#![allow(
    clippy::uninlined_format_args,
    clippy::needless_pass_by_value,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::too_many_arguments,
    clippy::doc_markdown
)]

#[cfg(feature = "cli")]
use alice_sdf_term::prelude::*;
#[cfg(feature = "cli")]
use std::io::Write;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "alice-sdf-term")]
#[command(version = alice_sdf_term::VERSION)]
#[command(about = "ALICE-SDF-Term: SIMD SDF raymarcher for the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Render a scene description to the terminal
    Render {
        /// Scene description (.json); the demo scene if omitted
        file: Option<PathBuf>,
        /// Native pixel width
        #[arg(short = 'W', long, default_value = "96")]
        width: u32,
        /// Native pixel height
        #[arg(short = 'H', long, default_value = "48")]
        height: u32,
        /// Cell encoding
        #[arg(short, long, value_enum, default_value = "ascii")]
        mode: Mode,
        /// Background animation time (overrides the file)
        #[arg(short, long)]
        time: Option<f32>,
        /// Integer upscale factor
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE as i64))]
        scale: u32,
        /// March on the rayon pool
        #[arg(short, long)]
        parallel: bool,
    },

    /// Create a demo scene description
    Demo {
        /// Output file
        #[arg(short, long, default_value = "demo.json")]
        output: PathBuf,
    },

    /// Display scene description information
    Info {
        /// Input file (.json)
        file: PathBuf,
    },

    /// Benchmark full frames
    Bench {
        /// Input file (or uses the demo scene)
        file: Option<PathBuf>,
        /// Frames to render
        #[arg(short, long, default_value = "100")]
        frames: u32,
        /// Native pixel width
        #[arg(short = 'W', long, default_value = "128")]
        width: u32,
        /// Native pixel height
        #[arg(short = 'H', long, default_value = "128")]
        height: u32,
        /// March on the rayon pool
        #[arg(short, long)]
        parallel: bool,
    },
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// One ramp glyph per pixel
    Ascii,
    /// Two pixels per cell with half blocks
    Blocks,
}

#[cfg(feature = "cli")]
impl From<Mode> for CompositeMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Ascii => CompositeMode::Ascii,
            Mode::Blocks => CompositeMode::Blocks,
        }
    }
}

#[cfg(feature = "cli")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            file,
            width,
            height,
            mode,
            time,
            scale,
            parallel,
        } => cmd_render(file, width, height, mode.into(), time, scale, parallel),
        Commands::Demo { output } => cmd_demo(output),
        Commands::Info { file } => cmd_info(file),
        Commands::Bench {
            file,
            frames,
            width,
            height,
            parallel,
        } => cmd_bench(file, frames, width, height, parallel),
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI not enabled. Build with --features cli");
    std::process::exit(1);
}

#[cfg(feature = "cli")]
fn load_or_demo(file: Option<PathBuf>) -> SceneDescription {
    match file {
        Some(path) => match load_scene_json(&path) {
            Ok(desc) => desc,
            Err(e) => {
                eprintln!("Load error: {}", e);
                std::process::exit(1);
            }
        },
        None => SceneDescription::demo(),
    }
}

#[cfg(feature = "cli")]
fn prepare(desc: &SceneDescription, width: u32, height: u32) -> RendererState {
    let pixels = width as usize * height as usize;
    if width == 0 || height == 0 || pixels > RendererState::max_rays() {
        eprintln!(
            "Error: {}x{} pixels outside 1..={}",
            width,
            height,
            RendererState::max_rays()
        );
        std::process::exit(1);
    }

    let mut renderer = RendererState::new();
    if let Err(e) = desc.apply(&mut renderer) {
        eprintln!("Scene error: {}", e);
        std::process::exit(1);
    }
    renderer
}

#[cfg(feature = "cli")]
fn cmd_render(
    file: Option<PathBuf>,
    width: u32,
    height: u32,
    mode: CompositeMode,
    time: Option<f32>,
    scale: u32,
    parallel: bool,
) {
    let desc = load_or_demo(file);
    let mut renderer = prepare(&desc, width, height);

    renderer.generate_rays(width, height);
    renderer.compute_background(time.unwrap_or(desc.time));
    if parallel {
        renderer.march_rays_parallel();
    } else {
        renderer.march_rays();
    }
    let (cols, rows) = renderer.composite_with(mode, width, height);

    let scale = fit_scale(cols, rows, scale, RendererState::max_upscaled());
    if scale > 1 {
        renderer.upscale(cols, rows, cols * scale, rows * scale, scale);
    }

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    let result = write_frame(&mut out, &renderer, mode, cols, rows, scale).and_then(|()| out.flush());
    if let Err(e) = result {
        eprintln!("Write error: {}", e);
        std::process::exit(1);
    }
}

/// Largest accepted `--scale`
#[cfg(feature = "cli")]
const MAX_SCALE: u32 = 16;

/// Largest scale not above `requested` whose output grid fits `capacity`
#[cfg(feature = "cli")]
fn fit_scale(cols: u32, rows: u32, requested: u32, capacity: usize) -> u32 {
    let mut scale = requested.clamp(1, MAX_SCALE);
    while scale > 1 && (cols.saturating_mul(scale) as usize).saturating_mul(rows.saturating_mul(scale) as usize) > capacity {
        scale -= 1;
    }
    scale
}

#[cfg(feature = "cli")]
fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// Write the composited (and possibly upscaled) cell grid as ANSI truecolor
#[cfg(feature = "cli")]
fn write_frame(
    out: &mut impl Write,
    renderer: &RendererState,
    mode: CompositeMode,
    cols: u32,
    rows: u32,
    scale: u32,
) -> std::io::Result<()> {
    let cells = renderer.cells();
    let upscaled = renderer.upscaled();
    let (out_cols, out_rows) = (cols.saturating_mul(scale), rows.saturating_mul(scale));

    for y in 0..out_rows {
        for x in 0..out_cols {
            let out_idx = (y * out_cols + x) as usize;
            let native_idx = ((y / scale) * cols + x / scale) as usize;

            let (glyph, fg) = if scale > 1 {
                (upscaled.glyph(out_idx), upscaled.fg_at(out_idx))
            } else {
                (cells.glyph(native_idx), cells.fg_at(native_idx))
            };
            let glyph = glyph.unwrap_or(' ');
            let [r, g, b, _] = fg.unwrap_or([0.0; 4]);

            if mode == CompositeMode::Blocks {
                let [br, bg, bb, _] = cells.bg_at(native_idx).unwrap_or([0.0; 4]);
                write!(out, "\x1b[48;2;{};{};{}m", channel(br), channel(bg), channel(bb))?;
            }
            write!(out, "\x1b[38;2;{};{};{}m{}", channel(r), channel(g), channel(b), glyph)?;
        }
        writeln!(out, "\x1b[0m")?;
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_demo(output: PathBuf) {
    match save_scene_json(&SceneDescription::demo(), &output) {
        Ok(()) => println!("Created demo scene: {}", output.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn cmd_info(path: PathBuf) {
    match get_info(&path) {
        Ok(info) => println!("{}", info),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn cmd_bench(file: Option<PathBuf>, frames: u32, width: u32, height: u32, parallel: bool) {
    let desc = load_or_demo(file);
    let mut renderer = prepare(&desc, width, height);
    let frames = frames.max(1);

    println!("=== Frame Benchmark ===");
    println!("Resolution: {}x{}", width, height);
    println!("Frames: {}", frames);
    println!("Shapes: {}", renderer.scene().shape_count());
    if parallel {
        println!("Threads: {}", rayon::current_num_threads());
    }

    renderer.reset_metrics();
    let start = std::time::Instant::now();
    for frame in 0..frames {
        renderer.generate_rays(width, height);
        renderer.compute_background(desc.time + frame as f32 / 30.0);
        if parallel {
            renderer.march_rays_parallel();
        } else {
            renderer.march_rays();
        }
        renderer.composite(width, height);
    }
    let elapsed = start.elapsed();

    let per_frame = elapsed.as_secs_f64() * 1000.0 / f64::from(frames);
    let rays = f64::from(width) * f64::from(height) * f64::from(frames);
    println!("\n--- Timing ---");
    println!("Total:     {:.3}ms", elapsed.as_secs_f64() * 1000.0);
    println!("Per frame: {:.3}ms", per_frame);
    println!("Rays/sec:  {:.2}M", rays / elapsed.as_secs_f64() / 1e6);

    let m = renderer.metrics();
    println!("\n--- Last Frame ---");
    println!("Steps:          {}", m[slot::TOTAL_STEPS]);
    println!("Hits:           {}", m[slot::HITS]);
    println!("Misses:         {}", m[slot::MISSES]);
    println!("Avg steps/batch {:.2}", m[slot::AVG_STEPS]);
    println!("Hit rate:       {:.1}%", m[slot::HIT_RATE]);
    println!("\n--- Totals ---");
    println!("SDF calls:      {}", m[slot::SDF_CALLS]);
    println!("Normal calls:   {}", m[slot::NORMAL_SDF_CALLS]);
    println!("Color lookups:  {}", m[slot::COLOR_LOOKUPS]);
}

//! Planetgen CLI - procedural planet preview.
//!
//! Synthesizes planet textures in memory and steps the temporal and weather
//! simulations, printing what a renderer would display. No files are written.

use clap::{Args, Parser, Subcommand};
use std::time::Instant;

use planetgen::params::{PlanetParameters, PlanetPreset, TemporalSettings};
use planetgen::pipeline::{Pipeline, StageConfig};
use planetgen::planet::{Planet, PlanetCommand};
use planetgen::textures::alpha_coverage;

/// Procedural planet generator.
#[derive(Parser)]
#[command(name = "planetgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize surface, cloud, ring and moon textures and report on them.
    Generate {
        #[command(flatten)]
        planet: PlanetArgs,

        /// Divide the default texture resolutions (1024x512 surface) by this factor.
        #[arg(long, default_value = "4")]
        downscale: u32,

        /// Fast-forward this many simulated years before generating.
        #[arg(long)]
        years: Option<f64>,
    },

    /// Step the temporal and weather simulations frame by frame.
    Simulate {
        #[command(flatten)]
        planet: PlanetArgs,

        /// Number of frames to simulate.
        #[arg(short, long, default_value = "600")]
        frames: u32,

        /// Frames per real second.
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Print a report every N frames.
        #[arg(long, default_value = "120")]
        report_every: u32,

        /// Simulated years per real second (0.1-10).
        #[arg(long)]
        time_speed: Option<f32>,

        /// Enable every temporal evolution knob at moderate strength.
        #[arg(long)]
        evolve: bool,

        /// Fast-forward this many simulated years before the first frame.
        #[arg(long)]
        years: Option<f64>,
    },

    /// List the built-in presets.
    Presets,
}

/// Preset selection plus per-field overrides.
#[derive(Args)]
struct PlanetArgs {
    /// Starting preset.
    #[arg(short, long, default_value = "earth-like")]
    preset: PlanetPreset,

    /// Random seed for reproducible generation.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Land/water ratio (0-1).
    #[arg(long)]
    land: Option<f32>,

    /// Coastline complexity (0-1).
    #[arg(long)]
    coastline: Option<f32>,

    /// Mountain density (0-1).
    #[arg(long)]
    mountains: Option<f32>,

    /// Climate, 0 = frozen, 1 = arid.
    #[arg(long)]
    climate: Option<f32>,

    /// Atmosphere thickness (0-1).
    #[arg(long)]
    atmosphere: Option<f32>,

    /// Cloud coverage (0-1).
    #[arg(long)]
    clouds: Option<f32>,

    /// Ring density (0 disables rings).
    #[arg(long)]
    rings: Option<f32>,

    /// Moon size (0 disables the moon).
    #[arg(long)]
    moon: Option<f32>,
}

impl PlanetArgs {
    fn to_parameters(&self) -> PlanetParameters {
        let seed = self.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });

        let mut p = self.preset.parameters(seed);
        let overrides = [
            (self.land, &mut p.land_water_ratio),
            (self.coastline, &mut p.coastline_complexity),
            (self.mountains, &mut p.mountain_density),
            (self.climate, &mut p.climate),
            (self.atmosphere, &mut p.atmosphere),
            (self.clouds, &mut p.clouds),
            (self.rings, &mut p.ring_density),
            (self.moon, &mut p.moon_size),
        ];
        for (value, field) in overrides {
            if let Some(v) = value {
                *field = v;
            }
        }
        p
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { planet, downscale, years } => {
            run_generate(&planet, downscale, years);
        }
        Commands::Simulate {
            planet,
            frames,
            fps,
            report_every,
            time_speed,
            evolve,
            years,
        } => {
            run_simulate(&planet, frames, fps, report_every, time_speed, evolve, years);
        }
        Commands::Presets => run_presets(),
    }
}

fn validate_ratios(params: &PlanetParameters) {
    let fields = [
        ("land", params.land_water_ratio),
        ("coastline", params.coastline_complexity),
        ("mountains", params.mountain_density),
        ("climate", params.climate),
        ("atmosphere", params.atmosphere),
        ("clouds", params.clouds),
        ("rings", params.ring_density),
        ("moon", params.moon_size),
    ];
    for (name, value) in fields {
        if !(0.0..=1.0).contains(&value) {
            eprintln!("Error: --{} must be between 0.0 and 1.0", name);
            std::process::exit(1);
        }
    }
}

fn print_parameters(params: &PlanetParameters) {
    println!("Seed:        {}", params.seed);
    println!("Land/water:  {:.2} (sea level {:.2})", params.land_water_ratio, params.sea_level());
    println!("Coastline:   {:.2}", params.coastline_complexity);
    println!("Mountains:   {:.2}", params.mountain_density);
    println!("Climate:     {:.2}", params.climate);
    println!("Atmosphere:  {:.2}", params.atmosphere);
    println!("Clouds:      {:.2}", params.clouds);
    println!("Rings:       {:.2}", params.ring_density);
    println!("Moon:        {:.2}", params.moon_size);
}

fn run_generate(args: &PlanetArgs, downscale: u32, years: Option<f64>) {
    if downscale == 0 || downscale > 256 {
        eprintln!("Error: Downscale factor must be between 1 and 256");
        std::process::exit(1);
    }
    let params = args.to_parameters();
    validate_ratios(&params);

    println!("Planetgen - Procedural Planet Generator");
    println!("=======================================");
    println!("Preset: {}", args.preset);
    print_parameters(&params);

    let mut planet = Planet::new(&params);
    if let Some(years) = years {
        planet.apply(PlanetCommand::FastForward(years));
        let status = planet.status();
        println!("Fast-forwarded to {} ({})", status.time_description, status.epoch);
    }

    let start = Instant::now();
    println!("\nRunning texture pipeline...");
    let pipeline = Pipeline::standard(StageConfig::downscaled(downscale));
    let render = planet.render_parameters();
    let textures = pipeline
        .run_with_synth(
            planet.synth(),
            &render,
            |name, i, total| {
                println!("  [{}/{}] Starting: {}", i + 1, total, name);
            },
            |name, i, total| {
                println!("  [{}/{}] Completed: {}", i + 1, total, name);
            },
        )
        .unwrap_or_else(|e| {
            eprintln!("Error during generation: {}", e);
            std::process::exit(1);
        });
    println!("Generation completed in {:.2?}", start.elapsed());

    println!("\nTextures:");
    if let Some(surface) = &textures.surface {
        let (w, h) = surface.color.dimensions();
        let (min_h, max_h) = surface.heights.range();
        println!("  Surface: {}x{}", w, h);
        println!("    Height range: [{:.4}, {:.4}]", min_h, max_h);
        println!(
            "    Land coverage: {:.1}%",
            surface.heights.land_fraction(render.sea_level()) * 100.0
        );
    }
    if let Some(clouds) = &textures.clouds {
        println!(
            "  Clouds:  {}x{}, coverage {:.1}%",
            clouds.width(),
            clouds.height(),
            alpha_coverage(clouds) * 100.0
        );
    }
    match &textures.rings {
        Some(rings) => println!(
            "  Rings:   {}x{}, opacity {:.1}%",
            rings.width(),
            rings.height(),
            alpha_coverage(rings) * 100.0
        ),
        None => println!("  Rings:   none"),
    }
    match &textures.moon {
        Some(moon) => println!("  Moon:    {}x{}", moon.width(), moon.height()),
        None => println!("  Moon:    none"),
    }
}

fn run_simulate(
    args: &PlanetArgs,
    frames: u32,
    fps: u32,
    report_every: u32,
    time_speed: Option<f32>,
    evolve: bool,
    years: Option<f64>,
) {
    if fps == 0 {
        eprintln!("Error: FPS must be at least 1");
        std::process::exit(1);
    }
    let mut params = args.to_parameters();
    validate_ratios(&params);
    if evolve {
        params.temporal = TemporalSettings::active();
    }
    if let Some(speed) = time_speed {
        if !(0.1..=10.0).contains(&speed) {
            eprintln!("Error: Time speed must be between 0.1 and 10");
            std::process::exit(1);
        }
        params.temporal.time_speed = speed;
    }

    println!("Planetgen - Temporal Simulation");
    println!("===============================");
    println!("Preset: {}", args.preset);
    print_parameters(&params);
    println!("Frames: {} at {} fps, time speed {}", frames, fps, params.temporal.time_speed);

    let mut planet = Planet::new(&params);
    if let Some(years) = years {
        planet.apply(PlanetCommand::FastForward(years));
    }

    let delta = 1.0 / fps as f32;
    let every = report_every.max(1);
    let start = Instant::now();
    for frame in 1..=frames {
        planet.frame(delta);
        if frame % every == 0 || frame == frames {
            report(&mut planet, frame);
        }
    }
    println!("\nSimulation completed in {:.2?}", start.elapsed());
}

fn report(planet: &mut Planet, frame: u32) {
    let status = planet.status();
    let evolved = planet.evolved_parameters();
    let stats = planet.weather_stats();

    println!("\nFrame {}: {} ({})", frame, status.time_description, status.epoch);
    println!(
        "  Evolved: mountains {:.3}, coastline {:.3}, land {:.3}, climate {:.3}, atmosphere {:.3}, clouds {:.3}",
        evolved.mountain_density,
        evolved.coastline_complexity,
        evolved.land_water_ratio,
        evolved.climate,
        evolved.atmosphere,
        evolved.clouds,
    );
    let effects = status.effects.active();
    if effects.is_empty() {
        println!("  Effects: none");
    } else {
        println!("  Effects: {}", effects.join(", "));
    }
    println!(
        "  Weather: {} storm(s), cloud cover {:.2}, wind {:.2}, temperature [{:.2}, {:.2}]",
        stats.active_storms,
        stats.average_cloud_cover,
        stats.average_wind_speed,
        stats.min_temperature,
        stats.max_temperature,
    );
    for storm in planet.weather().active_storms() {
        println!(
            "    #{} {:<12} intensity {:.2}, age {:.1}/{:.1}s",
            storm.id, storm.kind.name(), storm.intensity, storm.age, storm.lifespan
        );
    }
}

fn run_presets() {
    println!("Planetgen - Presets");
    println!("===================");
    for preset in PlanetPreset::all() {
        let p = preset.parameters(0);
        println!(
            "  {:<13} land {:.2}  climate {:.2}  clouds {:.2}  rings {:.2}  moon {:.2}",
            preset.name(),
            p.land_water_ratio,
            p.climate,
            p.clouds,
            p.ring_density,
            p.moon_size,
        );
    }
}

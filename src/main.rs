//! Viewfinder CLI
//!
//! Command-line interface for inspecting constraint resolution and crop
//! geometry, and for running the camera pipeline against in-memory
//! devices.

use clap::{Parser, Subcommand};
use futures::executor::block_on;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use viewfinder::{
    acquire::{EntryPoint, LegacyVendor, MockHost, MockSink},
    capture::{plan_crop, CropPolicy, FrameGeometry, RasterBuffer, Size, StillFrame},
    constraints::{DeviceClass, FacingMode, FacingModeSupport},
    CameraOptions, FileConfig, ResolutionSpec, Viewfinder,
};

#[derive(Parser)]
#[command(name = "viewfinder", version, about = "Camera constraint and capture tooling")]
struct Cli {
    /// TOML file with a [camera] table
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the media constraints that would be requested
    Constraints {
        /// Ideal resolution, e.g. 1920x1080
        #[arg(long)]
        ideal: Option<String>,
        /// Minimum resolution, e.g. 640x480
        #[arg(long)]
        min: Option<String>,
        /// Preferred camera: user or environment
        #[arg(long)]
        facing: Option<FacingMode>,
        /// User agent used to classify the device
        #[arg(long, default_value = "")]
        user_agent: String,
        /// Treat the host as not supporting facingMode
        #[arg(long, conflicts_with = "unknown_support")]
        no_facing_support: bool,
        /// Treat facingMode support as unknown
        #[arg(long)]
        unknown_support: bool,
    },
    /// Print the crop plan for one capture
    Crop {
        /// Container rendered size
        #[arg(long)]
        container: ResolutionSpec,
        /// Video rendered size
        #[arg(long)]
        rendered: ResolutionSpec,
        /// Video native frame size
        #[arg(long)]
        native: ResolutionSpec,
        /// Crop policy: none or 3:4
        #[arg(long)]
        policy: Option<CropPolicy>,
    },
    /// Run acquisition and capture against in-memory devices
    Demo {
        /// Use the legacy webkit entry point
        #[arg(long)]
        legacy: bool,
        /// Write the captured JPEG here
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let options = match load_options(cli.config.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Command::Constraints {
            ideal,
            min,
            facing,
            user_agent,
            no_facing_support,
            unknown_support,
        } => {
            let support = if no_facing_support {
                FacingModeSupport::Unsupported
            } else if unknown_support {
                FacingModeSupport::Unknown
            } else {
                FacingModeSupport::Supported
            };
            let options = CameraOptions {
                ideal_resolution: ideal.or(options.ideal_resolution),
                min_resolution: min.or(options.min_resolution),
                ideal_facing_mode: facing.or(options.ideal_facing_mode),
                ..options
            };
            print_constraints(&options, DeviceClass::from_user_agent(&user_agent), support)
        }
        Command::Crop {
            container,
            rendered,
            native,
            policy,
        } => print_crop(
            policy.unwrap_or(options.crop_to_fit),
            container,
            rendered,
            native,
        ),
        Command::Demo { legacy, output } => run_demo(options, legacy, output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_options(path: Option<&std::path::Path>) -> Result<CameraOptions, viewfinder::Error> {
    match path {
        Some(path) => Ok(FileConfig::from_file(path)?.camera),
        None => Ok(CameraOptions::default()),
    }
}

fn print_constraints(
    options: &CameraOptions,
    device: DeviceClass,
    support: FacingModeSupport,
) -> Result<(), Box<dyn std::error::Error>> {
    let constraints = options.constraints(device, support)?;
    println!("{}", serde_json::to_string_pretty(&constraints)?);
    Ok(())
}

fn print_crop(
    policy: CropPolicy,
    container: ResolutionSpec,
    rendered: ResolutionSpec,
    native: ResolutionSpec,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame = FrameGeometry {
        native: Size::new(native.width(), native.height()),
        rendered: Size::new(rendered.width(), rendered.height()),
    };
    let viewport = Size::new(container.width(), container.height());

    let plan = plan_crop(policy, frame, viewport);
    if plan.clamped {
        warn!("Container is wider than the rendered video; capture will be degraded");
    }
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn run_demo(
    options: CameraOptions,
    legacy: bool,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Viewfinder v{}", viewfinder::VERSION);
    info!("This is a demonstration using in-memory camera and canvas");

    let entry = if legacy {
        EntryPoint::Legacy(LegacyVendor::Webkit)
    } else {
        EntryPoint::Modern
    };
    let mut camera = Viewfinder::new(MockHost::new(entry), options)?;
    let mut sink = MockSink::new();

    let stream = block_on(camera.start(&mut sink))?;
    info!(
        attachment = ?camera.session().attachment(),
        "Camera live"
    );

    let layout = camera.preview_layout();
    info!(container = %layout.container_css(), video = %layout.video_css(), "Preview layout");

    // A 16:9 feed rendered 400px tall behind a 300x400 container.
    let video = StillFrame::synthetic(Size::new(1280, 720), Size::new(711, 400));
    let viewport = Size::new(300, 400);
    let mut canvas = RasterBuffer::new();
    let image = camera.screenshot(Some(&video), Some(&viewport), Some(&mut canvas))?;

    info!(
        width = image.size().width,
        height = image.size().height,
        degraded = image.is_degraded(),
        bytes = image.data_uri().len(),
        "Captured still"
    );

    match output {
        Some(path) => {
            let jpeg = image.jpeg_bytes().ok_or("capture is not a JPEG data URI")?;
            std::fs::write(&path, jpeg)?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", image.data_uri()),
    }

    camera.stop();
    info!(stream = %viewfinder::acquire::LiveStream::id(&stream), "Done. Camera released");
    Ok(())
}

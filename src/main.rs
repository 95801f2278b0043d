use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

use pantaneiro::app::{App, Autopilot, Platform};
use pantaneiro::config::{SceneKey, Settings};
use pantaneiro::formatter::FrameFormatter;

/// Retries the autopilot takes before giving up on a scene.
const AUTOPILOT_RETRIES: u32 = 2;

struct Args {
    settings: Settings,
    scene: SceneKey,
    frames: Option<u64>,
    autopilot: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        settings: Settings::default(),
        scene: SceneKey::Demo,
        frames: None,
        autopilot: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| anyhow!("missing value for {flag}"));
        match flag.as_str() {
            "--scene" => {
                let key = value()?;
                args.scene = SceneKey::from_str(&key).map_err(|_| anyhow!("unknown scene '{key}'"))?;
            }
            "--autopilot" => args.autopilot = true,
            "--frames" => args.frames = Some(value()?.parse().context("--frames expects a number")?),
            "--seed" => args.settings.seed = Some(value()?.parse().context("--seed expects a number")?),
            "--assets" => args.settings.assets_dir = PathBuf::from(value()?),
            "--scores" => args.settings.high_score_path = PathBuf::from(value()?),
            other => bail!("unknown flag '{other}'"),
        }
    }
    Ok(args)
}

#[cfg(feature = "sdl")]
fn open_platform(args: &Args) -> Result<Box<dyn Platform>> {
    let autopilot = args.autopilot.then(|| Autopilot::new(args.scene, AUTOPILOT_RETRIES));
    let platform = pantaneiro::platform::SdlPlatform::new(&args.settings.assets_dir, autopilot)?;
    Ok(Box::new(platform))
}

#[cfg(not(feature = "sdl"))]
fn open_platform(args: &Args) -> Result<Box<dyn Platform>> {
    use tracing::warn;

    if !args.autopilot {
        warn!("Built without the `sdl` feature, running headless under the autopilot");
    }
    Ok(Box::new(Autopilot::new(args.scene, AUTOPILOT_RETRIES)))
}

fn init_tracing() -> Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().event_format(FrameFormatter))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
}

pub fn main() -> Result<()> {
    init_tracing()?;
    let args = parse_args()?;

    info!(scene = %args.scene, assets = %args.settings.assets_dir.display(), "Starting");
    let mut app = App::new(&args.settings, open_platform(&args)?, args.frames)?;

    while app.run() {}

    Ok(())
}

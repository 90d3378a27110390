use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::info;

use duopane::app::BrowserApp;
use duopane::config::BrowserConfig;
use duopane::delete::TrashDeleter;
use duopane::fetch::DirectorySource;
use duopane::models::{MediaFilter, Pane, PerPane};
use duopane::panes::MobileViewMode;
use duopane::report;

const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

const USAGE: &str = "\
usage: duopane [--source DIR] [--destination DIR]
               [--filter-source all|photos|videos] [--filter-destination all|photos|videos]
               [--width PX] [--height PX] [--columns N]
               [--mobile-view left|right|both] [--maximize source|destination]
               [--zoom-source STEPS] [--zoom-destination STEPS]";

#[derive(Debug, Clone, PartialEq)]
struct CliArgs {
    directories: PerPane<Option<PathBuf>>,
    filters: PerPane<MediaFilter>,
    width: f32,
    height: f32,
    columns: Option<i64>,
    mobile_view: Option<MobileViewMode>,
    maximize: Option<Pane>,
    zoom: PerPane<i32>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            directories: PerPane::default(),
            filters: PerPane::default(),
            width: 1600.0,
            height: 900.0,
            columns: None,
            mobile_view: None,
            maximize: None,
            zoom: PerPane::default(),
        }
    }
}

/// Returns `None` when usage was requested.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Option<CliArgs>> {
    let mut parsed = CliArgs::default();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().with_context(|| format!("Missing value for {name}"));
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--source" => {
                *parsed.directories.get_mut(Pane::Source) = Some(PathBuf::from(value("--source")?));
            }
            "--destination" => {
                *parsed.directories.get_mut(Pane::Destination) =
                    Some(PathBuf::from(value("--destination")?));
            }
            "--filter-source" => {
                *parsed.filters.get_mut(Pane::Source) = value("--filter-source")?
                    .parse()
                    .map_err(anyhow::Error::msg)?;
            }
            "--filter-destination" => {
                *parsed.filters.get_mut(Pane::Destination) = value("--filter-destination")?
                    .parse()
                    .map_err(anyhow::Error::msg)?;
            }
            "--width" => {
                parsed.width = value("--width")?
                    .parse::<f32>()
                    .context("Failed to parse --width as a number of pixels")?;
            }
            "--height" => {
                parsed.height = value("--height")?
                    .parse::<f32>()
                    .context("Failed to parse --height as a number of pixels")?;
            }
            "--columns" => {
                parsed.columns = Some(
                    value("--columns")?
                        .parse::<i64>()
                        .context("Failed to parse --columns as an integer")?,
                );
            }
            "--mobile-view" => {
                parsed.mobile_view = Some(
                    value("--mobile-view")?
                        .parse()
                        .map_err(anyhow::Error::msg)?,
                );
            }
            "--maximize" => {
                parsed.maximize = Some(value("--maximize")?.parse().map_err(anyhow::Error::msg)?);
            }
            "--zoom-source" => {
                *parsed.zoom.get_mut(Pane::Source) = value("--zoom-source")?
                    .parse::<i32>()
                    .context("Failed to parse --zoom-source as an integer")?;
            }
            "--zoom-destination" => {
                *parsed.zoom.get_mut(Pane::Destination) = value("--zoom-destination")?
                    .parse::<i32>()
                    .context("Failed to parse --zoom-destination as an integer")?;
            }
            other => bail!("Unknown argument: {other}\n{USAGE}"),
        }
    }

    if !(parsed.width.is_finite() && parsed.width > 0.0) {
        bail!("--width must be greater than 0");
    }
    if !(parsed.height.is_finite() && parsed.height > 0.0) {
        bail!("--height must be greater than 0");
    }
    Ok(Some(parsed))
}

fn run(args: CliArgs) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let handle = runtime.handle().clone();
    let deleter = TrashDeleter::new_default(handle.clone())?;

    let mut app = BrowserApp::new(
        BrowserConfig::global().clone(),
        Arc::new(DirectorySource::new()),
        deleter,
        handle,
    );
    app.resize(args.width, args.height);

    let orchestrator = app.orchestrator_mut();
    for pane in Pane::ALL {
        orchestrator.set_filter(pane, *args.filters.get(pane));
        if let Some(dir) = args.directories.get(pane) {
            orchestrator.set_directory(pane, dir.clone());
        }
        if let Some(columns) = args.columns {
            orchestrator.set_column_count(pane, columns);
        }
        let steps = *args.zoom.get(pane);
        if steps != 0 {
            orchestrator.zoom(pane, steps);
        }
    }
    if let Some(mode) = args.mobile_view {
        orchestrator.select_mobile_view(mode);
    }
    if let Some(pane) = args.maximize {
        orchestrator.toggle_maximize(pane);
    }

    if !app.wait_until_idle(LOAD_TIMEOUT) {
        bail!("Timed out after {LOAD_TIMEOUT:?} waiting for media lists");
    }

    print!("{}", report::render_session(app.orchestrator()));
    info!(device = ?app.orchestrator().device(), "Report finished");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("duopane=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    match parse_args(env::args().skip(1))? {
        Some(args) => run(args),
        None => {
            println!("{USAGE}");
            Ok(())
        }
    }
}

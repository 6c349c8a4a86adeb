mod surface;

use clap::Parser;
use jetlag_core::{Catalog, Config, GroupDirectory, ListRow, MapView};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::surface::{TracingList, TracingSurface};

/// jetlag headless map — builds the map state without a browser and prints
/// the sidebar list.
#[derive(Parser)]
#[command(name = "jetlag-headless")]
struct Args {
    /// Path to the site's data.json. Overrides the configured path.
    #[arg(long, env = "JETLAG_DATA_PATH")]
    data: Option<PathBuf>,

    /// YAML config file. Without it, config is loaded from the environment
    /// (dev mode) or ~/.jetlag/config.yaml.
    #[arg(long, env = "JETLAG_CONFIG")]
    config: Option<PathBuf>,

    /// Only show this playlist (repeatable).
    #[arg(long = "group")]
    groups: Vec<String>,

    /// Only show videos whose title contains this text.
    #[arg(long)]
    filter: Option<String>,

    /// Video id to make active.
    #[arg(long)]
    select: Option<String>,

    /// Zoom onto the active marker after selecting it.
    #[arg(long)]
    zoom_to_active: bool,

    /// Draw a line through each playlist's markers.
    #[arg(long)]
    connect_groups: bool,

    /// Print the list as JSON.
    #[arg(long)]
    json: bool,
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn load_config(args: &Args) -> Config {
    let loaded = match &args.config {
        Some(path) => Config::from_yaml_file(path),
        None => Config::load(),
    };

    let mut config = match (loaded, &args.data) {
        (Ok(config), _) => config,
        (Err(e), Some(data)) if args.config.is_none() => {
            debug!("No usable config ({e}), using defaults");
            Config::with_data_path(data)
        }
        (Err(e), _) => {
            error!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    if let Some(data) = &args.data {
        config.data_path = data.clone();
    }
    if args.connect_groups {
        config.connect_groups = true;
    }
    config
}

fn main() {
    configure_logging();
    let args = Args::parse();
    let config = load_config(&args);

    let catalog = Catalog::load(&config.data_path, GroupDirectory::default())
        .unwrap_or_else(|e| {
            error!("Failed to load {}: {e}", config.data_path.display());
            std::process::exit(1);
        });

    let mut view = MapView::new(
        catalog,
        &config,
        TracingSurface::default(),
        TracingList::default(),
    );

    if !args.groups.is_empty() {
        let options = view.groups();
        let unknown: Vec<_> = args
            .groups
            .iter()
            .filter(|g| !options.iter().any(|o| &o.key == *g))
            .collect();
        if !unknown.is_empty() {
            warn!("No such playlist: {unknown:?}");
        }
        view.set_group_filter(args.groups.iter().cloned());
    }
    if let Some(text) = &args.filter {
        view.set_text_filter(text);
    }
    if let Some(id) = &args.select {
        view.set_active(id);
        if args.zoom_to_active && !view.focus_active() {
            warn!("{id} has no marker to zoom to");
        }
    }

    let rows = view.list_rows();
    if args.json {
        match serde_json::to_string_pretty(&rows) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize list: {e}");
                std::process::exit(1);
            }
        }
    } else {
        for row in &rows {
            print_row(row);
        }
    }

    info!(
        "{} videos listed, {} markers, {} lines",
        rows.len(),
        view.surface().marker_count(),
        view.surface().line_count()
    );
    if let Some(id) = view.surface().popup() {
        info!("Active popup: {id}");
    }
    if let Some(center) = view.surface().center() {
        info!("Map centered on {}", center.readout());
    }

    let (surface, list) = view.unmount();
    debug!(
        "Unmounted ({} markers left, last scroll {:?})",
        surface.marker_count(),
        list.last_scrolled()
    );
}

fn print_row(row: &ListRow) {
    let marker = if row.active { ">" } else { " " };
    let location = row.location.as_deref().unwrap_or("-");
    println!("{marker} [{}] {}  ({location})", row.group_label, row.title);
}

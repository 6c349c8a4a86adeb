use jetlag_common::{Coordinate, OverlapResolver, ReselectPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::map::{TileLayer, Viewport};

const DEFAULT_CENTER: (f64, f64) = (51.1358, 1.3621);
const DEFAULT_ZOOM: u8 = 5;
const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const DEFAULT_MAX_ZOOM: u8 = 19;
const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>";
const DEFAULT_EMBED_URL_BASE: &str = "https://www.youtube.com/embed/";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// YAML config file structure. Only `data_path` is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigYaml {
    pub data_path: PathBuf,
    pub initial_lat: Option<f64>,
    pub initial_lng: Option<f64>,
    pub initial_zoom: Option<u8>,
    pub tile_url: Option<String>,
    pub max_zoom: Option<u8>,
    pub attribution: Option<String>,
    /// Decimal places used to decide two markers overlap
    pub overlap_precision: Option<u32>,
    /// Degrees each overlapping marker is shifted by
    pub overlap_step: Option<f64>,
    /// `keep` or `toggle`
    pub reselect: Option<String>,
    /// Draw a line through each playlist's markers
    #[serde(default)]
    pub connect_groups: bool,
    /// Let the text filter match playlist names too
    #[serde(default)]
    pub match_group_labels: bool,
    pub embed_url_base: Option<String>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// The site's `data.json`
    pub data_path: PathBuf,
    pub initial_center: Coordinate,
    pub initial_zoom: u8,
    pub tile_url: String,
    pub max_zoom: u8,
    pub attribution: String,
    pub overlap: OverlapResolver,
    pub reselect: ReselectPolicy,
    pub connect_groups: bool,
    pub match_group_labels: bool,
    pub embed_url_base: String,
}

impl Config {
    /// Defaults for everything but the data file.
    pub fn with_data_path(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            initial_center: Coordinate {
                lat: DEFAULT_CENTER.0,
                lng: DEFAULT_CENTER.1,
            },
            initial_zoom: DEFAULT_ZOOM,
            tile_url: DEFAULT_TILE_URL.to_string(),
            max_zoom: DEFAULT_MAX_ZOOM,
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            overlap: OverlapResolver::default(),
            reselect: ReselectPolicy::default(),
            connect_groups: false,
            match_group_labels: false,
            embed_url_base: DEFAULT_EMBED_URL_BASE.to_string(),
        }
    }

    pub fn load() -> Result<Self, ConfigError> {
        let dev_mode = Self::is_dev_mode() || dotenvy::dotenv().is_ok();
        if dev_mode {
            info!("Dev mode activated - loading from environment");
            Self::from_env()
        } else {
            let path = Self::default_config_path()
                .ok_or_else(|| ConfigError::Config("Failed to get home directory".into()))?;
            info!("Loading config from {}", path.display());
            Self::from_yaml_file(&path)
        }
    }

    pub fn is_dev_mode() -> bool {
        std::env::var("JETLAG_DEV_MODE").is_ok()
    }

    /// `~/.jetlag/config.yaml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".jetlag").join("config.yaml"))
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from `JETLAG_*` variables looked up through `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        let data_path = get("JETLAG_DATA_PATH").unwrap_or_else(|| "data/data.json".to_string());
        let mut config = Self::with_data_path(data_path);

        let lat = get("JETLAG_INITIAL_LAT")
            .map(|v| parse_var("JETLAG_INITIAL_LAT", &v))
            .transpose()?;
        let lng = get("JETLAG_INITIAL_LNG")
            .map(|v| parse_var("JETLAG_INITIAL_LNG", &v))
            .transpose()?;
        config.initial_center = center(lat, lng, config.initial_center)?;
        if let Some(zoom) = get("JETLAG_INITIAL_ZOOM") {
            config.initial_zoom = parse_var("JETLAG_INITIAL_ZOOM", &zoom)?;
        }
        if let Some(zoom) = get("JETLAG_MAX_ZOOM") {
            config.max_zoom = parse_var("JETLAG_MAX_ZOOM", &zoom)?;
        }
        if let Some(url) = get("JETLAG_TILE_URL") {
            config.tile_url = url;
        }
        if let Some(attribution) = get("JETLAG_ATTRIBUTION") {
            config.attribution = attribution;
        }

        let precision = get("JETLAG_OVERLAP_PRECISION")
            .map(|v| parse_var("JETLAG_OVERLAP_PRECISION", &v))
            .transpose()?;
        let step = get("JETLAG_OVERLAP_STEP")
            .map(|v| parse_var("JETLAG_OVERLAP_STEP", &v))
            .transpose()?;
        config.overlap = overlap_resolver(precision, step)?;

        if let Some(policy) = get("JETLAG_RESELECT") {
            config.reselect = policy.parse().map_err(ConfigError::Config)?;
        }
        if let Some(flag) = get("JETLAG_CONNECT_GROUPS") {
            config.connect_groups = parse_flag(&flag);
        }
        if let Some(flag) = get("JETLAG_MATCH_GROUP_LABELS") {
            config.match_group_labels = parse_flag(&flag);
        }
        if let Some(base) = get("JETLAG_EMBED_URL_BASE") {
            config.embed_url_base = base;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let yaml: ConfigYaml = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Serialization(e.to_string()))?;
        Self::from_yaml(yaml)
    }

    fn from_yaml(yaml: ConfigYaml) -> Result<Self, ConfigError> {
        let mut config = Self::with_data_path(yaml.data_path);
        config.initial_center = center(yaml.initial_lat, yaml.initial_lng, config.initial_center)?;
        config.initial_zoom = yaml.initial_zoom.unwrap_or(DEFAULT_ZOOM);
        config.max_zoom = yaml.max_zoom.unwrap_or(DEFAULT_MAX_ZOOM);
        if let Some(url) = yaml.tile_url {
            config.tile_url = url;
        }
        if let Some(attribution) = yaml.attribution {
            config.attribution = attribution;
        }

        config.overlap = overlap_resolver(yaml.overlap_precision, yaml.overlap_step)?;

        if let Some(policy) = yaml.reselect {
            config.reselect = policy.parse().map_err(ConfigError::Config)?;
        }
        config.connect_groups = yaml.connect_groups;
        config.match_group_labels = yaml.match_group_labels;
        if let Some(base) = yaml.embed_url_base {
            config.embed_url_base = base;
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks shared by the env and YAML paths.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_zoom > self.max_zoom {
            return Err(ConfigError::Config(format!(
                "initial_zoom {} exceeds max_zoom {}",
                self.initial_zoom, self.max_zoom
            )));
        }
        Ok(())
    }

    pub fn save_to_yaml(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = ConfigYaml {
            data_path: self.data_path.clone(),
            initial_lat: Some(self.initial_center.lat),
            initial_lng: Some(self.initial_center.lng),
            initial_zoom: Some(self.initial_zoom),
            tile_url: Some(self.tile_url.clone()),
            max_zoom: Some(self.max_zoom),
            attribution: Some(self.attribution.clone()),
            overlap_precision: Some(self.overlap.precision()),
            overlap_step: Some(self.overlap.step()),
            reselect: Some(
                match self.reselect {
                    ReselectPolicy::Keep => "keep",
                    ReselectPolicy::Toggle => "toggle",
                }
                .to_string(),
            ),
            connect_groups: self.connect_groups,
            match_group_labels: self.match_group_labels,
            embed_url_base: Some(self.embed_url_base.clone()),
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            serde_yaml::to_string(&yaml).map_err(|e| ConfigError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            center: self.initial_center,
            zoom: self.initial_zoom,
        }
    }

    pub fn tile_layer(&self) -> TileLayer {
        TileLayer {
            url: self.tile_url.clone(),
            max_zoom: self.max_zoom,
            attribution: self.attribution.clone(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Config(format!("Invalid value for {key}: {value}")))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn overlap_resolver(
    precision: Option<u32>,
    step: Option<f64>,
) -> Result<OverlapResolver, ConfigError> {
    let precision = precision.unwrap_or(OverlapResolver::DEFAULT_PRECISION);
    if precision > OverlapResolver::MAX_PRECISION {
        return Err(ConfigError::Config(format!(
            "overlap_precision must be at most {}, got {precision}",
            OverlapResolver::MAX_PRECISION
        )));
    }
    let step = step.unwrap_or(OverlapResolver::DEFAULT_STEP);
    if !(step.is_finite() && step > 0.0) {
        return Err(ConfigError::Config(format!(
            "overlap_step must be positive, got {step}"
        )));
    }
    Ok(OverlapResolver::new(precision, step))
}

/// Initial center from optional overrides. Both or neither must be given.
fn center(
    lat: Option<f64>,
    lng: Option<f64>,
    fallback: Coordinate,
) -> Result<Coordinate, ConfigError> {
    match (lat, lng) {
        (None, None) => Ok(fallback),
        (Some(lat), Some(lng)) => Coordinate::new(lat, lng).ok_or_else(|| {
            ConfigError::Config(format!("Initial center {lat}, {lng} is not a valid position"))
        }),
        _ => Err(ConfigError::Config(
            "Initial center needs both latitude and longitude".into(),
        )),
    }
}

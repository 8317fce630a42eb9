use config::{ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs, io};
use tracing::warn;

/// Development backend, as served by `flask run`.
pub const DEFAULT_API_ROOT: &str = "http://localhost:5000/music_page/api/v1.0/";
pub const DEFAULT_ARTIST_NAME: &str = "Pink Floyd";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_settings: ApiSettings,
    pub default_artist_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub api_root_url: String,
}

impl ApiSettings {
    pub fn new(url: &str) -> Self {
        Self {
            api_root_url: url.to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_settings: ApiSettings::new(DEFAULT_API_ROOT),
            default_artist_name: DEFAULT_ARTIST_NAME.to_string(),
        }
    }
}

/// Loads settings from the YAML file (if present) layered under `MUSIC_PAGE__*` environment variables.
///
/// Keys missing from both sources fall back to the development defaults.
pub fn get_configuration(cfg_file: &Path) -> Result<Settings, ConfigError> {
    if !cfg_file.exists() {
        warn!(
            path = %cfg_file.display(),
            "configuration file not found, using defaults"
        );
    }

    let settings = config::Config::builder()
        .set_default("api_settings.api_root_url", DEFAULT_API_ROOT)?
        .set_default("default_artist_name", DEFAULT_ARTIST_NAME)?
        .add_source(
            File::new(&cfg_file.to_string_lossy(), FileFormat::Yaml).required(false),
        )
        .add_source(Environment::with_prefix("MUSIC_PAGE").separator("__"))
        .build()?;

    settings.try_deserialize::<Settings>()
}

pub struct ConfigFolder {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl ConfigFolder {
    pub fn new() -> io::Result<Self> {
        let home_dir = env::var("HOME").map_err(|_| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Failed to get HOME environment variable",
            )
        })?;

        Ok(Self::in_home(Path::new(&home_dir)))
    }

    pub fn in_home(home_dir: &Path) -> Self {
        let config_dir = home_dir.join(".music_page");

        Self {
            config_file: config_dir.join("config.yaml"),
            config_dir,
        }
    }
}

pub fn create_config(cfg_folder: &ConfigFolder) -> anyhow::Result<()> {
    println!("\x1b[1m\x1b[32mCreating configuration...\x1b[0m");

    if cfg_folder.config_file.exists() && !confirm_overwrite()? {
        println!("\x1b[33mOperation cancelled.\x1b[0m");
        return Ok(());
    }

    write_config_template(cfg_folder)?;

    println!("\x1b[32mConfiguration file created at:");
    println!("  -> {}", cfg_folder.config_file.display());
    println!("\x1b[0mPlease edit the configuration file to point at your backend.");

    Ok(())
}

/// Writes the commented template config, creating the folder when needed.
pub fn write_config_template(cfg_folder: &ConfigFolder) -> io::Result<()> {
    fs::create_dir_all(&cfg_folder.config_dir)?;
    fs::write(
        &cfg_folder.config_file,
        include_str!("config_template.yaml"),
    )
}

fn confirm_overwrite() -> Result<bool, io::Error> {
    println!("\x1b[31mThe configuration file already exists.");
    println!("Do you want to overwrite it? (y/N)\x1b[0m");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

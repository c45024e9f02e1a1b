use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use banter_model::personality::Personality;
use itertools::Itertools;
use log::{info, warn};

use super::config::Config;

fn config_file_path() -> PathBuf {
    data_dir().join("config.yaml")
}

fn personality_file_path() -> PathBuf {
    data_dir().join("personality.yaml")
}

pub fn data_dir() -> PathBuf {
    let project_dirs = directories::ProjectDirs::from("com", "banter", "banter")
        .expect("Cannot retrieve project dirs");
    project_dirs.data_dir().to_owned()
}

pub fn load_config() -> Result<Config> {
    info!("Config file: {}", config_file_path().to_string_lossy());
    if !config_file_path().exists() {
        info!("Config file does not exist, creating.");
        store_default_config()?;
    }
    let config_file = File::open(config_file_path())?;
    Ok(serde_yaml::from_reader(config_file)?)
}

pub fn store_default_config() -> Result<()> {
    ensure_dir_created(&config_file_path())?;
    let config_file = File::create(&config_file_path())?;
    Ok(serde_yaml::to_writer(config_file, &Config::default())?)
}

pub fn load_personality() -> Result<Personality> {
    info!(
        "Personality file: {}",
        personality_file_path().to_string_lossy()
    );
    if !personality_file_path().exists() {
        info!("Personality file does not exist, creating.");
        store_default_personality()?;
    }
    let personality_file = File::open(personality_file_path())?;
    let personality: Personality = serde_yaml::from_reader(personality_file)?;
    personality.validate().context("Invalid personality file")?;

    let topic_labels: String = personality.topics.iter().map(|t| &t.label).join(", ");
    let n = personality.topics.len();
    if n == 0 {
        warn!("Loaded {n} topics");
    } else {
        info!("Loaded {n} topics: {topic_labels}");
    }
    Ok(personality)
}

pub fn store_default_personality() -> Result<()> {
    ensure_dir_created(&personality_file_path())?;
    let personality_file = File::create(&personality_file_path())?;
    Ok(serde_yaml::to_writer(
        personality_file,
        &Personality::example(),
    )?)
}

fn ensure_dir_created(path: &Path) -> Result<()> {
    let dir = path.parent().expect("Parent directory");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create {}", &dir.to_string_lossy()))?;
    }
    Ok(())
}

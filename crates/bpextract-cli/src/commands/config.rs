use bpextract_core::config::{self, ConfigFormat, ConfigManager};
use bpextract_core::error::BpError;
use std::path::PathBuf;

pub fn init(path: Option<PathBuf>, force: bool) -> Result<(), BpError> {
    let target = path.unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILENAME));
    ConfigManager::new(Some(&target)).init(force)?;
    println!("Configuration saved to: {}", target.display());
    Ok(())
}

pub fn show(path: Option<PathBuf>, json: bool) -> Result<(), BpError> {
    let manager = ConfigManager::new(path.as_deref());
    let effective = manager.load()?;
    let format = if json {
        ConfigFormat::Json
    } else {
        ConfigFormat::Yaml
    };
    println!("{}", config::to_string(&effective, format)?.trim_end());
    Ok(())
}

pub fn path() -> Result<(), BpError> {
    let manager = ConfigManager::new(None);
    let resolved = manager.path();
    let state = if resolved.is_file() {
        "found"
    } else {
        "not found, defaults in use"
    };
    println!("{} ({})", resolved.display(), state);

    println!("\nLookup order:");
    for candidate in ConfigManager::candidate_paths() {
        println!("  {}", candidate.display());
    }
    Ok(())
}

use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, Settings};

pub fn show() -> Result<()> {
    let path = settings_path();
    let settings = load_settings();
    let source = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("Settings:  {}{source}", path.display());
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let path = settings_path();
    if path.exists() && !force {
        println!("{} already exists. Use --force to overwrite.", path.display());
        return Ok(());
    }
    save_settings(&Settings::default())?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}

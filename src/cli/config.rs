use crate::error::{BoardError, Result};
use crate::settings::{load_saved_settings, save_settings};

/// Apply any given updates, then print the stored settings. Environment
/// overrides are left out so they never end up in the file.
pub fn run(endpoint: Option<String>, timeout: Option<u64>, default_year: Option<i32>) -> Result<()> {
    let mut settings = load_saved_settings();
    let changed = endpoint.is_some() || timeout.is_some() || default_year.is_some();

    if let Some(url) = endpoint {
        if url.trim().is_empty() {
            return Err(BoardError::Settings("endpoint must not be empty".into()));
        }
        settings.endpoint = url;
    }
    if let Some(secs) = timeout {
        settings.timeout_secs = (secs > 0).then_some(secs);
    }
    if let Some(year) = default_year {
        settings.default_year = year;
        if !settings.years.contains(&year) {
            settings.years.insert(0, year);
        }
    }

    if changed {
        save_settings(&settings)?;
        tracing::info!("settings updated");
    }

    let json = serde_json::to_string_pretty(&settings)
        .map_err(|e| BoardError::Settings(e.to_string()))?;
    println!("{json}");
    Ok(())
}

//! Interactive mode for the server.
//!
//! Shows which department and datasets the dashboard will serve, lets the
//! user point at other files, then asks where to listen.

use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input};
use fire_map_analytics::DashboardConfig;

/// Runs the server in interactive mode.
///
/// The fire log and boundary paths from `config` can be replaced before
/// startup; missing files are reported and need an explicit confirmation.
/// The chosen address is passed to [`super::run_server`] through
/// `BIND_ADDR` and `PORT`.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(mut config: DashboardConfig) -> std::io::Result<()> {
    println!("{}", config.title);
    for line in describe(&config) {
        println!("  {line}");
    }
    println!();

    config.fires.path = prompt_path("Fire log (BDIFF export)", &config.fires.path);
    config.boundaries.path = prompt_path("Commune boundaries (GeoJSON)", &config.boundaries.path);

    let missing = missing_inputs(&config);
    for path in &missing {
        println!("Not found: {}", path.display());
    }
    if !missing.is_empty()
        && !Confirm::new()
            .with_prompt("Start anyway?")
            .default(false)
            .interact()
            .unwrap_or(false)
    {
        println!("Cancelled.");
        return Ok(());
    }

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default("127.0.0.1".to_string())
        .interact_text()
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(8080)
        .interact_text()
        .unwrap_or(8080);

    // SAFETY: no other thread exists yet; the server reads these once at
    // startup.
    unsafe {
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", port.to_string());
    }

    if !Confirm::new()
        .with_prompt(format!(
            "Serve {} ({}) on http://{bind_addr}:{port}/?",
            config.departement_name(),
            config.departement
        ))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(config).await
}

/// One line per setting shown before the prompts.
fn describe(config: &DashboardConfig) -> Vec<String> {
    vec![
        format!(
            "Département:  {} ({})",
            config.departement_name(),
            config.departement
        ),
        format!("Fire log:     {}", config.fires.path.display()),
        format!("Boundaries:   {}", config.boundaries.path.display()),
        format!("Default year: {}", config.default_year),
    ]
}

fn prompt_path(prompt: &str, current: &Path) -> PathBuf {
    Input::<String>::new()
        .with_prompt(prompt)
        .default(current.display().to_string())
        .interact_text()
        .map_or_else(|_| current.to_path_buf(), PathBuf::from)
}

/// Configured input files that do not exist.
fn missing_inputs(config: &DashboardConfig) -> Vec<&Path> {
    [config.fires.path.as_path(), config.boundaries.path.as_path()]
        .into_iter()
        .filter(|path| !path.is_file())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_department_and_datasets() {
        let lines = describe(&DashboardConfig::default());
        assert_eq!(lines[0], "Département:  Alpes-de-Haute-Provence (04)");
        assert!(lines[1].ends_with("data/BDIFF_DB.csv"));
        assert!(lines[2].ends_with("data/communes_04.geojson"));
        assert_eq!(lines[3], "Default year: 2008");
    }

    #[test]
    fn reports_missing_inputs() {
        let dir = std::env::temp_dir().join(format!("fire_map_inputs_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let fires = dir.join("fires.csv");
        std::fs::write(&fires, "Année;Numéro;Code INSEE;Commune;surf_ha\n").unwrap();

        let mut config = DashboardConfig::default();
        config.fires.path = fires;
        config.boundaries.path = dir.join("communes.geojson");

        assert_eq!(missing_inputs(&config), vec![config.boundaries.path.as_path()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

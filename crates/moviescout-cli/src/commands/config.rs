use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets, Attribute, Cell, Color, Table};
use movie_discovery_config::{Config, PathManager, StoreConfig, DEFAULT_APPWRITE_ENDPOINT};
use movie_discovery_sources::{MetadataClient, TmdbClient};
use owo_colors::OwoColorize;
use serde_json::json;

use super::ui::Spinner;
use super::{load_credentials, prompts};
use crate::output::Output;
use crate::ConfigCommands;

pub async fn run_config(cmd: ConfigCommands, paths: &PathManager, config: Config, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, paths, &config, output),
        ConfigCommands::Tmdb { token } => configure_tmdb(token, paths, &config, output).await,
        ConfigCommands::Appwrite {
            endpoint,
            project_id,
            database_id,
            api_key,
        } => configure_appwrite(endpoint, project_id, database_id, api_key, paths, config, output),
        ConfigCommands::Region { code } => configure_region(code, paths, config, output),
    }
}

fn section(title: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_header(vec![Cell::new(title)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold)]);
    table
}

fn flag(enabled: bool) -> String {
    if enabled {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

fn show_config(full: bool, paths: &PathManager, config: &Config, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let credentials = load_credentials(paths)?;
    let secret = |value: Option<String>| match value {
        Some(v) if full => v,
        Some(v) => mask_string(&v),
        None => "<not set>".to_string(),
    };
    let tmdb_token = secret(credentials.tmdb_read_token());
    let appwrite_key = secret(credentials.appwrite_api_key().cloned());

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "exists": config_file.exists(),
            "catalog": {
                "base_url": config.catalog.base_url,
                "region": config.catalog.region,
                "read_token": tmdb_token,
            },
            "store": config.store.as_ref().map(|store| json!({
                "endpoint": store.endpoint,
                "project_id": store.project_id,
                "database_id": store.database_id,
                "api_key": appwrite_key,
            })),
            "overrides": {
                "enabled": config.overrides.enabled,
                "active": config.overrides_active(),
                "collection_id": config.overrides.collection_id,
            },
            "analytics": {
                "enabled": config.analytics.enabled,
                "active": config.analytics_active(),
                "collection_id": config.analytics.collection_id,
                "trending_limit": config.analytics.trending_limit,
            },
            "logging": {
                "level": config.logging.level,
                "json": config.logging.json,
                "file": config.logging.file.as_ref().map(|f| f.display().to_string()),
            },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!(
            "Configuration file not found at {}; showing defaults",
            config_file.display()
        ));
    }

    let mut catalog = section("Catalog (TMDB)");
    catalog.add_row(vec![Cell::new("Base URL"), Cell::new(&config.catalog.base_url)]);
    catalog.add_row(vec![Cell::new("Region"), Cell::new(&config.catalog.region)]);
    catalog.add_row(vec![Cell::new("Read token"), Cell::new(tmdb_token)]);
    println!("{}", catalog);

    match &config.store {
        Some(store) => {
            let mut table = section("Document store (Appwrite)");
            table.add_row(vec![Cell::new("Endpoint"), Cell::new(&store.endpoint)]);
            table.add_row(vec![Cell::new("Project"), Cell::new(&store.project_id)]);
            table.add_row(vec![Cell::new("Database"), Cell::new(&store.database_id)]);
            table.add_row(vec![Cell::new("API key"), Cell::new(appwrite_key)]);
            println!("{}", table);
        }
        None => println!("{}", "Document store: Not configured".bright_black()),
    }

    let mut features = section("Features");
    features.add_row(vec![
        Cell::new("Platform overrides"),
        Cell::new(flag(config.overrides_active())),
        Cell::new(&config.overrides.collection_id),
    ]);
    features.add_row(vec![
        Cell::new("Search analytics"),
        Cell::new(flag(config.analytics_active())),
        Cell::new(format!(
            "{} (top {})",
            config.analytics.collection_id, config.analytics.trending_limit
        )),
    ]);
    println!("{}", features);

    let mut logging = section("Logging");
    logging.add_row(vec![Cell::new("Level"), Cell::new(&config.logging.level)]);
    logging.add_row(vec![
        Cell::new("File"),
        Cell::new(
            config
                .logging
                .file
                .as_ref()
                .map(|f| f.display().to_string())
                .unwrap_or_else(|| "stderr".to_string()),
        ),
    ]);
    println!("{}", logging);
    println!("{} {}", "Config file:".bright_black(), config_file.display());
    Ok(())
}

async fn configure_tmdb(token_arg: Option<String>, paths: &PathManager, config: &Config, output: &Output) -> Result<()> {
    let token = match token_arg {
        Some(token) => token,
        None => {
            output.println("Create a read-access token at https://www.themoviedb.org/settings/api");
            prompts::prompt_password("TMDB read-access token")?
        }
    };
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(eyre!("TMDB token cannot be empty"));
    }

    let client = TmdbClient::new(config.catalog.base_url.clone(), token.clone());
    let spinner = Spinner::start(format!("Verifying token against {}...", client.base_url()), output);
    let verified = client.discover().await;
    spinner.finish();

    match verified {
        Ok(_) => output.success("Token verified"),
        Err(e) => {
            output.warn(format!("Could not verify token: {}", e));
            if !prompts::prompt_yes_no("Save it anyway?", false)? {
                return Err(eyre!("Token verification failed"));
            }
        }
    }

    let mut credentials = load_credentials(paths)?;
    credentials.set_tmdb_read_token(token);
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials to {}: {}", paths.credentials_file().display(), e))?;
    output.success("TMDB token saved");
    Ok(())
}

fn configure_appwrite(
    endpoint: Option<String>,
    project_id: Option<String>,
    database_id: Option<String>,
    api_key: Option<String>,
    paths: &PathManager,
    mut config: Config,
    output: &Output,
) -> Result<()> {
    let existing = config.store.clone();
    let endpoint_default = existing
        .as_ref()
        .map(|s| s.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_APPWRITE_ENDPOINT.to_string());
    let project_default = existing.as_ref().map(|s| s.project_id.clone());
    let database_default = existing.as_ref().map(|s| s.database_id.clone());

    let endpoint = match endpoint {
        Some(value) => value,
        None => prompts::prompt_string("Appwrite endpoint", Some(&endpoint_default))?,
    };
    let project_id = match project_id {
        Some(value) => value,
        None => prompts::prompt_string("Project ID", project_default.as_deref())?,
    };
    let database_id = match database_id {
        Some(value) => value,
        None => prompts::prompt_string("Database ID", database_default.as_deref())?,
    };

    config.store = Some(StoreConfig {
        endpoint: endpoint.trim().trim_end_matches('/').to_string(),
        project_id: project_id.trim().to_string(),
        database_id: database_id.trim().to_string(),
    });
    config
        .validate()
        .map_err(|e| eyre!("Invalid store settings: {}", e))?;

    let api_key = match api_key {
        Some(key) => Some(key),
        None if prompts::prompt_yes_no("Set an API key for writes?", false)? => {
            Some(prompts::prompt_password("Appwrite API key")?)
        }
        None => None,
    };

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;
    let config_file = paths.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        let mut credentials = load_credentials(paths)?;
        credentials.set_appwrite_api_key(key.trim().to_string());
        credentials
            .save()
            .map_err(|e| eyre!("Failed to save credentials to {}: {}", paths.credentials_file().display(), e))?;
    }

    output.success("Document store configuration saved");
    output.println(format!("  Overrides: {}", flag(config.overrides_active())));
    output.println(format!("  Analytics: {}", flag(config.analytics_active())));
    Ok(())
}

fn configure_region(code: String, paths: &PathManager, mut config: Config, output: &Output) -> Result<()> {
    config.catalog.region = code.trim().to_uppercase();
    config.validate().map_err(|e| eyre!("{}", e))?;

    let config_file = paths.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    output.success(format!("Region set to {}", config.catalog.region));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("eyJhbGciOiJIUzI1NiJ9"), "ey***J9");
    }

    #[test]
    fn test_mask_string_non_ascii_secret() {
        assert_eq!(mask_string("ключ-секрет-öä"), "кл***öä");
        assert_eq!(mask_string("äöü"), "***");
    }
}

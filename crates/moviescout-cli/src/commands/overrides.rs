use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets, Attribute, Cell, Color, Table};
use movie_discovery_core::Platform;
use movie_discovery_models::OverrideRecord;
use movie_discovery_sources::{OverrideStore, SourceError};
use serde_json::json;
use std::sync::Arc;

use super::prompts;
use super::Context;
use crate::output::Output;

/// Identifiers given on the command line, by platform
pub struct OverrideArgs {
    pub netflix: Option<String>,
    pub prime: Option<String>,
    pub hotstar: Option<String>,
    pub zee5: Option<String>,
    pub sonyliv: Option<String>,
    pub mxplayer: Option<String>,
}

impl OverrideArgs {
    fn value_for(&self, platform: Platform) -> Option<&String> {
        match platform {
            Platform::Netflix => self.netflix.as_ref(),
            Platform::Prime => self.prime.as_ref(),
            Platform::Hotstar => self.hotstar.as_ref(),
            Platform::Zee5 => self.zee5.as_ref(),
            Platform::SonyLiv => self.sonyliv.as_ref(),
            Platform::MxPlayer => self.mxplayer.as_ref(),
        }
    }

    fn is_empty(&self) -> bool {
        Platform::ALL.iter().all(|p| self.value_for(*p).is_none())
    }
}

fn store(ctx: &Context) -> Result<Arc<dyn OverrideStore>> {
    ctx.collaborators.overrides.clone().ok_or_else(|| {
        let missing = SourceError::NotConfigured("platform overrides store".to_string());
        eyre!("{}; run 'moviescout config appwrite' first", missing)
    })
}

pub async fn run_show(movie_id: u64, ctx: &Context, output: &Output) -> Result<()> {
    let store = store(ctx)?;
    let record = store
        .get(movie_id)
        .await
        .map_err(|e| eyre!("Failed to load overrides for movie {}: {}", movie_id, e))?;

    if !output.is_human() {
        output.json(&json!({ "movie_id": movie_id, "overrides": record }));
        return Ok(());
    }

    let Some(record) = record else {
        output.info(format!("No overrides saved for movie {}", movie_id));
        return Ok(());
    };

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new(format!("Overrides for {}", movie_id))
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Identifier"),
        ]);
    for platform in Platform::ALL {
        let identifier = record.identifier_for(platform.key()).unwrap_or("-");
        table.add_row(vec![Cell::new(platform.display_name()), Cell::new(identifier)]);
    }
    output.println(table.to_string());
    Ok(())
}

pub async fn run_set(movie_id: u64, args: OverrideArgs, ctx: &Context, output: &Output) -> Result<()> {
    let store = store(ctx)?;

    let record = if args.is_empty() {
        let existing = store
            .get(movie_id)
            .await
            .map_err(|e| eyre!("Failed to load overrides for movie {}: {}", movie_id, e))?
            .unwrap_or_else(|| OverrideRecord::new(movie_id));
        prompt_record(movie_id, &existing, output)?
    } else {
        let mut record = OverrideRecord::new(movie_id);
        for platform in Platform::ALL {
            if let Some(value) = args.value_for(platform) {
                record.set_identifier(platform.key(), value.trim());
            }
        }
        record
    };

    if store.put(movie_id, &record).await {
        output.success(format!("Overrides saved for movie {}", movie_id));
        Ok(())
    } else {
        Err(eyre!("Failed to save overrides for movie {}", movie_id))
    }
}

/// Ask for every platform; an empty answer clears the identifier
fn prompt_record(movie_id: u64, existing: &OverrideRecord, output: &Output) -> Result<OverrideRecord> {
    output.println(format!("Platform identifiers for movie {} (leave empty to clear)", movie_id));
    let mut record = OverrideRecord::new(movie_id);
    for platform in Platform::ALL {
        let current = existing.identifier_for(platform.key());
        let value = prompts::prompt_string(&format!("{} ID", platform.display_name()), current)?;
        record.set_identifier(platform.key(), value.trim());
    }
    Ok(record)
}

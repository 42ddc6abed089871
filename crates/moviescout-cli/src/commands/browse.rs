use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use movie_discovery_core::{Browser, Listing};
use movie_discovery_models::{Movie, TrendingSearch};
use serde_json::json;

use super::ui::Spinner;
use super::Context;
use crate::output::Output;

fn browser(ctx: &Context) -> Browser {
    Browser::new(
        ctx.collaborators.metadata.clone(),
        ctx.collaborators.analytics.clone(),
    )
}

fn card_json(movie: &Movie) -> serde_json::Value {
    json!({
        "id": movie.id,
        "title": movie.title,
        "year": movie.release_year(),
        "rating": movie.rating_display(),
        "language": movie.language_display(),
        "poster_url": movie.poster_url(),
        "overview": movie.short_overview(),
    })
}

pub async fn run_search(query: Option<String>, ctx: &Context, output: &Output) -> Result<()> {
    let query = query.unwrap_or_default();
    let message = match Listing::from_query(&query) {
        Listing::Popular => "Loading popular movies...".to_string(),
        Listing::Search(term) => format!("Searching for '{}'...", term),
    };

    let spinner = Spinner::start(message, output);
    let result = browser(ctx).browse(&query).await;
    spinner.finish();
    let result = result.map_err(|e| eyre!("Error fetching movies: {}", e))?;

    if !output.is_human() {
        output.json(&json!({
            "listing": result.listing,
            "movies": result.movies.iter().map(card_json).collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    if result.is_empty() {
        output.warn("No movies found");
        return Ok(());
    }

    let heading = match &result.listing {
        Listing::Popular => "Popular movies".to_string(),
        Listing::Search(term) => format!("Results for '{}'", term),
    };
    output.println(heading);

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Year"),
            Cell::new("Rating"),
            Cell::new("Lang"),
            Cell::new("Overview"),
        ]);
    for movie in &result.movies {
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title).fg(Color::Cyan),
            Cell::new(movie.release_year()),
            Cell::new(format!("★ {}", movie.rating_display())),
            Cell::new(movie.language_display()),
            Cell::new(movie.short_overview().unwrap_or_default()),
        ]);
    }
    output.println(table.to_string());
    output.println("Run 'moviescout availability <ID>' to see where a movie is streaming.");
    Ok(())
}

pub async fn run_trending(limit: Option<u32>, ctx: &Context, output: &Output) -> Result<()> {
    if ctx.collaborators.analytics.is_none() {
        output.warn("Search analytics is not configured; run 'moviescout config appwrite' to enable trending");
        return Ok(());
    }

    let limit = limit.unwrap_or(ctx.config.analytics.trending_limit).max(1);
    let spinner = Spinner::start("Loading trending searches...", output);
    let trending = browser(ctx).trending(limit).await;
    spinner.finish();

    if !output.is_human() {
        output.json(&json!({ "trending": trending }));
        return Ok(());
    }

    if trending.is_empty() {
        output.info("No trending searches yet");
        return Ok(());
    }

    output.println(trending_table(&trending).to_string());
    Ok(())
}

fn trending_table(trending: &[TrendingSearch]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Search").add_attribute(Attribute::Bold),
            Cell::new("Count"),
            Cell::new("Movie ID"),
        ]);
    for (rank, entry) in trending.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1).fg(Color::Yellow),
            Cell::new(&entry.search_term),
            Cell::new(entry.count),
            Cell::new(
                entry
                    .movie_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }
    table
}

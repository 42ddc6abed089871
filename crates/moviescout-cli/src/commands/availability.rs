use color_eyre::eyre::eyre;
use color_eyre::Result;
use futures::future::join_all;
use movie_discovery_core::{
    AvailabilityOutcome, AvailabilityPipeline, OverrideStatus, Platform, ResolvedPlatform, SubjectTracker,
};
use movie_discovery_models::MovieRef;
use movie_discovery_sources::{MetadataClient, SourceError};
use owo_colors::OwoColorize;
use serde_json::json;
use std::sync::Arc;

use super::ui::Spinner;
use super::Context;
use crate::output::Output;

struct Report {
    movie: MovieRef,
    outcome: AvailabilityOutcome,
}

pub async fn run_availability(
    movie_ids: Vec<u64>,
    title: Option<String>,
    region: Option<String>,
    ctx: &Context,
    output: &Output,
) -> Result<()> {
    if title.is_some() && movie_ids.len() > 1 {
        return Err(eyre!("--title can only be used with a single movie id"));
    }

    let region = region
        .map(|r| r.trim().to_uppercase())
        .unwrap_or_else(|| ctx.config.catalog.region.clone());
    if region.len() != 2 || !region.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(eyre!("Region must be a two-letter code, got '{}'", region));
    }

    let pipeline = AvailabilityPipeline::new(
        ctx.collaborators.metadata.clone(),
        ctx.collaborators.overrides.clone(),
        region,
    );

    let spinner = Spinner::start(
        format!("Checking availability in {}...", pipeline.region()),
        output,
    );
    // Each movie is its own subject; the runs share nothing mutable
    let reports = join_all(movie_ids.iter().map(|&movie_id| {
        let metadata = ctx.collaborators.metadata.clone();
        let title = title.clone();
        let pipeline = &pipeline;
        async move {
            let tracker = SubjectTracker::new();
            let guard = tracker.select_and_guard(Some(movie_id));
            match subject(metadata, movie_id, title).await {
                Ok(movie) => {
                    let outcome = pipeline.run(&movie, &guard).await;
                    Report { movie, outcome }
                }
                Err(e) => Report {
                    movie: MovieRef::new(movie_id, format!("Movie {}", movie_id)),
                    outcome: lookup_failed(&e),
                },
            }
        }
    }))
    .await;
    spinner.finish();

    let region = pipeline.region();
    for report in &reports {
        if output.is_human() {
            print_report(report, region, output);
        } else {
            output.json(&json!({
                "movie": report.movie,
                "region": region,
                "availability": report.outcome,
            }));
        }
    }
    Ok(())
}

/// Title for the link templates, from the flag or the catalog
async fn subject(
    metadata: Arc<dyn MetadataClient>,
    movie_id: u64,
    title: Option<String>,
) -> std::result::Result<MovieRef, SourceError> {
    if let Some(title) = title {
        return Ok(MovieRef::new(movie_id, title));
    }
    metadata
        .movie(movie_id)
        .await
        .map(|movie| movie.movie_ref())
        .map_err(|e| {
            tracing::warn!(movie_id, error = %e, "Failed to fetch movie details");
            e
        })
}

/// Outcome for a movie whose details could not be fetched
fn lookup_failed(error: &SourceError) -> AvailabilityOutcome {
    AvailabilityOutcome::Unknown {
        reason: error.to_string(),
        retryable: error.is_retryable(),
    }
}

fn print_report(report: &Report, region: &str, output: &Output) {
    let movie_id = report.movie.id.map(|id| id.to_string()).unwrap_or_default();
    output.println("");
    output.println(format!(
        "{} {}",
        report.movie.title.bold().bright_white(),
        format!("({})", movie_id).bright_black()
    ));

    match &report.outcome {
        AvailabilityOutcome::Available { platforms, overrides } => {
            output.println(format!("  Available on ({}):", region));
            for platform in platforms {
                output.println(format!(
                    "    {} {} {}",
                    platform_label(platform),
                    format!("({})", platform.link_kind()).bright_black(),
                    platform.url
                ));
            }
            print_override_note(overrides, output);
        }
        AvailabilityOutcome::NotAvailable { overrides } => {
            output.println(format!(
                "  {}",
                format!("Not yet available for streaming in {}", region).yellow()
            ));
            print_override_note(overrides, output);
        }
        AvailabilityOutcome::Unknown { reason, retryable } => {
            output.println(format!("  {}", "Availability unknown".red()));
            output.println(format!("  {}", reason.bright_black()));
            if *retryable {
                output.println("  Run the command again to retry.");
            }
        }
        AvailabilityOutcome::Stale => {}
    }
}

fn print_override_note(status: &OverrideStatus, output: &Output) {
    if let OverrideStatus::LookupFailed { reason } = status {
        output.warn(format!(
            "Direct links could not be loaded ({}); showing search links",
            reason
        ));
    }
}

fn platform_label(platform: &ResolvedPlatform) -> String {
    let name = platform.display_name.as_str();
    match Platform::from_key(&platform.platform_key) {
        Some(known) => {
            let (r, g, b) = known.accent_rgb();
            name.truecolor(r, g, b).bold().to_string()
        }
        None => name.bold().to_string(),
    }
}

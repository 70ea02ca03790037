//! Interactive mode.
//!
//! Walks through the dashboard sidebar controls with `dialoguer` prompts:
//! level, region, overlay toggles, province and canton, then renders the
//! view and optionally exports it. The layer is downloaded once and reused
//! until the user asks for a refresh.

use std::path::PathBuf;
use std::sync::Arc;

use dialoguer::{Confirm, Input, Select};
use ecuador_geo_cli_utils::{IndicatifProgress, MultiProgress};
use ecuador_geo_geography::index::{self, ProvinceCantonIndex};
use ecuador_geo_geography::{catalog, export, overlays, view};
use ecuador_geo_geography_models::{ALL, FilterSelection, Level, Region, ViewOutcome};
use ecuador_geo_source::arcgis::ArcGisLayerSource;
use ecuador_geo_source::cache::FeatureCache;
use ecuador_geo_source::{FeatureSet, FeatureSource, registry};

use crate::render;

/// What to do after a view has been shown or a download has failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextAction {
    ChangeFilters,
    Refresh,
    Retry,
    SourceInfo,
    Quit,
}

impl NextAction {
    const AFTER_VIEW: &[Self] = &[
        Self::ChangeFilters,
        Self::Refresh,
        Self::SourceInfo,
        Self::Quit,
    ];

    const AFTER_FAILURE: &[Self] = &[Self::Retry, Self::SourceInfo, Self::Quit];

    /// Menu entries offered depending on whether the layer is loaded.
    const fn menu(loaded: bool) -> &'static [Self] {
        if loaded {
            Self::AFTER_VIEW
        } else {
            Self::AFTER_FAILURE
        }
    }

    #[must_use]
    const fn label(self) -> &'static str {
        match self {
            Self::ChangeFilters => "Change filters",
            Self::Refresh => "Refresh data from the service",
            Self::Retry => "Retry the download",
            Self::SourceInfo => "Show data source",
            Self::Quit => "Quit",
        }
    }
}

fn prompt_next(loaded: bool) -> Result<NextAction, dialoguer::Error> {
    let menu = NextAction::menu(loaded);
    let labels: Vec<&str> = menu.iter().map(|a| a.label()).collect();
    let idx = Select::new()
        .with_prompt("What next?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(menu[idx])
}

/// Returns the layer's features, fetching them if the cache is empty. A
/// failed fetch is logged and reported as `None`.
async fn load<S: FeatureSource>(cache: &mut FeatureCache<S>) -> Option<Arc<FeatureSet>> {
    match cache.get().await {
        Ok(set) => Some(set),
        Err(e) => {
            log::error!("Failed to load the parish layer: {e}");
            println!();
            println!("Could not download the parish layer: {e}");
            None
        }
    }
}

/// Overlay and export toggles.
struct Toggles {
    points: bool,
    risk: bool,
    export: bool,
}

/// Province choices for `region`: `(all)` first, then its provinces sorted.
fn province_choices(region: &Region) -> Vec<&'static str> {
    std::iter::once(ALL)
        .chain(catalog::sorted_provinces(region))
        .collect()
}

/// Canton choices for `province`, or `None` if no canton prompt applies.
fn canton_choices<'a>(index: &'a ProvinceCantonIndex, province: Option<&str>) -> Option<Vec<&'a str>> {
    let cantons = index::cantons_of(index, province?);
    if cantons.is_empty() {
        return None;
    }

    Some(
        std::iter::once(ALL)
            .chain(cantons.iter().map(String::as_str))
            .collect(),
    )
}

fn prompt_confirm(prompt: &str, default: bool) -> Result<bool, dialoguer::Error> {
    Confirm::new().with_prompt(prompt).default(default).interact()
}

/// Prompts for the sidebar controls.
fn prompt_selection(
    index: &ProvinceCantonIndex,
) -> Result<(FilterSelection, Toggles), Box<dyn std::error::Error>> {
    let level_labels: Vec<&str> = Level::ALL.iter().map(|l| l.label()).collect();
    let level_idx = Select::new()
        .with_prompt("Display level")
        .items(&level_labels)
        .default(0)
        .interact()?;
    let level = Level::ALL[level_idx];

    let regions = catalog::regions();
    let region_labels: Vec<&str> = regions.iter().map(|r| r.name).collect();
    let region_idx = Select::new()
        .with_prompt("Region")
        .items(&region_labels)
        .default(0)
        .interact()?;
    let region = &regions[region_idx];

    let points = prompt_confirm("Show points of interest?", true)?;
    let risk = prompt_confirm("Show security indicators?", true)?;

    let provinces = province_choices(region);
    let province_idx = Select::new()
        .with_prompt("Province")
        .items(&provinces)
        .default(0)
        .max_length(15)
        .interact()?;
    let selection = FilterSelection::new(level, region.name).with_province(Some(provinces[province_idx]));

    let selection = match canton_choices(index, selection.province()) {
        Some(cantons) => {
            let canton_idx = Select::new()
                .with_prompt("Canton")
                .items(&cantons)
                .default(0)
                .max_length(15)
                .interact()?;
            let canton = cantons[canton_idx];
            selection.with_canton(Some(canton))
        }
        None => selection,
    };

    let export = prompt_confirm("Export CSV?", false)?;

    Ok((selection, Toggles { points, risk, export }))
}

fn show(outcome: &ViewOutcome, toggles: &Toggles) {
    println!();
    print!("{}", render::kpis(outcome));
    println!();

    match outcome.view() {
        Some(view) => {
            print!("{}", render::rows_table(&view.projection.rows));
            println!();
            print!("{}", render::hierarchy_tree(&view.projection.hierarchy));
        }
        None => println!("{}", ViewOutcome::EMPTY_MESSAGE),
    }

    if toggles.points {
        println!();
        print!("{}", render::points(overlays::points_of_interest()));
    }

    if toggles.risk {
        println!();
        print!("{}", render::risk_overview());
    }
}

fn export_rows(outcome: &ViewOutcome) -> Result<(), Box<dyn std::error::Error>> {
    let path: String = Input::new()
        .with_prompt("Output file")
        .default(export::EXPORT_FILENAME.to_string())
        .interact_text()?;
    let path = PathBuf::from(path);

    let rows = outcome
        .view()
        .map(|v| v.projection.rows.as_slice())
        .unwrap_or_default();
    export::write_csv(rows, std::fs::File::create(&path)?)?;
    log::info!("Wrote {} rows to {}", rows.len(), path.display());

    Ok(())
}

/// Runs the interactive loop until the user quits.
///
/// A failed download does not end the session: the error is shown and the
/// user can retry or quit.
///
/// # Errors
///
/// Returns an error if the layer configuration is invalid, a prompt fails,
/// or the export cannot be written.
pub async fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let source = ArcGisLayerSource::new(registry::layer_from_env()?)?
        .with_progress(IndicatifProgress::download_spinner(multi));
    let mut cache = FeatureCache::new(source);

    println!("Ecuador administrative geography");
    println!();

    loop {
        let Some(set) = load(&mut cache).await else {
            loop {
                match prompt_next(false)? {
                    NextAction::SourceInfo => print!("{}", render::source_status(&cache.status())),
                    NextAction::Quit => return Ok(()),
                    _ => break,
                }
            }
            continue;
        };
        let index = index::build_index(&set.features);

        let (selection, toggles) = prompt_selection(&index)?;
        let outcome = view::build_view(&set.features, &selection);
        show(&outcome, &toggles);

        if toggles.export {
            export_rows(&outcome)?;
        }

        loop {
            match prompt_next(true)? {
                NextAction::ChangeFilters | NextAction::Retry => break,
                NextAction::Refresh => {
                    cache.invalidate();
                    break;
                }
                NextAction::SourceInfo => print!("{}", render::source_status(&cache.status())),
                NextAction::Quit => return Ok(()),
            }
        }
    }
}

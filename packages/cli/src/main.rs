#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal front end for the Ecuador administrative geography dashboard.
//!
//! ```text
//! ecuador_geo view --level canton --region Sierra --province Azuay
//! ecuador_geo export --region Costa -o costa.csv
//! ecuador_geo hierarchy [--region Sierra]
//! ecuador_geo regions | points | risk [--top 10]
//! ecuador_geo serve
//! ```
//!
//! Running with no subcommand enters interactive mode, which walks through
//! the same controls as the dashboard sidebar.
//!
//! Uses `indicatif-log-bridge` (via [`ecuador_geo_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and the download spinner never fight for the terminal.

mod interactive;
mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ecuador_geo_cli_utils::{IndicatifProgress, MultiProgress};
use ecuador_geo_geography::{catalog, export, filter, index, overlays, view};
use ecuador_geo_geography_models::{FilterSelection, Level, ViewOutcome};
use ecuador_geo_source::arcgis::ArcGisLayerSource;
use ecuador_geo_source::{FeatureSet, FeatureSource as _, registry};

#[derive(Parser)]
#[command(
    name = "ecuador_geo",
    about = "Explore Ecuador's provinces, cantons and parishes"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the headline figures, table and drill-down tree for a selection
    View {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Also list the points-of-interest overlay
        #[arg(long)]
        points: bool,
        /// Also show the security risk table and top 10 ranking
        #[arg(long)]
        risk: bool,
    },
    /// Write the table for a selection as CSV
    Export {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Output file
        #[arg(short, long, default_value = export::EXPORT_FILENAME)]
        output: PathBuf,
    },
    /// List each province's cantons as found in the layer
    Hierarchy {
        /// Only list this region's provinces
        #[arg(long)]
        region: Option<String>,
    },
    /// List regions and their provinces
    Regions,
    /// List the points-of-interest overlay
    Points,
    /// Show the security risk table
    Risk {
        /// Only show the highest-risk provinces
        #[arg(long)]
        top: Option<usize>,
    },
    /// Start the HTTP API server
    Serve,
}

#[derive(Args)]
struct SelectionArgs {
    /// PROVINCE, CANTON or PARISH
    #[arg(long, default_value_t = Level::Province)]
    level: Level,
    /// Region name (defaults to the province's region, or the first region)
    #[arg(long)]
    region: Option<String>,
    /// Province name, or "(all)"
    #[arg(long)]
    province: Option<String>,
    /// Canton name, or "(all)"; ignored at province level
    #[arg(long)]
    canton: Option<String>,
}

impl SelectionArgs {
    fn to_selection(&self) -> Result<FilterSelection, Box<dyn std::error::Error>> {
        let region = match self.region.as_deref() {
            Some(region) => region,
            None => catalog::default_region(self.province.as_deref()),
        };

        let selection = FilterSelection::new(self.level, region)
            .with_province(self.province.as_deref())
            .with_canton(self.canton.as_deref());
        filter::validate(&selection)?;
        Ok(selection)
    }
}

/// Downloads the parish layer, showing a spinner while it runs.
async fn load_features(multi: &MultiProgress) -> Result<FeatureSet, Box<dyn std::error::Error>> {
    let source = ArcGisLayerSource::new(registry::layer_from_env()?)?
        .with_progress(IndicatifProgress::download_spinner(multi));
    Ok(source.fetch().await?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = ecuador_geo_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run(&multi).await;
    };

    match command {
        Commands::View {
            selection,
            points,
            risk,
        } => {
            let selection = selection.to_selection()?;
            let set = load_features(&multi).await?;
            let outcome = view::build_view(&set.features, &selection);

            print!("{}", render::kpis(&outcome));
            println!();
            match outcome.view() {
                Some(view) => {
                    print!("{}", render::rows_table(&view.projection.rows));
                    println!();
                    print!("{}", render::hierarchy_tree(&view.projection.hierarchy));
                }
                None => println!("{}", ViewOutcome::EMPTY_MESSAGE),
            }

            if points {
                println!();
                print!("{}", render::points(overlays::points_of_interest()));
            }
            if risk {
                println!();
                print!("{}", render::risk_overview());
            }
        }
        Commands::Export { selection, output } => {
            let selection = selection.to_selection()?;
            let set = load_features(&multi).await?;
            let outcome = view::build_view(&set.features, &selection);
            let rows = outcome
                .view()
                .map(|v| v.projection.rows.as_slice())
                .unwrap_or_default();

            let file = std::fs::File::create(&output)?;
            export::write_csv(rows, file)?;
            log::info!("Wrote {} rows to {}", rows.len(), output.display());
        }
        Commands::Hierarchy { region } => {
            let region = match region.as_deref() {
                Some(name) => Some(catalog::region(name).ok_or_else(|| {
                    ecuador_geo_geography::GeoError::UnknownRegion {
                        region: name.to_string(),
                    }
                })?),
                None => None,
            };
            let set = load_features(&multi).await?;
            let index = index::build_index(&set.features);
            print!("{}", render::province_index(&index, region));
        }
        Commands::Regions => print!("{}", render::regions(catalog::regions())),
        Commands::Points => print!("{}", render::points(overlays::points_of_interest())),
        Commands::Risk { top } => {
            let entries = match top {
                Some(n) => overlays::risk_ranking(n),
                None => overlays::risk_indices().iter().collect(),
            };
            print!("{}", render::risk_table(&entries));
            println!();
            print!("{}", render::risk_bars(&entries));
        }
        Commands::Serve => {
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(ecuador_geo_server::run_server(
                    ecuador_geo_server::ServerConfig::from_env(),
                ))
            })
            .await??;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_selection(args: &[&str]) -> Result<SelectionArgs, clap::Error> {
        let cli = Cli::try_parse_from(["ecuador_geo", "view"].iter().chain(args).copied())?;
        match cli.command {
            Some(Commands::View { selection, .. }) => Ok(selection),
            _ => panic!("expected the view subcommand"),
        }
    }

    #[test]
    fn level_parses_case_insensitively() {
        let args = view_selection(&["--level", "canton"]).unwrap();
        assert_eq!(args.level, Level::Canton);

        let args = view_selection(&["--level", "PARISH"]).unwrap();
        assert_eq!(args.level, Level::Parish);
    }

    #[test]
    fn level_defaults_to_province() {
        let args = view_selection(&[]).unwrap();
        assert_eq!(args.level, Level::Province);
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(view_selection(&["--level", "district"]).is_err());
    }

    #[test]
    fn region_defaults_from_province() {
        let selection = view_selection(&["--province", "Azuay"])
            .unwrap()
            .to_selection()
            .unwrap();
        assert_eq!(selection.region, "Sierra");
    }

    #[test]
    fn mismatched_province_is_rejected() {
        let args = view_selection(&["--region", "Costa", "--province", "Azuay"]).unwrap();
        assert!(args.to_selection().is_err());
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["ecuador_geo"]).unwrap();
        assert!(cli.command.is_none());
    }
}

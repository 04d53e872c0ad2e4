//! Subcommand implementations.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use places_analysis::{
    create_pivot_table_with, filter_by_measures, filter_by_regions, get_correlation,
    pivot_to_dataframe, summarize_all, summarize_measure, table_to_dataframe,
};
use places_client::{ClientConfig, PlacesClient};
use places_model::Table;
use places_cli::output::{
    correlation_table, measures_table, pivot_table, records_table, releases_table, summary_table,
    write_csv,
};

use crate::cli::{ConnectionArgs, CorrelateArgs, CountyArgs, FilterArgs, PivotArgs, SummarizeArgs};

/// Builds the client configuration from the config file, then flags and environment.
pub fn resolve_config(args: &ConnectionArgs) -> Result<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load_from(path)?,
        None => ClientConfig::default(),
    };
    if let Some(token) = &args.app_token {
        config.app_token.clone_from(token);
    }
    if let Some(base_url) = &args.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(seconds) = args.timeout {
        config.timeout_secs = Some(seconds);
    }
    if config.app_token.trim().is_empty() {
        bail!("missing app token: pass --app-token, set PLACES_APP_TOKEN, or use --config");
    }
    Ok(config)
}

fn connect(args: &ConnectionArgs) -> Result<PlacesClient> {
    let config = resolve_config(args)?;
    PlacesClient::from_config(&config).context("create PLACES client")
}

pub fn run_releases() -> Result<()> {
    println!("{}", releases_table());
    Ok(())
}

pub fn run_measures(connection: &ConnectionArgs) -> Result<()> {
    let client = connect(connection)?;
    let measures = client.get_measure_list().context("load measure catalog")?;
    info!(count = measures.len(), "Loaded measure catalog");
    println!("{}", measures_table(&measures));
    Ok(())
}

pub fn run_county(connection: &ConnectionArgs, args: &CountyArgs) -> Result<()> {
    let _span = info_span!("county", release = %args.release).entered();
    let table = load_filtered(connection, &args.release, &args.filters)?;

    match &args.output {
        Some(path) => {
            let mut frame = table_to_dataframe(&table)?;
            write_csv(&mut frame, path)?;
            println!("Wrote {} rows to {}", table.len(), path.display());
        }
        None => {
            println!("{}", records_table(&table, args.limit));
            if table.len() > args.limit {
                println!("… {} more rows (use --output to export all)", table.len() - args.limit);
            }
        }
    }
    Ok(())
}

pub fn run_summarize(connection: &ConnectionArgs, args: &SummarizeArgs) -> Result<()> {
    let _span = info_span!("summarize", release = %args.release).entered();
    let table = load_filtered(connection, &args.release, &args.filters)?;

    let summaries = match &args.measure_id {
        Some(measure_id) => match summarize_measure(&table, measure_id)? {
            Some(summary) => vec![summary],
            None => bail!("no values recorded for measure {measure_id}"),
        },
        None => summarize_all(&table)?,
    };
    println!("{}", summary_table(&summaries));
    Ok(())
}

pub fn run_correlate(connection: &ConnectionArgs, args: &CorrelateArgs) -> Result<()> {
    let _span = info_span!("correlate", release = %args.release, x = %args.x, y = %args.y).entered();
    let table = load_filtered(connection, &args.release, &args.filters)?;

    let correlation = get_correlation(&table, &args.x, &args.y)?;
    if correlation.corr_coef.is_none() {
        warn!(
            sample_size = correlation.sample_size,
            "Correlation undefined for these measures"
        );
    }
    println!("{}", correlation_table(&correlation));
    Ok(())
}

pub fn run_pivot(connection: &ConnectionArgs, args: &PivotArgs) -> Result<()> {
    let _span = info_span!("pivot", release = %args.release).entered();
    let table = load_filtered(connection, &args.release, &args.filters)?;

    let pivot = create_pivot_table_with(&table, args.level.into(), args.duplicates.into())?;
    info!(
        locations = pivot.len(),
        measures = pivot.measures().len(),
        "Built pivot table"
    );
    match &args.output {
        Some(path) => {
            let mut frame = pivot_to_dataframe(&pivot)?;
            write_csv(&mut frame, path)?;
            println!("Wrote {} rows to {}", pivot.len(), path.display());
        }
        None => println!("{}", pivot_table(&pivot, args.limit)),
    }
    Ok(())
}

fn load_filtered(connection: &ConnectionArgs, release: &str, filters: &FilterArgs) -> Result<Table> {
    let client = connect(connection)?;
    let table = client
        .get_county_data(release)
        .with_context(|| format!("load county data for release {release}"))?;
    info!(rows = table.len(), "Loaded county data");

    let table = filter_by_regions(&table, &filters.region_filter())?;
    let table = filter_by_measures(&table, &filters.measure_filter())?;
    info!(rows = table.len(), "Applied filters");
    Ok(table)
}

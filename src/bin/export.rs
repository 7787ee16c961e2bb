use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use tdx_asset_export::config::Config;
use tdx_asset_export::handoff;
use tdx_asset_export::output::CsvReport;
use tdx_asset_export::tdx::{ApiError, TdxClient};
use tdx_asset_export::transform::derive_groups;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cfg = Config::from_env()?;
    cfg.validate()?;

    init_logging(&cfg.log_dir)?;
    info!(
        "tdx-asset-export starting; base_url={} report_id={} key={} output={}",
        cfg.base_url,
        cfg.report_id,
        cfg.masked_key(),
        cfg.output_path
    );

    run(&cfg).await?;

    info!("tdx-asset-export finished");
    Ok(())
}

async fn run(cfg: &Config) -> Result<()> {
    let output_path = Path::new(&cfg.output_path);
    // Created before any network call, so a failed auth or fetch still leaves a
    // header-only file for the downstream automation to find.
    let mut report_csv = CsvReport::create(output_path)?;

    let client = TdxClient::new(cfg)?;

    let token = match client.login_admin(&cfg.beid, &cfg.web_services_key).await {
        Ok(token) => {
            info!("TDX API key retrieved");
            token
        }
        Err(err @ ApiError::AuthFailed { .. }) => {
            error!("{}; exiting", err);
            return report_csv.finish();
        }
        Err(err) => return Err(err.into()),
    };

    let envelope = match client.fetch_report(&token, &cfg.report_id).await {
        Ok(envelope) => envelope,
        Err(err @ ApiError::ReportFailed { .. }) => {
            error!("{}; exiting", err);
            return report_csv.finish();
        }
        Err(err) => return Err(err.into()),
    };

    let rows = envelope.data_rows;
    info!("Report retrieved; rows of data: {}", rows.len());
    if rows.is_empty() {
        info!("No new requests; exiting");
        return report_csv.finish();
    }

    let total = rows.len();
    for (idx, row) in rows.iter().enumerate() {
        let record = derive_groups(row);
        info!(
            "Row {}/{}: asset='{}' serial='{}' type='{}' dept='{}' building='{}'",
            idx + 1,
            total,
            record.asset_name,
            record.serial_number,
            row.provisioning_type,
            row.owning_department_name,
            row.location_name
        );
        debug!(
            "Row {}/{}: groups provisioning='{}' dept='{}' building='{}' combo='{}' primary_user='{}'",
            idx + 1,
            total,
            record.group_name_provisioning,
            record.group_name_dept,
            record.group_name_building,
            record.group_name_combo,
            record.primary_user
        );
        report_csv.append(&record)?;
    }
    report_csv.finish()?;
    info!("Wrote {} records to {}", total, output_path.display());

    if cfg.handoff_command.trim().is_empty() {
        info!("HANDOFF_COMMAND is empty; skipping handoff");
    } else if let Err(err) = handoff::launch(&cfg.handoff_command, output_path) {
        warn!("Handoff launch failed: {:#}", err);
    }

    Ok(())
}

/// Points the subscriber at a dated log file; reruns on the same day append to it.
fn init_logging(log_dir: &str) -> Result<()> {
    std::fs::create_dir_all(log_dir).with_context(|| format!("create log dir {}", log_dir))?;
    let path = Path::new(log_dir).join(format!(
        "tdx-asset-export-{}.log",
        chrono::Local::now().date_naive()
    ));
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

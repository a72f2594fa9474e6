//! Log command: parse a meal and record it to Google Sheets and Calendar.

use std::io::Write;

use anyhow::{Context, Result, bail};

use nutri_core::{FormattedRecord, format_meal_record, kst_now, parse_meal};
use nutri_google::{Client, Credentials, SyncOutcome};

use crate::Config;

pub fn run<W: Write>(writer: &mut W, input: &str, dry_run: bool, config: &Config) -> Result<()> {
    let meal = parse_meal(input);
    if meal.items.is_empty() {
        writeln!(writer, "인식된 음식이 없어 기록하지 않았습니다.")?;
        return Ok(());
    }

    let record = format_meal_record(&meal, kst_now());

    if dry_run {
        write_record(writer, &record)?;
        return Ok(());
    }

    let credentials = credentials_from(config)?;
    let client = Client::new(credentials).context("failed to create Google client")?;

    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let report = runtime.block_on(client.save_meal(
        config.spreadsheet_id.as_deref(),
        &config.calendar_id,
        &record,
    ));

    write_outcome(writer, "Sheets", &report.sheets)?;
    write_outcome(writer, "Calendar", &report.calendar)?;

    if report.all_failed() {
        bail!("recording failed for both Google Sheets and Google Calendar");
    }
    Ok(())
}

/// Requires all three Google credentials from config or `NUTRI_*` env vars.
fn credentials_from(config: &Config) -> Result<Credentials> {
    let missing = |name: &str| {
        anyhow::anyhow!(
            "missing {name} (set NUTRI_{} or config.toml)",
            name.to_uppercase()
        )
    };

    let client_id = config
        .google_client_id
        .as_deref()
        .ok_or_else(|| missing("google_client_id"))?;
    let client_secret = config
        .google_client_secret
        .as_deref()
        .ok_or_else(|| missing("google_client_secret"))?;
    let refresh_token = config
        .google_refresh_token
        .as_deref()
        .ok_or_else(|| missing("google_refresh_token"))?;

    Credentials::new(client_id, client_secret, refresh_token)
        .context("Google credentials are not usable")
}

fn write_record<W: Write>(writer: &mut W, record: &FormattedRecord) -> Result<()> {
    writeln!(writer, "기록될 행:")?;
    for row in &record.rows {
        writeln!(
            writer,
            "- [{}] {} {}{} | {}g | {}kcal",
            row.meal, row.item, row.qty, row.unit, row.grams, row.kcal
        )?;
    }
    writeln!(writer)?;
    writeln!(writer, "{}", record.event.title)?;
    writeln!(writer, "{}", record.event.description)?;
    Ok(())
}

fn write_outcome<W: Write>(writer: &mut W, service: &str, outcome: &SyncOutcome) -> Result<()> {
    let mark = if outcome.success { "✓" } else { "✗" };
    match &outcome.link {
        Some(link) => writeln!(writer, "{mark} {service}: {} ({link})", outcome.message)?,
        None => writeln!(writer, "{mark} {service}: {}", outcome.message)?,
    }
    Ok(())
}

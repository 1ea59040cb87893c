//! Wiring of configuration, adapters and the reminder service

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, bail};
use application::{
    BirthdayReminderService, ExportOutcome, RunReport,
    services::subject_formatter::format_birth_date,
};
use chrono::Utc;
use infrastructure::{
    AppConfig, IcsFileExportAdapter, SmtpNotificationAdapter, TemplateEngine,
    TeraTemplateAdapter, VcfDirectoryAdapter,
};
use tracing::{info, warn};

/// Build the service from a validated configuration
///
/// `export_path` attaches the calendar exporter regardless of
/// `calendar_export.enabled`.
pub fn build_service(
    config: &AppConfig,
    export_path: Option<PathBuf>,
) -> anyhow::Result<BirthdayReminderService> {
    let settings = config.reminder_settings()?;

    let directory = VcfDirectoryAdapter::new(config.directory.to_directory_config())
        .context("Failed to create directory client")?;

    let sender = config.smtp.sender().context("Invalid sender address")?;
    let notifier = SmtpNotificationAdapter::new(config.smtp.to_smtp_config(), sender);

    let engine = TemplateEngine::with_config(&config.reminder.to_template_config())
        .context("Failed to load notification template")?;
    info!(source = ?engine.source(), "Template loaded");

    let service = BirthdayReminderService::new(
        Arc::new(directory),
        Arc::new(notifier),
        Arc::new(TeraTemplateAdapter::new(engine)),
        settings,
    );

    let export_path = export_path.or_else(|| {
        config
            .calendar_export
            .enabled
            .then(|| config.calendar_export.output_path.clone())
    });
    Ok(match export_path {
        Some(path) => service.with_exporter(Arc::new(IcsFileExportAdapter::new(path))),
        None => service,
    })
}

/// `run`: notify and export; fails when any notification or the export failed
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let service = build_service(config, None)?;
    let report = service.run(Utc::now()).await?;
    log_report(&report);

    if !report.is_success() {
        bail!(
            "Run finished with {} failed notification(s){}",
            report.failures.len(),
            match &report.export {
                ExportOutcome::Failed(reason) => format!(" and a failed export: {reason}"),
                _ => String::new(),
            }
        );
    }
    Ok(())
}

/// `today`: print today's birthdays
#[allow(clippy::print_stdout)]
pub async fn today(config: &AppConfig) -> anyhow::Result<()> {
    let service = build_service(config, None)?;
    let date_format = &service.settings().date_format;
    let (today, matches) = service.birthdays_today(Utc::now()).await?;

    if matches.is_empty() {
        println!("{today}: no birthdays");
        return Ok(());
    }
    println!("{today}:");
    for record in &matches {
        println!(
            "  {} (*{})",
            record.name(),
            format_birth_date(record.birth_date(), date_format)
        );
    }
    Ok(())
}

/// `export`: write the calendar only
#[allow(clippy::print_stdout)]
pub async fn export(config: &AppConfig, output: Option<PathBuf>) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(|| config.calendar_export.output_path.clone());
    let service = build_service(config, Some(output))?;

    match service.export(Utc::now()).await? {
        ExportOutcome::Written(receipt) => {
            println!("Wrote {} event(s) to {}", receipt.events, receipt.location);
            Ok(())
        },
        ExportOutcome::Failed(reason) => bail!("Calendar export failed: {reason}"),
        ExportOutcome::Disabled => bail!("Calendar export is not configured"),
    }
}

/// `check-config`: print the effective configuration with secrets redacted
#[allow(clippy::print_stdout)]
pub fn check_config(config: &AppConfig) {
    println!("Configuration OK");
    println!("  directory: {}", config.directory.url);
    println!(
        "  smtp: {}:{} as {:?}",
        config.smtp.host, config.smtp.port, config.smtp.username
    );
    println!("  receiver: {}", config.smtp.receiver_email);
    println!(
        "  reminder: {} / {} / {}",
        config.reminder.timezone,
        config.reminder.language.code(),
        config.reminder.date_format
    );
    if config.calendar_export.enabled {
        println!(
            "  calendar export: {}",
            config.calendar_export.output_path.display()
        );
    } else {
        println!("  calendar export: disabled");
    }
}

fn log_report(report: &RunReport) {
    info!(
        today = %report.today,
        contacts = report.contacts,
        birthdays = report.birthdays,
        matched = report.matched.len(),
        notified = report.notified.len(),
        "Run finished"
    );
    for failure in &report.failures {
        warn!(name = %failure.name, reason = %failure.reason, "Notification not delivered");
    }
}

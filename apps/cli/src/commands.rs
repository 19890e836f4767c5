//! # Subcommands
//!
//! Each subcommand drives the same screen flow the UI would:
//! submit the form, open the preview, then render and export it.
//!
//! ```text
//! form.json ──► AppState::submit ──► toggle_preview ──► preview(today)
//!                    │ invalid                               │
//!                    ▼                                       ▼
//!              field errors                  RasterRenderer::render
//!                                                            │
//!                                            DocumentExporter::export
//!                                                            │
//!                                             <out>/bill_preview.pdf
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{info, instrument, warn};

use vistara_core::{AppState, BillForm, FieldErrors, Preview};
use vistara_export::{DocumentExporter, ImageOrigin, Logo, RasterRenderer};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Prints the starter form.
pub fn template() -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&BillForm::starter())?);
    Ok(())
}

/// Prints every invalid field, or confirms the form is valid.
pub fn validate(form_path: &Path) -> CliResult<()> {
    let form = read_form(form_path)?;
    match AppState::new().submit(&form) {
        Ok(_) => {
            println!("Form is valid");
            Ok(())
        }
        Err(errors) => {
            eprint!("{}", format_field_errors(&errors));
            Err(errors.into())
        }
    }
}

/// Prints the preview for a valid form.
pub fn preview(form_path: &Path, json: bool) -> CliResult<()> {
    let preview = open_preview(&read_form(form_path)?, today())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
    } else {
        print!("{}", format_preview(&preview));
    }
    Ok(())
}

/// Renders the preview and writes `bill_preview.pdf` into `out_dir`.
#[instrument(skip(config))]
pub async fn export(form_path: &Path, config: &CliConfig, out_dir: &Path) -> CliResult<PathBuf> {
    let preview = open_preview(&read_form(form_path)?, today())?;

    let mut renderer = RasterRenderer::new(config.surface_width);
    if let Some(path) = &config.logo_path {
        renderer = renderer.with_logo(load_logo(path)?);
    }
    let renderer = Arc::new(renderer);
    let surface = renderer.render(&preview);

    let exporter = DocumentExporter::new(Arc::clone(&renderer));
    let artifact = exporter.export(Some(surface)).await;
    renderer.release(surface);

    let path = artifact?.save_in(out_dir).await?;
    info!(?path, invoice = preview.invoice_number(), "Bill exported");
    Ok(path)
}

// =============================================================================
// Helpers
// =============================================================================

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn read_form(path: &Path) -> CliResult<BillForm> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

/// Submits a form and opens the preview, as the bill screen does.
fn open_preview(form: &BillForm, issued_on: NaiveDate) -> CliResult<Preview> {
    let state = AppState::new().submit(form).map_err(|errors| {
        warn!(fields = errors.len(), "Form rejected");
        eprint!("{}", format_field_errors(&errors));
        CliError::from(errors)
    })?;

    state
        .toggle_preview()
        .preview(issued_on)
        .ok_or(CliError::PreviewClosed)
}

/// Logos read from local disk share the bill's origin.
fn load_logo(path: &Path) -> CliResult<Logo> {
    let image = image::open(path).map_err(|e| CliError::Logo {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(Logo {
        image: Arc::new(image.to_rgb8()),
        origin: ImageOrigin::SameOrigin,
    })
}

fn format_field_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for (field, message) in errors.iter() {
        let _ = writeln!(out, "  {field}: {message}");
    }
    out
}

/// Plain-text rendering of the preview, top to bottom.
fn format_preview(preview: &Preview) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", vistara_core::STUDIO_NAME);
    let _ = writeln!(out, "INVOICE NO: {}", preview.invoice_number());
    let _ = writeln!(out, "DATE: {}", preview.issue_date_label());
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", vistara_core::ISSUER_LABEL);
    for line in preview.recipient_lines() {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out);
    for line in preview.event_lines() {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", vistara_core::TABLE_TITLE);
    let _ = writeln!(out, "{:<6}{:<40}{:>12}", "S.No", "Description", "Amount");
    for row in &preview.rows {
        let index = row.display_index().map(|i| i.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "{:<6}{:<40}{:>12}",
            index,
            row.description(),
            row.amount().to_plain_string()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vistara_core::ItemForm;

    fn form() -> BillForm {
        BillForm {
            name: "Asha Rao".to_string(),
            address: "12 MG Road, Pune".to_string(),
            phone: "9876543210".to_string(),
            event_date: "2024-11-02".to_string(),
            event_name: "Wedding".to_string(),
            event_venue: "Lotus Hall".to_string(),
            items: vec![ItemForm::new("Camera", "100"), ItemForm::new("Lens", "50")],
        }
    }

    fn write_form(dir: &Path, form: &BillForm) -> PathBuf {
        let path = dir.join("form.json");
        std::fs::write(&path, serde_json::to_string(form).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_format_preview() {
        let issued = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let text = format_preview(&open_preview(&form(), issued).unwrap());

        assert!(text.contains("INVOICE NO: 9876543210"));
        assert!(text.contains("DATE: 19/10/2026"));
        assert!(text.contains("Event Venue: Lotus Hall"));

        let table: Vec<_> = text
            .lines()
            .skip_while(|l| !l.starts_with("S.No"))
            .skip(1)
            .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect();
        assert_eq!(
            table,
            vec![
                "1 Camera 100.00",
                "2 Lens 50.00",
                "Total 150.00",
                "GST (18%) 27.00",
                "Final Amount 177.00",
            ]
        );
    }

    #[test]
    fn test_invalid_form_is_rejected() {
        let mut bad = form();
        bad.phone = "12345".to_string();
        bad.items[0].amount = "0".to_string();

        let issued = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        match open_preview(&bad, issued) {
            Err(CliError::Rejected(errors)) => {
                assert!(errors.get("phone").is_some());
                assert!(errors.get("items[0].amount").is_some());
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_form_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(read_form(&path), Err(CliError::MalformedForm(_))));
        assert!(matches!(
            read_form(&dir.path().join("absent.json")),
            Err(CliError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn test_export_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let form_path = write_form(dir.path(), &form());
        let out_dir = dir.path().join("out");

        let path = export(&form_path, &CliConfig::default(), &out_dir)
            .await
            .unwrap();

        assert_eq!(path, out_dir.join("bill_preview.pdf"));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_with_missing_logo_fails() {
        let dir = tempfile::tempdir().unwrap();
        let form_path = write_form(dir.path(), &form());
        let config = CliConfig {
            logo_path: Some(dir.path().join("logo.png")),
            ..CliConfig::default()
        };

        let result = export(&form_path, &config, dir.path()).await;
        assert!(matches!(result, Err(CliError::Logo { .. })));
    }
}

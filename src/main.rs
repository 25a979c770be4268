use clap::Parser;
use complaint_form::{cli, config, error, export, interactive, logging, mailer, photos, pipeline};
use cli::{Cli, Commands};
use complaint_form::common::{format_phone, FieldUpdate, FormState};
use config::{mask_secret, Config};
use error::ComplaintError;
use export::pdf::PdfFont;
use indicatif::ProgressBar;
use mailer::EmailJsClient;
use pipeline::SubmissionPipeline;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Fill { photos, photos_dir, save, output_json, no_send } => {
            let config = Config::load()?;
            let photos = photos::collect_photos(&photos, photos_dir.as_deref())?;
            let form = interactive::fill_form_interactive(photos)?;

            if let Some(path) = output_json {
                std::fs::write(&path, form.to_json()?)?;
                println!("✔ Formulář uložen: {}", path.display());
            }

            if let Some(path) = save {
                let font = PdfFont::from_config(config.font_path.as_deref());
                export::export_pdf(&form, &font, &path)?;
            }

            if no_send {
                println!("\n✅ Hotovo (bez odeslání)");
                return Ok(());
            }

            if !interactive::confirm_submission(&form)? {
                println!("Odeslání zrušeno");
                return Ok(());
            }

            submit_form(config, &form).await;
        }

        Commands::Submit { input, photos } => {
            println!("📨 complaint-form - odeslání\n");
            let config = Config::load()?;

            let form = load_form(&input)?;
            form.ensure_valid()?;

            let mut attached = photos::reload_photos(form.photos())?;
            attached.extend(photos::collect_photos(&photos, None)?);
            let form = form.apply(FieldUpdate::Photos(attached));

            submit_form(config, &form).await;
        }

        Commands::Save { input, output } => {
            println!("📄 complaint-form - uložit jako PDF\n");

            let form = load_form(&input)?;
            let font = Config::config_path()
                .map(|path| PdfFont::load(&path))
                .unwrap_or_default();
            let output = output.unwrap_or_else(|| PathBuf::from("."));
            export::export_pdf(&form, &font, &output)?;
        }

        Commands::Phone { country_code, number } => {
            println!("{}", format_phone(&country_code, &number));
        }

        Commands::Config {
            show,
            set_service_id,
            set_template_id,
            set_public_key,
            set_recipient,
            set_font,
            set_recovery_dir,
            attach_photos,
        } => {
            // Env overrides stay out of the stored file
            let config_path = Config::config_path()?;
            let mut stored = Config::load_from(&config_path)?;
            let mut changed = false;

            if let Some(v) = set_service_id {
                stored.emailjs.service_id = v;
                changed = true;
            }
            if let Some(v) = set_template_id {
                stored.emailjs.template_id = v;
                changed = true;
            }
            if let Some(v) = set_public_key {
                stored.emailjs.public_key = v;
                changed = true;
            }
            if let Some(v) = set_recipient {
                stored.emailjs.recipient = v;
                changed = true;
            }
            if let Some(v) = set_font {
                stored.font_path = Some(v);
                changed = true;
            }
            if let Some(v) = set_recovery_dir {
                stored.recovery_dir = Some(v);
                changed = true;
            }
            if let Some(v) = attach_photos {
                stored.attach_photos = v;
                changed = true;
            }

            if changed {
                stored.save_to(&config_path)?;
                println!("✔ Nastavení uloženo: {}", config_path.display());
            }

            if show || !changed {
                let effective = Config::load()?;
                let emailjs = &effective.emailjs;
                println!("Nastavení:");
                println!("  Soubor: {}", config_path.display());
                println!("  Service ID: {}", emailjs.service_id);
                println!("  Template ID: {}", emailjs.template_id);
                println!("  Public key: {}", mask_secret(&emailjs.public_key));
                println!("  Příjemce: {}", emailjs.recipient);
                println!("  API: {}", emailjs.api_url);
                println!(
                    "  Písmo: {}",
                    effective
                        .font_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "Helvetica (vestavěné)".into())
                );
                println!("  Neodeslaná PDF: {}", effective.recovery_dir().display());
                println!("  Přikládat fotografie: {}", if effective.attach_photos { "ano" } else { "ne" });
                if emailjs.is_configured() {
                    println!("  EmailJS: nastaveno");
                } else {
                    println!("  EmailJS: chybí {}", emailjs.missing_keys().join(", "));
                }
            }
        }
    }

    Ok(())
}

fn load_form(path: &Path) -> anyhow::Result<FormState> {
    if !path.is_file() {
        return Err(ComplaintError::FileNotFound(path.display().to_string()).into());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(FormState::from_json(&content)?)
}

/// Runs the submission and reports the outcome; exits non-zero on failure
async fn submit_form(config: Config, form: &FormState) {
    let client = match EmailJsClient::new(&config.emailjs) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "HTTP client could not be created");
            println!("⚠ Chyba při odesílání: {}", e);
            std::process::exit(1);
        }
    };
    let pipeline = SubmissionPipeline::new(config, client);

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Odesílání...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = pipeline.submit(form).await;
    spinner.finish_and_clear();

    match result {
        Ok(sent) => {
            println!("✅ {}", sent.user_notice());
            println!("  Příloha: {}", sent.attachment_name);
            if sent.photos_skipped > 0 {
                println!("  Fotografie nepřiloženy: {}", sent.photos_skipped);
            }
        }
        Err(e) => {
            println!("⚠ {}", e.user_notice());
            if let ComplaintError::ConfigurationMissing { recovery_path: Some(path), .. } = &e {
                println!("  PDF uloženo pro ruční odeslání: {}", path.display());
            }
            std::process::exit(1);
        }
    }
}

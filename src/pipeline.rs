//! Complaint submission
//!
//! One submit is one best-effort attempt:
//! render → serialize → encode → configured? → send → sent | failed.
//! Nothing is retried.

use crate::config::Config;
use crate::error::{ComplaintError, Result};
use crate::export::encoding::{encode_data_url, PDF_MIME};
use crate::export::pdf::{serialize_pdf, PdfFont};
use crate::mailer::{Attachment, EmailSender, SendRequest};
use chrono::Utc;
use complaint_form_common::{render_document, FormState};
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

pub const ATTACHMENT_PREFIX: &str = "reklamace_";
pub const ATTACHMENT_EXTENSION: &str = "pdf";

/// `reklamace_<unix ms>.pdf`
pub fn attachment_name(timestamp_ms: i64) -> String {
    format!("{}{}.{}", ATTACHMENT_PREFIX, timestamp_ms, ATTACHMENT_EXTENSION)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStage {
    Idle,
    Rendered,
    Encoding,
    Configured,
    Sending,
    Sent,
    Failed,
}

impl fmt::Display for SubmitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmitStage::Idle => "idle",
            SubmitStage::Rendered => "rendered",
            SubmitStage::Encoding => "encoding",
            SubmitStage::Configured => "configured",
            SubmitStage::Sending => "sending",
            SubmitStage::Sent => "sent",
            SubmitStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub attachment_name: String,
    pub attachment_count: usize,
    /// Photos picked in the form but not attached
    pub photos_skipped: usize,
}

impl Sent {
    pub fn user_notice(&self) -> &'static str {
        "Děkujeme! Formulář & PDF byly odeslány."
    }
}

/// Clears the in-flight flag on every exit path
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ComplaintError::SubmissionInFlight)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SubmissionPipeline<S> {
    config: Config,
    sender: S,
    font: PdfFont,
    in_flight: AtomicBool,
}

impl<S: EmailSender> SubmissionPipeline<S> {
    pub fn new(config: Config, sender: S) -> Self {
        let font = PdfFont::from_config(config.font_path.as_deref());
        Self {
            config,
            sender,
            font,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submits the form once.
    ///
    /// A second call while one is running fails with
    /// [`ComplaintError::SubmissionInFlight`] and leaves the first untouched.
    pub async fn submit(&self, form: &FormState) -> Result<Sent> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        log_stage(SubmitStage::Idle);

        let result = self.run(form).await;
        match &result {
            Ok(sent) => {
                log_stage(SubmitStage::Sent);
                tracing::info!(
                    attachment = %sent.attachment_name,
                    attachments = sent.attachment_count,
                    "complaint sent"
                );
            }
            Err(e) => {
                log_stage(SubmitStage::Failed);
                log_failure(e);
            }
        }
        result
    }

    async fn run(&self, form: &FormState) -> Result<Sent> {
        let name = attachment_name(Utc::now().timestamp_millis());

        let document = render_document(form);
        log_stage(SubmitStage::Rendered);

        let pdf = serialize_pdf(&document, &self.font)?;
        log_stage(SubmitStage::Encoding);
        let data = encode_data_url(pdf.clone(), PDF_MIME).await?;

        let emailjs = &self.config.emailjs;
        if !emailjs.is_configured() {
            let missing = emailjs.missing_keys();
            let recovery_path = self.keep_for_recovery(&pdf, &name);
            return Err(ComplaintError::ConfigurationMissing {
                missing,
                recovery_path,
            });
        }
        log_stage(SubmitStage::Configured);

        let mut attachments = vec![Attachment { name: name.clone(), data }];
        let photos_skipped = if self.config.attach_photos {
            for photo in form.photos().iter().filter(|p| !p.data.is_empty()) {
                let data = encode_data_url(photo.data.clone(), &photo.mime_type).await?;
                attachments.push(Attachment {
                    name: photo.file_name.clone(),
                    data,
                });
            }
            form.photos().iter().filter(|p| p.data.is_empty()).count()
        } else {
            form.photos().len()
        };
        if photos_skipped > 0 {
            tracing::warn!(photos = photos_skipped, "photos not attached to the e-mail");
        }

        log_stage(SubmitStage::Sending);
        let request = SendRequest::new(emailjs, attachments);
        let attachment_count = request.attachments.len();
        self.sender.send(&request).await?;

        Ok(Sent {
            attachment_name: name,
            attachment_count,
            photos_skipped,
        })
    }

    /// Writes the PDF of an unsent complaint; failures are only logged
    fn keep_for_recovery(&self, pdf: &[u8], name: &str) -> Option<PathBuf> {
        let dir = self.config.recovery_dir();
        let path = dir.join(name);
        let written = std::fs::create_dir_all(&dir).and_then(|_| std::fs::write(&path, pdf));
        match written {
            Ok(()) => Some(path),
            Err(e) => {
                tracing::error!(dir = %dir.display(), error = %e, "could not keep unsent PDF");
                None
            }
        }
    }
}

fn log_stage(stage: SubmitStage) {
    tracing::debug!(stage = %stage, "submission stage");
}

// One error event per failed submission
fn log_failure(error: &ComplaintError) {
    match error {
        ComplaintError::ConfigurationMissing {
            missing,
            recovery_path,
        } => tracing::error!(
            missing = ?missing,
            recovery_path = ?recovery_path,
            "EmailJS not configured, e-mail not sent"
        ),
        ComplaintError::Send(failure) => tracing::error!(
            status = ?failure.status,
            text = %failure.text,
            "EmailJS rejected the e-mail"
        ),
        other => tracing::error!(error = ?other, "complaint not sent"),
    }
}

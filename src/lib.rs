//! Reklamační dotazník
//!
//! Collects a customer complaint, renders it as a PDF and e-mails the PDF
//! through EmailJS.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod interactive;
pub mod logging;
pub mod mailer;
pub mod photos;
pub mod pipeline;

pub use complaint_form_common as common;

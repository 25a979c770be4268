//! Complaint form common library
//!
//! Pure logic shared by every front end of the complaint form: phone
//! formatting, form state and the text layout of the PDF summary.

pub mod document;
pub mod error;
pub mod form;
pub mod layout;
pub mod phone;

pub use document::{render_document, wrap_text, BlockKind, ComplaintDocument, DocumentBlock};
pub use error::{Error, Result};
pub use form::{Damage, FieldUpdate, FormState, PhotoAttachment, RequiredField, ValidationIssue};
pub use phone::{digits_only, format_phone, CountryCode, GroupingPattern};

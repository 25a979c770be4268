//! Interactive complaint form
//!
//! Asks for every field in form order. Each answer becomes one
//! [`FieldUpdate`] applied to the current state.

use crate::error::{ComplaintError, Result};
use complaint_form_common::form::{is_valid_email, is_valid_phone};
use complaint_form_common::{
    format_phone, render_document, CountryCode, Damage, FieldUpdate, FormState, PhotoAttachment,
};
use dialoguer::{Confirm, Input, Select};

/// Fills a new form on the terminal
pub fn fill_form_interactive(photos: Vec<PhotoAttachment>) -> Result<FormState> {
    let form = FormState::now();
    println!("📝 Reklamační dotazník");
    println!("Datum vyplnění: {}  Čas vyplnění: {}", form.filled_date(), form.filled_time());
    println!("---\n");

    let form = form
        .apply(FieldUpdate::FirstName(prompt_required("Jméno")?))
        .apply(FieldUpdate::LastName(prompt_required("Příjmení")?))
        .apply(FieldUpdate::Address(prompt_required("Adresa")?))
        .apply(FieldUpdate::Email(prompt_email()?));

    let country = select_country()?;
    let form = form.apply(FieldUpdate::CountryCode(country));
    let form = form.apply(FieldUpdate::Phone(prompt_phone(country)?));
    if !form.phone().is_empty() {
        println!("  → {}", form.full_phone());
    }

    let form = form
        .apply(FieldUpdate::Message(prompt_required("Popis závady")?))
        .apply(FieldUpdate::Damage(select_damage()?))
        .apply(FieldUpdate::AgeMonths(Some(prompt_age()?)));

    if !photos.is_empty() {
        println!("📷 Fotografie: {}", photos.len());
        for photo in &photos {
            println!("  - {}", photo.file_name);
        }
    }

    Ok(form.apply(FieldUpdate::Photos(photos)))
}

/// Prints the document text and asks whether to continue
pub fn confirm_submission(form: &FormState) -> Result<bool> {
    println!("\n---");
    println!("{}", render_document(form).plain_text());
    println!("---\n");

    Confirm::new()
        .with_prompt("Odeslat e-mailem?")
        .default(true)
        .interact()
        .map_err(|e| ComplaintError::Prompt(e.to_string()))
}

fn prompt_required(label: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(label)
        .validate_with(|value: &String| -> std::result::Result<(), &'static str> {
            if value.trim().is_empty() {
                Err("Povinné pole")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(|e| ComplaintError::Prompt(e.to_string()))?;

    Ok(input.trim().to_string())
}

fn prompt_email() -> Result<String> {
    let input: String = Input::new()
        .with_prompt("E-mail")
        .validate_with(|value: &String| -> std::result::Result<(), &'static str> {
            if is_valid_email(value.trim()) {
                Ok(())
            } else {
                Err("Neplatný e-mail")
            }
        })
        .interact_text()
        .map_err(|e| ComplaintError::Prompt(e.to_string()))?;

    Ok(input.trim().to_string())
}

fn select_country() -> Result<CountryCode> {
    let labels: Vec<&str> = CountryCode::ALL.iter().map(|cc| cc.label()).collect();
    let index = Select::new()
        .with_prompt("Předvolba")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| ComplaintError::Prompt(e.to_string()))?;

    Ok(CountryCode::ALL[index])
}

fn prompt_phone(country: CountryCode) -> Result<String> {
    Input::new()
        .with_prompt(format!("Tel. číslo {} (nepovinné)", country.code()))
        .allow_empty(true)
        .validate_with(move |value: &String| -> std::result::Result<(), &'static str> {
            let formatted = format_phone(country.code(), value);
            if value.trim().is_empty() || is_valid_phone(&formatted) {
                Ok(())
            } else {
                Err("Zadejte alespoň 5 číslic")
            }
        })
        .interact_text()
        .map_err(|e| ComplaintError::Prompt(e.to_string()))
}

fn select_damage() -> Result<Damage> {
    let options = [Damage::Yes, Damage::No];
    let labels: Vec<&str> = options.iter().map(|d| d.label()).collect();
    let index = Select::new()
        .with_prompt("Poškození")
        .items(&labels)
        .interact()
        .map_err(|e| ComplaintError::Prompt(e.to_string()))?;

    Ok(options[index])
}

fn prompt_age() -> Result<u32> {
    Input::<u32>::new()
        .with_prompt("Stáří (v měsících)")
        .interact_text()
        .map_err(|e| ComplaintError::Prompt(e.to_string()))
}

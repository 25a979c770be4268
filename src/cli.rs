use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "complaint-form")]
#[command(about = "Reklamační dotazník – vyplnění, PDF a odeslání e-mailem", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Podrobný výpis (debug log)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Vyplnit dotazník interaktivně a odeslat
    Fill {
        /// Fotografie (lze zadat vícekrát)
        #[arg(long = "photo")]
        photos: Vec<PathBuf>,

        /// Složka s fotografiemi
        #[arg(long)]
        photos_dir: Option<PathBuf>,

        /// Uložit také PDF (soubor nebo složka)
        #[arg(long)]
        save: Option<PathBuf>,

        /// Uložit vyplněný formulář jako JSON
        #[arg(long)]
        output_json: Option<PathBuf>,

        /// Neodesílat e-mail
        #[arg(long)]
        no_send: bool,
    },

    /// Odeslat uložený formulář (JSON)
    Submit {
        /// Formulář JSON
        #[arg(required = true)]
        input: PathBuf,

        /// Další fotografie
        #[arg(long = "photo")]
        photos: Vec<PathBuf>,
    },

    /// Uložit formulář jako PDF
    Save {
        /// Formulář JSON
        #[arg(required = true)]
        input: PathBuf,

        /// Výstupní soubor nebo složka (výchozí: aktuální složka)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Naformátovat telefonní číslo
    Phone {
        /// Předvolba, např. +420
        #[arg(required = true)]
        country_code: String,

        /// Číslo v libovolném zápisu
        #[arg(required = true)]
        number: String,
    },

    /// Zobrazit/upravit nastavení
    Config {
        /// Zobrazit nastavení
        #[arg(long)]
        show: bool,

        #[arg(long)]
        set_service_id: Option<String>,

        #[arg(long)]
        set_template_id: Option<String>,

        #[arg(long)]
        set_public_key: Option<String>,

        /// Adresa příjemce reklamací
        #[arg(long)]
        set_recipient: Option<String>,

        /// Písmo TTF/OTF pro PDF
        #[arg(long)]
        set_font: Option<PathBuf>,

        /// Složka pro neodeslaná PDF
        #[arg(long)]
        set_recovery_dir: Option<PathBuf>,

        /// Přikládat fotografie k e-mailu
        #[arg(long)]
        attach_photos: Option<bool>,
    },
}

use pronto_core::error::ProntoError;
use pronto_core::extraction::pdftotext::PdftotextExtractor;
use pronto_core::import::ImportOptions;
use pronto_core::roster::store::{save_roster, ImportLock};
use std::path::PathBuf;

use super::InputKind;
use crate::output;

pub struct ImportArgs {
    pub input_file: PathBuf,
    pub roster: PathBuf,
    pub config: Option<PathBuf>,
    pub day: Option<u32>,
    pub dry_run: bool,
    pub trace: bool,
    pub output_format: String,
}

pub fn run(args: ImportArgs) -> Result<(), ProntoError> {
    let config = super::load_config_or_default(args.config.as_deref())?;
    let kind = InputKind::from_path(&args.input_file)?;
    if kind == InputKind::Pdf && !PdftotextExtractor::is_available() {
        return Err(ProntoError::PdftotextNotFound);
    }
    let bytes = std::fs::read(&args.input_file)?;

    // Held until the roster is saved; a dry run never writes, so it needs none.
    let _lock = if args.dry_run {
        None
    } else {
        Some(ImportLock::acquire(&args.roster)?)
    };
    let mut roster = super::load_or_new_roster(&args.roster)?;

    let options = ImportOptions {
        trace: args.trace,
        day_override: args.day,
        source_name: args
            .input_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned()),
    };

    let result = match kind {
        InputKind::Pdf => {
            let extractor = PdftotextExtractor::new();
            pronto_core::import_pdf(&bytes, &extractor, &mut roster, &config, &options)?
        }
        InputKind::Xlsx => pronto_core::import_xlsx(&bytes, &mut roster, &config, &options)?,
    };

    if !args.dry_run {
        save_roster(&args.roster, &roster)?;
    }

    match args.output_format.as_str() {
        "json" => output::json::print(&result)?,
        _ => output::table::print_import(&result, args.dry_run),
    }

    Ok(())
}

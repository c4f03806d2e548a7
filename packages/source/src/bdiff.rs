//! BDIFF fire log reader.
//!
//! Column positions are resolved once from the header row, so the export
//! may carry any number of extra columns in any order. Each data row is
//! normalized into a [`FireEvent`]; in strict mode the first malformed row
//! aborts the load, otherwise it is logged and skipped. A blank or unusable
//! commune code does not make a row malformed.

use std::fs::File;
use std::io::Read;

use fire_map_fire_models::{CommuneCode, FireEvent};

use crate::config::{FireColumns, FireLogConfig};
use crate::parsing::{parse_hectares, parse_optional_text, parse_year};
use crate::progress::ProgressCallback;
use crate::SourceError;

/// Rows between two progress updates.
const PROGRESS_INTERVAL: u64 = 1_000;

/// The normalized content of a fire log.
#[derive(Debug, Clone, Default)]
pub struct FireLog {
    /// Every successfully parsed fire, in file order.
    pub events: Vec<FireEvent>,
    /// Number of malformed rows skipped in lenient mode.
    pub skipped_rows: u64,
}

/// Header positions of the configured columns.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    year: usize,
    commune_code: usize,
    commune_name: usize,
    burned_area: usize,
    event_id: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, columns: &FireColumns) -> Result<Self, SourceError> {
        // Spreadsheet exports often start with a UTF-8 byte order mark.
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();

        let find = |column: &str| {
            names
                .iter()
                .position(|h| *h == column)
                .ok_or_else(|| SourceError::MissingColumn {
                    column: column.to_string(),
                })
        };

        Ok(Self {
            year: find(&columns.year)?,
            commune_code: find(&columns.commune_code)?,
            commune_name: find(&columns.commune_name)?,
            burned_area: find(&columns.burned_area)?,
            event_id: find(&columns.event_id)?,
        })
    }

    fn parse(&self, record: &csv::StringRecord) -> Result<FireEvent, String> {
        let cell = |i: usize| record.get(i).unwrap_or("");

        let year = parse_year(cell(self.year))
            .ok_or_else(|| format!("invalid year {:?}", cell(self.year)))?;
        let commune_code = match CommuneCode::parse(cell(self.commune_code)) {
            Ok(code) => Some(code),
            Err(e) => {
                log::debug!("Fire without commune: {e}");
                None
            }
        };
        let burned_area_ha = parse_hectares(cell(self.burned_area))?;

        Ok(FireEvent {
            year,
            commune_code,
            commune_name: cell(self.commune_name).trim().to_string(),
            burned_area_ha,
            event_id: parse_optional_text(cell(self.event_id)),
        })
    }
}

/// Opens and reads the fire log described by `config`.
///
/// Progress is reported in bytes read.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be opened or
/// [`read_fire_log`] fails.
pub fn load_fire_log(
    config: &FireLogConfig,
    progress: &dyn ProgressCallback,
) -> Result<FireLog, SourceError> {
    log::info!("Loading fire log from {}", config.path.display());

    let file = File::open(&config.path)?;
    progress.set_total(file.metadata()?.len());

    let log = read_fire_log(file, config, progress)?;

    log::info!(
        "Loaded {} fire events from {} ({} rows skipped)",
        log.events.len(),
        config.path.display(),
        log.skipped_rows
    );

    Ok(log)
}

/// Reads a fire log from any reader.
///
/// # Errors
///
/// Returns [`SourceError`] if the delimiter is not ASCII, a configured
/// column is missing, a row is malformed in strict mode, or no fire event
/// could be read.
pub fn read_fire_log<R: Read>(
    reader: R,
    config: &FireLogConfig,
    progress: &dyn ProgressCallback,
) -> Result<FireLog, SourceError> {
    if !config.delimiter.is_ascii() {
        return Err(SourceError::InvalidDelimiter(config.delimiter));
    }

    #[allow(clippy::cast_possible_truncation)]
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter as u8)
        .flexible(true)
        .from_reader(reader);

    let index = ColumnIndex::resolve(reader.headers()?, &config.columns)?;

    let mut log = FireLog::default();
    let mut record = csv::StringRecord::new();
    let mut rows = 0u64;

    while reader.read_record(&mut record)? {
        rows += 1;
        let line = record.position().map_or(rows + 1, csv::Position::line);

        match index.parse(&record) {
            Ok(event) => log.events.push(event),
            Err(message) if config.strict => {
                return Err(SourceError::Row { line, message });
            }
            Err(message) => {
                log::warn!("Skipping fire log line {line}: {message}");
                log.skipped_rows += 1;
            }
        }

        if rows % PROGRESS_INTERVAL == 0 {
            progress.set_position(record.position().map_or(0, csv::Position::byte));
            progress.set_message(format!("{rows} rows"));
        }
    }

    progress.finish(format!("{} fire events", log.events.len()));

    if log.events.is_empty() {
        return Err(SourceError::Empty);
    }

    Ok(log)
}

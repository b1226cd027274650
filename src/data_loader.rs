use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::analysis_context::{AnalysisContext, ColumnNames};
use crate::error::{LoadError, RowError};
use crate::util::{decode_field, parse_number, parse_stat};

// Loads player records from the file at `path`. JSON if the extension says so, delimited text
// otherwise. Rows that can't be turned into a record are skipped and logged, see
// LoadOutcome::skipped.
pub fn load_records(path: &Path, context: &AnalysisContext) -> Result<LoadOutcome, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let outcome = if is_json {
        load_json_from_reader(file)?
    } else {
        load_csv_from_reader(file, context)?
    };

    info!(
        path = %path.display(),
        loaded = outcome.records.len(),
        skipped = outcome.skipped,
        "loaded player records"
    );

    Ok(outcome)
}

#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub records: Vec<PlayerRecord>,
    pub skipped: usize,
}

/// One player's season line. Goals and assists are pulled out because the graph is built on them,
/// every other column rides along in `attributes` for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub id: String,
    pub team: String,
    pub goals: f64,
    pub assists: f64,
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl PlayerRecord {
    pub fn new(id: &str, team: &str, goals: f64, assists: f64) -> Self {
        Self {
            id: id.to_string(),
            team: team.to_string(),
            goals,
            assists,
            attributes: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_attribute(mut self, name: &str, value: AttributeValue) -> Self {
        self.attributes.insert(name.to_string(), value);
        self
    }

    // Either threshold alone is enough. Strictly greater than.
    pub fn qualifies(&self, goal_threshold: f64, assist_threshold: f64) -> bool {
        self.goals > goal_threshold || self.assists > assist_threshold
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AttributeValue {
    // Extra columns pass through as-is: a number only if the cell is a plain number, text otherwise
    fn from_cell(raw: &str) -> Self {
        match parse_number(raw) {
            Some(v) if v.is_finite() => AttributeValue::Number(v),
            _ => AttributeValue::Text(raw.to_string()),
        }
    }
}

// Positions of the columns we can't do without
struct ColumnIndex {
    player: usize,
    team: usize,
    goals: usize,
    assists: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String], names: &ColumnNames) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            player: find(&names.player)?,
            team: find(&names.team)?,
            goals: find(&names.goals)?,
            assists: find(&names.assists)?,
        })
    }

    fn is_required(&self, idx: usize) -> bool {
        idx == self.player || idx == self.team || idx == self.goals || idx == self.assists
    }
}

pub fn load_csv_from_reader<R: Read>(
    rdr: R,
    context: &AnalysisContext,
) -> Result<LoadOutcome, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(context.delimiter_byte()?)
        .flexible(true)
        .from_reader(rdr);

    let headers: Vec<String> = reader.byte_headers()?.iter().map(decode_field).collect();
    let columns = ColumnIndex::resolve(&headers, &context.columns)?;

    let mut outcome = LoadOutcome::default();

    for (row, result) in reader.byte_records().enumerate() {
        // Header is line 1
        let line = row + 2;

        let fields: Vec<String> = match result {
            Ok(record) => record.iter().map(decode_field).collect(),
            Err(e) => {
                warn!(line = line, "skipping malformed row: {}", e);
                outcome.skipped += 1;
                continue;
            }
        };

        match record_from_fields(&headers, &fields, &columns, &context.columns) {
            Ok(record) => outcome.records.push(record),
            Err(e) => {
                warn!(line = line, "skipping row: {}", e);
                outcome.skipped += 1;
            }
        }
    }

    Ok(outcome)
}

fn record_from_fields(
    headers: &[String],
    fields: &[String],
    columns: &ColumnIndex,
    names: &ColumnNames,
) -> Result<PlayerRecord, RowError> {
    let cell = |idx: usize| fields.get(idx).map(String::as_str).unwrap_or("");

    let id = cell(columns.player);
    if id.is_empty() {
        return Err(RowError::EmptyIdentifier);
    }

    let goals = stat_value(&names.goals, cell(columns.goals))?;
    let assists = stat_value(&names.assists, cell(columns.assists))?;

    let mut record = PlayerRecord::new(id, cell(columns.team), goals, assists);

    for (idx, name) in headers.iter().enumerate() {
        if columns.is_required(idx) {
            continue;
        }
        let value = cell(idx);
        if value.is_empty() {
            continue;
        }
        record.attributes.insert(name.clone(), AttributeValue::from_cell(value));
    }

    Ok(record)
}

fn stat_value(column: &str, raw: &str) -> Result<f64, RowError> {
    let value = parse_stat(raw).ok_or_else(|| RowError::NotANumber {
        column: column.to_string(),
        value: raw.to_string(),
    })?;

    check_stat(column, value)
}

fn check_stat(column: &str, value: f64) -> Result<f64, RowError> {
    if !value.is_finite() || value < 0.0 {
        return Err(RowError::OutOfRange {
            column: column.to_string(),
            value,
        });
    }
    Ok(value)
}

// JSON rows. The stat fields sometimes arrive quoted, hence the lenient number parsing. Unlike the
// delimited path a quoted "4,0" is not read as a comma decimal: JSON numbers use a point, so such
// an entry is skipped as malformed.
#[derive(Deserialize, Debug)]
struct JsonPlayer {
    #[serde(alias = "Player", alias = "name")]
    player: String,
    #[serde(alias = "Squad", default)]
    team: String,
    #[serde(alias = "Total_Goals", deserialize_with = "deserialize_number_from_string")]
    goals: f64,
    #[serde(alias = "Assists", deserialize_with = "deserialize_number_from_string")]
    assists: f64,
    #[serde(default)]
    attributes: BTreeMap<String, AttributeValue>,
}

impl JsonPlayer {
    fn into_record(self) -> Result<PlayerRecord, RowError> {
        let id = self.player.trim();
        if id.is_empty() {
            return Err(RowError::EmptyIdentifier);
        }

        Ok(PlayerRecord {
            id: id.to_string(),
            team: self.team.trim().to_string(),
            goals: check_stat("goals", self.goals)?,
            assists: check_stat("assists", self.assists)?,
            attributes: self.attributes,
        })
    }
}

// Expects a top level array. Each element is checked on its own so one bad player doesn't sink
// the file.
pub fn load_json_from_reader<R: Read>(rdr: R) -> Result<LoadOutcome, LoadError> {
    let rows: Vec<serde_json::Value> = serde_json::from_reader(rdr)?;
    let mut outcome = LoadOutcome::default();

    for (idx, row) in rows.into_iter().enumerate() {
        let record = serde_json::from_value::<JsonPlayer>(row)
            .map_err(|e| RowError::Malformed(e.to_string()))
            .and_then(JsonPlayer::into_record);

        match record {
            Ok(record) => outcome.records.push(record),
            Err(e) => {
                warn!(index = idx, "skipping player entry: {}", e);
                outcome.skipped += 1;
            }
        }
    }

    Ok(outcome)
}

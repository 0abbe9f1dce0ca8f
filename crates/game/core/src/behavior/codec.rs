//! Line format for the persisted match history.
//!
//! The history lives in a single string slot as newline-delimited rows with
//! no header and no quoting:
//!
//! ```text
//! timestamp,score,difficulty,win,aggression,accuracy,preferred_distance,version
//! 1718000000000,1250,Normal,1,0.4210,0.3800,0.5500,1
//! ```
//!
//! - `win` is `1` or `0` (anything other than `1` decodes as a loss)
//! - floats carry exactly four decimals with `.` as separator on every platform
//! - rows with fewer than eight fields or an unparseable number are skipped by
//!   [`decode_history`]; extra trailing fields are ignored

use thiserror::Error;

use super::MatchRecord;

/// Number of comma-separated fields in a history row.
pub const FIELD_COUNT: usize = 8;

/// Why a single history row could not be decoded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordParseError {
    #[error("expected 8 fields, found {found}")]
    MissingFields { found: usize },

    #[error("field `{field}` is not a valid integer: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("field `{field}` is not a valid finite number: {value:?}")]
    InvalidFloat { field: &'static str, value: String },
}

/// Why a record cannot be written in the line format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordFormatError {
    #[error("difficulty label {0:?} contains a field or line separator")]
    InvalidLabel(String),
}

/// Parses one history row.
pub fn parse_record(line: &str) -> Result<MatchRecord, RecordParseError> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < FIELD_COUNT {
        return Err(RecordParseError::MissingFields { found: parts.len() });
    }

    Ok(MatchRecord {
        timestamp: parse_int("timestamp", parts[0])?,
        score: parse_int("score", parts[1])?,
        difficulty: parts[2].to_string(),
        win: parts[3] == "1",
        aggression: parse_float("aggression", parts[4])?,
        accuracy: parse_float("accuracy", parts[5])?,
        preferred_distance: parse_float("preferred_distance", parts[6])?,
        version: parse_int("version", parts[7])?,
    })
}

/// Decodes every non-blank row, pairing each with its 1-based line number.
///
/// Callers that want to report skipped rows iterate this directly; callers
/// that only need the records use [`decode_history`].
pub fn decode_lines(
    raw: &str,
) -> impl Iterator<Item = (usize, Result<MatchRecord, RecordParseError>)> + '_ {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, parse_record(line)))
}

/// Decodes a history blob, silently dropping malformed rows.
pub fn decode_history(raw: &str) -> Vec<MatchRecord> {
    decode_lines(raw)
        .filter_map(|(_, parsed)| parsed.ok())
        .collect()
}

/// Formats one record as a history row (without the trailing newline).
pub fn format_record(record: &MatchRecord) -> Result<String, RecordFormatError> {
    if record.difficulty.contains([',', '\n', '\r']) {
        return Err(RecordFormatError::InvalidLabel(record.difficulty.clone()));
    }

    Ok(format!(
        "{},{},{},{},{:.4},{:.4},{:.4},{}",
        record.timestamp,
        record.score,
        record.difficulty,
        if record.win { "1" } else { "0" },
        record.aggression,
        record.accuracy,
        record.preferred_distance,
        record.version,
    ))
}

/// Encodes a full history, one newline-terminated row per record.
pub fn encode_history(records: &[MatchRecord]) -> Result<String, RecordFormatError> {
    let mut out = String::new();
    for record in records {
        out.push_str(&format_record(record)?);
        out.push('\n');
    }
    Ok(out)
}

fn parse_int<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, RecordParseError> {
    value
        .parse()
        .map_err(|_| RecordParseError::InvalidInteger {
            field,
            value: value.to_string(),
        })
}

fn parse_float(field: &'static str, value: &str) -> Result<f32, RecordParseError> {
    match value.parse::<f32>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(RecordParseError::InvalidFloat {
            field,
            value: value.to_string(),
        }),
    }
}

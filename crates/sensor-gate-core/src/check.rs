// crates/sensor-gate-core/src/check.rs
// ============================================================================
// Module: Verification Layer
// Description: Domain checks applied to observed responses.
// Purpose: Turn contract violations into precise, typed assertion errors.
// Dependencies: thiserror, time
// ============================================================================

//! ## Overview
//! Checks reproduce the contract semantics exactly: equality is exact value
//! and type match, sort checks compare the observed sequence against its own
//! ascending sort, and date-range membership uses a closed interval on both
//! boundaries. A check failure is recoverable only in the sense that the
//! scenario runner catches it, annotates it with the step trace, and
//! re-raises it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;
use time::PrimitiveDateTime;

use crate::reading::StoredReading;
use crate::reading::TIMESTAMP_LAYOUT;

// ============================================================================
// SECTION: Check Errors
// ============================================================================

/// Assertion violations raised by the verification layer.
///
/// # Invariants
/// - Messages are self-describing; they are embedded verbatim in the
///   diagnostic failure shown to graders.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Observed HTTP status did not match the contract.
    #[error("{context}: expected status {expected}, got {observed}")]
    Status {
        /// What was being probed when the mismatch was observed.
        context: String,
        /// Status code the contract requires.
        expected: u16,
        /// Status code the service returned.
        observed: u16,
    },
    /// Observed value did not exactly match the expected value.
    #[error("{context}: expected {expected}, got {observed}")]
    Mismatch {
        /// What was being compared.
        context: String,
        /// Expected value, rendered for the narrative.
        expected: String,
        /// Observed value, rendered for the narrative.
        observed: String,
    },
    /// Record list is not ascending in the requested field.
    #[error("records are not sorted ascending by {field}")]
    NotSorted {
        /// Ordering field requested from the service.
        field: String,
    },
    /// Returned record count did not match the fixture expectation.
    #[error("{context}: expected {expected} records, got {observed}")]
    Cardinality {
        /// Which query produced the list.
        context: String,
        /// Fixture-derived expected cardinality.
        expected: usize,
        /// Observed cardinality.
        observed: usize,
    },
    /// A record timestamp fell outside the closed query interval.
    #[error("timestamp {timestamp} is outside the range [{start}, {end}]")]
    OutOfRange {
        /// Offending timestamp.
        timestamp: String,
        /// Inclusive lower bound of the query.
        start: String,
        /// Inclusive upper bound of the query.
        end: String,
    },
    /// The most recent record does not carry the current month prefix.
    #[error("timestamp {timestamp} does not start with the current month prefix {prefix}")]
    NotCurrentMonth {
        /// Offending timestamp.
        timestamp: String,
        /// Expected `YYYY-MM` prefix.
        prefix: String,
    },
    /// A timestamp could not be parsed in the fixed layout.
    #[error("timestamp {raw} is not in the YYYY-MM-DD HH:MM:SS layout: {reason}")]
    MalformedTimestamp {
        /// Raw string the service returned.
        raw: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// A record that must carry a timestamp has none.
    #[error("{context}: record {id} has no timestamp")]
    MissingTimestamp {
        /// Which query produced the record.
        context: String,
        /// Identifier of the offending record.
        id: i64,
    },
    /// A list that must contain at least one record was empty.
    #[error("{context}: expected at least one record")]
    EmptyList {
        /// Which query produced the empty list.
        context: String,
    },
}

// ============================================================================
// SECTION: Scalar Checks
// ============================================================================

/// Asserts that the observed status equals the expected status.
///
/// # Errors
///
/// Returns [`CheckError::Status`] on mismatch.
pub fn expect_status(context: &str, observed: u16, expected: u16) -> Result<(), CheckError> {
    if observed == expected {
        return Ok(());
    }
    Err(CheckError::Status {
        context: context.to_string(),
        expected,
        observed,
    })
}

/// Asserts exact equality, rendering both sides for the narrative.
///
/// # Errors
///
/// Returns [`CheckError::Mismatch`] when the values differ.
pub fn expect_eq<T: PartialEq + fmt::Display>(
    context: &str,
    observed: T,
    expected: T,
) -> Result<(), CheckError> {
    if observed == expected {
        return Ok(());
    }
    Err(CheckError::Mismatch {
        context: context.to_string(),
        expected: expected.to_string(),
        observed: observed.to_string(),
    })
}

/// Asserts that a record carries a timestamp and returns it.
///
/// # Errors
///
/// Returns [`CheckError::MissingTimestamp`] when the timestamp is null.
pub fn expect_timestamp<'a>(
    context: &str,
    reading: &'a StoredReading,
) -> Result<&'a str, CheckError> {
    reading.timestamp.as_deref().ok_or_else(|| CheckError::MissingTimestamp {
        context: context.to_string(),
        id: reading.id,
    })
}

/// Returns the last record of a list that must not be empty.
///
/// # Errors
///
/// Returns [`CheckError::EmptyList`] when the list is empty.
pub fn expect_last<'a>(
    context: &str,
    readings: &'a [StoredReading],
) -> Result<&'a StoredReading, CheckError> {
    readings.last().ok_or_else(|| CheckError::EmptyList {
        context: context.to_string(),
    })
}

// ============================================================================
// SECTION: Ordering Checks
// ============================================================================

/// Asserts that the list is ascending by numeric `value`.
///
/// The observed sequence of values (in list order) must equal the same
/// sequence sorted ascending.
///
/// # Errors
///
/// Returns [`CheckError::NotSorted`] when the order differs.
pub fn check_sorted_by_value(readings: &[StoredReading]) -> Result<(), CheckError> {
    let observed: Vec<f64> = readings.iter().map(|reading| reading.value).collect();
    let mut expected = observed.clone();
    expected.sort_by(f64::total_cmp);
    if observed
        .iter()
        .zip(expected.iter())
        .all(|(lhs, rhs)| lhs.total_cmp(rhs) == std::cmp::Ordering::Equal)
    {
        return Ok(());
    }
    Err(CheckError::NotSorted {
        field: "value".to_string(),
    })
}

/// Asserts that the list is ascending by the lexicographic timestamp.
///
/// The fixed layout sorts lexicographically in chronological order, so a
/// plain string sort is the chronological sort.
///
/// # Errors
///
/// Returns [`CheckError::MissingTimestamp`] for a null timestamp and
/// [`CheckError::NotSorted`] when the order differs.
pub fn check_sorted_by_timestamp(readings: &[StoredReading]) -> Result<(), CheckError> {
    let observed = timestamps_of("order-by=timestamp query", readings)?;
    let mut expected = observed.clone();
    expected.sort();
    if observed == expected {
        return Ok(());
    }
    Err(CheckError::NotSorted {
        field: "timestamp".to_string(),
    })
}

/// Extracts every timestamp in list order, rejecting null timestamps.
///
/// # Errors
///
/// Returns [`CheckError::MissingTimestamp`] when any record lacks one.
pub fn timestamps_of(context: &str, readings: &[StoredReading]) -> Result<Vec<String>, CheckError> {
    readings
        .iter()
        .map(|reading| expect_timestamp(context, reading).map(ToString::to_string))
        .collect()
}

// ============================================================================
// SECTION: Date-Range Checks
// ============================================================================

/// Parses a timestamp in the fixed layout.
///
/// # Errors
///
/// Returns [`CheckError::MalformedTimestamp`] when parsing fails.
pub fn parse_timestamp(raw: &str) -> Result<PrimitiveDateTime, CheckError> {
    PrimitiveDateTime::parse(raw, &TIMESTAMP_LAYOUT).map_err(|err| {
        CheckError::MalformedTimestamp {
            raw: raw.to_string(),
            reason: err.to_string(),
        }
    })
}

/// Asserts that the list has exactly the fixture-derived cardinality.
///
/// # Errors
///
/// Returns [`CheckError::Cardinality`] on mismatch.
pub fn check_cardinality(
    context: &str,
    readings: &[StoredReading],
    expected: usize,
) -> Result<(), CheckError> {
    if readings.len() == expected {
        return Ok(());
    }
    Err(CheckError::Cardinality {
        context: context.to_string(),
        expected,
        observed: readings.len(),
    })
}

/// Asserts that every record timestamp lies in the closed interval
/// `[start, end]`.
///
/// # Errors
///
/// Returns a parse, missing-timestamp, or [`CheckError::OutOfRange`] error
/// for the first violating record.
pub fn check_within_range(
    readings: &[StoredReading],
    start: &str,
    end: &str,
) -> Result<(), CheckError> {
    let lower = parse_timestamp(start)?;
    let upper = parse_timestamp(end)?;
    for reading in readings {
        let raw = expect_timestamp("date-range query", reading)?;
        let parsed = parse_timestamp(raw)?;
        if parsed < lower || parsed > upper {
            return Err(CheckError::OutOfRange {
                timestamp: raw.to_string(),
                start: start.to_string(),
                end: end.to_string(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Recency Checks
// ============================================================================

/// Asserts that a timestamp starts with the given `YYYY-MM` prefix.
///
/// # Errors
///
/// Returns [`CheckError::NotCurrentMonth`] when the prefix differs.
pub fn check_month_prefix(timestamp: &str, prefix: &str) -> Result<(), CheckError> {
    if timestamp.starts_with(prefix) {
        return Ok(());
    }
    Err(CheckError::NotCurrentMonth {
        timestamp: timestamp.to_string(),
        prefix: prefix.to_string(),
    })
}

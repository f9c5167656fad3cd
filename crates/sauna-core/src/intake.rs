//! The intake pipeline: raw upload bytes to merged dashboard state.

use sauna_ingest::{IngestError, build_column_hints, detect_data_type, extract_year_month,
    probe_table};
use sauna_map::{classify_rate_variant, match_columns};
use sauna_model::DataType;

use crate::config::AnalyticsConfig;
use crate::error::{CoreError, Result};
use crate::normalize::normalize_table;
use crate::sections;
use crate::store::{DashboardStore, SectionUpdate};

/// What the pipeline did with one accepted upload.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// The resolved (possibly auto-detected) data type.
    pub data_type: DataType,
    pub rows: usize,
    pub columns: usize,
    /// Name of the encoding that decoded the upload.
    pub encoding: &'static str,
}

fn resolve_data_type(declared: DataType, filename: &str) -> Result<DataType> {
    if declared != DataType::Auto {
        return Ok(declared);
    }
    detect_data_type(filename).ok_or_else(|| CoreError::UnknownDataType {
        filename: filename.to_string(),
    })
}

/// Runs one upload through probe, field matching, normalization,
/// aggregation and the store merge.
///
/// # Errors
///
/// Intake errors (extension, decoding, delimiter) and schema
/// shortfalls propagate with full diagnostics; aggregation itself
/// degrades per-row and cannot fail.
pub fn process_upload(
    bytes: &[u8],
    declared: DataType,
    filename: &str,
    config: &AnalyticsConfig,
    store: &DashboardStore,
) -> Result<UploadOutcome> {
    if !filename.to_ascii_lowercase().ends_with(".csv") {
        return Err(IngestError::NotCsv {
            filename: filename.to_string(),
        }
        .into());
    }
    let raw = probe_table(bytes)?;
    let data_type = resolve_data_type(declared, filename)?;
    let hints = build_column_hints(&raw);
    let mapping = match_columns(data_type, &raw.headers, &hints)?;
    let table = normalize_table(&raw, &mapping);
    let fallback_month = extract_year_month(filename);
    let fallback_month = fallback_month.as_deref();

    let update = match data_type {
        DataType::Members => {
            let (members, metrics) = sections::summarize_members(&table, config);
            SectionUpdate::Members { members, metrics }
        }
        DataType::Utilization => {
            let variant = classify_rate_variant(&mapping);
            tracing::debug!(?variant, "classified occupancy computation");
            SectionUpdate::Utilization(sections::summarize_utilization(
                &table,
                variant,
                config,
                fallback_month,
            ))
        }
        DataType::Competitors => {
            SectionUpdate::Competitors(sections::summarize_competitors(&table))
        }
        DataType::Finance => SectionUpdate::Finance(sections::summarize_finance(&table)),
        DataType::Sales => {
            SectionUpdate::Finance(sections::summarize_sales(&table, fallback_month))
        }
        DataType::Reservation => {
            SectionUpdate::Reservations(sections::summarize_reservations(&table, fallback_month))
        }
        // Unreachable after resolve_data_type, kept for exhaustiveness.
        DataType::Auto => {
            return Err(CoreError::UnknownDataType {
                filename: filename.to_string(),
            });
        }
    };
    store.apply(update);

    tracing::info!(
        %data_type,
        rows = table.row_count(),
        columns = raw.headers.len(),
        encoding = raw.encoding,
        "processed upload"
    );
    Ok(UploadOutcome {
        data_type,
        rows: table.row_count(),
        columns: raw.headers.len(),
        encoding: raw.encoding,
    })
}

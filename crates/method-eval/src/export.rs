//! Flattens evaluation history into spreadsheet rows, then into XLSX or CSV bytes.

use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};

use crate::evaluation::{round_to_cents, Criterion, ScoringEngine};
use crate::history::HistoryEntry;

pub const EMPTY_HISTORY_MESSAGE: &str = "Історія порожня";
pub const WORKSHEET_NAME: &str = "Результати оцінки";

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

// Excel only detects UTF-8 in CSV files that start with a byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encoding of the exported history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Xlsx => "analysis_history.xlsx",
            Self::Csv => "analysis_history.csv",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Xlsx => XLSX_CONTENT_TYPE,
            Self::Csv => CSV_CONTENT_TYPE,
        }
    }
}

/// How criterion values are laid out after the date/method/score columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportLayout {
    /// One column per criterion holding the mean of its three values.
    Means,
    /// Three columns per criterion holding the raw values.
    RawValues,
}

impl ExportLayout {
    pub fn for_engine(engine: ScoringEngine) -> Self {
        match engine {
            ScoringEngine::WeightedAverage => Self::Means,
            ScoringEngine::RuleTable => Self::RawValues,
        }
    }

    /// Raw values as soon as any entry came from the rule table, so its inputs survive.
    pub fn for_entries(entries: &[HistoryEntry]) -> Self {
        if entries
            .iter()
            .any(|entry| Self::for_engine(entry.engine) == Self::RawValues)
        {
            Self::RawValues
        } else {
            Self::Means
        }
    }
}

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportCell {
    Text(String),
    Number(f64),
}

impl ExportCell {
    fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(value) => value.to_string(),
        }
    }
}

/// Tabular view of the history: a header plus one row per entry and method.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<ExportCell>>,
}

/// Builds the export table. `entries` must be in chronological order.
pub fn build_table(entries: &[HistoryEntry], layout: ExportLayout) -> ExportTable {
    let mut header = vec![
        "Дата оцінки".to_string(),
        "Метод тестування".to_string(),
        "Бали".to_string(),
    ];
    for criterion in Criterion::ordered() {
        let number = criterion.index() + 1;
        match layout {
            ExportLayout::Means => header.push(format!("Критерій {number} (середнє)")),
            ExportLayout::RawValues => {
                for value in 1..=3 {
                    header.push(format!("Критерій {number} / значення {value}"));
                }
            }
        }
    }

    let mut rows = Vec::new();
    for entry in entries {
        let criteria = criterion_cells(entry, layout);
        let date = entry.recorded_at_label();
        for result in &entry.results {
            let mut row = Vec::with_capacity(3 + criteria.len());
            row.push(ExportCell::Text(date.clone()));
            row.push(ExportCell::Text(result.method.label().to_string()));
            row.push(ExportCell::Number(result.score));
            row.extend(criteria.iter().cloned());
            rows.push(row);
        }
    }

    ExportTable { header, rows }
}

fn criterion_cells(entry: &HistoryEntry, layout: ExportLayout) -> Vec<ExportCell> {
    match layout {
        ExportLayout::Means => Criterion::ordered()
            .into_iter()
            .map(|criterion| ExportCell::Number(round_to_cents(entry.grid.mean(criterion))))
            .collect(),
        ExportLayout::RawValues => entry
            .grid
            .rows()
            .iter()
            .flat_map(|row| row.iter().map(|value| ExportCell::Number(*value)))
            .collect(),
    }
}

/// Encodes the table in the requested format.
pub fn write_table(table: &ExportTable, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Xlsx => write_xlsx(table),
        ExportFormat::Csv => write_csv(table),
    }
}

/// Writes a single-sheet workbook with the header on the first row.
pub fn write_xlsx(table: &ExportTable) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(WORKSHEET_NAME)?;

    for (col, title) in table.header.iter().enumerate() {
        sheet.write_string(0, col as u16, title.as_str())?;
    }
    for (idx, row) in table.rows.iter().enumerate() {
        let row_num = idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                ExportCell::Text(text) => sheet.write_string(row_num, col as u16, text.as_str())?,
                ExportCell::Number(value) => sheet.write_number(row_num, col as u16, *value)?,
            };
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Serializes the table as UTF-8 CSV with a byte order mark.
pub fn write_csv(table: &ExportTable) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(ExportCell::render))?;
    }
    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

/// Ready-to-serve spreadsheet bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetExport {
    pub format: ExportFormat,
    pub file_name: &'static str,
    pub row_count: usize,
    pub bytes: Vec<u8>,
}

/// Error raised while producing the spreadsheet.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("workbook encoding failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer flush failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{CriteriaGrid, MethodScore, TestingMethod};
    use chrono::NaiveDate;

    fn entry(engine: ScoringEngine) -> HistoryEntry {
        HistoryEntry {
            id: 1,
            recorded_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .and_then(|date| date.and_hms_opt(8, 5, 9))
                .expect("valid timestamp"),
            engine,
            grid: CriteriaGrid::new([
                [1.0, 2.0, 4.0],
                [10.0, 20.0, 30.0],
                [0.0, 1.0, 1.0],
                [50.0, 60.0, 70.0],
                [90.0, 90.5, 91.0],
            ]),
            results: vec![
                MethodScore::new(TestingMethod::MethodB, 12.0),
                MethodScore::new(TestingMethod::MethodA, 10.0),
            ],
        }
    }

    fn text(value: &str) -> ExportCell {
        ExportCell::Text(value.to_string())
    }

    #[test]
    fn means_layout_has_one_numeric_column_per_criterion() {
        let table = build_table(&[entry(ScoringEngine::WeightedAverage)], ExportLayout::Means);
        assert_eq!(table.header.len(), 3 + 5);
        assert_eq!(table.header[3], "Критерій 1 (середнє)");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.rows[0],
            vec![
                text("2025-06-01 08:05:09"),
                text("Метод B"),
                ExportCell::Number(12.0),
                ExportCell::Number(2.33),
                ExportCell::Number(20.0),
                ExportCell::Number(0.67),
                ExportCell::Number(60.0),
                ExportCell::Number(90.5),
            ]
        );
        assert_eq!(table.rows[1][1], text("Метод A"));
    }

    #[test]
    fn raw_layout_has_three_columns_per_criterion() {
        let table = build_table(&[entry(ScoringEngine::RuleTable)], ExportLayout::RawValues);
        assert_eq!(table.header.len(), 3 + 15);
        assert_eq!(table.header[17], "Критерій 5 / значення 3");
        assert_eq!(table.rows[0][2], ExportCell::Number(12.0));
        assert_eq!(
            &table.rows[0][3..6],
            &[
                ExportCell::Number(1.0),
                ExportCell::Number(2.0),
                ExportCell::Number(4.0)
            ]
        );
        assert_eq!(table.rows[0][17], ExportCell::Number(91.0));
    }

    #[test]
    fn xlsx_is_a_zip_workbook() {
        let table = build_table(&[entry(ScoringEngine::WeightedAverage)], ExportLayout::Means);
        let bytes = write_table(&table, ExportFormat::Xlsx).expect("workbook writes");
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn csv_starts_with_bom_and_header() {
        let table = build_table(&[entry(ScoringEngine::RuleTable)], ExportLayout::RawValues);
        let bytes = write_table(&table, ExportFormat::Csv).expect("csv writes");
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).expect("utf-8");
        let mut lines = text.lines();
        assert!(lines
            .next()
            .expect("header line")
            .starts_with("Дата оцінки,Метод тестування,Бали,"));
        assert_eq!(
            lines.next(),
            Some("2025-06-01 08:05:09,Метод B,12,1,2,4,10,20,30,0,1,1,50,60,70,90,90.5,91")
        );
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn format_names_file_and_content_type() {
        assert_eq!(ExportFormat::default(), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::Xlsx.file_name(), "analysis_history.xlsx");
        assert_eq!(
            ExportFormat::Xlsx.content_type(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(ExportFormat::Csv.file_name(), "analysis_history.csv");
        assert_eq!(ExportFormat::Csv.content_type(), "text/csv; charset=utf-8");
    }

    #[test]
    fn layout_keeps_raw_values_when_any_entry_used_rule_table() {
        let weighted = entry(ScoringEngine::WeightedAverage);
        let rules = entry(ScoringEngine::RuleTable);

        assert_eq!(
            ExportLayout::for_entries(&[weighted.clone()]),
            ExportLayout::Means
        );
        assert_eq!(
            ExportLayout::for_entries(&[weighted, rules]),
            ExportLayout::RawValues
        );
    }
}

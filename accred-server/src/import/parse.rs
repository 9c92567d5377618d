//! CSV and spreadsheet readers

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use super::columns::{ColumnMap, Field, RawRecord};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Upload format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Spreadsheet,
}

impl FileFormat {
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.trim().to_ascii_lowercase();
        if [".xlsx", ".xls", ".xlsm", ".ods"]
            .iter()
            .any(|ext| lower.ends_with(ext))
        {
            FileFormat::Spreadsheet
        } else {
            FileFormat::Csv
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("workbook has no sheets")]
    NoSheet,
}

/// Header row plus non-blank data rows
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn into_records(self) -> Vec<RawRecord> {
        let columns = ColumnMap::from_headers(&self.headers);
        if !columns.is_mapped(Field::Area) {
            tracing::warn!(headers = ?self.headers, "Upload has no area column");
        }
        self.rows.iter().map(|row| columns.record(row)).collect()
    }
}

/// Parse an uploaded file into canonical records, one per non-blank row.
pub fn parse_upload(file_name: &str, bytes: &[u8]) -> Result<Vec<RawRecord>, ImportError> {
    let table = match FileFormat::from_file_name(file_name) {
        FileFormat::Csv => read_csv(bytes)?,
        FileFormat::Spreadsheet => read_spreadsheet(bytes)?,
    };
    Ok(table.into_records())
}

fn read_csv(bytes: &[u8]) -> Result<Table, ImportError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(bytes))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = decode_lossy(reader.byte_headers()?);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let row = decode_lossy(&record?);
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(row);
    }
    Ok(Table { headers, rows })
}

/// Invalid UTF-8 (Latin-1 exports) becomes U+FFFD instead of failing the file
fn decode_lossy(record: &csv::ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).trim().to_string())
        .collect()
}

/// `;` when the header line has more semicolons than commas (spreadsheet
/// exports in comma-decimal locales), otherwise `,`.
fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let header = bytes.split(|&b| b == b'\n').next().unwrap_or_default();
    let commas = header.iter().filter(|&&b| b == b',').count();
    let semicolons = header.iter().filter(|&&b| b == b';').count();
    if semicolons > commas { b';' } else { b',' }
}

fn read_spreadsheet(bytes: &[u8]) -> Result<Table, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook.worksheet_range_at(0).ok_or(ImportError::NoSheet)??;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());

    let Some(headers) = rows.next() else {
        return Ok(Table {
            headers: vec![],
            rows: vec![],
        });
    };
    let rows = rows
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    Ok(Table { headers, rows })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        // Whole numbers typed into text columns (document numbers) come back as floats
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_format_by_extension() {
        assert_eq!(FileFormat::from_file_name("lista.xlsx"), FileFormat::Spreadsheet);
        assert_eq!(FileFormat::from_file_name("LISTA.XLS"), FileFormat::Spreadsheet);
        assert_eq!(FileFormat::from_file_name("lista.ods"), FileFormat::Spreadsheet);
        assert_eq!(FileFormat::from_file_name("lista.csv"), FileFormat::Csv);
        assert_eq!(FileFormat::from_file_name("lista.txt"), FileFormat::Csv);
        assert_eq!(FileFormat::from_file_name(""), FileFormat::Csv);
    }

    #[test]
    fn test_csv_strips_bom_and_trims() {
        let data = "\u{feff}nombre,apellido,correo,area\n  Juan , Perez ,juan@example.com, Prensa \n";
        let records = parse_upload("x.csv", data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first_name, "Juan");
        assert_eq!(records[0].last_name, "Perez");
        assert_eq!(records[0].area, "Prensa");
    }

    #[test]
    fn test_csv_skips_blank_rows() {
        let data = "nombre,apellido,correo,area\nJuan,Perez,j@x.cl,Prensa\n,,,\n\nAna,Martinez,a@x.cl,Proveedores\n";
        let records = parse_upload("x.csv", data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].first_name, "Ana");
    }

    #[test]
    fn test_csv_quoted_fields_and_semicolons() {
        let data = "nombre;apellido;empresa;area\n\"Juan\";\"Perez\";\"Medio; Radio\";Prensa\n";
        let records = parse_upload("x.csv", data.as_bytes()).unwrap();
        assert_eq!(records[0].company, "Medio; Radio");
        assert_eq!(records[0].area, "Prensa");
    }

    #[test]
    fn test_csv_latin1_bytes_do_not_fail_the_file() {
        let mut data = b"nombre,apellido,correo,area\nJuan,Perez,juan@example.com,Prensa\n".to_vec();
        data.extend_from_slice(b"Jos\xe9,Mu\xf1oz,jose@example.com,Prensa\n");
        let records = parse_upload("x.csv", &data).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].first_name, "Juan");
        assert_eq!(records[1].first_name, "Jos\u{fffd}");
        assert_eq!(records[1].last_name, "Mu\u{fffd}oz");
    }

    #[test]
    fn test_garbage_spreadsheet_is_error() {
        let err = parse_upload("x.xlsx", b"not a zip file").unwrap_err();
        assert!(matches!(err, ImportError::Spreadsheet(_)));
    }

    #[test]
    fn test_float_cells_render_as_integers() {
        assert_eq!(cell_text(&Data::Float(12345678.0)), "12345678");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}

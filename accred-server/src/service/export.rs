//! Spreadsheet-friendly CSV export of the dashboard view

use chrono::{DateTime, FixedOffset, Utc};
use shared::models::Accreditation;

const UTF8_BOM: &str = "\u{feff}";

pub const EXPORT_HEADERS: [&str; 10] = [
    "ID",
    "Área",
    "Nombre",
    "Apellido",
    "RUT/Documento",
    "Correo Electrónico",
    "Empresa/Medio",
    "Estado",
    "Zona Asignada",
    "Fecha de Solicitud",
];

const UNASSIGNED_ZONE: &str = "Sin asignar";
const MISSING_COMPANY: &str = "N/A";

/// `acreditaciones_YYYY-MM-DD.csv` for the given UTC instant
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("acreditaciones_{}.csv", now.format("%Y-%m-%d"))
}

/// `dd-mm-YYYY, HH:MM` in the event's UTC offset
pub fn format_created_at(millis: i64, offset: FixedOffset) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&offset).format("%d-%m-%Y, %H:%M").to_string())
        .unwrap_or_default()
}

/// BOM, a plain header line, then one fully quoted line per row.
pub fn export_csv(rows: &[Accreditation], offset: FixedOffset) -> Result<Vec<u8>, csv::Error> {
    let mut buf = Vec::with_capacity(128 * (rows.len() + 1));
    buf.extend_from_slice(UTF8_BOM.as_bytes());
    buf.extend_from_slice(EXPORT_HEADERS.join(",").as_bytes());
    buf.push(b'\n');

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(buf);

    for row in rows {
        writer.write_record([
            row.id.to_string().as_str(),
            row.area.label(),
            row.first_name.as_str(),
            row.last_name.as_str(),
            row.document.as_str(),
            row.email.as_str(),
            row.company
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(MISSING_COMPANY),
            row.status.label(),
            row.zone.map(|z| z.label()).unwrap_or(UNASSIGNED_ZONE),
            format_created_at(row.created_at, offset).as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

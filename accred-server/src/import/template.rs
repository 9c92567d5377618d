//! Downloadable upload template

use rust_xlsxwriter::{Format, Workbook, XlsxError};

pub const TEMPLATE_SHEET: &str = "Template";
pub const TEMPLATE_FILE_NAME: &str = "template_acreditaciones.xlsx";
pub const TEMPLATE_HEADERS: [&str; 6] = ["nombre", "apellido", "rut", "correo", "empresa", "area"];

const EXAMPLE_ROWS: [[&str; 6]; 4] = [
    ["Juan", "Perez", "12345678-K", "juan@example.com", "Empresa A", "Prensa"],
    ["Maria", "Gonzalez", "98765432-9", "maria@example.com", "Empresa B", "Voluntarios"],
    ["Carlos", "Lopez", "11223344-5", "carlos@example.com", "Empresa C", "Produccion"],
    ["Ana", "Martinez", "44332211-3", "ana@example.com", "Empresa D", "Proveedores"],
];

/// XLSX workbook with the canonical header row and four example rows.
pub fn template_workbook() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(TEMPLATE_SHEET)?;
        for (col, title) in TEMPLATE_HEADERS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, &header)?;
        }
        for (row, values) in EXAMPLE_ROWS.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                sheet.write_string(row as u32 + 1, col as u16, *value)?;
            }
        }
        sheet.autofit();
    }

    workbook.save_to_buffer()
}

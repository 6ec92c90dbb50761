//! Spreadsheet export of the orders table.
//!
//! Produces a single-sheet `.xlsx` holding exactly the rows the user is
//! looking at, in the same column order as the on-screen table.

use ceo_core::report::ReportRow;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// MIME type of the exported workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Name of the only worksheet.
pub const SHEET_NAME: &str = "ce_pick_report";

/// Column headers, in table order.
pub const HEADERS: [&str; 13] = [
    "batch",
    "barcode",
    "routing_order_number",
    "market_order_id",
    "request_id",
    "claim_id",
    "tariff",
    "platform_status",
    "claim_status",
    "created_at",
    "logistics_code",
    "order_id",
    "client_id",
];

/// Render `rows` as an in-memory `.xlsx` file.
pub fn orders_workbook(rows: &[ReportRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, title) in HEADERS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, &header_format)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let r = (i + 1) as u32;
            sheet.write_number(r, 0, f64::from(row.batch))?;

            let text_cells = [
                row.barcode.as_deref(),
                row.routing_order_number.as_deref(),
                row.market_order_id.as_deref(),
                row.request_id.as_deref(),
                row.claim_id.as_deref(),
                row.tariff.as_deref(),
                row.platform_status.as_deref(),
                row.claim_status.as_deref(),
            ];
            for (offset, value) in text_cells.into_iter().enumerate() {
                if let Some(value) = value {
                    sheet.write_string(r, 1 + offset as u16, value)?;
                }
            }

            sheet.write_string(r, 9, row.created_at.format("%Y-%m-%d %H:%M:%S").to_string())?;
            if let Some(code) = &row.logistics_code {
                sheet.write_string(r, 10, code.as_str())?;
            }
            sheet.write_string(r, 11, row.order_id.as_str())?;
            sheet.write_string(r, 12, row.client_id.to_string())?;
        }

        sheet.autofit();
    }

    workbook.save_to_buffer()
}

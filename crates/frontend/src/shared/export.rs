//! CSV export that opens in Excel: UTF-8 BOM, `;` separator, quoted cells.

use contracts::dashboards::d402_sales_comparison::ExportSheet;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Rows that can be exported.
pub trait ExcelExportable {
    fn headers() -> Vec<&'static str>;

    fn to_csv_row(&self) -> Vec<String>;
}

pub fn export_to_excel<T: ExcelExportable>(data: &[T], filename: &str) -> Result<(), String> {
    if data.is_empty() {
        return Err("No hay datos para exportar".to_string());
    }
    let rows: Vec<Vec<String>> = data.iter().map(ExcelExportable::to_csv_row).collect();
    let content = build_csv(&T::headers(), &rows);
    download_csv(&content, filename)
}

/// Several tables in one file, each introduced by its title line.
pub fn export_sheets(sheets: &[ExportSheet], filename: &str) -> Result<(), String> {
    if sheets.is_empty() {
        return Err("No hay datos para exportar".to_string());
    }
    download_csv(&build_sections(sheets), filename)
}

pub fn build_csv(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut csv = String::from('\u{FEFF}');
    push_line(&mut csv, headers.iter().map(|h| h.to_string()));
    for row in rows {
        push_line(&mut csv, row.iter().cloned());
    }
    csv
}

fn build_sections(sheets: &[ExportSheet]) -> String {
    let mut csv = String::from('\u{FEFF}');
    for (i, sheet) in sheets.iter().enumerate() {
        if i > 0 {
            csv.push('\n');
        }
        push_line(&mut csv, std::iter::once(sheet.title.clone()));
        push_line(&mut csv, sheet.headers.iter().cloned());
        for row in &sheet.rows {
            push_line(&mut csv, row.iter().cloned());
        }
    }
    csv
}

fn push_line(csv: &mut String, cells: impl Iterator<Item = String>) {
    let line = cells.map(|c| escape_csv_cell(&c)).collect::<Vec<_>>().join(";");
    csv.push_str(&line);
    csv.push('\n');
}

fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn download_csv(content: &str, filename: &str) -> Result<(), String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    let blob = Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;
    download_blob(&blob, &with_csv_extension(filename))
}

fn with_csv_extension(filename: &str) -> String {
    if filename.to_lowercase().ends_with(".csv") {
        filename.to_string()
    } else {
        format!("{}.csv", filename)
    }
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_bom_and_quotes_separators() {
        let csv = build_csv(
            &["Producto", "Precio"],
            &[vec!["Polera; talla M".to_string(), "$9.990".to_string()]],
        );
        assert!(csv.starts_with('\u{FEFF}'));
        assert_eq!(
            csv.trim_start_matches('\u{FEFF}'),
            "Producto;Precio\n\"Polera; talla M\";$9.990\n"
        );
    }

    #[test]
    fn sections_are_separated_by_blank_line() {
        let sheets = vec![
            ExportSheet {
                title: "Ventas Enero 2024".to_string(),
                headers: vec!["Producto".to_string()],
                rows: vec![vec!["A".to_string()]],
            },
            ExportSheet {
                title: "Ventas Enero 2025".to_string(),
                headers: vec!["Producto".to_string()],
                rows: vec![],
            },
        ];
        let csv = build_sections(&sheets);
        assert_eq!(
            csv.trim_start_matches('\u{FEFF}'),
            "Ventas Enero 2024\nProducto\nA\n\nVentas Enero 2025\nProducto\n"
        );
    }

    #[test]
    fn extension_is_added_once() {
        assert_eq!(with_csv_extension("Comparacion"), "Comparacion.csv");
        assert_eq!(with_csv_extension("stock.CSV"), "stock.CSV");
    }
}

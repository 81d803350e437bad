use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::shared::format::format_clp;
use crate::shared::serde_ext::{lenient_f64, lenient_i64, opt_string_or_number, string_or_number};

pub const MONTHS: [(&str, &str); 12] = [
    ("01", "Enero"),
    ("02", "Febrero"),
    ("03", "Marzo"),
    ("04", "Abril"),
    ("05", "Mayo"),
    ("06", "Junio"),
    ("07", "Julio"),
    ("08", "Agosto"),
    ("09", "Septiembre"),
    ("10", "Octubre"),
    ("11", "Noviembre"),
    ("12", "Diciembre"),
];

pub const REPORT_TITLE: &str = "Reporte de Comparación de Ventas";
pub const REPORT_FOOTER: &str = "Multi Stock Sync";

/// Spanish month name for `"01"`..`"12"` (also accepts `"1"`).
pub fn month_name(code: &str) -> Option<&'static str> {
    let n: u32 = code.trim().parse().ok()?;
    MONTHS.get((n as usize).checked_sub(1)?).map(|(_, name)| *name)
}

/// The ten years offered by the selectors, most recent first.
pub fn recent_years(current_year: i32) -> Vec<i32> {
    (0..10).map(|i| current_year - i).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonMode {
    #[default]
    Month,
    Year,
}

impl ComparisonMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Month => "Comparar Ventas entre Meses",
            Self::Year => "Comparar Ventas entre Años",
        }
    }

    pub fn endpoint(self, client_id: &str) -> String {
        match self {
            Self::Month => format!("/mercadolibre/compare-sales-data/{}", client_id),
            Self::Year => format!("/mercadolibre/compare-annual-sales-data/{}", client_id),
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoldProduct {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
}

fn month_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string_or_number(deserializer)?.map(|m| match m.trim().parse::<u32>() {
        Ok(n) => format!("{:02}", n),
        Err(_) => m,
    }))
}

/// Sales of one period (a month or a whole year).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSales {
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default, deserialize_with = "month_code")]
    pub month: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_sales: f64,
    #[serde(default)]
    pub sold_products: Vec<SoldProduct>,
}

impl PeriodSales {
    pub fn label(&self, mode: ComparisonMode) -> String {
        match (mode, self.month.as_deref().and_then(month_name)) {
            (ComparisonMode::Month, Some(name)) => format!("{} {}", name, self.year),
            _ => self.year.clone(),
        }
    }

    fn year_number(&self) -> i32 {
        self.year.trim().parse().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthComparison {
    pub month1: PeriodSales,
    pub month2: PeriodSales,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub difference: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percentage_change: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearComparison {
    pub year1: PeriodSales,
    pub year2: PeriodSales,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub difference: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percentage_change: f64,
}

/// Both comparison endpoints reduced to the two periods.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub mode: ComparisonMode,
    pub first: PeriodSales,
    pub second: PeriodSales,
}

impl From<MonthComparison> for ComparisonResult {
    fn from(c: MonthComparison) -> Self {
        Self {
            mode: ComparisonMode::Month,
            first: c.month1,
            second: c.month2,
        }
    }
}

impl From<YearComparison> for ComparisonResult {
    fn from(c: YearComparison) -> Self {
        Self {
            mode: ComparisonMode::Year,
            first: c.year1,
            second: c.year2,
        }
    }
}

// ============================================================================
// Request
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComparisonRequestError {
    #[error("Selecciona ambos años para comparar.")]
    MissingYear,
    #[error("Selecciona ambos meses para comparar.")]
    MissingMonth,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub mode: ComparisonMode,
    pub year1: String,
    pub month1: String,
    pub year2: String,
    pub month2: String,
}

impl ComparisonRequest {
    pub fn validate(&self) -> Result<(), ComparisonRequestError> {
        if self.year1.trim().is_empty() || self.year2.trim().is_empty() {
            return Err(ComparisonRequestError::MissingYear);
        }
        if self.mode == ComparisonMode::Month
            && (self.month1.trim().is_empty() || self.month2.trim().is_empty())
        {
            return Err(ComparisonRequestError::MissingMonth);
        }
        Ok(())
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self.mode {
            ComparisonMode::Month => vec![
                ("year1", self.year1.clone()),
                ("month1", self.month1.clone()),
                ("year2", self.year2.clone()),
                ("month2", self.month2.clone()),
            ],
            ComparisonMode::Year => vec![
                ("year1", self.year1.clone()),
                ("year2", self.year2.clone()),
            ],
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSummary {
    pub label1: String,
    pub label2: String,
    pub total1: f64,
    pub total2: f64,
    pub recent_label: String,
    pub previous_label: String,
    pub difference: f64,
    /// `None` when the previous period had no sales.
    pub percentage: Option<f64>,
    pub interpretation: String,
}

impl ComparisonSummary {
    pub fn percentage_value(&self) -> f64 {
        self.percentage.unwrap_or(0.0)
    }

    pub fn is_growth(&self) -> bool {
        self.difference > 0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The second period counts as the recent one only when its year is later.
pub fn summarize(mode: ComparisonMode, p1: &PeriodSales, p2: &PeriodSales) -> ComparisonSummary {
    let label1 = p1.label(mode);
    let label2 = p2.label(mode);
    let recent_is_second = p2.year_number() > p1.year_number();

    let (recent, previous, recent_label, previous_label) = if recent_is_second {
        (p2.total_sales, p1.total_sales, label2.clone(), label1.clone())
    } else {
        (p1.total_sales, p2.total_sales, label1.clone(), label2.clone())
    };

    let difference = recent - previous;
    let percentage = (previous != 0.0).then(|| round2(difference / previous * 100.0));

    let interpretation = if previous == 0.0 {
        format!(
            "En {} se registraron ventas por {}, mientras que en {} no hubo ventas registradas. \
             Esto indica el inicio de actividad comercial o una apertura significativa en el período actual.",
            recent_label,
            format_clp(recent),
            previous_label
        )
    } else if difference == 0.0 {
        format!(
            "No hubo variación en las ventas entre {} y {}.",
            previous_label, recent_label
        )
    } else {
        let (change, outcome) = if difference > 0.0 {
            ("aumentaron", "una mejora significativa")
        } else {
            ("disminuyeron", "una baja considerable")
        };
        format!(
            "Las ventas {} un {}% en {} con respecto a {}, reflejando {} en el rendimiento.",
            change,
            percentage.unwrap_or(0.0).abs(),
            recent_label,
            previous_label,
            outcome
        )
    };

    ComparisonSummary {
        label1,
        label2,
        total1: p1.total_sales,
        total2: p2.total_sales,
        recent_label,
        previous_label,
        difference,
        percentage,
        interpretation,
    }
}

// ============================================================================
// Export
// ============================================================================

/// A titled table written as one section of an export file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSheet {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn product_sheet(label: &str, period: &PeriodSales) -> ExportSheet {
    let mut rows = vec![vec![
        format!("Total Ventas: {}", format_clp(period.total_sales)),
        String::new(),
        String::new(),
    ]];
    rows.extend(period.sold_products.iter().map(|p| {
        vec![p.title.clone(), p.quantity.to_string(), format_clp(p.price)]
    }));
    ExportSheet {
        title: format!("Ventas {}", label),
        headers: vec!["Producto".into(), "Cantidad".into(), "Precio".into()],
        rows,
    }
}

/// Sheets and file name (without extension) for the comparison export.
pub fn comparison_sheets(
    summary: &ComparisonSummary,
    p1: &PeriodSales,
    p2: &PeriodSales,
) -> (String, Vec<ExportSheet>) {
    let filename = format!(
        "Comparacion_Ventas_{}_vs_{}",
        summary.label1.replace(' ', "_"),
        summary.label2.replace(' ', "_")
    );
    (
        filename,
        vec![
            product_sheet(&summary.label1, p1),
            product_sheet(&summary.label2, p2),
        ],
    )
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn product_table_html(label: &str, period: &PeriodSales) -> String {
    let rows: String = period
        .sold_products
        .iter()
        .map(|p| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&p.title),
                p.quantity,
                format_clp(p.price)
            )
        })
        .collect();
    format!(
        "<h3>Productos vendidos en {}</h3>\
         <table><thead><tr><th>Producto</th><th>Cantidad</th><th>Precio</th></tr></thead>\
         <tbody>{}</tbody></table>",
        escape_html(label),
        rows
    )
}

/// Standalone document shown in the preview frame and printed by the browser.
pub fn printable_report_html(
    nickname: &str,
    summary: &ComparisonSummary,
    p1: &PeriodSales,
    p2: &PeriodSales,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: Helvetica, Arial, sans-serif; margin: 0; color: #000; }}
header {{ background: #0079bf; color: #fff; padding: 16px 24px; font-size: 22px; font-weight: bold; }}
main {{ padding: 16px 24px; }}
table {{ width: 100%; border-collapse: collapse; margin-bottom: 16px; }}
th, td {{ border: 1px solid #ccc; padding: 4px 8px; text-align: left; }}
tbody tr:nth-child(odd) {{ background: #f2f2f2; }}
footer {{ text-align: center; color: #969696; font-size: 12px; padding: 12px; }}
</style>
</head>
<body>
<header>{title}</header>
<main>
<p>Cliente: {nickname}</p>
<h3>Totales Comparados:</h3>
<p>{label1}: {total1}</p>
<p>{label2}: {total2}</p>
<p>Diferencia: {difference}</p>
<p>Cambio porcentual: {percentage}%</p>
<h3>Interpretación:</h3>
<p>{interpretation}</p>
{table1}
{table2}
</main>
<footer>---------- {footer} ----------</footer>
</body>
</html>"#,
        title = REPORT_TITLE,
        nickname = escape_html(nickname),
        label1 = escape_html(&summary.label1),
        total1 = format_clp(summary.total1),
        label2 = escape_html(&summary.label2),
        total2 = format_clp(summary.total2),
        difference = format_clp(summary.difference),
        percentage = summary.percentage_value(),
        interpretation = escape_html(&summary.interpretation),
        table1 = product_table_html(&summary.label1, p1),
        table2 = product_table_html(&summary.label2, p2),
        footer = REPORT_FOOTER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(year: &str, month: Option<&str>, total: f64) -> PeriodSales {
        PeriodSales {
            year: year.into(),
            month: month.map(str::to_string),
            total_sales: total,
            sold_products: vec![SoldProduct {
                order_id: Some("1".into()),
                title: "Polera <XL>".into(),
                quantity: 2,
                price: 15990.0,
            }],
        }
    }

    #[test]
    fn months_and_years() {
        assert_eq!(month_name("01"), Some("Enero"));
        assert_eq!(month_name("12"), Some("Diciembre"));
        assert_eq!(month_name("0"), None);
        assert_eq!(month_name("13"), None);
        let years = recent_years(2024);
        assert_eq!(years.len(), 10);
        assert_eq!(years[0], 2024);
        assert_eq!(years[9], 2015);
    }

    #[test]
    fn month_numbers_are_padded() {
        let p: PeriodSales =
            serde_json::from_str(r#"{"year": 2024, "month": 3, "total_sales": "1000"}"#).unwrap();
        assert_eq!(p.month.as_deref(), Some("03"));
        assert_eq!(p.label(ComparisonMode::Month), "Marzo 2024");
        assert_eq!(p.label(ComparisonMode::Year), "2024");
    }

    #[test]
    fn request_validation_and_query() {
        let mut req = ComparisonRequest {
            mode: ComparisonMode::Month,
            year1: "2024".into(),
            year2: "2023".into(),
            month1: "01".into(),
            ..Default::default()
        };
        assert_eq!(req.validate(), Err(ComparisonRequestError::MissingMonth));
        req.month2 = "02".into();
        assert!(req.validate().is_ok());
        assert_eq!(req.query().len(), 4);

        req.mode = ComparisonMode::Year;
        req.month2.clear();
        assert!(req.validate().is_ok());
        assert_eq!(req.query(), vec![("year1", "2024".to_string()), ("year2", "2023".to_string())]);
        req.year1.clear();
        assert_eq!(req.validate(), Err(ComparisonRequestError::MissingYear));
    }

    #[test]
    fn growth_when_second_period_is_later() {
        let p1 = period("2023", None, 100_000.0);
        let p2 = period("2024", None, 112_346.0);
        let s = summarize(ComparisonMode::Year, &p1, &p2);
        assert_eq!(s.recent_label, "2024");
        assert_eq!(s.previous_label, "2023");
        assert_eq!(s.difference, 12_346.0);
        assert_eq!(s.percentage, Some(12.35));
        assert_eq!(
            s.interpretation,
            "Las ventas aumentaron un 12.35% en 2024 con respecto a 2023, reflejando una mejora significativa en el rendimiento."
        );
    }

    #[test]
    fn same_year_treats_first_as_recent() {
        let p1 = period("2024", Some("05"), 50_000.0);
        let p2 = period("2024", Some("04"), 100_000.0);
        let s = summarize(ComparisonMode::Month, &p1, &p2);
        assert_eq!(s.recent_label, "Mayo 2024");
        assert_eq!(s.difference, -50_000.0);
        assert_eq!(s.percentage, Some(-50.0));
        assert!(s.interpretation.starts_with("Las ventas disminuyeron un 50% en Mayo 2024"));
        assert!(s.interpretation.ends_with("una baja considerable en el rendimiento."));
    }

    #[test]
    fn no_previous_sales_and_no_change() {
        let s = summarize(
            ComparisonMode::Year,
            &period("2023", None, 0.0),
            &period("2024", None, 15_990.0),
        );
        assert_eq!(s.percentage, None);
        assert_eq!(s.percentage_value(), 0.0);
        assert!(s.interpretation.starts_with(
            "En 2024 se registraron ventas por $15.990, mientras que en 2023 no hubo ventas registradas."
        ));

        let s = summarize(
            ComparisonMode::Year,
            &period("2023", None, 500.0),
            &period("2024", None, 500.0),
        );
        assert_eq!(s.interpretation, "No hubo variación en las ventas entre 2023 y 2024.");
    }

    #[test]
    fn export_sheets() {
        let p1 = period("2024", Some("01"), 31_980.0);
        let p2 = period("2024", Some("02"), 0.0);
        let summary = summarize(ComparisonMode::Month, &p1, &p2);
        let (name, sheets) = comparison_sheets(&summary, &p1, &p2);
        assert_eq!(name, "Comparacion_Ventas_Enero_2024_vs_Febrero_2024");
        assert_eq!(sheets[0].title, "Ventas Enero 2024");
        assert_eq!(sheets[0].rows[0][0], "Total Ventas: $31.980");
        assert_eq!(sheets[0].rows[1], vec!["Polera <XL>", "2", "$15.990"]);
        assert_eq!(sheets[1].rows.len(), 2);
    }

    #[test]
    fn printable_html_escapes_content() {
        let p1 = period("2023", None, 1000.0);
        let p2 = period("2024", None, 2000.0);
        let summary = summarize(ComparisonMode::Year, &p1, &p2);
        let html = printable_report_html("TIENDA&CO", &summary, &p1, &p2);
        assert!(html.contains("<header>Reporte de Comparación de Ventas</header>"));
        assert!(html.contains("Cliente: TIENDA&amp;CO"));
        assert!(html.contains("Polera &lt;XL&gt;"));
        assert!(html.contains("Cambio porcentual: 100%"));
        assert!(html.contains("Multi Stock Sync"));
    }
}

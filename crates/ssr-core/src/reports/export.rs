//! CSV exports
//!
//! Report files are UTF-8 with a byte-order mark so that spreadsheet
//! applications pick the right encoding for the Polish headers. Text cells
//! that start like a spreadsheet formula are prefixed with `'`.

use super::stats::RangerStats;
use super::time::ReportTimezone;
use crate::entities::Control;

pub const UTF8_BOM: &str = "\u{FEFF}";
const LINE_END: &str = "\r\n";

pub const CONTROL_HEADERS: [&str; 11] = [
    "Data",
    "Godzina",
    "Strażnik",
    "ID Strażnika",
    "Kod grupy",
    "Zezwolenie",
    "Koło",
    "Szerokość geograficzna",
    "Długość geograficzna",
    "Wynik kontroli",
    "Szczegóły kontroli",
];

pub const RANGER_STATS_HEADERS: [&str; 4] =
    ["Strażnik", "Liczba kontroli", "Udane kontrole", "Pozycje kontroli"];

fn should_neutralize(value: &str) -> bool {
    let trimmed = value.trim_start();
    matches!(trimmed.chars().next(), Some('=' | '+' | '-' | '@'))
}

/// Quote a cell when it contains separators, quotes or line breaks
pub fn quote(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Escape a free-text cell
pub fn escape_text(value: &str) -> String {
    if should_neutralize(value) {
        quote(&format!("'{value}"))
    } else {
        quote(value)
    }
}

/// Line-oriented CSV builder
#[derive(Debug)]
pub struct CsvWriter {
    out: String,
    rows: usize,
}

impl CsvWriter {
    pub fn new(headers: &[&str], bom: bool) -> Self {
        let mut out = String::new();
        if bom {
            out.push_str(UTF8_BOM);
        }
        let mut writer = Self { out, rows: 0 };
        writer.line(headers.iter().map(|h| escape_text(h)));
        writer
    }

    fn line(&mut self, cells: impl Iterator<Item = String>) {
        let cells: Vec<String> = cells.collect();
        self.out.push_str(&cells.join(","));
        self.out.push_str(LINE_END);
    }

    /// Append a row of already escaped cells
    pub fn row(&mut self, cells: Vec<String>) {
        self.line(cells.into_iter());
        self.rows += 1;
    }

    /// Data rows written so far, excluding the header
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(self) -> String {
        self.out
    }
}

fn text(value: Option<&str>) -> String {
    value.map(escape_text).unwrap_or_default()
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Inspection report, one row per record
pub fn controls_csv(records: &[Control], tz: ReportTimezone) -> String {
    let mut csv = CsvWriter::new(&CONTROL_HEADERS, true);
    for control in records {
        let local = control.control_date.map(|d| tz.to_local(d));
        let reasons = control.reasons_text();
        csv.row(vec![
            local.map(|d| d.format("%-d.%m.%Y").to_string()).unwrap_or_default(),
            local.map(|d| d.format("%H:%M").to_string()).unwrap_or_default(),
            text(control.controller_name.as_deref()),
            text(control.controller_login()),
            text(control.group_code.as_deref()),
            text(control.license_number.as_deref()),
            text(control.club_name.as_deref()),
            number(control.position.map(|p| p.latitude)),
            number(control.position.map(|p| p.longitude)),
            if control.is_success == Some(true) { "OK" } else { "Wykroczenia" }.to_string(),
            text(Some(reasons.as_str()).filter(|r| !r.is_empty())),
        ]);
    }
    csv.finish()
}

pub fn ranger_stats_csv(stats: &[RangerStats]) -> String {
    let mut csv = CsvWriter::new(&RANGER_STATS_HEADERS, true);
    for entry in stats {
        csv.row(vec![
            escape_text(&entry.controller_name),
            entry.total_controls.to_string(),
            entry.successful_controls.to_string(),
            escape_text(&entry.positions_text()),
        ]);
    }
    csv.finish()
}

/// Credentials of freshly created accounts, handed to the administrator once
///
/// Passwords are written verbatim: a leading `+` is part of the secret.
pub fn credentials_csv<'a>(accounts: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut csv = CsvWriter::new(&["email", "password"], false);
    for (email, password) in accounts {
        csv.row(vec![quote(email), quote(password)]);
    }
    csv.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{GeoPosition, Snowflake};
    use chrono::{TimeZone, Utc};

    fn data_lines(csv: &str) -> Vec<&str> {
        csv.trim_start_matches(UTF8_BOM)
            .split(LINE_END)
            .filter(|l| !l.is_empty())
            .skip(1)
            .collect()
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("plain"), "plain");
        assert_eq!(escape_text("a,b"), "\"a,b\"");
        assert_eq!(escape_text("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_text("=SUM(A1)"), "'=SUM(A1)");
        assert_eq!(escape_text("@cmd,x"), "\"'@cmd,x\"");
    }

    #[test]
    fn test_controls_csv() {
        let mut control = Control::new(Snowflake::new(1));
        control.control_date = Some(Utc.with_ymd_and_hms(2025, 6, 1, 6, 5, 0).unwrap());
        control.controller_name = Some("Jan Nowak".to_string());
        control.controller_email = Some("MAZSSR_003@ranger.pl".to_string());
        control.club_name = Some("Koło 7, Warszawa".to_string());
        control.position = Some(GeoPosition::new(52.25, 21.5));
        control.is_success = Some(false);
        control.rejection_reasons = vec!["Brak karty".to_string(), "Za mała ryba".to_string()];

        let csv = controls_csv(&[control, Control::new(Snowflake::new(2))], ReportTimezone::CentralEurope);
        assert!(csv.starts_with(UTF8_BOM));
        assert!(csv[UTF8_BOM.len()..].starts_with("Data,Godzina,Strażnik,ID Strażnika"));

        let lines = data_lines(&csv);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "1.06.2025,08:05,Jan Nowak,MAZSSR_003,,,\"Koło 7, Warszawa\",52.25,21.5,Wykroczenia,Brak karty; Za mała ryba"
        );
        assert_eq!(lines[1], ",,,,,,,,,Wykroczenia,");
    }

    #[test]
    fn test_row_count_matches_records() {
        let records: Vec<Control> = (1..=7).map(|i| Control::new(Snowflake::new(i))).collect();
        let csv = controls_csv(&records, ReportTimezone::utc());
        assert_eq!(data_lines(&csv).len(), records.len());
    }

    #[test]
    fn test_ranger_stats_csv() {
        let stats = vec![RangerStats {
            controller_name: "Anna".to_string(),
            total_controls: 3,
            successful_controls: 2,
            positions: vec!["52.1, 21".to_string(), "Brak danych".to_string()],
        }];
        let csv = ranger_stats_csv(&stats);
        assert_eq!(data_lines(&csv), vec!["Anna,3,2,\"52.1, 21 | Brak danych\""]);
    }

    #[test]
    fn test_credentials_csv_has_no_bom() {
        let csv = credentials_csv([("MAZSSR_001@ranger.pl", "abc+def")]);
        assert_eq!(csv, "email,password\r\nMAZSSR_001@ranger.pl,abc+def\r\n");

        let leading_plus = credentials_csv([("MAZSSR_002@ranger.pl", "+abc")]);
        assert!(leading_plus.ends_with(",+abc\r\n"));
    }
}

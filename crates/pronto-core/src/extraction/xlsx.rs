use std::io::Cursor;

use calamine::{Data, ExcelDateTime, ExcelDateTimeType, Reader, Xlsx};

use crate::error::ProntoError;

/// Read one worksheet of an xlsx attendance report into a grid of cell strings.
///
/// `sheet` selects the worksheet by name; `None` takes the first one.
/// Empty cells become empty strings so column indices stay aligned with
/// the sheet.
pub fn read_xlsx_grid(bytes: &[u8], sheet: Option<&str>) -> Result<Vec<Vec<String>>, ProntoError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| ProntoError::Spreadsheet(format!("failed to open xlsx: {e}")))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ProntoError::Spreadsheet("workbook has no worksheets".into()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ProntoError::Spreadsheet(format!("sheet '{sheet_name}' not readable: {e}")))?;

    let grid: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_as_string).collect())
        .collect();

    tracing::debug!(sheet = %sheet_name, rows = grid.len(), "read spreadsheet grid");
    Ok(grid)
}

fn cell_as_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::DateTime(dt) => excel_datetime_text(dt),
        Data::DateTimeIso(iso) => iso_datetime_text(iso),
        Data::DurationIso(iso) => iso_duration_text(iso),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        _ => format!("{cell}"),
    }
}

/// Minutes in one day; Excel serials count days.
const DAY_MINUTES: i64 = 24 * 60;
/// Days from 1899-12-30 (the 1900 system's day zero) to 1970-01-01.
const EXCEL_TO_UNIX_DAYS: i64 = 25_569;
/// Serial of 1904-01-01 in the 1900 system.
const EXCEL_1904_OFFSET: f64 = 1_462.0;

/// Render a serial date/time cell the way it reads on screen:
/// time of day as HH:MM, dates as DD/MM/YYYY (plus HH:MM when a time is set).
fn excel_datetime_text(dt: &ExcelDateTime) -> String {
    let value = dt.as_f64();
    let with_flags = |kind, is_1904| *dt == ExcelDateTime::new(value, kind, is_1904);

    let total_minutes = (value * DAY_MINUTES as f64).round() as i64;
    if with_flags(ExcelDateTimeType::TimeDelta, false)
        || with_flags(ExcelDateTimeType::TimeDelta, true)
    {
        return format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60);
    }
    if value < 1.0 {
        let minutes = total_minutes.rem_euclid(DAY_MINUTES);
        return format!("{:02}:{:02}", minutes / 60, minutes % 60);
    }

    let serial = if with_flags(ExcelDateTimeType::DateTime, true) {
        value + EXCEL_1904_OFFSET
    } else {
        value
    };
    let total_minutes = (serial * DAY_MINUTES as f64).round() as i64;
    let mut days = total_minutes.div_euclid(DAY_MINUTES);
    let minutes = total_minutes.rem_euclid(DAY_MINUTES);
    // The 1900 system counts a 29/02/1900 that never existed.
    if days < 60 {
        days += 1;
    }
    let (year, month, day) = civil_from_days(days - EXCEL_TO_UNIX_DAYS);

    if minutes == 0 {
        format!("{day:02}/{month:02}/{year:04}")
    } else {
        format!(
            "{day:02}/{month:02}/{year:04} {:02}:{:02}",
            minutes / 60,
            minutes % 60
        )
    }
}

/// Gregorian (year, month, day) for a count of days since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// "2026-01-08T07:02:00" style cells (ODS). Unknown shapes pass through.
fn iso_datetime_text(iso: &str) -> String {
    let iso = iso.trim();
    let (date, time) = match iso.split_once('T') {
        Some((date, time)) => (Some(date), Some(time)),
        None if iso.contains(':') => (None, Some(iso)),
        None => (Some(iso), None),
    };

    let date = date.and_then(|d| {
        let mut parts = d.splitn(3, '-');
        let (y, m, dd) = (parts.next()?, parts.next()?, parts.next()?);
        Some(format!("{dd}/{m}/{y}"))
    });
    let time = time.and_then(|t| t.get(..5)).filter(|t| t.as_bytes().get(2) == Some(&b':'));

    match (date, time) {
        (Some(date), Some(time)) if time != "00:00" => format!("{date} {time}"),
        (Some(date), _) => date,
        (None, Some(time)) => time.to_string(),
        (None, None) => iso.to_string(),
    }
}

/// "PT7H2M0S" style duration cells as HH:MM. Unknown shapes pass through.
fn iso_duration_text(iso: &str) -> String {
    let Some(rest) = iso.trim().strip_prefix("PT") else {
        return iso.trim().to_string();
    };
    let (mut hours, mut minutes) = (0u64, 0u64);
    let mut number = String::new();
    for c in rest.chars() {
        match c {
            '0'..='9' | '.' => number.push(c),
            'H' | 'M' | 'S' => {
                let value = number.parse::<f64>().unwrap_or(0.0) as u64;
                match c {
                    'H' => hours = value,
                    'M' => minutes = value,
                    _ => {}
                }
                number.clear();
            }
            _ => return iso.trim().to_string(),
        }
    }
    format!("{hours:02}:{minutes:02}")
}

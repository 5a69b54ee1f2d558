// ============================================================================
// DATE & MONEY HELPERS - formatos para la API y para las tablas
// ============================================================================

use chrono::{DateTime, Datelike, NaiveDate, Timelike};

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Formato YYYY-MM-DD que espera el backend en los query params
pub fn format_date_for_api(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Fecha actual (del navegador via chrono/wasmbind)
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Todas las fechas de calendario de un mes (1..=28/29/30/31)
pub fn dates_in_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let days = match next_month {
        Some(next) => next.signed_duration_since(first).num_days(),
        None => return Vec::new(),
    };
    (0..days).filter_map(|d| first.checked_add_days(chrono::Days::new(d as u64))).collect()
}

/// "22 November, 2025" -> estilo "November 22, 2025" usado en la tabla de Company
pub fn format_long_date(date: NaiveDate) -> String {
    let month = MONTH_NAMES[(date.month0()) as usize];
    format!("{} {}, {}", month, date.day(), date.year())
}

/// Encabezado de mes: "November, 2025"
pub fn format_month_header(year: i32, month: u32) -> String {
    format!("{}, {}", MONTH_NAMES[(month - 1) as usize], year)
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (4..=20).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Timestamp de un registro: "Jan 15th, 2024 2:30PM"
pub fn format_timestamp(rfc3339: &str) -> String {
    let Ok(dt) = DateTime::parse_from_rfc3339(rfc3339) else {
        return rfc3339.to_string();
    };
    let month = &MONTH_NAMES[dt.month0() as usize][..3];
    let day = dt.day();
    let (hour24, minute) = (dt.hour(), dt.minute());
    let ampm = if hour24 >= 12 { "PM" } else { "AM" };
    let hour = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    format!(
        "{} {}{}, {} {}:{:02}{}",
        month,
        day,
        ordinal_suffix(day),
        dt.year(),
        hour,
        minute,
        ampm
    )
}

/// Monto con separador de miles y 2 decimales: 12345.5 -> "12,345.50"
pub fn format_naira(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, frac) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    let digits: Vec<char> = whole.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_enumeration_handles_short_and_leap_months() {
        assert_eq!(dates_in_month(2024, 11).len(), 30);
        assert_eq!(dates_in_month(2024, 12).len(), 31);
        assert_eq!(dates_in_month(2024, 2).len(), 29);
        assert_eq!(dates_in_month(2025, 2).len(), 28);
        assert!(dates_in_month(2025, 13).is_empty());
    }

    #[test]
    fn api_date_format() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_date_for_api(d), "2025-03-07");
    }

    #[test]
    fn long_date_label() {
        let d = NaiveDate::from_ymd_opt(2025, 11, 22).unwrap();
        assert_eq!(format_long_date(d), "November 22, 2025");
    }

    #[test]
    fn naira_grouping() {
        assert_eq!(format_naira(0.0), "0.00");
        assert_eq!(format_naira(800.0), "800.00");
        assert_eq!(format_naira(1500.0), "1,500.00");
        assert_eq!(format_naira(1234567.891), "1,234,567.89");
    }

    #[test]
    fn timestamp_label() {
        assert_eq!(format_timestamp("2024-01-15T14:30:00Z"), "Jan 15th, 2024 2:30PM");
        assert_eq!(format_timestamp("2024-01-12T09:20:00Z"), "Jan 12th, 2024 9:20AM");
        // Entrada no parseable se muestra tal cual
        assert_eq!(format_timestamp("garbage"), "garbage");
    }

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(30), "th");
    }
}

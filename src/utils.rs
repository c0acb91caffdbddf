use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::entity::CrmError;

// Parse a payment amount entered as text; must be a positive number
pub fn parse_amount(input: &str) -> Result<f64, CrmError> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^\$?\s*(\d+(?:\.\d+)?)$").unwrap();
    }

    RE.captures(input.trim())
        .and_then(|cap| cap.get(1)?.as_str().parse::<f64>().ok())
        .filter(|amount| *amount > 0.0)
        .ok_or(CrmError::InvalidAmount)
}

// Parse an income date in YYYY-MM-DD form; "today" is accepted as a shortcut
pub fn parse_income_date(input: &str) -> Result<NaiveDate, CrmError> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("today") {
        return Ok(chrono::Utc::now().date_naive());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| CrmError::InvalidDate)
}

/// Date range request for a contribution statement: "all" means the whole
/// ledger, otherwise "YYYY-MM-DD YYYY-MM-DD". An inverted range is rejected
/// here, before any query is issued.
pub enum DateRangeRequest {
    All,
    Bounded(NaiveDate, NaiveDate),
}

pub fn parse_date_range(input: &str) -> Result<DateRangeRequest, CrmError> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("all") {
        return Ok(DateRangeRequest::All);
    }

    let mut parts = trimmed.split_whitespace();
    let start = parts
        .next()
        .and_then(|p| NaiveDate::parse_from_str(p, "%Y-%m-%d").ok())
        .ok_or(CrmError::InvalidDate)?;
    let end = parts
        .next()
        .and_then(|p| NaiveDate::parse_from_str(p, "%Y-%m-%d").ok())
        .ok_or(CrmError::InvalidDate)?;

    if parts.next().is_some() {
        return Err(CrmError::InvalidDate);
    }
    if start > end {
        return Err(CrmError::InvalidDateRange);
    }

    Ok(DateRangeRequest::Bounded(start, end))
}

// Normalize a transaction reference for lookup ("txn-42" and "TXN-42" match)
pub fn normalize_reference(input: &str) -> String {
    input.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_dollar_amounts() {
        assert_eq!(parse_amount("25").unwrap(), 25.0);
        assert_eq!(parse_amount("25.50").unwrap(), 25.5);
        assert_eq!(parse_amount("$ 100.00").unwrap(), 100.0);
    }

    #[test]
    fn rejects_zero_negative_and_garbage_amounts() {
        assert!(matches!(parse_amount("0"), Err(CrmError::InvalidAmount)));
        assert!(matches!(parse_amount("-5"), Err(CrmError::InvalidAmount)));
        assert!(matches!(
            parse_amount("ten dollars"),
            Err(CrmError::InvalidAmount)
        ));
        assert!(matches!(parse_amount(""), Err(CrmError::InvalidAmount)));
    }

    #[test]
    fn parses_iso_dates_and_today() {
        assert_eq!(
            parse_income_date("2025-03-14").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
        assert!(parse_income_date("today").is_ok());
        assert!(matches!(
            parse_income_date("14/03/2025"),
            Err(CrmError::InvalidDate)
        ));
    }

    #[test]
    fn parses_full_range_and_all() {
        assert!(matches!(parse_date_range("all"), Ok(DateRangeRequest::All)));
        assert!(matches!(parse_date_range("ALL"), Ok(DateRangeRequest::All)));

        match parse_date_range("2024-01-01 2024-12-31") {
            Ok(DateRangeRequest::Bounded(start, end)) => {
                assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
                assert_eq!(end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
            }
            _ => panic!("expected bounded range"),
        }
    }

    #[test]
    fn rejects_inverted_range_before_any_query() {
        assert!(matches!(
            parse_date_range("2024-12-31 2024-01-01"),
            Err(CrmError::InvalidDateRange)
        ));
    }

    #[test]
    fn rejects_partial_or_overfull_range() {
        assert!(matches!(
            parse_date_range("2024-01-01"),
            Err(CrmError::InvalidDate)
        ));
        assert!(matches!(
            parse_date_range("2024-01-01 2024-02-01 2024-03-01"),
            Err(CrmError::InvalidDate)
        ));
    }

    #[test]
    fn normalizes_reference_case() {
        assert_eq!(normalize_reference(" txn-000042 "), "TXN-000042");
    }
}

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::entity::{IncomeTransaction, PostalAddress};

// Format a dollar amount to exactly two decimals
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

// Missing amounts render as $0.00
pub fn format_amount(amount: Option<f64>) -> String {
    format_money(amount.unwrap_or(0.0))
}

// Sum of transaction amounts, treating missing amounts as zero
pub fn total_amount(transactions: &[IncomeTransaction]) -> f64 {
    transactions.iter().map(|t| t.amount_or_zero()).sum()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Second address line composed only from the parts that are present:
/// "City, State Zip, Country". Returns None when no part is set so the
/// caller leaves no blank line behind.
pub fn city_line(address: &PostalAddress) -> Option<String> {
    let mut line = String::new();

    if let Some(city) = address.city.as_deref().filter(|s| !s.is_empty()) {
        line.push_str(city);
    }
    if let Some(state) = address.state.as_deref().filter(|s| !s.is_empty()) {
        if !line.is_empty() {
            line.push_str(", ");
        }
        line.push_str(state);
    }
    if let Some(zip) = address.postal_code.as_deref().filter(|s| !s.is_empty()) {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(zip);
    }
    if let Some(country) = address.country.as_deref().filter(|s| !s.is_empty()) {
        if !line.is_empty() {
            line.push_str(", ");
        }
        line.push_str(country);
    }

    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

// Donor name segment of a filename: every non-alphanumeric becomes '_'
pub fn sanitize_filename_segment(name: &str) -> String {
    lazy_static! {
        static ref NON_ALNUM: Regex = Regex::new(r"[^A-Za-z0-9]").unwrap();
    }

    let cleaned = NON_ALNUM.replace_all(name, "_").to_string();
    if cleaned.chars().all(|c| c == '_') {
        "Donor".to_string()
    } else {
        cleaned
    }
}

pub fn receipt_filename(donor_name: &str, date: NaiveDate) -> String {
    format!(
        "Receipt_{}_{}.pdf",
        sanitize_filename_segment(donor_name),
        format_date(date)
    )
}

pub fn statement_filename(donor_name: &str, range: Option<(NaiveDate, NaiveDate)>) -> String {
    let donor = sanitize_filename_segment(donor_name);
    match range {
        Some((start, end)) => format!(
            "Statement_{}_{}_{}.pdf",
            donor,
            format_date(start),
            format_date(end)
        ),
        None => format!("Statement_{}_AllDates.pdf", donor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn txn(amount: Option<f64>) -> IncomeTransaction {
        IncomeTransaction {
            id: 1,
            reference: "TXN-000001".to_string(),
            income_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            income_type: Some("Donation".to_string()),
            amount,
            description: None,
            contact_id: None,
            account_id: None,
            recurring_donation_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn total_is_arithmetic_sum_with_missing_as_zero() {
        let transactions = vec![txn(Some(10.0)), txn(None), txn(Some(2.5)), txn(Some(0.0))];
        assert_eq!(total_amount(&transactions), 12.5);
        assert_eq!(format_money(total_amount(&transactions)), "$12.50");
    }

    #[test]
    fn missing_amount_formats_as_zero() {
        assert_eq!(format_amount(None), "$0.00");
        assert_eq!(format_amount(Some(1234.5)), "$1234.50");
    }

    #[test]
    fn city_line_composes_only_present_parts() {
        let full = PostalAddress {
            street: Some("1 Main St".to_string()),
            city: Some("Buffalo".to_string()),
            state: Some("NY".to_string()),
            postal_code: Some("14201".to_string()),
            country: Some("USA".to_string()),
        };
        assert_eq!(city_line(&full).as_deref(), Some("Buffalo, NY 14201, USA"));

        let city_only = PostalAddress {
            city: Some("Buffalo".to_string()),
            ..Default::default()
        };
        assert_eq!(city_line(&city_only).as_deref(), Some("Buffalo"));

        let state_zip = PostalAddress {
            state: Some("NY".to_string()),
            postal_code: Some("14201".to_string()),
            ..Default::default()
        };
        assert_eq!(city_line(&state_zip).as_deref(), Some("NY 14201"));

        assert_eq!(city_line(&PostalAddress::default()), None);
    }

    #[test]
    fn filename_segment_strips_non_alphanumerics() {
        assert_eq!(sanitize_filename_segment("O'Brien & Sons, LLC"), "O_Brien___Sons__LLC");
        assert_eq!(sanitize_filename_segment("Jane Doe"), "Jane_Doe");
        assert_eq!(sanitize_filename_segment("!!!"), "Donor");
        assert_eq!(sanitize_filename_segment(""), "Donor");
    }

    #[test]
    fn filenames_encode_kind_donor_and_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(
            receipt_filename("Jane Doe", date),
            "Receipt_Jane_Doe_2025-03-14.pdf"
        );

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(
            statement_filename("Jane Doe", Some((start, end))),
            "Statement_Jane_Doe_2024-01-01_2024-12-31.pdf"
        );
        assert_eq!(
            statement_filename("Jane Doe", None),
            "Statement_Jane_Doe_AllDates.pdf"
        );
    }
}

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use uuid::Uuid;

use crate::entity::{Contact, RecurringDonation};
use crate::pdf::format;

// One contact per row; the prefix tells the callback handler which flow
// the selection belongs to ("stmc_" statement, "pmtc_" payment).
pub fn contact_results_keyboard(contacts: &[Contact], prefix: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        contacts
            .iter()
            .map(|contact| {
                vec![InlineKeyboardButton::callback(
                    contact.name.clone(),
                    format!("{}{}", prefix, contact.id),
                )]
            })
            .collect::<Vec<_>>(),
    )
}

pub fn donation_keyboard(donations: &[RecurringDonation], contact_id: Uuid) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        donations
            .iter()
            .map(|donation| {
                let label = match donation.promised_amount {
                    Some(amount) => {
                        format!("{} ({})", donation.name, format::format_money(amount))
                    }
                    None => donation.name.clone(),
                };
                vec![InlineKeyboardButton::callback(
                    label,
                    format!("pmtd_{}_{}", donation.id, contact_id),
                )]
            })
            .collect::<Vec<_>>(),
    )
}

// Only the identities the transaction actually links to are offered
pub fn recipient_choice_keyboard(
    transaction_id: i32,
    contact_name: Option<&str>,
    account_name: Option<&str>,
) -> InlineKeyboardMarkup {
    let mut rows = Vec::new();

    if let Some(name) = contact_name {
        rows.push(vec![InlineKeyboardButton::callback(
            format!("Contact: {}", name),
            format!("rcpt_c_{}", transaction_id),
        )]);
    }
    if let Some(name) = account_name {
        rows.push(vec![InlineKeyboardButton::callback(
            format!("Account: {}", name),
            format!("rcpt_a_{}", transaction_id),
        )]);
    }

    InlineKeyboardMarkup::new(rows)
}

pub fn balance_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "🔄 Refresh",
        "refresh_balance",
    )]])
}

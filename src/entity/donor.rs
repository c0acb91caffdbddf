use serde::{Deserialize, Serialize};

use super::{Account, Contact};

/// Which linked record a receipt is credited to when a transaction carries
/// both a contact and an account link. The user picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DonorKind {
    Contact,
    Account,
}

/// Mailing address in display order. Absent parts are skipped when
/// formatted, never rendered as blank lines.
#[derive(Debug, Clone, Default)]
pub struct PostalAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// The entity a receipt or statement is addressed to. Exactly one identity
/// per document.
#[derive(Debug, Clone)]
pub enum Donor {
    Contact(Contact),
    Account(Account),
}

impl Donor {
    pub fn name(&self) -> &str {
        match self {
            Donor::Contact(c) => &c.name,
            Donor::Account(a) => &a.name,
        }
    }

    pub fn address(&self) -> PostalAddress {
        match self {
            Donor::Contact(c) => PostalAddress {
                street: c.mailing_street.clone(),
                city: c.mailing_city.clone(),
                state: c.mailing_state.clone(),
                postal_code: c.mailing_postal_code.clone(),
                country: c.mailing_country.clone(),
            },
            Donor::Account(a) => PostalAddress {
                street: a.billing_street.clone(),
                city: a.billing_city.clone(),
                state: a.billing_state.clone(),
                postal_code: a.billing_postal_code.clone(),
                country: a.billing_country.clone(),
            },
        }
    }
}

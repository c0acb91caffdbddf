mod account;
mod contact;
mod crm_error;
mod donor;
mod income_transaction;
mod organization;
mod recurring_donation;
mod state;

pub use account::Account;
pub use contact::Contact;
pub use crm_error::CrmError;
pub use donor::{Donor, DonorKind, PostalAddress};
pub use income_transaction::IncomeTransaction;
pub use organization::Organization;
pub use recurring_donation::RecurringDonation;
pub use state::State;

use chrono::{NaiveDate, Utc};
use log::info;
use sqlx::{Error as SqlxError, PgPool, Row};
use uuid::Uuid;

use crate::entity::{Account, Contact, IncomeTransaction, RecurringDonation};

fn contact_from_row(row: &sqlx::postgres::PgRow) -> Result<Contact, SqlxError> {
    Ok(Contact {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        mailing_street: row.try_get("mailing_street")?,
        mailing_city: row.try_get("mailing_city")?,
        mailing_state: row.try_get("mailing_state")?,
        mailing_postal_code: row.try_get("mailing_postal_code")?,
        mailing_country: row.try_get("mailing_country")?,
        created_at: row.try_get("created_at")?,
    })
}

fn transaction_from_row(row: &sqlx::postgres::PgRow) -> Result<IncomeTransaction, SqlxError> {
    Ok(IncomeTransaction {
        id: row.try_get("id")?,
        reference: row.try_get("reference")?,
        income_date: row.try_get("income_date")?,
        income_type: row.try_get("income_type")?,
        amount: row.try_get("amount")?,
        description: row.try_get("description")?,
        contact_id: row.try_get("contact_id")?,
        account_id: row.try_get("account_id")?,
        recurring_donation_id: row.try_get("recurring_donation_id")?,
        created_at: row.try_get("created_at")?,
    })
}

// Search contacts by name fragment, case-insensitive
pub async fn search_contacts(
    pool: &PgPool,
    search_term: &str,
) -> Result<Vec<Contact>, SqlxError> {
    let pattern = format!("%{}%", search_term);
    let rows = sqlx::query(
        "SELECT * FROM contacts WHERE name ILIKE $1 ORDER BY name LIMIT 10",
    )
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    rows.iter().map(contact_from_row).collect()
}

// Get contact by id
pub async fn get_contact_by_id(pool: &PgPool, contact_id: Uuid) -> Result<Contact, SqlxError> {
    let row = sqlx::query("SELECT * FROM contacts WHERE id = $1")
        .bind(contact_id)
        .fetch_one(pool)
        .await?;

    contact_from_row(&row)
}

// Get account by id
pub async fn get_account_by_id(pool: &PgPool, account_id: Uuid) -> Result<Account, SqlxError> {
    let row = sqlx::query("SELECT * FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await?;

    Ok(Account {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        billing_street: row.try_get("billing_street")?,
        billing_city: row.try_get("billing_city")?,
        billing_state: row.try_get("billing_state")?,
        billing_postal_code: row.try_get("billing_postal_code")?,
        billing_country: row.try_get("billing_country")?,
        created_at: row.try_get("created_at")?,
    })
}

// Get all income transactions linked to a contact, oldest first
pub async fn get_transactions_by_contact(
    pool: &PgPool,
    contact_id: Uuid,
) -> Result<Vec<IncomeTransaction>, SqlxError> {
    let rows = sqlx::query(
        "SELECT * FROM income_transactions WHERE contact_id = $1 ORDER BY income_date, id",
    )
    .bind(contact_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(transaction_from_row).collect()
}

// Get income transactions for a contact bounded by an inclusive date range
pub async fn get_transactions_by_date_range(
    pool: &PgPool,
    contact_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<IncomeTransaction>, SqlxError> {
    let rows = sqlx::query(
        "SELECT * FROM income_transactions \
         WHERE contact_id = $1 AND income_date BETWEEN $2 AND $3 \
         ORDER BY income_date, id",
    )
    .bind(contact_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    rows.iter().map(transaction_from_row).collect()
}

// Get a single transaction by id
pub async fn get_transaction_by_id(
    pool: &PgPool,
    transaction_id: i32,
) -> Result<Option<IncomeTransaction>, SqlxError> {
    let row = sqlx::query("SELECT * FROM income_transactions WHERE id = $1")
        .bind(transaction_id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(transaction_from_row).transpose()
}

// Get a single transaction by reference number, case-insensitive
pub async fn get_transaction_by_reference(
    pool: &PgPool,
    reference: &str,
) -> Result<Option<IncomeTransaction>, SqlxError> {
    let row = sqlx::query("SELECT * FROM income_transactions WHERE lower(reference) = lower($1)")
        .bind(reference)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(transaction_from_row).transpose()
}

// Get active recurring donations for a contact
pub async fn get_recurring_donations_by_contact(
    pool: &PgPool,
    contact_id: Uuid,
) -> Result<Vec<RecurringDonation>, SqlxError> {
    let rows = sqlx::query(
        "SELECT * FROM recurring_donations WHERE contact_id = $1 AND active ORDER BY name",
    )
    .bind(contact_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(RecurringDonation {
                id: row.try_get("id")?,
                contact_id: row.try_get("contact_id")?,
                name: row.try_get("name")?,
                promised_amount: row.try_get("promised_amount")?,
                active: row.try_get("active")?,
                created_at: row.try_get("created_at")?,
            })
        })
        .collect()
}

// Get a single recurring donation by id
pub async fn get_recurring_donation_by_id(
    pool: &PgPool,
    donation_id: i32,
) -> Result<Option<RecurringDonation>, SqlxError> {
    let row = sqlx::query("SELECT * FROM recurring_donations WHERE id = $1")
        .bind(donation_id)
        .fetch_optional(pool)
        .await?;

    row.map(|row| {
        Ok(RecurringDonation {
            id: row.try_get("id")?,
            contact_id: row.try_get("contact_id")?,
            name: row.try_get("name")?,
            promised_amount: row.try_get("promised_amount")?,
            active: row.try_get("active")?,
            created_at: row.try_get("created_at")?,
        })
    })
    .transpose()
}

// Reference number derived from the generated ledger id
fn reference_for(id: i32) -> String {
    format!("TXN-{:06}", id)
}

// Record an income transaction in the ledger. The reference number is
// derived from the generated id, so the insert and the reference update run
// in one transaction; a failure rolls both back and no half-initialized row
// (empty reference, invisible to lookups) ever commits.
pub async fn create_income_transaction(
    pool: &PgPool,
    contact_id: Uuid,
    recurring_donation_id: i32,
    amount: f64,
    income_date: NaiveDate,
    description: Option<&str>,
) -> Result<String, SqlxError> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        "INSERT INTO income_transactions \
         (income_date, income_type, amount, description, contact_id, recurring_donation_id, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
    )
    .bind(income_date)
    .bind("Recurring Donation")
    .bind(amount)
    .bind(description)
    .bind(contact_id)
    .bind(recurring_donation_id)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    let id: i32 = row.try_get("id")?;
    let reference = reference_for(id);

    sqlx::query("UPDATE income_transactions SET reference = $1 WHERE id = $2")
        .bind(&reference)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("Recorded income transaction {}", reference);

    Ok(reference)
}

// Net balance over the whole income ledger; missing amounts count as zero
pub async fn get_net_balance(pool: &PgPool) -> Result<f64, SqlxError> {
    let row = sqlx::query("SELECT COALESCE(SUM(amount), 0) as net FROM income_transactions")
        .fetch_one(pool)
        .await?;

    let net: f64 = row.try_get("net")?;
    Ok(net)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_is_zero_padded_from_id() {
        assert_eq!(reference_for(7), "TXN-000007");
        assert_eq!(reference_for(123456), "TXN-123456");
        assert_eq!(reference_for(1234567), "TXN-1234567");
    }
}

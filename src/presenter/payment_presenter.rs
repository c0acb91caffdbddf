use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::entity::{CrmError, RecurringDonation};
use crate::interactor::payment_interactor::PaymentInteractor;
use crate::view::payment_view::PaymentView;

#[async_trait]
pub trait PaymentPresenter: Send + Sync {
    async fn search_contacts(&self, search_term: &str) -> Result<()>;
    async fn select_contact(&self, contact_id: Uuid) -> Result<()>;

    /// Promised amount of the selected donation, for prefilling the form.
    async fn donation_prefill(&self, donation_id: i32) -> Result<Option<f64>>;

    async fn create_payment(
        &self,
        contact_id: Uuid,
        donation_id: i32,
        amount: f64,
        income_date: NaiveDate,
        description: Option<String>,
    ) -> Result<()>;
}

pub struct PaymentPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> PaymentPresenterImpl<I, V>
where
    I: PaymentInteractor,
    V: PaymentView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> PaymentPresenter for PaymentPresenterImpl<I, V>
where
    I: PaymentInteractor + Send + Sync,
    V: PaymentView + Send + Sync,
{
    async fn search_contacts(&self, search_term: &str) -> Result<()> {
        match self.interactor.search_contacts(search_term).await {
            Ok(contacts) if contacts.is_empty() => {
                self.view.display_no_contacts(search_term).await?;
            }
            Ok(contacts) => {
                self.view.display_contact_results(contacts).await?;
            }
            Err(e) => {
                self.view.display_error(e.to_string()).await?;
            }
        }

        Ok(())
    }

    async fn select_contact(&self, contact_id: Uuid) -> Result<()> {
        let contact = match self.interactor.get_contact(contact_id).await {
            Ok(contact) => contact,
            Err(e) => {
                self.view.display_error(e.to_string()).await?;
                return Ok(());
            }
        };

        match self.interactor.get_recurring_donations(contact_id).await {
            Ok(donations) if donations.is_empty() => {
                self.view.display_no_donations(&contact.name).await?;
            }
            Ok(donations) => {
                self.view
                    .display_donation_choices(&contact, donations)
                    .await?;
            }
            Err(e) => {
                self.view.display_error(e.to_string()).await?;
            }
        }

        Ok(())
    }

    async fn donation_prefill(&self, donation_id: i32) -> Result<Option<f64>> {
        let donation: RecurringDonation =
            self.interactor.get_recurring_donation(donation_id).await?;
        Ok(donation.promised_amount)
    }

    async fn create_payment(
        &self,
        contact_id: Uuid,
        donation_id: i32,
        amount: f64,
        income_date: NaiveDate,
        description: Option<String>,
    ) -> Result<()> {
        match self
            .interactor
            .create_payment(contact_id, donation_id, amount, income_date, description)
            .await
        {
            Ok(reference) => {
                self.view.display_payment_created(&reference).await?;
            }
            Err(e) => {
                let text = match e.downcast_ref::<CrmError>() {
                    Some(CrmError::InvalidAmount) => {
                        "The payment amount must be greater than zero.".to_string()
                    }
                    _ => e.to_string(),
                };
                self.view.display_error(text).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Contact;
    use chrono::Utc;
    use std::sync::Mutex;

    struct MockInteractor {
        contacts: Vec<Contact>,
        donations: Vec<RecurringDonation>,
    }

    fn contact(name: &str) -> Contact {
        Contact {
            id: Uuid::new_v4(),
            name: name.to_string(),
            mailing_street: None,
            mailing_city: None,
            mailing_state: None,
            mailing_postal_code: None,
            mailing_country: None,
            created_at: Utc::now(),
        }
    }

    fn donation(id: i32, promised: Option<f64>) -> RecurringDonation {
        RecurringDonation {
            id,
            contact_id: Uuid::new_v4(),
            name: format!("Pledge {}", id),
            promised_amount: promised,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[async_trait]
    impl PaymentInteractor for MockInteractor {
        async fn search_contacts(&self, _search_term: &str) -> Result<Vec<Contact>> {
            Ok(self.contacts.clone())
        }

        async fn get_contact(&self, _contact_id: Uuid) -> Result<Contact> {
            Ok(self.contacts.first().cloned().unwrap_or_else(|| contact("Jane Doe")))
        }

        async fn get_recurring_donations(
            &self,
            _contact_id: Uuid,
        ) -> Result<Vec<RecurringDonation>> {
            Ok(self.donations.clone())
        }

        async fn get_recurring_donation(&self, donation_id: i32) -> Result<RecurringDonation> {
            self.donations
                .iter()
                .find(|d| d.id == donation_id)
                .cloned()
                .ok_or_else(|| CrmError::RecurringDonationNotFound.into())
        }

        async fn create_payment(
            &self,
            _contact_id: Uuid,
            _donation_id: i32,
            amount: f64,
            _income_date: NaiveDate,
            _description: Option<String>,
        ) -> Result<String> {
            if amount <= 0.0 {
                return Err(CrmError::InvalidAmount.into());
            }
            Ok("TXN-000099".to_string())
        }
    }

    #[derive(Default)]
    struct MockView {
        events: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PaymentView for MockView {
        async fn display_contact_results(&self, contacts: Vec<Contact>) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("results:{}", contacts.len()));
            Ok(())
        }

        async fn display_no_contacts(&self, search_term: &str) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("no_contacts:{}", search_term));
            Ok(())
        }

        async fn display_donation_choices(
            &self,
            contact: &Contact,
            donations: Vec<RecurringDonation>,
        ) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("choices:{}:{}", contact.name, donations.len()));
            Ok(())
        }

        async fn display_no_donations(&self, contact_name: &str) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("no_donations:{}", contact_name));
            Ok(())
        }

        async fn display_payment_created(&self, reference: &str) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("created:{}", reference));
            Ok(())
        }

        async fn display_error(&self, error_message: String) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("error:{}", error_message));
            Ok(())
        }
    }

    #[tokio::test]
    async fn empty_search_result_warns() {
        let view = Arc::new(MockView::default());
        let presenter = PaymentPresenterImpl::new(
            Arc::new(MockInteractor {
                contacts: vec![],
                donations: vec![],
            }),
            view.clone(),
        );

        presenter.search_contacts("nobody").await.unwrap();

        let events = view.events.lock().unwrap();
        assert_eq!(*events, vec!["no_contacts:nobody"]);
    }

    #[tokio::test]
    async fn contact_without_donations_warns() {
        let view = Arc::new(MockView::default());
        let presenter = PaymentPresenterImpl::new(
            Arc::new(MockInteractor {
                contacts: vec![contact("Jane Doe")],
                donations: vec![],
            }),
            view.clone(),
        );

        presenter.select_contact(Uuid::new_v4()).await.unwrap();

        let events = view.events.lock().unwrap();
        assert_eq!(*events, vec!["no_donations:Jane Doe"]);
    }

    #[tokio::test]
    async fn prefill_comes_from_promised_amount() {
        let view = Arc::new(MockView::default());
        let presenter = PaymentPresenterImpl::new(
            Arc::new(MockInteractor {
                contacts: vec![],
                donations: vec![donation(3, Some(75.0))],
            }),
            view,
        );

        assert_eq!(presenter.donation_prefill(3).await.unwrap(), Some(75.0));
    }

    #[tokio::test]
    async fn prefill_for_deleted_donation_is_a_typed_error() {
        let view = Arc::new(MockView::default());
        let presenter = PaymentPresenterImpl::new(
            Arc::new(MockInteractor {
                contacts: vec![],
                donations: vec![],
            }),
            view,
        );

        let err = presenter.donation_prefill(99).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CrmError>(),
            Some(CrmError::RecurringDonationNotFound)
        ));
    }

    #[tokio::test]
    async fn successful_payment_reports_reference() {
        let view = Arc::new(MockView::default());
        let presenter = PaymentPresenterImpl::new(
            Arc::new(MockInteractor {
                contacts: vec![],
                donations: vec![],
            }),
            view.clone(),
        );

        presenter
            .create_payment(
                Uuid::new_v4(),
                3,
                50.0,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                Some("January pledge".to_string()),
            )
            .await
            .unwrap();

        let events = view.events.lock().unwrap();
        assert_eq!(*events, vec!["created:TXN-000099"]);
    }
}

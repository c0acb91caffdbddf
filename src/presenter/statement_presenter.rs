use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::entity::{CrmError, Donor};
use crate::interactor::statement_interactor::StatementInteractor;
use crate::pdf::ReceiptRenderer;
use crate::view::statement_view::StatementView;

#[async_trait]
pub trait StatementPresenter: Send + Sync {
    async fn generate_statement(
        &self,
        contact_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<()>;
}

pub struct StatementPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
    renderer: Arc<ReceiptRenderer>,
}

impl<I, V> StatementPresenterImpl<I, V>
where
    I: StatementInteractor,
    V: StatementView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>, renderer: Arc<ReceiptRenderer>) -> Self {
        Self {
            interactor,
            view,
            renderer,
        }
    }
}

#[async_trait]
impl<I, V> StatementPresenter for StatementPresenterImpl<I, V>
where
    I: StatementInteractor + Send + Sync,
    V: StatementView + Send + Sync,
{
    async fn generate_statement(
        &self,
        contact_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<()> {
        let message = self.view.display_loading().await?;

        match self.interactor.fetch_statement(contact_id, range).await {
            Ok((contact, transactions)) => {
                if transactions.is_empty() {
                    self.view.display_no_transactions(message).await?;
                    return Ok(());
                }

                let donor = Donor::Contact(contact);
                match self.renderer.render_statement(&donor, &transactions, range) {
                    Ok(document) => {
                        self.view.display_document(document, message).await?;
                    }
                    Err(e) => {
                        self.view.display_error(e.to_string(), message).await?;
                    }
                }
            }
            Err(e) => {
                let text = match e.downcast_ref::<CrmError>() {
                    Some(CrmError::ContactNotFound) => "Donor not found.".to_string(),
                    _ => e.to_string(),
                };
                self.view.display_error(text, message).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Contact, IncomeTransaction, Organization};
    use chrono::Utc;
    use std::sync::Mutex;
    use teloxide::types::Message;

    struct MockInteractor {
        transactions: Vec<IncomeTransaction>,
        fail: bool,
    }

    #[async_trait]
    impl StatementInteractor for MockInteractor {
        async fn search_contacts(&self, _search_term: &str) -> Result<Vec<Contact>> {
            Ok(vec![])
        }

        async fn fetch_statement(
            &self,
            contact_id: Uuid,
            _range: Option<(NaiveDate, NaiveDate)>,
        ) -> Result<(Contact, Vec<IncomeTransaction>)> {
            if self.fail {
                return Err(CrmError::ContactNotFound.into());
            }

            let contact = Contact {
                id: contact_id,
                name: "Jane Doe".to_string(),
                mailing_street: None,
                mailing_city: None,
                mailing_state: None,
                mailing_postal_code: None,
                mailing_country: None,
                created_at: Utc::now(),
            };

            Ok((contact, self.transactions.clone()))
        }
    }

    #[derive(Default)]
    struct MockView {
        events: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl StatementView for MockView {
        async fn display_loading(&self) -> Result<Option<Message>> {
            self.events.lock().unwrap().push("loading".to_string());
            Ok(None)
        }

        async fn display_document(
            &self,
            document: crate::pdf::RenderedDocument,
            _message: Option<Message>,
        ) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("document:{}", document.filename));
            Ok(())
        }

        async fn display_no_transactions(&self, _message: Option<Message>) -> Result<()> {
            self.events.lock().unwrap().push("warning".to_string());
            Ok(())
        }

        async fn display_error(
            &self,
            error_message: String,
            _message: Option<Message>,
        ) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("error:{}", error_message));
            Ok(())
        }
    }

    fn renderer() -> Arc<ReceiptRenderer> {
        Arc::new(ReceiptRenderer::new(Organization::default(), None))
    }

    fn txn() -> IncomeTransaction {
        IncomeTransaction {
            id: 1,
            reference: "TXN-000001".to_string(),
            income_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            income_type: Some("Donation".to_string()),
            amount: Some(25.0),
            description: None,
            contact_id: None,
            account_id: None,
            recurring_donation_id: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn zero_transactions_warns_and_produces_no_document() {
        let interactor = Arc::new(MockInteractor {
            transactions: vec![],
            fail: false,
        });
        let view = Arc::new(MockView::default());
        let presenter = StatementPresenterImpl::new(interactor, view.clone(), renderer());

        presenter
            .generate_statement(Uuid::new_v4(), None)
            .await
            .unwrap();

        let events = view.events.lock().unwrap();
        assert_eq!(*events, vec!["loading", "warning"]);
    }

    #[tokio::test]
    async fn transactions_produce_a_document() {
        let interactor = Arc::new(MockInteractor {
            transactions: vec![txn()],
            fail: false,
        });
        let view = Arc::new(MockView::default());
        let presenter = StatementPresenterImpl::new(interactor, view.clone(), renderer());

        presenter
            .generate_statement(Uuid::new_v4(), None)
            .await
            .unwrap();

        let events = view.events.lock().unwrap();
        assert_eq!(events[0], "loading");
        assert_eq!(events[1], "document:Statement_Jane_Doe_AllDates.pdf");
    }

    #[tokio::test]
    async fn fetch_failure_becomes_a_user_visible_error() {
        let interactor = Arc::new(MockInteractor {
            transactions: vec![],
            fail: true,
        });
        let view = Arc::new(MockView::default());
        let presenter = StatementPresenterImpl::new(interactor, view.clone(), renderer());

        presenter
            .generate_statement(Uuid::new_v4(), None)
            .await
            .unwrap();

        let events = view.events.lock().unwrap();
        assert_eq!(events[1], "error:Donor not found.");
    }
}

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::{CrmError, Donor, DonorKind};
use crate::interactor::receipt_interactor::ReceiptInteractor;
use crate::pdf::ReceiptRenderer;
use crate::view::receipt_view::ReceiptView;

#[async_trait]
pub trait ReceiptPresenter: Send + Sync {
    /// Looks up a transaction by reference and offers the available
    /// recipient identities.
    async fn show_transaction(&self, reference: &str) -> Result<()>;

    /// Generates the receipt for the recipient the user picked.
    async fn generate_receipt(&self, transaction_id: i32, kind: DonorKind) -> Result<()>;
}

pub struct ReceiptPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
    renderer: Arc<ReceiptRenderer>,
}

impl<I, V> ReceiptPresenterImpl<I, V>
where
    I: ReceiptInteractor,
    V: ReceiptView,
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
impl<I, V> ReceiptPresenter for ReceiptPresenterImpl<I, V>
where
    I: ReceiptInteractor + Send + Sync,
    V: ReceiptView + Send + Sync,
{
    async fn show_transaction(&self, reference: &str) -> Result<()> {
        let message = self.view.display_loading().await?;

        match self.interactor.fetch_by_reference(reference).await {
            Ok(context) => {
                if context.contact.is_none() && context.account.is_none() {
                    self.view.display_no_recipient(message).await?;
                    return Ok(());
                }

                self.view
                    .display_recipient_choice(
                        &context.transaction,
                        context.contact.as_ref().map(|c| c.name.as_str()),
                        context.account.as_ref().map(|a| a.name.as_str()),
                        message,
                    )
                    .await?;
            }
            Err(e) => match e.downcast_ref::<CrmError>() {
                Some(CrmError::TransactionNotFound) => {
                    self.view.display_not_found(reference, message).await?;
                }
                _ => {
                    self.view.display_error(e.to_string(), message).await?;
                }
            },
        }

        Ok(())
    }

    async fn generate_receipt(&self, transaction_id: i32, kind: DonorKind) -> Result<()> {
        let message = self.view.display_loading().await?;

        match self.interactor.fetch_by_id(transaction_id).await {
            Ok(context) => {
                let donor = match kind {
                    DonorKind::Contact => context.contact.map(Donor::Contact),
                    DonorKind::Account => context.account.map(Donor::Account),
                };

                let Some(donor) = donor else {
                    self.view.display_no_recipient(message).await?;
                    return Ok(());
                };

                match self.renderer.render_single(&donor, &context.transaction) {
                    Ok(document) => {
                        self.view.display_document(document, message).await?;
                    }
                    Err(e) => {
                        self.view.display_error(e.to_string(), message).await?;
                    }
                }
            }
            Err(e) => {
                self.view.display_error(e.to_string(), message).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Account, Contact, IncomeTransaction, Organization};
    use crate::interactor::receipt_interactor::ReceiptContext;
    use chrono::{NaiveDate, Utc};
    use std::sync::Mutex;
    use teloxide::types::Message;
    use uuid::Uuid;

    struct MockInteractor {
        with_contact: bool,
        with_account: bool,
    }

    impl MockInteractor {
        fn context(&self) -> ReceiptContext {
            let contact = self.with_contact.then(|| Contact {
                id: Uuid::new_v4(),
                name: "Jane Doe".to_string(),
                mailing_street: None,
                mailing_city: None,
                mailing_state: None,
                mailing_postal_code: None,
                mailing_country: None,
                created_at: Utc::now(),
            });
            let account = self.with_account.then(|| Account {
                id: Uuid::new_v4(),
                name: "Acme Corp".to_string(),
                billing_street: None,
                billing_city: None,
                billing_state: None,
                billing_postal_code: None,
                billing_country: None,
                created_at: Utc::now(),
            });

            ReceiptContext {
                transaction: IncomeTransaction {
                    id: 7,
                    reference: "TXN-000007".to_string(),
                    income_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                    income_type: Some("Donation".to_string()),
                    amount: Some(50.0),
                    description: None,
                    contact_id: None,
                    account_id: None,
                    recurring_donation_id: None,
                    created_at: Utc::now(),
                },
                contact,
                account,
            }
        }
    }

    #[async_trait]
    impl ReceiptInteractor for MockInteractor {
        async fn fetch_by_reference(&self, _reference: &str) -> Result<ReceiptContext> {
            Ok(self.context())
        }

        async fn fetch_by_id(&self, _transaction_id: i32) -> Result<ReceiptContext> {
            Ok(self.context())
        }
    }

    struct FailingInteractor;

    #[async_trait]
    impl ReceiptInteractor for FailingInteractor {
        async fn fetch_by_reference(&self, _reference: &str) -> Result<ReceiptContext> {
            Err(CrmError::AccountNotFound.into())
        }

        async fn fetch_by_id(&self, _transaction_id: i32) -> Result<ReceiptContext> {
            Err(CrmError::AccountNotFound.into())
        }
    }

    #[derive(Default)]
    struct MockView {
        events: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ReceiptView for MockView {
        async fn display_loading(&self) -> Result<Option<Message>> {
            Ok(None)
        }

        async fn display_recipient_choice(
            &self,
            transaction: &IncomeTransaction,
            contact_name: Option<&str>,
            account_name: Option<&str>,
            _message: Option<Message>,
        ) -> Result<()> {
            self.events.lock().unwrap().push(format!(
                "choice:{}:{}:{}",
                transaction.reference,
                contact_name.unwrap_or("-"),
                account_name.unwrap_or("-")
            ));
            Ok(())
        }

        async fn display_no_recipient(&self, _message: Option<Message>) -> Result<()> {
            self.events.lock().unwrap().push("no_recipient".to_string());
            Ok(())
        }

        async fn display_not_found(
            &self,
            _reference: &str,
            _message: Option<Message>,
        ) -> Result<()> {
            self.events.lock().unwrap().push("not_found".to_string());
            Ok(())
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

    fn presenter(
        with_contact: bool,
        with_account: bool,
        view: Arc<MockView>,
    ) -> ReceiptPresenterImpl<MockInteractor, MockView> {
        ReceiptPresenterImpl::new(
            Arc::new(MockInteractor {
                with_contact,
                with_account,
            }),
            view,
            Arc::new(ReceiptRenderer::new(Organization::default(), None)),
        )
    }

    #[tokio::test]
    async fn offers_only_available_identities() {
        let view = Arc::new(MockView::default());
        presenter(true, false, view.clone())
            .show_transaction("TXN-000007")
            .await
            .unwrap();

        let events = view.events.lock().unwrap();
        assert_eq!(events[0], "choice:TXN-000007:Jane Doe:-");
    }

    #[tokio::test]
    async fn no_linked_recipient_warns_instead_of_offering() {
        let view = Arc::new(MockView::default());
        presenter(false, false, view.clone())
            .show_transaction("TXN-000007")
            .await
            .unwrap();

        let events = view.events.lock().unwrap();
        assert_eq!(*events, vec!["no_recipient"]);
    }

    #[tokio::test]
    async fn dangling_donor_link_surfaces_as_error() {
        let view = Arc::new(MockView::default());
        let presenter = ReceiptPresenterImpl::new(
            Arc::new(FailingInteractor),
            view.clone(),
            Arc::new(ReceiptRenderer::new(Organization::default(), None)),
        );

        presenter.show_transaction("TXN-000007").await.unwrap();

        let events = view.events.lock().unwrap();
        assert_eq!(*events, vec!["error:Account not found"]);
    }

    #[tokio::test]
    async fn generates_receipt_for_chosen_account_identity() {
        let view = Arc::new(MockView::default());
        presenter(true, true, view.clone())
            .generate_receipt(7, DonorKind::Account)
            .await
            .unwrap();

        let events = view.events.lock().unwrap();
        assert_eq!(events[0], "document:Receipt_Acme_Corp_2024-06-01.pdf");
    }
}

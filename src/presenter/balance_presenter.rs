use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::types::Message;

use crate::interactor::balance_interactor::BalanceInteractor;
use crate::view::balance_view::BalanceView;

#[async_trait]
pub trait BalancePresenter: Send + Sync {
    async fn show_balance(&self) -> Result<()>;

    /// Re-runs the fetch in place of an existing balance message.
    async fn refresh_balance(&self, message: Message) -> Result<()>;
}

pub struct BalancePresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> BalancePresenterImpl<I, V>
where
    I: BalanceInteractor,
    V: BalanceView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

impl<I, V> BalancePresenterImpl<I, V>
where
    I: BalanceInteractor + Send + Sync,
    V: BalanceView + Send + Sync,
{
    async fn fetch_and_display(&self, message: Option<Message>) -> Result<()> {
        match self.interactor.get_net_balance().await {
            Ok(net) => {
                self.view.display_balance(net, message).await?;
            }
            Err(e) => {
                self.view.display_error(e.to_string(), message).await?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl<I, V> BalancePresenter for BalancePresenterImpl<I, V>
where
    I: BalanceInteractor + Send + Sync,
    V: BalanceView + Send + Sync,
{
    async fn show_balance(&self) -> Result<()> {
        let message = self.view.display_loading().await?;
        self.fetch_and_display(message).await
    }

    async fn refresh_balance(&self, message: Message) -> Result<()> {
        let message = self.view.display_loading_update(message).await?;
        self.fetch_and_display(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct MockInteractor {
        net: Result<f64, String>,
    }

    #[async_trait]
    impl BalanceInteractor for MockInteractor {
        async fn get_net_balance(&self) -> Result<f64> {
            match &self.net {
                Ok(v) => Ok(*v),
                Err(e) => Err(anyhow::anyhow!("{}", e)),
            }
        }
    }

    #[derive(Default)]
    struct MockView {
        events: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BalanceView for MockView {
        async fn display_loading(&self) -> Result<Option<Message>> {
            self.events.lock().unwrap().push("loading".to_string());
            Ok(None)
        }

        async fn display_loading_update(&self, message: Message) -> Result<Option<Message>> {
            self.events.lock().unwrap().push("refreshing".to_string());
            Ok(Some(message))
        }

        async fn display_balance(&self, net: f64, _message: Option<Message>) -> Result<()> {
            self.events.lock().unwrap().push(format!("balance:{:.2}", net));
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

    #[tokio::test]
    async fn shows_fetched_balance() {
        let view = Arc::new(MockView::default());
        let presenter = BalancePresenterImpl::new(
            Arc::new(MockInteractor { net: Ok(1234.5) }),
            view.clone(),
        );

        presenter.show_balance().await.unwrap();

        let events = view.events.lock().unwrap();
        assert_eq!(*events, vec!["loading", "balance:1234.50"]);
    }

    #[tokio::test]
    async fn fetch_error_surfaces_once() {
        let view = Arc::new(MockView::default());
        let presenter = BalancePresenterImpl::new(
            Arc::new(MockInteractor {
                net: Err("connection refused".to_string()),
            }),
            view.clone(),
        );

        presenter.show_balance().await.unwrap();

        let events = view.events.lock().unwrap();
        assert_eq!(*events, vec!["loading", "error:connection refused"]);
    }
}

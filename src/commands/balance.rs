use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::interactor::balance_interactor::BalanceInteractorImpl;
use crate::presenter::balance_presenter::{BalancePresenter, BalancePresenterImpl};
use crate::view::balance_view::TelegramBalanceView;

pub struct BalanceCommand;

impl CommandHandler for BalanceCommand {
    fn command_name() -> &'static str {
        "balance"
    }

    fn description() -> &'static str {
        "show the organization's net balance"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        _dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Balance command received from Telegram ID: {}", telegram_id);

        let interactor = Arc::new(BalanceInteractorImpl::new(services.db_pool()));
        let view = Arc::new(TelegramBalanceView::new(bot, msg.chat.id));
        let presenter = BalancePresenterImpl::new(interactor, view);

        presenter.show_balance().await?;

        Ok(())
    }
}

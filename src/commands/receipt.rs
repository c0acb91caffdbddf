use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::interactor::receipt_interactor::ReceiptInteractorImpl;
use crate::presenter::receipt_presenter::{ReceiptPresenter, ReceiptPresenterImpl};
use crate::view::receipt_view::TelegramReceiptView;

pub struct ReceiptCommand;

impl CommandHandler for ReceiptCommand {
    fn command_name() -> &'static str {
        "receipt"
    }

    fn description() -> &'static str {
        "generate a donation receipt PDF for one transaction"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        _telegram_id: i64,
        dialogue: Option<MyDialogue>,
        _services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let dialogue = dialogue.ok_or_else(|| anyhow::anyhow!("Dialogue context not provided"))?;
        info!("Receipt command initiated");

        dialogue.update(State::AwaitingReceiptReference).await?;
        bot.send_message(
            msg.chat.id,
            "Enter the transaction reference (e.g. TXN-000123):",
        )
        .await?;

        Ok(())
    }
}

pub async fn receive_receipt_reference(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let Some(reference) = msg.text() else {
        bot.send_message(msg.chat.id, "Please enter the transaction reference as text:")
            .await?;
        return Ok(());
    };

    dialogue.update(State::Start).await?;

    let interactor = Arc::new(ReceiptInteractorImpl::new(services.db_pool()));
    let view = Arc::new(TelegramReceiptView::new(bot, msg.chat.id));
    let presenter = ReceiptPresenterImpl::new(interactor, view, services.renderer());

    presenter.show_transaction(reference).await?;

    Ok(())
}

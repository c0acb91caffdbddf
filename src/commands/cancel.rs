use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;

pub struct CancelCommand;

impl CommandHandler for CancelCommand {
    fn command_name() -> &'static str {
        "cancel"
    }

    fn description() -> &'static str {
        "cancel the current flow"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        _services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Cancel command received from Telegram ID: {}", telegram_id);

        if let Some(dialogue) = dialogue {
            dialogue.update(State::Start).await?;
        }

        bot.send_message(msg.chat.id, "Cancelled. Use /help to see what I can do.")
            .await?;

        Ok(())
    }
}

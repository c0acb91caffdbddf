use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::{prelude::*, types::ParseMode};

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;

pub struct StartCommand;

impl CommandHandler for StartCommand {
    fn command_name() -> &'static str {
        "start"
    }

    fn description() -> &'static str {
        "start the bot"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        _dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Start command received from Telegram ID: {}", telegram_id);

        let text = format!(
            "<b>Welcome to the {} donation desk!</b>\n\n\
            /statement - contribution statement PDF for a donor\n\
            /receipt - donation receipt PDF for one transaction\n\
            /payment - record a recurring-donation payment\n\
            /balance - organization net balance\n\
            /cancel - abandon the current flow\n\
            /help - this list",
            services.organization().name
        );

        bot.send_message(msg.chat.id, text)
            .parse_mode(ParseMode::Html)
            .await?;

        Ok(())
    }
}

use anyhow::Result;
use async_trait::async_trait;
use chrono;
use teloxide::{
    prelude::*,
    types::{Message, ParseMode},
    Bot,
};

use crate::commands::ui;

#[async_trait]
pub trait BalanceView: Send + Sync {
    async fn display_loading(&self) -> Result<Option<Message>>;
    async fn display_loading_update(&self, message: Message) -> Result<Option<Message>>;
    async fn display_balance(&self, net_balance: f64, message: Option<Message>) -> Result<()>;
    async fn display_error(&self, error_message: String, message: Option<Message>) -> Result<()>;
}

pub struct TelegramBalanceView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramBalanceView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    fn balance_marker(net_balance: f64) -> &'static str {
        if net_balance > 0.0 {
            "🟢"
        } else if net_balance < 0.0 {
            "🔴"
        } else {
            "⚪"
        }
    }
}

#[async_trait]
impl BalanceView for TelegramBalanceView {
    async fn display_loading(&self) -> Result<Option<Message>> {
        let message = self
            .bot
            .send_message(self.chat_id, "Fetching net balance...")
            .await?;

        Ok(Some(message))
    }

    async fn display_loading_update(&self, message: Message) -> Result<Option<Message>> {
        let updated_msg = self
            .bot
            .edit_message_text(self.chat_id, message.id, "Refreshing net balance...")
            .await?;

        Ok(Some(updated_msg))
    }

    async fn display_balance(&self, net_balance: f64, message: Option<Message>) -> Result<()> {
        let text = format!(
            "{} <b>Organization Net Balance:</b> ${:.2}\n\n—\n\nUpdated: {} UTC",
            Self::balance_marker(net_balance),
            net_balance,
            chrono::Utc::now().format("%H:%M:%S")
        );

        let keyboard = ui::balance_keyboard();

        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;
        } else {
            self.bot
                .send_message(self.chat_id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;
        }

        Ok(())
    }

    async fn display_error(&self, error_message: String, message: Option<Message>) -> Result<()> {
        let text = format!("❌ Error: {}", error_message);

        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .await?;
        } else {
            self.bot.send_message(self.chat_id, text).await?;
        }

        Ok(())
    }
}

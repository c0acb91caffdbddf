use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InputFile, Message},
    Bot,
};

use crate::commands::ui;
use crate::entity::IncomeTransaction;
use crate::pdf::RenderedDocument;

#[async_trait]
pub trait ReceiptView: Send + Sync {
    async fn display_loading(&self) -> Result<Option<Message>>;

    /// Offers the available recipients (contact and/or account) for the
    /// fetched transaction, replacing the loading message.
    async fn display_recipient_choice(
        &self,
        transaction: &IncomeTransaction,
        contact_name: Option<&str>,
        account_name: Option<&str>,
        message: Option<Message>,
    ) -> Result<()>;

    async fn display_no_recipient(&self, message: Option<Message>) -> Result<()>;
    async fn display_not_found(&self, reference: &str, message: Option<Message>) -> Result<()>;
    async fn display_document(
        &self,
        document: RenderedDocument,
        message: Option<Message>,
    ) -> Result<()>;
    async fn display_error(&self, error_message: String, message: Option<Message>) -> Result<()>;
}

pub struct TelegramReceiptView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramReceiptView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl ReceiptView for TelegramReceiptView {
    async fn display_loading(&self) -> Result<Option<Message>> {
        let message = self
            .bot
            .send_message(self.chat_id, "Fetching transaction...")
            .await?;

        Ok(Some(message))
    }

    async fn display_recipient_choice(
        &self,
        transaction: &IncomeTransaction,
        contact_name: Option<&str>,
        account_name: Option<&str>,
        message: Option<Message>,
    ) -> Result<()> {
        let text = format!(
            "Transaction {} found.\nWho should the receipt be made out to?",
            transaction.reference
        );
        let keyboard =
            ui::recipient_choice_keyboard(transaction.id, contact_name, account_name);

        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .reply_markup(keyboard)
                .await?;
        } else {
            self.bot
                .send_message(self.chat_id, text)
                .reply_markup(keyboard)
                .await?;
        }

        Ok(())
    }

    async fn display_no_recipient(&self, message: Option<Message>) -> Result<()> {
        let text = "⚠️ This transaction is not linked to a contact or an account, \
                    so no receipt can be generated.";

        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .await?;
        } else {
            self.bot.send_message(self.chat_id, text).await?;
        }

        Ok(())
    }

    async fn display_not_found(&self, reference: &str, message: Option<Message>) -> Result<()> {
        let text = format!("⚠️ No transaction found with reference {}.", reference);

        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .await?;
        } else {
            self.bot.send_message(self.chat_id, text).await?;
        }

        Ok(())
    }

    async fn display_document(
        &self,
        document: RenderedDocument,
        message: Option<Message>,
    ) -> Result<()> {
        self.bot
            .send_document(
                self.chat_id,
                InputFile::memory(document.bytes).file_name(document.filename),
            )
            .await?;

        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, "✅ Receipt generated successfully!")
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

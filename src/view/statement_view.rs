use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InputFile, Message},
    Bot,
};

use crate::pdf::RenderedDocument;

#[async_trait]
pub trait StatementView: Send + Sync {
    async fn display_loading(&self) -> Result<Option<Message>>;
    async fn display_document(
        &self,
        document: RenderedDocument,
        message: Option<Message>,
    ) -> Result<()>;
    async fn display_no_transactions(&self, message: Option<Message>) -> Result<()>;
    async fn display_error(&self, error_message: String, message: Option<Message>) -> Result<()>;
}

pub struct TelegramStatementView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramStatementView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl StatementView for TelegramStatementView {
    async fn display_loading(&self) -> Result<Option<Message>> {
        let message = self
            .bot
            .send_message(self.chat_id, "Generating contribution statement...")
            .await?;

        Ok(Some(message))
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
                .edit_message_text(self.chat_id, msg.id, "✅ Statement generated successfully!")
                .await?;
        }

        Ok(())
    }

    async fn display_no_transactions(&self, message: Option<Message>) -> Result<()> {
        let text = "⚠️ No transactions found for this donor in the requested period. \
                    No statement was generated.";

        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .await?;
        } else {
            self.bot.send_message(self.chat_id, text).await?;
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

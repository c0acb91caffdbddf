use anyhow::Result;
use async_trait::async_trait;
use teloxide::{prelude::*, types::ParseMode, Bot};

use crate::commands::ui;
use crate::entity::{Contact, RecurringDonation};

#[async_trait]
pub trait PaymentView: Send + Sync {
    async fn display_contact_results(&self, contacts: Vec<Contact>) -> Result<()>;
    async fn display_no_contacts(&self, search_term: &str) -> Result<()>;
    async fn display_donation_choices(
        &self,
        contact: &Contact,
        donations: Vec<RecurringDonation>,
    ) -> Result<()>;
    async fn display_no_donations(&self, contact_name: &str) -> Result<()>;
    async fn display_payment_created(&self, reference: &str) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub struct TelegramPaymentView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramPaymentView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl PaymentView for TelegramPaymentView {
    async fn display_contact_results(&self, contacts: Vec<Contact>) -> Result<()> {
        let keyboard = ui::contact_results_keyboard(&contacts, "pmtc_");

        self.bot
            .send_message(self.chat_id, "Select a donor:")
            .reply_markup(keyboard)
            .await?;

        Ok(())
    }

    async fn display_no_contacts(&self, search_term: &str) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                format!(
                    "⚠️ No contacts matched \"{}\". Try another name:",
                    search_term
                ),
            )
            .await?;

        Ok(())
    }

    async fn display_donation_choices(
        &self,
        contact: &Contact,
        donations: Vec<RecurringDonation>,
    ) -> Result<()> {
        let keyboard = ui::donation_keyboard(&donations, contact.id);

        self.bot
            .send_message(
                self.chat_id,
                format!("Recurring donations for <b>{}</b>:", contact.name),
            )
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard)
            .await?;

        Ok(())
    }

    async fn display_no_donations(&self, contact_name: &str) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                format!("⚠️ {} has no active recurring donations.", contact_name),
            )
            .await?;

        Ok(())
    }

    async fn display_payment_created(&self, reference: &str) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                format!("✅ Income transaction {} created successfully.", reference),
            )
            .await?;

        Ok(())
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        self.bot
            .send_message(self.chat_id, format!("❌ Error: {}", error_message))
            .await?;

        Ok(())
    }
}

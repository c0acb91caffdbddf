use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::interactor::payment_interactor::PaymentInteractorImpl;
use crate::presenter::payment_presenter::{PaymentPresenter, PaymentPresenterImpl};
use crate::utils;
use crate::view::payment_view::TelegramPaymentView;

pub struct PaymentCommand;

impl CommandHandler for PaymentCommand {
    fn command_name() -> &'static str {
        "payment"
    }

    fn description() -> &'static str {
        "record a recurring-donation payment"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        _telegram_id: i64,
        dialogue: Option<MyDialogue>,
        _services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let dialogue = dialogue.ok_or_else(|| anyhow::anyhow!("Dialogue context not provided"))?;
        info!("Payment command initiated");

        dialogue.update(State::AwaitingPaymentContactSearch).await?;
        bot.send_message(msg.chat.id, "Enter the donor's name to search:")
            .await?;

        Ok(())
    }
}

fn payment_presenter(
    bot: Bot,
    chat_id: ChatId,
    services: &ServiceContainer,
) -> PaymentPresenterImpl<PaymentInteractorImpl, TelegramPaymentView> {
    PaymentPresenterImpl::new(
        Arc::new(PaymentInteractorImpl::new(services.db_pool())),
        Arc::new(TelegramPaymentView::new(bot, chat_id)),
    )
}

// Typing a new name while results are shown simply searches again, which
// drops any earlier selection.
pub async fn receive_payment_contact_search(
    bot: Bot,
    msg: Message,
    _dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let Some(search_term) = msg.text() else {
        bot.send_message(msg.chat.id, "Please enter the donor's name as text:")
            .await?;
        return Ok(());
    };

    let chat_id = msg.chat.id;
    payment_presenter(bot, chat_id, &services)
        .search_contacts(search_term)
        .await?;

    Ok(())
}

pub async fn receive_payment_amount(
    bot: Bot,
    msg: Message,
    state: State,
    dialogue: MyDialogue,
    _services: Arc<ServiceContainer>,
) -> Result<()> {
    let State::AwaitingPaymentAmount {
        contact_id,
        donation_id,
        promised_amount,
    } = state
    else {
        return Ok(());
    };

    let Some(amount_text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please enter the amount as text:")
            .await?;
        return Ok(());
    };

    let amount = if amount_text.trim() == "." {
        let Some(promised) = promised_amount else {
            bot.send_message(
                msg.chat.id,
                "This donation has no promised amount. Enter a positive number like 25 or 25.50:",
            )
            .await?;
            return Ok(());
        };
        promised
    } else {
        match utils::parse_amount(amount_text) {
            Ok(amount) => amount,
            Err(e) => {
                bot.send_message(
                    msg.chat.id,
                    format!("⚠️ {}. Enter a positive number like 25 or 25.50:", e),
                )
                .await?;
                return Ok(());
            }
        }
    };

    dialogue
        .update(State::AwaitingPaymentDate {
            contact_id,
            donation_id,
            amount,
        })
        .await?;

    bot.send_message(
        msg.chat.id,
        "Enter the payment date as YYYY-MM-DD, or send `today`:",
    )
    .await?;

    Ok(())
}

pub async fn receive_payment_date(
    bot: Bot,
    msg: Message,
    state: State,
    dialogue: MyDialogue,
    _services: Arc<ServiceContainer>,
) -> Result<()> {
    let State::AwaitingPaymentDate {
        contact_id,
        donation_id,
        amount,
    } = state
    else {
        return Ok(());
    };

    let Some(date_text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please enter the date as text:")
            .await?;
        return Ok(());
    };

    let income_date = match utils::parse_income_date(date_text) {
        Ok(date) => date,
        Err(e) => {
            bot.send_message(
                msg.chat.id,
                format!("⚠️ {}. Use the YYYY-MM-DD form, or send `today`:", e),
            )
            .await?;
            return Ok(());
        }
    };

    dialogue
        .update(State::AwaitingPaymentDescription {
            contact_id,
            donation_id,
            amount,
            income_date,
        })
        .await?;

    bot.send_message(
        msg.chat.id,
        "Enter an optional description, or send `-` to skip:",
    )
    .await?;

    Ok(())
}

pub async fn receive_payment_description(
    bot: Bot,
    msg: Message,
    state: State,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let State::AwaitingPaymentDescription {
        contact_id,
        donation_id,
        amount,
        income_date,
    } = state
    else {
        return Ok(());
    };

    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please enter the description as text, or `-`:")
            .await?;
        return Ok(());
    };

    let description = match text.trim() {
        "-" | "" => None,
        other => Some(other.to_string()),
    };

    // Reset before dispatching so a duplicate send cannot resubmit the write
    dialogue.update(State::Start).await?;

    let chat_id = msg.chat.id;
    payment_presenter(bot, chat_id, &services)
        .create_payment(contact_id, donation_id, amount, income_date, description)
        .await?;

    Ok(())
}

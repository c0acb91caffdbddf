use anyhow::Result;
use log::info;
use std::{str::FromStr, sync::Arc};
use teloxide::prelude::*;
use uuid::Uuid;

use crate::commands::MyDialogue;
use crate::di::ServiceContainer;
use crate::entity::{CrmError, DonorKind, State};
use crate::interactor::balance_interactor::BalanceInteractorImpl;
use crate::interactor::payment_interactor::PaymentInteractorImpl;
use crate::interactor::receipt_interactor::ReceiptInteractorImpl;
use crate::presenter::balance_presenter::{BalancePresenter, BalancePresenterImpl};
use crate::presenter::payment_presenter::{PaymentPresenter, PaymentPresenterImpl};
use crate::presenter::receipt_presenter::{ReceiptPresenter, ReceiptPresenterImpl};
use crate::view::balance_view::TelegramBalanceView;
use crate::view::payment_view::{PaymentView, TelegramPaymentView};
use crate::view::receipt_view::TelegramReceiptView;

// Main callback handler function
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let callback_data = match q.clone().data {
        Some(data) => data,
        None => return Ok(()),
    };

    let chat_id = match q.message {
        Some(ref msg) => msg.chat().id,
        None => return Ok(()),
    };

    let telegram_id = q.from.id.0 as i64;

    info!(
        "Received callback: {} from user {}",
        callback_data, telegram_id
    );

    // Acknowledge the callback query to stop the loading animation
    if let Err(err) = bot.answer_callback_query(q.id.clone()).await {
        info!("Failed to answer callback query: {}", err);
    }

    if callback_data == "refresh_balance" {
        handle_balance_refresh(bot, q, chat_id, services).await?;
    } else if let Some(contact_id) = parse_uuid_suffix(&callback_data, "stmc_") {
        handle_statement_contact(bot, chat_id, contact_id, dialogue).await?;
    } else if let Some(contact_id) = parse_uuid_suffix(&callback_data, "pmtc_") {
        handle_payment_contact(bot, chat_id, contact_id, services).await?;
    } else if let Some((donation_id, contact_id)) = parse_donation_choice(&callback_data) {
        handle_donation_choice(bot, chat_id, contact_id, donation_id, dialogue, services).await?;
    } else if let Some(transaction_id) = parse_i32_suffix(&callback_data, "rcpt_c_") {
        handle_receipt_recipient(bot, chat_id, transaction_id, DonorKind::Contact, services)
            .await?;
    } else if let Some(transaction_id) = parse_i32_suffix(&callback_data, "rcpt_a_") {
        handle_receipt_recipient(bot, chat_id, transaction_id, DonorKind::Account, services)
            .await?;
    }

    Ok(())
}

fn parse_uuid_suffix(data: &str, prefix: &str) -> Option<Uuid> {
    Uuid::from_str(data.strip_prefix(prefix)?).ok()
}

fn parse_i32_suffix(data: &str, prefix: &str) -> Option<i32> {
    data.strip_prefix(prefix)?.parse().ok()
}

// "pmtd_<donation_id>_<contact_uuid>"
fn parse_donation_choice(data: &str) -> Option<(i32, Uuid)> {
    let rest = data.strip_prefix("pmtd_")?;
    let (donation_id, contact_id) = rest.split_once('_')?;
    Some((donation_id.parse().ok()?, Uuid::from_str(contact_id).ok()?))
}

async fn handle_balance_refresh(
    bot: Bot,
    q: CallbackQuery,
    chat_id: ChatId,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let interactor = Arc::new(BalanceInteractorImpl::new(services.db_pool()));
    let view = Arc::new(TelegramBalanceView::new(bot, chat_id));
    let presenter = BalancePresenterImpl::new(interactor, view);

    match q.regular_message() {
        Some(message) => presenter.refresh_balance(message.clone()).await?,
        None => presenter.show_balance().await?,
    }

    Ok(())
}

async fn handle_statement_contact(
    bot: Bot,
    chat_id: ChatId,
    contact_id: Uuid,
    dialogue: MyDialogue,
) -> Result<()> {
    dialogue
        .update(State::AwaitingStatementRange { contact_id })
        .await?;

    bot.send_message(
        chat_id,
        "Send `all` for the full history, or a range as `YYYY-MM-DD YYYY-MM-DD`:",
    )
    .await?;

    Ok(())
}

async fn handle_payment_contact(
    bot: Bot,
    chat_id: ChatId,
    contact_id: Uuid,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let interactor = Arc::new(PaymentInteractorImpl::new(services.db_pool()));
    let view = Arc::new(TelegramPaymentView::new(bot, chat_id));
    let presenter = PaymentPresenterImpl::new(interactor, view);

    presenter.select_contact(contact_id).await?;

    Ok(())
}

async fn handle_donation_choice(
    bot: Bot,
    chat_id: ChatId,
    contact_id: Uuid,
    donation_id: i32,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let interactor = Arc::new(PaymentInteractorImpl::new(services.db_pool()));
    let view = Arc::new(TelegramPaymentView::new(bot.clone(), chat_id));
    let presenter = PaymentPresenterImpl::new(interactor, view.clone());

    // A stale button can point at a deleted donation; stop the flow here
    // rather than walking the user through a form that cannot be submitted.
    let promised_amount = match presenter.donation_prefill(donation_id).await {
        Ok(amount) => amount,
        Err(e) => {
            let text = match e.downcast_ref::<CrmError>() {
                Some(CrmError::RecurringDonationNotFound) => {
                    "This donation is no longer available. Start again with /payment.".to_string()
                }
                _ => e.to_string(),
            };
            view.display_error(text).await?;
            return Ok(());
        }
    };

    dialogue
        .update(State::AwaitingPaymentAmount {
            contact_id,
            donation_id,
            promised_amount,
        })
        .await?;

    let prompt = match promised_amount {
        Some(amount) => format!(
            "Enter the payment amount, or send `.` to use the promised ${:.2}:",
            amount
        ),
        None => "Enter the payment amount:".to_string(),
    };
    bot.send_message(chat_id, prompt).await?;

    Ok(())
}

async fn handle_receipt_recipient(
    bot: Bot,
    chat_id: ChatId,
    transaction_id: i32,
    kind: DonorKind,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let interactor = Arc::new(ReceiptInteractorImpl::new(services.db_pool()));
    let view = Arc::new(TelegramReceiptView::new(bot, chat_id));
    let presenter = ReceiptPresenterImpl::new(interactor, view, services.renderer());

    presenter.generate_receipt(transaction_id, kind).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_donation_choice_callback() {
        let id = Uuid::new_v4();
        let data = format!("pmtd_42_{}", id);
        assert_eq!(parse_donation_choice(&data), Some((42, id)));
        assert_eq!(parse_donation_choice("pmtd_notanumber"), None);
        assert_eq!(parse_donation_choice("stmc_abc"), None);
    }

    #[test]
    fn parses_prefixed_ids() {
        assert_eq!(parse_i32_suffix("rcpt_c_7", "rcpt_c_"), Some(7));
        assert_eq!(parse_i32_suffix("rcpt_c_x", "rcpt_c_"), None);

        let id = Uuid::new_v4();
        assert_eq!(parse_uuid_suffix(&format!("stmc_{}", id), "stmc_"), Some(id));
        assert_eq!(parse_uuid_suffix("stmc_garbage", "stmc_"), None);
    }
}

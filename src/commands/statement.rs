use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{ui, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::interactor::statement_interactor::{StatementInteractor, StatementInteractorImpl};
use crate::presenter::statement_presenter::{StatementPresenter, StatementPresenterImpl};
use crate::utils::{self, DateRangeRequest};
use crate::view::statement_view::TelegramStatementView;

pub struct StatementCommand;

impl CommandHandler for StatementCommand {
    fn command_name() -> &'static str {
        "statement"
    }

    fn description() -> &'static str {
        "generate a contribution statement PDF for a donor"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        _telegram_id: i64,
        dialogue: Option<MyDialogue>,
        _services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let dialogue = dialogue.ok_or_else(|| anyhow::anyhow!("Dialogue context not provided"))?;
        info!("Statement command initiated");

        dialogue.update(State::AwaitingStatementContactSearch).await?;
        bot.send_message(msg.chat.id, "Enter the donor's name to search:")
            .await?;

        Ok(())
    }
}

pub async fn receive_statement_contact_search(
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

    let interactor = StatementInteractorImpl::new(services.db_pool());
    match interactor.search_contacts(search_term).await {
        Ok(contacts) if contacts.is_empty() => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "⚠️ No contacts matched \"{}\". Try another name:",
                    search_term
                ),
            )
            .await?;
        }
        Ok(contacts) => {
            let keyboard = ui::contact_results_keyboard(&contacts, "stmc_");
            bot.send_message(msg.chat.id, "Select a donor:")
                .reply_markup(keyboard)
                .await?;
        }
        Err(e) => {
            bot.send_message(msg.chat.id, format!("❌ Error: {}", e))
                .await?;
        }
    }

    Ok(())
}

pub async fn receive_statement_range(
    bot: Bot,
    msg: Message,
    state: State,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let State::AwaitingStatementRange { contact_id } = state else {
        return Ok(());
    };

    let Some(range_text) = msg.text() else {
        bot.send_message(
            msg.chat.id,
            "Please send `all` or a range as `YYYY-MM-DD YYYY-MM-DD`:",
        )
        .await?;
        return Ok(());
    };

    // Range ordering is checked here, before any query is issued
    let range = match utils::parse_date_range(range_text) {
        Ok(DateRangeRequest::All) => None,
        Ok(DateRangeRequest::Bounded(start, end)) => Some((start, end)),
        Err(e) => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "⚠️ {}. Send `all`, or a start and end date as \
                     `YYYY-MM-DD YYYY-MM-DD` with start not after end:",
                    e
                ),
            )
            .await?;
            return Ok(());
        }
    };

    dialogue.update(State::Start).await?;

    let interactor = Arc::new(StatementInteractorImpl::new(services.db_pool()));
    let view = Arc::new(TelegramStatementView::new(bot, msg.chat.id));
    let presenter = StatementPresenterImpl::new(interactor, view, services.renderer());

    presenter.generate_statement(contact_id, range).await?;

    Ok(())
}

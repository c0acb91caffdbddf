use async_trait::async_trait;
use std::sync::Arc;
use teloxide::{
    dispatching::dialogue::Dialogue, dispatching::dialogue::InMemStorage,
    dispatching::UpdateHandler, prelude::*,
};

use crate::commands::{self, callback::handle_callback, BotCommands, CommandHandler};
use crate::di::ServiceContainer;
use crate::entity::State;

type MyDialogue = Dialogue<State, InMemStorage<State>>;

// Base router trait
#[async_trait]
pub trait Router: Send + Sync {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error>;
}

// Command router implementation
pub struct TelegramRouter {
    services: Arc<ServiceContainer>,
}

impl TelegramRouter {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }
}

macro_rules! command_branch {
    ($services:expr, $variant:ident, $handler:ty) => {{
        let services = $services.clone();
        dptree::case![BotCommands::$variant].endpoint(
            move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                let services = services.clone();
                let telegram_id = msg.from().map_or(0, |user| user.id.0 as i64);
                async move {
                    <$handler>::execute(bot, msg, telegram_id, Some(dialogue), services).await
                }
            },
        )
    }};
}

#[async_trait]
impl Router for TelegramRouter {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error> {
        use dptree::case;
        use teloxide::dispatching::UpdateFilterExt;

        let services = &self.services;

        let command_handler = teloxide::filter_command::<BotCommands, _>()
            .branch(command_branch!(services, Start, commands::start::StartCommand))
            .branch(command_branch!(
                services,
                Statement,
                commands::statement::StatementCommand
            ))
            .branch(command_branch!(
                services,
                Receipt,
                commands::receipt::ReceiptCommand
            ))
            .branch(command_branch!(
                services,
                Balance,
                commands::balance::BalanceCommand
            ))
            .branch(command_branch!(
                services,
                Payment,
                commands::payment::PaymentCommand
            ))
            .branch(command_branch!(
                services,
                Cancel,
                commands::cancel::CancelCommand
            ))
            .branch(command_branch!(services, Help, commands::help::HelpCommand));

        let services_for_dialog1 = self.services.clone();
        let services_for_dialog2 = self.services.clone();
        let services_for_dialog3 = self.services.clone();
        let services_for_dialog4 = self.services.clone();
        let services_for_dialog5 = self.services.clone();
        let services_for_dialog6 = self.services.clone();
        let services_for_dialog7 = self.services.clone();

        let message_handler = Update::filter_message().branch(command_handler).branch(
            dptree::entry()
                .branch(case![State::AwaitingStatementContactSearch].endpoint(
                    move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                        let services = services_for_dialog1.clone();
                        async move {
                            commands::statement::receive_statement_contact_search(
                                bot, msg, dialogue, services,
                            )
                            .await
                        }
                    },
                ))
                .branch(case![State::AwaitingStatementRange { contact_id }].endpoint(
                    move |bot: Bot, msg: Message, state: State, dialogue: MyDialogue| {
                        let services = services_for_dialog2.clone();
                        async move {
                            commands::statement::receive_statement_range(
                                bot, msg, state, dialogue, services,
                            )
                            .await
                        }
                    },
                ))
                .branch(case![State::AwaitingReceiptReference].endpoint(
                    move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                        let services = services_for_dialog3.clone();
                        async move {
                            commands::receipt::receive_receipt_reference(
                                bot, msg, dialogue, services,
                            )
                            .await
                        }
                    },
                ))
                .branch(case![State::AwaitingPaymentContactSearch].endpoint(
                    move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                        let services = services_for_dialog4.clone();
                        async move {
                            commands::payment::receive_payment_contact_search(
                                bot, msg, dialogue, services,
                            )
                            .await
                        }
                    },
                ))
                .branch(
                    case![State::AwaitingPaymentAmount {
                        contact_id,
                        donation_id,
                        promised_amount
                    }]
                    .endpoint(
                        move |bot: Bot, msg: Message, state: State, dialogue: MyDialogue| {
                            let services = services_for_dialog5.clone();
                            async move {
                                commands::payment::receive_payment_amount(
                                    bot, msg, state, dialogue, services,
                                )
                                .await
                            }
                        },
                    ),
                )
                .branch(
                    case![State::AwaitingPaymentDate {
                        contact_id,
                        donation_id,
                        amount
                    }]
                    .endpoint(
                        move |bot: Bot, msg: Message, state: State, dialogue: MyDialogue| {
                            let services = services_for_dialog6.clone();
                            async move {
                                commands::payment::receive_payment_date(
                                    bot, msg, state, dialogue, services,
                                )
                                .await
                            }
                        },
                    ),
                )
                .branch(
                    case![State::AwaitingPaymentDescription {
                        contact_id,
                        donation_id,
                        amount,
                        income_date
                    }]
                    .endpoint(
                        move |bot: Bot, msg: Message, state: State, dialogue: MyDialogue| {
                            let services = services_for_dialog7.clone();
                            async move {
                                commands::payment::receive_payment_description(
                                    bot, msg, state, dialogue, services,
                                )
                                .await
                            }
                        },
                    ),
                ),
        );

        let services_for_callbacks = self.services.clone();
        let callback_handler = Update::filter_callback_query().endpoint(
            move |bot: Bot, q: CallbackQuery, dialogue: MyDialogue| {
                let services = services_for_callbacks.clone();
                async move { handle_callback(bot, q, dialogue, services).await }
            },
        );

        teloxide::dispatching::dialogue::enter::<Update, InMemStorage<State>, State, _>()
            .branch(message_handler)
            .branch(callback_handler)
    }
}

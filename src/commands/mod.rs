use anyhow::Result;
use std::sync::Arc;
use teloxide::{dispatching::dialogue::InMemStorage, prelude::*};

use crate::di::ServiceContainer;
use crate::entity::State;
use teloxide::dispatching::dialogue::Dialogue;

pub mod balance;
pub mod callback;
pub mod cancel;
pub mod help;
pub mod payment;
pub mod receipt;
pub mod start;
pub mod statement;
pub mod ui;

pub type MyDialogue = Dialogue<State, InMemStorage<State>>;

/// Trait that defines a command handler
pub trait CommandHandler {
    /// The command name in lowercase
    fn command_name() -> &'static str;

    /// The command description for help
    fn description() -> &'static str;

    /// Execute the command
    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()>;
}

/// Register all command handlers in the command system
pub fn register_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            start::StartCommand::command_name(),
            start::StartCommand::description(),
        ),
        (
            statement::StatementCommand::command_name(),
            statement::StatementCommand::description(),
        ),
        (
            receipt::ReceiptCommand::command_name(),
            receipt::ReceiptCommand::description(),
        ),
        (
            balance::BalanceCommand::command_name(),
            balance::BalanceCommand::description(),
        ),
        (
            payment::PaymentCommand::command_name(),
            payment::PaymentCommand::description(),
        ),
        (
            cancel::CancelCommand::command_name(),
            cancel::CancelCommand::description(),
        ),
        (
            help::HelpCommand::command_name(),
            help::HelpCommand::description(),
        ),
    ]
}

/// Bot Commands enum for teloxide command filter
#[derive(teloxide::utils::command::BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum BotCommands {
    #[command(description = "start the bot and show what it can do")]
    Start,
    #[command(description = "generate a contribution statement PDF for a donor")]
    Statement,
    #[command(description = "generate a donation receipt PDF for one transaction")]
    Receipt,
    #[command(description = "show the organization's net balance")]
    Balance,
    #[command(description = "record a recurring-donation payment")]
    Payment,
    #[command(description = "cancel the current flow")]
    Cancel,
    #[command(description = "display this help message")]
    Help,
}

//! Introduction and help command handlers

use teloxide::{Bot, types::Message, prelude::*};
use tracing::{debug, warn};

use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

const HELP_COMMANDS: &[(&str, &str)] = &[
    ("start", "Запуск бота"),
    ("hello_world", "Знакомство с ботом"),
    ("help", "Вывести справку"),
    ("routes_between", "Информация о рейсах между двумя пунктами"),
    ("route_stations", "Информация о станциях следования для маршрута"),
    ("history", "История запросов"),
];

const STATIONS_REFERENCE_URL: &str = "https://disk.yandex.ru/d/Cbw6LTCoitLpFQ";

/// Handle /start. Intentionally does nothing beyond the command registration.
pub async fn handle_start(_bot: Bot, msg: Message) -> Result<()> {
    debug!(chat_id = ?msg.chat.id, "/start received");
    Ok(())
}

/// Handle /hello_world: register the user and introduce the bot
pub async fn handle_hello_world(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    if let Err(error) = services.user_service.register(user_id).await {
        warn!(error = %error, user_id, "Failed to register user");
    }
    log_user_action(user_id, "hello_world", None);

    let text = format!(
        "Привет, {}👋!\nЯ бот TransitBuddy, который поможет получить информацию о маршрутах \
         и конкретных рейсах (работаю на основе API Яндекс Расписаний). Надеюсь, эта информация \
         будет полезна и позволит спланировать отпуск, командировку, поездку и т.п.\n\
         Хорошего поиска!🔍",
        user.first_name
    );
    bot.send_message(msg.chat.id, text).await?;

    Ok(())
}

/// Handle /help: list commands and point at the station directory
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    let mut text = String::from("Доступные команды:\n");
    text.push_str(
        &HELP_COMMANDS
            .iter()
            .map(|(command, description)| format!("/{} - {}", command, description))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    text.push_str(&format!(
        "\n\nНазвания пунктов вводятся на русском языке. Справочник станций: {}",
        STATIONS_REFERENCE_URL
    ));

    bot.send_message(msg.chat.id, text).await?;

    Ok(())
}

//! Search history command handler

use teloxide::{Bot, types::Message, prelude::*};

use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Handle /history: show the user's latest searches, newest first
pub async fn handle_history(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    if !services.user_service.is_registered(user_id).await? {
        bot.send_message(
            chat_id,
            "Вы не зарегистрированы. Познакомьтесь с ботом, чтобы зарегистрироваться \
             (команда /hello_world)",
        )
        .await?;
        return Ok(());
    }

    let records = services.history_service.recent(user_id).await?;
    if records.is_empty() {
        bot.send_message(chat_id, "В базе данных нет записей о Ваших запросах")
            .await?;
        return Ok(());
    }

    let text = format!(
        "📋История поиска (последние 10 запросов, от свежих к менее свежим):\n\n{}",
        records
            .iter()
            .map(|record| record.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    );
    bot.send_message(chat_id, text).await?;

    Ok(())
}

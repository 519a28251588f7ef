//! Callback query handlers module
//!
//! This module contains handlers for all inline keyboard button callbacks:
//! transport selection and result-page navigation.

use std::sync::Arc;

use teloxide::{Bot, types::{CallbackQuery, ChatId, MaybeInaccessibleMessage}, prelude::*};
use tracing::{debug, error, warn};

use crate::engine::Event;
use crate::handlers::{keyboards, send_reply, SERVICE_UNAVAILABLE};
use crate::models::{ConversationType, TransportMode};
use crate::state::ConversationStep;
use crate::utils::errors::Result;
use crate::AppEngine;

/// Main callback query dispatcher
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    engine: Arc<AppEngine>,
) -> Result<()> {
    let user_id = query.from.id.0 as i64;

    let Some(data) = query.data.clone() else {
        return Ok(());
    };

    // Answer first so the button stops spinning even if handling fails.
    if let Err(error) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %error, "Failed to answer callback query");
    }

    let chat_id = query
        .message
        .as_ref()
        .map(|message| message.chat().id)
        .unwrap_or(ChatId(user_id));

    debug!(user_id, chat_id = ?chat_id, data = %data, "Processing callback query");

    let mut parts = data.splitn(2, ':');
    let action = parts.next().unwrap_or_default();
    let argument = parts.next().unwrap_or_default();

    match action {
        "transport" => {
            let Some(mode) = TransportMode::from_code(argument) else {
                warn!(data = %data, "Unknown transport code in callback");
                return Ok(());
            };
            handle_transport_choice(bot, query, engine, chat_id, user_id, mode).await
        }
        "page" => {
            let Ok(page) = argument.parse::<usize>() else {
                warn!(data = %data, "Malformed page callback");
                return Ok(());
            };
            handle_page_request(bot, query, engine, chat_id, user_id, page).await
        }
        // The page label button carries no action.
        "noop" => Ok(()),
        _ => {
            warn!(data = %data, "Unknown callback action");
            Ok(())
        }
    }
}

/// Transport selection: acknowledge the choice, show the search summary,
/// then hand the event to the engine.
async fn handle_transport_choice(
    bot: Bot,
    query: CallbackQuery,
    engine: Arc<AppEngine>,
    chat_id: ChatId,
    user_id: i64,
    mode: TransportMode,
) -> Result<()> {
    if let Some(snapshot) = engine.peek_session(user_id, chat_id.0).await {
        if snapshot.step == Some(ConversationStep::AwaitingTransport) {
            if let Some(MaybeInaccessibleMessage::Regular(message)) = query.message {
                bot.edit_message_text(
                    chat_id,
                    message.id,
                    format!("Вы выбрали тип транспорта: {}", mode.name_ru()),
                )
                .await?;
            }

            let from = snapshot.departure_station.unwrap_or_default();
            let to = snapshot.arrival_station.unwrap_or_default();
            let summary = match (snapshot.conversation_type, snapshot.date) {
                (Some(ConversationType::RoutesBetween), Some(date)) => format!(
                    "Ищу рейсы по запросу \"{} {}-{} на {}\"...",
                    mode.name_ru(),
                    from,
                    to,
                    date.format("%Y-%m-%d")
                ),
                _ => format!(
                    "Ищу маршруты по запросу \"{} {}-{}\"...",
                    mode.name_ru(),
                    from,
                    to
                ),
            };
            bot.send_message(chat_id, summary).await?;
        }
    }

    match engine
        .handle_event(user_id, chat_id.0, Event::TransportChoice(mode))
        .await
    {
        Ok(Some(reply)) => send_reply(&bot, chat_id, reply).await,
        Ok(None) => {
            debug!(user_id, "Stale transport choice ignored");
            Ok(())
        }
        Err(error) => {
            error!(error = %error, user_id, "Transport choice failed");
            bot.send_message(chat_id, SERVICE_UNAVAILABLE).await?;
            Ok(())
        }
    }
}

/// Page navigation: re-render the result message in place
async fn handle_page_request(
    bot: Bot,
    query: CallbackQuery,
    engine: Arc<AppEngine>,
    chat_id: ChatId,
    user_id: i64,
    page: usize,
) -> Result<()> {
    match engine
        .handle_event(user_id, chat_id.0, Event::PageRequest(page))
        .await
    {
        Ok(Some(reply)) => {
            let Some(MaybeInaccessibleMessage::Regular(message)) = query.message else {
                return send_reply(&bot, chat_id, reply).await;
            };

            let edit = bot.edit_message_text(chat_id, message.id, reply.text);
            match reply.controls {
                Some(controls) => {
                    edit.reply_markup(keyboards::markup_for(controls)).await?;
                }
                None => {
                    edit.await?;
                }
            }
            Ok(())
        }
        Ok(None) => {
            debug!(user_id, "Stale page request ignored");
            Ok(())
        }
        Err(error) => {
            error!(error = %error, user_id, "Page request failed");
            bot.send_message(chat_id, SERVICE_UNAVAILABLE).await?;
            Ok(())
        }
    }
}

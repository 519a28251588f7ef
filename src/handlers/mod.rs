//! Handlers module
//!
//! This module contains all Telegram update handlers: commands, free-text
//! messages, and inline keyboard callbacks. Handlers adapt Telegram updates
//! to engine events and engine replies back to Telegram messages.

pub mod callbacks;
pub mod commands;
pub mod keyboards;
pub mod messages;

use teloxide::{Bot, prelude::*, types::ChatId};

use crate::engine::Reply;
use crate::utils::errors::Result;

/// Shown when a collaborator error surfaces into a conversation
pub const SERVICE_UNAVAILABLE: &str =
    "Сервис временно недоступен. Попробуйте повторить запрос позже";

/// Deliver an engine reply, attaching its controls when present
pub(crate) async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> Result<()> {
    match reply.controls {
        Some(controls) => {
            bot.send_message(chat_id, reply.text)
                .reply_markup(keyboards::markup_for(controls))
                .await?;
        }
        None => {
            bot.send_message(chat_id, reply.text).await?;
        }
    }

    Ok(())
}

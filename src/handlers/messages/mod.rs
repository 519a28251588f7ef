//! Message handlers module
//!
//! Free-text messages only matter while a guided conversation is in flight;
//! everything else is ignored, matching the command-driven interaction model.

use std::sync::Arc;

use teloxide::{Bot, types::Message, prelude::*};
use tracing::{debug, error};

use crate::engine::Event;
use crate::handlers::{send_reply, SERVICE_UNAVAILABLE};
use crate::utils::errors::Result;
use crate::AppEngine;

/// Handle incoming text messages
pub async fn handle_message(bot: Bot, msg: Message, engine: Arc<AppEngine>) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    debug!(user_id, chat_id = ?chat_id, "Processing message");

    match engine
        .handle_event(user_id, chat_id.0, Event::Text(text.to_string()))
        .await
    {
        Ok(Some(reply)) => send_reply(&bot, chat_id, reply).await,
        Ok(None) => {
            debug!(user_id, chat_id = ?chat_id, "Message outside any conversation ignored");
            Ok(())
        }
        Err(error) => {
            error!(error = %error, user_id, "Conversation event failed");
            bot.send_message(chat_id, SERVICE_UNAVAILABLE).await?;
            Ok(())
        }
    }
}

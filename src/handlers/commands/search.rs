//! Guided search command handlers
//!
//! /routes_between and /route_stations both funnel into the conversation
//! engine; the engine owns everything from here until a terminal outcome.

use std::sync::Arc;

use teloxide::{Bot, types::Message, prelude::*};
use tracing::warn;

use crate::handlers::send_reply;
use crate::models::ConversationType;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;
use crate::AppEngine;

/// Handle /routes_between: start the point-to-point schedule flow
pub async fn handle_routes_between(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    engine: Arc<AppEngine>,
) -> Result<()> {
    start_flow(bot, msg, services, engine, ConversationType::RoutesBetween).await
}

/// Handle /route_stations: start the route itinerary flow
pub async fn handle_route_stations(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    engine: Arc<AppEngine>,
) -> Result<()> {
    start_flow(bot, msg, services, engine, ConversationType::RouteStations).await
}

async fn start_flow(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    engine: Arc<AppEngine>,
    kind: ConversationType,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    // Registration enables history; a failure must not block the search.
    if let Err(error) = services.user_service.register(user_id).await {
        warn!(error = %error, user_id, "Failed to register user");
    }
    log_user_action(user_id, kind.code(), None);

    let reply = engine.start_conversation(user_id, chat_id.0, kind).await;
    send_reply(&bot, chat_id, reply).await
}

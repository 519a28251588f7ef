//! TransitBuddy Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;

use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands as TeloxideBotCommands;
use tracing::{error, info, warn};

use TransitBuddy::{
    config::Settings,
    database::{connection::create_pool, run_migrations, DatabaseService},
    engine::ConversationEngine,
    handlers::{
        callbacks::handle_callback_query,
        commands::{help, history, search},
        messages::handle_message,
    },
    services::ServiceFactory,
    utils::logging,
    AppEngine,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the dispatcher
    let _logging_guard = logging::init_logging(&settings.logging)?;

    info!("Starting TransitBuddy Telegram Bot...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = TransitBuddy::database::DatabaseConfig::from_settings(&settings.database);
    let db_pool = create_pool(&db_config).await?;

    // Run database migrations
    run_migrations(&db_pool).await?;

    // Initialize database service and business services
    let database_service = DatabaseService::new(db_pool);
    let services = ServiceFactory::new(&settings, &database_service)?;

    // Refresh the station directory; keep the previous table on failure
    match services.directory_service.load_stations().await {
        Ok(count) => info!(count, "Station directory ready"),
        Err(e) => {
            let existing = services.directory_service.count().await.unwrap_or(0);
            if existing > 0 {
                warn!(error = %e, existing, "Directory reload failed, using previous snapshot");
            } else {
                error!(error = %e, "Directory reload failed and no previous snapshot exists");
                return Err(e.into());
            }
        }
    }

    // Wire the conversation engine to its collaborators
    let engine: Arc<AppEngine> = Arc::new(ConversationEngine::new(
        services.directory_service.clone(),
        services.schedule_service.clone(),
        services.schedule_service.clone(),
        services.history_service.clone(),
        &settings.search,
    ));

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);

    info!("Registering bot commands...");
    bot.set_my_commands(BotCommands::bot_commands()).await?;

    let services_arc = Arc::new(services);

    // Create dispatcher with dependencies registered
    let handler = create_handler();
    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![services_arc, engine])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("TransitBuddy bot is ready, starting polling...");
    dispatcher.dispatch().await;

    info!("TransitBuddy bot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    // Handle commands
                    dptree::entry()
                        .filter_command::<BotCommands>()
                        .endpoint(handle_commands),
                )
                .branch(
                    // Handle regular messages
                    dptree::endpoint(handle_messages),
                ),
        )
        .branch(
            // Handle callback queries
            Update::filter_callback_query().endpoint(handle_callbacks),
        )
}

#[derive(TeloxideBotCommands, Clone)]
#[command(rename_rule = "snake_case", description = "TransitBuddy Bot Commands")]
enum BotCommands {
    #[command(description = "Запуск бота")]
    Start,
    #[command(description = "Знакомство с ботом")]
    HelloWorld,
    #[command(description = "Вывести справку")]
    Help,
    #[command(description = "Информация о рейсах между двумя пунктами")]
    RoutesBetween,
    #[command(description = "Информация о станциях следования для маршрута")]
    RouteStations,
    #[command(description = "История запросов")]
    History,
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: BotCommands,
    services: Arc<ServiceFactory>,
    engine: Arc<AppEngine>,
) -> HandlerResult {
    let services = (*services).clone();

    let result = match cmd {
        BotCommands::Start => help::handle_start(bot, msg).await,
        BotCommands::HelloWorld => help::handle_hello_world(bot, msg, services).await,
        BotCommands::Help => help::handle_help(bot, msg).await,
        BotCommands::RoutesBetween => {
            search::handle_routes_between(bot, msg, services, engine).await
        }
        BotCommands::RouteStations => {
            search::handle_route_stations(bot, msg, services, engine).await
        }
        BotCommands::History => history::handle_history(bot, msg, services).await,
    };

    if let Err(e) = result {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(bot: Bot, msg: Message, engine: Arc<AppEngine>) -> HandlerResult {
    if let Err(e) = handle_message(bot, msg, engine).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(
    bot: Bot,
    query: teloxide::types::CallbackQuery,
    engine: Arc<AppEngine>,
) -> HandlerResult {
    if let Err(e) = handle_callback_query(bot, query, engine).await {
        error!(error = %e, "Error handling callback query");
        return Err(e.into());
    }

    Ok(())
}

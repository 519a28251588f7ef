//! Conversation engine
//!
//! The state machine driving the guided query flows: validates input at each
//! step, advances the session, invokes the schedule collaborators, and decides
//! between inline and paginated result delivery.

pub mod texts;
pub mod validation;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::models::{
    ConversationType, CreateSearchRequest, Itinerary, ResultList, TransportMode,
};
use crate::render::{
    paginate, render_itinerary, render_segment_page, render_segments, render_thread_page,
    render_threads,
};
use crate::state::{ConversationStep, SessionKey, SessionState, SessionStore};
use crate::utils::errors::Result;

/// Station directory validation seam
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// Exact, case-sensitive title match, optionally restricted to a mode
    async fn exists(&self, title: &str, mode: Option<TransportMode>) -> Result<bool>;
}

/// Schedule search seam.
///
/// An `Err` covers both "no station code for this title+mode" and transport
/// failures uniformly.
#[async_trait]
pub trait ScheduleSearch: Send + Sync {
    async fn query(
        &self,
        kind: ConversationType,
        from_title: &str,
        to_title: &str,
        mode: TransportMode,
        date: Option<NaiveDate>,
    ) -> Result<ResultList>;
}

/// Route itinerary seam
#[async_trait]
pub trait ItineraryLookup: Send + Sync {
    async fn fetch_itinerary(&self, uid: &str) -> Result<Itinerary>;
}

/// Completed-search history seam; written, never read back by the engine
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn record(&self, request: CreateSearchRequest) -> Result<()>;
}

/// One inbound user event
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Text(String),
    TransportChoice(TransportMode),
    PageRequest(usize),
}

/// Interactive controls attached to a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controls {
    /// The fixed four-mode transport picker
    TransportPicker,
    /// Previous/next navigation around `page` of `total_pages`
    Pager { page: usize, total_pages: usize },
}

/// Rendering instruction handed back to the transport layer
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub controls: Option<Controls>,
}

impl Reply {
    fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), controls: None }
    }

    fn with_controls(text: impl Into<String>, controls: Controls) -> Self {
        Self { text: text.into(), controls: Some(controls) }
    }
}

/// The conversation state machine, generic over its collaborators
pub struct ConversationEngine<D, S, I, H> {
    directory: D,
    schedule: S,
    itineraries: I,
    history: H,
    sessions: SessionStore,
    page_size: usize,
    horizon_year: i32,
}

impl<D, S, I, H> ConversationEngine<D, S, I, H>
where
    D: DirectoryLookup,
    S: ScheduleSearch,
    I: ItineraryLookup,
    H: HistoryStore,
{
    pub fn new(directory: D, schedule: S, itineraries: I, history: H, config: &SearchConfig) -> Self {
        Self {
            directory,
            schedule,
            itineraries,
            history,
            sessions: SessionStore::new(),
            page_size: config.page_size,
            horizon_year: config.horizon_year,
        }
    }

    /// Begin a guided flow, overwriting any in-flight conversation for the key
    pub async fn start_conversation(
        &self,
        user_id: i64,
        chat_id: i64,
        kind: ConversationType,
    ) -> Reply {
        let key = SessionKey::new(user_id, chat_id);
        let mut state = self.sessions.lock(key).await;
        state.start(kind);

        info!(user_id, chat_id, kind = kind.code(), "Conversation started");

        match kind {
            ConversationType::RoutesBetween => Reply::plain(texts::INTRO_ROUTES_BETWEEN),
            ConversationType::RouteStations => Reply::plain(texts::INTRO_ROUTE_STATIONS),
        }
    }

    /// Process one inbound event for a session.
    ///
    /// Returns `Ok(None)` when the current step does not consume the event
    /// (no active conversation, stale page button, free text where a choice is
    /// expected); the caller should then ignore it. The session entry's lock
    /// is held for the whole call, so events for one session never interleave.
    pub async fn handle_event(
        &self,
        user_id: i64,
        chat_id: i64,
        event: Event,
    ) -> Result<Option<Reply>> {
        let key = SessionKey::new(user_id, chat_id);
        let mut state = self.sessions.lock(key).await;

        let Some(step) = state.step else {
            debug!(user_id, chat_id, "Event without an active conversation ignored");
            return Ok(None);
        };

        let reply = match (step, event) {
            (ConversationStep::AwaitingDeparture, Event::Text(text)) => {
                Some(self.on_departure(&mut state, text).await?)
            }
            (ConversationStep::AwaitingArrival, Event::Text(text)) => {
                Some(self.on_arrival(&mut state, text).await?)
            }
            (ConversationStep::AwaitingDate, Event::Text(text)) => {
                Some(self.on_date(&mut state, text))
            }
            (ConversationStep::AwaitingTransport, Event::TransportChoice(mode)) => {
                Some(self.on_transport_choice(key, &mut state, mode).await?)
            }
            (ConversationStep::ViewingResults, Event::PageRequest(page)) => {
                self.on_page_request(&state, page)
            }
            (ConversationStep::ViewingResults, Event::Text(text)) => {
                self.on_thread_selection(key, &mut state, text).await?
            }
            (step, event) => {
                debug!(user_id, chat_id, ?step, ?event, "Event not consumed at this step");
                None
            }
        };

        Ok(reply)
    }

    /// Snapshot of the session, for progress texts in the transport layer
    pub async fn peek_session(&self, user_id: i64, chat_id: i64) -> Option<SessionState> {
        self.sessions.peek(SessionKey::new(user_id, chat_id)).await
    }

    /// Whether a conversation is in flight for this key
    pub async fn has_session(&self, user_id: i64, chat_id: i64) -> bool {
        self.sessions.has_active(SessionKey::new(user_id, chat_id)).await
    }

    async fn on_departure(&self, state: &mut SessionState, text: String) -> Result<Reply> {
        if !self.directory.exists(&text, None).await? {
            return Ok(Reply::plain(texts::UNKNOWN_STATION));
        }

        state.departure_station = Some(text);
        state.advance(ConversationStep::AwaitingArrival);
        Ok(Reply::plain(texts::PROMPT_ARRIVAL))
    }

    async fn on_arrival(&self, state: &mut SessionState, text: String) -> Result<Reply> {
        if !self.directory.exists(&text, None).await? {
            return Ok(Reply::plain(texts::UNKNOWN_STATION));
        }

        state.arrival_station = Some(text);

        if state.conversation_type == Some(ConversationType::RoutesBetween) {
            state.advance(ConversationStep::AwaitingDate);
            Ok(Reply::plain(texts::date_prompt(self.horizon_year)))
        } else {
            state.advance(ConversationStep::AwaitingTransport);
            Ok(Reply::with_controls(texts::PROMPT_TRANSPORT, Controls::TransportPicker))
        }
    }

    fn on_date(&self, state: &mut SessionState, text: String) -> Reply {
        let today = chrono::Local::now().date_naive();
        let horizon = validation::horizon_end(self.horizon_year);

        match validation::validate_date(&text, today, horizon) {
            Ok(date) => {
                state.date = Some(date);
                state.advance(ConversationStep::AwaitingTransport);
                Reply::with_controls(texts::PROMPT_TRANSPORT_AFTER_DATE, Controls::TransportPicker)
            }
            Err(error) => {
                debug!(error = %error, "Rejected travel date");
                Reply::plain(texts::INVALID_DATE)
            }
        }
    }

    async fn on_transport_choice(
        &self,
        key: SessionKey,
        state: &mut SessionState,
        mode: TransportMode,
    ) -> Result<Reply> {
        state.transport_mode = Some(mode);

        let (Some(from), Some(to), Some(kind)) = (
            state.departure_station.clone(),
            state.arrival_station.clone(),
            state.conversation_type,
        ) else {
            warn!(user_id = key.user_id, chat_id = key.chat_id, "Session lost its answers");
            state.reset();
            self.sessions.clear(key).await;
            return Ok(Reply::plain(texts::SESSION_BROKEN));
        };

        let date = match kind {
            ConversationType::RoutesBetween => state.date,
            ConversationType::RouteStations => None,
        };

        // Fire-and-forget: a failed history write never interrupts the search.
        let request = CreateSearchRequest {
            user_id: key.user_id,
            search_type: kind,
            departure_station: from.clone(),
            arrival_station: to.clone(),
            date,
            transport: mode,
        };
        if let Err(error) = self.history.record(request).await {
            warn!(error = %error, user_id = key.user_id, "Failed to record search history");
        }

        match self.schedule.query(kind, &from, &to, mode, date).await {
            Ok(results) => Ok(self.deliver_results(key, state, results).await),
            Err(error) => {
                info!(error = %error, user_id = key.user_id, "Schedule search failed");
                state.reset();
                self.sessions.clear(key).await;
                Ok(Reply::plain(texts::SEARCH_FAILED))
            }
        }
    }

    /// Choose between inline delivery (terminal) and the paginated viewing step
    async fn deliver_results(
        &self,
        key: SessionKey,
        state: &mut SessionState,
        results: ResultList,
    ) -> Reply {
        match results {
            ResultList::Segments(segments) => {
                if segments.len() <= self.page_size {
                    let reply = Reply::plain(render_segments(&segments));
                    state.reset();
                    self.sessions.clear(key).await;
                    return reply;
                }

                let window = paginate(&segments, 1, self.page_size);
                let text = render_segment_page(&window);
                let total_pages = window.total_pages;

                state.cached_results = Some(ResultList::Segments(segments));
                state.advance(ConversationStep::ViewingResults);
                Reply::with_controls(text, Controls::Pager { page: 1, total_pages })
            }
            ResultList::Threads(threads) => {
                if threads.is_empty() {
                    let reply = Reply::plain(render_threads(&threads));
                    state.reset();
                    self.sessions.clear(key).await;
                    return reply;
                }

                // Ordinal selection needs the thread list whatever its size,
                // so the viewing step is entered even without pagination.
                if threads.len() <= self.page_size {
                    let text = render_threads(&threads);
                    state.cached_results = Some(ResultList::Threads(threads));
                    state.advance(ConversationStep::ViewingResults);
                    return Reply::plain(text);
                }

                let window = paginate(&threads, 1, self.page_size);
                let text = render_thread_page(&window);
                let total_pages = window.total_pages;

                state.cached_results = Some(ResultList::Threads(threads));
                state.advance(ConversationStep::ViewingResults);
                Reply::with_controls(text, Controls::Pager { page: 1, total_pages })
            }
        }
    }

    fn on_page_request(&self, state: &SessionState, page: usize) -> Option<Reply> {
        let results = state.cached_results.as_ref()?;

        let (text, window_page, total_pages) = match results {
            ResultList::Segments(segments) => {
                let window = paginate(segments, page, self.page_size);
                (render_segment_page(&window), window.number, window.total_pages)
            }
            ResultList::Threads(threads) => {
                let window = paginate(threads, page, self.page_size);
                (render_thread_page(&window), window.number, window.total_pages)
            }
        };

        Some(Reply::with_controls(
            text,
            Controls::Pager { page: window_page, total_pages },
        ))
    }

    async fn on_thread_selection(
        &self,
        key: SessionKey,
        state: &mut SessionState,
        text: String,
    ) -> Result<Option<Reply>> {
        let Some(ResultList::Threads(threads)) = state.cached_results.as_ref() else {
            // Free text while viewing segments carries no meaning.
            return Ok(None);
        };

        let Some(ordinal) = validation::parse_route_ordinal(&text, threads.len()) else {
            return Ok(Some(Reply::plain(texts::INPUT_ERROR)));
        };

        let uid = threads[ordinal - 1].uid.clone();
        debug!(user_id = key.user_id, ordinal, uid = %uid, "Route thread selected");

        let reply = match self.itineraries.fetch_itinerary(&uid).await {
            Ok(itinerary) => Reply::plain(render_itinerary(&itinerary)),
            Err(error) => {
                info!(error = %error, uid = %uid, "Itinerary lookup failed");
                Reply::plain(texts::ITINERARY_FAILED)
            }
        };

        state.reset();
        self.sessions.clear(key).await;
        Ok(Some(reply))
    }
}

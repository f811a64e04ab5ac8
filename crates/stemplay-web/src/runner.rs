use serde::Serialize;
use thiserror::Error;

use stemplay_engine::{
    AccountError, Accounts, ActionQueue, Assistant, Catalog, CatalogError, FixedTimestep, GameSession,
    GameSessionResult, Language, ModeRegistry, PlayerAction, Role, Roster, SessionError, SessionEvent,
    SessionSnapshot, SessionStatus, SessionStore, StoreError, User,
};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unknown {kind} `{value}`")]
    UnknownName { kind: &'static str, value: String },
}

/// Drives one arcade: a catalog, at most one open session and the signed-in user.
///
/// The demo crate keeps a `thread_local!` ArcadeRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct ArcadeRunner<S: SessionStore> {
    catalog: Catalog,
    registry: ModeRegistry,
    session: Option<GameSession>,
    input: ActionQueue,
    timestep: FixedTimestep,
    accounts: Accounts<S>,
    assistant: Assistant,
    roster: Roster,
    /// Events from the last tick, laid out for flat `f32` reads.
    event_buffer: Vec<SessionEvent>,
    /// Whether the open session's result has been recorded, or skipped for lack of a user.
    settled: bool,
    last_error: Option<String>,
}

impl<S: SessionStore> ArcadeRunner<S> {
    pub fn new(catalog: Catalog, store: S, seed: u64) -> Self {
        Self {
            catalog,
            registry: ModeRegistry::default(),
            session: None,
            input: ActionQueue::new(),
            timestep: FixedTimestep::new(1.0),
            accounts: Accounts::new(store, seed),
            assistant: Assistant::new(),
            roster: Roster::demo(),
            event_buffer: Vec::new(),
            settled: false,
            last_error: None,
        }
    }

    /// Start a fresh session for `game_id`, replacing any open one.
    pub fn open(&mut self, game_id: &str) -> Result<(), RunnerError> {
        let def = self.catalog.lookup(game_id)?;
        let session = self.registry.start(def)?;
        if let Some(old) = self.session.as_mut() {
            old.abandon();
        }
        self.timestep = FixedTimestep::new(session.config().unit_seconds);
        self.session = Some(session);
        self.input.clear();
        self.event_buffer.clear();
        self.settled = false;
        Ok(())
    }

    /// Queue an action for the next tick.
    pub fn push_action(&mut self, action: PlayerAction) {
        self.input.push(action);
    }

    /// Run one frame: apply queued actions, then advance the countdown by
    /// however many whole units `frame_dt` completes.
    pub fn tick(&mut self, frame_dt: f32) {
        self.event_buffer.clear();
        let Some(session) = self.session.as_mut() else {
            self.input.clear();
            return;
        };
        session.clear_frame_data();

        for action in self.input.drain() {
            if let Err(err) = session.apply(&action) {
                self.last_error = Some(err.to_string());
            }
        }

        let units = self.timestep.accumulate(frame_dt);
        for _ in 0..units {
            if !session.tick() {
                break;
            }
        }

        self.event_buffer.extend_from_slice(session.events());

        if !self.settled && session.status() == SessionStatus::Finished {
            match self.accounts.record(session) {
                Ok(_) => self.settled = true,
                Err(StoreError::NoUser) => {
                    self.settled = true;
                    log::debug!("{}: nobody signed in, result not recorded", session.game_id());
                }
                // Left unsettled so the next tick retries.
                Err(err) => {
                    log::warn!("{}: failed to record result: {}", session.game_id(), err);
                    self.last_error = Some(err.to_string());
                }
            }
        }
    }

    /// Abandon the open session, if any.
    pub fn abandon(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.abandon();
        }
        self.input.clear();
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(GameSession::snapshot)
    }

    pub fn result(&self) -> Option<GameSessionResult> {
        self.session.as_ref().and_then(GameSession::result)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ---- Accounts ----

    pub fn user(&self) -> Option<&User> {
        self.accounts.current()
    }

    pub fn login(&mut self, email: &str, password: &str, role: &str) -> Result<(), RunnerError> {
        let role = parse_role(role)?;
        self.accounts.login(email, password, role)?;
        Ok(())
    }

    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
        grade: Option<u8>,
    ) -> Result<(), RunnerError> {
        let role = parse_role(role)?;
        self.accounts.register(name, email, password, role, grade)?;
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), RunnerError> {
        self.accounts.logout()?;
        Ok(())
    }

    pub fn set_language(&mut self, language: &str) -> Result<(), RunnerError> {
        let language = Language::parse(language).ok_or_else(|| RunnerError::UnknownName {
            kind: "language",
            value: language.to_string(),
        })?;
        self.accounts.update_language(language)?;
        Ok(())
    }

    // ---- Classroom ----

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    /// Post a chat message; returns the bot reply text.
    pub fn ask(&mut self, text: &str) -> Option<String> {
        self.assistant.send(text).map(|m| m.text.clone())
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    // ---- Errors ----

    /// Message of the most recent failure, cleared on read.
    pub fn take_last_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    pub fn set_last_error(&mut self, err: &RunnerError) {
        log::warn!("{}", err);
        self.last_error = Some(err.to_string());
    }

    // ---- JSON accessors for the view ----

    pub fn snapshot_json(&self) -> String {
        to_json(&self.snapshot())
    }

    pub fn result_json(&self) -> String {
        to_json(&self.result())
    }

    pub fn catalog_json(&self) -> String {
        to_json(self.catalog.manifest())
    }

    pub fn user_json(&self) -> String {
        to_json(&self.user())
    }

    pub fn chat_json(&self) -> String {
        to_json(&self.assistant.messages())
    }

    pub fn roster_json(&self) -> String {
        to_json(&self.roster)
    }

    pub fn overview_json(&self) -> String {
        to_json(&self.roster.overview())
    }

    // ---- Event buffer accessors ----

    pub fn events(&self) -> &[SessionEvent] {
        &self.event_buffer
    }

    pub fn event_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.event_buffer)
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.event_floats().as_ptr()
    }

    pub fn events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }

    pub fn max_events(&self) -> u32 {
        self.session.as_ref().map(|s| s.config().max_events as u32).unwrap_or(0)
    }
}

fn parse_role(role: &str) -> Result<Role, RunnerError> {
    Role::parse(role).ok_or_else(|| RunnerError::UnknownName {
        kind: "role",
        value: role.to_string(),
    })
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::warn!("failed to serialize view data: {}", err);
        "null".to_string()
    })
}

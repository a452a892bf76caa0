//! Generic runtime for application orchestration.
//!
//! The Runtime drives the event loop, coordinating between:
//! - [`palaver_client::Client`]: protocol state machine
//! - [`App`]: view model / render sink
//! - [`Driver`]: platform-specific I/O
//!
//! All state transitions happen in response to one of three stimuli -
//! transport lifecycle event, inbound envelope, user action or timer tick -
//! each processed to completion before the next, on a single task. The
//! reconnect timer and the stats poll are independent of each other and of
//! the dispatch path.

use palaver_client::{
    Client, ClientAction, ClientEvent, CloseReason, RenderCommand, RoomName, TransportEvent,
};
use tokio::time::Instant;

use crate::{App, AppInput, Driver, IdentityStore, StatsHandle};

/// Generic runtime that orchestrates Client, App, and Driver.
pub struct Runtime<D, S>
where
    D: Driver,
    S: IdentityStore,
{
    driver: D,
    app: App,
    client: Client,
    store: S,
    stats: Option<StatsHandle>,
    reconnect_at: Option<Instant>,
    join_timeout_at: Option<(Instant, RoomName)>,
}

impl<D, S> Runtime<D, S>
where
    D: Driver,
    S: IdentityStore,
{
    /// Create a runtime from its parts.
    pub fn new(driver: D, client: Client, store: S) -> Self {
        Self {
            driver,
            app: App::new(),
            client,
            store,
            stats: None,
            reconnect_at: None,
            join_timeout_at: None,
        }
    }

    /// Attach a running stats poller.
    #[must_use]
    pub fn with_stats(mut self, stats: StatsHandle) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Run the main event loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error when the driver fails to render or poll; transport
    /// failures are recovered by the reconnect policy instead.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        // Auto-connect when a display name is already known; otherwise the
        // login view stays up until the user submits one.
        let actions = self.client.connect();
        self.process_actions(actions).await?;
        self.driver.render(&self.app)?;

        loop {
            if self.process_cycle().await? {
                break;
            }
        }

        self.driver.stop();
        if let Some(stats) = &self.stats {
            stats.stop();
        }
        Ok(())
    }

    /// The view model, for inspection.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` when the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let inputs = self.driver.poll_event(&self.app).await?;
        for input in inputs {
            if self.process_input(input).await? {
                return Ok(true);
            }
        }

        while let Some(event) = self.driver.poll_transport() {
            let event = match event {
                TransportEvent::Envelope(envelope) => ClientEvent::EnvelopeReceived(envelope),
                TransportEvent::Closed { reason } => ClientEvent::Closed { reason },
            };
            let actions = self.client.handle(event);
            self.process_actions(actions).await?;
        }

        self.fire_due_timers().await?;
        self.drain_stats()?;

        Ok(false)
    }

    /// Handle one user intent. Returns `true` on quit.
    async fn process_input(&mut self, input: AppInput) -> Result<bool, D::Error> {
        match input {
            AppInput::Quit => return Ok(true),
            AppInput::Redraw => self.driver.render(&self.app)?,
            AppInput::SetName(name) => {
                let name = name.trim().to_string();
                if !name.is_empty() {
                    self.client.set_display_name(name);
                    self.persist_identity();
                    let actions = self.client.connect();
                    self.process_actions(actions).await?;
                }
            },
            AppInput::SubmitChat(text) => {
                let actions = self.client.handle(ClientEvent::SendChat { text });
                self.process_actions(actions).await?;
            },
            AppInput::JoinRoom(room) => {
                let actions = self.client.handle(ClientEvent::SwitchRoom { room });
                self.process_actions(actions).await?;
            },
        }
        Ok(false)
    }

    /// Execute actions produced by the client.
    ///
    /// Iterative rather than recursive: executing an action (a connect
    /// attempt in particular) can produce follow-up events whose actions
    /// are queued and processed in the same pass.
    async fn process_actions(&mut self, initial: Vec<ClientAction>) -> Result<(), D::Error> {
        let mut pending = initial;
        let mut dirty = false;

        while !pending.is_empty() {
            let actions = std::mem::take(&mut pending);
            for action in actions {
                match action {
                    ClientAction::Connect(params) => match self.driver.connect(&params).await {
                        Ok(()) => pending.extend(self.client.handle(ClientEvent::Opened)),
                        Err(e) => {
                            tracing::warn!(error = %e, "connection attempt failed");
                            pending.extend(self.client.handle(ClientEvent::Closed {
                                reason: CloseReason::Error(e.to_string()),
                            }));
                        },
                    },
                    ClientAction::ScheduleReconnect { delay } => {
                        self.reconnect_at = Some(Instant::now() + delay);
                    },
                    ClientAction::ScheduleJoinTimeout { room, delay } => {
                        self.join_timeout_at = Some((Instant::now() + delay, room));
                    },
                    ClientAction::Send(envelope) => {
                        if let Err(e) = self.driver.send(envelope).await {
                            tracing::warn!(error = %e, "failed to transmit envelope");
                        }
                    },
                    ClientAction::PersistIdentity(identity) => {
                        if let Err(e) = self.store.store(&identity) {
                            tracing::warn!(error = %e, "failed to persist identity");
                        }
                    },
                    ClientAction::Render(command) => {
                        self.app.apply(command);
                        dirty = true;
                    },
                }
            }
        }

        if dirty {
            self.driver.render(&self.app)?;
        }
        Ok(())
    }

    /// Feed timer expirations back into the state machine.
    async fn fire_due_timers(&mut self) -> Result<(), D::Error> {
        let now = Instant::now();

        if let Some(at) = self.reconnect_at
            && now >= at
        {
            self.reconnect_at = None;
            let actions = self.client.handle(ClientEvent::ReconnectDue);
            self.process_actions(actions).await?;
        }

        if self.join_timeout_at.as_ref().is_some_and(|(at, _)| now >= *at)
            && let Some((_, room)) = self.join_timeout_at.take()
        {
            let actions = self.client.handle(ClientEvent::JoinTimeoutDue { room });
            self.process_actions(actions).await?;
        }

        Ok(())
    }

    /// Forward any fresh stats snapshots to the view.
    fn drain_stats(&mut self) -> Result<(), D::Error> {
        let Some(stats) = &mut self.stats else {
            return Ok(());
        };

        let mut dirty = false;
        while let Ok(snapshot) = stats.updates.try_recv() {
            self.app.apply(RenderCommand::SetStats(snapshot));
            dirty = true;
        }
        if dirty {
            self.driver.render(&self.app)?;
        }
        Ok(())
    }

    fn persist_identity(&self) {
        if let Err(e) = self.store.store(self.client.identity()) {
            tracing::warn!(error = %e, "failed to persist identity");
        }
    }
}

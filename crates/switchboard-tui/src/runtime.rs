//! TUI runtime: owns the terminal and the shell, runs the event loop and
//! executes effects.
//!
//! The reducer in `update` never touches the shell. It returns `UiEffect`s and
//! this module performs them. Background work (heartbeat, pushed tool results)
//! reaches the shell through the inbox channel; everything the shell announces
//! comes back through a bus channel subscription.

use std::io::Stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use switchboard_core::{KeyOutcome, Shell, ShellCommand};
use switchboard_types::{Params, UiEvent};
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::TuiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Poll duration while a tool is running.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    shell: Shell,
    heartbeat_interval: Duration,
    /// Background tasks send shell commands here.
    inbox_tx: mpsc::UnboundedSender<ShellCommand>,
    inbox_rx: mpsc::UnboundedReceiver<ShellCommand>,
    /// Every event the shell emits.
    bus_rx: mpsc::UnboundedReceiver<UiEvent>,
}

impl TuiRuntime {
    /// Takes over the terminal. The shell should already be initialized.
    pub fn new(mut shell: Shell, heartbeat_interval: Duration) -> Result<Self> {
        // Panic hook goes in before the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (_, bus_rx) = shell.bus_mut().subscribe_channel(None);
        let state = AppState::from_shell(&shell);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            shell,
            heartbeat_interval,
            inbox_tx,
            inbox_rx,
            bus_rx,
        })
    }

    /// Runs until the user quits, then shuts the shell down.
    pub async fn run(&mut self) -> Result<()> {
        let heartbeat = self
            .shell
            .spawn_heartbeat(self.inbox_tx.clone(), self.heartbeat_interval);
        let results = self.shell.forward_result_stream(self.inbox_tx.clone());

        if self.shell.current_view().is_none()
            && let Some(first) = self.state.views.first().map(|view| view.id.clone())
            && let Err(err) = self.shell.navigate_to(&first, Params::new()).await
        {
            tracing::warn!("Failed to open {first}: {err}");
        }

        let result = self.event_loop().await;

        if let Err(err) = self.shell.shutdown().await {
            tracing::error!("Shutdown failed: {err:#}");
        }
        heartbeat.abort();
        if let Some(results) = results {
            results.abort();
        }
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;
            if !events.is_empty() {
                dirty = true;
            }
            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects).await;
            }

            while !self.state.should_quit
                && let Ok(command) = self.inbox_rx.try_recv()
            {
                self.run_command(command).await?;
                dirty = true;
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }

            // Give spawned tasks a turn on single-threaded runtimes.
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Runs one shell command while the screen keeps updating. Bus events are
    /// applied and drawn every frame, and a quit key abandons the command
    /// (a running tool process is killed when its future is dropped).
    async fn run_command(&mut self, command: ShellCommand) -> Result<()> {
        let Self {
            terminal,
            state,
            shell,
            bus_rx,
            ..
        } = self;

        let work = shell.handle_command(command);
        tokio::pin!(work);
        let mut frames = tokio::time::interval(FRAME_DURATION);

        loop {
            tokio::select! {
                result = &mut work => {
                    if let Err(err) = result {
                        tracing::debug!("command failed: {err}");
                    }
                    return Ok(());
                }
                _ = frames.tick() => {
                    let mut events = Vec::new();
                    while let Ok(event) = bus_rx.try_recv() {
                        events.push(TuiEvent::Bus(event));
                    }
                    while event::poll(Duration::ZERO)? {
                        push_terminal_event(&mut events, event::read()?);
                    }
                    for event in events {
                        if update::update_busy(state, event).contains(&UiEffect::Quit) {
                            state.should_quit = true;
                        }
                    }
                    if state.should_quit {
                        tracing::info!("quit while a command was running");
                        return Ok(());
                    }
                    terminal.draw(|frame| render::render(state, frame))?;
                }
            }
        }
    }

    /// Drains the bus channel, then polls the terminal. Blocks for at most one
    /// poll interval when nothing is pending.
    fn collect_events(&mut self) -> Result<Vec<TuiEvent>> {
        let mut events = Vec::new();
        while let Ok(event) = self.bus_rx.try_recv() {
            events.push(TuiEvent::Bus(event));
        }

        let poll_duration = if !events.is_empty() || !self.inbox_rx.is_empty() {
            Duration::ZERO
        } else if self.state.loading.is_some() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        if event::poll(poll_duration)? {
            push_terminal_event(&mut events, event::read()?);
            while event::poll(Duration::ZERO)? {
                push_terminal_event(&mut events, event::read()?);
            }
        }
        Ok(events)
    }

    async fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect).await;
        }
    }

    async fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Shortcut(press) => match self.shell.handle_key(&press).await {
                Ok(KeyOutcome::Handled) => {}
                Ok(KeyOutcome::Ignored) => tracing::trace!(combo = %press.combo(), "unbound key"),
                Err(err) => tracing::debug!("shortcut failed: {err}"),
            },
            UiEffect::Run(action) => {
                if let Err(err) = self.shell.run_action(action).await {
                    tracing::debug!("action failed: {err}");
                }
            }
            UiEffect::Send(command) => {
                // The receiver lives as long as self.
                let _ = self.inbox_tx.send(command);
            }
            UiEffect::Quit => self.state.should_quit = true,
        }
    }
}

fn push_terminal_event(events: &mut Vec<TuiEvent>, event: Event) {
    match event {
        Event::Key(key) => events.push(TuiEvent::Key(key)),
        Event::Resize(..) => events.push(TuiEvent::Resize),
        _ => {}
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}

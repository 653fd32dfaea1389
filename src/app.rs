use anyhow::{Context, Result, bail};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::{FutureExt, Stream, StreamExt};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stderr, stderr};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{Action, GameConfig, GameEngine, SnakeState};
use crate::input::InputHandler;
use crate::menu::{Menu, MenuEntry};
use crate::render::Renderer;
use crate::scores::ScoreStore;

type Backend = CrosstermBackend<Stderr>;

pub struct App {
    engine: GameEngine,
    scores: ScoreStore,
    high_score_display: usize,
    menu: Menu,
    renderer: Renderer,
    input_handler: InputHandler,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        let scores = ScoreStore::new(config.score_file.clone());
        let high_score_display = config.high_score_display;

        Self {
            engine: GameEngine::new(config),
            scores,
            high_score_display,
            menu: Menu::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Restore the terminal whatever the menu loop returns
        let result = self.run_menu(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_menu(&mut self, terminal: &mut Terminal<Backend>) -> Result<()> {
        let mut events = EventStream::new();

        loop {
            terminal
                .draw(|frame| self.renderer.render_menu(frame, &self.menu))
                .context("Failed to draw menu")?;

            let Some(key) = next_key_press(&mut events).await? else {
                continue;
            };
            let Some(action) = self.input_handler.handle_menu_key(key) else {
                continue;
            };

            match self.menu.apply(action) {
                Some(MenuEntry::NewGame) => self.play_game(terminal, &mut events).await?,
                Some(MenuEntry::HighScores) => self.show_high_scores(terminal, &mut events).await?,
                Some(MenuEntry::Controls) => self.show_help(terminal, &mut events).await?,
                Some(MenuEntry::Exit) => break,
                None => {}
            }
        }

        log::info!("Leaving the menu");
        Ok(())
    }

    /// Run one game from reset to game over, then record the score.
    ///
    /// Each tick reads at most one action without blocking, advances the
    /// game and redraws. The interval keeps ticks on a fixed wall-clock
    /// cadence however long the tick itself took.
    async fn play_game(
        &mut self,
        terminal: &mut Terminal<Backend>,
        events: &mut EventStream,
    ) -> Result<()> {
        let mut state = self.engine.reset()?;
        log::info!(
            "New game on a {}x{} grid",
            state.grid_width,
            state.grid_height
        );

        let mut ticker = interval(self.engine.config().tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while state.is_running() {
            ticker.tick().await;

            let action = next_game_action(&self.input_handler, events)?;
            let result = self.engine.step(&mut state, action);
            if result.ate_food {
                log::debug!("Food eaten, score {}", result.score);
            }

            terminal
                .draw(|frame| self.renderer.render_game(frame, &state))
                .context("Failed to draw frame")?;
        }

        self.finish_game(&state);

        // Keys pressed during play shouldn't dismiss the game over screen
        discard_pending(events);
        self.wait_for_any_key(terminal, events, |renderer, frame| {
            renderer.render_game(frame, &state)
        })
        .await
    }

    fn finish_game(&self, state: &SnakeState) {
        log::info!(
            "Game over ({:?}) after {} steps, final score {}",
            state.end_reason(),
            state.steps,
            state.score
        );
        self.record_score(state.score);
    }

    /// Persist a final score. Failures are logged and otherwise ignored.
    fn record_score(&self, score: u32) {
        if let Err(err) = self.scores.append(score) {
            log::warn!("Score {} was not saved: {:#}", score, err);
        }
    }

    fn load_high_scores(&self) -> Vec<u32> {
        self.scores
            .top(self.high_score_display)
            .unwrap_or_else(|err| {
                log::warn!("Could not load high scores: {:#}", err);
                Vec::new()
            })
    }

    async fn show_high_scores(
        &mut self,
        terminal: &mut Terminal<Backend>,
        events: &mut EventStream,
    ) -> Result<()> {
        let scores = self.load_high_scores();
        self.wait_for_any_key(terminal, events, |renderer, frame| {
            renderer.render_high_scores(frame, &scores)
        })
        .await
    }

    async fn show_help(
        &mut self,
        terminal: &mut Terminal<Backend>,
        events: &mut EventStream,
    ) -> Result<()> {
        self.wait_for_any_key(terminal, events, |renderer, frame| renderer.render_help(frame))
            .await
    }

    /// Keep a static screen up until a key is pressed, redrawing on resize
    async fn wait_for_any_key<F>(
        &self,
        terminal: &mut Terminal<Backend>,
        events: &mut EventStream,
        draw: F,
    ) -> Result<()>
    where
        F: Fn(&Renderer, &mut ratatui::Frame),
    {
        loop {
            terminal
                .draw(|frame| draw(&self.renderer, frame))
                .context("Failed to draw screen")?;

            if next_key_press(events).await?.is_some() {
                return Ok(());
            }
        }
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<Backend>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Wait for the next key press. Returns `None` for events that only need a redraw.
async fn next_key_press<S>(events: &mut S) -> Result<Option<KeyEvent>>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    loop {
        let Some(event) = events.next().await else {
            bail!("Terminal event stream closed");
        };

        match event.context("Failed to read terminal event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(key)),
            Event::Resize(_, _) => return Ok(None),
            _ => {}
        }
    }
}

/// Take the first recognised game action from the queued events without waiting.
///
/// Events behind it stay queued for the next tick. Unrecognised keys are dropped.
fn next_game_action<S>(handler: &InputHandler, events: &mut S) -> Result<Action>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    while let Some(next) = events.next().now_or_never() {
        let Some(event) = next else {
            bail!("Terminal event stream closed");
        };

        if let Event::Key(key) = event.context("Failed to read terminal event")? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = handler.handle_game_key(key) {
                return Ok(action);
            }
        }
    }

    Ok(Action::Continue)
}

fn discard_pending<S>(events: &mut S)
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    while let Some(Some(_)) = events.next().now_or_never() {}
}

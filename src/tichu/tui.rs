//! Rich terminal UI.

use std::io::{self, stdout, Stdout};

use ratatui::crossterm::event::{KeyCode, KeyEventKind};
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::crossterm::{event, ExecutableCommand};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

mod form;
mod log;
mod records;
mod scoreboard;
mod setup;
use self::form::RoundForm;
use self::log::RoundLog;
use self::records::{RecordsTable, RecordsTableState};
use self::scoreboard::Scoreboard;
use self::setup::SetupForm;

use super::{Controller, Event, Phase};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Initializes the terminal for the TUI.
pub fn tui_init() -> io::Result<Term> {
    stdout().execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Restores the original terminal mode.
pub fn tui_restore() -> io::Result<()> {
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Runs a session in a rich terminal UI.
pub fn tui_main(controller: Controller) -> anyhow::Result<()> {
    let terminal = tui_init()?;
    let result = Tui::from(controller).run(terminal);
    tui_restore()?;
    result
}

/// Helper struct to keep track of UI areas in the layout.
struct Areas {
    score: Rect,
    form: Rect,
    help: Rect,
    message: Rect,
    log: Rect,
}
impl Areas {
    /// Performs layout math to figure out the render areas.
    fn new(frame: &Frame) -> Self {
        let [game, log] = Layout::new(
            Direction::Horizontal,
            [Constraint::Length(48), Constraint::Min(20)],
        )
        .areas(frame.area());
        let [score, form, help, message] = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(6), // score
                Constraint::Length(9), // setup or round entry
                Constraint::Length(3), // key help
                Constraint::Min(2),    // optional messages
            ],
        )
        .areas(game);
        Self {
            score,
            form,
            help,
            message,
            log,
        }
    }
}

/// Modal interface state.
#[derive(Debug)]
enum Mode {
    /// Assign players to slots.
    Setup(SetupForm),
    /// Enter the outcome of a round.
    Round(RoundForm),
    /// A team has won; ask whether to save.
    Finished,
    /// Browse and delete player records.
    Records(RecordsTable, RecordsTableState),
}

/// Terminal UI state.
pub struct Tui {
    /// The current mode.
    mode: Mode,
    /// The session being driven.
    controller: Controller,
    /// An error message to display to the user.
    error: Option<String>,
    /// An informational message to display to the user.
    info: Option<String>,
    /// Set when the user has asked to delete all records, pending confirmation.
    confirm_clear: bool,
    /// Set to true to exit the main loop.
    exit: bool,
}

impl From<Controller> for Tui {
    fn from(controller: Controller) -> Self {
        let mut tui = Self {
            mode: Mode::Finished,
            controller,
            error: None,
            info: None,
            confirm_clear: false,
            exit: false,
        };
        tui.sync_mode();
        tui
    }
}

impl Tui {
    /// Runs the terminal UI until the user exits.
    pub fn run(mut self, mut terminal: Term) -> anyhow::Result<()> {
        while !self.exit {
            terminal.draw(|frame| self.render_frame(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    // Top-level frame renderer.
    fn render_frame(&mut self, frame: &mut Frame) {
        if let Mode::Records(table, state) = &mut self.mode {
            let [table_area, help, message] = Layout::new(
                Direction::Vertical,
                [
                    Constraint::Min(4),
                    Constraint::Length(3),
                    Constraint::Length(2),
                ],
            )
            .areas(frame.area());
            frame.render_stateful_widget(table.clone(), table_area, state);
            let help_text = if self.confirm_clear {
                "Press D again to delete every record, any other key to cancel"
            } else {
                "↑/↓ select · d delete player · D delete all · Esc back"
            };
            frame.render_widget(Paragraph::new(help_text).block(Block::bordered()), help);
            frame.render_widget(self.messages(), message);
            return;
        }

        let areas = Areas::new(frame);
        frame.render_widget(Scoreboard::new(&self.controller), areas.score);
        frame.render_widget(RoundLog::new(self.controller.game().history()), areas.log);
        let help_text = match &self.mode {
            Mode::Setup(form) => {
                frame.render_widget(form, areas.form);
                "↑/↓ select · Tab suggest · Enter start · Esc quit"
            }
            Mode::Round(form) => {
                frame.render_widget(form, areas.form);
                "↑/↓ field · ←/→ change · Enter score · u undo · r records · x reset · q quit"
            }
            Mode::Finished => {
                let winner = self
                    .controller
                    .check_win()
                    .map(|team| format!("{team} wins!"))
                    .unwrap_or_default();
                let lines = vec![
                    Line::from(winner).bold(),
                    Line::from(""),
                    Line::from("Save the result to player records?"),
                ];
                frame.render_widget(Paragraph::new(lines).block(Block::bordered()), areas.form);
                "y save · n discard · u undo last round · q quit"
            }
            Mode::Records(_, _) => unreachable!(),
        };
        frame.render_widget(
            Paragraph::new(help_text).block(Block::bordered()),
            areas.help,
        );
        frame.render_widget(self.messages(), areas.message);
    }

    /// Renders the error and info messages.
    fn messages(&self) -> Paragraph<'static> {
        let mut lines = vec![];
        if let Some(error) = self.error.clone() {
            lines.push(Line::from(error).red().bold());
        }
        if let Some(info) = self.info.clone() {
            lines.push(Line::from(info).blue().bold());
        }
        Paragraph::new(lines)
    }

    /// Top-level event handler.
    fn handle_events(&mut self) -> io::Result<()> {
        let event::Event::Key(key) = event::read()? else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Output messages only persist for one refresh cycle.
        self.error = None;
        self.info = None;
        let confirm_clear = std::mem::take(&mut self.confirm_clear);

        #[allow(clippy::match_same_arms)]
        match (&mut self.mode, key.code) {
            // Setup
            (Mode::Setup(_), KeyCode::Esc) => self.exit = true,
            (Mode::Setup(form), KeyCode::Enter) => {
                let roster = form.roster();
                if let Err(e) = self.controller.start(roster) {
                    self.error = Some(e.to_string());
                }
            }
            (Mode::Setup(form), code) => form.handle_key(code),

            // Round entry
            (Mode::Round(_), KeyCode::Char('q')) => self.exit = true,
            (Mode::Round(form), KeyCode::Enter) => match form.input() {
                Ok(input) => match self.controller.apply_round(&input) {
                    Ok(_) => form.clear(),
                    Err(e) => self.error = Some(e.to_string()),
                },
                Err(e) => self.error = Some(e.to_string()),
            },
            (Mode::Round(_), KeyCode::Char('u')) => self.undo(),
            (Mode::Round(_), KeyCode::Char('x')) => self.controller.reset(),
            (Mode::Round(_), KeyCode::Char('r')) => self.enter_records_mode(),
            (Mode::Round(form), code) => form.handle_key(code),

            // End of match
            (Mode::Finished, KeyCode::Char('q')) => self.exit = true,
            (Mode::Finished, KeyCode::Char('y')) => {
                if let Err(e) = self.controller.save_and_restart() {
                    self.error = Some(e.to_string());
                }
            }
            (Mode::Finished, KeyCode::Char('n')) => {
                if let Err(e) = self.controller.discard_and_restart() {
                    self.error = Some(e.to_string());
                }
            }
            (Mode::Finished, KeyCode::Char('u')) => self.undo(),

            // Records browser
            (Mode::Records(_, _), KeyCode::Esc | KeyCode::Char('b' | 'q')) => self.sync_mode(),
            (Mode::Records(t, s), KeyCode::Up | KeyCode::Char('k')) => t.select_previous(s),
            (Mode::Records(t, s), KeyCode::Down | KeyCode::Char('j')) => t.select_next(s),
            (Mode::Records(table, s), KeyCode::Char('d')) => {
                if let Some(name) = table.selected(s) {
                    if let Err(e) = self.controller.delete_player(&name) {
                        self.error = Some(e.to_string());
                    }
                    self.enter_records_mode();
                }
            }
            (Mode::Records(_, _), KeyCode::Char('D')) if confirm_clear => {
                if let Err(e) = self.controller.delete_all() {
                    self.error = Some(e.to_string());
                }
                self.enter_records_mode();
            }
            (Mode::Records(_, _), KeyCode::Char('D')) => self.confirm_clear = true,

            _ => (),
        }

        self.drain_events();
        if !matches!(self.mode, Mode::Records(_, _)) {
            self.sync_mode();
        }
        Ok(())
    }

    /// Takes back the last round, reporting an empty history as a warning.
    fn undo(&mut self) {
        if let Err(e) = self.controller.undo() {
            self.error = Some(e.to_string());
        }
    }

    /// Drains controller events into the info line.
    fn drain_events(&mut self) {
        while let Some(event) = self.controller.pop_event() {
            let message = match event {
                Event::Round(round, result) => format!("Round {round}: {result}"),
                Event::Undo(round, _) => format!("Took back round {round}"),
                Event::Game(team) => {
                    let target = self.controller.game().target_score();
                    format!("{team} reached {target}")
                }
                Event::Saved(team) => format!("Saved the win for {team}"),
                Event::Discarded(team) => format!("Discarded the win for {team}"),
                Event::Reset => "Match reset".into(),
                Event::Deleted(name) => format!("Deleted the record for {name}"),
                Event::Cleared => "All records deleted".into(),
                Event::Start(roster) => {
                    let named = roster.entries().iter().filter(|(n, _)| !n.is_empty()).count();
                    format!("Match started with {named} named players")
                }
                Event::Warning(warning) => {
                    self.error = Some(warning);
                    continue;
                }
            };
            self.info = Some(message);
        }
    }

    /// Makes the mode match the controller's phase, keeping in-progress forms.
    fn sync_mode(&mut self) {
        self.mode = match (self.controller.game().phase(), &self.mode) {
            (Phase::Setup, Mode::Setup(_)) | (Phase::Playing, Mode::Round(_)) => return,
            (Phase::Setup, _) => {
                let known = self.controller.known_names();
                Mode::Setup(SetupForm::new(self.controller.roster(), known))
            }
            (Phase::Playing, _) => Mode::Round(RoundForm::default()),
            (Phase::Finished, _) => Mode::Finished,
        };
        self.drain_events();
    }

    /// Enters, or refreshes, the records browser.
    fn enter_records_mode(&mut self) {
        let selected = match &self.mode {
            Mode::Records(_, state) => state.selected(),
            _ => None,
        };
        match self.controller.records() {
            Ok(records) => {
                let table = RecordsTable::new(&records);
                let state = table.state(selected);
                self.mode = Mode::Records(table, state);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

//! Simple line-oriented console front-end.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use ansi_term::Colour::{Blue, Red, Yellow};
use ansi_term::{ANSIString, ANSIStrings, Style};
use itertools::Itertools;

use super::{
    log_line, parse_double_win, CardPoints, Controller, Event, Phase, RoundInput, Roster, Slot,
    Team, TeamInput, TichuCall,
};

/// Whether the session should keep going.
enum Flow {
    Continue,
    Quit,
}

/// Reads one line from stdin, or `None` at end of input.
fn read_line<S: Display>(prompt: S) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buffer = String::new();
    if io::stdin().lock().read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim().to_string()))
}

/// Prompts until the input parses, or `None` at end of input.
fn prompt<T, S>(prompt: S) -> io::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
    S: Display,
{
    loop {
        let Some(line) = read_line(&prompt)? else {
            return Ok(None);
        };
        match T::from_str(&line) {
            Ok(obj) => return Ok(Some(obj)),
            Err(e) => println!("Invalid input ({e}), try again"),
        }
    }
}

/// Prompts for a raw field, re-prompting until `parse` accepts it.
fn prompt_with<T, E, F, S>(prompt: S, parse: F) -> io::Result<Option<T>>
where
    F: Fn(&str) -> Result<T, E>,
    E: Display,
    S: Display,
{
    loop {
        let Some(line) = read_line(&prompt)? else {
            return Ok(None);
        };
        match parse(&line) {
            Ok(obj) => return Ok(Some(obj)),
            Err(e) => println!("Invalid input ({e}), try again"),
        }
    }
}

/// A yes or no answer.
#[derive(Debug)]
struct Answer(bool);

impl FromStr for Answer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" => Ok(Answer(true)),
            "n" | "no" | "false" => Ok(Answer(false)),
            _ => Err(format!("expected yes or no, got {s:?}")),
        }
    }
}

/// Commands available while a match is being played.
#[derive(Debug)]
enum Command {
    Score,
    Undo,
    Log,
    Records,
    Reset,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "s" | "score" => Command::Score,
            "u" | "undo" => Command::Undo,
            "l" | "log" => Command::Log,
            "r" | "records" => Command::Records,
            "x" | "reset" => Command::Reset,
            "q" | "quit" => Command::Quit,
            _ => return Err(format!("unknown command {s:?}")),
        })
    }
}

/// Commands available in the records view.
#[derive(Debug)]
enum RecordsCommand {
    Delete(String),
    DeleteAll,
    Back,
}

impl FromStr for RecordsCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(' ') {
            Some(("d" | "delete", name)) if !name.trim().is_empty() => {
                Ok(RecordsCommand::Delete(name.trim().to_string()))
            }
            None if s == "D" || s == "clear" => Ok(RecordsCommand::DeleteAll),
            None if s.is_empty() || s == "b" || s == "back" => Ok(RecordsCommand::Back),
            _ => Err(format!("unknown command {s:?}")),
        }
    }
}

pub struct Console {
    color: bool,
}

/// Runs a session with a simple command-line interface.
pub fn cli_main(controller: Controller, color: bool) -> anyhow::Result<()> {
    Console::new(color).run(controller)
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn format(&self, s: &ANSIStrings) -> String {
        if self.color {
            s.to_string()
        } else {
            ansi_term::unstyle(s)
        }
    }

    fn team_style(team: Team) -> Style {
        match team {
            Team::A => Red.bold(),
            Team::B => Blue.bold(),
        }
    }

    fn format_team(&self, team: Team) -> String {
        self.format(&ANSIStrings(&[Self::team_style(team).paint(team.to_string())]))
    }

    fn format_scoreboard(&self, controller: &Controller) -> String {
        let game = controller.game();
        let mut parts: Vec<ANSIString> = vec![format!("Round {} | ", game.round()).into()];
        for (i, &team) in Team::all_teams().iter().enumerate() {
            if i > 0 {
                parts.push(" | ".into());
            }
            let names = controller
                .roster()
                .team_names(team)
                .into_iter()
                .filter(|n| !n.is_empty())
                .join(" & ");
            let label = if names.is_empty() {
                team.to_string()
            } else {
                format!("{team} ({names})")
            };
            parts.push(Self::team_style(team).paint(label));
            parts.push(format!(": {}", game.score(team)).into());
        }
        self.format(&ANSIStrings(&parts))
    }

    fn warn<S: Display>(&self, message: S) {
        let message = format!("Warning: {message}");
        println!("{}", self.format(&ANSIStrings(&[Yellow.paint(message)])));
    }

    fn error<S: Display>(&self, message: S) {
        let message = format!("Error: {message}");
        println!("{}", self.format(&ANSIStrings(&[Red.paint(message)])));
    }

    /// Runs the session until the user quits or input ends.
    pub fn run(&self, mut controller: Controller) -> anyhow::Result<()> {
        loop {
            self.drain(&mut controller);
            let flow = match controller.game().phase() {
                Phase::Setup => self.setup(&mut controller)?,
                Phase::Playing => self.play(&mut controller)?,
                Phase::Finished => self.finish(&mut controller)?,
            };
            if let Flow::Quit = flow {
                return Ok(());
            }
        }
    }

    fn drain(&self, controller: &mut Controller) {
        while let Some(event) = controller.pop_event() {
            self.notify(&event);
        }
    }

    fn notify(&self, event: &Event) {
        match event {
            Event::Start(roster) => {
                for &team in Team::all_teams() {
                    let names = roster
                        .team_names(team)
                        .into_iter()
                        .filter(|n| !n.is_empty())
                        .join(" & ");
                    println!("{}: {names}", self.format_team(team));
                }
            }
            Event::Round(round, result) => println!("{}", log_line(*round, result)),
            Event::Undo(round, result) => println!("Took back round {round} ({result})"),
            Event::Game(team) => println!("{} wins!", self.format_team(*team)),
            Event::Saved(_) => println!("Records saved."),
            Event::Discarded(team) => println!("Match discarded; {team}'s win was not recorded."),
            Event::Reset => println!("Match reset."),
            Event::Deleted(name) => println!("Deleted the record for {name}."),
            Event::Cleared => println!("All records deleted."),
            Event::Warning(message) => self.warn(message),
        }
    }

    fn setup(&self, controller: &mut Controller) -> anyhow::Result<Flow> {
        let known = controller.known_names();
        self.drain(controller);
        if !known.is_empty() {
            let listing = known
                .iter()
                .enumerate()
                .map(|(i, name)| format!("{}) {name}", i + 1))
                .join("  ");
            println!("Known players: {listing}");
        }
        let previous = controller.roster().clone();
        let mut roster = Roster::default();
        for &slot in Slot::all_slots() {
            let default = previous.name(slot);
            let question = if default.is_empty() {
                format!("{slot} name? ")
            } else {
                format!("{slot} name [{default}]? ")
            };
            let Some(line) = read_line(question)? else {
                return Ok(Flow::Quit);
            };
            let name = match line.parse::<usize>() {
                Ok(n) if (1..=known.len()).contains(&n) => known[n - 1].clone(),
                _ if line.is_empty() => default.to_string(),
                _ => line,
            };
            roster.set_name(slot, name);
        }
        controller.start(roster)?;
        Ok(Flow::Continue)
    }

    fn play(&self, controller: &mut Controller) -> anyhow::Result<Flow> {
        println!("{}", self.format_scoreboard(controller));
        let question = "[s]core, [u]ndo, [l]og, [r]ecords, reset [x], [q]uit? ";
        let Some(command) = prompt::<Command, _>(question)? else {
            return Ok(Flow::Quit);
        };
        match command {
            Command::Score => {
                let Some(input) = self.round_input()? else {
                    return Ok(Flow::Quit);
                };
                if let Err(e) = controller.apply_round(&input) {
                    self.error(e);
                }
            }
            Command::Undo => {
                if let Err(e) = controller.undo() {
                    self.warn(e);
                }
            }
            Command::Log => {
                if controller.game().history().is_empty() {
                    println!("No rounds yet.");
                }
                for line in controller.game().history().lines() {
                    println!("{line}");
                }
            }
            Command::Records => return self.records(controller),
            Command::Reset => controller.reset(),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn team_input(&self, team: Team) -> io::Result<Option<TeamInput>> {
        let label = self.format_team(team);
        let Some(call) = prompt::<TichuCall, _>(format!("{label} call (none/tichu/grand)? "))?
        else {
            return Ok(None);
        };
        let success = if call == TichuCall::None {
            false
        } else {
            match prompt::<Answer, _>(format!("{label} {call} succeeded? "))? {
                Some(Answer(success)) => success,
                None => return Ok(None),
            }
        };
        let points = prompt_with(
            format!("{label} card points (blank if not counted)? "),
            CardPoints::parse_field,
        )?;
        Ok(points.map(|points| TeamInput::new(call, success, points)))
    }

    fn round_input(&self) -> io::Result<Option<RoundInput>> {
        let Some(a) = self.team_input(Team::A)? else {
            return Ok(None);
        };
        let Some(b) = self.team_input(Team::B)? else {
            return Ok(None);
        };
        let double_win = prompt_with("Double win (none/a/b)? ", parse_double_win)?;
        Ok(double_win.map(|double_win| RoundInput { a, b, double_win }))
    }

    fn finish(&self, controller: &mut Controller) -> anyhow::Result<Flow> {
        println!("{}", self.format_scoreboard(controller));
        let Some(line) = read_line("Save records? [y]es, [n]o, [u]ndo last round: ")? else {
            return Ok(Flow::Quit);
        };
        match line.to_ascii_lowercase().as_str() {
            "u" | "undo" => {
                if let Err(e) = controller.undo() {
                    self.warn(e);
                }
            }
            answer => match Answer::from_str(answer) {
                Ok(Answer(true)) => {
                    if let Err(e) = controller.save_and_restart() {
                        self.error(e);
                    }
                }
                Ok(Answer(false)) => controller.discard_and_restart()?,
                Err(e) => println!("Invalid input ({e}), try again"),
            },
        }
        Ok(Flow::Continue)
    }

    fn print_records(&self, controller: &Controller) {
        let records = match controller.records() {
            Ok(records) if records.is_empty() => {
                println!("No records yet.");
                return;
            }
            Ok(records) => records,
            Err(e) => {
                self.error(e);
                return;
            }
        };
        let width = records
            .names()
            .iter()
            .map(|n| n.chars().count())
            .max()
            .unwrap_or_default()
            .max(4);
        println!("{:width$}  {:>4}  {:>6}  {:>6}", "Name", "Wins", "Losses", "Rate");
        for record in records.standings() {
            println!(
                "{:width$}  {:>4}  {:>6}  {:>6}",
                record.name,
                record.wins,
                record.losses,
                record.win_rate()
            );
        }
    }

    fn records(&self, controller: &mut Controller) -> anyhow::Result<Flow> {
        loop {
            self.drain(controller);
            self.print_records(controller);
            let question = "[d <name>] delete, [D] delete all, [b]ack? ";
            let Some(command) = prompt::<RecordsCommand, _>(question)? else {
                return Ok(Flow::Quit);
            };
            let result = match command {
                RecordsCommand::Delete(name) => controller.delete_player(&name).map(|deleted| {
                    if !deleted {
                        println!("No record for {name}.");
                    }
                }),
                RecordsCommand::DeleteAll => {
                    match prompt::<Answer, _>("Delete all records? ")? {
                        Some(Answer(true)) => controller.delete_all(),
                        Some(Answer(false)) => Ok(()),
                        None => return Ok(Flow::Quit),
                    }
                }
                RecordsCommand::Back => return Ok(Flow::Continue),
            };
            if let Err(e) = result {
                self.error(e);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_parse_command() {
        assert_matches!("s".parse::<Command>(), Ok(Command::Score));
        assert_matches!("UNDO".parse::<Command>(), Ok(Command::Undo));
        assert_matches!("x".parse::<Command>(), Ok(Command::Reset));
        assert_matches!("".parse::<Command>(), Err(_));
    }

    #[test]
    fn test_parse_records_command() {
        assert_matches!(
            "d Mary Ann ".parse::<RecordsCommand>(),
            Ok(RecordsCommand::Delete(name)) if name == "Mary Ann"
        );
        assert_matches!("D".parse::<RecordsCommand>(), Ok(RecordsCommand::DeleteAll));
        assert_matches!("".parse::<RecordsCommand>(), Ok(RecordsCommand::Back));
        assert_matches!("d ".parse::<RecordsCommand>(), Err(_));
        assert_matches!("delete".parse::<RecordsCommand>(), Err(_));
    }

    #[test]
    fn test_parse_answer() {
        assert_matches!("Y".parse::<Answer>(), Ok(Answer(true)));
        assert_matches!("no".parse::<Answer>(), Ok(Answer(false)));
        assert_matches!("maybe".parse::<Answer>(), Err(_));
    }

    #[test]
    fn test_format_without_color() {
        let console = Console::new(false);
        assert_eq!(console.format_team(Team::B), "Team B");
    }
}

use assert_matches::assert_matches;
use proptest::prelude::*;

use super::*;

/// Builders for round fixtures.
impl RoundInput {
    fn team_mut(&mut self, team: Team) -> &mut TeamInput {
        match team {
            Team::A => &mut self.a,
            Team::B => &mut self.b,
        }
    }

    pub(crate) fn with_call(mut self, team: Team, call: TichuCall, success: bool) -> Self {
        let input = self.team_mut(team);
        input.call = call;
        input.success = success;
        self
    }

    pub(crate) fn with_points(mut self, team: Team, points: CardPoints) -> Self {
        self.team_mut(team).points = Some(points);
        self
    }

    pub(crate) fn with_double_win(mut self, team: Team) -> Self {
        self.double_win = Some(team);
        self
    }
}

fn points(v: i64) -> CardPoints {
    CardPoints::try_from(v).unwrap()
}

#[test]
fn test_one_team_entered() {
    let input = RoundInput::default().with_points(Team::A, points(70));
    assert_eq!(score(&input).unwrap(), RoundResult::new(70, 30));

    let input = RoundInput::default().with_points(Team::B, points(25));
    assert_eq!(score(&input).unwrap(), RoundResult::new(75, 25));
}

#[test]
fn test_both_entered_are_trusted() {
    let input = RoundInput::default()
        .with_points(Team::A, points(60))
        .with_points(Team::B, points(60));
    assert_eq!(score(&input).unwrap(), RoundResult::new(60, 60));
}

#[test]
fn test_missing_score() {
    assert_matches!(
        score(&RoundInput::default()),
        Err(InputError::MissingScore)
    );

    // Calls alone don't split the pot.
    let input = RoundInput::default().with_call(Team::A, TichuCall::Tichu, true);
    assert_matches!(score(&input), Err(InputError::MissingScore));
}

#[test]
fn test_double_win_with_tichu() {
    let input = RoundInput::default()
        .with_call(Team::A, TichuCall::Tichu, true)
        .with_double_win(Team::A);
    assert_eq!(score(&input).unwrap(), RoundResult::new(300, 0));
}

#[test]
fn test_double_win_ignores_points() {
    let input = RoundInput::default()
        .with_points(Team::A, points(80))
        .with_double_win(Team::B);
    assert_eq!(score(&input).unwrap(), RoundResult::new(0, 200));
}

#[test]
fn test_failed_grand_tichu() {
    let input = RoundInput::default()
        .with_call(Team::B, TichuCall::GrandTichu, false)
        .with_points(Team::B, points(40));
    assert_eq!(score(&input).unwrap(), RoundResult::new(60, -160));

    let input = RoundInput::default()
        .with_call(Team::B, TichuCall::GrandTichu, false)
        .with_double_win(Team::A);
    assert_eq!(score(&input).unwrap(), RoundResult::new(200, -200));
}

#[test]
fn test_both_teams_call() {
    let input = RoundInput::default()
        .with_call(Team::A, TichuCall::Tichu, false)
        .with_call(Team::B, TichuCall::Tichu, true)
        .with_points(Team::A, points(50));
    assert_eq!(score(&input).unwrap(), RoundResult::new(-50, 150));
}

#[test]
fn test_success_ignored_without_call() {
    let input = RoundInput::default()
        .with_call(Team::A, TichuCall::None, true)
        .with_points(Team::A, points(0));
    assert_eq!(score(&input).unwrap(), RoundResult::new(0, 100));
}

#[test]
fn test_parse_field() {
    assert_eq!(CardPoints::parse_field("").unwrap(), None);
    assert_eq!(CardPoints::parse_field("  ").unwrap(), None);
    assert_eq!(CardPoints::parse_field(" 70 ").unwrap(), Some(points(70)));
    assert_eq!(CardPoints::parse_field("100").unwrap(), Some(points(100)));
    assert_matches!(
        CardPoints::parse_field("seventy"),
        Err(InputError::NonNumeric(s)) if s == "seventy"
    );
    assert_matches!(CardPoints::parse_field("7.5"), Err(InputError::NonNumeric(_)));
    assert_matches!(CardPoints::parse_field("101"), Err(InputError::OutOfRange(101)));
    assert_matches!(CardPoints::parse_field("-5"), Err(InputError::OutOfRange(-5)));
}

#[test]
fn test_error_messages() {
    assert_eq!(InputError::MissingScore.to_string(), "missing score");
    assert!(InputError::NonNumeric("x".into())
        .to_string()
        .starts_with("non-numeric score"));
}

fn call_strategy() -> impl Strategy<Value = TichuCall> {
    prop::sample::select(TichuCall::all_calls().to_vec())
}

fn team_input_strategy() -> impl Strategy<Value = TeamInput> {
    (
        call_strategy(),
        any::<bool>(),
        prop::option::of(0..=100i64),
    )
        .prop_map(|(call, success, points)| {
            TeamInput::new(call, success, points.map(|v| CardPoints::try_from(v).unwrap()))
        })
}

pub(crate) fn round_input_strategy() -> impl Strategy<Value = RoundInput> {
    (
        team_input_strategy(),
        team_input_strategy(),
        prop::option::of(prop::sample::select(Team::all_teams().to_vec())),
    )
        .prop_map(|(a, b, double_win)| RoundInput { a, b, double_win })
}

proptest! {
    #[test]
    fn score_deterministic(input in round_input_strategy()) {
        let first = score(&input);
        let second = score(&input);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn bonuses_are_independent(input in round_input_strategy()) {
        if let Ok(result) = score(&input) {
            let plain = RoundInput {
                a: TeamInput { call: TichuCall::None, ..input.a },
                b: TeamInput { call: TichuCall::None, ..input.b },
                ..input
            };
            let base = score(&plain).unwrap();
            prop_assert_eq!(result.a - base.a, input.a.bonus());
            prop_assert_eq!(result.b - base.b, input.b.bonus());
        }
    }
}

//! Integration tests for the league leaderboard pipeline.

use chrono::NaiveDate;
use league_ranking_web::{
    compute_league_leaderboard, Event, GameMatch, LeaderboardEntry, Player, PointMetric,
    ScoringSystem, TieBreakerType, TieBreaking,
};
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use uuid::Uuid;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

fn players(names: &[&str]) -> Vec<Player> {
    names.iter().map(|n| Player::new(*n)).collect()
}

fn entry<'a>(board: &'a [LeaderboardEntry], player: &Player) -> &'a LeaderboardEntry {
    board.iter().find(|e| e.player_id == player.id).unwrap()
}

/// Alice beats everyone; Bob and Charlie draw each other and both beat Dave.
fn round_robin(event: &Event, p: &[Player]) -> Vec<GameMatch> {
    let (alice, bob, charlie, dave) = (p[0].id, p[1].id, p[2].id, p[3].id);
    vec![
        GameMatch::new(event.id, alice, bob, 2, 0),
        GameMatch::new(event.id, alice, charlie, 2, 0),
        GameMatch::new(event.id, alice, dave, 2, 0),
        GameMatch::new(event.id, bob, charlie, 1, 1).drawn(),
        GameMatch::new(event.id, bob, dave, 2, 0),
        GameMatch::new(event.id, charlie, dave, 2, 0),
    ]
}

#[test]
fn empty_inputs_give_empty_board() {
    let league = Uuid::new_v4();
    let p = players(&["Alice", "Bob"]);
    assert!(compute_league_leaderboard(league, &[], &[], &p, None).is_empty());

    let events = vec![Event::new(league, date(1))];
    assert!(compute_league_leaderboard(league, &events, &[], &p, None).is_empty());
    assert!(compute_league_leaderboard(league, &events, &[], &[], None).is_empty());
}

#[test]
fn other_leagues_events_are_ignored() {
    let league = Uuid::new_v4();
    let p = players(&["Alice", "Bob"]);
    let foreign = Event::new(Uuid::new_v4(), date(1));
    let matches = vec![GameMatch::new(foreign.id, p[0].id, p[1].id, 2, 0)];
    assert!(compute_league_leaderboard(league, &[foreign], &matches, &p, None).is_empty());
}

#[test]
fn legacy_round_robin_shares_second_and_skips_third() {
    let league = Uuid::new_v4();
    let event = Event::new(league, date(1));
    let p = players(&["Alice", "Bob", "Charlie", "Dave"]);
    let board = compute_league_leaderboard(league, &[event.clone()], &round_robin(&event, &p), &p, None);

    let ranks: Vec<u32> = board.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 2, 4]);
    assert_eq!(board[0].player_id, p[0].id);
    assert_eq!(board[0].league_points, 4.0);
    assert_eq!(entry(&board, &p[1]).league_points, 3.0);
    assert_eq!(entry(&board, &p[2]).league_points, 3.0);
    assert_eq!(entry(&board, &p[3]).rank, 4);
    assert_eq!(entry(&board, &p[3]).league_points, 1.0);
}

#[test]
fn legacy_three_cycle_ties_the_two_stronger_game_records() {
    let league = Uuid::new_v4();
    let event = Event::new(league, date(1));
    let p = players(&["Alice", "Bob", "Charlie"]);
    let (alice, bob, charlie) = (p[0].id, p[1].id, p[2].id);
    let matches = vec![
        GameMatch::new(event.id, alice, bob, 2, 0),
        GameMatch::new(event.id, bob, charlie, 2, 1),
        GameMatch::new(event.id, charlie, alice, 2, 1),
    ];
    let board = compute_league_leaderboard(league, &[event], &matches, &p, None);

    assert!(board.iter().all(|e| e.stats.matches_won == 1));
    assert_eq!(entry(&board, &p[0]).rank, 1);
    assert_eq!(entry(&board, &p[2]).rank, 1);
    assert_eq!(entry(&board, &p[1]).rank, 3);
    // No name fallback: the tied pair keeps roster order.
    assert_eq!(board[0].player_id, alice);
    assert_eq!(board[1].player_id, charlie);
}

#[test]
fn fully_symmetric_players_share_first() {
    let league = Uuid::new_v4();
    let event = Event::new(league, date(1));
    let p = players(&["Alice", "Bob"]);
    let matches = vec![GameMatch::new(event.id, p[0].id, p[1].id, 1, 1).drawn()];
    let board = compute_league_leaderboard(league, &[event], &matches, &p, None);

    assert_eq!(board.len(), 2);
    assert!(board.iter().all(|e| e.rank == 1));
}

#[test]
fn floor_applies_to_player_with_only_losses() {
    let league = Uuid::new_v4();
    let event = Event::new(league, date(1));
    let p = players(&["Alice", "Bob"]);
    let matches = vec![
        GameMatch::new(event.id, p[0].id, p[1].id, 2, 0),
        GameMatch::new(event.id, p[0].id, p[1].id, 2, 1),
    ];
    let board = compute_league_leaderboard(league, &[event], &matches, &p, None);

    assert_eq!(entry(&board, &p[0]).stats.match_win_percentage, 1.0);
    assert_eq!(entry(&board, &p[1]).stats.match_win_percentage, 0.33);
    assert_eq!(entry(&board, &p[1]).rank, 2);
}

#[test]
fn drawn_match_is_never_a_win() {
    let league = Uuid::new_v4();
    let event = Event::new(league, date(1));
    let p = players(&["Alice", "Bob"]);
    let matches = vec![GameMatch::new(event.id, p[0].id, p[1].id, 3, 1).drawn()];
    let board = compute_league_leaderboard(league, &[event], &matches, &p, None);

    assert!(board.iter().all(|e| e.stats.matches_won == 0));
}

#[test]
fn unknown_match_player_is_excluded() {
    let league = Uuid::new_v4();
    let event = Event::new(league, date(1));
    let p = players(&["Alice", "Bob"]);
    let stranger = Uuid::new_v4();
    let matches = vec![
        GameMatch::new(event.id, p[0].id, p[1].id, 2, 0),
        GameMatch::new(event.id, stranger, p[0].id, 2, 0),
    ];
    let board = compute_league_leaderboard(league, &[event], &matches, &p, None);

    assert_eq!(board.len(), 2);
    assert!(board.iter().all(|e| e.player_id != stranger));
    assert_eq!(entry(&board, &p[0]).stats.matches_played, 2);
}

#[test]
fn attendance_formula_counts_distinct_events() {
    let league = Uuid::new_v4();
    let events = vec![Event::new(league, date(1)), Event::new(league, date(8))];
    let p = players(&["Alice", "Bob", "Charlie"]);
    let matches = vec![
        GameMatch::new(events[0].id, p[0].id, p[1].id, 2, 0),
        GameMatch::new(events[0].id, p[0].id, p[1].id, 2, 0),
        GameMatch::new(events[1].id, p[0].id, p[2].id, 0, 2),
    ];
    let system = ScoringSystem::new("Attendance").with_formula(1.0, PointMetric::EventAttendance);
    let board = compute_league_leaderboard(league, &events, &matches, &p, Some(&system));

    assert_eq!(entry(&board, &p[0]).league_points, 2.0);
    assert_eq!(entry(&board, &p[1]).league_points, 1.0);
    assert_eq!(entry(&board, &p[2]).league_points, 1.0);
    assert_eq!(entry(&board, &p[0]).stats.event_attendance, 2);
}

#[test]
fn placement_formula_uses_event_ranks() {
    let league = Uuid::new_v4();
    let events = vec![Event::new(league, date(1)), Event::new(league, date(8))];
    let p = players(&["Alice", "Bob"]);
    let matches = vec![
        GameMatch::new(events[0].id, p[0].id, p[1].id, 2, 0),
        GameMatch::new(events[1].id, p[0].id, p[1].id, 2, 1),
    ];
    let system = ScoringSystem::new("Podium")
        .with_formula(5.0, PointMetric::FirstPlace)
        .with_formula(2.0, PointMetric::SecondPlace);
    let board = compute_league_leaderboard(league, &events, &matches, &p, Some(&system));

    assert_eq!(board[0].player_id, p[0].id);
    assert_eq!(board[0].league_points, 10.0);
    assert_eq!(board[1].league_points, 4.0);
}

#[test]
fn win_and_game_formulas_total_across_events() {
    let league = Uuid::new_v4();
    let events = vec![Event::new(league, date(1)), Event::new(league, date(8))];
    let p = players(&["Alice", "Bob", "Charlie"]);
    let (alice, bob, charlie) = (p[0].id, p[1].id, p[2].id);
    let matches = vec![
        GameMatch::new(events[0].id, alice, bob, 2, 0),
        // Drawn with uneven scores: no win for anyone, but both scores are still games won.
        GameMatch::new(events[0].id, alice, bob, 3, 1).drawn(),
        GameMatch::new(events[1].id, bob, alice, 2, 1),
        GameMatch::new(events[1].id, alice, charlie, 2, 0),
    ];
    let system = ScoringSystem::new("Wins and games")
        .with_formula(10.0, PointMetric::MatchWins)
        .with_formula(1.0, PointMetric::GameWins);
    let board = compute_league_leaderboard(league, &events, &matches, &p, Some(&system));

    let a = entry(&board, &p[0]);
    assert_eq!(a.stats.matches_won, 2);
    assert_eq!(a.stats.games_won, 8);
    assert_eq!(a.league_points, 2.0 * 10.0 + 8.0);

    let b = entry(&board, &p[1]);
    assert_eq!(b.stats.matches_won, 1);
    assert_eq!(b.stats.games_won, 3);
    assert_eq!(b.league_points, 10.0 + 3.0);

    assert_eq!(entry(&board, &p[2]).league_points, 0.0);
    let order: Vec<_> = board.iter().map(|e| (e.player_id, e.rank)).collect();
    assert_eq!(order, vec![(alice, 1), (bob, 2), (charlie, 3)]);
}

#[test]
fn non_finite_multipliers_are_ignored() {
    let league = Uuid::new_v4();
    let event = Event::new(league, date(1));
    let p = players(&["Alice", "Bob"]);
    let matches = vec![GameMatch::new(event.id, p[0].id, p[1].id, 2, 0)];
    let system = ScoringSystem::new("Broken weights")
        .with_formula(f64::INFINITY, PointMetric::FirstPlace)
        .with_formula(f64::NAN, PointMetric::EventAttendance)
        .with_formula(1.0, PointMetric::MatchWins);
    let board = compute_league_leaderboard(league, &[event], &matches, &p, Some(&system));

    assert!(board.iter().all(|e| e.league_points.is_finite()));
    assert_eq!(board[0].player_id, p[0].id);
    assert_eq!(board[0].league_points, 1.0);
    assert_eq!(board[1].league_points, 0.0);
    let ranks: Vec<u32> = board.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2]);
}

#[test]
fn configured_tie_breaker_separates_equal_points() {
    let league = Uuid::new_v4();
    let event = Event::new(league, date(1));
    let p = players(&["Bob", "Alice"]);
    let matches = vec![GameMatch::new(event.id, p[1].id, p[0].id, 2, 0)];
    let system = ScoringSystem::new("Attendance, then wins")
        .with_formula(1.0, PointMetric::EventAttendance)
        .with_tie_breaker(TieBreakerType::MatchWins);
    let board = compute_league_leaderboard(league, &[event], &matches, &p, Some(&system));

    assert_eq!(board[0].player_id, p[1].id);
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[1].rank, 2);
    assert_eq!(board[0].league_points, board[1].league_points);
}

#[test]
fn exhausted_or_unknown_tie_breakers_leave_players_tied() {
    let league = Uuid::new_v4();
    let event = Event::new(league, date(1));
    let p = players(&["Alice", "Bob"]);
    let matches = vec![GameMatch::new(event.id, p[0].id, p[1].id, 2, 0)];
    let system: ScoringSystem = serde_json::from_str(
        r#"{
            "name": "Future tie-breaker",
            "formulas": [{ "multiplier": 1, "pointMetric": "EVENT_ATTENDANCE" }],
            "tieBreakers": [{ "type": "COIN_FLIP", "order": 0 }]
        }"#,
    )
    .unwrap();
    assert_eq!(system.tie_breakers[0].kind, TieBreakerType::Unknown);

    let board = compute_league_leaderboard(league, &[event], &matches, &p, Some(&system));
    assert!(board.iter().all(|e| e.rank == 1));
}

#[test]
fn tie_breakers_apply_in_ascending_order() {
    let league = Uuid::new_v4();
    let event = Event::new(league, date(1));
    let p = players(&["Alice", "Bob"]);
    // Alice wins more matches, Bob has the better game win percentage.
    let matches = vec![
        GameMatch::new(event.id, p[0].id, p[1].id, 2, 1),
        GameMatch::new(event.id, p[0].id, p[1].id, 2, 1),
        GameMatch::new(event.id, p[1].id, p[0].id, 5, 0),
    ];
    let mut system = ScoringSystem::new("Ordered")
        .with_formula(1.0, PointMetric::EventAttendance)
        .with_tie_breaker(TieBreakerType::MatchWins)
        .with_tie_breaker(TieBreakerType::GameWinPct);
    let board = compute_league_leaderboard(league, &[event.clone()], &matches, &p, Some(&system));
    assert_eq!(board[0].player_id, p[0].id);

    system.tie_breakers[0].order = 5;
    let board = compute_league_leaderboard(league, &[event], &matches, &p, Some(&system));
    assert_eq!(board[0].player_id, p[1].id);
}

#[test]
fn ranks_are_monotonic_and_shared_only_on_full_ties() {
    let league = Uuid::new_v4();
    let events = vec![Event::new(league, date(1)), Event::new(league, date(8))];
    let p = players(&["Alice", "Bob", "Charlie", "Dave"]);
    let mut matches = round_robin(&events[0], &p);
    matches.extend(round_robin(&events[1], &p));
    matches.push(GameMatch::new(events[1].id, p[3].id, p[2].id, 2, 1));
    let board = compute_league_leaderboard(league, &events, &matches, &p, None);

    for pair in board.windows(2) {
        assert!(pair[0].rank <= pair[1].rank);
        let tied = TieBreaking::Legacy.compare(&pair[0], &pair[1]) == Ordering::Equal;
        assert_eq!(pair[0].rank == pair[1].rank, tied);
    }
}

#[test]
fn output_is_deterministic_and_order_independent() {
    let league = Uuid::new_v4();
    let events = vec![Event::new(league, date(1)), Event::new(league, date(8))];
    let p = players(&["Alice", "Bob", "Charlie", "Dave"]);
    let mut matches = round_robin(&events[0], &p);
    matches.extend(round_robin(&events[1], &p));

    let first = compute_league_leaderboard(league, &events, &matches, &p, None);
    let second = compute_league_leaderboard(league, &events, &matches, &p, None);
    assert_eq!(first, second);

    let mut rng = rand::thread_rng();
    let mut shuffled_players = p.clone();
    let mut shuffled_matches = matches.clone();
    shuffled_players.shuffle(&mut rng);
    shuffled_matches.shuffle(&mut rng);
    let shuffled = compute_league_leaderboard(league, &events, &shuffled_matches, &shuffled_players, None);
    for player in &p {
        assert_eq!(entry(&shuffled, player).rank, entry(&first, player).rank);
        assert_eq!(entry(&shuffled, player).stats, entry(&first, player).stats);
    }
}

#[test]
fn entries_serialize_with_display_field_names() {
    let league = Uuid::new_v4();
    let event = Event::new(league, date(1));
    let p = players(&["Alice", "Bob"]);
    let matches = vec![GameMatch::new(event.id, p[0].id, p[1].id, 2, 0)];
    let board = compute_league_leaderboard(league, &[event], &matches, &p, None);

    let json = serde_json::to_value(&board[0]).unwrap();
    for key in [
        "rank",
        "playerId",
        "playerName",
        "leaguePoints",
        "matchesWon",
        "matchesPlayed",
        "matchPoints",
        "matchWinPercentage",
        "gamesWon",
        "gamePoints",
        "gameWinPercentage",
        "opponentsMatchWinPercentage",
        "opponentsGameWinPercentage",
        "eventAttendance",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["matchWinPercentage"], 1.0);
}

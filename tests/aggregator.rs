//! Tests for report scope selection, ordering, the data envelope, and the
//! tournament summary.

use chrono::{NaiveDate, NaiveTime};
use tournament_reports_web::report::aggregator::{
    completed_report_matches, final_day_matches, finals_bracket, report_data, report_matches,
    standings_scope, tournament_summary, venue_sections,
};
use tournament_reports_web::{
    Goal, Match, MatchStage, MatchStatus, ReportError, Standing, Team, Tournament,
    TournamentStore, Venue,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn time(h: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, min, 0).unwrap()
}

struct Fixture {
    store: TournamentStore,
    tid: i64,
    main_venue: i64,
    finals_venue: i64,
    team_a: i64,
    team_b: i64,
}

fn fixture() -> Fixture {
    let mut store = TournamentStore::new();
    let tid = store.add_tournament(Tournament::new("浦和カップ2026"));
    let main_venue = store.add_venue(Venue::new(tid, "駒場スタジアム", false));
    let finals_venue = store.add_venue(Venue::new(tid, "レッズランド", true));
    let team_a = store.add_team(Team::new(tid, "浦和レッズジュニア", "浦和R"));
    let team_b = store.add_team(Team::new(tid, "大宮アルディージャ", "大宮"));
    Fixture {
        store,
        tid,
        main_venue,
        finals_venue,
        team_a,
        team_b,
    }
}

fn completed(mut m: Match, h1: i32, h2: i32, a1: i32, a2: i32) -> Match {
    m.status = MatchStatus::Completed;
    m.home_score_half1 = Some(h1);
    m.home_score_half2 = Some(h2);
    m.away_score_half1 = Some(a1);
    m.away_score_half2 = Some(a2);
    m
}

#[test]
fn training_matches_never_appear_in_report_scope() {
    let mut f = fixture();
    let m = Match::new(f.tid, f.main_venue, f.team_a, f.team_b, day(27), time(10, 0), 1, MatchStage::Qualifying);
    f.store.add_match(completed(m, 1, 0, 0, 0));
    let t = Match::new(f.tid, f.main_venue, f.team_a, f.team_b, day(27), time(11, 0), 2, MatchStage::Training);
    f.store.add_match(completed(t, 5, 5, 0, 0));

    let matches = report_matches(&f.store, f.tid, day(27), None).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].stage, MatchStage::Qualifying);
}

#[test]
fn completed_scope_drops_scheduled_matches() {
    let mut f = fixture();
    let m = Match::new(f.tid, f.main_venue, f.team_a, f.team_b, day(27), time(10, 0), 1, MatchStage::Qualifying);
    f.store.add_match(completed(m, 1, 0, 0, 0));
    let scheduled = Match::new(f.tid, f.main_venue, f.team_a, f.team_b, day(27), time(11, 0), 2, MatchStage::Qualifying);
    f.store.add_match(scheduled);

    assert_eq!(report_matches(&f.store, f.tid, day(27), None).unwrap().len(), 2);
    let done = completed_report_matches(&f.store, f.tid, day(27), None).unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].match_order, 1);
}

#[test]
fn matches_sort_by_venue_then_order() {
    let mut f = fixture();
    // Inserted out of order on purpose.
    let m = Match::new(f.tid, f.finals_venue, f.team_a, f.team_b, day(27), time(9, 0), 1, MatchStage::Qualifying);
    f.store.add_match(completed(m, 0, 0, 0, 0));
    let m = Match::new(f.tid, f.main_venue, f.team_a, f.team_b, day(27), time(11, 0), 2, MatchStage::Qualifying);
    f.store.add_match(completed(m, 0, 0, 0, 0));
    let m = Match::new(f.tid, f.main_venue, f.team_b, f.team_a, day(27), time(10, 0), 1, MatchStage::Qualifying);
    f.store.add_match(completed(m, 0, 0, 0, 0));

    let matches = report_matches(&f.store, f.tid, day(27), None).unwrap();
    let order: Vec<(i64, i32)> = matches.iter().map(|m| (m.venue_id, m.match_order)).collect();
    assert_eq!(
        order,
        vec![(f.main_venue, 1), (f.main_venue, 2), (f.finals_venue, 1)]
    );

    let only_main = report_matches(&f.store, f.tid, day(27), Some(f.main_venue)).unwrap();
    assert_eq!(only_main.len(), 2);
}

#[test]
fn unknown_tournament_is_a_not_found_error() {
    let f = fixture();
    let err = report_matches(&f.store, 99, day(27), None).unwrap_err();
    assert!(matches!(err, ReportError::TournamentNotFound(99)));
    assert!(err.is_not_found());
}

#[test]
fn report_data_carries_relations_recipients_and_stamp() {
    let mut f = fixture();
    let m = Match::new(f.tid, f.main_venue, f.team_a, f.team_b, day(27), time(10, 0), 1, MatchStage::Qualifying);
    let mid = f.store.add_match(completed(m, 2, 1, 0, 1));
    f.store.add_goal(Goal::new(mid, f.team_a, 2, 11, "田中"));
    f.store.add_goal(Goal::new(mid, f.team_a, 1, 40, "佐藤"));
    f.store.add_recipient(f.tid, "埼玉新聞", "スポーツ部");

    let data = report_data(&f.store, f.tid, day(27), None).unwrap();
    assert_eq!(data.date, "2026-03-27");
    assert_eq!(data.tournament.name, "浦和カップ2026");
    assert!(data.venue.is_none());
    assert_eq!(data.recipients.len(), 1);
    assert_eq!(data.generated_by, "浦和カップ運営事務局");

    assert_eq!(data.matches.len(), 1);
    let detail = &data.matches[0];
    assert_eq!(detail.venue_name, "駒場スタジアム");
    assert_eq!(detail.home_team.short_name, "浦和R");
    assert_eq!(detail.away_team.name, "大宮アルディージャ");
    // Goals come back sorted by half then minute.
    let order: Vec<i32> = detail.goals.iter().map(|g| g.minute).collect();
    assert_eq!(order, vec![40, 11]);
}

#[test]
fn report_data_uses_configured_sender_organization() {
    let mut f = fixture();
    if let Some(t) = f.store.tournament_mut(f.tid) {
        t.sender_organization = Some("大会本部".to_string());
    }
    let data = report_data(&f.store, f.tid, day(27), None).unwrap();
    assert_eq!(data.generated_by, "大会本部");
}

#[test]
fn venue_sections_group_rows_in_venue_order() {
    let mut f = fixture();
    let m = Match::new(f.tid, f.finals_venue, f.team_a, f.team_b, day(27), time(9, 0), 1, MatchStage::Qualifying);
    f.store.add_match(completed(m, 1, 0, 0, 0));
    let m = Match::new(f.tid, f.main_venue, f.team_b, f.team_a, day(27), time(10, 0), 1, MatchStage::Qualifying);
    f.store.add_match(completed(m, 0, 0, 2, 0));

    let sections = venue_sections(&f.store, f.tid, day(27), None).unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].venue_name, "駒場スタジアム");
    assert_eq!(sections[1].venue_name, "レッズランド");
    assert_eq!(sections[0].rows.len(), 1);
    assert_eq!(sections[0].rows[0].score_total, "0-2");
}

#[test]
fn final_day_scope_takes_knockout_stage_or_finals_venue() {
    let mut f = fixture();
    // Semifinal at the main venue: in scope through its stage.
    let m = Match::new(f.tid, f.main_venue, f.team_a, f.team_b, day(28), time(9, 0), 1, MatchStage::Semifinal);
    f.store.add_match(m);
    // Qualifying at the finals venue: in scope through the venue.
    let m = Match::new(f.tid, f.finals_venue, f.team_a, f.team_b, day(28), time(9, 30), 1, MatchStage::Qualifying);
    f.store.add_match(m);
    // Qualifying at the main venue: out of scope.
    let m = Match::new(f.tid, f.main_venue, f.team_b, f.team_a, day(28), time(10, 0), 2, MatchStage::Qualifying);
    f.store.add_match(m);
    // Training at the finals venue: always out.
    let m = Match::new(f.tid, f.finals_venue, f.team_b, f.team_a, day(28), time(11, 0), 2, MatchStage::Training);
    f.store.add_match(m);

    let matches = final_day_matches(&f.store, f.tid, day(28)).unwrap();
    assert_eq!(matches.len(), 2);

    let err = final_day_matches(&f.store, f.tid, day(29)).unwrap_err();
    assert!(matches!(err, ReportError::FinalDayNotFound(_)));
    assert!(err.is_not_found());
}

#[test]
fn finals_bracket_splits_by_stage_and_requires_completed_results() {
    let mut f = fixture();
    let m = Match::new(f.tid, f.finals_venue, f.team_a, f.team_b, day(28), time(10, 0), 2, MatchStage::Semifinal);
    f.store.add_match(completed(m, 0, 1, 0, 0));
    let m = Match::new(f.tid, f.finals_venue, f.team_b, f.team_a, day(28), time(9, 0), 1, MatchStage::Semifinal);
    f.store.add_match(completed(m, 2, 0, 0, 0));
    let m = Match::new(f.tid, f.finals_venue, f.team_a, f.team_b, day(28), time(13, 0), 3, MatchStage::ThirdPlace);
    f.store.add_match(completed(m, 1, 1, 0, 0));
    let m = Match::new(f.tid, f.finals_venue, f.team_a, f.team_b, day(28), time(14, 0), 4, MatchStage::Final);
    f.store.add_match(completed(m, 0, 0, 1, 0));
    // A scheduled final must not leak into the bracket.
    let m = Match::new(f.tid, f.finals_venue, f.team_b, f.team_a, day(29), time(14, 0), 5, MatchStage::Final);
    f.store.add_match(m);

    let bracket = finals_bracket(&f.store, f.tid).unwrap();
    assert_eq!(bracket.semifinals.len(), 2);
    // Semifinals come out in match order.
    assert_eq!(bracket.semifinals[0].match_order, 1);
    assert!(bracket.third_place.is_some());
    let final_match = bracket.final_match.unwrap();
    assert_eq!(final_match.match_order, 4);
}

#[test]
fn finals_bracket_errors_before_any_completed_knockout_match() {
    let mut f = fixture();
    let m = Match::new(f.tid, f.finals_venue, f.team_a, f.team_b, day(28), time(14, 0), 1, MatchStage::Final);
    f.store.add_match(m); // scheduled only

    let err = finals_bracket(&f.store, f.tid).unwrap_err();
    assert!(matches!(err, ReportError::FinalsNotFound));
}

#[test]
fn standings_scope_orders_by_group_then_rank() {
    let mut f = fixture();
    let rows = [
        ("B", 2, f.team_a),
        ("A", 1, f.team_a),
        ("B", 1, f.team_b),
        ("A", 2, f.team_b),
    ];
    for (group, rank, team) in rows {
        f.store.add_standing(Standing {
            tournament_id: f.tid,
            group_id: group.to_string(),
            team_id: team,
            rank,
            played: 3,
            won: 1,
            drawn: 1,
            lost: 1,
            goals_for: 4,
            goals_against: 4,
            goal_difference: 0,
        });
    }

    let all = standings_scope(&f.store, f.tid, None).unwrap();
    let order: Vec<(String, i32)> = all.iter().map(|s| (s.group_id.clone(), s.rank)).collect();
    assert_eq!(
        order,
        vec![
            ("A".to_string(), 1),
            ("A".to_string(), 2),
            ("B".to_string(), 1),
            ("B".to_string(), 2),
        ]
    );

    let group_a = standings_scope(&f.store, f.tid, Some("A")).unwrap();
    assert_eq!(group_a.len(), 2);
}

#[test]
fn summary_counts_matches_goals_and_stages() {
    let mut f = fixture();
    let m = Match::new(f.tid, f.main_venue, f.team_a, f.team_b, day(27), time(10, 0), 1, MatchStage::Qualifying);
    let mid = f.store.add_match(completed(m, 2, 0, 1, 0));
    let m = Match::new(f.tid, f.main_venue, f.team_b, f.team_a, day(27), time(11, 0), 2, MatchStage::Qualifying);
    f.store.add_match(completed(m, 0, 0, 0, 0));
    let m = Match::new(f.tid, f.finals_venue, f.team_a, f.team_b, day(28), time(14, 0), 1, MatchStage::Final);
    f.store.add_match(m); // scheduled
    f.store.add_goal(Goal::new(mid, f.team_a, 1, 5, "田中"));
    f.store.add_goal(Goal::new(mid, f.team_a, 2, 25, "田中"));

    // A second tournament must not leak into the counts.
    let other = f.store.add_tournament(Tournament::new("別大会"));
    let ov = f.store.add_venue(Venue::new(other, "別会場", false));
    let ot = f.store.add_team(Team::new(other, "別チーム", ""));
    let m = Match::new(other, ov, ot, ot, day(27), time(10, 0), 1, MatchStage::Qualifying);
    let omid = f.store.add_match(completed(m, 1, 0, 0, 0));
    f.store.add_goal(Goal::new(omid, ot, 1, 1, "誰か"));

    let summary = tournament_summary(&f.store, f.tid).unwrap();
    assert_eq!(summary.tournament_name, "浦和カップ2026");
    assert_eq!(summary.team_count, 2);
    assert_eq!(summary.total_matches, 3);
    assert_eq!(summary.completed_matches, 2);
    assert!((summary.completion_rate - 66.7).abs() < 1e-9);
    assert_eq!(summary.total_goals, 2);
    assert_eq!(summary.stage_counts.get("qualifying"), Some(&2));
    assert_eq!(summary.stage_counts.get("final"), Some(&1));
    // Stages with no matches stay out of the map.
    assert!(!summary.stage_counts.contains_key("training"));
}

#[test]
fn summary_of_empty_tournament_has_zero_rate() {
    let f = fixture();
    let summary = tournament_summary(&f.store, f.tid).unwrap();
    assert_eq!(summary.total_matches, 0);
    assert_eq!(summary.completion_rate, 0.0);
}

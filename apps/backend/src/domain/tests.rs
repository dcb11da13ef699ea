use std::time::Duration;

use time::OffsetDateTime;

use crate::domain::round::{parse_pick, Round};
use crate::errors::DomainError;

fn open_round() -> Round {
    Round::open(OffsetDateTime::now_utc(), Duration::from_secs(20))
}

#[test]
fn closes_at_is_opened_at_plus_duration() {
    let round = open_round();
    assert_eq!(round.closes_at - round.opened_at, Duration::from_secs(20));
    assert!(round.players.is_empty());
    assert!(round.winning_number.is_none());
}

#[test]
fn join_registers_without_pick() {
    let mut round = open_round();
    round.join("alice").unwrap();
    let entry = round.player("alice").unwrap();
    assert_eq!(entry.pick, None);
}

#[test]
fn duplicate_join_is_rejected() {
    let mut round = open_round();
    round.join("alice").unwrap();
    assert_eq!(round.join("alice"), Err(DomainError::AlreadyJoined));
    assert_eq!(round.players.len(), 1);
}

#[test]
fn pick_requires_join() {
    let mut round = open_round();
    assert_eq!(round.submit_pick("ghost", 5), Err(DomainError::NotJoined));
    assert!(round.players.is_empty());
}

#[test]
fn pick_out_of_range_is_rejected_and_mutates_nothing() {
    let mut round = open_round();
    round.join("alice").unwrap();
    for bad in [0, 11, -1, 100, i64::MIN, i64::MAX] {
        assert_eq!(round.submit_pick("alice", bad), Err(DomainError::InvalidPick));
    }
    assert_eq!(round.player("alice").unwrap().pick, None);
}

#[test]
fn range_validation_precedes_membership() {
    // An out-of-range pick by an unknown player reports INVALID_PICK.
    let mut round = open_round();
    assert_eq!(round.submit_pick("ghost", 0), Err(DomainError::InvalidPick));
}

#[test]
fn second_pick_is_rejected_and_original_preserved() {
    let mut round = open_round();
    round.join("alice").unwrap();
    round.submit_pick("alice", 7).unwrap();
    assert_eq!(round.submit_pick("alice", 3), Err(DomainError::AlreadyPicked));
    assert_eq!(round.player("alice").unwrap().pick, Some(7));
}

#[test]
fn leave_is_a_full_removal() {
    let mut round = open_round();
    round.join("alice").unwrap();
    round.submit_pick("alice", 4).unwrap();
    round.leave("alice");
    assert!(round.player("alice").is_none());

    // join -> leave -> join succeeds, with no pick carried over
    round.join("alice").unwrap();
    assert_eq!(round.player("alice").unwrap().pick, None);
}

#[test]
fn leave_of_absent_player_is_a_noop() {
    let mut round = open_round();
    round.join("alice").unwrap();
    round.leave("bob");
    assert_eq!(round.players.len(), 1);
}

#[test]
fn winners_are_exactly_matching_picks() {
    let mut round = open_round();
    round.join("alice").unwrap();
    round.join("bob").unwrap();
    round.join("carol").unwrap();
    round.join("dave").unwrap();
    round.submit_pick("alice", 7).unwrap();
    round.submit_pick("bob", 7).unwrap();
    round.submit_pick("carol", 3).unwrap();
    // dave never picks

    let winners = round.winners(7);
    let names: Vec<_> = winners.iter().map(|w| w.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob"]);

    // a pickless player never wins, whatever the draw
    for winning in 1..=10 {
        assert!(round
            .winners(winning)
            .iter()
            .all(|w| w.username != "dave"));
    }
}

#[test]
fn parse_pick_accepts_full_range() {
    for v in 1..=10 {
        assert_eq!(parse_pick(v), Ok(v as u8));
    }
}

//! Model-based property: for any sequence of join/pick/leave calls
//! against one open round, the player set equals the set implied by
//! applying each operation's documented effect in order.

use std::time::Duration;

use proptest::prelude::*;
use time::OffsetDateTime;

use crate::domain::round::{Round, PICK_MAX, PICK_MIN};

#[derive(Debug, Clone)]
enum Op {
    Join(String),
    Pick(String, i64),
    Leave(String),
}

fn username_strategy() -> impl Strategy<Value = String> {
    // Small pool so sequences actually collide on identities.
    prop::sample::select(vec![
        "alice".to_string(),
        "bob".to_string(),
        "carol".to_string(),
        "dave".to_string(),
    ])
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        username_strategy().prop_map(Op::Join),
        (username_strategy(), -2i64..14).prop_map(|(u, v)| Op::Pick(u, v)),
        username_strategy().prop_map(Op::Leave),
    ]
}

/// Reference model: ordered (username, pick) pairs with the documented
/// semantics applied naively.
fn apply_model(model: &mut Vec<(String, Option<u8>)>, op: &Op) {
    match op {
        Op::Join(u) => {
            if !model.iter().any(|(name, _)| name == u) {
                model.push((u.clone(), None));
            }
        }
        Op::Pick(u, v) => {
            if !(i64::from(PICK_MIN)..=i64::from(PICK_MAX)).contains(v) {
                return;
            }
            if let Some((_, pick)) = model.iter_mut().find(|(name, _)| name == u) {
                if pick.is_none() {
                    *pick = Some(*v as u8);
                }
            }
        }
        Op::Leave(u) => model.retain(|(name, _)| name != u),
    }
}

proptest! {
    #[test]
    fn round_matches_reference_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut round = Round::open(OffsetDateTime::now_utc(), Duration::from_secs(20));
        let mut model: Vec<(String, Option<u8>)> = Vec::new();

        for op in &ops {
            match op {
                Op::Join(u) => {
                    let _ = round.join(u);
                }
                Op::Pick(u, v) => {
                    let _ = round.submit_pick(u, *v);
                }
                Op::Leave(u) => round.leave(u),
            }
            apply_model(&mut model, op);
        }

        let actual: Vec<(String, Option<u8>)> = round
            .players
            .iter()
            .map(|p| (p.username.clone(), p.pick))
            .collect();
        prop_assert_eq!(actual, model);
    }

    #[test]
    fn no_duplicate_identities(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut round = Round::open(OffsetDateTime::now_utc(), Duration::from_secs(20));
        for op in &ops {
            match op {
                Op::Join(u) => {
                    let _ = round.join(u);
                }
                Op::Pick(u, v) => {
                    let _ = round.submit_pick(u, *v);
                }
                Op::Leave(u) => round.leave(u),
            }
            let mut names: Vec<_> = round.players.iter().map(|p| &p.username).collect();
            names.sort();
            let before = names.len();
            names.dedup();
            prop_assert_eq!(before, names.len());
        }
    }
}

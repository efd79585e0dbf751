use holdem_engine::config::TableConfig;
use holdem_engine::errors::GameError;
use holdem_engine::logger::HandRecord;
use holdem_engine::player::PlayerAction;
use holdem_tables::{
    init_test_logging, LeaveReason, SeatChange, Settings, TableError, TableEvent, TableRegistry,
};

fn registry(seed: u64) -> TableRegistry {
    TableRegistry::new(TableConfig {
        seed: Some(seed),
        ..TableConfig::default()
    })
    .unwrap()
}

fn table_with(reg: &TableRegistry, names: &[&str]) -> String {
    let id = reg.create_table(names[0]).unwrap();
    for name in &names[1..] {
        reg.join(&id, name).unwrap();
    }
    id
}

/// Checks or calls for whoever is up until the hand settles. Returns every
/// event produced along the way.
fn play_passively(reg: &TableRegistry, id: &str) -> Vec<TableEvent> {
    let mut events = Vec::new();
    for _ in 0..64 {
        let snap = reg.snapshot(id, None).unwrap();
        if !snap.hand_in_progress {
            return events;
        }
        let seat = snap.current_actor.expect("someone is to act");
        let me = &snap.seats[seat];
        let action = if me.bet < snap.highest_bet {
            PlayerAction::Call
        } else {
            PlayerAction::Check
        };
        events.extend(reg.act(id, &me.name, action).unwrap());
    }
    panic!("hand did not settle");
}

fn kinds(events: &[TableEvent]) -> Vec<&'static str> {
    events.iter().map(TableEvent::kind).collect()
}

#[test]
fn heads_up_hand_runs_to_showdown() {
    let reg = registry(1);
    let id = table_with(&reg, &["ann", "bob"]);

    let start = reg.start_hand(&id).unwrap();
    assert_eq!(kinds(&start), vec!["hand_started", "turn_changed"]);
    assert!(matches!(
        &start[1],
        TableEvent::TurnChanged { seat: 0, name, .. } if name == "ann"
    ));

    let events = play_passively(&reg, &id);
    let streets = events
        .iter()
        .filter(|e| matches!(e, TableEvent::StreetDealt { .. }))
        .count();
    assert_eq!(streets, 3);
    match events.last() {
        Some(TableEvent::HandSettled {
            payouts, showdown, ..
        }) => {
            assert!(*showdown);
            assert_eq!(payouts.iter().map(|p| p.amount).sum::<u32>(), 20);
        }
        other => panic!("expected settlement, got {:?}", other),
    }

    let snap = reg.snapshot(&id, None).unwrap();
    assert_eq!(snap.total_chips(), 2000);
    assert_eq!(snap.dealer, 1);
    assert!(!snap.hand_in_progress);
}

#[test]
fn illegal_action_is_returned_and_changes_nothing() {
    let reg = registry(2);
    let id = table_with(&reg, &["ann", "bob"]);
    reg.start_hand(&id).unwrap();
    let before = reg.snapshot(&id, None).unwrap();

    let err = reg.act(&id, "bob", PlayerAction::Check).unwrap_err();
    assert!(matches!(
        err,
        TableError::Game(GameError::NotPlayersTurn { expected: 0, actual: 1 })
    ));
    let err = reg.act(&id, "ann", PlayerAction::Check).unwrap_err();
    assert_eq!(err.error_code(), "illegal_action");

    assert_eq!(reg.snapshot(&id, None).unwrap(), before);
}

#[test]
fn seat_changes_wait_for_the_hand_to_end() {
    let reg = registry(3);
    let id = table_with(&reg, &["ann", "bob", "cat"]);
    reg.start_hand(&id).unwrap();

    let queued = reg.join(&id, "dan").unwrap();
    assert_eq!(
        queued,
        vec![TableEvent::SeatChangeQueued {
            table_id: id.clone(),
            change: SeatChange::Join("dan".into()),
        }]
    );
    reg.leave(&id, "bob").unwrap();
    let mid = reg.snapshot(&id, None).unwrap();
    assert_eq!(mid.seats.len(), 3);
    assert!(mid.seat("dan").is_none());
    assert!(mid.seat("bob").is_some());

    reg.act(&id, "ann", PlayerAction::Fold).unwrap();
    let events = reg.act(&id, "bob", PlayerAction::Fold).unwrap();
    let tail: Vec<&str> = kinds(&events).into_iter().skip(1).collect();
    // Queued changes apply in the order they were requested
    assert_eq!(tail, vec!["hand_settled", "player_joined", "player_left"]);

    let after = reg.snapshot(&id, None).unwrap();
    let names: Vec<&str> = after.seats.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["ann", "cat", "dan"]);
    // bob left with 995; cat won the blinds; dan brought a fresh stack
    assert_eq!(after.total_chips(), 1000 + 1005 + 1000);
}

#[test]
fn table_is_torn_down_below_two_seats() {
    let reg = registry(4);
    let id = table_with(&reg, &["ann", "bob"]);
    let events = reg.leave(&id, "bob").unwrap();
    assert_eq!(
        events,
        vec![
            TableEvent::PlayerLeft {
                table_id: id.clone(),
                name: "bob".into(),
                reason: LeaveReason::Requested,
            },
            TableEvent::TableClosed {
                table_id: id.clone()
            },
        ]
    );
    assert!(reg.is_empty());
    assert!(matches!(reg.snapshot(&id, None), Err(TableError::NotFound(_))));
}

#[test]
fn busted_player_is_removed_and_table_closes() {
    let reg = registry(5);
    let id = table_with(&reg, &["ann", "bob"]);
    reg.start_hand(&id).unwrap();
    reg.act(&id, "ann", PlayerAction::Raise(1000)).unwrap();
    let events = reg.act(&id, "bob", PlayerAction::Call).unwrap();

    let settled = events
        .iter()
        .position(|e| matches!(e, TableEvent::HandSettled { .. }))
        .expect("all-in run-out settles without further input");
    assert_eq!(
        events[1..settled]
            .iter()
            .filter(|e| matches!(e, TableEvent::StreetDealt { .. }))
            .count(),
        3
    );

    let split = match &events[settled] {
        TableEvent::HandSettled { payouts, .. } => payouts.len() == 2,
        _ => unreachable!(),
    };
    if split {
        // Chopped pot: both keep 1000 and the table stays open
        assert_eq!(reg.len(), 1);
    } else {
        assert!(events.iter().any(|e| matches!(
            e,
            TableEvent::PlayerLeft {
                reason: LeaveReason::Busted,
                ..
            }
        )));
        assert!(matches!(events.last(), Some(TableEvent::TableClosed { .. })));
        assert!(reg.is_empty());
    }
}

#[test]
fn viewer_snapshot_hides_opponent_cards() {
    let reg = registry(6);
    let id = table_with(&reg, &["ann", "bob"]);
    reg.start_hand(&id).unwrap();

    let ann = reg.snapshot(&id, Some("ann")).unwrap();
    assert_eq!(ann.seat("ann").unwrap().hand.len(), 2);
    assert!(ann.seat("bob").unwrap().hand.is_empty());
    assert!(ann.seat("ann").unwrap().is_current);
}

#[test]
fn settled_hands_are_appended_to_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands").join("history.jsonl");
    let settings = Settings {
        table: TableConfig {
            seed: Some(7),
            ..TableConfig::default()
        },
        history_path: Some(path.clone()),
    };
    let reg = TableRegistry::from_settings(&settings).unwrap();
    let id = table_with(&reg, &["ann", "bob", "cat"]);

    for _ in 0..2 {
        reg.start_hand(&id).unwrap();
        play_passively(&reg, &id);
    }

    let content = std::fs::read_to_string(&path).unwrap();
    let records: Vec<HandRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_ne!(records[0].hand_id, records[1].hand_id);
    assert_eq!(records[0].seed, 7);
    assert_eq!(records[0].board.len(), 5);
    assert_eq!(records[1].dealer, 1);
    assert!(records.iter().all(|r| r.ts.is_some()));
    assert_eq!(
        records[0].payouts.iter().map(|p| p.amount).sum::<u32>(),
        30
    );
}

#[test]
fn table_creation_is_logged() {
    let logs = init_test_logging();
    let reg = registry(8);
    let id = reg.create_table("ann").unwrap();

    let created = logs.find("table created");
    assert!(created
        .iter()
        .any(|e| e.field("table_id").is_some_and(|v| v.contains(&id))));
}

use holdem_engine::config::TableConfig;
use holdem_engine::player::PlayerAction;
use holdem_tables::TableRegistry;

fn finish_hand(reg: &TableRegistry, id: &str) {
    loop {
        let snap = reg.snapshot(id, None).unwrap();
        if !snap.hand_in_progress {
            return;
        }
        let seat = snap.current_actor.unwrap();
        let me = &snap.seats[seat];
        let action = if me.bet < snap.highest_bet {
            PlayerAction::Call
        } else {
            PlayerAction::Check
        };
        reg.act(id, &me.name, action).unwrap();
    }
}

#[test]
fn independent_tables_progress_in_parallel() {
    let reg = TableRegistry::new(TableConfig::default()).unwrap();
    let ids: Vec<String> = (0..8)
        .map(|t| {
            let id = reg.create_table(&format!("host{}", t)).unwrap();
            reg.join(&id, &format!("guest{}", t)).unwrap();
            reg.join(&id, &format!("third{}", t)).unwrap();
            id
        })
        .collect();

    std::thread::scope(|s| {
        for id in &ids {
            let reg = &reg;
            s.spawn(move || {
                for _ in 0..10 {
                    reg.start_hand(id).unwrap();
                    finish_hand(reg, id);
                    assert_eq!(reg.snapshot(id, None).unwrap().total_chips(), 3000);
                }
            });
        }
    });

    assert_eq!(reg.len(), 8);
    for id in &ids {
        let snap = reg.snapshot(id, None).unwrap();
        assert_eq!(snap.total_chips(), 3000);
        assert_eq!(snap.dealer, 10 % 3);
    }
}

#[test]
fn racing_actions_on_one_table_apply_one_at_a_time() {
    let reg = TableRegistry::new(TableConfig {
        seed: Some(21),
        ..TableConfig::default()
    })
    .unwrap();
    let id = reg.create_table("ann").unwrap();
    reg.join(&id, "bob").unwrap();
    reg.start_hand(&id).unwrap();

    // Both seats try to call at once; only the seat whose turn it is succeeds
    let results: Vec<bool> = std::thread::scope(|s| {
        let handles: Vec<_> = ["ann", "bob"]
            .into_iter()
            .map(|name| {
                let reg = &reg;
                let id = &id;
                s.spawn(move || reg.act(id, name, PlayerAction::Call).is_ok())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let snap = reg.snapshot(&id, None).unwrap();
    assert_eq!(snap.total_chips(), 2000);
    // ann's call always lands; bob may land afterwards as a check-equivalent call
    assert!(results[0]);
    assert_eq!(snap.pot, 20);
}

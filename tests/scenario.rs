use backprop_walkthrough::{NetworkState, Sequencer, WalkthroughConfig, WalkthroughError, WeightId, CATALOG};

fn temp_path(name: &str) -> String {
    let mut path = std::env::temp_dir();
    path.push(format!("backprop-walkthrough-{}-{name}", std::process::id()));
    path.to_string_lossy().into_owned()
}

#[test]
fn saved_scenario_loads_back() {
    let path = temp_path("roundtrip.json");
    let mut state = NetworkState::initial().with_weights([(WeightId::W1, 0.9)]);
    state.learning_rate = 0.1;
    state.save_json(&path).unwrap();

    let loaded = NetworkState::load_json(&path).unwrap();
    assert_eq!(loaded, state);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn invalid_scenario_is_rejected() {
    let path = temp_path("bad-lr.json");
    let mut state = NetworkState::initial();
    state.learning_rate = -1.0;
    state.save_json(&path).unwrap();

    let err = NetworkState::load_json(&path).unwrap_err();
    assert!(matches!(err, WalkthroughError::InvalidScenario(_)));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_is_io_error() {
    let err = NetworkState::load_json(&temp_path("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, WalkthroughError::Io(_)));
}

#[test]
fn malformed_json_is_json_error() {
    let path = temp_path("garbage.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = NetworkState::load_json(&path).unwrap_err();
    assert!(matches!(err, WalkthroughError::Json(_)));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn invalid_starting_state_is_rejected_without_a_file() {
    let mut negative_rate = NetworkState::initial();
    negative_rate.learning_rate = -5.0;
    let err = Sequencer::new(&CATALOG, WalkthroughConfig::new(negative_rate)).unwrap_err();
    assert!(matches!(err, WalkthroughError::InvalidScenario(_)));

    let nan_weight = NetworkState::initial().with_weights([(WeightId::W1, f64::NAN)]);
    let err = Sequencer::new(&CATALOG, WalkthroughConfig::new(nan_weight)).unwrap_err();
    assert!(matches!(err, WalkthroughError::InvalidScenario(ref msg) if msg.contains("w1")));
}

#[test]
fn custom_scenario_reduces_its_own_error() {
    let mut initial = NetworkState::initial().with_weights([
        (WeightId::W1, -0.3),
        (WeightId::W6, 0.9),
    ]);
    initial.learning_rate = 0.25;
    initial.targets.o1 = 0.5;

    let mut seq = Sequencer::new(&CATALOG, WalkthroughConfig::new(initial.clone())).unwrap();
    seq.jump_to(seq.total_steps() - 1).unwrap();
    assert!(seq.error_summary().reduction().unwrap() > 0.0);

    seq.reset().unwrap();
    assert_eq!(seq.current_state(), &initial);
}

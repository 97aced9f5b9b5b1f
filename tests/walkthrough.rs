use backprop_walkthrough::{
    fold_up_to, NetworkState, PreviousMode, Quantity, Sequencer, StepKind, WalkthroughConfig,
    WalkthroughError, CATALOG,
};

const TOL: f64 = 1e-7;

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < TOL,
        "{what}: expected {expected}, got {actual}"
    );
}

fn sequencer() -> Sequencer<'static> {
    Sequencer::new(&CATALOG, WalkthroughConfig::default()).unwrap()
}

fn final_state() -> NetworkState {
    fold_up_to(&CATALOG, &NetworkState::initial(), CATALOG.len() - 1)
        .unwrap()
        .state
}

#[test]
fn forward_pass_matches_worked_example() {
    let s = final_state();
    let v = |q| s.value(q).unwrap();
    assert_close(v(Quantity::NetH1), 0.3775, "net_h1");
    assert_close(v(Quantity::OutH1), 0.593_269_992, "out_h1");
    assert_close(v(Quantity::NetH2), 0.3925, "net_h2");
    assert_close(v(Quantity::OutH2), 0.596_884_378, "out_h2");
    assert_close(v(Quantity::NetO1), 1.105_905_967, "net_o1");
    assert_close(v(Quantity::OutO1), 0.751_365_070, "out_o1");
    assert_close(v(Quantity::NetO2), 1.224_921_404, "net_o2");
    assert_close(v(Quantity::OutO2), 0.772_928_465, "out_o2");
}

#[test]
fn error_matches_worked_example() {
    let s = final_state();
    let v = |q| s.value(q).unwrap();
    assert_close(v(Quantity::ErrorO1), 0.274_811_083, "E_o1");
    assert_close(v(Quantity::ErrorO2), 0.023_560_026, "E_o2");
    assert_close(v(Quantity::ErrorTotal), 0.298_371_109, "E_total");
    assert_eq!(v(Quantity::InitialError), v(Quantity::ErrorTotal));
}

#[test]
fn output_layer_gradients_and_updates() {
    let s = final_state();
    let v = |q| s.value(q).unwrap();
    assert_close(v(Quantity::DeltaO1), 0.138_498_562, "delta_o1");
    assert_close(v(Quantity::GradW5), 0.082_167_041, "dE_dw5");
    assert_close(s.weights.w5, 0.358_916_480, "w5");
    assert_close(s.weights.w6, 0.408_666_186, "w6");
    assert_close(s.weights.w7, 0.511_301_270, "w7");
    assert_close(s.weights.w8, 0.561_370_121, "w8");
}

#[test]
fn hidden_error_terms_sum_both_outputs() {
    let s = final_state();
    let v = |q| s.value(q).unwrap();
    let initial = NetworkState::initial().weights;

    let out_h1 = v(Quantity::OutH1);
    let expected = (v(Quantity::DeltaO1) * initial.w5 + v(Quantity::DeltaO2) * initial.w7)
        * out_h1
        * (1.0 - out_h1);
    assert!((v(Quantity::DeltaH1) - expected).abs() < 1e-15);

    // Only the o1 branch would give a visibly different term.
    let o1_only = v(Quantity::DeltaO1) * initial.w5 * out_h1 * (1.0 - out_h1);
    assert!((v(Quantity::DeltaH1) - o1_only).abs() > 1e-5);

    assert_close(v(Quantity::GradW1), 0.000_438_568, "dE_dw1");
    assert_close(s.weights.w1, 0.149_780_716, "w1");
    assert_close(s.weights.w2, 0.199_561_432, "w2");
    assert_close(s.weights.w3, 0.249_751_144, "w3");
    assert_close(s.weights.w4, 0.299_502_287, "w4");
}

#[test]
fn biases_are_not_trained() {
    let s = final_state();
    let initial = NetworkState::initial();
    assert_eq!(s.weights.b1, initial.weights.b1);
    assert_eq!(s.weights.b2, initial.weights.b2);
}

#[test]
fn error_goes_down_after_one_iteration() {
    let mut seq = sequencer();
    seq.jump_to(CATALOG.len() - 1).unwrap();
    let summary = seq.error_summary();
    assert_close(summary.initial_error.unwrap(), 0.298_371_109, "initial");
    assert_close(summary.current_error.unwrap(), 0.291_027_774, "after update");
    assert!(summary.reduction().unwrap() > 0.0);
}

#[test]
fn jump_is_deterministic() {
    let mut seq = sequencer();
    for k in 0..seq.total_steps() {
        let a = seq.jump_to(k).unwrap();
        let b = seq.jump_to(k).unwrap();
        assert_eq!(a, b, "step {k}");
    }
}

#[test]
fn jump_equals_repeated_next() {
    let total = CATALOG.len();
    for k in 0..total {
        let mut stepped = sequencer();
        stepped.reset().unwrap();
        for _ in 0..k {
            stepped.next().unwrap();
        }
        let mut jumped = sequencer();
        jumped.jump_to(total - 1).unwrap();
        let snap = jumped.jump_to(k).unwrap();
        assert_eq!(stepped.snapshot(), snap, "step {k}");
        assert_eq!(stepped.current_result(), jumped.current_result(), "step {k}");
    }
}

#[test]
fn previous_recomputes_by_default() {
    let mut seq = sequencer();
    let total = seq.total_steps();
    seq.jump_to(total - 1).unwrap();
    for k in (0..total - 1).rev() {
        let snap = seq.previous().unwrap();
        let expected = fold_up_to(&CATALOG, &NetworkState::initial(), k).unwrap();
        assert_eq!(snap.index, k);
        assert_eq!(snap.state, expected.state, "step {k}");
    }
}

#[test]
fn view_only_previous_keeps_updated_weights() {
    let config = WalkthroughConfig::default().with_previous_mode(PreviousMode::ViewOnly);
    let mut seq = Sequencer::new(&CATALOG, config).unwrap();
    let last = seq.total_steps() - 1;
    let at_end = seq.jump_to(last).unwrap();

    let snap = seq.previous().unwrap();
    assert_eq!(snap.index, last - 1);
    assert_eq!(snap.state, at_end.state);

    let folded = fold_up_to(&CATALOG, &NetworkState::initial(), last - 1).unwrap();
    assert_ne!(snap.state, folded.state);
    assert_eq!(seq.current_result(), folded.result);
}

#[test]
fn derived_keys_only_grow() {
    let mut seq = sequencer();
    let mut previous = seq.current_state().clone();
    while !seq.is_last() {
        let snap = seq.next().unwrap();
        for key in previous.derived.keys() {
            assert!(snap.state.derived.contains(key), "step {} lost {key}", snap.index);
        }
        previous = snap.state;
    }
}

#[test]
fn weights_move_only_in_update_steps() {
    let mut seq = sequencer();
    let mut previous = seq.current_state().clone();
    while !seq.is_last() {
        let snap = seq.next().unwrap();
        let kind = seq.current_step().kind;
        if kind == StepKind::Update {
            assert_ne!(snap.state.weights, previous.weights, "step {}", snap.index);
        } else {
            assert_eq!(snap.state.weights, previous.weights, "step {}", snap.index);
        }
        previous = snap.state;
    }
}

#[test]
fn boundaries_are_no_ops() {
    let mut seq = sequencer();
    let at_start = seq.previous().unwrap();
    assert_eq!(at_start.index, 0);
    assert_eq!(at_start.state, NetworkState::initial());

    let last = seq.total_steps() - 1;
    let at_end = seq.jump_to(last).unwrap();
    assert_eq!(seq.next().unwrap(), at_end);
    assert!(seq.is_last());
}

#[test]
fn out_of_range_jump_leaves_state() {
    let mut seq = sequencer();
    seq.jump_to(12).unwrap();
    let before = seq.snapshot();
    let total = seq.total_steps();
    let err = seq.jump_to(total).unwrap_err();
    assert!(matches!(err, WalkthroughError::IndexOutOfRange { index, total: t } if index == total && t == total));
    assert_eq!(seq.snapshot(), before);
}

#[test]
fn reset_restores_initial_constant() {
    for k in [0, 1, 11, 18, 22] {
        let mut seq = sequencer();
        seq.jump_to(k).unwrap();
        let snap = seq.reset().unwrap();
        assert_eq!(snap.index, 0);
        assert_eq!(snap.state, NetworkState::initial());
        assert_eq!(seq.current_state(), seq.initial_state());
    }
}

#[test]
fn sequencers_are_independent() {
    let mut a = sequencer();
    let b = sequencer();
    a.jump_to(20).unwrap();
    assert_eq!(b.current_index(), 0);
    assert_eq!(b.current_state(), &NetworkState::initial());
}

#[test]
fn renders_first_forward_step() {
    let mut seq = sequencer();
    seq.next().unwrap();
    assert_eq!(seq.current_step().title, "Forward Pass: Net Input for h1");
    assert_eq!(seq.current_result(), "(0.15 * 0.05) + (0.2 * 0.1) + 0.35 = 0.3775");
}

use dissolve_core::{LayerMask, RelayKind, TriggerRelay};

const PLAYER: u8 = 8;
const ENEMY: u8 = 9;

#[test]
fn relay_forwards_matching_layers_only() {
    let mut relay = TriggerRelay::new(LayerMask::from_layer(PLAYER));

    assert!(relay.on_enter(PLAYER));
    assert!(!relay.on_enter(ENEMY));
    assert!(relay.on_exit(PLAYER));
    assert!(!relay.on_exit(ENEMY));

    // Not one-shot: keeps forwarding.
    assert!(relay.on_enter(PLAYER));
    assert!(!relay.has_triggered());
}

#[test]
fn one_shot_relay_fires_enter_once_then_goes_quiet() {
    let mut relay = TriggerRelay::new(LayerMask::from_layer(PLAYER)).one_shot();

    // Exits before the first enter still pass.
    assert!(relay.on_exit(PLAYER));

    assert!(relay.on_enter(PLAYER));
    assert!(relay.has_triggered());

    assert!(!relay.on_enter(PLAYER));
    assert!(!relay.on_exit(PLAYER));
}

#[test]
fn non_matching_enter_does_not_latch_one_shot() {
    let mut relay = TriggerRelay::new(LayerMask::from_layer(PLAYER)).one_shot();

    assert!(!relay.handle(RelayKind::Enter, ENEMY));
    assert!(!relay.has_triggered());
    assert!(relay.handle(RelayKind::Enter, PLAYER));
}

#[test]
fn empty_mask_never_fires() {
    let mut relay = TriggerRelay::new(LayerMask::NONE);
    for layer in 0..40u8 {
        assert!(!relay.on_enter(layer));
        assert!(!relay.on_exit(layer));
    }
}

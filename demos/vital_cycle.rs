//! Coupled Vital and Phase Machines
//!
//! A vital machine (`Dead`/`Alive`) changes only after a phase machine has
//! entered `Spawning` or `Dying`. The vital guard consumes the phase by
//! moving it back to `None`. A host loop calls `update()` once per frame.
//!
//! Run with: RUST_LOG=statewire=debug cargo run --example vital_cycle

use statewire::reactive::Output;
use statewire::{state_enum, StateMachine, Transition};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Vital {
        Dead,
        Alive,
    }
}

state_enum! {
    enum Phase {
        None,
        Spawning,
        Dying,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Coupled Vital Cycle ===\n");

    let vital = StateMachine::new(Vital::Dead);
    let phase = StateMachine::new(Phase::None);

    for (from, to, required) in [
        (Phase::None, Phase::Spawning, Vital::Dead),
        (Phase::None, Phase::Dying, Vital::Alive),
        (Phase::Spawning, Phase::None, Vital::Dead),
        (Phase::Dying, Phase::None, Vital::Alive),
    ] {
        let v = vital.downgrade();
        phase
            .define_transition(from, to)
            .when(move |_, _| v.upgrade().is_some_and(|v| v.is(&required)))
            .on_fire(|t| println!("  Triggered {t}"));
    }

    for (from, to, pending) in [
        (Vital::Dead, Vital::Alive, Phase::Spawning),
        (Vital::Alive, Vital::Dead, Phase::Dying),
    ] {
        let p = phase.downgrade();
        vital
            .define_transition(from, to)
            .when(move |_, _| {
                p.upgrade()
                    .is_some_and(|p| p.is(&pending) && p.next(Phase::None))
            })
            .on_fire(|t| println!("  Triggered {t}"));
    }

    vital
        .define_state(Vital::Alive)
        .on_update(|_| println!("  ...breathing"));
    vital
        .transitions()
        .subscribe(|t: &Transition<Vital>| println!("  vital is now {:?}", t.to));

    // Frame-by-frame script of what the host asks for.
    let script: [(Option<Phase>, Option<Vital>); 6] = [
        (None, Some(Vital::Alive)),
        (Some(Phase::Spawning), None),
        (None, Some(Vital::Alive)),
        (None, None),
        (Some(Phase::Dying), None),
        (None, Some(Vital::Dead)),
    ];

    for (frame, (phase_request, vital_request)) in script.into_iter().enumerate() {
        println!("frame {frame}: vital={:?} phase={:?}", vital.current(), phase.current());
        if let Some(target) = phase_request {
            if !phase.next(target) {
                println!("  phase refused {target:?}");
            }
        }
        if let Some(target) = vital_request {
            if !vital.next(target) {
                println!("  vital refused {target:?}");
            }
        }
        vital.update();
        phase.update();
    }

    println!("\n=== Example Complete ===");
}

//! Traffic Light State Machine
//!
//! A cyclic machine built with the builder API and driven by a timer.
//!
//! Key concepts:
//! - Cyclic state transitions (states repeat)
//! - Per-state `update` observers counting ticks
//! - Guards reading shared host state
//!
//! Run with: cargo run --example traffic_light

use statewire::builder::{guarded_transition, simple_transition, StateMachineBuilder};
use statewire::reactive::Output;
use statewire::state_enum;
use std::cell::Cell;
use std::rc::Rc;

state_enum! {
    enum TrafficLight {
        Red,
        Yellow,
        Green,
    }
}

const TICKS_PER_PHASE: u32 = 3;

fn main() -> Result<(), statewire::BuildError> {
    println!("=== Traffic Light State Machine ===\n");

    let elapsed = Rc::new(Cell::new(0u32));

    let ready = |elapsed: &Rc<Cell<u32>>| {
        let elapsed = Rc::clone(elapsed);
        move |_: &TrafficLight, _: &TrafficLight| elapsed.get() >= TICKS_PER_PHASE
    };

    let tick = Rc::clone(&elapsed);
    let machine = StateMachineBuilder::new()
        .initial(TrafficLight::Red)
        .transitions(vec![
            guarded_transition(TrafficLight::Red, TrafficLight::Green, ready(&elapsed)),
            guarded_transition(TrafficLight::Green, TrafficLight::Yellow, ready(&elapsed)),
            // Yellow is short.
            simple_transition(TrafficLight::Yellow, TrafficLight::Red),
        ])
        .on_state(TrafficLight::Red, {
            let tick = Rc::clone(&tick);
            move |_| tick.set(tick.get() + 1)
        })
        .on_state(TrafficLight::Green, move |_| tick.set(tick.get() + 1))
        .build()?;

    let reset = Rc::clone(&elapsed);
    machine.transitions().subscribe(move |t: &statewire::Transition<TrafficLight>| {
        println!("  {t}");
        reset.set(0);
    });

    println!("Initial state: {:?}\n", machine.current());
    println!("Transition sequence:");

    let cycle = [TrafficLight::Green, TrafficLight::Yellow, TrafficLight::Red];
    for step in 0..12 {
        machine.update();
        let target = cycle
            .iter()
            .copied()
            .find(|next| machine.find_transition(&machine.current(), next).is_some());
        if let Some(target) = target {
            if !machine.next(target) {
                println!("  tick {step}: holding {:?}", machine.current());
            }
        }
    }

    println!("\n=== Example Complete ===");
    Ok(())
}

//! End-to-end tests over a small composite.

mod support;

use earlgrey_soc::soc::{
    Component, ComponentDescriptor, ComponentId, LinkDef, MemMapEntry, PropDef, ResetPhases, ResetRoles,
    ResetStep, SignalDef, SocDefinition, SocGraph,
};
use support::*;

const A: usize = 0;
const B: usize = 1;
const C: usize = 2;
const D: usize = 3;
const E: usize = 4;

/// `{A; B.peer -> A; C.done -> B.go[0]; D at two addresses; E boot-integrity}`.
fn scenario() -> SocDefinition {
    SocDefinition {
        reset_roles: ResetRoles {
            boot_integrity: Some(E),
            ..ResetRoles::NONE
        },
        reset_phases: ResetPhases::BOOT_INTEGRITY,
        ..definition(vec![
            ComponentDescriptor::new(TYPE_PLAIN),
            ComponentDescriptor {
                link: leak(vec![LinkDef::new("peer", A)]),
                ..ComponentDescriptor::new(TYPE_PEER)
            },
            ComponentDescriptor {
                gpio: leak(vec![SignalDef::new(DONE, 0, B, GO, 0)]),
                ..ComponentDescriptor::new(TYPE_SOURCE)
            },
            ComponentDescriptor {
                memmap: leak(vec![
                    MemMapEntry::new(0x4000_0000),
                    MemMapEntry::new(0x2000_0000),
                ]),
                prop: leak(vec![PropDef::uint("size", 0x1000)]),
                ..ComponentDescriptor::new(TYPE_DUAL)
            },
            ComponentDescriptor {
                memmap: leak(vec![MemMapEntry::new(0x4100_0000)]),
                ..ComponentDescriptor::new(TYPE_INTEGRITY)
            },
        ])
    }
}

fn scenario_soc() -> SocGraph {
    build(&scenario()).unwrap()
}

/// Tests the whole scenario in one pass.
#[test]
fn test_end_to_end_scenario() {
    let mut soc = scenario_soc();
    assert_eq!(soc.len(), 5);

    // links
    assert_eq!(soc.link(ComponentId(B), "peer"), Some(ComponentId(A)));

    // signals
    assert_eq!(soc.input_level(ComponentId(B), GO, 0).unwrap(), 0);
    soc.raise(ComponentId(C), DONE, 0, 1).unwrap();
    assert_eq!(soc.input_level(ComponentId(B), GO, 0).unwrap(), 1);
    assert_eq!(soc.input_level(ComponentId(B), GO, 1).unwrap(), 0);

    // mapping
    let system = soc.address_space(0).unwrap();
    let (w, _) = system.find(0x4000_0000).unwrap();
    assert_eq!((w.owner, w.region), (ComponentId(D), 0));
    let (w, off) = system.find(0x2000_0ffc).unwrap();
    assert_eq!((w.owner, w.region, off), (ComponentId(D), 1, 0xffc));
    assert_eq!(soc.windows_of(ComponentId(D)).len(), 2);

    // reset
    soc.cold_reset().unwrap();
    let last = soc.reset_log().last().copied().unwrap();
    assert_eq!(last.component, ComponentId(E));
    assert_eq!(last.step, ResetStep::Release);
    assert!(soc.devices().all(|(id, _)| !soc.is_in_reset(id)));
}

/// Tests that signal levels survive a reset: nothing is rewired.
#[test]
fn test_reset_does_not_rewire() {
    let mut soc = scenario_soc();
    let edges = soc.signals().edge_count();
    soc.cold_reset().unwrap();
    soc.cold_reset().unwrap();

    assert_eq!(soc.signals().edge_count(), edges);
    soc.raise(ComponentId(C), DONE, 0, 1).unwrap();
    assert_eq!(soc.input_level(ComponentId(B), GO, 0).unwrap(), 1);
    assert_eq!(soc.reset_cycles(), 2);
}

/// Tests that every component is realized once construction returns.
#[test]
fn test_all_components_realized() {
    let soc = scenario_soc();
    assert!(soc.devices().all(|(_, d)| d.state().is_realized()));
    assert_eq!(soc.name(), "test-soc");
}

//! Integration tests for the two-phase reset protocol.

mod support;

use earlgrey_soc::common::{BuildError, ConfigurationError, ResetError};
use earlgrey_soc::soc::reset::PhaseHook;
use earlgrey_soc::soc::{
    Component, ComponentDescriptor, ComponentId, CompositeSignal, PinRef, ResetEvent, ResetPhase,
    ResetPhases, ResetRoles, ResetStep, SignalDef, SocDefinition, SocGraph, GPIO,
};
use support::*;

const CPU_ID: ComponentId = ComponentId(0);
const DTM_ID: ComponentId = ComponentId(1);
const DM_ID: ComponentId = ComponentId(2);
const PLAIN_ID: ComponentId = ComponentId(3);
const ROM_ID: ComponentId = ComponentId(4);
const SOURCE_ID: ComponentId = ComponentId(5);

const ROLES: ResetRoles = ResetRoles {
    main_cpu: Some(0),
    boot_integrity: Some(4),
    debug_transport: Some(1),
    debug_module: Some(2),
};

fn boot_definition(phases: ResetPhases) -> SocDefinition {
    SocDefinition {
        composite_signals: reset_forward(5, RESET_OUT, 0),
        reset_roles: ROLES,
        reset_phases: phases,
        ..definition(vec![
            ComponentDescriptor::new(TYPE_CPU),
            ComponentDescriptor::new(TYPE_PLAIN),
            ComponentDescriptor::new(TYPE_PLAIN),
            ComponentDescriptor::new(TYPE_PLAIN),
            ComponentDescriptor::new(TYPE_INTEGRITY),
            ComponentDescriptor::new(TYPE_SOURCE),
        ])
    }
}

fn boot_soc() -> SocGraph {
    build(&boot_definition(ResetPhases::BOOT_INTEGRITY)).unwrap()
}

fn ev(id: ComponentId, step: ResetStep) -> ResetEvent {
    ResetEvent {
        component: id,
        step,
    }
}

fn cpu(soc: &SocGraph) -> &TestDevice {
    soc.device_as::<TestDevice>(CPU_ID).unwrap()
}

/// Tests the full event order of one cold reset.
#[test]
fn test_cold_reset_order() {
    let mut soc = boot_soc();
    soc.cold_reset().unwrap();

    let expected = vec![
        ev(CPU_ID, ResetStep::Hold),
        ev(DTM_ID, ResetStep::Hold),
        ev(DM_ID, ResetStep::Hold),
        ev(PLAIN_ID, ResetStep::Hold),
        ev(ROM_ID, ResetStep::Hold),
        ev(SOURCE_ID, ResetStep::Hold),
        // hold override
        ev(DTM_ID, ResetStep::Hold),
        ev(DTM_ID, ResetStep::Exit),
        ev(DM_ID, ResetStep::Hold),
        ev(DM_ID, ResetStep::Exit),
        ev(ROM_ID, ResetStep::Assert),
        ev(CPU_ID, ResetStep::Assert),
        // default exit
        ev(PLAIN_ID, ResetStep::Exit),
        ev(SOURCE_ID, ResetStep::Exit),
        // exit override
        ev(ROM_ID, ResetStep::Release),
    ];
    assert_eq!(soc.reset_log(), expected.as_slice());
    assert_eq!(soc.reset_phase(), ResetPhase::Idle);
    assert_eq!(soc.reset_cycles(), 1);
}

/// Tests that the boot-integrity release is the last event of every cycle.
#[test]
fn test_boot_integrity_released_last() {
    let mut soc = boot_soc();
    for cycle in 1..=3 {
        soc.take_reset_log();
        soc.cold_reset().unwrap();
        let log = soc.reset_log();
        assert_eq!(log.last(), Some(&ev(ROM_ID, ResetStep::Release)), "cycle {cycle}");
        assert!(!log[..log.len() - 1]
            .iter()
            .any(|e| e.component == ROM_ID && e.step != ResetStep::Hold && e.step != ResetStep::Assert));
    }
    assert_eq!(soc.reset_cycles(), 3);
    assert!(!soc.is_in_reset(ROM_ID));
}

/// Tests that the main processing element stays held until released.
#[test]
fn test_cpu_held_until_released() {
    let mut soc = boot_soc();
    soc.cold_reset().unwrap();

    assert!(soc.is_in_reset(CPU_ID));
    assert!(soc.is_held(CPU_ID));
    assert_eq!(cpu(&soc).state().exit_count(), 0);

    soc.release_reset(CPU_ID).unwrap();
    assert!(!soc.is_in_reset(CPU_ID));
    assert!(!soc.is_held(CPU_ID));
    assert_eq!(cpu(&soc).state().exit_count(), 1);
    assert_eq!(soc.reset_log().last(), Some(&ev(CPU_ID, ResetStep::Release)));
}

/// Tests that a second hold without an exit changes nothing.
#[test]
fn test_hold_is_idempotent() {
    let mut soc = boot_soc();
    soc.reset_hold().unwrap();
    let events = soc.reset_log().len();
    soc.reset_hold().unwrap();

    assert_eq!(soc.reset_log().len(), events);
    assert_eq!(soc.reset_phase(), ResetPhase::Hold);
    let plain = soc.device(PLAIN_ID).unwrap();
    assert_eq!(plain.state().hold_count(), 1);

    soc.reset_exit().unwrap();
    assert_eq!(soc.reset_log().last(), Some(&ev(ROM_ID, ResetStep::Release)));
    assert_eq!(soc.reset_cycles(), 1);
}

/// Tests protocol violations: exit without hold, release during hold.
#[test]
fn test_protocol_violations() {
    let mut soc = boot_soc();
    assert_eq!(soc.reset_exit(), Err(ResetError::ExitWithoutHold));

    soc.reset_hold().unwrap();
    assert_eq!(
        soc.release_reset(CPU_ID),
        Err(ResetError::ReleaseDuringHold(0))
    );
    assert!(soc.is_held(CPU_ID));
    assert_eq!(soc.assert_reset(ComponentId(9)), Err(ResetError::UnknownComponent(9)));
    soc.reset_exit().unwrap();
    assert_eq!(soc.reset_exit(), Err(ResetError::ExitWithoutHold));
}

/// Tests a reset requested through the published reset-request input.
#[test]
fn test_reset_request_resynchronizes_cpu() {
    let mut soc = boot_soc();
    soc.raise(SOURCE_ID, RESET_OUT, 0, 1).unwrap();

    let log = soc.reset_log();
    assert_eq!(log.first(), Some(&ev(CPU_ID, ResetStep::Quiesce)));
    assert_eq!(log.last(), Some(&ev(CPU_ID, ResetStep::Resume)));
    assert_eq!(log[log.len() - 2], ev(ROM_ID, ResetStep::Release));
    assert_eq!(cpu(&soc).quiesced, 1);
    assert_eq!(cpu(&soc).resumed, 1);
    assert_eq!(soc.reset_cycles(), 1);
}

/// Tests that a zero level on the reset request is ignored.
#[test]
fn test_reset_request_low_level_ignored() {
    let mut soc = boot_soc();
    soc.raise(SOURCE_ID, RESET_OUT, 0, 0).unwrap();

    assert!(soc.reset_log().is_empty());
    assert_eq!(soc.reset_cycles(), 0);
}

fn request_again(soc: &mut SocGraph) -> Result<(), ResetError> {
    soc.request_reset(1)
}

/// Tests that a reset request raised from within a reset request is refused.
#[test]
fn test_reentrant_reset_request() {
    const REENTRANT: PhaseHook = request_again;
    let mut soc = build(&boot_definition(ResetPhases {
        hold: None,
        exit: Some(REENTRANT),
    }))
    .unwrap();

    assert_eq!(soc.request_reset(1), Err(ResetError::Reentrant));
    assert_eq!(soc.reset_phase(), ResetPhase::Idle);
    assert_eq!(soc.reset_cycles(), 0);
    assert_eq!(cpu(&soc).quiesced, 1);
    assert_eq!(cpu(&soc).resumed, 0);
}

/// Tests the default phases: every component goes through hold then exit.
#[test]
fn test_default_phases() {
    let mut soc = build(&boot_definition(ResetPhases::DEFAULT)).unwrap();
    soc.cold_reset().unwrap();

    let log = soc.reset_log();
    assert_eq!(log.len(), 12);
    assert!(log[..6].iter().all(|e| e.step == ResetStep::Hold));
    assert!(log[6..].iter().all(|e| e.step == ResetStep::Exit));
    assert!(soc.devices().all(|(id, _)| !soc.is_in_reset(id)));
}

/// Tests that the override hooks need a boot-integrity component.
#[test]
fn test_missing_boot_integrity_role() {
    let def = SocDefinition {
        reset_roles: ResetRoles {
            boot_integrity: None,
            ..ROLES
        },
        ..boot_definition(ResetPhases::BOOT_INTEGRITY)
    };
    let mut soc = build(&def).unwrap();
    assert_eq!(soc.cold_reset(), Err(ResetError::MissingRole("boot_integrity")));
}

/// Tests that a role past the end of the table is a build error.
#[test]
fn test_invalid_reset_role() {
    let def = SocDefinition {
        reset_roles: ResetRoles {
            main_cpu: Some(6),
            ..ROLES
        },
        ..boot_definition(ResetPhases::BOOT_INTEGRITY)
    };
    let err = build(&def).err().unwrap();
    assert_eq!(
        err,
        BuildError::Configuration(ConfigurationError::InvalidResetRole {
            role: "main_cpu",
            index: 6,
            len: 6,
        })
    );
    assert_eq!(err.index(), None);
}

/// Tests that composite signals only target the published reset input.
#[test]
fn test_composite_signal_must_target_reset_request() {
    let def = SocDefinition {
        composite_signals: leak(vec![CompositeSignal {
            source: 5,
            output: PinRef::new(RESET_OUT, 0),
            input: PinRef::new("power", 0),
        }]),
        ..boot_definition(ResetPhases::BOOT_INTEGRITY)
    };
    assert!(matches!(
        build(&def).err().unwrap(),
        BuildError::Configuration(ConfigurationError::UnknownPin {
            direction: "composite input",
            ..
        })
    ));
}

/// Tests a pulse on a single component outside of a cycle.
#[test]
fn test_pulse_reset() {
    let mut soc = boot_soc();
    soc.pulse_reset(PLAIN_ID).unwrap();

    let plain = soc.device(PLAIN_ID).unwrap();
    assert_eq!(plain.state().hold_count(), 1);
    assert_eq!(plain.state().exit_count(), 1);
    assert!(!soc.is_in_reset(PLAIN_ID));
    assert_eq!(
        soc.take_reset_log(),
        vec![ev(PLAIN_ID, ResetStep::Hold), ev(PLAIN_ID, ResetStep::Exit)]
    );
    assert!(soc.reset_log().is_empty());
}

/// Tests that input levels latched before a reset read as 0 afterwards.
#[test]
fn test_reset_clears_input_levels() {
    let def = definition(vec![
        ComponentDescriptor {
            gpio: leak(vec![SignalDef::new(DONE, 0, 1, GPIO, 5)]),
            ..ComponentDescriptor::new(TYPE_SOURCE)
        },
        ComponentDescriptor::new(TYPE_PLAIN),
    ]);
    let mut soc = build(&def).unwrap();
    soc.raise(ComponentId(0), DONE, 0, 1).unwrap();
    assert_eq!(soc.input_level(ComponentId(1), GPIO, 5).unwrap(), 1);

    soc.cold_reset().unwrap();
    assert_eq!(soc.input_level(ComponentId(1), GPIO, 5).unwrap(), 0);

    soc.raise(ComponentId(0), DONE, 0, 1).unwrap();
    assert_eq!(soc.input_level(ComponentId(1), GPIO, 5).unwrap(), 1);
}

//! Integration tests for graph construction: instantiation, links, address
//! spaces, properties, configure hooks and realization.

mod support;

use earlgrey_soc::common::{
    BuildError, ConfigurationError, PropKind, PropValue, PropertyError, RealizationError,
    RealizeError,
};
use earlgrey_soc::config::HostEnvironment;
use earlgrey_soc::soc::properties::set_property;
use earlgrey_soc::soc::{
    instantiate, realize_all, Component, ComponentDescriptor, ComponentId, ConfigureContext,
    LinkDef, MemMapEntry, PropDef,
};
use proptest::prelude::*;
use support::*;

fn plain() -> ComponentDescriptor {
    ComponentDescriptor::new(TYPE_PLAIN)
}

fn peer(target: usize) -> ComponentDescriptor {
    ComponentDescriptor {
        link: leak(vec![LinkDef::new("peer", target)]),
        ..ComponentDescriptor::new(TYPE_PEER)
    }
}

/// Tests that every descriptor yields one instance of its type, in order.
#[test]
fn test_instantiate_in_table_order() {
    let table = [
        plain(),
        ComponentDescriptor::new(TYPE_SOURCE),
        ComponentDescriptor {
            instance: Some(3),
            ..ComponentDescriptor::new(TYPE_ECHO)
        },
    ];
    let devices = instantiate(&table, &registry()).unwrap();

    assert_eq!(devices.len(), 3);
    assert_eq!(devices[0].type_name(), TYPE_PLAIN);
    assert_eq!(devices[1].type_name(), TYPE_SOURCE);
    assert_eq!(devices[2].type_name(), TYPE_ECHO);
    assert_eq!(devices[2].state().instance(), Some(3));
    assert_eq!(devices[0].state().instance(), None);
}

/// Tests that an unknown type tag aborts construction with its index.
#[test]
fn test_unknown_type_is_fatal() {
    let def = definition(vec![plain(), ComponentDescriptor::new("no-such-type")]);
    let err = build(&def).err().unwrap();

    assert_eq!(
        err,
        BuildError::Configuration(ConfigurationError::UnknownType {
            index: 1,
            type_name: "no-such-type",
        })
    );
    assert_eq!(err.index(), Some(1));
}

const INERT_TYPES: [&str; 5] = [TYPE_PLAIN, TYPE_SOURCE, TYPE_INTEGRITY, TYPE_ECHO, TYPE_CPU];

proptest! {
    /// Instantiation preserves table length and per-index type for any table.
    #[test]
    fn prop_instantiate_preserves_order(kinds in prop::collection::vec(0usize..INERT_TYPES.len(), 0..64)) {
        let table: Vec<_> = kinds
            .iter()
            .map(|&k| ComponentDescriptor::new(INERT_TYPES[k]))
            .collect();
        let devices = instantiate(&table, &registry()).unwrap();

        prop_assert_eq!(devices.len(), table.len());
        for (device, def) in devices.iter().zip(&table) {
            prop_assert_eq!(device.type_name(), def.type_name);
        }
    }

    /// A table of inert components always builds, with one window per
    /// mapped plain component.
    #[test]
    fn prop_inert_tables_build(kinds in prop::collection::vec(0usize..INERT_TYPES.len(), 1..32)) {
        let table: Vec<_> = kinds
            .iter()
            .enumerate()
            .map(|(i, &k)| {
                let memmap: &'static [MemMapEntry] = match INERT_TYPES[k] {
                    TYPE_PLAIN | TYPE_INTEGRITY => leak(vec![MemMapEntry::new(0x1000 * i as u64)]),
                    _ => &[],
                };
                ComponentDescriptor { memmap, ..ComponentDescriptor::new(INERT_TYPES[k]) }
            })
            .collect();
        let mapped = table.iter().filter(|d| !d.memmap.is_empty()).count();
        let soc = build(&definition(table)).unwrap();

        prop_assert_eq!(soc.len(), kinds.len());
        prop_assert_eq!(soc.address_space(0).unwrap().windows().len(), mapped);
        prop_assert!(soc.devices().all(|(_, d)| d.state().is_realized()));
    }
}

/// Tests forward and backward link resolution.
#[test]
fn test_links_resolve_both_directions() {
    let def = definition(vec![peer(2), plain(), plain(), peer(1)]);
    let soc = build(&def).unwrap();

    assert_eq!(soc.link(ComponentId(0), "peer"), Some(ComponentId(2)));
    assert_eq!(soc.link(ComponentId(3), "peer"), Some(ComponentId(1)));
    assert_eq!(soc.link(ComponentId(0), "other"), None);
}

/// Tests that a component may link to itself.
#[test]
fn test_link_to_self() {
    let soc = build(&definition(vec![plain(), peer(1)])).unwrap();
    assert_eq!(soc.link(ComponentId(1), "peer"), Some(ComponentId(1)));
}

/// Tests that a link target past the end of the table is rejected.
#[test]
fn test_link_target_out_of_range() {
    let err = build(&definition(vec![plain(), peer(7)])).err().unwrap();
    assert_eq!(
        err,
        BuildError::Configuration(ConfigurationError::LinkTargetOutOfRange {
            index: 1,
            type_name: TYPE_PEER,
            name: "peer",
            target: 7,
            len: 2,
        })
    );
}

/// Tests that a link name the type does not declare is rejected.
#[test]
fn test_unknown_link_name() {
    let def = definition(vec![ComponentDescriptor {
        link: leak(vec![LinkDef::new("peer", 0)]),
        ..plain()
    }]);
    let err = build(&def).err().unwrap();
    assert!(matches!(
        err,
        BuildError::Configuration(ConfigurationError::UnknownLink { index: 0, name: "peer", .. })
    ));
}

/// Tests that a required link left unset fails realization.
#[test]
fn test_missing_required_link_fails_realize() {
    let err = build(&definition(vec![plain(), ComponentDescriptor::new(TYPE_PEER)]))
        .err()
        .unwrap();
    assert_eq!(
        err,
        BuildError::Realization(RealizationError {
            index: 1,
            type_name: TYPE_PEER,
            source: RealizeError::MissingLink("peer"),
        })
    );
}

/// Tests a component mapped at two addresses in two address spaces.
#[test]
fn test_multi_window_mapping() {
    let def = definition(vec![
        plain(),
        ComponentDescriptor {
            memmap: leak(vec![
                MemMapEntry::new(0x4000_0000),
                MemMapEntry::in_space(0x2000, 1),
            ]),
            prop: leak(vec![PropDef::uint("size", 0x800)]),
            ..ComponentDescriptor::new(TYPE_DUAL)
        },
    ]);
    let soc = build(&def).unwrap();
    let windows = soc.windows_of(ComponentId(1));

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].0, 0);
    assert_eq!((windows[0].1.region, windows[0].1.base, windows[0].1.size), (0, 0x4000_0000, 0x40));
    assert_eq!(windows[1].0, 1);
    assert_eq!((windows[1].1.region, windows[1].1.base, windows[1].1.size), (1, 0x2000, 0x800));

    let (window, offset) = soc.address_space(1).unwrap().find(0x2010).unwrap();
    assert_eq!(window.owner, ComponentId(1));
    assert_eq!(offset, 0x10);
    assert!(!soc.address_space(0).unwrap().is_valid_address(0x4000_0040));
    assert!(soc.windows_of(ComponentId(0)).is_empty());
}

/// Tests that overlapping windows are accepted and resolve to the first.
#[test]
fn test_overlap_is_not_detected() {
    let at = |base| ComponentDescriptor {
        memmap: leak(vec![MemMapEntry::new(base)]),
        ..plain()
    };
    let soc = build(&definition(vec![at(0x1000), at(0x1080)])).unwrap();
    let (window, _) = soc.address_space(0).unwrap().find(0x1090).unwrap();
    assert_eq!(window.owner, ComponentId(0));
}

/// Tests mapping errors: unknown address space and undeclared region.
#[test]
fn test_mapping_errors() {
    let def = definition(vec![ComponentDescriptor {
        memmap: leak(vec![MemMapEntry::in_space(0x0, 4)]),
        ..plain()
    }]);
    assert_eq!(
        build(&def).err().unwrap(),
        BuildError::Configuration(ConfigurationError::AddressSpaceOutOfRange {
            index: 0,
            space: 4,
            count: 2,
        })
    );

    let def = definition(vec![ComponentDescriptor {
        memmap: leak(vec![MemMapEntry::new(0x0), MemMapEntry::new(0x1000)]),
        ..plain()
    }]);
    assert_eq!(
        build(&def).err().unwrap(),
        BuildError::Configuration(ConfigurationError::UnmappedRegion {
            index: 0,
            type_name: TYPE_PLAIN,
            region: 1,
            regions: 1,
        })
    );
}

/// Tests that a property-sized region without its size fails realization.
#[test]
fn test_unsized_region_fails_realize() {
    let def = definition(vec![ComponentDescriptor {
        memmap: leak(vec![MemMapEntry::new(0x0), MemMapEntry::new(0x1000)]),
        ..ComponentDescriptor::new(TYPE_DUAL)
    }]);
    let err = build(&def).err().unwrap();
    assert!(matches!(
        err,
        BuildError::Realization(RealizationError {
            index: 0,
            source: RealizeError::MissingProperty("size"),
            ..
        })
    ));
}

/// Tests that static properties land on the instance with their kinds.
#[test]
fn test_static_properties_applied() {
    let def = definition(vec![ComponentDescriptor {
        prop: leak(vec![
            PropDef::uint("value", 42),
            PropDef::bool("enabled", true),
            PropDef::string("label", "uart0"),
        ]),
        ..plain()
    }]);
    let soc = build(&def).unwrap();
    let id = ComponentId(0);

    assert_eq!(soc.property(id, "value"), Some(&PropValue::Uint(42)));
    assert_eq!(soc.property(id, "enabled"), Some(&PropValue::Bool(true)));
    assert_eq!(soc.property(id, "label").and_then(PropValue::as_str), Some("uart0"));
    assert_eq!(soc.property(id, "table"), None);
}

/// Tests that the last assignment of a duplicated property wins.
#[test]
fn test_duplicate_property_last_write_wins() {
    let def = definition(vec![ComponentDescriptor {
        prop: leak(vec![PropDef::uint("value", 1), PropDef::uint("value", 2)]),
        ..plain()
    }]);
    let soc = build(&def).unwrap();
    assert_eq!(soc.property(ComponentId(0), "value"), Some(&PropValue::Uint(2)));
}

/// Tests that a kind mismatch is fatal and names the property.
#[test]
fn test_property_kind_mismatch() {
    let def = definition(vec![
        plain(),
        ComponentDescriptor {
            prop: leak(vec![PropDef::string("value", "ten")]),
            ..plain()
        },
    ]);
    assert_eq!(
        build(&def).err().unwrap(),
        BuildError::Configuration(ConfigurationError::Property {
            index: 1,
            type_name: TYPE_PLAIN,
            name: "value".to_string(),
            source: PropertyError::KindMismatch {
                expected: PropKind::Uint,
                found: PropKind::Str,
            },
        })
    );
}

/// Tests that an undeclared property name is fatal.
#[test]
fn test_unknown_property() {
    let def = definition(vec![ComponentDescriptor {
        prop: leak(vec![PropDef::uint("frequency", 10)]),
        ..plain()
    }]);
    assert!(matches!(
        build(&def).err().unwrap(),
        BuildError::Configuration(ConfigurationError::Property {
            source: PropertyError::Unknown,
            ..
        })
    ));
}

fn fill_table(
    dev: &mut dyn Component,
    def: &ComponentDescriptor,
    ctx: &ConfigureContext<'_>,
) -> Result<(), BuildError> {
    assert_eq!(ctx.parent, "test-soc");
    // static properties are already applied
    let base = dev.property("value").and_then(PropValue::as_uint).unwrap_or(0);
    let entries = (0..4).map(|i| base + i).collect();
    set_property(dev, ctx.index, "table", PropValue::UintArray(entries))?;
    if def.instance == Some(1) {
        set_property(dev, ctx.index, "label", PropValue::Str("second".into()))?;
    }
    Ok(())
}

fn bad_hook(
    dev: &mut dyn Component,
    _def: &ComponentDescriptor,
    ctx: &ConfigureContext<'_>,
) -> Result<(), BuildError> {
    set_property(dev, ctx.index, "value", PropValue::Bool(true))?;
    Ok(())
}

/// Tests that configure hooks run after static properties and may add more.
#[test]
fn test_configure_hook_sets_properties() {
    let hooked = |instance| ComponentDescriptor {
        instance: Some(instance),
        prop: leak(vec![PropDef::uint("value", 0x10)]),
        cfg: Some(fill_table),
        ..plain()
    };
    let soc = build(&definition(vec![hooked(0), hooked(1)])).unwrap();

    assert_eq!(
        soc.property(ComponentId(0), "table").and_then(PropValue::as_array),
        Some(&[0x10, 0x11, 0x12, 0x13][..])
    );
    assert_eq!(soc.property(ComponentId(0), "label"), None);
    assert_eq!(
        soc.property(ComponentId(1), "label").and_then(PropValue::as_str),
        Some("second")
    );
}

/// Tests that a hook error aborts construction with the hook's index.
#[test]
fn test_configure_hook_error_is_fatal() {
    let def = definition(vec![
        plain(),
        plain(),
        ComponentDescriptor {
            cfg: Some(bad_hook),
            ..plain()
        },
    ]);
    let err = build(&def).err().unwrap();
    assert_eq!(err.index(), Some(2));
}

/// Tests that realization stops at the first failure.
#[test]
fn test_realize_all_stops_at_first_failure() {
    let table = [plain(), ComponentDescriptor::new(TYPE_BROKEN), plain()];
    let mut devices = instantiate(&table, &registry()).unwrap();
    let err = realize_all(&mut devices).unwrap_err();

    assert_eq!(err.index, 1);
    assert_eq!(err.type_name, TYPE_BROKEN);
    assert!(devices[0].state().is_realized());
    assert!(!devices[1].state().is_realized());
    assert!(!devices[2].state().is_realized());
}

/// Tests that a realization failure yields no graph and a diagnostic.
#[test]
fn test_realize_failure_aborts_build() {
    let err = build(&definition(vec![plain(), ComponentDescriptor::new(TYPE_BROKEN)]))
        .err()
        .unwrap();
    assert_eq!(err.index(), Some(1));
    assert!(err.to_string().contains("broken on purpose"));
}

/// Tests that properties and links are frozen once realized.
#[test]
fn test_realized_component_rejects_changes() {
    let mut soc = build(&definition(vec![plain(), peer(0)])).unwrap();

    let device = soc.device_mut(ComponentId(0)).unwrap();
    assert_eq!(
        device.set_property("value", PropValue::Uint(1)),
        Err(PropertyError::Realized)
    );
    let device = soc.device_mut(ComponentId(1)).unwrap();
    assert_eq!(device.set_link("other", ComponentId(0)), Err(PropertyError::Realized));
}

/// Tests the serializable summary.
#[test]
fn test_summary_json() {
    let def = definition(vec![
        ComponentDescriptor {
            memmap: leak(vec![MemMapEntry::new(0x1000)]),
            ..plain()
        },
        peer(0),
    ]);
    let soc = build(&def).unwrap();
    let json = serde_json::to_value(soc.summary()).unwrap();

    assert_eq!(json["name"], "test-soc");
    assert_eq!(json["devices"][0]["type"], TYPE_PLAIN);
    assert_eq!(json["devices"][0]["windows"][0]["space"], "system");
    assert_eq!(json["devices"][0]["windows"][0]["size"], 0x100);
    assert_eq!(json["devices"][1]["links"][0][0], "peer");
    assert_eq!(json["devices"][1]["links"][0][1], 0);
    assert_eq!(json["signal_edges"], 0);
}

/// Tests attaching a component to a realized composite and wiring it.
#[test]
fn test_attach_after_build() {
    let mut soc = build(&definition(vec![plain(), ComponentDescriptor::new(TYPE_SOURCE)])).unwrap();
    let host = HostEnvironment::default();

    let id = soc.attach(&peer(0), "test-board", &registry(), &host).unwrap();
    assert_eq!(id, ComponentId(2));
    assert_eq!(soc.len(), 3);
    assert_eq!(soc.link(id, "peer"), Some(ComponentId(0)));
    assert!(soc.device(id).unwrap().state().is_realized());
    assert!(!soc.is_in_reset(id));

    let mapped = ComponentDescriptor {
        memmap: leak(vec![MemMapEntry::new(0x3000)]),
        ..plain()
    };
    let id2 = soc.attach(&mapped, "test-board", &registry(), &host).unwrap();
    let (window, offset) = soc.address_space(0).unwrap().find(0x3010).unwrap();
    assert_eq!((window.owner, window.size, offset), (id2, 0x100, 0x10));

    soc.connect(ComponentId(1), DONE, 0, id, GO, 1).unwrap();
    soc.raise(ComponentId(1), DONE, 0, 1).unwrap();
    assert_eq!(soc.input_level(id, GO, 1).unwrap(), 1);
    assert_eq!(soc.input_level(id, GO, 0).unwrap(), 0);
    assert_eq!(soc.summary().signal_edges, 1);
}

/// Tests that a failed attach leaves the composite as it was.
#[test]
fn test_failed_attach_leaves_graph_unchanged() {
    let mut soc = build(&definition(vec![plain(), plain()])).unwrap();
    let host = HostEnvironment::default();

    let err = soc.attach(&peer(5), "test-board", &registry(), &host).unwrap_err();
    assert_eq!(
        err,
        BuildError::Configuration(ConfigurationError::LinkTargetOutOfRange {
            index: 2,
            type_name: TYPE_PEER,
            name: "peer",
            target: 5,
            len: 3,
        })
    );
    assert_eq!(soc.len(), 2);

    let far = ComponentDescriptor {
        memmap: leak(vec![MemMapEntry::in_space(0x3000, 4)]),
        ..plain()
    };
    assert!(soc.attach(&far, "test-board", &registry(), &host).is_err());
    let broken = ComponentDescriptor::new(TYPE_BROKEN);
    assert_eq!(soc.attach(&broken, "test-board", &registry(), &host).unwrap_err().index(), Some(2));
    assert_eq!(soc.len(), 2);
    assert!(soc.address_space(4).is_none());

    assert_eq!(soc.attach(&plain(), "test-board", &registry(), &host).unwrap(), ComponentId(2));
}

/// Tests late connections against unknown pins and taken inputs.
#[test]
fn test_connect_errors() {
    let mut soc = build(&definition(vec![ComponentDescriptor::new(TYPE_SOURCE), peer(0)])).unwrap();

    assert_eq!(
        soc.connect(ComponentId(0), DONE, 3, ComponentId(1), GO, 0),
        Err(ConfigurationError::UnknownPin {
            index: 0,
            type_name: TYPE_SOURCE,
            direction: "output",
            pin: DONE,
            num: 3,
        })
    );
    assert!(matches!(
        soc.connect(ComponentId(0), DONE, 0, ComponentId(1), GO, 2),
        Err(ConfigurationError::UnknownPin { index: 1, direction: "input", .. })
    ));

    soc.connect(ComponentId(0), DONE, 0, ComponentId(1), GO, 0).unwrap();
    assert_eq!(
        soc.connect(ComponentId(0), RESET_OUT, 0, ComponentId(1), GO, 0),
        Err(ConfigurationError::DuplicateSignalSource {
            index: 0,
            target: 1,
            pin: GO,
            num: 0,
            previous: 0,
        })
    );
}

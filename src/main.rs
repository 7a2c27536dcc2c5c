//! EarlGrey SoC Builder CLI.
//!
//! Builds the OpenTitan EarlGrey SoC from its descriptor table, runs the
//! power-on sequence and reports the resulting composite.
//!
//! # Usage
//!
//! * `--map` prints the memory map.
//! * `--json` prints a JSON summary of the composite and its reset log.
//! * `--resets N` runs `N` additional reset requests after boot.

use clap::Parser;
use log::error;
use std::process;

use earlgrey_soc::config::MachineConfig;
use earlgrey_soc::earlgrey::{EarlGreyMachine, MACHINE_DESC};
use earlgrey_soc::soc::SocGraph;

/// Command-line arguments for the EarlGrey SoC builder.
#[derive(Parser, Debug)]
#[command(author, version, about = MACHINE_DESC)]
struct Args {
    /// Machine configuration (TOML).
    #[arg(short, long)]
    config: Option<String>,

    /// Skip the default ePMP configuration of the hart.
    #[arg(long)]
    no_epmp_cfg: bool,

    /// Do not set the hart PC from an ELF entry point.
    #[arg(long)]
    ignore_elf_entry: bool,

    /// Print the memory map.
    #[arg(long)]
    map: bool,

    /// Print a JSON summary.
    #[arg(long)]
    json: bool,

    /// Reset requests to issue after boot.
    #[arg(long, default_value_t = 0)]
    resets: u32,
}

fn print_map(soc: &SocGraph) {
    println!("{}", soc.name());
    println!("--------------------");
    for space in soc.address_spaces() {
        println!("Address space '{}':", space.name());
        let mut windows: Vec<_> = space.windows().iter().collect();
        windows.sort_by_key(|w| w.base);
        for w in windows {
            let type_name = soc.device(w.owner).map_or("?", |d| d.type_name());
            println!(
                "  {:#010x}-{:#010x}  #{:<2} {} [{}]",
                w.base,
                w.base + w.size.saturating_sub(1),
                w.owner.index(),
                type_name,
                w.region
            );
        }
    }
    println!("--------------------");
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => MachineConfig::from_file(path)?,
        None => MachineConfig::default(),
    };
    config.machine.no_epmp_cfg |= args.no_epmp_cfg;
    config.machine.ignore_elf_entry |= args.ignore_elf_entry;

    let mut machine = EarlGreyMachine::new(&config)?;
    machine.boot()?;
    for _ in 0..args.resets {
        machine.soc_mut().request_reset(1)?;
    }

    if args.map {
        print_map(machine.soc());
    }
    if args.json {
        let soc = machine.soc();
        let report = serde_json::json!({
            "soc": soc.summary(),
            "reset_cycles": soc.reset_cycles(),
            "reset_log": soc.reset_log(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Some(hart) = machine.hart() {
        println!(
            "[*] {} ready: pc={:#x} running={} resets={}",
            machine.soc().name(),
            hart.pc(),
            hart.is_running(),
            machine.soc().reset_cycles()
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{e}");
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    }
}

//! Command-line control of the SPM8821's voltage regulators.
//!
//! Reads and writes rail voltages over `/dev/i2c-N`, plus raw register
//! access for debugging. Needs permission on the i2c device node;
//! typically run as root.

use std::env;

use anyhow::{Context, Result};

use spm8821_vr::dispatch::Dispatcher;
use spm8821_vr::pmic::{Spm8821, SPM8821_I2C_BUS};
use spm8821_vr::regulator::RegulatorId;
use spm8821_vr::transport::I2cDev;
use spm8821_vr::types::Voltage;

fn main() -> Result<()> {
    spm8821_vr::tracing::init_journald_or_stdout();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: vrctl <command> [args]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  list                      Show every rail and its voltage");
        eprintln!("  get <rail>                Read one rail (e.g. \"get dcdc3\")");
        eprintln!("  set <rail> <millivolts>   Program a rail, print the voltage it settled at");
        eprintln!("  regread <addr>            Raw register read (\"regread 0x48\")");
        eprintln!("  regwrite <addr> <byte>    Raw register write, no validation");
        eprintln!();
        eprintln!("Environment:");
        eprintln!("  VR_I2C_BUS    I2C bus number (default: {})", SPM8821_I2C_BUS);
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "list" => cmd_list()?,
        "get" => {
            let rail = parse_rail(args.get(2))?;
            let v = open_dispatcher()?.get_voltage(rail)?;
            println!("{}: {}", rail, v);
        }
        "set" => {
            let rail = parse_rail(args.get(2))?;
            let mv: i32 = args
                .get(3)
                .context("set needs a target in millivolts")?
                .parse()
                .context("target must be an integer millivolt value")?;
            let achieved = open_dispatcher()?.set_voltage(rail, Voltage::from_mv(mv))?;
            println!("{}: {}", rail, achieved);
        }
        "regread" => {
            let addr = parse_byte(args.get(2), "register address")?;
            let value = open_dispatcher()?.read_register(addr)?;
            println!("0x{:02X} = 0x{:02X}", addr, value);
        }
        "regwrite" => {
            let addr = parse_byte(args.get(2), "register address")?;
            let value = parse_byte(args.get(3), "register value")?;
            open_dispatcher()?.write_register(addr, value)?;
            println!("0x{:02X} <- 0x{:02X}", addr, value);
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            eprintln!("Run without arguments to see usage.");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Open the bus, probe the PMIC, and wrap it in a dispatcher.
fn open_dispatcher() -> Result<Dispatcher<I2cDev>> {
    let bus = match env::var("VR_I2C_BUS") {
        Ok(s) => s.parse().context("VR_I2C_BUS must be a bus number")?,
        Err(_) => SPM8821_I2C_BUS,
    };
    let i2c = I2cDev::open(bus)
        .with_context(|| format!("failed to open /dev/i2c-{}", bus))?;
    let pmic = Spm8821::probe(i2c).context("SPM8821 did not respond")?;
    Ok(Dispatcher::new(pmic))
}

/// Print every rail with its current voltage, in the style of the old TUI's
/// regulator table.
fn cmd_list() -> Result<()> {
    let dispatcher = open_dispatcher()?;

    println!("{:<8} {:>12}", "Rail", "Voltage");
    for rail in RegulatorId::all() {
        match dispatcher.get_voltage(rail) {
            Ok(v) => println!("{:<8} {:>12}", rail.to_string(), v.to_string()),
            Err(e) => println!("{:<8} {:>12}  ({})", rail.to_string(), "ERR", e),
        }
    }
    Ok(())
}

fn parse_rail(arg: Option<&String>) -> Result<RegulatorId> {
    let name = arg.context("missing rail name (e.g. dcdc3, ldo7)")?;
    Ok(name.parse()?)
}

/// Parse a register address or value, accepting 0x-prefixed hex or decimal.
fn parse_byte(arg: Option<&String>, what: &str) -> Result<u8> {
    let s = arg.with_context(|| format!("missing {}", what))?;
    let parsed = match s.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.with_context(|| format!("invalid {}: {}", what, s))
}

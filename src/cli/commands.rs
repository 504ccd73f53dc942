use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::info;

use crate::config::Config;
use crate::devices::gps::GpsService;

pub fn build_cli() -> Command {
    Command::new("gprmc-status")
        .version(crate::VERSION)
        .about("Reads a serial GPS receiver and republishes its $GPRMC fix as a status line")
        .arg(Arg::new("config").short('c').long("config").value_name("FILE").help("TOML configuration file"))
        .arg(Arg::new("port").short('p').long("port").value_name("PATH").help("GPS serial device"))
        .arg(Arg::new("baud").short('b').long("baud").value_name("RATE").help("Baud rate"))
        .arg(Arg::new("capacity").long("capacity").value_name("BYTES").help("Bytes per read frame"))
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("MS")
                .help("Give up on a read after MS milliseconds (default: block)"),
        )
        .arg(
            Arg::new("no-configure")
                .long("no-configure")
                .action(ArgAction::SetTrue)
                .help("Leave the port's line settings untouched"),
        )
        .subcommand(Command::new("read").about("Run one pass and print the status line"))
        .subcommand(
            Command::new("serve")
                .about("Serve the status line over HTTP")
                .arg(Arg::new("bind").long("bind").value_name("ADDR"))
                .arg(Arg::new("http-port").long("http-port").value_name("PORT")),
        )
        .subcommand(
            Command::new("init-config")
                .about("Write the default configuration to a file")
                .arg(Arg::new("path").required(true).value_name("FILE")),
        )
}

/// Handle subcommands that need no device. Returns `true` when one ran.
pub fn handle_offline_subcommands(matches: &ArgMatches) -> Result<bool> {
    if let Some(matches) = matches.subcommand_matches("init-config") {
        let path = matches
            .get_one::<String>("path")
            .ok_or_else(|| anyhow::anyhow!("init-config needs a path"))?;
        Config::default().save_to_file(path)?;
        info!("📝 Default configuration written to {}", path);
        println!("✅ Wrote {}", path);
        return Ok(true);
    }
    Ok(false)
}

/// `read`: one pass, one line on stdout.
pub fn run_read(service: &GpsService) -> Result<()> {
    info!("🔍 Executing read command...");
    let status = service.poll()?;
    println!("{}", status);
    Ok(())
}

/// Apply `serve` overrides for the HTTP listener.
pub fn apply_serve_overrides(config: &mut Config, matches: &ArgMatches) -> Result<()> {
    if let Some(bind) = matches.get_one::<String>("bind") {
        config.api.bind_address = bind.clone();
    }
    if let Some(port) = matches.get_one::<String>("http-port") {
        config.api.port = port.parse()?;
    }
    Ok(())
}

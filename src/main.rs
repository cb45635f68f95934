use clap::{value_parser, Arg, ArgAction, Command};
use log::LevelFilter;
use ltpa::cmd::{Cmd, DecodeCmd, KeyfileCmd, LtpaConfig, MakeCmd};
use std::path::PathBuf;

fn main() {
    let version = env!("LTPA_VERSION_INFO");
    let app = Command::new("ltpa")
        .version(version)
        .about("WebSphere LTPA key file and token tool")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .required(false)
                .help("json/json5 configuration file, overridden by `LTPA_*` environment variables"),
        )
        .subcommand(KeyfileCmd::cmd())
        .subcommand(DecodeCmd::cmd())
        .subcommand(MakeCmd::cmd())
        .get_matches();

    let config = LtpaConfig::init(app.get_one::<PathBuf>("config").map(|p| p.as_path()));
    let level = config
        .as_ref()
        .ok()
        .and_then(|c| c.log_level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    match config {
        Ok(config) => log::trace!("{:?}", config),
        Err(e) => {
            log::error!("load config failed, {e:#}");
            std::process::exit(2);
        }
    }

    if let Some((s, m)) = app.subcommand() {
        let r = match s {
            KeyfileCmd::NAME => KeyfileCmd.run(m),
            DecodeCmd::NAME => DecodeCmd.run(m),
            MakeCmd::NAME => MakeCmd.run(m),
            name => Err(anyhow::anyhow!("unsupport for {}", name)),
        };

        if let Err(e) = r {
            log::error!("{e:#}");
            std::process::exit(1);
        }
    } else {
        println!(
            "{} {} {}",
            env!("CARGO_PKG_NAME"),
            version,
            env!("LTPA_GIT_INFO")
        );
    }
}

use crate::Ltpa;
use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

pub trait Cmd {
    const NAME: &'static str;

    fn cmd() -> Command;

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()>;
}

mod config;
pub use config::LtpaConfig;

mod keyfile;
pub use keyfile::KeyfileCmd;

mod decode;
pub use decode::DecodeCmd;

mod make;
pub use make::MakeCmd;

fn keyfile_arg() -> Arg {
    Arg::new("keyfile")
        .short('k')
        .long("keyfile")
        .action(ArgAction::Set)
        .value_parser(value_parser!(PathBuf))
        .required(false)
        .help("the LTPA key file exported by WebSphere, defaults to the configured one")
}

fn password_arg() -> Arg {
    Arg::new("password")
        .long("password")
        .action(ArgAction::Set)
        .value_parser(value_parser!(String))
        .required(false)
        .help("the key file password, falls back to `LTPA_PASSWORD` and then to a prompt")
}

fn keyfile_path(m: &ArgMatches) -> anyhow::Result<PathBuf> {
    m.get_one::<PathBuf>("keyfile")
        .or(LtpaConfig::config().keyfile.as_ref())
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("no key file, use `--keyfile` or set `LTPA_KEYFILE`"))
}

fn password(m: &ArgMatches) -> anyhow::Result<String> {
    if let Some(p) = m
        .get_one::<String>("password")
        .or(LtpaConfig::config().password.as_ref())
    {
        return Ok(p.clone());
    }

    let p = rpassword::prompt_password("Key file password: ")?;
    anyhow::ensure!(!p.is_empty(), "password can not empty");
    Ok(p)
}

fn open_ltpa(m: &ArgMatches) -> anyhow::Result<Ltpa> {
    let path = keyfile_path(m)?;
    #[allow(unused_mut)]
    let mut password = password(m)?;
    let ltpa = Ltpa::from_keyfile(&path, password.as_str());
    #[cfg(feature = "sec-zeroize")]
    zeroize::Zeroize::zeroize(&mut password);

    ltpa.with_context(|| format!("unlock `{}` failed", path.display()))
}

use super::{keyfile_arg, keyfile_path, open_ltpa, password_arg, Cmd};
use crate::keyfile::read_keyfile;
use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};

#[derive(Default)]
pub struct KeyfileCmd;

impl Cmd for KeyfileCmd {
    const NAME: &'static str = "keyfile";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("show the key file metadata")
            .arg(keyfile_arg())
            .arg(password_arg())
            .arg(
                Arg::new("pem")
                    .long("pem")
                    .action(ArgAction::SetTrue)
                    .required(false)
                    .help("unlock the key file and print the RSA private key in PKCS #1 PEM"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        if m.get_flag("pem") {
            let ltpa = open_ltpa(m)?;
            print!("{}", ltpa.private_key_pem());
            return Ok(());
        }

        let path = keyfile_path(m)?;
        let keyfile =
            read_keyfile(&path).with_context(|| format!("read `{}` failed", path.display()))?;
        println!("{}", serde_json::to_string_pretty(&keyfile)?);
        Ok(())
    }
}

use super::{keyfile_arg, open_ltpa, password_arg, Cmd};
use crate::token::TokenVariant;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

#[derive(Default)]
pub struct DecodeCmd;

impl Cmd for DecodeCmd {
    const NAME: &'static str = "decode";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("decrypt a token and print its content as JSON")
            .arg(
                Arg::new("token")
                    .value_name("TOKEN")
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(String))
                    .required(true)
                    .help("the base64 token, the `LtpaToken2` cookie value by default"),
            )
            .arg(keyfile_arg())
            .arg(password_arg())
            .arg(
                Arg::new("v1")
                    .long("v1")
                    .action(ArgAction::SetTrue)
                    .required(false)
                    .help("the token is an `LtpaToken`"),
            )
            .arg(
                Arg::new("verify")
                    .long("verify")
                    .action(ArgAction::SetTrue)
                    .required(false)
                    .conflicts_with("v1")
                    .help("check the `LtpaToken2` signature"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let ltpa = open_ltpa(m)?;
        let variant = if m.get_flag("v1") {
            TokenVariant::V1
        } else {
            TokenVariant::V2
        };

        let token = m
            .get_one::<String>("token")
            .ok_or_else(|| anyhow::anyhow!("no token"))?;
        let content = ltpa.decode_variant(token, variant)?;

        if m.get_flag("verify") {
            ltpa.verify(&content)?;
            log::info!("signature verified");
        }

        println!("{}", serde_json::to_string_pretty(&content)?);
        Ok(())
    }
}

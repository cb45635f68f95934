use super::{keyfile_arg, open_ltpa, password_arg, Cmd, LtpaConfig};
use crate::token::TokenInput;
use chrono::Utc;
use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};

#[derive(Default)]
pub struct MakeCmd;

impl MakeCmd {
    // epoch milliseconds
    fn expires(m: &ArgMatches) -> anyhow::Result<u64> {
        if let Some(&x) = m.get_one::<u64>("expires") {
            return Ok(x);
        }

        let ttl = i64::try_from(LtpaConfig::config().token_ttl_secs)?;
        let expires = ttl
            .checked_mul(1000)
            .and_then(|ttl| Utc::now().timestamp_millis().checked_add(ttl))
            .ok_or_else(|| anyhow::anyhow!("token ttl `{ttl}` seconds is too large"))?;
        Ok(u64::try_from(expires)?)
    }
}

impl Cmd for MakeCmd {
    const NAME: &'static str = "make";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("issue an `LtpaToken2`")
            .arg(keyfile_arg())
            .arg(password_arg())
            .arg(
                Arg::new("user")
                    .short('u')
                    .long("user")
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(String))
                    .help("the user name, e.g. `user:ldap.host:389/CN=someone,O=org`"),
            )
            .arg(
                Arg::new("body")
                    .long("body")
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(String))
                    .help("a complete `$` separated token body used as is"),
            )
            .group(
                ArgGroup::new("content")
                    .args(["user", "body"])
                    .required(true)
                    .multiple(false),
            )
            .arg(
                Arg::new("expires")
                    .long("expires")
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(u64))
                    .required(false)
                    .help("expiry in epoch milliseconds, defaults to now plus the configured ttl"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let expires = Self::expires(m)?;
        let input = match (m.get_one::<String>("user"), m.get_one::<String>("body")) {
            (Some(u), _) => TokenInput::for_user(u.as_str(), expires),
            (None, Some(body)) => TokenInput::raw(body.as_str(), expires),
            (None, None) => anyhow::bail!("either `--user` or `--body` is required"),
        };

        let ltpa = open_ltpa(m)?;
        println!("{}", ltpa.make_token(&input)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MakeCmd;
    use crate::cmd::Cmd;

    #[test]
    fn expires_from_args() {
        let m = MakeCmd::cmd()
            .try_get_matches_from(["make", "-u", "someone", "--expires", "1522965060000"])
            .unwrap();
        assert_eq!(MakeCmd::expires(&m).unwrap(), 1522965060000);
    }

    #[test]
    fn expires_default_in_future() {
        let m = MakeCmd::cmd()
            .try_get_matches_from(["make", "--body", "u:x"])
            .unwrap();
        let now = chrono::Utc::now().timestamp_millis() as u64;
        assert!(MakeCmd::expires(&m).unwrap() > now);
    }

    #[test]
    fn user_or_body() {
        assert!(MakeCmd::cmd().try_get_matches_from(["make"]).is_err());
        assert!(MakeCmd::cmd()
            .try_get_matches_from(["make", "-u", "a", "--body", "b"])
            .is_err());
    }
}

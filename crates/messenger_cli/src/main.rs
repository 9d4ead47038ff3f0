use anyhow::{Context as _, anyhow};
use clap::{Parser, Subcommand};
use messenger_backend::MessengerService;
use messenger_domain::{PreferenceValue, SettingKey, should_display_contact_letter};
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "messenger")]
#[command(about = "Inspect and edit messenger settings and conversations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved settings snapshot
    Show,

    /// Print one stored preference
    Get {
        #[arg(value_parser = parse_key)]
        key: SettingKey,
    },

    /// Store a preference and print the rebuilt snapshot
    Set {
        #[arg(value_parser = parse_key)]
        key: SettingKey,
        /// Parsed per the key's type; string sets are comma-separated
        value: String,
    },

    /// Delete a stored preference
    Remove {
        #[arg(value_parser = parse_key)]
        key: SettingKey,
    },

    /// List stored conversations, pinned first
    Conversations,
}

fn parse_key(raw: &str) -> Result<SettingKey, String> {
    SettingKey::parse(raw).ok_or_else(|| format!("unknown setting key: {raw}"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let service = MessengerService::new()?;
    let mut stdout = std::io::stdout().lock();
    run(cli.command, &service, &mut stdout)?;
    service.flush().context("failed to persist preferences")?;
    Ok(())
}

fn run(command: Commands, service: &MessengerService, out: &mut impl Write) -> anyhow::Result<()> {
    let settings = service.settings();
    match command {
        Commands::Show => {
            print_json(out, settings.get().as_ref())?;
        }
        Commands::Get { key } => match settings.store().get(key.as_key()) {
            Some(value) => print_json(out, &value)?,
            None => writeln!(out, "{key} is not set")?,
        },
        Commands::Set { key, value } => {
            let value = PreferenceValue::parse(key.kind(), &value)
                .map_err(|err| anyhow!("invalid value for {key}: {err}"))?;
            tracing::info!(key = %key, "updating setting");
            let snapshot = settings.set_value(key, value);
            print_json(out, snapshot.as_ref())?;
        }
        Commands::Remove { key } => {
            tracing::info!(key = %key, "removing setting");
            settings.remove_value(key);
            writeln!(out, "{key} removed")?;
        }
        Commands::Conversations => {
            for conversation in service.conversations()? {
                let letter = should_display_contact_letter(&conversation);
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    conversation.id,
                    conversation.title.as_deref().unwrap_or_default(),
                    conversation.recipients().join(", "),
                    if letter { "letter" } else { "image" },
                )?;
            }
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to encode output")?;
    writeln!(out, "{text}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use messenger_backend::HostPlatform;
    use std::sync::Arc;

    fn open(dir: &tempfile::TempDir) -> Arc<MessengerService> {
        MessengerService::open_at(dir.path(), Arc::new(HostPlatform::default())).unwrap()
    }

    fn run_to_string(command: Commands, service: &MessengerService) -> String {
        let mut out = Vec::new();
        run(command, service, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn cli_parses_known_keys_only() {
        let cli = Cli::try_parse_from(["messenger", "set", "base_theme", "dark"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Set { key: SettingKey::BaseTheme, ref value } if value == "dark"
        ));
        assert!(Cli::try_parse_from(["messenger", "get", "no_such_key"]).is_err());
    }

    #[test]
    fn set_get_and_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let service = open(&dir);

        let shown = run_to_string(
            Commands::Set {
                key: SettingKey::NotificationActions,
                value: "reply, call".to_owned(),
            },
            &service,
        );
        let snapshot: serde_json::Value = serde_json::from_str(&shown).unwrap();
        assert_eq!(
            snapshot["notification_actions"],
            serde_json::json!(["reply", "call"])
        );

        let got = run_to_string(
            Commands::Get {
                key: SettingKey::NotificationActions,
            },
            &service,
        );
        let value: PreferenceValue = serde_json::from_str(&got).unwrap();
        assert_eq!(value.as_string_set().map(|set| set.len()), Some(2));

        run_to_string(
            Commands::Remove {
                key: SettingKey::NotificationActions,
            },
            &service,
        );
        let got = run_to_string(
            Commands::Get {
                key: SettingKey::NotificationActions,
            },
            &service,
        );
        assert_eq!(got.trim(), "notification_actions is not set");
    }

    #[test]
    fn set_rejects_values_of_the_wrong_kind() {
        let dir = tempfile::tempdir().unwrap();
        let service = open(&dir);
        let err = run(
            Commands::Set {
                key: SettingKey::Snooze,
                value: "soon".to_owned(),
            },
            &service,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid value for snooze"));
    }

    #[test]
    fn conversations_list_letter_flag() {
        let dir = tempfile::tempdir().unwrap();
        let service = open(&dir);
        service
            .add_conversation("Luke Klinker", "(515) 991-1493", 10)
            .unwrap();
        service
            .add_conversation("Group", "555-0100, 555-0199", 20)
            .unwrap();

        let listed = run_to_string(Commands::Conversations, &service);
        let lines = listed.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("\tGroup\t555-0100, 555-0199\timage"));
        assert!(lines[1].ends_with("\tLuke Klinker\t(515) 991-1493\tletter"));
    }
}

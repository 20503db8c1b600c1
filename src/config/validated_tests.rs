//! Tests for merging and validating configuration.

use std::path::PathBuf;
use std::time::Duration;

use super::cli::{Cli, Command, PostArgs};
use super::error::field;
use super::toml::TomlConfig;
use super::validated::{ValidatedConfig, write_default_config};
use super::ConfigError;
use crate::credential::CREDENTIAL_PREFIX;
use crate::credential::mock::MockCredentialStore;
use crate::slack::ParseMode;

fn cli(args: &[&str]) -> Cli {
    let mut full = vec!["slack-post"];
    full.extend_from_slice(args);
    Cli::parse_from_iter(full)
}

fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

fn validated(args: &[&str], content: Option<&str>) -> ValidatedConfig {
    let toml = content.map(toml);
    ValidatedConfig::from_raw(&cli(args), toml.as_ref()).unwrap()
}

fn post_args(args: &[&str]) -> PostArgs {
    let mut full = vec!["post"];
    full.extend_from_slice(args);
    match cli(&full).command {
        Command::Post(args) => args,
        other => panic!("Expected Post, got {other:?}"),
    }
}

mod defaults {
    use super::*;

    #[test]
    fn built_in_defaults_apply() {
        let config = validated(&["post"], None);

        assert_eq!(config.base_url.as_str(), "https://slack.com/");
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.initial_backoff, Duration::from_millis(1000));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.token_name, "");
        assert_eq!(config.explicit_token, None);
        assert!(!config.verbose);
    }

    #[test]
    fn display_does_not_leak_token() {
        let config = validated(&["--token", "xoxb-secret", "post"], None);
        let shown = config.to_string();

        assert!(!shown.contains("xoxb-secret"));
        assert!(shown.contains("explicit_token: true"));
    }
}

mod precedence {
    use super::*;

    const FILE: &str = r#"
        [slack]
        base_url = "http://toml.example"
        token = "xoxb-toml"
        token_name = "toml-name"
        timeout_secs = 7

        [retry]
        max_attempts = 4
        initial_backoff_ms = 400

        [credentials]
        path = "/toml/credentials.json"
    "#;

    #[test]
    fn toml_overrides_defaults() {
        let config = validated(&["post"], Some(FILE));

        assert_eq!(config.base_url.as_str(), "http://toml.example/");
        assert_eq!(config.explicit_token.as_deref(), Some("xoxb-toml"));
        assert_eq!(config.token_name, "toml-name");
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.retry.max_attempts, 4);
        assert_eq!(config.retry.initial_backoff, Duration::from_millis(400));
        assert_eq!(
            config.credentials_path,
            Some(PathBuf::from("/toml/credentials.json"))
        );
    }

    #[test]
    fn cli_overrides_toml() {
        let config = validated(
            &[
                "--base-url",
                "http://cli.example",
                "--token",
                "xoxb-cli",
                "--token-name",
                "cli-name",
                "--timeout",
                "2",
                "--retry-max",
                "9",
                "--retry-delay-ms",
                "10",
                "--credentials-file",
                "/cli/credentials.json",
                "post",
            ],
            Some(FILE),
        );

        assert_eq!(config.base_url.as_str(), "http://cli.example/");
        assert_eq!(config.explicit_token.as_deref(), Some("xoxb-cli"));
        assert_eq!(config.token_name, "cli-name");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.retry.max_attempts, 9);
        assert_eq!(config.retry.initial_backoff, Duration::from_millis(10));
        assert_eq!(
            config.credentials_path,
            Some(PathBuf::from("/cli/credentials.json"))
        );
    }

    #[test]
    fn empty_token_counts_as_unset() {
        let config = validated(&["--token", "", "post"], None);
        assert_eq!(config.explicit_token, None);
    }

    #[test]
    fn zero_backoff_is_accepted() {
        let config = validated(&["--retry-delay-ms", "0", "post"], None);
        assert_eq!(config.retry.initial_backoff, Duration::ZERO);
    }
}

mod validation {
    use super::*;

    fn error(args: &[&str], content: Option<&str>) -> ConfigError {
        let toml = content.map(toml);
        ValidatedConfig::from_raw(&cli(args), toml.as_ref()).unwrap_err()
    }

    #[test]
    fn rejects_zero_max_attempts() {
        let err = error(&["--retry-max", "0", "post"], None);
        assert!(matches!(err, ConfigError::InvalidRetry(_)));
    }

    #[test]
    fn rejects_zero_max_attempts_from_toml() {
        let err = error(&["post"], Some("[retry]\nmax_attempts = 0"));
        assert!(matches!(err, ConfigError::InvalidRetry(_)));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = error(&["--timeout", "0", "post"], None);
        assert!(matches!(
            err,
            ConfigError::InvalidDuration {
                field: "timeout",
                ..
            }
        ));
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = error(&["--base-url", "not a url", "post"], None);
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = error(&["--base-url", "ftp://slack.com", "post"], None);

        match err {
            ConfigError::InvalidUrl { reason, .. } => assert!(reason.contains("http")),
            other => panic!("Expected InvalidUrl, got {other:?}"),
        }
    }

    #[test]
    fn load_reads_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("slack-post.toml");
        std::fs::write(&path, "[slack]\ndefault_channel = \"C9\"\n").unwrap();

        let path_str = path.to_str().unwrap();
        let config = ValidatedConfig::load(&cli(&["--config", path_str, "post"])).unwrap();

        assert_eq!(config.default_channel.as_deref(), Some("C9"));
    }

    #[test]
    fn load_reports_missing_config_file() {
        let result = ValidatedConfig::load(&cli(&["--config", "/nonexistent/x.toml", "post"]));
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}

mod message {
    use super::*;

    #[test]
    fn builds_arguments_from_flags() {
        let config = validated(&["post"], None);
        let args = post_args(&[
            "--channel",
            "C1",
            "--text",
            "hello",
            "--thread-ts",
            "1.2",
            "--parse",
            "none",
            "--link-names",
            "--mrkdwn",
            "false",
        ]);

        let message = config.resolve_message(&args).unwrap();

        assert_eq!(message.channel, "C1");
        assert_eq!(message.text.as_deref(), Some("hello"));
        assert_eq!(message.options.thread_ts.as_deref(), Some("1.2"));
        assert_eq!(message.options.parse, Some(ParseMode::None));
        assert_eq!(message.options.link_names, Some(true));
        assert_eq!(message.options.reply_broadcast, None);
        assert_eq!(message.options.mrkdwn, Some(false));
        assert_eq!(message.options.unfurl_links, None);
    }

    #[test]
    fn falls_back_to_toml_defaults() {
        let config = validated(
            &["post"],
            Some(
                r##"
                [slack]
                default_channel = "#alerts"
                username = "file-bot"
                icon_emoji = ":bell:"
                "##,
            ),
        );

        let message = config.resolve_message(&post_args(&["--text", "x"])).unwrap();

        assert_eq!(message.channel, "#alerts");
        assert_eq!(message.options.username.as_deref(), Some("file-bot"));
        assert_eq!(message.options.icon_emoji.as_deref(), Some(":bell:"));
    }

    #[test]
    fn flags_override_toml_defaults() {
        let config = validated(
            &["post"],
            Some("[slack]\ndefault_channel = \"#alerts\"\nusername = \"file-bot\"\n"),
        );
        let args = post_args(&["--channel", "#dev", "--text", "x", "--username", "cli-bot"]);

        let message = config.resolve_message(&args).unwrap();

        assert_eq!(message.channel, "#dev");
        assert_eq!(message.options.username.as_deref(), Some("cli-bot"));
    }

    #[test]
    fn missing_channel_is_an_error() {
        let config = validated(&["post"], None);
        let err = config.resolve_message(&post_args(&["--text", "x"])).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingRequired {
                field: field::CHANNEL,
                ..
            }
        ));
    }

    #[test]
    fn message_without_content_is_an_error() {
        let config = validated(&["post"], None);
        let err = config.resolve_message(&post_args(&["--channel", "C1"])).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingRequired {
                field: field::CONTENT,
                ..
            }
        ));
    }

    #[test]
    fn blocks_alone_are_enough_content() {
        let config = validated(&["post"], None);
        let args = post_args(&["--channel", "C1", "--blocks", r#"[{"type":"divider"}]"#]);

        let message = config.resolve_message(&args).unwrap();

        assert_eq!(message.text, None);
        assert_eq!(message.options.blocks.as_deref(), Some(r#"[{"type":"divider"}]"#));
    }

    #[test]
    fn malformed_json_option_is_rejected() {
        let config = validated(&["post"], None);
        let args = post_args(&["--channel", "C1", "--text", "x", "--attachments", "[{"]);

        let err = config.resolve_message(&args).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidJson {
                field: field::ATTACHMENTS,
                ..
            }
        ));
    }

    #[test]
    fn malformed_metadata_is_rejected() {
        let config = validated(&["post"], None);
        let args = post_args(&["--channel", "C1", "--text", "x", "--metadata", "nope"]);

        let err = config.resolve_message(&args).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidJson {
                field: field::METADATA,
                ..
            }
        ));
    }
}

mod token {
    use super::*;

    fn store_with_default(token: &str) -> MockCredentialStore {
        let store = MockCredentialStore::default();
        store.insert_raw(CREDENTIAL_PREFIX, &format!(r#"{{"access_token":"{token}"}}"#));
        store
    }

    #[test]
    fn explicit_token_wins_over_store() {
        let config = validated(&["--token", "xoxb-cli", "post"], None);
        let store = store_with_default("xoxb-stored");

        assert_eq!(config.resolve_token(&store).as_deref(), Some("xoxb-cli"));
    }

    #[test]
    fn toml_token_wins_over_store() {
        let config = validated(&["post"], Some("[slack]\ntoken = \"xoxb-toml\""));
        let store = store_with_default("xoxb-stored");

        assert_eq!(config.resolve_token(&store).as_deref(), Some("xoxb-toml"));
    }

    #[test]
    fn falls_back_to_stored_credential() {
        let config = validated(&["post"], None);
        let store = store_with_default("xoxb-stored");

        assert_eq!(config.resolve_token(&store).as_deref(), Some("xoxb-stored"));
    }

    #[test]
    fn uses_named_credential() {
        let config = validated(&["--token-name", "work", "post"], None);
        let store = store_with_default("xoxb-default");
        store.insert_raw("SLACK_credentialwork", r#"{"access_token":"xoxb-work"}"#);

        assert_eq!(config.resolve_token(&store).as_deref(), Some("xoxb-work"));
    }

    #[test]
    fn no_token_anywhere_is_none() {
        let config = validated(&["post"], None);
        let store = MockCredentialStore::default();

        assert_eq!(config.resolve_token(&store), None);
    }

    #[test]
    fn credential_store_uses_configured_path() {
        let config = validated(&["--credentials-file", "/tmp/c.json", "post"], None);
        let store = config.credential_store().unwrap();

        assert_eq!(store.path(), std::path::Path::new("/tmp/c.json"));
    }

    #[test]
    fn credential_store_without_path_is_an_error() {
        let mut config = validated(&["post"], None);
        config.credentials_path = None;

        assert!(matches!(
            config.credential_store(),
            Err(ConfigError::NoCredentialsPath)
        ));
    }
}

mod api {
    use super::*;

    #[test]
    fn api_uses_configured_endpoint_and_retry() {
        let config = validated(
            &["--base-url", "http://localhost:9000", "--retry-max", "7", "post"],
            None,
        );

        let api = config.api(());

        assert_eq!(api.base_url().as_str(), "http://localhost:9000/");
        assert_eq!(api.retry_config().max_attempts, 7);
        assert_eq!(
            api.endpoint("chat.postMessage").unwrap().as_str(),
            "http://localhost:9000/api/chat.postMessage"
        );
    }
}

mod init {
    use super::*;

    #[test]
    fn writes_template_to_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("slack-post.toml");

        write_default_config(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(TomlConfig::parse(&content).is_ok());
    }

    #[test]
    fn reports_unwritable_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("slack-post.toml");

        let result = write_default_config(&path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}

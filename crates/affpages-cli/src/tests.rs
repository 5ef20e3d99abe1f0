use super::*;

#[test]
fn generate_defaults_leave_overrides_unset() {
    let cli = Cli::try_parse_from(["affpages", "generate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Generate(GenerateArgs {
            target: None,
            page_size: None,
            page_limit: None,
            deeplinks: false,
            overwrite: false,
            dry_run: false,
            ..
        })
    ));
}

#[test]
fn generate_parses_numeric_overrides() {
    let cli = Cli::try_parse_from([
        "affpages",
        "generate",
        "--target",
        "15",
        "--page-size",
        "20",
        "--page-limit",
        "2",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Commands::Generate(GenerateArgs {
            target: Some(15),
            page_size: Some(20),
            page_limit: Some(2),
            ..
        })
    ));
}

#[test]
fn generate_keyword_is_repeatable() {
    let cli = Cli::try_parse_from([
        "affpages",
        "generate",
        "--keyword",
        "노트북",
        "--keyword",
        "무선 이어폰",
    ])
    .unwrap();

    let Commands::Generate(args) = cli.command else {
        panic!("expected generate command");
    };
    assert_eq!(args.keywords, ["노트북", "무선 이어폰"]);
}

#[test]
fn generate_flags_combine() {
    let cli = Cli::try_parse_from([
        "affpages",
        "generate",
        "--deeplinks",
        "--overwrite",
        "--dry-run",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Commands::Generate(GenerateArgs {
            deeplinks: true,
            overwrite: true,
            dry_run: true,
            ..
        })
    ));
}

#[test]
fn generate_rejects_non_numeric_target() {
    assert!(Cli::try_parse_from(["affpages", "generate", "--target", "many"]).is_err());
}

#[test]
fn search_defaults_to_first_page() {
    let cli = Cli::try_parse_from(["affpages", "search", "캠핑 의자"]).unwrap();

    assert!(matches!(
        cli.command,
        Commands::Search {
            ref keyword,
            page: 1,
            page_size: None,
        } if keyword == "캠핑 의자"
    ));
}

#[test]
fn search_with_page_and_size() {
    let cli = Cli::try_parse_from([
        "affpages",
        "search",
        "텐트",
        "--page",
        "3",
        "--page-size",
        "50",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Commands::Search {
            page: 3,
            page_size: Some(50),
            ..
        }
    ));
}

#[test]
fn search_requires_keyword() {
    assert!(Cli::try_parse_from(["affpages", "search"]).is_err());
}

#[test]
fn parses_keywords_command() {
    let cli = Cli::try_parse_from(["affpages", "keywords"]).unwrap();
    assert!(matches!(cli.command, Commands::Keywords));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["affpages"]).is_err());
}

mod pool {
    use std::path::PathBuf;

    use affpages_core::Credentials;

    use super::*;

    fn config(keywords_path: Option<PathBuf>) -> AppConfig {
        AppConfig {
            credentials: Credentials::new("ak", "sk").unwrap(),
            api_domain: "http://127.0.0.1:9".to_owned(),
            log_level: "info".to_owned(),
            request_timeout_secs: 5,
            user_agent: "affpages-test".to_owned(),
            output_dir: PathBuf::from("./products"),
            site_base_url: None,
            sitemap_path: PathBuf::from("./sitemap.xml"),
            keywords_path,
            target_count: 10,
            page_size: 10,
            page_limit: 3,
        }
    }

    #[test]
    fn overrides_win_over_file_and_builtin() {
        let pool = resolve_pool(
            &config(Some(PathBuf::from("/nonexistent/keywords.yaml"))),
            &["텐트".to_owned()],
        )
        .unwrap();

        assert_eq!(pool.iter().collect::<Vec<_>>(), ["텐트"]);
    }

    #[test]
    fn keywords_file_is_used_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.yaml");
        std::fs::write(&path, "keywords:\n  - 랜턴\n  - 버너\n").unwrap();

        let pool = resolve_pool(&config(Some(path)), &[]).unwrap();

        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn builtin_pool_without_file() {
        let pool = resolve_pool(&config(None), &[]).unwrap();
        assert_eq!(pool, KeywordPool::builtin());
    }

    #[test]
    fn duplicate_overrides_are_rejected() {
        let overrides = ["텐트".to_owned(), "텐트".to_owned()];
        assert!(resolve_pool(&config(None), &overrides).is_err());
    }
}

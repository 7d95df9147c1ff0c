//! Configuration loading tests

use lexivec_infrastructure::config::loader::ConfigLoader;
use lexivec_infrastructure::config::AppConfig;

#[test]
fn defaults_apply_without_any_file() {
    figment::Jail::expect_with(|_jail| {
        let config = ConfigLoader::new().load().expect("load failed");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.search_index.index_name, "articles");
        assert_eq!(config.search_index.provider, "elasticsearch");
        assert_eq!(config.search_index.fuzziness, 2);
        assert_eq!(config.search_index.knn.k, 5);
        assert_eq!(config.embedding.dimensions, 512);
        Ok(())
    });
}

#[test]
fn toml_file_overrides_defaults() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "lexivec.toml",
            r#"
                [server]
                port = 9100

                [search_index]
                provider = "memory"
                index_name = "articles-test"
                fuzziness = 0

                [articles]
                source = "null"
                titles = ["Semantic search", "Rabies"]
            "#,
        )?;

        let config = ConfigLoader::new().load().expect("load failed");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.search_index.provider, "memory");
        assert_eq!(config.search_index.index_name, "articles-test");
        assert_eq!(config.search_index.fuzziness, 0);
        assert_eq!(
            config.articles.titles,
            vec!["Semantic search".to_string(), "Rabies".to_string()]
        );
        Ok(())
    });
}

#[test]
fn environment_overrides_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "lexivec.toml",
            r#"
                [server]
                port = 9100
            "#,
        )?;
        jail.set_env("LEXIVEC_SERVER__PORT", "9200");
        jail.set_env("LEXIVEC_SEARCH_INDEX__FUZZINESS", "1");

        let config = ConfigLoader::new().load().expect("load failed");
        assert_eq!(config.server.port, 9200);
        assert_eq!(config.search_index.fuzziness, 1);
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "lexivec.toml",
            r#"
                [search_index]
                fuzziness = 7
            "#,
        )?;
        assert!(ConfigLoader::new().load().is_err());
        Ok(())
    });
}

#[test]
fn explicit_missing_path_is_an_error() {
    let result = ConfigLoader::new()
        .with_config_path("/definitely/not/here.toml")
        .load();
    assert!(result.is_err());
}

#[test]
fn validation_is_exposed_on_the_config_itself() {
    let mut config = AppConfig::default();
    config.search_index.knn.num_candidates = 1;
    assert!(config.validate().is_err());
}

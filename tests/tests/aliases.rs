use tests::prelude::*;

use pretty_assertions::assert_eq;
use strainer::alias::FnAliasResolver;

#[test]
fn suffix_aliases_are_enabled_by_default() {
    let fixture = Fixture::new();
    let context = fixture.context();

    for (path, resolved) in [
        ("address.city", "addressEntities.city"),
        ("addressEntities.city", "addressEntities.city"),
        ("job.title", "jobEntity.title"),
        ("jobEntity.company.name", "jobEntity.company.name"),
    ] {
        let info = assert_ok!(context.resolve_field_path(fixture.person, path));
        assert_eq!(info.resolved_path, resolved);
        assert_eq!(info.original_path, path);
    }
}

#[test]
fn snake_case_aliases_from_configuration() {
    let fixture = Fixture::new();
    let config = assert_ok!(SearchConfig::from_json(r#"{ "snake_case_aliases": true }"#));
    let context = assert_ok!(fixture.try_context(|builder| {
        builder.config(config);
    }));

    let (predicate, log) = assert_ok!(evaluate(
        &context,
        params!("first_name" => ["John"], "job_entity.title" => ["Engineer"], "address.zip_code" => ["78370"]),
        &[]
    ));

    assert_eq!(
        predicate.map(|p| p.to_string()).as_deref(),
        Some(
            "((firstName = 'John' AND jobEntity.title = 'Engineer') AND \
             addressEntities.zipCode = '78370')"
        )
    );
    assert_eq!(log.join_paths(), ["jobEntity", "addressEntities"]);
}

#[test]
fn suffix_aliases_can_be_disabled() {
    let fixture = Fixture::new();
    let context = assert_ok!(fixture.try_context(|builder| {
        builder.config(SearchConfig {
            alias_field_suffixes: vec![],
            ..SearchConfig::default()
        });
    }));

    let err = assert_err_code!(
        context.resolve_field_path(fixture.person, "address.city"),
        "INVALID_FIELD_PATH"
    );
    assert_eq!(err.invalid_segment(), Some("address"));
}

#[test]
fn aliases_are_resolved_against_the_owning_type() {
    let fixture = Fixture::new();
    let context = assert_ok!(fixture.try_context(|builder| {
        builder.alias_resolver(FnAliasResolver::new(|owner, field| {
            match (owner.name.as_str(), field.name.as_str()) {
                ("Address", "city") => vec!["town".to_string()],
                ("Address", "zipCode") => vec!["zip".to_string(), "postcode".to_string()],
                _ => vec![],
            }
        }));
    }));

    for (path, resolved) in [
        ("address.town", "addressEntities.city"),
        ("address.zip", "addressEntities.zipCode"),
        ("address.postcode", "addressEntities.zipCode"),
    ] {
        let info = assert_ok!(context.resolve_field_path(fixture.person, path));
        assert_eq!(info.resolved_path, resolved);
    }

    // `town` is an alias of Address only
    assert_err_code!(
        context.resolve_field_path(fixture.person, "town"),
        "INVALID_FIELD_PATH"
    );
    assert_eq!(context.alias_resolution().resolve(fixture.person, "town"), "town");
    assert_eq!(context.alias_resolution().resolve(fixture.address, "town"), "city");
}

#[test]
fn inherited_fields_have_aliases() {
    let fixture = Fixture::new();
    let context = assert_ok!(fixture.try_context(|builder| {
        builder.config(SearchConfig {
            snake_case_aliases: true,
            ..SearchConfig::default()
        });
    }));

    let info = assert_ok!(context.resolve_field_path(fixture.person, "created_on"));
    assert_eq!(info.resolved_path, "createdOn");
    assert_eq!(
        context.schema().entity(info.terminal_property().map(|p| p.declaring_type).unwrap()).name,
        "JpaPersistable"
    );
}

#[test]
fn builder_keeps_alias_resolvers_across_builds() {
    let fixture = Fixture::new();
    let mut builder = SearchContext::builder(fixture.schema.clone());
    builder.alias_resolver(FnAliasResolver::new(|owner, field| {
        if owner.name == "Person" && field.name == "email" {
            vec!["mail".to_string()]
        } else {
            vec![]
        }
    }));

    let first = assert_ok!(builder.build());
    let second = assert_ok!(builder.build());

    for context in [&first, &second] {
        let info = assert_ok!(context.resolve_field_path(fixture.person, "mail"));
        assert_eq!(info.resolved_path, "email");
    }
}

use tests::prelude::*;

use pretty_assertions::assert_eq;

#[test]
fn single_scalar_field() {
    let context = Fixture::new().context();
    let person = assert_ok!(context.entity("Person"));

    let expr = assert_ok!(context.build_expression_tree(person, params!("firstName" => ["John"])));
    let fields = expr.to_field_expressions(false);

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].field.resolved_path, "firstName");
    assert_eq!(fields[0].operator, Operator::Equals);
    assert_eq!(fields[0].values, [FieldValue::from("John")]);

    let spec = assert_ok!(context.create_specification::<RecordingBuilder>(&expr, &[]));
    let mut builder = RecordingBuilder::new();
    let predicate = assert_some!(assert_ok!(spec.to_predicate(&mut builder)));

    assert_eq!(predicate.to_string(), "firstName = 'John'");
    assert_eq!(builder.log.distinct_count(), 1);
    assert!(builder.log.join_paths().is_empty());
}

#[test]
fn aliased_association() {
    let context = Fixture::new().context();

    let (predicate, log) =
        assert_ok!(evaluate(&context, params!("address.city" => ["Plaisir"]), &[]));

    assert_eq!(
        predicate,
        Some(Pred::Eq(
            "addressEntities.city".to_string(),
            FieldValue::from("Plaisir")
        ))
    );
    assert_eq!(log.join_paths(), ["addressEntities"]);
    assert_eq!(
        log.join("addressEntities"),
        Some(&Op::Join {
            path: "addressEntities".to_string(),
            kind: JoinKind::Inner,
            fetched: false,
        })
    );
}

#[test]
fn null_token_filters_on_null() {
    let context = Fixture::new().context();

    let (predicate, _) =
        assert_ok!(evaluate(&context, params!("nickname" => ["null"]), &[]));

    assert_eq!(predicate, Some(Pred::IsNull("nickname".to_string())));
}

#[test]
fn null_token_on_collection_filters_on_emptiness() {
    let context = Fixture::new().context();

    let (predicate, _) =
        assert_ok!(evaluate(&context, params!("nickNames" => ["NULL"]), &[]));

    assert_eq!(predicate, Some(Pred::IsEmpty("nickNames".to_string())));
}

#[test]
fn unknown_field_is_rejected() {
    let context = Fixture::new().context();
    let person = assert_ok!(context.entity("Person"));

    let err = assert_err_code!(
        context.build_expression_tree(person, params!("unknownField" => ["x"])),
        "INVALID_FIELD_PATH"
    );

    assert_eq!(err.field_path(), Some("unknownField"));
    assert_eq!(err.invalid_segment(), Some("unknownField"));
    assert!(err.to_string().contains("unknownField"), "{err}");
    assert!(err.to_string().contains("Person"), "{err}");
}

#[test]
fn eager_joins_are_created_without_filters() {
    let context = Fixture::new().context();
    let handlers: Vec<Arc<dyn EntityJoinHandler>> = vec![Arc::new(FetchingEagerJoinHandler)];

    let (predicate, log) = assert_ok!(evaluate(
        &context,
        params!("firstName" => ["John"]),
        &handlers
    ));

    assert_eq!(predicate.map(|p| p.to_string()).as_deref(), Some("firstName = 'John'"));
    assert_eq!(log.join_paths(), ["nickNames", "jobEntity", "jobEntity.company"]);
    assert!(log.iter().all(|op| match op {
        Op::Join { kind, fetched, .. } => *kind == JoinKind::Left && *fetched,
        _ => true,
    }));
    assert_eq!(log.distinct_count(), 1);
}

#[test]
fn eager_join_is_reused_by_a_filter() {
    let context = Fixture::new().context();
    let handlers: Vec<Arc<dyn EntityJoinHandler>> = vec![Arc::new(FetchingEagerJoinHandler)];

    let (predicate, log) = assert_ok!(evaluate(
        &context,
        params!("job.title" => ["Engineer"], "job.company.name" => ["Acme"]),
        &handlers
    ));

    assert_eq!(
        predicate.map(|p| p.to_string()).as_deref(),
        Some("(jobEntity.title = 'Engineer' AND jobEntity.company.name = 'Acme')")
    );

    // Created once by the fetch pass, reused by both filters
    assert_some!(log.join("jobEntity"));
    assert_some!(log.join("jobEntity.company"));
    assert_eq!(log.count(|op| matches!(op, Op::Root)), 1);
}

#[test]
fn fetched_collection_is_filtered_through_its_join() {
    let context = Fixture::new().context();
    let handlers: Vec<Arc<dyn EntityJoinHandler>> = vec![Arc::new(FetchingEagerJoinHandler)];

    let (predicate, log) = assert_ok!(evaluate(
        &context,
        params!("nickNames" => ["Johnny"], "phoneNumbers" => ["0102"]),
        &handlers
    ));

    // `nickNames` is compared per joined value, `phoneNumbers` has no join
    assert_eq!(
        predicate,
        Some(Pred::And(
            Box::new(Pred::Eq("nickNames".to_string(), FieldValue::from("Johnny"))),
            Box::new(Pred::MemberOf("phoneNumbers".to_string(), FieldValue::from("0102"))),
        ))
    );
    assert_eq!(log.join_paths(), ["nickNames", "jobEntity", "jobEntity.company"]);
    assert_some!(log.join("nickNames"));
}

#[test]
fn empty_request_has_no_predicate() {
    let context = Fixture::new().context();

    let (predicate, log) = assert_ok!(evaluate(&context, vec![], &[]));

    assert_none!(predicate);
    assert_eq!(log.distinct_count(), 1);
}

#[test]
fn parameter_without_values_is_ignored() {
    let context = Fixture::new().context();

    let (predicate, _) = assert_ok!(evaluate(
        &context,
        params!("firstName" => [], "lastName" => ["Doe"]),
        &[]
    ));

    assert_eq!(predicate.map(|p| p.to_string()).as_deref(), Some("lastName = 'Doe'"));
}

#[test]
fn specification_can_be_evaluated_twice() {
    let context = Fixture::new().context();
    let person = assert_ok!(context.entity("Person"));
    let handlers: Vec<Arc<dyn EntityJoinHandler>> = vec![Arc::new(FetchingAllJoinHandler)];

    let expr = assert_ok!(context.build_expression_tree(person, params!("address.city" => ["Paris"])));
    let spec = assert_ok!(context.create_specification::<RecordingBuilder>(&expr, &handlers));

    let mut first = RecordingBuilder::new();
    let mut second = RecordingBuilder::new();
    let lhs = assert_ok!(spec.to_predicate(&mut first));
    let rhs = assert_ok!(spec.to_predicate(&mut second));

    assert_eq!(lhs, rhs);
    assert_eq!(first.log.join_paths(), second.log.join_paths());
}

use tests::prelude::*;

use pretty_assertions::assert_eq;
use strainer::join::{JoinDecision, JoinNode};
use strainer::path::PathStep;
use strainer::schema::{AnnotationKind, PropertyInfo};
use std::rc::Rc;

fn plan_paths(context: &SearchContext, handlers: &[Arc<dyn EntityJoinHandler>]) -> Vec<String> {
    let person = assert_ok!(context.entity("Person"));
    let plan = assert_ok!(context.compute_entity_joins(person, handlers));

    plan.joins().iter().map(|node| node.path.clone()).collect()
}

#[test]
fn root_associations_are_planned_up_front() {
    let context = Fixture::new().context();

    assert_eq!(
        plan_paths(&context, &[]),
        [
            "nickNames",
            "phoneNumbers",
            "addressEntities",
            "jobEntity",
            "vehicles",
            "characteristics",
            "tasks",
        ]
    );
}

#[test]
fn fetched_joins_are_planned_recursively() {
    let context = Fixture::new().context();
    let handlers: Vec<Arc<dyn EntityJoinHandler>> = vec![Arc::new(FetchingAllJoinHandler)];

    // Associations leading back to Person are skipped
    assert_eq!(
        plan_paths(&context, &handlers),
        [
            "nickNames",
            "phoneNumbers",
            "addressEntities",
            "jobEntity",
            "jobEntity.company",
            "vehicles",
            "characteristics",
            "tasks",
        ]
    );
}

#[test]
fn first_supporting_handler_decides() {
    struct LeftForVehicles;

    impl EntityJoinHandler for LeftForVehicles {
        fn supports(&self, property: &PropertyInfo) -> bool {
            property.name == "vehicles"
        }

        fn handle(&self, _property: &PropertyInfo) -> JoinDecision {
            JoinDecision {
                kind: JoinKind::Left,
                fetched: false,
            }
        }
    }

    let fixture = Fixture::new();
    let context = fixture.context();
    let handlers: Vec<Arc<dyn EntityJoinHandler>> =
        vec![Arc::new(LeftForVehicles), Arc::new(FetchingAllJoinHandler)];

    let plan = assert_ok!(context.compute_entity_joins(fixture.person, &handlers));

    let vehicles = assert_some!(plan.get("vehicles"));
    assert_eq!(vehicles.decision(), JoinDecision { kind: JoinKind::Left, fetched: false });

    let jobs = assert_some!(plan.get("jobEntity"));
    assert_eq!(jobs.decision(), JoinDecision::FETCH);
}

#[test]
fn nested_filter_joins_each_association() {
    let context = Fixture::new().context();

    let (predicate, log) = assert_ok!(evaluate(
        &context,
        params!("job.company.name" => ["Acme"]),
        &[]
    ));

    assert_eq!(log.join_paths(), ["jobEntity", "jobEntity.company"]);
    assert_eq!(
        predicate,
        Some(Pred::Eq(
            "jobEntity.company.name".to_string(),
            FieldValue::from("Acme")
        ))
    );
}

#[test]
fn embeddable_segment_uses_default_join() {
    let fixture = Fixture::new();
    let context = fixture.context();

    let info = assert_ok!(context.resolve_field_path(fixture.person, "address.location.latitude"));
    let plan = assert_ok!(context.compute_entity_joins(fixture.person, &[]));
    let node: Rc<JoinNode> = assert_some!(plan.nodes_for(&info));

    assert_eq!(node.path, "addressEntities.location");
    assert_eq!(node.decision(), JoinDecision::DEFAULT);
    assert_eq!(node.depth(), 2);
    assert_eq!(assert_some!(node.parent.as_ref()).path, "addressEntities");

    let (predicate, log) = assert_ok!(evaluate(
        &context,
        params!("address.location.latitude" => ["48.8"]),
        &[]
    ));

    assert_eq!(log.join_paths(), ["addressEntities", "addressEntities.location"]);
    assert_eq!(
        predicate.map(|p| p.to_string()).as_deref(),
        Some("addressEntities.location.latitude = 48.8")
    );
}

#[test]
fn map_entries_are_read_through_the_map_join() {
    let fixture = Fixture::new();
    let context = fixture.context();
    let handlers: Vec<Arc<dyn EntityJoinHandler>> = vec![Arc::new(FetchingAllJoinHandler)];

    let info = assert_ok!(context.resolve_field_path(fixture.person, "tasks.key.name"));
    let plan = assert_ok!(context.compute_entity_joins(fixture.person, &handlers));
    let node = assert_some!(plan.nodes_for(&info));

    assert_eq!(node.path, "tasks.key");
    assert_eq!(node.step, PathStep::MapKey);
    assert_eq!(node.kind, JoinKind::Left);
    assert!(!node.fetched);

    let (predicate, log) = assert_ok!(evaluate(
        &context,
        params!("tasks.key.name" => ["Review"], "characteristics.value" => ["tall"]),
        &handlers
    ));

    assert_some!(log.join("tasks"));
    assert_some!(log.join("tasks.key"));
    assert_some!(log.join("characteristics"));
    assert_eq!(
        predicate.map(|p| p.to_string()).as_deref(),
        Some("(tasks.key.name = 'Review' AND characteristics.value = 'tall')")
    );
}

#[test]
fn restricted_join_annotations() {
    let fixture = Fixture::new();
    let context = assert_ok!(fixture.try_context(|builder| {
        builder.join_annotations(vec![AnnotationKind::ManyToMany]);
    }));

    assert_eq!(plan_paths(&context, &[]), ["addressEntities"]);
}

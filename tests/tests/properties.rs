use tests::prelude::*;

use pretty_assertions::assert_eq;
use strainer::alias::FnAliasResolver;
use strainer::convert::{DefaultConversions, TypeConversionRegistry};
use strainer::join::{EntityJoins, JoinNode};
use strainer::stmt::Type;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn alias_for(field: &'static str, alias: &'static str) -> impl strainer::alias::AliasResolver {
    FnAliasResolver::new(move |owner, declared| {
        if owner.name == "Person" && declared.name == field {
            vec![alias.to_string()]
        } else {
            vec![]
        }
    })
}

#[test]
fn alias_last_registration_wins() {
    let fixture = Fixture::new();
    let context = assert_ok!(fixture.try_context(|builder| {
        builder
            .alias_resolver(alias_for("firstName", "name"))
            .alias_resolver(alias_for("lastName", "name"));
    }));

    assert_eq!(context.alias_resolution().resolve(fixture.person, "name"), "lastName");

    let info = assert_ok!(context.resolve_field_path(fixture.person, "name"));
    assert_eq!(info.resolved_path, "lastName");
}

#[test]
fn alias_registered_by_application_overrides_builtin() {
    let fixture = Fixture::new();
    let context = assert_ok!(fixture.try_context(|builder| {
        builder.alias_resolver(alias_for("vehicles", "address"));
    }));

    let info = assert_ok!(context.resolve_field_path(fixture.person, "address"));
    assert_eq!(info.resolved_path, "vehicles");
}

#[test]
fn path_resolution_is_deterministic() {
    let fixture = Fixture::new();
    let context = fixture.context();

    for path in ["firstName", "address.city", "job.company.name", "tasks.key.name", "id"] {
        let first = assert_ok!(context.resolve_field_path(fixture.person, path));
        let second = assert_ok!(context.resolve_field_path(fixture.person, path));
        assert_eq!(first, second);
    }
}

#[test]
fn shared_prefix_is_joined_once() {
    let fixture = Fixture::new();
    let context = fixture.context();

    let city = assert_ok!(context.resolve_field_path(fixture.person, "address.city"));
    let zip = assert_ok!(context.resolve_field_path(fixture.person, "address.zipCode"));

    let plan: EntityJoins = assert_ok!(context.compute_entity_joins(fixture.person, &[]));
    let lhs: Rc<JoinNode> = assert_some!(plan.nodes_for(&city));
    let rhs: Rc<JoinNode> = assert_some!(plan.nodes_for(&zip));
    assert!(Rc::ptr_eq(&lhs, &rhs));
    assert_eq!(lhs.path, "addressEntities");

    let (predicate, log) = assert_ok!(evaluate(
        &context,
        params!("address.city" => ["Plaisir"], "address.zipCode" => ["78370"]),
        &[]
    ));

    assert_eq!(log.join_paths(), ["addressEntities"]);
    assert_eq!(
        predicate.map(|p| p.to_string()).as_deref(),
        Some("(addressEntities.city = 'Plaisir' AND addressEntities.zipCode = '78370')")
    );
}

#[test]
fn no_predicate_is_the_identity_of_composition() {
    let calls = Rc::new(Cell::new(0));

    let counting = |calls: &Rc<Cell<usize>>, or: bool| {
        let calls = calls.clone();
        move |_: &mut RecordingBuilder, lhs: Pred, rhs: Pred| {
            calls.set(calls.get() + 1);
            if or {
                Pred::Or(Box::new(lhs), Box::new(rhs))
            } else {
                Pred::And(Box::new(lhs), Box::new(rhs))
            }
        }
    };

    let p = || Specification::<RecordingBuilder>::new(|_| Ok(Some(Pred::IsNull("x".to_string()))));

    for or in [false, true] {
        let lhs = Specification::composed(Specification::no_predicate(), p(), counting(&calls, or));
        let rhs = Specification::composed(p(), Specification::no_predicate(), counting(&calls, or));

        let mut builder = RecordingBuilder::new();
        assert_eq!(
            assert_ok!(lhs.to_predicate(&mut builder)),
            Some(Pred::IsNull("x".to_string()))
        );
        assert_eq!(
            assert_ok!(rhs.to_predicate(&mut builder)),
            Some(Pred::IsNull("x".to_string()))
        );
    }

    assert_eq!(calls.get(), 0);
}

#[test]
fn double_negation_cancels() {
    let fixture = Fixture::new();
    let context = fixture.context();

    let x = assert_ok!(context.resolve_expression(
        fixture.person,
        "height",
        &["180"],
        Operator::GreaterThan,
        false
    ));
    let negated_twice = Expression::not(Expression::not(x.clone()));

    assert_eq!(negated_twice.to_field_expressions(false), x.to_field_expressions(false));
    assert!(negated_twice
        .to_field_expressions(false)
        .iter()
        .all(|expr| !expr.negated));

    let negated_once = Expression::not(x.clone());
    assert!(negated_once
        .to_field_expressions(false)
        .iter()
        .all(|expr| expr.negated));
}

#[derive(Debug, Default, Clone)]
struct Counting {
    calls: Arc<AtomicUsize>,
}

impl TypeConversionRegistry for Counting {
    fn convert(&self, raw: &str, ty: &Type) -> strainer::Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        DefaultConversions::new().convert(raw, ty)
    }
}

#[test]
fn null_token_bypasses_the_converter() {
    let fixture = Fixture::new();
    let registry = Counting::default();
    let calls = registry.calls.clone();

    let context = assert_ok!(fixture.try_context(|builder| {
        builder.conversions(registry);
    }));

    for raw in ["null", "NULL", "Null"] {
        for path in ["firstName", "height", "birthday", "nickNames", "address.city"] {
            let (_, values) = assert_ok!(context.resolve_values(fixture.person, path, &[raw]));
            assert_eq!(values, [FieldValue::Null]);
        }
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let (_, values) = assert_ok!(context.resolve_values(fixture.person, "firstName", &["null "]));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_ne!(values, [FieldValue::Null]);
    assert_eq!(values, [FieldValue::from("null ")]);
}

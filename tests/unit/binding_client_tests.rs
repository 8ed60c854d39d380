use repobind::{Action, Binding, Error, Missing, Outcome, YUM_DISTRIBUTOR_ID};
use serde_json::json;

use crate::common::{client_with, Call, Reply};

#[test]
fn bind_success_names_consumer_and_repository() -> repobind::Result<()> {
    let (client, calls) = client_with(Some("c1"), Reply::Ok);

    let outcome = client.bind("r1")?;

    assert_eq!(
        Outcome::Success {
            action: Action::Bound,
            binding: Binding::yum("c1", "r1"),
        },
        outcome
    );
    assert_eq!(
        "Consumer [c1] successfully bound to repository [r1]",
        outcome.message()
    );
    assert_eq!(0, outcome.exit_code());
    assert_eq!(
        vec![Call::Create {
            consumer_id: "c1".into(),
            repo_id: "r1".into(),
            distributor_id: YUM_DISTRIBUTOR_ID.into(),
        }],
        *calls.borrow()
    );
    Ok(())
}

#[test]
fn unregistered_consumer_never_reaches_the_server() -> repobind::Result<()> {
    for consumer in [None, Some(""), Some("   ")] {
        let (client, calls) = client_with(consumer, Reply::Ok);

        let bound = client.bind("r1")?;
        let unbound = client.unbind("r1", true)?;

        assert_eq!(Outcome::NotRegistered, bound);
        assert_eq!(Outcome::NotRegistered, unbound);
        assert_eq!(
            "This consumer is not registered to the server",
            bound.message()
        );
        assert_ne!(0, bound.exit_code());
        assert!(calls.borrow().is_empty());
    }
    Ok(())
}

#[test]
fn unregistered_check_precedes_repo_id_validation() -> repobind::Result<()> {
    let (client, calls) = client_with(None, Reply::Ok);
    assert_eq!(Outcome::NotRegistered, client.bind("")?);
    assert!(calls.borrow().is_empty());
    Ok(())
}

#[test]
fn empty_repo_id_is_rejected_before_any_request() {
    let (client, calls) = client_with(Some("c1"), Reply::Ok);

    let err = client.bind("  ").expect_err("empty repo id must fail");
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::Cli(msg)) if msg == "repo_id is required"
    ));
    assert!(calls.borrow().is_empty());
}

#[test]
fn bind_not_found_for_consumer_names_consumer_only() -> repobind::Result<()> {
    let (client, _) = client_with(Some("c1"), Reply::NotFound(json!({"consumer": "c1"})));

    let outcome = client.bind("r1")?;

    assert_eq!(
        Outcome::NotFound(Missing::Consumer { id: "c1".into() }),
        outcome
    );
    let message = outcome.message();
    assert_eq!("Consumer [c1] does not exist on the server", message);
    assert!(!message.contains("r1"));
    Ok(())
}

#[test]
fn bind_not_found_without_consumer_kind_names_repository() -> repobind::Result<()> {
    for resources in [json!(["repository"]), json!({"repo_id": "r1"}), json!(null)] {
        let (client, _) = client_with(Some("c1"), Reply::NotFound(resources));

        let outcome = client.bind("r1")?;

        assert_eq!(
            "Repository [r1] does not exist on the server",
            outcome.message()
        );
        assert_eq!(1, outcome.exit_code());
    }
    Ok(())
}

#[test]
fn unbind_not_found_uses_binding_id_from_server() -> repobind::Result<()> {
    let resources = json!({"bind_id": {"consumer_id": "c1", "repo_id": "r1"}});
    let (client, _) = client_with(Some("local"), Reply::NotFound(resources));

    let outcome = client.unbind("requested", false)?;

    assert_eq!(
        Outcome::NotFound(Missing::Binding {
            consumer_id: "c1".into(),
            repo_id: "r1".into(),
        }),
        outcome
    );
    assert_eq!(
        "Binding [consumer: c1, repository: r1] does not exist on the server",
        outcome.message()
    );
    Ok(())
}

#[test]
fn unbind_not_found_without_binding_id_falls_back_to_request() -> repobind::Result<()> {
    let (client, _) = client_with(Some("c1"), Reply::NotFound(json!({})));

    let outcome = client.unbind("r1", false)?;

    assert_eq!(
        "Binding [consumer: c1, repository: r1] does not exist on the server",
        outcome.message()
    );
    Ok(())
}

#[test]
fn unbind_passes_force_through() -> repobind::Result<()> {
    for force in [false, true] {
        let (client, calls) = client_with(Some("c1"), Reply::Ok);

        let outcome = client.unbind("r1", force)?;

        assert_eq!(
            "Consumer [c1] successfully unbound from repository [r1]",
            outcome.message()
        );
        assert_eq!(
            vec![Call::Remove {
                consumer_id: "c1".into(),
                repo_id: "r1".into(),
                distributor_id: YUM_DISTRIBUTOR_ID.into(),
                force,
            }],
            *calls.borrow()
        );
    }
    Ok(())
}

#[test]
fn other_server_errors_propagate() {
    let (client, calls) = client_with(Some("c1"), Reply::Status(500, "boom"));

    let err = client.bind("r1").expect_err("server error must propagate");
    let actual = err
        .downcast_ref::<Error>()
        .expect("should downcast to repobind::Error");
    assert!(matches!(actual, Error::Remote(_)));
    assert!(err.to_string().contains("boom"));
    assert_eq!(1, calls.borrow().len());
}

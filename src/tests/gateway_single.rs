use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::gateway::{Callbacks, Descriptor, Resolved};
use crate::tests::test_support::{harness, respond_after, status};
use crate::{Error, FailureKind};

#[tokio::test]
async fn resolves_with_exact_payload_and_calls_on_success_once() {
    let h = harness();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let body = json!({"id": "p1", "name": "North 1"});

    let resolved = h
        .gateway
        .invoke(
            respond_after(0, Ok(body.clone())),
            Callbacks::none().on_success({
                let seen = seen.clone();
                move |resolved| seen.lock().unwrap().push(resolved.clone())
            }),
        )
        .await
        .expect("invoke should succeed");

    assert_eq!(resolved, Resolved::Single(body.clone()));
    assert_eq!(*seen.lock().unwrap(), vec![Resolved::Single(body)]);
    assert!(h.notifier.taken().is_empty());
}

#[tokio::test]
async fn embedded_success_false_is_a_failure() {
    let h = harness();
    let failed = Arc::new(Mutex::new(None));
    let succeeded = Arc::new(Mutex::new(false));

    let err = h
        .gateway
        .invoke(
            respond_after(0, Ok(json!({"success": false, "message": "pond is still stocked"}))),
            Callbacks::none()
                .on_success({
                    let succeeded = succeeded.clone();
                    move |_| *succeeded.lock().unwrap() = true
                })
                .on_failure({
                    let failed = failed.clone();
                    move |failure| *failed.lock().unwrap() = Some(failure.kind())
                }),
        )
        .await
        .expect_err("success=false must not resolve");

    let failure = err.as_request_failure().expect("request failure");
    assert!(failure.is_application_error());
    assert!(!*succeeded.lock().unwrap());
    assert_eq!(*failed.lock().unwrap(), Some(FailureKind::Application));
    assert_eq!(h.notifier.taken().len(), 1);
    assert_eq!(h.notifier.taken()[0].1, "pond is still stocked");
}

#[tokio::test]
async fn success_true_and_bare_arrays_pass_through() {
    let h = harness();
    let flagged = h
        .gateway
        .single(respond_after(0, Ok(json!({"success": true, "data": []}))))
        .await
        .unwrap();
    assert_eq!(flagged, json!({"success": true, "data": []}));

    let bare = h
        .gateway
        .single(respond_after(0, Ok(json!([{"id": 1}]))))
        .await
        .unwrap();
    assert_eq!(bare, json!([{"id": 1}]));
}

#[tokio::test]
async fn promotion_can_be_disabled() {
    let mut h = harness();
    let mut options = h.gateway.options().clone();
    options.promote_embedded_failures = false;
    h.gateway = crate::Gateway::new(
        h.session.clone(),
        h.notifier.clone(),
        h.navigator.clone(),
        options,
    );

    let payload = h
        .gateway
        .single(respond_after(0, Ok(json!({"success": false}))))
        .await
        .unwrap();
    assert_eq!(payload, json!({"success": false}));
}

#[tokio::test]
async fn pending_operation_is_accepted() {
    let h = harness();
    let descriptor = Descriptor::pending(async { Ok(json!({"ok": 1})) });
    let payload = h.gateway.single(descriptor).await.unwrap();
    assert_eq!(payload, json!({"ok": 1}));
}

#[tokio::test]
async fn repeated_invocations_do_not_leak_state() {
    let h = harness();
    let err = h
        .gateway
        .single(respond_after(0, Err(status(500, json!({"message": "boom"})))))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Request(_)));

    let first = h.gateway.single(respond_after(0, Ok(json!(1)))).await.unwrap();
    let second = h.gateway.single(respond_after(0, Ok(json!(2)))).await.unwrap();
    assert_eq!((first, second), (json!(1), json!(2)));
    assert_eq!(h.notifier.taken().len(), 1);
}

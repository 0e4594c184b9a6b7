//! Card and wallet flow tests

use std::sync::Arc;
use std::time::Duration;

use super::mocks::{MockBackend, MockGateway};
use crate::domain::entities::{CardFormInput, PaymentMethodType, PaymentStatus, PurchaseKind};
use crate::errors::{DomainError, PaymentError, ValidationError};
use crate::services::payment::{CardFlowOutcome, PaymentService, PaymentServiceConfig};

const USER: &str = "user_42";

fn card_form() -> CardFormInput {
    CardFormInput {
        number: String::from("4242 4242 4242 4242"),
        expiry: String::from("08/27"),
        cvc: String::from("123"),
        holder_name: String::from("Ada Lovelace"),
    }
}

fn service(
    gateway: MockGateway,
    backend: MockBackend,
) -> (
    PaymentService<MockGateway, MockBackend>,
    Arc<MockGateway>,
    Arc<MockBackend>,
) {
    let gateway = Arc::new(gateway);
    let backend = Arc::new(backend);
    let service = PaymentService::new(
        gateway.clone(),
        backend.clone(),
        PaymentServiceConfig::new("USD"),
    );
    (service, gateway, backend)
}

#[tokio::test]
async fn completed_card_flow_confirms_the_purchase() {
    let (service, gateway, backend) = service(
        MockGateway::new("pr_123").with_status(PaymentStatus::Completed),
        MockBackend::new(),
    );

    let outcome = service
        .pay_with_card(USER, &PurchaseKind::plan("plan_pro"), "19.99", &card_form())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        CardFlowOutcome::Completed {
            payment_request_id: String::from("pr_123")
        }
    );

    let confirmations = backend.subscription_confirmations.lock().unwrap();
    assert_eq!(confirmations.len(), 1);
    assert_eq!(confirmations[0].user_id, USER);
    assert_eq!(confirmations[0].purchase_id, "plan_pro");
    assert_eq!(confirmations[0].payment_request_id, "pr_123");
    drop(confirmations);

    // Amount reaches the gateway as a number, not a string
    let creates = gateway.create_calls.lock().unwrap();
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].amount, 19.99);
    assert_eq!(creates[0].currency, "USD");
    assert_eq!(creates[0].method, PaymentMethodType::Card);
}

#[tokio::test]
async fn addon_purchase_confirms_through_the_addon_endpoint() {
    let (service, _gateway, backend) = service(
        MockGateway::new("pr_9").with_status(PaymentStatus::Completed),
        MockBackend::new(),
    );

    service
        .pay_with_card(USER, &PurchaseKind::addon("coins_500"), "4.99", &card_form())
        .await
        .unwrap();

    assert_eq!(backend.addon_confirmations.lock().unwrap().len(), 1);
    assert!(backend.subscription_confirmations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn card_details_reach_the_gateway_in_wire_form() {
    let (service, gateway, _backend) = service(
        MockGateway::new("pr_123").with_status(PaymentStatus::Completed),
        MockBackend::new(),
    );

    service
        .pay_with_card(USER, &PurchaseKind::plan("plan_pro"), "19.99", &card_form())
        .await
        .unwrap();

    let cards = gateway.card_calls.lock().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].payment_request_id, "pr_123");
    assert_eq!(cards[0].number, "4242424242424242");
    assert_eq!(cards[0].expiry, "0827");
}

#[tokio::test]
async fn invalid_card_fails_before_any_network_call() {
    let (service, gateway, _backend) =
        service(MockGateway::new("pr_123"), MockBackend::new());

    let form = CardFormInput {
        expiry: String::from("12/20"),
        ..card_form()
    };
    let err = service
        .pay_with_card(USER, &PurchaseKind::plan("plan_pro"), "19.99", &form)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::ExpiredCard)
    ));
    assert_eq!(gateway.create_call_count(), 0);
}

#[tokio::test]
async fn bad_amounts_fail_fast() {
    for price in ["0", "-5", "abc", ""] {
        let (service, gateway, _backend) =
            service(MockGateway::new("pr_123"), MockBackend::new());

        let err = service
            .pay_with_card(USER, &PurchaseKind::plan("plan_pro"), price, &card_form())
            .await
            .unwrap_err();

        assert!(
            matches!(
                err,
                DomainError::Validation(ValidationError::InvalidAmount { .. })
            ),
            "price {price:?} should be rejected"
        );
        assert_eq!(gateway.create_call_count(), 0, "price {price:?} hit the network");
    }
}

#[tokio::test]
async fn missing_payment_request_id_aborts_the_flow() {
    let (service, gateway, _backend) =
        service(MockGateway::without_issued_id(), MockBackend::new());

    let err = service
        .pay_with_card(USER, &PurchaseKind::plan("plan_pro"), "19.99", &card_form())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Payment(PaymentError::MissingPaymentRequestId)
    ));
    assert!(gateway.card_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn pending_status_reports_processing_without_confirmation() {
    let (service, _gateway, backend) = service(
        MockGateway::new("pr_123").with_status(PaymentStatus::Pending),
        MockBackend::new(),
    );

    let outcome = service
        .pay_with_card(USER, &PurchaseKind::plan("plan_pro"), "19.99", &card_form())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        CardFlowOutcome::Processing {
            payment_request_id: String::from("pr_123")
        }
    );
    assert_eq!(backend.confirmation_count(), 0);
}

#[tokio::test]
async fn failed_status_carries_the_gateway_result_code() {
    let (service, _gateway, backend) = service(
        MockGateway::new("pr_123").with_failed_status("DECLINED_BY_ISSUER"),
        MockBackend::new(),
    );

    let err = service
        .pay_with_card(USER, &PurchaseKind::plan("plan_pro"), "19.99", &card_form())
        .await
        .unwrap_err();

    match err {
        DomainError::Payment(PaymentError::UnexpectedStatus {
            status,
            result_code,
        }) => {
            assert_eq!(status, "failed");
            assert_eq!(result_code.as_deref(), Some("DECLINED_BY_ISSUER"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(backend.confirmation_count(), 0);
}

#[tokio::test]
async fn confirmation_failure_surfaces_the_reconcile_error() {
    let (service, _gateway, backend) = service(
        MockGateway::new("pr_123").with_status(PaymentStatus::Completed),
        MockBackend::rejecting_confirmations(),
    );

    let err = service
        .pay_with_card(USER, &PurchaseKind::plan("plan_pro"), "19.99", &card_form())
        .await
        .unwrap_err();

    match err {
        DomainError::Payment(PaymentError::ConfirmationPending {
            payment_request_id,
            ..
        }) => assert_eq!(payment_request_id, "pr_123"),
        other => panic!("unexpected error: {other}"),
    }
    // The confirmation was attempted; the charge itself is not retried
    assert_eq!(backend.confirmation_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn polling_config_re_observes_non_terminal_statuses() {
    let gateway = MockGateway::new("pr_123").with_statuses(vec![
        PaymentStatus::Pending,
        PaymentStatus::Pending,
        PaymentStatus::Completed,
    ]);
    let gateway = Arc::new(gateway);
    let backend = Arc::new(MockBackend::new());
    let service = PaymentService::new(
        gateway.clone(),
        backend.clone(),
        PaymentServiceConfig {
            currency: String::from("USD"),
            status_poll_attempts: 3,
            status_poll_interval: Duration::from_secs(2),
        },
    );

    let outcome = service
        .pay_with_card(USER, &PurchaseKind::plan("plan_pro"), "19.99", &card_form())
        .await
        .unwrap();

    assert!(matches!(outcome, CardFlowOutcome::Completed { .. }));
    assert_eq!(*gateway.status_call_count.lock().unwrap(), 3);
}

#[tokio::test]
async fn wallet_flow_returns_the_redirect_and_skips_card_steps() {
    let (service, gateway, backend) =
        service(MockGateway::new("pr_wallet"), MockBackend::new());

    let redirect = service
        .pay_with_wallet(&PurchaseKind::plan("plan_pro"), "19.99", "paypal")
        .await
        .unwrap();

    assert_eq!(redirect.redirect_url, "https://pay.example.com/pr_wallet");

    let wallets = gateway.wallet_calls.lock().unwrap();
    assert_eq!(wallets.len(), 1);
    assert_eq!(wallets[0], (String::from("pr_wallet"), String::from("paypal")));
    drop(wallets);

    assert!(gateway.card_calls.lock().unwrap().is_empty());
    assert_eq!(*gateway.status_call_count.lock().unwrap(), 0);
    assert_eq!(backend.confirmation_count(), 0);

    let creates = gateway.create_calls.lock().unwrap();
    assert_eq!(creates[0].method, PaymentMethodType::Wallet);
}

#[tokio::test]
async fn wallet_flow_validates_the_amount_first() {
    let (service, gateway, _backend) =
        service(MockGateway::new("pr_wallet"), MockBackend::new());

    let err = service
        .pay_with_wallet(&PurchaseKind::plan("plan_pro"), "free", "paypal")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::InvalidAmount { .. })
    ));
    assert_eq!(gateway.create_call_count(), 0);
}

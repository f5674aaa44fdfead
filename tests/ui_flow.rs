//! UI Flow Tests - Presentation Against a Mocked Feed
//!
//! Uses mockall to stand in for the `TickerFeed` port, proving the
//! presentation layer needs nothing from the feed beyond read access to
//! snapshots. Also walks the simulated reset/login flows end to end.

use std::time::Duration;

use mockall::mock;
use tokio::sync::watch;
use tokio_test::assert_ok;

use fx_ticker_demo::domain::snapshot::{FeedSnapshot, FeedStatus, TickUpdate};
use fx_ticker_demo::ports::ticker_feed::TickerFeed;
use fx_ticker_demo::ui::login::{LoginForm, LoginOutcome};
use fx_ticker_demo::ui::reset_dialog::{ResetDialog, ResetFormError, RESET_ACK_MESSAGE};
use fx_ticker_demo::ui::ticker_panel;

mock! {
    pub Feed {}

    #[async_trait::async_trait]
    impl TickerFeed for Feed {
        fn snapshot(&self) -> FeedSnapshot;
        fn subscribe(&self) -> watch::Receiver<FeedSnapshot>;
        async fn is_healthy(&self) -> bool;
    }
}

#[tokio::test]
async fn panel_renders_whatever_the_feed_exposes() {
    let mut mock_feed = MockFeed::new();

    let snapshot = FeedSnapshot::new("EURUSD:CUR").connected().apply(&TickUpdate {
        price: Some(1.0850),
        timestamp: None,
    });
    let snapshot_clone = snapshot.clone();
    mock_feed
        .expect_snapshot()
        .returning(move || snapshot_clone.clone());
    mock_feed.expect_is_healthy().returning(|| true);

    let panel = ticker_panel::render(&mock_feed.snapshot());
    assert!(panel.contains("EUR/USD (Live)"));
    assert!(panel.contains("[Connected]"));
    assert!(panel.contains("1.08500"));
    assert!(mock_feed.is_healthy().await);
}

#[tokio::test]
async fn subscribers_observe_snapshot_transitions() {
    let mut mock_feed = MockFeed::new();

    let initial = FeedSnapshot::new("EURUSD:CUR");
    let (tx, rx) = watch::channel(initial.clone());
    mock_feed.expect_subscribe().returning(move || rx.clone());

    let mut subscriber = mock_feed.subscribe();
    assert_eq!(subscriber.borrow().status, FeedStatus::Disconnected);

    tx.send_replace(initial.connecting());
    tokio_test::assert_ok!(subscriber.changed().await);
    assert_eq!(
        ticker_panel::render(&subscriber.borrow().clone()),
        ticker_panel::render(&initial.connecting())
    );

    tx.send_replace(initial.connecting().connected().apply(&TickUpdate {
        price: Some(1.0901),
        timestamp: None,
    }));
    tokio_test::assert_ok!(subscriber.changed().await);
    let panel = ticker_panel::render(&subscriber.borrow().clone());
    assert!(panel.contains("[Connected]"));
    assert!(panel.contains("1.09010"));
}

#[test]
fn reset_flow_walks_validation_then_acknowledgment() {
    let mut dialog = ResetDialog::new(Duration::from_millis(900));
    dialog.open();
    assert!(dialog.is_open());

    // Empty submit: validation message, dialog stays open.
    assert_eq!(
        dialog.submit().unwrap_err(),
        ResetFormError::MissingIdentity
    );
    assert!(dialog.is_open());

    // Filled submit: vague acknowledgment plus a scheduled auto-close.
    dialog.set_email("name@company.com");
    let ack = dialog.submit().unwrap();
    assert_eq!(ack.message, RESET_ACK_MESSAGE);
    assert_eq!(ack.close_after, Duration::from_millis(900));

    // The delayed close clears the fields for next time.
    dialog.complete();
    assert!(!dialog.is_open());
    assert_eq!(
        dialog.submit().unwrap_err(),
        ResetFormError::MissingIdentity
    );
}

#[test]
fn login_flow_is_cosmetic_but_validated() {
    let mut form = LoginForm::default();
    assert_eq!(form.submit(), LoginOutcome::MissingCredentials);

    form.username = "anita".to_string();
    form.password = "hunter2".to_string();
    form.remember_me = true;
    assert_eq!(
        form.submit(),
        LoginOutcome::Submitted {
            username: "anita".to_string()
        }
    );
}

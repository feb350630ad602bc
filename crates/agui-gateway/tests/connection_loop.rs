// The connection loop's handshake-deadline arm must be disabled once the
// connection authenticates: a completed Sleep polls Ready forever, and an
// unguarded select arm over it would spin the loop instead of parking it.

use std::time::Duration;

#[tokio::test]
async fn expired_handshake_timer_is_inert_after_auth() {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(5);
    let mut handshake_timer = Box::pin(tokio::time::sleep_until(deadline));

    // let the deadline pass, as it does on every long-lived connection
    tokio::time::sleep(Duration::from_millis(20)).await;

    // stands in for the socket/unicast arms, pending for the whole test
    let (tx, mut rx) = tokio::sync::mpsc::channel::<String>(1);

    let authenticated = true;
    let mut timer_fires = 0u32;

    // mirror of the loop shape in ws/connection.rs: with the guard in
    // place and every other arm pending, the select must park until the
    // timeout cancels it
    let outcome = tokio::time::timeout(Duration::from_millis(100), async {
        loop {
            tokio::select! {
                msg = rx.recv() => {
                    if msg.is_none() { break; }
                }
                _ = &mut handshake_timer, if !authenticated => {
                    timer_fires += 1;
                }
            }
        }
    })
    .await;

    drop(tx);
    assert!(outcome.is_err(), "loop must park while all arms are pending");
    assert_eq!(timer_fires, 0, "completed timer fired after auth");
}

#[tokio::test]
async fn expired_handshake_timer_still_fires_before_auth() {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(5);
    let mut handshake_timer = Box::pin(tokio::time::sleep_until(deadline));

    let (_tx, mut rx) = tokio::sync::mpsc::channel::<String>(1);
    let authenticated = false;

    let fired = tokio::time::timeout(Duration::from_millis(500), async {
        tokio::select! {
            _ = rx.recv() => false,
            _ = &mut handshake_timer, if !authenticated => true,
        }
    })
    .await;

    assert_eq!(fired.ok(), Some(true), "unauthenticated timeout must still close");
}

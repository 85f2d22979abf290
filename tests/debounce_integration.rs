//! Debounced trigger integration tests
//!
//! Timing runs on tokio's paused clock, so intervals are exact.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use dexcalc::debounce::debounce;

const INTERVAL: Duration = Duration::from_millis(300);

fn recorder<A: Send + 'static>() -> (Arc<Mutex<Vec<A>>>, impl Fn(A) + Send + Sync + 'static) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    (calls, move |args| sink.lock().unwrap().push(args))
}

/// Calls spaced further apart than the interval each run once, in order
#[tokio::test(start_paused = true)]
async fn test_spaced_calls_each_execute() {
    let (calls, action) = recorder();
    let debounced = debounce(action, INTERVAL);

    for name in ["pika", "pikachu", "raichu"] {
        debounced.call(name.to_string());
        tokio::time::sleep(INTERVAL + Duration::from_millis(50)).await;
    }

    assert_eq!(*calls.lock().unwrap(), vec!["pika", "pikachu", "raichu"]);
}

/// Typing "pikachu" one key at a time yields a single execution
#[tokio::test(start_paused = true)]
async fn test_keystrokes_collapse_to_final_name() {
    let (calls, action) = recorder();
    let debounced = debounce(action, INTERVAL);

    let typed = "pikachu";
    for end in 1..=typed.len() {
        debounced.call(typed[..end].to_string());
        tokio::time::sleep(Duration::from_millis(80)).await;
    }

    // Nothing has fired while keys keep arriving
    assert!(calls.lock().unwrap().is_empty());
    assert!(debounced.is_pending());

    tokio::time::sleep(INTERVAL).await;
    assert_eq!(*calls.lock().unwrap(), vec!["pikachu"]);
    assert!(!debounced.is_pending());
}

/// The action fires exactly one interval after the last call, not the first
#[tokio::test(start_paused = true)]
async fn test_each_call_restarts_the_timer() {
    let (calls, action) = recorder();
    let debounced = debounce(action, INTERVAL);

    debounced.call(1u32);
    tokio::time::sleep(Duration::from_millis(200)).await;
    debounced.call(2);
    tokio::time::sleep(Duration::from_millis(200)).await;

    // 400ms since the first call, but only 200ms since the last
    assert!(calls.lock().unwrap().is_empty());

    tokio::time::sleep(Duration::from_millis(101)).await;
    assert_eq!(*calls.lock().unwrap(), vec![2]);
}

/// Several arguments travel together as a tuple
#[tokio::test(start_paused = true)]
async fn test_tuple_arguments() {
    let (calls, action) = recorder();
    let debounced = debounce(action, INTERVAL);

    debounced.call(("attacker", 1u8));
    debounced.call(("defender", 2u8));
    tokio::time::sleep(INTERVAL * 2).await;

    assert_eq!(*calls.lock().unwrap(), vec![("defender", 2)]);
}

/// Clones share one pending timer
#[tokio::test(start_paused = true)]
async fn test_clones_share_state() {
    let (calls, action) = recorder();
    let debounced = debounce(action, INTERVAL);
    let other = debounced.clone();

    debounced.call(1u32);
    other.call(2);
    tokio::time::sleep(INTERVAL * 2).await;

    assert_eq!(*calls.lock().unwrap(), vec![2]);
    assert_eq!(other.interval(), INTERVAL);
}

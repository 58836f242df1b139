//! Logger setup when another global subscriber is already installed.

use haruhana_core_lib::utils::logger::init_logging;
use tempfile::tempdir;
use tracing_subscriber::util::SubscriberInitExt;

#[test]
fn failed_init_can_be_retried() {
    tracing_subscriber::registry()
        .try_init()
        .expect("install competing subscriber");

    let dir = tempdir().expect("temp dir");
    let first = init_logging(dir.path()).unwrap_err();
    let second = init_logging(dir.path()).unwrap_err();

    // Each attempt reaches subscriber installation again.
    assert!(first.to_string().contains("로그 구독자 설치 실패"));
    assert!(second.to_string().contains("로그 구독자 설치 실패"));
}

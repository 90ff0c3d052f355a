use crate::common::{client_for, setup_server};
use chrono::{Duration, TimeZone, Utc};
use hkipo_rs::{HistoryBuilder, IpoError};
use httpmock::Method::GET;

#[tokio::test]
async fn history_returns_status_error_on_non_2xx() {
    let server = setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/FAIL.HK");
        then.status(500).body("oops");
    });

    let client = client_for(&server);
    let start = Utc.with_ymd_and_hms(2021, 2, 28, 16, 0, 0).unwrap();
    let err = HistoryBuilder::new(&client, "FAIL.HK")
        .between(start, start + Duration::days(2))
        .fetch()
        .await
        .unwrap_err();
    mock.assert();

    match err {
        IpoError::Status { status, url } => {
            assert_eq!(status, 500);
            assert!(url.contains("/v8/finance/chart/FAIL.HK"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

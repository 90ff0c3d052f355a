use crate::common::{chart_json, client_for, mock_chart, setup_server};
use chrono::{NaiveDate, TimeZone, Utc};
use hkipo_rs::enrich::first_session_window;
use hkipo_rs::{FirstDayPriceSource, FirstDayPrices, IpoError, StockCode};
use httpmock::Method::GET;

fn listing_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()
}

#[test]
fn window_spans_two_days_from_hong_kong_midnight() {
    let (start, end) = first_session_window(listing_day());
    assert_eq!(start, Utc.with_ymd_and_hms(2021, 2, 28, 16, 0, 0).unwrap());
    assert_eq!((end - start).num_days(), 2);
}

#[tokio::test]
async fn first_bar_of_the_window_is_used() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v8/finance/chart/0012.HK")
            .query_param("period1", "1614528000")
            .query_param("period2", "1614700800")
            .query_param("interval", "1d");
        then.status(200).header("content-type", "application/json").body(chart_json(&[
            (1614562200, 10.0, 12.5, 9.8, 11.0),
            (1614648600, 11.2, 11.9, 10.1, 10.4),
        ]));
    });

    let client = client_for(&server);
    let code = StockCode::parse("12").unwrap();
    let prices = client.first_day_prices(&code, listing_day()).await.unwrap();

    mock.assert();
    assert_eq!(
        prices,
        FirstDayPrices {
            open: Some(10.0),
            high: Some(12.5),
            close: Some(11.0),
        }
    );
}

#[tokio::test]
async fn empty_window_is_a_data_error() {
    let server = setup_server();
    let mock = mock_chart(&server, "0700.HK", chart_json(&[]));

    let client = client_for(&server);
    let code = StockCode::parse("700").unwrap();
    let err = client.first_day_prices(&code, listing_day()).await.unwrap_err();

    mock.assert();
    assert!(matches!(err, IpoError::Data(ref msg) if msg.contains("0700.HK")));
    assert!(!err.is_fatal());
}

#[tokio::test]
async fn unknown_symbol_error_payload_is_a_data_error() {
    let server = setup_server();
    let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/9999.HK");
        then.status(200).body(body);
    });

    let client = client_for(&server);
    let code = StockCode::parse("9999").unwrap();
    let err = client.first_day_prices(&code, listing_day()).await.unwrap_err();

    mock.assert();
    match err {
        IpoError::Data(msg) => assert!(msg.contains("Not Found"), "{msg}"),
        other => panic!("expected Data error, got {other:?}"),
    }
}

use chrono::NaiveDate;
use hkipo_rs::listing::parse_listing_date;
use hkipo_rs::{FundRaised, StockCode};
use rust_decimal::Decimal;

#[test]
fn code_is_padded_to_four_for_display_and_five_for_urls() {
    let code = StockCode::parse("700").unwrap();
    assert_eq!(code.as_str(), "0700");
    assert_eq!(code.url_code(), "00700");
    assert_eq!(code.yahoo_symbol(), "0700.HK");
}

#[test]
fn code_padding_keeps_wide_codes_and_strips_float_suffix() {
    assert_eq!(StockCode::parse("12").unwrap().as_str(), "0012");
    assert_eq!(StockCode::parse("9988").unwrap().as_str(), "9988");
    assert_eq!(StockCode::parse("02097").unwrap().as_str(), "02097");
    assert_eq!(StockCode::parse("700.0").unwrap().as_str(), "0700");
    assert_eq!(StockCode::parse(" 1 ").unwrap().url_code(), "00001");
    assert!(StockCode::parse("   ").is_none());
}

#[test]
fn fund_raised_passes_text_through_and_parses_amounts() {
    let plain = FundRaised::new("1000");
    assert_eq!(plain.to_string(), "1000");
    assert_eq!(plain.amount(), Some(Decimal::from(1000)));

    let grouped = FundRaised::new("1,234,500.50");
    assert_eq!(grouped.amount(), Some(Decimal::new(123450050, 2)));
    assert_eq!(grouped.raw(), "1,234,500.50");

    let text = FundRaised::new("不適用");
    assert_eq!(text.amount(), None);
    assert_eq!(text.to_string(), "不適用");
}

#[test]
fn listing_dates_accept_report_layouts() {
    let want = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
    for raw in ["2021-03-01", "01/03/2021", "2021/03/01", "2021-03-01 00:00:00"] {
        assert_eq!(parse_listing_date(raw), Some(want), "layout {raw:?}");
    }
    assert_eq!(parse_listing_date("March 2021"), None);
    assert_eq!(parse_listing_date(""), None);
}

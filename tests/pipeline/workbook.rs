use crate::common::{REPORT_HEADER, chart_json, mock_chart, setup_server};
use calamine::{Data, Reader, open_workbook_auto};
use hkipo_rs::{PipelineConfig, run};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::Path;
use tempfile::tempdir;

/// Title row, multi-line header, a typed-date listing and a text-date listing.
fn write_report(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    sheet.write_string(0, 0, "新上市報告 2021").unwrap();
    for (col, label) in REPORT_HEADER.iter().enumerate() {
        if !label.is_empty() {
            sheet.write_string(1, col as u16, *label).unwrap();
        }
    }

    sheet.write_string(2, 0, "Alpha Co").unwrap();
    sheet.write_number(2, 1, 12).unwrap();
    sheet
        .write_datetime_with_format(2, 2, &ExcelDateTime::from_ymd(2021, 3, 1).unwrap(), &date_format)
        .unwrap();
    sheet.write_string(2, 3, "Sponsor Capital").unwrap();
    sheet.write_number(2, 6, 1000).unwrap();
    sheet.write_string(2, 7, "(a)").unwrap();
    sheet.write_number(3, 6, 500).unwrap();
    sheet.write_string(3, 7, "(b)").unwrap();

    sheet.write_string(5, 0, "Beta Ltd").unwrap();
    sheet.write_string(5, 1, "2097").unwrap();
    sheet.write_string(5, 2, "15/06/2022").unwrap();
    sheet.write_string(5, 6, "800").unwrap();
    sheet.write_string(5, 7, "(a)").unwrap();
    sheet.write_string(6, 6, "1,200").unwrap();
    sheet.write_string(6, 7, "(b)").unwrap();

    workbook.save(path).unwrap();
}

fn cell(range: &calamine::Range<Data>, row: u32, col: u32) -> Data {
    range.get_value((row, col)).cloned().unwrap_or(Data::Empty)
}

#[tokio::test]
async fn workbook_report_consolidates_into_workbook() {
    let dir = tempdir().unwrap();
    write_report(&dir.path().join("NLR2021_Chi.xlsx"));

    let server = setup_server();
    let alpha = mock_chart(
        &server,
        "0012.HK",
        chart_json(&[(1614562200, 10.0, 12.5, 9.8, 11.0)]),
    );
    let beta = server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/v8/finance/chart/2097.HK");
        then.status(404).body("not found");
    });

    let output = dir.path().join("HK_IPO_Full_Dataset.xlsx");
    let config = PipelineConfig::yearly_reports(dir.path(), [2021])
        .output(&output)
        .chart_base_url(format!("{}/v8/finance/chart/", server.base_url()));

    let done = run(&config).await.unwrap();
    alpha.assert();
    beta.assert();
    assert_eq!(done.records.len(), 2);
    assert_eq!(done.summary.failed_lookups, 1);

    let mut book = open_workbook_auto(&output).unwrap();
    let sheet = book.sheet_names()[0].clone();
    let range = book.worksheet_range(&sheet).unwrap();

    assert_eq!(cell(&range, 0, 0), Data::String("name".into()));
    assert_eq!(cell(&range, 0, 18), Data::String("allotment_url".into()));

    assert_eq!(cell(&range, 1, 0), Data::String("Alpha Co".into()));
    assert_eq!(cell(&range, 1, 1), Data::String("0012".into()));
    assert_eq!(cell(&range, 1, 2), Data::String("2021-03-01".into()));
    assert_eq!(cell(&range, 1, 5), Data::Float(1000.0));
    assert_eq!(cell(&range, 1, 6), Data::Float(500.0));
    assert_eq!(cell(&range, 1, 14), Data::Float(10.0));
    assert_eq!(cell(&range, 1, 16), Data::Float(11.0));
    assert_eq!(cell(&range, 1, 3), Data::Empty);
    assert_eq!(
        cell(&range, 1, 17),
        Data::String("https://www1.hkexnews.hk/app/app_2021_00012/prospectus/cwp_chi.pdf".into())
    );

    assert_eq!(cell(&range, 2, 0), Data::String("Beta Ltd".into()));
    assert_eq!(cell(&range, 2, 2), Data::String("2022-06-15".into()));
    assert_eq!(cell(&range, 2, 6), Data::Float(1200.0));
    assert_eq!(cell(&range, 2, 14), Data::Empty);
    assert_eq!(
        cell(&range, 2, 18),
        Data::String("https://www1.hkexnews.hk/app/app_2022_02097/allotment/cwp_chi.pdf".into())
    );
}

use crate::listing::StockCode;

/// Public HKEXnews host serving listing documents.
pub const HKEXNEWS_HOST: &str = "https://www1.hkexnews.hk";

/// Links to a listing's Chinese prospectus and allotment results.
///
/// Built from the stock code and listing year only; nothing is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUrls {
    pub prospectus: String,
    pub allotment: String,
}

impl DocumentUrls {
    /// Links on the public HKEXnews host.
    pub fn build(code: &StockCode, year: i32) -> Self {
        Self::with_host(HKEXNEWS_HOST, code, year)
    }

    /// Links on an alternative host, e.g. a mirror.
    pub fn with_host(host: &str, code: &StockCode, year: i32) -> Self {
        let base = format!(
            "{}/app/app_{year}_{}",
            host.trim_end_matches('/'),
            code.url_code()
        );
        Self {
            prospectus: format!("{base}/prospectus/cwp_chi.pdf"),
            allotment: format!("{base}/allotment/cwp_chi.pdf"),
        }
    }
}

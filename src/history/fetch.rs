use crate::core::{IpoError, YfClient};
use crate::history::wire::{ChartEnvelope, QuoteBlock};

pub(crate) struct Fetched {
    pub(crate) ts: Vec<i64>,
    pub(crate) quote: QuoteBlock,
    pub(crate) adjclose: Vec<Option<f64>>,
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(client, symbol), err, fields(symbol = %symbol))
)]
pub(crate) async fn fetch_chart(
    client: &YfClient,
    symbol: &str,
    period: (i64, i64),
) -> Result<Fetched, IpoError> {
    let (p1, p2) = period;
    if p1 >= p2 {
        return Err(IpoError::InvalidDates);
    }

    let mut url = client.base_chart().join(symbol)?;
    url.query_pairs_mut()
        .append_pair("period1", &p1.to_string())
        .append_pair("period2", &p2.to_string())
        .append_pair("interval", "1d")
        .append_pair("includePrePost", "false");

    let resp = client.http().get(url.clone()).send().await?;
    if !resp.status().is_success() {
        return Err(IpoError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    let body = resp.text().await?;
    decode_chart(&body)
}

fn decode_chart(body: &str) -> Result<Fetched, IpoError> {
    let parsed: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| IpoError::Data(format!("json parse error: {e}")))?;

    let chart = parsed
        .chart
        .ok_or_else(|| IpoError::Data("missing chart".into()))?;

    if let Some(err) = chart.error {
        return Err(IpoError::Data(format!(
            "yahoo error: {} - {}",
            err.code, err.description
        )));
    }

    let r0 = chart
        .result
        .and_then(|mut results| results.pop())
        .ok_or_else(|| IpoError::Data("empty result".into()))?;

    let ts = r0.timestamp.unwrap_or_default();
    let quote = r0
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| IpoError::Data("missing quote".into()))?;
    let adjclose = r0
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .unwrap_or_default();

    Ok(Fetched {
        ts,
        quote,
        adjclose,
    })
}

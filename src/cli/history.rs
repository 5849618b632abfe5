use super::{check_supported, resolve_pair, ui};
use crate::core::config::CurrencyPairConfig;
use crate::core::currency::parse_days;
use crate::core::{ConversionClient, HistoricalPoint, HistoricalRequest};
use anyhow::Result;
use comfy_table::Cell;
use tracing::debug;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub struct HistoryArgs {
    pub from: Option<String>,
    pub to: Option<String>,
    pub days: String,
    pub reverse: bool,
}

/// Series handed to the chart renderer, ordered oldest to newest.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// Orders points by date when every date parses. Otherwise the points
    /// are assumed newest first, the order the local service produces.
    pub fn from_points(request: &HistoricalRequest, points: &[HistoricalPoint]) -> Self {
        let mut ordered: Vec<&HistoricalPoint> = points.iter().collect();
        if points.iter().all(|p| p.parsed_date().is_some()) {
            ordered.sort_by_key(|p| p.parsed_date());
        } else {
            debug!("Unparseable dates in series, reversing received order");
            ordered.reverse();
        }

        ChartSeries {
            title: format!("{} to {} Exchange Rate", request.from, request.to),
            labels: ordered.iter().map(|p| p.date.clone()).collect(),
            values: ordered.iter().map(|p| p.rate).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn low(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn high(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// Percentage change from the first to the last value.
    pub fn change(&self) -> Option<f64> {
        match (self.values.first(), self.values.last()) {
            (Some(first), Some(last)) if *first > 0.0 => Some((last - first) / first * 100.0),
            _ => None,
        }
    }

    pub fn sparkline(&self) -> String {
        let (Some(low), Some(high)) = (self.low(), self.high()) else {
            return String::new();
        };
        let span = high - low;
        let top = (SPARK_LEVELS.len() - 1) as f64;
        self.values
            .iter()
            .map(|v| {
                let level = if span > 0.0 {
                    ((v - low) / span * top).round() as usize
                } else {
                    SPARK_LEVELS.len() / 2
                };
                SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
            })
            .collect()
    }
}

pub async fn run(
    client: &ConversionClient,
    args: &HistoryArgs,
    defaults: &CurrencyPairConfig,
) -> Result<()> {
    let request = build_request(args, defaults)?;

    let pb = ui::new_spinner("Fetching historical rates");
    let points = fetch_supported(client, &request).await;
    pb.finish_and_clear();

    let series = ChartSeries::from_points(&request, &points?);
    display_series(&request, &series);
    Ok(())
}

/// Parses and validates the inputs without touching the network.
fn build_request(args: &HistoryArgs, defaults: &CurrencyPairConfig) -> Result<HistoricalRequest> {
    let days = parse_days(&args.days)?;
    let (from, to) = resolve_pair(args.from.as_deref(), args.to.as_deref(), defaults)?;
    let mut request = HistoricalRequest::new(from, to, days);
    if args.reverse {
        request = request.swapped();
    }
    request.validate()?;
    Ok(request)
}

async fn fetch_supported(
    client: &ConversionClient,
    request: &HistoricalRequest,
) -> Result<Vec<HistoricalPoint>> {
    let catalog = client.list_currencies().await;
    check_supported(&catalog, &[&request.from, &request.to])?;
    Ok(client.historical(request).await?)
}

fn display_series(request: &HistoricalRequest, series: &ChartSeries) {
    println!("\n{}", ui::style_text(&series.title, ui::StyleType::Title));

    if series.is_empty() {
        println!(
            "{}",
            ui::style_text("No historical data available.", ui::StyleType::Error)
        );
        return;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell(&format!("1 {}", request.from)),
        ui::header_cell("Change"),
    ]);

    let mut previous: Option<f64> = None;
    for (label, value) in series.labels.iter().zip(&series.values) {
        let change = match previous {
            Some(prev) if prev > 0.0 => ui::change_cell((value - prev) / prev * 100.0),
            _ => ui::na_cell(),
        };
        table.add_row(vec![
            Cell::new(label),
            ui::number_cell(format!("{value:.6} {}", request.to)),
            change,
        ]);
        previous = Some(*value);
    }
    println!("{table}");

    println!("{}", series.sparkline());
    if let (Some(low), Some(high)) = (series.low(), series.high()) {
        println!(
            "{} {} {} {}",
            ui::style_text("Low:", ui::StyleType::TotalLabel),
            ui::style_text(&format!("{low:.6}"), ui::StyleType::TotalValue),
            ui::style_text("High:", ui::StyleType::TotalLabel),
            ui::style_text(&format!("{high:.6}"), ui::StyleType::TotalValue),
        );
    }
    if let Some(change) = series.change() {
        println!(
            "{} {}",
            ui::style_text("Change over period:", ui::StyleType::TotalLabel),
            ui::style_text(&format!("{change:.2}%"), ui::StyleType::Subtle)
        );
    }
}

use super::{check_supported, resolve_pair, ui};
use crate::core::config::CurrencyPairConfig;
use crate::core::currency::parse_amount;
use crate::core::{ConversionClient, ConversionRequest, ConversionResult};
use anyhow::Result;
use tracing::info;

pub struct ConvertArgs {
    pub amount: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub reverse: bool,
}

pub async fn run(
    client: &ConversionClient,
    args: &ConvertArgs,
    defaults: &CurrencyPairConfig,
) -> Result<()> {
    let request = build_request(args, defaults)?;

    let pb = ui::new_spinner("Converting");
    let result = convert_supported(client, &request).await;
    pb.finish_and_clear();

    let result = result?;
    info!(
        rate = result.rate,
        converted = result.converted_amount,
        "Conversion complete"
    );
    let (amount_line, rate_line) = format_conversion(&request, &result);
    println!(
        "{}",
        ui::style_text(&amount_line, ui::StyleType::TotalValue)
    );
    println!("{}", ui::style_text(&rate_line, ui::StyleType::Subtle));
    Ok(())
}

/// Parses and validates the inputs without touching the network.
fn build_request(args: &ConvertArgs, defaults: &CurrencyPairConfig) -> Result<ConversionRequest> {
    let amount = parse_amount(&args.amount)?;
    let (from, to) = resolve_pair(args.from.as_deref(), args.to.as_deref(), defaults)?;
    let mut request = ConversionRequest::new(from, to, amount);
    if args.reverse {
        request = request.swapped();
    }
    request.validate()?;
    Ok(request)
}

async fn convert_supported(
    client: &ConversionClient,
    request: &ConversionRequest,
) -> Result<ConversionResult> {
    let catalog = client.list_currencies().await;
    check_supported(&catalog, &[&request.from, &request.to])?;
    Ok(client.convert(request).await?)
}

fn format_conversion(request: &ConversionRequest, result: &ConversionResult) -> (String, String) {
    (
        format!(
            "{:.2} {} = {:.2} {}",
            request.amount, request.from, result.converted_amount, request.to
        ),
        format!("1 {} = {:.6} {}", request.from, result.rate, request.to),
    )
}

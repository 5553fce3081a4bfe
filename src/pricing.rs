/// USD per million tokens for a single model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPrice {
    pub input: f64,
    pub output: f64,
}

/// The pricing table is the sole source of truth for supported models:
/// a model name absent here is rejected before any other work happens.
pub const GEMINI_PRICING: &[(&str, ModelPrice)] = &[
    ("gemini-2.5-flash", ModelPrice { input: 0.30, output: 2.50 }),
    ("gemini-2.5-pro", ModelPrice { input: 1.25, output: 10.00 }),
    ("gemini-2.5-flash-lite", ModelPrice { input: 0.10, output: 0.40 }),
];

pub fn price_for(model_name: &str) -> Option<&'static ModelPrice> {
    GEMINI_PRICING
        .iter()
        .find(|(name, _)| *name == model_name)
        .map(|(_, price)| price)
}

/// Estimate USD cost for one exchange, rounded to 6 decimal places.
pub fn estimate_cost(price: &ModelPrice, prompt_tokens: i64, completion_tokens: i64) -> f64 {
    let input_cost = (prompt_tokens as f64 / 1_000_000.0) * price.input;
    let output_cost = (completion_tokens as f64 / 1_000_000.0) * price.output;
    round_6dp(input_cost + output_cost)
}

fn round_6dp(x: f64) -> f64 {
    (x * 1_000_000.0).round() / 1_000_000.0
}

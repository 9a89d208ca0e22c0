//! Demo agents registered by the CLI.

use anyhow::{Context, Result};
use compact_str::CompactString;
use sbcore::{Function, Registry};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Register every demo agent.
pub fn register_all(registry: &Registry) -> sbcore::Result<()> {
    registry.register(weather())?;
    registry.register(translate())?;
    registry.register(calculator())
}

/// Parameters of `weather-agent`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WeatherParams {
    /// The name of the city to get weather information for
    pub city: String,
}

/// A weather report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weather {
    pub city: String,
    pub temp: i32,
    pub condition: CompactString,
}

/// Reports a fixed forecast for a city.
pub fn weather() -> Function<WeatherParams, Weather> {
    Function::new(
        "weather-agent",
        "Gets weather information for a specified city",
        |params: WeatherParams| {
            Ok(Weather {
                city: params.city,
                temp: 25,
                condition: "sunny".into(),
            })
        },
    )
}

/// Parameters of `translate-agent`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TranslateParams {
    /// The text to translate
    pub text: String,
    /// Source language code (e.g. 'tr', 'en')
    #[schemars(with = "String")]
    pub from: CompactString,
    /// Target language code (e.g. 'tr', 'en')
    #[schemars(with = "String")]
    pub to: CompactString,
}

/// A translation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    pub original: String,
    pub translated: String,
    pub from: CompactString,
    pub to: CompactString,
}

/// Tags text with its target language.
pub fn translate() -> Function<TranslateParams, Translation> {
    Function::new(
        "translate-agent",
        "Translates text from one language to another",
        |params: TranslateParams| {
            Ok(Translation {
                translated: format!("[{}] {}", params.to, params.text),
                original: params.text,
                from: params.from,
                to: params.to,
            })
        },
    )
}

/// Parameters of `calculator-agent`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CalculatorParams {
    /// The expression to calculate, a binary operation (e.g. '2 + 2', '7 / 2')
    pub expression: String,
}

/// A calculation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub expression: String,
    pub result: f64,
}

/// Evaluates `a <op> b` expressions.
pub fn calculator() -> Function<CalculatorParams, Calculation> {
    Function::new(
        "calculator-agent",
        "Calculates mathematical expressions",
        |params: CalculatorParams| {
            let result = evaluate(&params.expression)?;
            Ok(Calculation {
                expression: params.expression,
                result,
            })
        },
    )
}

const OPERATORS: &[char] = &['+', '-', '*', '/', '%', '^'];

/// Evaluate a single binary operation `a <op> b`.
///
/// Operators: `+ - * / % ^`. A sign directly after an operator, at the
/// start, or after an exponent marker belongs to the operand.
pub fn evaluate(expression: &str) -> Result<f64> {
    let expr = expression.trim();
    let mut prev: Option<char> = None;
    let (at, op) = expr
        .char_indices()
        .find(|&(i, c)| {
            let is_op = i > 0
                && OPERATORS.contains(&c)
                && prev.is_some_and(|p| !OPERATORS.contains(&p) && p != 'e' && p != 'E');
            if !c.is_whitespace() {
                prev = Some(c);
            }
            is_op
        })
        .with_context(|| format!("expected 'a <op> b', got '{expression}'"))?;

    let lhs = operand(&expr[..at])?;
    let rhs = operand(&expr[at + op.len_utf8()..])?;
    let result = match op {
        '+' => lhs + rhs,
        '-' => lhs - rhs,
        '*' => lhs * rhs,
        '/' if rhs == 0.0 => anyhow::bail!("division by zero"),
        '/' => lhs / rhs,
        '%' if rhs == 0.0 => anyhow::bail!("division by zero"),
        '%' => lhs % rhs,
        _ => lhs.powf(rhs),
    };
    if !result.is_finite() {
        anyhow::bail!("result of '{expr}' is not a finite number");
    }
    Ok(result)
}

fn operand(text: &str) -> Result<f64> {
    let text = text.trim();
    text.parse().with_context(|| format!("invalid operand '{text}'"))
}

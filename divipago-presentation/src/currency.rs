use divipago_domain::Money;

/// Renders monetary amounts in es-AR style: dot-grouped thousands, comma
/// decimal separator, two fraction digits, prefixed with the currency code
/// from the app settings.
pub struct CurrencyFormatter {
    code: String,
}

impl CurrencyFormatter {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Formats the display-rounded amount, e.g. `ARS 1.234,56`.
    pub fn format(&self, amount: Money) -> String {
        let rendered = format!("{:.2}", amount.round_display().as_decimal());
        let (sign, digits) = match rendered.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", rendered.as_str()),
        };
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (idx, digit) in integer.chars().enumerate() {
            if idx > 0 && (integer.len() - idx) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        format!("{} {sign}{grouped},{fraction}", self.code)
    }
}

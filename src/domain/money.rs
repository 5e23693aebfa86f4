use std::fmt;

/// Expense amounts are plain floating-point numbers with no currency attached.
pub type Amount = f64;

/// Parse user input into an amount.
/// Example: "42.5" -> 42.5, " 10 " -> 10.0, "-3" -> -3.0
///
/// Anything that is not a finite number is rejected, since NaN and infinity
/// have no JSON representation and could never be loaded back.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let amount: Amount = input
        .trim()
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;

    if !amount.is_finite() {
        return Err(ParseAmountError::NotFinite);
    }
    Ok(amount)
}

/// Format an amount the way entries are listed.
/// Integral values keep one decimal place so they still read as numbers with
/// a fractional part: 10.0 -> "10.0", 42.5 -> "42.5", 0.1 -> "0.1".
/// Very small or very large magnitudes switch to exponent notation with a
/// signed, two-digit exponent: 0.00001 -> "1e-05", 1e16 -> "1e+16"
pub fn display_amount(amount: Amount) -> String {
    let scientific = format!("{:e}", amount);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if amount != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else if amount.fract() == 0.0 {
        format!("{:.1}", amount)
    } else {
        format!("{}", amount)
    }
}

/// Format a total with exactly two decimal places.
/// Example: 15.0 -> "15.00", 3.456 -> "3.46"
pub fn format_total(total: Amount) -> String {
    format!("{:.2}", total)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    NotFinite,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "amount is not a number"),
            ParseAmountError::NotFinite => write!(f, "amount must be a finite number"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

// ==========================================
// Perdas Dashboard - Brazilian Display Formatting
// ==========================================
// Currency rendering (`R$ 1.234,56`) and Portuguese month names used by
// every dashboard label. Missing/undefined amounts render as `R$ 0,00`.
// ==========================================

/// Portuguese month names, January first.
pub const MONTHS_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Name of a month (1-12).
pub fn month_name(month: u32) -> Option<&'static str> {
    if (1..=12).contains(&month) {
        Some(MONTHS_PT[(month - 1) as usize])
    } else {
        None
    }
}

/// Renders an amount as Brazilian currency: dot thousands separators,
/// comma decimal, two places. Non-finite input renders as `R$ 0,00`.
pub fn brl(value: f64) -> String {
    if !value.is_finite() {
        return "R$ 0,00".to_string();
    }

    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let integer = cents / 100;
    let decimal = cents % 100;

    let digits = integer.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("R$ {sign}{grouped},{decimal:02}")
}

/// Renders an optional amount, missing values as `R$ 0,00`.
pub fn brl_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => brl(v),
        None => "R$ 0,00".to_string(),
    }
}

//! Payroll code derivation.
//!
//! New deductions get a payroll code derived from the provider and plan
//! names until the user types one of their own.

/// Maximum characters taken from each name.
pub const CODE_PART_LEN: usize = 4;

/// Derives a payroll code from the provider and plan names.
///
/// Each name contributes the first four alphanumeric characters of its
/// first word, upper-cased. The parts are joined with `-`; if only one
/// part is non-empty it is returned alone, and if neither is the result
/// is empty.
///
/// # Example
///
/// ```
/// use deduction_admin::quick_build::derive_code;
///
/// assert_eq!(derive_code("BlueCross BlueShield", "Basic PPO"), "BLUE-BASI");
/// assert_eq!(derive_code("VSP", ""), "VSP");
/// assert_eq!(derive_code("  ", "***"), "");
/// ```
pub fn derive_code(provider: &str, plan: &str) -> String {
    let provider_part = code_part(provider);
    let plan_part = code_part(plan);

    match (provider_part.is_empty(), plan_part.is_empty()) {
        (false, false) => format!("{}-{}", provider_part, plan_part),
        (false, true) => provider_part,
        (true, false) => plan_part,
        (true, true) => String::new(),
    }
}

fn code_part(name: &str) -> String {
    let first_word = name.trim().split(' ').next().unwrap_or("");
    first_word
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(CODE_PART_LEN)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

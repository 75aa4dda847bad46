//! # Shared Utility Functions
//!
//! Display helpers used wherever addresses and token amounts are shown.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - `0x1234...abcd` style shorthand
//!
//! ## Amount Formatting
//!
//! - [`format_token_amount`] - Render a base-unit amount with a fixed number of decimals
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0x52908400098527886E0F7030069857D2E4169EE7";
//! assert_eq!(format_address(address, 6, 4), "0x5290...9EE7");
//! ```

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x52908400098527886E0F7030069857D2E4169EE7";
/// assert_eq!(format_address(addr, 6, 4), "0x5290...9EE7");
/// assert_eq!(format_address("0xabc", 6, 4), "0xabc");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len || !address.is_ascii() {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format a wallet address as `0x` plus four leading and four trailing digits.
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// let addr = "0x52908400098527886E0F7030069857D2E4169EE7";
/// assert_eq!(truncate_address(addr), "0x5290...9EE7");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Render a base-unit amount as a decimal string with trailing zeros trimmed.
///
/// ```rust
/// use shared::utils::format_token_amount;
///
/// assert_eq!(format_token_amount(1_500_000_000_000_000_000, 18), "1.5");
/// assert_eq!(format_token_amount(42, 0), "42");
/// ```
pub fn format_token_amount(amount: u128, decimals: u32) -> String {
    if decimals == 0 {
        return amount.to_string();
    }

    let unit = 10u128.saturating_pow(decimals);
    let whole = amount / unit;
    let frac = amount % unit;
    if frac == 0 {
        return whole.to_string();
    }

    let frac = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        let addr = "0x52908400098527886E0F7030069857D2E4169EE7";
        assert_eq!(format_address(addr, 6, 4), "0x5290...9EE7");
        assert_eq!(format_address(addr, 4, 4), "0x52...9EE7");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("short", 4, 4), "short");
        assert_eq!(format_address("", 4, 4), "");
    }

    #[test]
    fn test_format_token_amount() {
        assert_eq!(format_token_amount(0, 18), "0");
        assert_eq!(format_token_amount(1, 18), "0.000000000000000001");
        assert_eq!(format_token_amount(2_000_000, 6), "2");
        assert_eq!(format_token_amount(2_050_000, 6), "2.05");
    }
}

//! Inverse of the rendering primitives: text back into typed values.
//!
//! Error convention differs per function and is part of the contract:
//! `parse_proto` and `parse_addr` always return a value and signal failure
//! only through the reporter; the numeric helpers return `Option` and leave
//! reporting to the calling formatter, which knows the field name.

use std::net::{IpAddr, Ipv4Addr};

use crate::error::FormatError;
use crate::reporter::Reporter;
use crate::value::{Subnet, Transport};

/// Exact lowercase match against `tcp`, `udp`, `icmp`.
///
/// Anything else — including uppercase spellings and the string
/// `"unknown"` itself — yields [`Transport::Unknown`] and a report.
pub fn parse_proto(text: &str, reporter: &dyn Reporter) -> Transport {
    match text {
        "tcp" => Transport::Tcp,
        "udp" => Transport::Udp,
        "icmp" => Transport::Icmp,
        _ => {
            reporter.report(&FormatError::MalformedProto { text: text.to_string() });
            Transport::Unknown
        }
    }
}

/// Parse an IPv4 dotted-decimal or IPv6 colon-hex address.
///
/// On failure this returns `0.0.0.0` AND reports — the same value a
/// legitimate all-zero address parses to. The return value alone cannot
/// tell the two apart; callers that care must check the reporter's side
/// channel. Known caveat, kept deliberately.
pub fn parse_addr(text: &str, reporter: &dyn Reporter) -> IpAddr {
    match text.parse::<IpAddr>() {
        Ok(addr) => addr,
        Err(_) => {
            reporter.report(&FormatError::MalformedAddr { text: text.to_string() });
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        }
    }
}

/// Parse `addr/len`.
///
/// A missing slash, a non-numeric length, or a length exceeding the
/// address family's bit width is a subnet error: report plus `None`.
/// The address part goes through [`parse_addr`], so a malformed address
/// yields `0.0.0.0/len` with a report rather than `None` — same side
/// channel caveat as above.
pub fn parse_subnet(text: &str, reporter: &dyn Reporter) -> Option<Subnet> {
    let Some((addr_part, len_part)) = text.rsplit_once('/') else {
        reporter.report(&FormatError::MalformedSubnet { text: text.to_string() });
        return None;
    };

    let Some(length) = parse_count(len_part).and_then(|n| u8::try_from(n).ok()) else {
        reporter.report(&FormatError::MalformedSubnet { text: text.to_string() });
        return None;
    };

    let prefix = parse_addr(addr_part, reporter);
    let max = match prefix {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    };
    if length > max {
        reporter.report(&FormatError::MalformedSubnet { text: text.to_string() });
        return None;
    }

    Some(Subnet { prefix, length })
}

// ════════════════════════════════════════════════════════════════
//  Numeric parsing
// ════════════════════════════════════════════════════════════════

/// True if a numeric parse that consumed `consumed` bytes of `text` is an
/// error: nothing consumed (empty or immediately invalid input), or
/// trailing garbage left behind. Shared by every numeric parse path.
pub fn check_number_error(text: &str, consumed: usize) -> bool {
    consumed == 0 || consumed != text.len()
}

/// Length of the leading `[+-]?[0-9]+` prefix, 0 if there is none.
fn int_prefix(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start { 0 } else { i }
}

/// Length of the leading decimal floating-point prefix
/// (`[+-]? digits [. digits] [eE [+-] digits]`), 0 if there is none.
fn double_prefix(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - frac_start;
        // A lone '.' with no digits on either side is not a number.
        if int_digits > 0 || frac_digits > 0 {
            i = j;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        // Exponent marker without digits stays unconsumed ("1e" parses as
        // a one-byte prefix, which the full-consumption check then rejects).
        if j > exp_start {
            i = j;
        }
    }

    i
}

/// Signed integer; full input must be consumed, overflow is a failure.
pub fn parse_int(text: &str) -> Option<i64> {
    if check_number_error(text, int_prefix(text)) {
        return None;
    }
    text.parse().ok()
}

/// Unsigned counter; a leading sign is rejected.
pub fn parse_count(text: &str) -> Option<u64> {
    if check_number_error(text, int_prefix(text)) {
        return None;
    }
    if text.starts_with(['+', '-']) {
        return None;
    }
    text.parse().ok()
}

/// Decimal double; full input must be consumed.
pub fn parse_double(text: &str) -> Option<f64> {
    if check_number_error(text, double_prefix(text)) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::CollectingReporter;

    #[test]
    fn proto_exact_lowercase_only() {
        let reporter = CollectingReporter::new();
        assert_eq!(parse_proto("tcp", &reporter), Transport::Tcp);
        assert_eq!(parse_proto("udp", &reporter), Transport::Udp);
        assert_eq!(parse_proto("icmp", &reporter), Transport::Icmp);
        assert!(reporter.is_empty());

        assert_eq!(parse_proto("UDP", &reporter), Transport::Unknown);
        assert_eq!(parse_proto("bogus", &reporter), Transport::Unknown);
        assert_eq!(reporter.take().len(), 2);
    }

    #[test]
    fn addr_both_families() {
        let reporter = CollectingReporter::new();
        assert_eq!(
            parse_addr("192.168.1.1", &reporter),
            "192.168.1.1".parse::<IpAddr>().unwrap()
        );
        assert_eq!(
            parse_addr("2001:db8::1", &reporter),
            "2001:db8::1".parse::<IpAddr>().unwrap()
        );
        assert!(reporter.is_empty());
    }

    #[test]
    fn addr_failure_is_zero_plus_report() {
        let reporter = CollectingReporter::new();
        let addr = parse_addr("not-an-address", &reporter);
        assert_eq!(addr, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(
            reporter.take(),
            vec![FormatError::MalformedAddr { text: "not-an-address".into() }]
        );
    }

    // The return value of a failed parse and of a legitimate "0.0.0.0"
    // are the same address; only the side channel separates them.
    #[test]
    fn addr_zero_is_ambiguous_without_side_channel() {
        let reporter = CollectingReporter::new();
        let legit = parse_addr("0.0.0.0", &reporter);
        assert!(reporter.is_empty());

        let failed = parse_addr("garbage", &reporter);
        assert_eq!(legit, failed);
        assert_eq!(reporter.len(), 1);
    }

    #[test]
    fn subnet_parses_and_checks_length() {
        let reporter = CollectingReporter::new();
        let subnet = parse_subnet("10.0.0.0/8", &reporter).unwrap();
        assert_eq!(subnet.prefix, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)));
        assert_eq!(subnet.length, 8);
        assert!(reporter.is_empty());

        assert!(parse_subnet("10.0.0.0/33", &reporter).is_none());
        assert!(parse_subnet("10.0.0.0", &reporter).is_none());
        assert!(parse_subnet("10.0.0.0/x", &reporter).is_none());
        assert_eq!(reporter.take().len(), 3);
    }

    #[test]
    fn subnet_bad_address_degrades_to_zero_with_report() {
        let reporter = CollectingReporter::new();
        let subnet = parse_subnet("bogus/8", &reporter).unwrap();
        assert_eq!(subnet.prefix, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(subnet.length, 8);
        assert_eq!(
            reporter.take(),
            vec![FormatError::MalformedAddr { text: "bogus".into() }]
        );
    }

    #[test]
    fn number_error_conditions() {
        assert!(check_number_error("", 0));
        assert!(check_number_error("12x", 2));
        assert!(!check_number_error("12", 2));
    }

    #[test]
    fn int_full_consumption() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int("123abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("99999999999999999999"), None); // overflow
    }

    #[test]
    fn count_rejects_sign() {
        assert_eq!(parse_count("42"), Some(42));
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("+1"), None);
        assert_eq!(parse_count("12 "), None);
    }

    #[test]
    fn double_forms() {
        assert_eq!(parse_double("3.141590"), Some(3.14159));
        assert_eq!(parse_double("-0.5"), Some(-0.5));
        assert_eq!(parse_double("1e3"), Some(1000.0));
        assert_eq!(parse_double("2.5E-2"), Some(0.025));
        assert_eq!(parse_double(".5"), Some(0.5));
        assert_eq!(parse_double("5."), Some(5.0));
        assert_eq!(parse_double("1.5x"), None);
        assert_eq!(parse_double("1e"), None);
        assert_eq!(parse_double("."), None);
        assert_eq!(parse_double(""), None);
    }
}

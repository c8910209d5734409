//! Format-agnostic rendering primitives shared by all concrete formatters.
//!
//! Free functions on purpose: concrete formatters differ in escaping,
//! quoting and delimiters, but addresses, subnets, doubles and transport
//! protocols must come out byte-identical everywhere, or cross-formatter
//! round-trips break.

use std::net::IpAddr;

use crate::value::{Subnet, Transport};

/// Fractional digits used for every double, time and interval rendering,
/// in every formatter. A single constant so text produced by one format
/// re-parses identically under another.
pub const DOUBLE_PRECISION: usize = 6;

/// Canonical presentation: IPv4 dotted-decimal or IPv6 colon-hex
/// (the standard compressed form).
pub fn render_addr(addr: &IpAddr) -> String {
    addr.to_string()
}

/// `<address>/<prefix length>`.
pub fn render_subnet(subnet: &Subnet) -> String {
    format!("{}/{}", subnet.prefix, subnet.length)
}

/// Fixed-precision decimal, [`DOUBLE_PRECISION`] fractional digits.
pub fn render_double(d: f64) -> String {
    format!("{d:.prec$}", prec = DOUBLE_PRECISION)
}

/// Lowercase protocol name; inverse of [`crate::parse::parse_proto`]
/// except for `unknown`, which never parses back cleanly.
pub fn render_proto(proto: Transport) -> &'static str {
    match proto {
        Transport::Tcp => "tcp",
        Transport::Udp => "udp",
        Transport::Icmp => "icmp",
        Transport::Unknown => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn addr_presentation() {
        let v4 = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(render_addr(&v4), "192.168.1.1");

        let v6 = IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1));
        assert_eq!(render_addr(&v6), "2001:db8::1");
    }

    #[test]
    fn subnet_presentation() {
        let subnet = Subnet {
            prefix: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)),
            length: 8,
        };
        assert_eq!(render_subnet(&subnet), "10.0.0.0/8");
    }

    #[test]
    fn double_uses_standard_precision() {
        assert_eq!(render_double(3.14159), "3.141590");
        assert_eq!(render_double(-0.5), "-0.500000");
        assert_eq!(render_double(0.0), "0.000000");
    }

    #[test]
    fn proto_names() {
        assert_eq!(render_proto(Transport::Tcp), "tcp");
        assert_eq!(render_proto(Transport::Unknown), "unknown");
    }
}

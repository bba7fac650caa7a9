//! IPv4 subnet arithmetic.

use crate::domain::ports::Calculator;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::Validate;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct SubnetInput {
    /// IPv4 address, e.g. 192.168.1.100
    #[arg(long)]
    pub ip: String,

    /// CIDR prefix (24 or /24) or dotted mask (255.255.255.0)
    #[arg(long)]
    pub mask: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AddressClass {
    A,
    B,
    C,
    D,
    E,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressType {
    Private,
    Public,
    Loopback,
    LinkLocal,
    Multicast,
    Reserved,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubnetResult {
    pub ip: Ipv4Addr,
    pub cidr: u8,
    pub subnet_mask: Ipv4Addr,
    pub wildcard_mask: Ipv4Addr,
    pub network: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    pub total_addresses: u64,
    pub usable_hosts: u64,
    pub first_usable: Option<Ipv4Addr>,
    pub last_usable: Option<Ipv4Addr>,
    pub class: AddressClass,
    pub address_type: AddressType,
    pub binary_mask: String,
}

fn invalid(input: &str, reason: impl Into<String>) -> CalcError {
    CalcError::InvalidAddress {
        input: input.to_string(),
        reason: reason.into(),
    }
}

pub fn parse_ip(raw: &str) -> Result<Ipv4Addr> {
    raw.trim()
        .parse()
        .map_err(|_| invalid(raw, "expected four octets between 0 and 255"))
}

pub fn cidr_to_mask(cidr: u8) -> Result<u32> {
    match cidr {
        0 => Ok(0),
        1..=32 => Ok(u32::MAX << (32 - u32::from(cidr))),
        _ => Err(invalid(&cidr.to_string(), "CIDR prefix must be between 0 and 32")),
    }
}

pub fn mask_to_cidr(mask: u32) -> Result<u8> {
    let cidr = mask.leading_ones();
    // A valid mask is all ones followed by all zeros.
    if mask.checked_shl(cidr).unwrap_or(0) != 0 {
        return Err(invalid(
            &Ipv4Addr::from(mask).to_string(),
            "mask bits must be contiguous",
        ));
    }
    Ok(cidr as u8)
}

/// Parse a prefix (`24`, `/24`) or dotted mask into a CIDR length.
pub fn parse_mask(raw: &str) -> Result<u8> {
    let trimmed = raw.trim();
    if trimmed.contains('.') {
        let mask = parse_ip(trimmed).map_err(|_| invalid(raw, "malformed subnet mask"))?;
        return mask_to_cidr(u32::from(mask));
    }

    let digits = trimmed.strip_prefix('/').unwrap_or(trimmed);
    let cidr: u8 = digits
        .parse()
        .map_err(|_| invalid(raw, "CIDR prefix must be a number between 0 and 32"))?;
    cidr_to_mask(cidr)?;
    Ok(cidr)
}

pub fn classify(ip: Ipv4Addr) -> (AddressClass, AddressType) {
    let [first, second, ..] = ip.octets();

    let class = match first {
        0..=127 => AddressClass::A,
        128..=191 => AddressClass::B,
        192..=223 => AddressClass::C,
        224..=239 => AddressClass::D,
        _ => AddressClass::E,
    };

    let address_type = if ip.is_loopback() {
        AddressType::Loopback
    } else if ip.is_private() {
        AddressType::Private
    } else if ip.is_link_local() {
        AddressType::LinkLocal
    } else if ip.is_multicast() {
        AddressType::Multicast
    } else if first == 0 || first >= 240 || (first == 100 && (64..128).contains(&second)) {
        AddressType::Reserved
    } else {
        AddressType::Public
    };

    (class, address_type)
}

fn binary_octets(value: u32) -> String {
    value
        .to_be_bytes()
        .iter()
        .map(|octet| format!("{:08b}", octet))
        .collect::<Vec<_>>()
        .join(".")
}

impl Validate for SubnetInput {
    fn validate(&self) -> Result<()> {
        parse_ip(&self.ip)?;
        parse_mask(&self.mask)?;
        Ok(())
    }
}

impl Calculator for SubnetInput {
    type Output = SubnetResult;
    const NAME: &'static str = "subnet";

    fn compute(&self) -> Result<SubnetResult> {
        let ip = parse_ip(&self.ip)?;
        let cidr = parse_mask(&self.mask)?;
        let mask = cidr_to_mask(cidr)?;

        let address = u32::from(ip);
        let network = address & mask;
        let broadcast = network | !mask;

        let host_bits = 32 - u32::from(cidr);
        let total_addresses = 1u64 << host_bits;
        let usable_hosts = total_addresses.saturating_sub(2);
        let (first_usable, last_usable) = if usable_hosts > 0 {
            (
                Some(Ipv4Addr::from(network + 1)),
                Some(Ipv4Addr::from(broadcast - 1)),
            )
        } else {
            (None, None)
        };

        let (class, address_type) = classify(ip);
        tracing::debug!(%ip, cidr, "computed subnet");

        Ok(SubnetResult {
            ip,
            cidr,
            subnet_mask: Ipv4Addr::from(mask),
            wildcard_mask: Ipv4Addr::from(!mask),
            network: Ipv4Addr::from(network),
            broadcast: Ipv4Addr::from(broadcast),
            total_addresses,
            usable_hosts,
            first_usable,
            last_usable,
            class,
            address_type,
            binary_mask: binary_octets(mask),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subnet(ip: &str, mask: &str) -> Result<SubnetResult> {
        SubnetInput {
            ip: ip.to_string(),
            mask: mask.to_string(),
        }
        .calculate()
    }

    #[test]
    fn test_class_c_private_24() {
        let result = subnet("192.168.1.100", "255.255.255.0").unwrap();
        assert_eq!(result.cidr, 24);
        assert_eq!(result.network, Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(result.broadcast, Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(result.usable_hosts, 254);
        assert_eq!(result.first_usable, Some(Ipv4Addr::new(192, 168, 1, 1)));
        assert_eq!(result.last_usable, Some(Ipv4Addr::new(192, 168, 1, 254)));
        assert_eq!(result.wildcard_mask, Ipv4Addr::new(0, 0, 0, 255));
        assert_eq!(result.class, AddressClass::C);
        assert_eq!(result.address_type, AddressType::Private);
        assert_eq!(result.binary_mask, "11111111.11111111.11111111.00000000");
    }

    #[test]
    fn test_cidr_forms_agree() {
        let a = subnet("10.20.30.40", "/20").unwrap();
        let b = subnet("10.20.30.40", "20").unwrap();
        let c = subnet("10.20.30.40", "255.255.240.0").unwrap();
        assert_eq!(a.network, Ipv4Addr::new(10, 20, 16, 0));
        assert_eq!(a.broadcast, b.broadcast);
        assert_eq!(b.subnet_mask, c.subnet_mask);
        assert_eq!(c.usable_hosts, 4094);
    }

    #[test]
    fn test_edge_prefixes() {
        let host = subnet("8.8.8.8", "32").unwrap();
        assert_eq!(host.total_addresses, 1);
        assert_eq!(host.usable_hosts, 0);
        assert!(host.first_usable.is_none());
        assert_eq!(host.address_type, AddressType::Public);

        let p2p = subnet("8.8.8.8", "/31").unwrap();
        assert_eq!(p2p.usable_hosts, 0);

        let all = subnet("8.8.8.8", "/0").unwrap();
        assert_eq!(all.total_addresses, 1u64 << 32);
        assert_eq!(all.network, Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(all.broadcast, Ipv4Addr::new(255, 255, 255, 255));
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(
            subnet("192.168.1", "24"),
            Err(CalcError::InvalidAddress { .. })
        ));
        assert!(subnet("192.168.1.300", "24").is_err());
        assert!(subnet("192.168.1.1", "33").is_err());
        assert!(subnet("192.168.1.1", "255.0.255.0").is_err());
        assert!(subnet("192.168.1.1", "abc").is_err());
    }

    #[test]
    fn test_classification() {
        assert_eq!(
            classify(Ipv4Addr::new(127, 0, 0, 1)),
            (AddressClass::A, AddressType::Loopback)
        );
        assert_eq!(
            classify(Ipv4Addr::new(172, 16, 5, 4)),
            (AddressClass::B, AddressType::Private)
        );
        assert_eq!(
            classify(Ipv4Addr::new(169, 254, 1, 1)).1,
            AddressType::LinkLocal
        );
        assert_eq!(
            classify(Ipv4Addr::new(224, 0, 0, 1)),
            (AddressClass::D, AddressType::Multicast)
        );
    }

    #[test]
    fn test_mask_cidr_conversion() {
        assert_eq!(cidr_to_mask(24).unwrap(), 0xFFFF_FF00);
        assert_eq!(mask_to_cidr(0xFFFF_FF00).unwrap(), 24);
        assert_eq!(mask_to_cidr(0).unwrap(), 0);
        assert_eq!(mask_to_cidr(u32::MAX).unwrap(), 32);
        assert!(mask_to_cidr(0xFF00_FF00).is_err());
    }
}

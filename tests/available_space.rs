//! End-to-end tests over the public API
//!
//! Each scenario plays the role of a calling service: build a container from
//! an allocation snapshot, derive the free space, run a query, then filter
//! and render the results.

use freespace::{
    available_ips, available_ips_str, filter_results, AddressContainer, AvailableIp,
    AvailablePrefix, AvailableVlan, Error, IpRange, IpSplitter, Prefix, VlanGroup,
};
use ipnet::IpNet;
use std::net::IpAddr;
use std::str::FromStr;

fn addr(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn net(s: &str) -> IpNet {
    IpNet::from_str(s).unwrap()
}

// 172.20.0.0/24 with two /27 children carved out, as a calling service
// would present a parent prefix.
fn parent_prefix() -> Prefix {
    Prefix::new(net("172.20.0.0/24"))
        .with_children(vec![net("172.20.0.128/27"), net("172.20.0.192/27")])
}

#[test]
fn available_prefixes_fixed_mask() {
    let free = parent_prefix().available_prefixes().unwrap();
    let splitter = IpSplitter::new(&free);

    struct Case {
        name: &'static str,
        limit: Option<usize>,
        q: Option<&'static str>,
        expected: usize,
    }
    let cases = [
        Case {
            name: "no_limit_no_filter",
            limit: None,
            q: None,
            expected: 6,
        },
        Case {
            name: "with_limit_no_filter",
            limit: Some(3),
            q: None,
            expected: 3,
        },
        Case {
            name: "with_limit_with_filter",
            limit: Some(3),
            q: Some("172.20.0.1"),
            expected: 1,
        },
        Case {
            name: "no_limit_with_filter",
            limit: None,
            q: Some("172.20.0.1"),
            expected: 1,
        },
    ];
    for case in cases {
        // The filter stage owns the limit when a text query is in play;
        // capping the split first could starve a later match.
        let subnets = splitter.split(27, None).unwrap();
        let results = filter_results(subnets.into_iter().map(AvailablePrefix), case.q, case.limit);
        assert_eq!(results.len(), case.expected, "{}", case.name);
    }
}

#[test]
fn available_prefixes_unsplit() {
    // prefixlen absent: the free space's own covering blocks come back
    let free = parent_prefix().available_prefixes().unwrap();
    let blocks = IpSplitter::new(&free).split(0, None).unwrap();
    assert_eq!(
        blocks,
        vec![net("172.20.0.0/25"), net("172.20.0.160/27"), net("172.20.0.224/27")]
    );

    let filtered = filter_results(blocks.into_iter().map(AvailablePrefix), Some("172.30"), None);
    assert!(filtered.is_empty());
}

#[test]
fn available_ips_from_prefix_snapshot() {
    // 192.168.0.0/28 with .2 and .5 assigned: 14 usable hosts minus 2
    let prefix = Prefix::new(net("192.168.0.0/28"))
        .with_assigned(vec![addr("192.168.0.2"), addr("192.168.0.5")]);
    let free = prefix.available_ips().unwrap();
    assert_eq!(free.address_count(), 12);

    let ips = available_ips(&free, addr("192.168.0.1"), 4).unwrap();
    assert_eq!(
        ips,
        vec![
            addr("192.168.0.1"),
            addr("192.168.0.3"),
            addr("192.168.0.4"),
            addr("192.168.0.6"),
        ]
    );

    // Rendered with the parent's mask, as an API payload would carry them
    let rendered: Vec<AvailableIp> = ips
        .into_iter()
        .map(|ip| AvailableIp::with_mask(ip, prefix.mask_length()))
        .collect();
    assert_eq!(rendered[0].to_string(), "192.168.0.1/28");

    let json = serde_json::to_value(&rendered[1]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"id": "192.168.0.3/28", "display": "192.168.0.3/28"})
    );
}

#[test]
fn available_ips_exhaustion_is_an_error_not_a_short_list() {
    let range = IpRange::new(addr("192.168.1.10"), addr("192.168.1.20"), 24).unwrap();
    let free = range.available_ips().unwrap();

    let result = available_ips(&free, addr("192.168.1.10"), 30);
    assert_eq!(
        result,
        Err(Error::InsufficientAddresses {
            requested: 30,
            available: 11,
        })
    );
}

#[test]
fn base_address_may_carry_routing_suffix() {
    let prefix = Prefix::new(net("192.168.0.0/28"));
    let free = prefix.available_ips().unwrap();
    let ips = available_ips_str(&free, "192.168.0.6/28", 2).unwrap();
    assert_eq!(ips, vec![addr("192.168.0.6"), addr("192.168.0.7")]);
}

#[test]
fn mixed_family_query_is_rejected() {
    let prefix = Prefix::new(net("2001:db8::/64"));
    let free = prefix.available_ips().unwrap();
    let result = available_ips(&free, addr("192.168.0.1"), 1);
    assert!(matches!(result, Err(Error::MixedAddressFamily { .. })));
}

#[test]
fn available_vlans_through_filter() {
    let group = VlanGroup::new(vec![10..=15]).unwrap().with_used(vec![12]);

    struct Case {
        name: &'static str,
        q: Option<&'static str>,
        limit: Option<usize>,
        expected: usize,
    }
    let cases = [
        Case {
            name: "no_limit_no_filter",
            q: None,
            limit: None,
            expected: 5,
        },
        Case {
            name: "with_limit_no_filter",
            q: None,
            limit: Some(10),
            expected: 5,
        },
        Case {
            name: "with_limit_with_filter_not_match",
            q: Some("2"),
            limit: Some(10),
            expected: 0,
        },
        Case {
            name: "with_limit_with_filter_match",
            q: Some("1"),
            limit: Some(2),
            expected: 2,
        },
        Case {
            name: "no_limit_with_filter",
            q: Some("1"),
            limit: None,
            expected: 5,
        },
    ];
    for case in cases {
        let vids = group.available_vids();
        let results = filter_results(vids.into_iter().map(AvailableVlan), case.q, case.limit);
        assert_eq!(results.len(), case.expected, "{}", case.name);
    }

    let json = serde_json::to_value(AvailableVlan(13)).unwrap();
    assert_eq!(json, serde_json::json!({"id": "13", "display": "13"}));
}

#[test]
fn ipv6_prefix_splitting_with_pagination() {
    let prefix = Prefix::new(net("2001:db8::/48"));
    let free = prefix.available_prefixes().unwrap();

    let subnets = IpSplitter::new(&free).split(64, Some(4)).unwrap();
    assert_eq!(subnets.len(), 4);
    assert_eq!(subnets[0], net("2001:db8::/64"));
    assert_eq!(subnets[3], net("2001:db8:0:3::/64"));
}

#[test]
fn repeated_queries_are_identical() {
    let prefix = parent_prefix();
    let free = prefix.available_prefixes().unwrap();
    let splitter = IpSplitter::new(&free);

    let first = splitter.split(27, Some(4)).unwrap();
    let second = splitter.split(27, Some(4)).unwrap();
    assert_eq!(first, second);

    let ip_free = Prefix::new(net("192.168.0.0/28")).available_ips().unwrap();
    let a = available_ips(&ip_free, addr("192.168.0.4"), 3).unwrap();
    let b = available_ips(&ip_free, addr("192.168.0.4"), 3).unwrap();
    assert_eq!(a, b);
}

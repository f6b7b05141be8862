use std::collections::BTreeMap;
use std::fs;

/// Receive-side counters for one interface, in `/proc/net/dev` column order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RxCounters {
    pub bytes: u64,
    pub packets: u64,
    pub errs: u64,
    pub drop: u64,
    pub fifo: u64,
    pub frame: u64,
    pub compressed: u64,
    pub multicast: u64,
}

/// Transmit-side counters for one interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxCounters {
    pub bytes: u64,
    pub packets: u64,
    pub errs: u64,
    pub drop: u64,
    pub fifo: u64,
    pub colls: u64,
    pub carrier: u64,
    pub compressed: u64,
}

pub type RxTable = BTreeMap<String, RxCounters>;
pub type TxTable = BTreeMap<String, TxCounters>;

/// Parses a `/proc/net/dev` table: two header lines, then one line per
/// interface of the form `iface: <8 rx columns> <8 tx columns>`.
///
/// Both maps come out of the same pass, so their key sets are identical by
/// construction. Lines without an interface name are skipped; missing
/// numeric columns stay zero.
pub fn parse_net_dev(text: &str) -> (RxTable, TxTable) {
    let mut rx_table = RxTable::new();
    let mut tx_table = TxTable::new();

    for line in text.lines().skip(2) {
        let Some((name, rest)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let cols: Vec<u64> = rest
            .split_whitespace()
            .map(|c| c.parse().unwrap_or(0))
            .collect();
        let col = |i: usize| cols.get(i).copied().unwrap_or(0);

        rx_table.insert(
            name.to_string(),
            RxCounters {
                bytes: col(0),
                packets: col(1),
                errs: col(2),
                drop: col(3),
                fifo: col(4),
                frame: col(5),
                compressed: col(6),
                multicast: col(7),
            },
        );
        tx_table.insert(
            name.to_string(),
            TxCounters {
                bytes: col(8),
                packets: col(9),
                errs: col(10),
                drop: col(11),
                fifo: col(12),
                colls: col(13),
                carrier: col(14),
                compressed: col(15),
            },
        );
    }

    (rx_table, tx_table)
}

/// Reads per-interface RX/TX counters from `/proc/net/dev`.
///
/// Empty maps if the source is unreadable.
pub fn read_net_counters() -> (RxTable, TxTable) {
    match fs::read_to_string("/proc/net/dev") {
        Ok(text) => parse_net_dev(&text),
        Err(e) => {
            log::debug!("failed to read /proc/net/dev: {}", e);
            (RxTable::new(), TxTable::new())
        }
    }
}

/// Sum of received bytes across every interface.
pub fn total_rx_bytes(rx: &RxTable) -> u64 {
    rx.values().map(|c| c.bytes).sum()
}

/// Sum of transmitted bytes across every interface.
pub fn total_tx_bytes(tx: &TxTable) -> u64 {
    tx.values().map(|c| c.bytes).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NET_DEV: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 1000000     500    0    0    0     0          0         0  1000000     500    0    0    0     0       0          0
  eth0: 5000000    4000    1    2    0     0          0        10  2500000    3000    0    0    0     3       0          0
";

    #[test]
    fn parses_both_directions() {
        let (rx, tx) = parse_net_dev(NET_DEV);
        assert_eq!(rx.len(), 2);
        assert_eq!(rx.keys().collect::<Vec<_>>(), tx.keys().collect::<Vec<_>>());

        let eth_rx = &rx["eth0"];
        assert_eq!(eth_rx.bytes, 5_000_000);
        assert_eq!(eth_rx.packets, 4000);
        assert_eq!(eth_rx.errs, 1);
        assert_eq!(eth_rx.drop, 2);
        assert_eq!(eth_rx.multicast, 10);

        let eth_tx = &tx["eth0"];
        assert_eq!(eth_tx.bytes, 2_500_000);
        assert_eq!(eth_tx.packets, 3000);
        assert_eq!(eth_tx.colls, 3);
    }

    #[test]
    fn totals_sum_all_interfaces() {
        let (rx, tx) = parse_net_dev(NET_DEV);
        assert_eq!(total_rx_bytes(&rx), 6_000_000);
        assert_eq!(total_tx_bytes(&tx), 3_500_000);
    }

    #[test]
    fn empty_and_headerless_input() {
        let (rx, tx) = parse_net_dev("");
        assert!(rx.is_empty() && tx.is_empty());

        // Garbage after the header is ignored; short rows parse to zeros.
        let text = "h1\nh2\nnot a table row\n wlan0: 10 1\n";
        let (rx, _) = parse_net_dev(text);
        assert_eq!(rx["wlan0"].bytes, 10);
        assert_eq!(rx["wlan0"].packets, 1);
        assert_eq!(rx["wlan0"].errs, 0);
    }
}

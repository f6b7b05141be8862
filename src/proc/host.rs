use std::ffi::CStr;
use std::fs;

/// Static facts about the host shown in the system window header.
#[derive(Debug, Clone, Default)]
pub struct HostInfo {
    pub os_name: String,
    pub hostname: String,
    pub user: String,
    pub cpu_model: String,
}

impl HostInfo {
    pub fn read() -> Self {
        Self {
            os_name: os_name().to_string(),
            hostname: read_hostname(),
            user: std::env::var("USER").unwrap_or_else(|_| "unknown".to_string()),
            cpu_model: read_cpu_model(),
        }
    }
}

fn os_name() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "freebsd" => "FreeBSD",
        "macos" => "Mac OSX",
        "windows" => "Windows",
        other if !other.is_empty() => other,
        _ => "Other",
    }
}

fn read_hostname() -> String {
    fs::read_to_string("/proc/sys/kernel/hostname")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

fn read_cpu_model() -> String {
    let Ok(text) = fs::read_to_string("/proc/cpuinfo") else {
        return "unknown".to_string();
    };
    parse_cpu_model(&text).unwrap_or_else(|| "unknown".to_string())
}

/// Pulls the first `model name` value out of `/proc/cpuinfo` text.
pub fn parse_cpu_model(text: &str) -> Option<String> {
    text.lines()
        .find(|l| l.starts_with("model name"))?
        .split_once(':')
        .map(|(_, v)| v.trim().to_string())
}

/// One interface with its IPv4 address, as reported by `getifaddrs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Interface {
    pub name: String,
    pub address: String,
}

/// Lists every interface that currently has an IPv4 address.
///
/// Empty on failure; the network window just shows no rows.
pub fn read_ipv4_interfaces() -> Vec<Ipv4Interface> {
    let mut interfaces = Vec::new();
    let mut ifaddrs: *mut libc::ifaddrs = std::ptr::null_mut();

    // SAFETY: getifaddrs allocates the list and we free it with
    // freeifaddrs on every path out of this block.
    unsafe {
        if libc::getifaddrs(&mut ifaddrs) != 0 {
            return interfaces;
        }
        let mut cursor = ifaddrs;
        while !cursor.is_null() {
            let entry = &*cursor;
            cursor = entry.ifa_next;

            if entry.ifa_addr.is_null() || entry.ifa_name.is_null() {
                continue;
            }
            if (*entry.ifa_addr).sa_family != libc::AF_INET as libc::sa_family_t {
                continue;
            }

            let addr_in = &*(entry.ifa_addr as *const libc::sockaddr_in);
            let octets = addr_in.sin_addr.s_addr.to_ne_bytes();
            let name = CStr::from_ptr(entry.ifa_name).to_string_lossy().into_owned();
            interfaces.push(Ipv4Interface {
                name,
                address: std::net::Ipv4Addr::from(octets).to_string(),
            });
        }
        libc::freeifaddrs(ifaddrs);
    }
    interfaces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_model_from_cpuinfo() {
        let text = "processor\t: 0\nvendor_id\t: GenuineIntel\n\
            model name\t: Intel(R) Core(TM) i7-9750H CPU @ 2.60GHz\nstepping\t: 10\n";
        assert_eq!(
            parse_cpu_model(text).as_deref(),
            Some("Intel(R) Core(TM) i7-9750H CPU @ 2.60GHz")
        );
        assert_eq!(parse_cpu_model("processor: 0\n"), None);
    }

    #[test]
    fn host_info_has_no_empty_fields() {
        let info = HostInfo::read();
        assert!(!info.os_name.is_empty());
        assert!(!info.hostname.is_empty());
        assert!(!info.user.is_empty());
        assert!(!info.cpu_model.is_empty());
    }

    #[test]
    fn loopback_shows_up_in_ipv4_listing() {
        let interfaces = read_ipv4_interfaces();
        // Any Linux box running the tests has lo configured.
        assert!(interfaces.iter().any(|i| i.address == "127.0.0.1"));
    }
}

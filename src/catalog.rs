//! The fixed, ordered step catalog plus the flavor-text host lists.

use crate::model::Step;
use crate::sim;

/// Public iperf3 endpoints used as flavor text. The simulation only "tests"
/// the first few; the longer list mirrors what the full script would target.
pub const IPERF_SERVERS: &[&str] = &[
    "bouygues.iperf.fr:5209",
    "ping.online.net:5203",
    "iperf.he.net",
    "speedtest.serverius.net:5002",
    "iperf.volia.net",
    "iperf.biznetnetworks.com",
    "iperf.scottlinux.com",
];

/// Download test files used as flavor text; only a prefix is "downloaded".
pub const WGET_URLS: &[&str] = &[
    "http://speedtest.tele2.net/100MB.zip",
    "http://ipv4.download.thinkbroadband.com/100MB.zip",
    "http://mirror.leaseweb.com/speedtest/100mb.bin",
    "http://proof.ovh.net/files/100Mb.dat",
    "http://speedtest-sgp1.digitalocean.com/100mb.test",
];

/// The catalog is defined once and never mutated at runtime.
pub static STEPS: &[Step] = &[
    Step {
        id: "install",
        title: "Install Prerequisites",
        description: "Updates package lists and installs necessary tools like speedtest-cli, iperf3, and wget.",
        command: "sudo apt update && sudo apt install -y speedtest-cli iperf3 wget",
        simulate: |log| Box::pin(sim::install::run(log)),
    },
    Step {
        id: "speedtest",
        title: "Run Speedtest-CLI",
        description: "Performs a basic internet speed test to measure download and upload bandwidth.",
        command: "speedtest-cli",
        simulate: |log| Box::pin(sim::speedtest::run(log)),
    },
    Step {
        id: "iperf3",
        title: "Run iperf3 Tests",
        description: "Connects to a list of public iperf3 servers to test network performance against various endpoints.",
        command: "for server in \"${iperf_servers[@]}\"; do iperf3 -c $server; done",
        simulate: |log| Box::pin(sim::iperf::run(log)),
    },
    Step {
        id: "wget",
        title: "Run Wget Download Tests",
        description: "Downloads test files from various servers using wget to check download speeds from different sources.",
        command: "for url in \"${wget_urls[@]}\"; do wget -O /dev/null --show-progress $url; done",
        simulate: |log| Box::pin(sim::wget::run(log)),
    },
    Step {
        id: "ping",
        title: "Ping IPv6 Google",
        description: "Sends ICMP packets to Google's IPv6 address to check for IPv6 connectivity and latency.",
        command: "ping -c 4 ipv6.google.com",
        simulate: |log| Box::pin(sim::ping::run(log)),
    },
    Step {
        id: "fast",
        title: "Run fast-cli Test",
        description: "Uses fast-cli (powered by fast.com) to perform a quick internet speed test, focusing on upload.",
        command: "fast -u",
        simulate: |log| Box::pin(sim::fast::run(log)),
    },
];

/// Look up a step by id.
pub fn find(id: &str) -> Option<&'static Step> {
    STEPS.iter().find(|s| s.id == id)
}

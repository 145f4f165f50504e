use std::{
    net::{
        Ipv4Addr,
        SocketAddr,
    },
    time::Duration,
};

pub mod api_service;
pub(crate) mod query_log_extension;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub max_queries_depth: usize,
    pub max_queries_complexity: usize,
    pub max_concurrent_queries: usize,
    /// Time to wait after submitting a query before debug info will be logged about query.
    pub query_log_threshold_time: Duration,
    pub api_request_timeout: Duration,
}

impl Config {
    /// Configuration for a service bound to an ephemeral port on the loopback interface.
    pub fn local_node() -> Self {
        Self {
            addr: SocketAddr::new(Ipv4Addr::new(127, 0, 0, 1).into(), 0),
            ..Default::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), 8000),
            max_queries_depth: 16,
            max_queries_complexity: 1000,
            max_concurrent_queries: 1024,
            query_log_threshold_time: Duration::from_secs(2),
            api_request_timeout: Duration::from_secs(30),
        }
    }
}

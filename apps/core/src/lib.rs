pub mod categories;
pub mod config;
pub mod contract;
pub mod destinations;
pub mod history;
pub mod jump_list;
pub mod link;
pub mod logging;
pub mod model;
pub mod platform;
pub mod runtime;
pub mod transaction;
pub mod transport;

#[cfg(test)]
mod tests {
    mod bookmark_build_latency_test {
        include!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../tests/perf/bookmark_build_latency_test.rs"
        ));
    }
}

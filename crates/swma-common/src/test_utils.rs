//! Test utilities and shared test helpers for SWMA.
//!
//! Fixtures here are shaped like the real SWPC payloads so every crate can
//! exercise the pipeline without touching the network.

use crate::types::Timestamp;
use chrono::NaiveDate;
use axum::{
    http::{header, StatusCode},
    routing::get,
    Router,
};
use std::sync::Once;
use tokio::{net::TcpListener, runtime::Runtime, task::JoinHandle};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a tokio runtime for testing async functions from sync tests.
pub fn create_test_runtime() -> Runtime {
    Runtime::new().expect("Failed to create test runtime")
}

/// Test fixture for creating a naive timestamp.
pub fn mock_timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, sec))
        .expect("valid fixture timestamp")
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Sample feed payloads, trimmed copies of real SWPC responses.
pub mod feed_fixtures {
    /// `xrays-1-day.json`: both wavelength bands interleaved, three minutes.
    pub const XRAYS: &str = r#"[
        {"time_tag":"2023-01-01T00:00:00Z","satellite":16,"flux":2.1e-8,"energy":"0.05-0.4nm"},
        {"time_tag":"2023-01-01T00:00:00Z","satellite":16,"flux":1.1e-6,"energy":"0.1-0.8nm"},
        {"time_tag":"2023-01-01T00:01:00Z","satellite":16,"flux":2.4e-8,"energy":"0.05-0.4nm"},
        {"time_tag":"2023-01-01T00:01:00Z","satellite":16,"flux":1.3e-6,"energy":"0.1-0.8nm"},
        {"time_tag":"2023-01-01T00:02:00Z","satellite":16,"flux":2.2e-8,"energy":"0.05-0.4nm"},
        {"time_tag":"2023-01-01T00:02:00Z","satellite":16,"flux":1.2e-6,"energy":"0.1-0.8nm"}
    ]"#;

    /// `xray-flares-7-day.json`: one flare inside the `XRAYS` window, one before it.
    pub const FLARES_7_DAY: &str = r#"[
        {"time_tag":"2022-12-31T10:00:00Z","begin_time":"2022-12-31T09:50:00Z","max_time":"2022-12-31T10:02:00Z","end_time":"2022-12-31T10:20:00Z","max_class":"C3.4","max_xrlong":3.4e-6,"satellite":16},
        {"time_tag":"2023-01-01T00:00:00Z","begin_time":"2023-01-01T00:00:00Z","max_time":"2023-01-01T00:01:00Z","end_time":"2023-01-01T00:02:00Z","max_class":"M1.3","max_xrlong":1.3e-5,"satellite":16}
    ]"#;

    /// `xray-flares-latest.json` with an observed flare.
    pub const FLARE_LATEST: &str = r#"[
        {"time_tag":"2023-01-01T00:00:00Z","begin_time":"2023-01-01T00:00:00Z","max_time":"2023-01-01T00:01:00Z","end_time":"2023-01-01T00:02:00Z","max_class":"M1.3","max_xrlong":1.3e-5,"satellite":16}
    ]"#;

    /// `xray-flares-latest.json` when no flare has been observed.
    pub const FLARE_LATEST_NONE: &str = r#"[
        {"time_tag":"2023-01-01T00:00:00Z","begin_time":null,"max_time":null,"end_time":null,"max_class":null,"max_xrlong":null,"satellite":16}
    ]"#;

    /// `integral-protons-1-day.json`: all five channels over two minutes.
    pub const PROTONS: &str = r#"[
        {"time_tag":"2023-01-01T00:00:00Z","satellite":18,"flux":1.52,"energy":">=1 MeV"},
        {"time_tag":"2023-01-01T00:00:00Z","satellite":18,"flux":0.31,"energy":">=10 MeV"},
        {"time_tag":"2023-01-01T00:00:00Z","satellite":18,"flux":0.12,"energy":">=50 MeV"},
        {"time_tag":"2023-01-01T00:00:00Z","satellite":18,"flux":0.09,"energy":">=100 MeV"},
        {"time_tag":"2023-01-01T00:00:00Z","satellite":18,"flux":0.02,"energy":">=500 MeV"},
        {"time_tag":"2023-01-01T00:05:00Z","satellite":18,"flux":1.61,"energy":">=1 MeV"},
        {"time_tag":"2023-01-01T00:05:00Z","satellite":18,"flux":0.33,"energy":">=10 MeV"},
        {"time_tag":"2023-01-01T00:05:00Z","satellite":18,"flux":0.11,"energy":">=50 MeV"},
        {"time_tag":"2023-01-01T00:05:00Z","satellite":18,"flux":0.08,"energy":">=100 MeV"},
        {"time_tag":"2023-01-01T00:05:00Z","satellite":18,"flux":0.03,"energy":">=500 MeV"}
    ]"#;

    /// `solar_probabilities.json`: two forecast days.
    pub const PROBABILITIES: &str = r#"[
        {"date":"2023-01-01","c_class_1_day":45,"c_class_2_day":40,"c_class_3_day":35,"m_class_1_day":10,"m_class_2_day":10,"m_class_3_day":5,"x_class_1_day":1,"x_class_2_day":1,"x_class_3_day":1,"10mev_protons_1_day":1,"10mev_protons_2_day":1,"10mev_protons_3_day":1,"polar_cap_absorption":"green"},
        {"date":"2023-01-02","c_class_1_day":60,"c_class_2_day":55,"c_class_3_day":50,"m_class_1_day":15,"m_class_2_day":15,"m_class_3_day":10,"x_class_1_day":5,"x_class_2_day":5,"x_class_3_day":1,"10mev_protons_1_day":5,"10mev_protons_2_day":1,"10mev_protons_3_day":1,"polar_cap_absorption":"green"}
    ]"#;

    /// `plasma-1-day.json`: header row plus two observations.
    pub const PLASMA: &str = r#"[
        ["time_tag","density","speed","temperature"],
        ["2023-01-01 00:00:00.000","4.20","430.5","81234"],
        ["2023-01-01 00:01:00.000","4.35","428.1","80110"]
    ]"#;

    /// `mag-1-day.json`: header row plus two observations.
    pub const MAG: &str = r#"[
        ["time_tag","bx_gsm","by_gsm","bz_gsm","lon_gsm","lat_gsm","bt"],
        ["2023-01-01 00:00:00.000","1.20","-3.40","-2.10","289.43","-30.12","4.28"],
        ["2023-01-01 00:01:00.000","1.10","-3.30","-1.90","288.01","-28.73","4.05"]
    ]"#;

    /// `noaa-planetary-k-index.json`: header row plus two 3-hour intervals.
    pub const KP: &str = r#"[
        ["time_tag","Kp","a_running","station_count"],
        ["2023-01-01 00:00:00.000","2.33","9","8"],
        ["2023-01-01 03:00:00.000","3.00","15","8"]
    ]"#;
}

/// A canned HTTP response served by [`FixtureServer`].
#[derive(Debug, Clone)]
pub struct FixtureRoute {
    /// Request path, e.g. `/json/goes/primary/xrays-1-day.json`
    pub path: String,
    /// Status code to answer with
    pub status: u16,
    /// Content type header
    pub content_type: &'static str,
    /// Response body
    pub body: Vec<u8>,
}

impl FixtureRoute {
    /// A 200 response with a JSON body.
    pub fn json(path: impl Into<String>, body: &str) -> Self {
        Self {
            path: path.into(),
            status: 200,
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
        }
    }

    /// A response with an arbitrary status and body.
    pub fn raw(path: impl Into<String>, status: u16, content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            status,
            content_type,
            body,
        }
    }
}

/// Local HTTP server answering from a fixed route table.
///
/// Routes match on path only, so query strings are ignored. Unknown paths get
/// a 404. The server task is aborted on drop.
pub struct FixtureServer {
    base_url: String,
    handle: JoinHandle<()>,
}

impl FixtureServer {
    /// Bind to an ephemeral localhost port and start serving.
    pub async fn start(routes: Vec<FixtureRoute>) -> Self {
        let app = fixture_router(routes);
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fixture server");
        let addr = listener.local_addr().expect("Fixture server has no address");

        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                warn!(error = %err, "Fixture server stopped");
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    /// Base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn fixture_router(routes: Vec<FixtureRoute>) -> Router {
    routes
        .into_iter()
        .fold(Router::new(), |router, route| {
            let FixtureRoute {
                path,
                status,
                content_type,
                body,
            } = route;
            let status = StatusCode::from_u16(status).expect("Invalid fixture status code");
            router.route(
                &path,
                get(move || {
                    let body = body.clone();
                    async move { (status, [(header::CONTENT_TYPE, content_type)], body) }
                }),
            )
        })
        .fallback(|| async { (StatusCode::NOT_FOUND, "not found") })
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;
    use serde_json::{json, Value};

    /// The two GOES XRS wavelength bands.
    pub const XRAY_BANDS: [&str; 2] = ["0.1-0.8nm", "0.05-0.4nm"];

    /// Strategy for an X-ray payload with shuffled, possibly repeated minutes.
    pub fn xray_payload_strategy() -> impl Strategy<Value = Value> {
        prop::collection::vec((0u32..1440, 0usize..2, 1e-9f64..1e-3), 1..80).prop_map(|rows| {
            Value::Array(
                rows.into_iter()
                    .map(|(minute, band, flux)| {
                        json!({
                            "time_tag": format!("2023-01-01T{:02}:{:02}:00Z", minute / 60, minute % 60),
                            "satellite": 16,
                            "flux": flux,
                            "energy": XRAY_BANDS[band],
                        })
                    })
                    .collect(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_mock_timestamp() {
        let timestamp = mock_timestamp(2024, 1, 1, 12, 0, 0);
        assert_eq!(timestamp.year(), 2024);
        assert_eq!(timestamp.hour(), 12);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_fixtures_are_valid_json() {
        for payload in [
            feed_fixtures::XRAYS,
            feed_fixtures::FLARES_7_DAY,
            feed_fixtures::FLARE_LATEST,
            feed_fixtures::FLARE_LATEST_NONE,
            feed_fixtures::PROTONS,
            feed_fixtures::PROBABILITIES,
            feed_fixtures::PLASMA,
            feed_fixtures::MAG,
            feed_fixtures::KP,
        ] {
            let value: serde_json::Value = serde_json::from_str(payload).unwrap();
            assert!(value.is_array());
        }
    }

    #[test]
    fn test_fixture_server_serves_routes() {
        let runtime = create_test_runtime();
        runtime.block_on(async {
            let server = FixtureServer::start(vec![
                FixtureRoute::json("/kp.json", feed_fixtures::KP),
                FixtureRoute::raw("/busy.json", 429, "text/plain", b"slow down".to_vec()),
            ])
            .await;

            let response = reqwest::get(server.url("/kp.json?window=1-day")).await.unwrap();
            assert_eq!(response.status().as_u16(), 200);
            assert_eq!(
                response.headers()[reqwest::header::CONTENT_TYPE],
                "application/json"
            );
            assert!(response.text().await.unwrap().contains("station_count"));

            let busy = reqwest::get(server.url("/busy.json")).await.unwrap();
            assert_eq!(busy.status(), reqwest::StatusCode::TOO_MANY_REQUESTS);

            let missing = reqwest::get(server.url("/nope.json")).await.unwrap();
            assert_eq!(missing.status().as_u16(), 404);
        });
    }
}

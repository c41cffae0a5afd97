use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::pricing::Plan;

/// Install the Prometheus recorder
///
/// Fails if a global recorder is already installed.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!("bookings_created_total", "Total number of stored bookings");
    describe_counter!(
        "booking_revenue_rubles_total",
        "Sum of booked lesson prices in rubles"
    );
    describe_counter!("admin_access_total", "Admin access attempts by outcome");
    describe_gauge!("school_booking_info", "Service version information");

    gauge!("school_booking_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a stored booking
pub fn record_booking(plan: Plan, price: i64) {
    counter!("bookings_created_total", "plan" => plan.as_str()).increment(1);
    counter!("booking_revenue_rubles_total", "plan" => plan.as_str())
        .increment(u64::try_from(price).unwrap_or(0));
}

/// Record an admin access attempt (`granted`, `denied`, `missing`)
pub fn record_admin_access(outcome: &'static str) {
    counter!("admin_access_total", "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_metrics() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            init_metric_descriptions();
            record_booking(Plan::Group, 1180);
            record_booking(Plan::Individual, 790);
            record_admin_access("denied");
        });

        let rendered = handle.render();
        assert!(rendered.contains("bookings_created_total{plan=\"group\"} 1"));
        assert!(rendered.contains("booking_revenue_rubles_total{plan=\"individual\"} 790"));
        assert!(rendered.contains("admin_access_total{outcome=\"denied\"} 1"));
    }
}

// crates/sensor-gate-scenarios/src/api.rs
// ============================================================================
// Module: API Scenarios
// Description: Acceptance scenarios for the sensor-data HTTP contract.
// Purpose: Probe counts, CRUD round-trips, ordering, and date-range filtering.
// Dependencies: sensor-gate-client, sensor-gate-core, serde_json
// ============================================================================

//! ## Overview
//! Each procedure follows the same shape: append a breadcrumb, probe, assert.
//! The expected totals below are contracts against the reference fixture data
//! set the service is seeded with, not universal constants.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sensor_gate_core::CreatedReading;
use sensor_gate_core::NewReading;
use sensor_gate_core::ScenarioFuture;
use sensor_gate_core::StoredReading;
use sensor_gate_core::check;
use serde_json::json;

use crate::context::ScenarioContext;

// ============================================================================
// SECTION: Fixture Contract
// ============================================================================

/// Sensor types the reference service partitions records into.
pub const SENSOR_TYPES: &[&str] = &["temperature", "humidity", "light"];

/// Readings seeded per sensor type in the reference fixture
/// (seven days at one reading every five minutes).
pub const SEEDED_READINGS_PER_TYPE: u64 = 2016;

/// Inclusive lower bound of the date-range scenario.
pub const RANGE_START: &str = "2024-01-01 00:00:00";

/// Inclusive upper bound of the date-range scenario.
pub const RANGE_END: &str = "2024-01-01 00:40:00";

/// Records the reference fixture holds inside `[RANGE_START, RANGE_END]`.
pub const RANGE_FIXTURE_MATCHES: usize = 9;

// ============================================================================
// SECTION: Count Scenarios
// ============================================================================

/// `api-1.1`: every sensor type reports the seeded total.
pub fn sensor_counts(cx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        for sensor in SENSOR_TYPES {
            cx.step(format!("Checking {sensor} sensor count"));
            let response = cx.probe().get(&format!("/api/{sensor}/count")).await?;
            check::expect_status(&format!("{sensor} count endpoint"), response.status(), 200)?;
            let count: u64 = response.decode(&format!("{sensor} count"))?;
            check::expect_eq(&format!("{sensor} count"), count, SEEDED_READINGS_PER_TYPE)?;
        }
        Ok(())
    })
}

/// `api-1.2`: an unconfigured sensor type yields 404.
pub fn invalid_sensor_type(cx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        cx.step("Checking invalid sensor type");
        let response = cx.probe().get("/api/ERROR_TYPE/count").await?;
        check::expect_status("unknown sensor type count endpoint", response.status(), 404)?;
        Ok(())
    })
}

// ============================================================================
// SECTION: CRUD Scenarios
// ============================================================================

/// `api-1.3`: POST then GET returns exactly what was posted.
pub fn post_and_get(cx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        cx.step("Posting new temperature data");
        let body = NewReading::with_timestamp(25.5, "C", "2024-02-04 12:00:00");
        let response = cx.probe().post("/api/temperature", &body).await?;
        check::expect_status("temperature POST", response.status(), 200)?;
        let created: CreatedReading = response.decode("created temperature reading")?;

        cx.step("Getting posted temperature data");
        let response = cx.probe().get(&format!("/api/temperature/{}", created.id)).await?;
        check::expect_status("temperature GET by id", response.status(), 200)?;
        let stored: StoredReading = response.decode("stored temperature reading")?;
        check::expect_eq("retrieved value", stored.value, 25.5)?;
        check::expect_eq("retrieved unit", stored.unit.as_str(), "C")?;
        Ok(())
    })
}

/// `api-1.4`: PUT merges partial fields; a later GET reflects the update.
pub fn post_put_get(cx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        cx.step("Posting initial temperature data");
        let body = NewReading::with_timestamp(25.5, "C", "2024-02-04 12:00:00");
        let response = cx.probe().post("/api/temperature", &body).await?;
        check::expect_status("temperature POST", response.status(), 200)?;
        let created: CreatedReading = response.decode("created temperature reading")?;

        cx.step("Updating posted temperature data");
        let update = json!({"value": 26.5, "unit": "F"});
        let response =
            cx.probe().put(&format!("/api/temperature/{}", created.id), &update).await?;
        check::expect_status("temperature PUT", response.status(), 200)?;

        cx.step("Getting updated temperature data");
        let response = cx.probe().get(&format!("/api/temperature/{}", created.id)).await?;
        check::expect_status("temperature GET by id", response.status(), 200)?;
        let stored: StoredReading = response.decode("stored temperature reading")?;
        check::expect_eq("updated value", stored.value, 26.5)?;
        check::expect_eq("updated unit", stored.unit.as_str(), "F")?;
        Ok(())
    })
}

/// `api-1.5`: a POST without a timestamp gets a service-assigned default,
/// and deletion makes the record invisible to every later GET.
pub fn default_timestamp_and_delete(cx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        cx.step("Posting temperature data without timestamp");
        let body = NewReading::without_timestamp(25.5, "C");
        let response = cx.probe().post("/api/temperature", &body).await?;
        check::expect_status("temperature POST", response.status(), 200)?;
        let created: CreatedReading = response.decode("created temperature reading")?;

        cx.step("Getting posted temperature data to check default timestamp");
        let response = cx.probe().get(&format!("/api/temperature/{}", created.id)).await?;
        check::expect_status("temperature GET by id", response.status(), 200)?;
        let stored: StoredReading = response.decode("stored temperature reading")?;
        let _ = check::expect_timestamp("default timestamp", &stored)?;

        cx.step("Deleting temperature data");
        let response = cx.probe().delete(&format!("/api/temperature/{}", created.id)).await?;
        check::expect_status("temperature DELETE", response.status(), 200)?;

        cx.step("Getting deleted temperature data");
        let response = cx.probe().get(&format!("/api/temperature/{}", created.id)).await?;
        check::expect_status("temperature GET after delete", response.status(), 404)?;
        Ok(())
    })
}

// ============================================================================
// SECTION: Ordering Scenarios
// ============================================================================

/// `api-1.6`: `order-by=value` lists ascend by the numeric value field.
pub fn order_by_value(cx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        cx.step("Getting temperature data ordered by value");
        let response = cx.probe().get("/api/temperature?order-by=value").await?;
        check::expect_status("order-by=value query", response.status(), 200)?;
        let readings: Vec<StoredReading> = response.decode("temperature list")?;

        cx.step("Verifying data is ordered by value");
        check::check_sorted_by_value(&readings)?;
        Ok(())
    })
}

/// `api-1.7`: `order-by=timestamp` lists ascend by the timestamp string.
pub fn order_by_timestamp(cx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        cx.step("Getting temperature data ordered by timestamp");
        let response = cx.probe().get("/api/temperature?order-by=timestamp").await?;
        check::expect_status("order-by=timestamp query", response.status(), 200)?;
        let readings: Vec<StoredReading> = response.decode("temperature list")?;

        cx.step("Verifying data is ordered by timestamp");
        check::check_sorted_by_timestamp(&readings)?;
        Ok(())
    })
}

// ============================================================================
// SECTION: Date-Range Scenario
// ============================================================================

/// `api-1.8`: the closed-interval date filter returns the fixture's nine
/// records, every one inside the bounds.
pub fn date_range(cx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        cx.step("Getting temperature data within date range");
        let response = cx
            .probe()
            .get(&format!("/api/temperature?start-date={RANGE_START}&end-date={RANGE_END}"))
            .await?;
        check::expect_status("date-range query", response.status(), 200)?;
        let readings: Vec<StoredReading> = response.decode("temperature list")?;

        cx.step("Verifying number of records in date range");
        check::check_cardinality("date-range query", &readings, RANGE_FIXTURE_MATCHES)?;

        cx.step("Verifying all records are within date range");
        check::check_within_range(&readings, RANGE_START, RANGE_END)?;
        Ok(())
    })
}
